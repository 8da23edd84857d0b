/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - 起動時に登録を終えた RequestEvents (以降は読み取り専用)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::interceptor::RequestEvents;

#[derive(Clone, Debug)]
pub struct AppState {
    pub events: Arc<RequestEvents>,
    pub hx_request_only: bool,
}

impl AppState {
    pub fn new(events: RequestEvents, hx_request_only: bool) -> Self {
        Self {
            events: Arc::new(events),
            hx_request_only,
        }
    }
}
