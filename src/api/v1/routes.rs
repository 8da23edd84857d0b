/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - cookie-bearer middleware は app.rs 側で v1 全体に掛ける
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::session::session;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/session", get(session))
}
