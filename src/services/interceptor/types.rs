/*
 * Responsibility
 * - 送信前リクエストの「設定」(RequestConfig) の型
 * - before-request イベントの購読口 (BeforeRequest) と、その登録簿 (RequestEvents)
 *
 * Notes
 * - コールバックは同期的に呼ばれ、header map だけを書き換える
 * - 登録は起動時に 1 回だけ。以降は Arc で共有して読み取り専用にする
 */
use std::fmt;

use axum::http::{HeaderMap, Method};

use crate::services::cookie::CookieSource;

/// リクエスト 1 件分の送信前設定。コールバックの間だけ可変で貸し出される。
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub verb: Method,
    pub path: String,
    pub headers: HeaderMap,
}

impl RequestConfig {
    pub fn new(verb: Method, path: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            verb,
            path: path.into(),
            headers,
        }
    }
}

pub type BeforeRequestFn = Box<dyn Fn(&mut RequestConfig, &dyn CookieSource) + Send + Sync>;

/// before-request イベントの購読口
pub trait BeforeRequest {
    fn on_before_request(&mut self, callback: BeforeRequestFn);
}

#[derive(Default)]
pub struct RequestEvents {
    callbacks: Vec<BeforeRequestFn>,
}

impl RequestEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// 登録順にすべてのコールバックを呼ぶ。
    pub fn dispatch(&self, config: &mut RequestConfig, cookies: &dyn CookieSource) {
        tracing::trace!(
            verb = %config.verb,
            path = %config.path,
            callbacks = self.callbacks.len(),
            "configuring request"
        );

        for callback in &self.callbacks {
            callback(config, cookies);
        }
    }
}

impl BeforeRequest for RequestEvents {
    fn on_before_request(&mut self, callback: BeforeRequestFn) {
        self.callbacks.push(callback);
    }
}

impl fmt::Debug for RequestEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestEvents")
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}
