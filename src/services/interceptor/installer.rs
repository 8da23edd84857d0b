//! cookie の token を `Authorization: Bearer <token>` として送信前リクエストに載せる。
//!
//! - cookie が無い / 空のときは何もしない（ログも出さない）
//! - 既存の Authorization は上書きする

use axum::http::{HeaderValue, header};

use crate::services::cookie::{CookieSource, get_cookie};

use super::types::{BeforeRequest, RequestConfig};

pub const DEFAULT_COOKIE_NAME: &str = "token";

const BEARER_PREFIX: &str = "Bearer ";

/// before-request にコールバックを 1 つ登録する。content-loaded の listener から呼ぶ想定。
pub fn install<E>(events: &mut E, cookie_name: impl Into<String>)
where
    E: BeforeRequest + ?Sized,
{
    let cookie_name = cookie_name.into();

    events.on_before_request(Box::new(
        move |config: &mut RequestConfig, cookies: &dyn CookieSource| {
            apply_bearer(config, cookies, &cookie_name);
        },
    ));
}

fn apply_bearer(config: &mut RequestConfig, cookies: &dyn CookieSource, cookie_name: &str) {
    let Some(token) = get_cookie(cookies, cookie_name).filter(|t| !t.is_empty()) else {
        return;
    };

    match HeaderValue::from_str(&format!("{BEARER_PREFIX}{token}")) {
        Ok(value) => {
            config.headers.insert(header::AUTHORIZATION, value);
        }
        Err(err) => {
            // ヘッダ値にできない token は送らない
            tracing::debug!(error = %err, cookie = cookie_name, "skipping bearer header");
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, Method};

    use super::*;
    use crate::services::interceptor::{Page, RequestEvents};

    fn installed(cookie_name: &str) -> RequestEvents {
        let mut events = RequestEvents::new();
        install(&mut events, cookie_name);
        events
    }

    fn config() -> RequestConfig {
        RequestConfig::new(Method::GET, "/notes", HeaderMap::new())
    }

    #[test]
    fn sets_bearer_header_from_token_cookie() {
        let events = installed(DEFAULT_COOKIE_NAME);
        let mut config = config();

        events.dispatch(&mut config, &"token=abc123; session=xyz");

        assert_eq!(config.headers[header::AUTHORIZATION], "Bearer abc123");
    }

    #[test]
    fn missing_cookie_leaves_headers_unchanged() {
        let events = installed(DEFAULT_COOKIE_NAME);
        let mut config = config();
        config
            .headers
            .insert("hx-request", HeaderValue::from_static("true"));
        let before = config.headers.clone();

        events.dispatch(&mut config, &"session=xyz");

        assert_eq!(config.headers, before);
        assert!(!config.headers.contains_key(header::AUTHORIZATION));
    }

    #[test]
    fn empty_token_is_treated_as_missing() {
        let events = installed(DEFAULT_COOKIE_NAME);
        let mut config = config();

        events.dispatch(&mut config, &"token=; session=xyz");

        assert!(config.headers.is_empty());
    }

    #[test]
    fn replaces_existing_authorization() {
        let events = installed(DEFAULT_COOKIE_NAME);
        let mut config = config();
        config
            .headers
            .insert(header::AUTHORIZATION, HeaderValue::from_static("Basic Zm9v"));

        events.dispatch(&mut config, &"token=abc123");

        assert_eq!(config.headers.get_all(header::AUTHORIZATION).iter().count(), 1);
        assert_eq!(config.headers[header::AUTHORIZATION], "Bearer abc123");
    }

    #[test]
    fn token_with_equals_is_truncated() {
        let events = installed(DEFAULT_COOKIE_NAME);
        let mut config = config();

        events.dispatch(&mut config, &"token=eyJh.eyJz.sig==");

        assert_eq!(config.headers[header::AUTHORIZATION], "Bearer eyJh.eyJz.sig");
    }

    #[test]
    fn custom_cookie_name() {
        let events = installed("access_token");
        let mut config = config();

        events.dispatch(&mut config, &"token=ignored; access_token=xyz");

        assert_eq!(config.headers[header::AUTHORIZATION], "Bearer xyz");
    }

    #[test]
    fn unencodable_token_is_skipped() {
        let events = installed(DEFAULT_COOKIE_NAME);
        let mut config = config();

        events.dispatch(&mut config, &"token=abc\u{7f}def");

        assert!(config.headers.is_empty());
    }

    #[test]
    fn installs_once_through_content_loaded() {
        let mut page = Page::new();
        page.on_content_loaded(|events| install(events, DEFAULT_COOKIE_NAME));

        page.content_loaded();
        page.content_loaded();

        let events = page.into_events();
        assert_eq!(events.len(), 1);

        let mut config = config();
        events.dispatch(&mut config, &"token=abc123");
        assert_eq!(config.headers[header::AUTHORIZATION], "Bearer abc123");
    }
}
