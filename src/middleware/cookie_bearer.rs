/*
 * Responsibility
 * - リクエストごとに before-request イベントを発火する (htmx の configRequest 相当)
 * - Cookie ヘッダを cookie ストアとして渡し、書き換えた header map をリクエストに戻す
 * - 検証はしない。Bearer の有無を見るのは extractor/handler 側
 */
//! `Cookie: token=...` → `Authorization: Bearer ...`
//!
//! ログイン時の cookie は HttpOnly なのでブラウザのスクリプトからは読めない。
//! そのため書き換えはサーバ側の入口で行う。

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::{self, Next},
    response::Response,
};

use crate::services::cookie::CookieSource;
use crate::services::interceptor::RequestConfig;
use crate::state::AppState;

const HX_REQUEST: &str = "hx-request";

/// ルータ配下の全リクエストに interceptor を掛ける。
///
/// ```ignore
/// let v1 = middleware::cookie_bearer::apply(api::v1::routes(), state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, configure_request))
}

async fn configure_request(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if state.hx_request_only && !is_htmx_request(req.headers()) {
        return next.run(req).await;
    }

    let (mut parts, body) = req.into_parts();

    // cookie ストアは書き換え前のヘッダから取る
    let cookies = parts.headers.cookie_string().into_owned();

    let mut config = RequestConfig::new(
        parts.method.clone(),
        parts.uri.path(),
        std::mem::take(&mut parts.headers),
    );
    state.events.dispatch(&mut config, &cookies);
    parts.headers = config.headers;

    next.run(Request::from_parts(parts, body)).await
}

fn is_htmx_request(headers: &HeaderMap) -> bool {
    headers
        .get(HX_REQUEST)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::to_bytes,
        http::{HeaderValue, header},
        routing::get,
    };
    use tower::ServiceExt;

    use super::*;
    use crate::services::interceptor::{self, RequestEvents};

    async fn echo_authorization(headers: HeaderMap) -> String {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
            .to_string()
    }

    fn app(hx_request_only: bool) -> Router {
        let mut events = RequestEvents::new();
        interceptor::install(&mut events, "token");
        let state = AppState::new(events, hx_request_only);

        apply(Router::new().route("/echo", get(echo_authorization)), state.clone())
            .with_state(state)
    }

    async fn send(app: Router, headers: &[(&'static str, &'static str)]) -> String {
        let mut req = Request::get("/echo");
        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let response = app.oneshot(req.body(Body::empty()).unwrap()).await.unwrap();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn htmx_request_gets_bearer_from_cookie() {
        let seen = send(
            app(true),
            &[("hx-request", "true"), ("cookie", "token=abc123; session=xyz")],
        )
        .await;

        assert_eq!(seen, "Bearer abc123");
    }

    #[tokio::test]
    async fn non_htmx_request_passes_through() {
        let seen = send(app(true), &[("cookie", "token=abc123")]).await;
        assert_eq!(seen, "-");
    }

    #[tokio::test]
    async fn every_request_is_intercepted_when_not_hx_only() {
        let seen = send(app(false), &[("cookie", "token=abc123")]).await;
        assert_eq!(seen, "Bearer abc123");
    }

    #[tokio::test]
    async fn missing_cookie_keeps_existing_authorization() {
        let seen = send(
            app(true),
            &[("hx-request", "true"), ("authorization", "Bearer from-client")],
        )
        .await;

        assert_eq!(seen, "Bearer from-client");
    }

    #[test]
    fn hx_request_header_detection() {
        let mut headers = HeaderMap::new();
        assert!(!is_htmx_request(&headers));

        headers.insert(HX_REQUEST, HeaderValue::from_static("false"));
        assert!(!is_htmx_request(&headers));

        headers.insert(HX_REQUEST, HeaderValue::from_static("True"));
        assert!(is_htmx_request(&headers));
    }
}
