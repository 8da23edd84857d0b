//! HTTP-level middleware applied once at the outermost Router.
//!
//! Header name, body limit and timeout come from `config::HttpSettings`
//! (`REQUEST_ID_HEADER`, `BODY_LIMIT_BYTES`, `REQUEST_TIMEOUT_SECS`).

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use tower::timeout::{TimeoutLayer, error::Elapsed};
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::HttpSettings;

pub fn apply(router: Router, settings: &HttpSettings) -> Router {
    let id_header = settings.request_id_header.clone();

    router.layer(
        ServiceBuilder::new()
            // timeout が返すエラーをレスポンスに変換し、Router が要求する Infallible にする
            .layer(HandleErrorLayer::new(layer_error_status))
            .layer(SetRequestIdLayer::new(id_header.clone(), MakeRequestUuid))
            .layer(PropagateRequestIdLayer::new(id_header))
            .layer(RequestBodyLimitLayer::new(settings.body_limit_bytes))
            .layer(TimeoutLayer::new(settings.request_timeout))
            .layer(TraceLayer::new_for_http()),
    )
}

async fn layer_error_status(err: BoxError) -> StatusCode {
    if err.is::<Elapsed>() {
        tracing::warn!("request timed out");
        return StatusCode::REQUEST_TIMEOUT;
    }

    tracing::error!(error = %err, "unhandled middleware error");
    StatusCode::INTERNAL_SERVER_ERROR
}
