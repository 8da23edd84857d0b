/*
 * Responsibility
 * - GET /session
 * - interceptor を通ったあとに Bearer が付いているかの確認用 (検証はしない)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::api::v1::extractors::BearerToken;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub scheme: &'static str,
}

pub async fn session(BearerToken(token): BearerToken) -> impl IntoResponse {
    tracing::debug!(token_len = token.len(), "bearer credential present");

    (
        StatusCode::OK,
        Json(SessionResponse {
            authenticated: true,
            scheme: "Bearer",
        }),
    )
}
