/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config読み込み → content-loaded で interceptor を登録 → Router 組み立て
 * - Middleware の適用 (http / cookie-bearer)
 * - axum::serve() で起動
 */
use std::{panic, process};

use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::get};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::{Config, HttpSettings};
use crate::error::AppError;
use crate::middleware;
use crate::services::interceptor::{self, Page, RequestEvents};
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG があればそれを優先する
    // Ex:
    // RUST_LOG=info,htmx_cookie_bearer=trace,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development では即落として気付けるようにする
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<(), AppError> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let events = load_interceptors(&config);
    if events.is_empty() {
        tracing::warn!("no request interceptors installed");
    }
    tracing::info!(
        cookie = %config.auth_cookie_name,
        hx_request_only = config.hx_request_only,
        callbacks = events.len(),
        "request interceptors installed"
    );

    let state = AppState::new(events, config.hx_request_only);
    let app = build_router(state, &config.http);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, addr = %config.addr, "bind failed");
            AppError::Internal
        })?;
    axum::serve(listener, app).await.map_err(|err| {
        tracing::error!(error = %err, "server error");
        AppError::Internal
    })?;

    Ok(())
}

/// content-loaded を 1 回だけ発火させ、登録済みの RequestEvents を取り出す。
fn load_interceptors(config: &Config) -> RequestEvents {
    let cookie_name = config.auth_cookie_name.clone();

    let mut page = Page::new();
    page.on_content_loaded(move |events| interceptor::install(events, cookie_name));
    page.content_loaded();

    page.into_events()
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

fn build_router(state: AppState, http: &HttpSettings) -> Router {
    let v1 = middleware::cookie_bearer::apply(api::v1::routes(), state.clone());

    let router = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", v1)
        .with_state(state);

    middleware::http::apply(router, http)
}
