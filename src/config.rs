/*
 * Responsibility
 * - 環境変数の読み込み (PORT, APP_ENV, AUTH_COOKIE_NAME, HX_REQUEST_ONLY)
 * - HTTP middleware の上限値 (REQUEST_ID_HEADER, BODY_LIMIT_BYTES, REQUEST_TIMEOUT_SECS)
 * - 設定値のバリデーション (設定されていて読めない値は起動失敗)
 */
use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderName;

use crate::services::interceptor::DEFAULT_COOKIE_NAME;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    // interceptor が読む cookie 名
    pub auth_cookie_name: String,
    // true なら HX-Request: true のリクエストだけを書き換える
    pub hx_request_only: bool,
    pub http: HttpSettings,
}

/// middleware::http に渡す上限値
#[derive(Clone, Debug)]
pub struct HttpSettings {
    pub request_id_header: HeaderName,
    pub body_limit_bytes: usize,
    pub request_timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            request_id_header: HeaderName::from_static("x-request-id"),
            body_limit_bytes: 1024 * 1024,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = parse_or("PORT", env("PORT"), 3000)?;
        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));

        let app_env = AppEnv::from_env();

        let auth_cookie_name = parse_cookie_name(env("AUTH_COOKIE_NAME"))?;

        let hx_request_only = match env("HX_REQUEST_ONLY") {
            Some(v) => parse_flag(&v).ok_or(ConfigError::Invalid("HX_REQUEST_ONLY"))?,
            None => true,
        };

        let defaults = HttpSettings::default();
        let http = HttpSettings {
            request_id_header: parse_or(
                "REQUEST_ID_HEADER",
                env("REQUEST_ID_HEADER"),
                defaults.request_id_header,
            )?,
            body_limit_bytes: parse_or(
                "BODY_LIMIT_BYTES",
                env("BODY_LIMIT_BYTES"),
                defaults.body_limit_bytes,
            )?,
            request_timeout: match env("REQUEST_TIMEOUT_SECS") {
                None => defaults.request_timeout,
                Some(v) => match v.trim().parse::<u64>() {
                    Ok(secs) if secs > 0 => Duration::from_secs(secs),
                    _ => return Err(ConfigError::Invalid("REQUEST_TIMEOUT_SECS")),
                },
            },
        };

        Ok(Self {
            addr,
            app_env,
            auth_cookie_name,
            hx_request_only,
            http,
        })
    }
}

fn env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// 未設定なら default、設定されていて読めなければ Invalid(key)
fn parse_or<T: FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid(key)),
    }
}

fn parse_cookie_name(value: Option<String>) -> Result<String, ConfigError> {
    match value {
        None => Ok(DEFAULT_COOKIE_NAME.to_string()),
        Some(v) => {
            let v = v.trim();
            // 空や区切り文字を含む名前は cookie 文字列と一致しえない
            if v.is_empty() || v.contains(['=', ';', ' ']) {
                Err(ConfigError::Invalid("AUTH_COOKIE_NAME"))
            } else {
                Ok(v.to_string())
            }
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
