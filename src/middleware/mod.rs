/*
 * Responsibility
 * - middleware の公開インターフェース
 * - pub fn apply(...) を各モジュールに置く
 */
pub mod cookie_bearer;
pub mod http;
