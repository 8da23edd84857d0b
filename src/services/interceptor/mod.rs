/*!
 * Request interceptor
 *
 * Responsibility:
 * - before-request イベント (RequestEvents) と content-loaded ライフサイクル (Page)
 * - cookie → Bearer ヘッダの installer
 *
 * Public API:
 * - RequestConfig / BeforeRequest / RequestEvents
 * - Page
 * - install / DEFAULT_COOKIE_NAME
 */

mod installer;
mod page;
mod types;

pub use installer::{DEFAULT_COOKIE_NAME, install};
pub use page::Page;
pub use types::{BeforeRequest, RequestConfig, RequestEvents};
