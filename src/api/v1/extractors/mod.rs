/*!
 * Request extractors
 *
 * Public API:
 * - BearerToken
 */

mod bearer;

pub use bearer::BearerToken;
