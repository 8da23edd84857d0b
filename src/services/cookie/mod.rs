/*!
 * Cookie reader
 *
 * Responsibility:
 * - 生の cookie 文字列 ("a=1; b=2") から名前で値を引く
 * - cookie の出所 (文字列 / HTTP ヘッダ) は CookieSource で抽象化する
 *
 * Public API:
 * - CookieSource
 * - get_cookie
 */

mod reader;

pub use reader::{CookieSource, get_cookie};
