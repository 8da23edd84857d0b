use std::borrow::Cow;

use axum::http::{HeaderMap, header};

const SEPARATOR: &str = "; ";

/// 読み取り専用の cookie ストア
///
/// ブラウザの `document.cookie` と同じく `"; "` 区切りの 1 本の文字列を返す。
pub trait CookieSource {
    fn cookie_string(&self) -> Cow<'_, str>;
}

impl CookieSource for str {
    fn cookie_string(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl CookieSource for &str {
    fn cookie_string(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl CookieSource for String {
    fn cookie_string(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

/// HTTP/2 では Cookie ヘッダが複数行に分割されうるので、`"; "` で連結して 1 本に戻す。
/// 非 ASCII の値 (`lang=日本` など) は行ごと捨てず、不正な UTF-8 だけを U+FFFD に置き換える。
impl CookieSource for HeaderMap {
    fn cookie_string(&self) -> Cow<'_, str> {
        let mut lines = self
            .get_all(header::COOKIE)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()));

        let Some(first) = lines.next() else {
            return Cow::Borrowed("");
        };

        lines.fold(first, |mut joined, line| {
            let buf = joined.to_mut();
            buf.push_str(SEPARATOR);
            buf.push_str(&line);
            joined
        })
    }
}

/// `name` に一致する最初の cookie の値を返す。
///
/// 値は最初の `=` の直後から次の `=` (なければ末尾) までを取る。
/// `token=a=b` は `"a"` になる。
pub fn get_cookie<S>(source: &S, name: &str) -> Option<String>
where
    S: CookieSource + ?Sized,
{
    let raw = source.cookie_string();
    let prefix = format!("{name}=");

    raw.split(SEPARATOR)
        .find(|row| row.starts_with(&prefix))
        .and_then(|row| row.split('=').nth(1))
        .map(str::to_owned)
}
