//! Parsing of `Cookie` and `Set-Cookie` header values.

use tracing::trace;

use crate::codec::percent::percent_decode;
use crate::protocol::Cookie;

/// Parses a request `Cookie` header value into flat name/value cookies.
///
/// Pairs are separated by `;`, a pair without `=` yields an empty value and pairs with
/// an empty name are skipped.
pub fn parse_request_cookies(value: &str) -> impl Iterator<Item = Cookie> + '_ {
    value.split(';').filter_map(|pair| {
        let pair = pair.trim();
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        let name = name.trim();
        (!name.is_empty()).then(|| Cookie::new(name, decode_value(value.trim())))
    })
}

/// Parses one `Set-Cookie` header value.
///
/// Returns `None` when the leading `name=value` pair is missing. Unknown attributes and
/// attributes lacking a required value are ignored.
pub fn parse_set_cookie(value: &str) -> Option<Cookie> {
    let mut attributes = value.split(';');
    let (name, value) = attributes.next()?.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let mut cookie = Cookie::new(name, decode_value(value.trim()));
    for attribute in attributes.map(str::trim).filter(|attribute| !attribute.is_empty()) {
        let (key, value) = match attribute.split_once('=') {
            Some((key, value)) => (key.trim(), Some(value.trim())),
            None => (attribute, None),
        };

        cookie = match (key.to_ascii_lowercase().as_str(), value) {
            ("secure", _) => cookie.with_secure(true),
            ("httponly", _) => cookie.with_http_only(true),
            ("comment", Some(value)) => cookie.with_comment(value),
            ("path", Some(value)) => cookie.with_path(value),
            ("domain", Some(value)) => cookie.with_domain(value),
            ("max-age", Some(value)) => cookie.with_max_age(value),
            ("expires", Some(value)) => cookie.with_expires(value),
            ("version", Some(value)) => cookie.with_version(value),
            ("samesite", Some(value)) => cookie.with_same_site(value),
            _ => {
                trace!(attribute, "ignoring cookie attribute");
                cookie
            }
        };
    }
    Some(cookie)
}

// quoted values are unwrapped, values that are not valid percent-encoded utf-8 stay as is
fn decode_value(value: &str) -> String {
    let value = value
        .strip_prefix('"')
        .and_then(|value| value.strip_suffix('"'))
        .unwrap_or(value);

    percent_decode(value.as_bytes(), false)
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_else(|| value.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_cookies() {
        let cookies: Vec<_> = parse_request_cookies("test=value; tz=Europe%2FMinsk").collect();
        assert_eq!(cookies, vec![Cookie::new("test", "value"), Cookie::new("tz", "Europe/Minsk")]);
    }

    #[test]
    fn request_cookies_edge_cases() {
        let cookies: Vec<_> = parse_request_cookies(" ; flag; =orphan; raw=100%; quoted=\"a b\"").collect();
        assert_eq!(
            cookies,
            vec![Cookie::new("flag", ""), Cookie::new("raw", "100%"), Cookie::new("quoted", "a b")]
        );
    }

    #[test]
    fn set_cookie_with_attributes() {
        let cookie =
            parse_set_cookie("test=value; expires=Tue, 06 Sep 2022 09:32:51 UTC; path=/; secure; httponly").unwrap();

        assert_eq!(cookie.name(), "test");
        assert_eq!(cookie.value(), "value");
        assert_eq!(cookie.expires(), Some("Tue, 06 Sep 2022 09:32:51 UTC"));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.comment(), None);
        assert_eq!(cookie.same_site(), None);
    }

    #[test]
    fn set_cookie_all_attributes() {
        let cookie = parse_set_cookie(
            "tz=Europe%2FMinsk; Comment=test comment; Domain=example.com; Max-Age=3600; Version=1; SameSite=Lax; Priority=High",
        )
        .unwrap();

        assert_eq!(cookie.value(), "Europe/Minsk");
        assert_eq!(cookie.comment(), Some("test comment"));
        assert_eq!(cookie.domain(), Some("example.com"));
        assert_eq!(cookie.max_age(), Some("3600"));
        assert_eq!(cookie.version(), Some("1"));
        assert_eq!(cookie.same_site(), Some("Lax"));
        assert_eq!(cookie.secure(), None);
    }

    #[test]
    fn set_cookie_invalid() {
        assert_eq!(parse_set_cookie(""), None);
        assert_eq!(parse_set_cookie("novalue; path=/"), None);
        assert_eq!(parse_set_cookie("=value"), None);
    }
}
