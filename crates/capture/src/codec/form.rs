//! Decoding of `application/x-www-form-urlencoded` bodies.
//!
//! Percent-escapes are resolved on the raw octets first, the resulting bytes are then
//! read with the charset of the `Content-Type` header (UTF-8 by default). Field order
//! and duplicate names are preserved.

use tracing::trace;

use crate::codec::content_type::ContentInfo;
use crate::codec::percent::percent_decode;
use crate::entity::BufferedBody;
use crate::protocol::{Charset, Param, latin1};

/// Decodes a buffered form body into its fields.
///
/// An element carrying an invalid percent-escape is dropped, the rest still decodes.
pub fn decode(body: &BufferedBody, info: &ContentInfo) -> Vec<Param> {
    decode_bytes(body.bytes(), info.charset())
}

pub fn decode_bytes(bytes: &[u8], charset: Charset) -> Vec<Param> {
    bytes
        .split(|&b| b == b'&')
        .filter(|element| !element.is_empty())
        .filter_map(|element| {
            let param = decode_element(element, charset);
            if param.is_none() {
                trace!(element = %latin1(element), "dropping form element with an invalid percent-escape");
            }
            param
        })
        .collect()
}

fn decode_element(element: &[u8], charset: Charset) -> Option<Param> {
    let (name, value) = match element.iter().position(|&b| b == b'=') {
        Some(index) => (&element[..index], &element[index + 1..]),
        None => (element, &[][..]),
    };

    let name = percent_decode(name, true)?;
    let value = percent_decode(value, true)?;
    Some(Param::new(charset.decode(&name), charset.decode(&value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::content_type::resolve;

    fn params(pairs: &[(&str, &str)]) -> Vec<Param> {
        pairs.iter().map(|&(name, value)| Param::new(name, value)).collect()
    }

    #[test]
    fn keeps_order_and_duplicates() {
        let decoded = decode_bytes(b"a=1&b=2&a=3", Charset::utf8());
        assert_eq!(decoded, params(&[("a", "1"), ("b", "2"), ("a", "3")]));
    }

    #[test]
    fn missing_value_is_empty() {
        let decoded = decode_bytes(b"flag&name=&=anonymous", Charset::utf8());
        assert_eq!(decoded, params(&[("flag", ""), ("name", ""), ("", "anonymous")]));
    }

    #[test]
    fn splits_on_first_equals_only() {
        let decoded = decode_bytes(b"expr=a%3Db=c", Charset::utf8());
        assert_eq!(decoded, params(&[("expr", "a=b=c")]));
    }

    #[test]
    fn decodes_escapes_and_plus() {
        let decoded = decode_bytes(b"tz=Europe%2FMinsk&greeting=hello+world&check=%E2%9C%93", Charset::utf8());
        assert_eq!(decoded, params(&[("tz", "Europe/Minsk"), ("greeting", "hello world"), ("check", "✓")]));
    }

    #[test]
    fn drops_invalid_elements_only() {
        let decoded = decode_bytes(b"good=1&bad=%zz&%&also=2", Charset::utf8());
        assert_eq!(decoded, params(&[("good", "1"), ("also", "2")]));
    }

    #[test]
    fn empty_body() {
        assert!(decode_bytes(b"", Charset::utf8()).is_empty());
        assert!(decode_bytes(b"&&", Charset::utf8()).is_empty());
    }

    #[test]
    fn uses_declared_charset() {
        let info = resolve(Some("application/x-www-form-urlencoded; charset=ISO-8859-1"));
        let body = BufferedBody::new(&b"name=caf%E9"[..], None);
        assert_eq!(decode(&body, &info), params(&[("name", "café")]));

        let info = resolve(Some("application/x-www-form-urlencoded"));
        let body = BufferedBody::new(&b"name=caf%C3%A9"[..], None);
        assert_eq!(decode(&body, &info), params(&[("name", "café")]));
    }

    #[test]
    fn latin1_fields_keep_every_byte() {
        let decoded = decode_bytes(b"ctl=%80%9F&sign=%A4", Charset::Latin1);
        assert_eq!(decoded, params(&[("ctl", "\u{80}\u{9F}"), ("sign", "\u{A4}")]));
    }

    #[test]
    fn unusable_charset_decodes_as_utf8() {
        let info = resolve(Some("application/x-www-form-urlencoded; charset=ISO-2022-KR"));
        let body = BufferedBody::new(&b"greeting=hello+world&check=%E2%9C%93"[..], None);
        assert_eq!(decode(&body, &info), params(&[("greeting", "hello world"), ("check", "✓")]));
    }
}
