//! Resolution of `Content-Type` header values into a mime type and a charset.
//!
//! Resolution never fails: anything that does not parse as a `type/subtype` media type
//! resolves to the `*/*` wildcard with UTF-8, so that classification and rendering stay
//! defined for arbitrary header garbage.

use std::borrow::Cow;

use mime::Mime;
use tracing::trace;

use crate::protocol::Charset;

/// The mime type used whenever a header is absent or cannot be parsed.
pub const WILDCARD: &str = "*/*";

/// Mime type and charset resolved from a `Content-Type` header value.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentInfo {
    mime: Option<Mime>,
    mime_type: String,
    charset: Charset,
}

impl ContentInfo {
    /// `*/*` with UTF-8.
    pub fn wildcard() -> Self {
        Self { mime: None, mime_type: WILDCARD.to_owned(), charset: Charset::utf8() }
    }

    /// The lowercased `type/subtype`, without parameters.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    pub fn is_wildcard(&self) -> bool {
        self.mime_type == WILDCARD
    }

    /// Looks up a parameter of the header, the name is matched case-insensitively.
    ///
    /// Surrounding double quotes of a quoted value are removed.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.mime.as_ref()?.get_param(name).map(|value| value.as_str().trim_matches('"'))
    }

    /// The multipart `boundary` parameter.
    pub fn boundary(&self) -> Option<&str> {
        self.param(mime::BOUNDARY.as_str())
    }

    /// Decodes `bytes` with the resolved charset, malformed sequences are replaced.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        self.charset.decode(bytes)
    }
}

impl Default for ContentInfo {
    fn default() -> Self {
        Self::wildcard()
    }
}

/// Resolves an optional `Content-Type` header value.
///
/// The charset parameter is honored when [`Charset::for_label`] accepts it, any other
/// value falls back to UTF-8.
pub fn resolve(header: Option<&str>) -> ContentInfo {
    let Some(value) = header.map(str::trim).filter(|value| !value.is_empty()) else {
        return ContentInfo::wildcard();
    };

    let mime = match value.parse::<Mime>() {
        Ok(mime) => mime,
        Err(e) => {
            trace!(content_type = value, cause = %e, "unparsable content type, using wildcard");
            return ContentInfo::wildcard();
        }
    };

    if !is_type_token(mime.type_().as_str()) || !is_type_token(mime.subtype().as_str()) {
        trace!(content_type = value, "content type is not a token/token pair, using wildcard");
        return ContentInfo::wildcard();
    }

    let charset = match mime.get_param(mime::CHARSET) {
        Some(label) => Charset::for_label(label.as_str().trim_matches('"')).unwrap_or_else(|| {
            trace!(content_type = value, "unusable charset, using UTF-8");
            Charset::utf8()
        }),
        None => Charset::utf8(),
    };

    ContentInfo { mime_type: mime.essence_str().to_ascii_lowercase(), charset, mime: Some(mime) }
}

// either the `*` wildcard or a token carrying at least one letter or digit
fn is_type_token(token: &str) -> bool {
    token == "*" || token.bytes().any(|b| b.is_ascii_alphanumeric())
}
