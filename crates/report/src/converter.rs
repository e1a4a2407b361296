//! String conversion of snapshot entries.
//!
//! Every entry kind of a report goes through a replaceable function: headers, multipart
//! part headers, cookies, the request uri and form fields. Text bodies can additionally be
//! reformatted by a prettifier registered for their mime type.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use micro_capture::protocol::{Cookie, Header, Param};

pub type HeaderConverter = Arc<dyn Fn(&Header) -> String + Send + Sync>;
pub type CookieConverter = Arc<dyn Fn(&Cookie) -> String + Send + Sync>;
pub type UriConverter = Arc<dyn Fn(&str) -> String + Send + Sync>;
pub type ParamConverter = Arc<dyn Fn(&Param) -> String + Send + Sync>;
pub type Prettifier = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// The conversion functions used when rendering a report.
///
/// [`Converters::default`] uses [`header_to_string`], [`cookie_to_string`], the identity
/// for uris, [`param_to_string`] and pretty-prints `application/json` bodies.
#[derive(Clone)]
pub struct Converters {
    header: HeaderConverter,
    part_header: HeaderConverter,
    cookie: CookieConverter,
    uri: UriConverter,
    param: ParamConverter,
    prettifiers: HashMap<String, Prettifier>,
}

impl Converters {
    #[must_use]
    pub fn with_header_converter<F>(mut self, f: F) -> Self
    where
        F: Fn(&Header) -> String + Send + Sync + 'static,
    {
        self.header = Arc::new(f);
        self
    }

    #[must_use]
    pub fn with_part_header_converter<F>(mut self, f: F) -> Self
    where
        F: Fn(&Header) -> String + Send + Sync + 'static,
    {
        self.part_header = Arc::new(f);
        self
    }

    #[must_use]
    pub fn with_cookie_converter<F>(mut self, f: F) -> Self
    where
        F: Fn(&Cookie) -> String + Send + Sync + 'static,
    {
        self.cookie = Arc::new(f);
        self
    }

    #[must_use]
    pub fn with_uri_converter<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.uri = Arc::new(f);
        self
    }

    #[must_use]
    pub fn with_param_converter<F>(mut self, f: F) -> Self
    where
        F: Fn(&Param) -> String + Send + Sync + 'static,
    {
        self.param = Arc::new(f);
        self
    }

    /// Registers a prettifier for text bodies of `mime_type`, replacing a previous one.
    #[must_use]
    pub fn with_prettifier<F>(mut self, mime_type: impl AsRef<str>, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.prettifiers.insert(mime_type.as_ref().to_ascii_lowercase(), Arc::new(f));
        self
    }

    #[must_use]
    pub fn without_prettifier(mut self, mime_type: impl AsRef<str>) -> Self {
        self.prettifiers.remove(&mime_type.as_ref().to_ascii_lowercase());
        self
    }

    pub fn header(&self, header: &Header) -> String {
        (self.header)(header)
    }

    pub fn part_header(&self, header: &Header) -> String {
        (self.part_header)(header)
    }

    pub fn cookie(&self, cookie: &Cookie) -> String {
        (self.cookie)(cookie)
    }

    pub fn uri(&self, uri: &str) -> String {
        (self.uri)(uri)
    }

    pub fn param(&self, param: &Param) -> String {
        (self.param)(param)
    }

    /// Applies the prettifier of `mime_type` to `text`, text of other types is kept as is.
    pub fn prettify(&self, mime_type: &str, text: &str) -> String {
        match self.prettifiers.get(mime_type) {
            Some(prettifier) => prettifier(text),
            None => text.to_owned(),
        }
    }
}

impl Default for Converters {
    fn default() -> Self {
        Self {
            header: Arc::new(header_to_string),
            part_header: Arc::new(header_to_string),
            cookie: Arc::new(cookie_to_string),
            uri: Arc::new(str::to_owned),
            param: Arc::new(param_to_string),
            prettifiers: HashMap::new(),
        }
        .with_prettifier("application/json", json_prettifier)
    }
}

impl fmt::Debug for Converters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut prettified: Vec<&str> = self.prettifiers.keys().map(String::as_str).collect();
        prettified.sort_unstable();
        f.debug_struct("Converters").field("prettifiers", &prettified).finish_non_exhaustive()
    }
}

/// `name: value`
pub fn header_to_string(header: &Header) -> String {
    format!("{}: {}", header.name(), header.value())
}

/// `name: value` followed by every present attribute, e.g. `id: 1; Path=/; Secure=true`.
pub fn cookie_to_string(cookie: &Cookie) -> String {
    let mut out = format!("{}: {}", cookie.name(), cookie.value());
    let attributes = [
        ("Comment", cookie.comment().map(str::to_owned)),
        ("Path", cookie.path().map(str::to_owned)),
        ("Domain", cookie.domain().map(str::to_owned)),
        ("Max-Age", cookie.max_age().map(str::to_owned)),
        ("Secure", cookie.secure().map(|secure| secure.to_string())),
        ("HttpOnly", cookie.http_only().map(|http_only| http_only.to_string())),
        ("Expires", cookie.expires().map(str::to_owned)),
        ("Version", cookie.version().map(str::to_owned)),
        ("SameSite", cookie.same_site().map(str::to_owned)),
    ];
    out.extend(attributes.into_iter().filter_map(|(key, value)| value.map(|value| format!("; {key}={value}"))));
    out
}

/// `name: value`
pub fn param_to_string(param: &Param) -> String {
    format!("{}: {}", param.name(), param.value())
}

/// Pretty-prints a json document, text that does not parse is returned unchanged.
pub fn json_prettifier(text: &str) -> String {
    serde_json::from_str::<serde_json::Value>(text)
        .and_then(|value| serde_json::to_string_pretty(&value))
        .unwrap_or_else(|_| text.to_owned())
}
