use serde::Serialize;

/// A cookie taken from a `Cookie` or `Set-Cookie` header.
///
/// Request cookies only carry a name and a value, every attribute stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cookie {
    name: String,
    value: String,
    comment: Option<String>,
    path: Option<String>,
    domain: Option<String>,
    max_age: Option<String>,
    secure: Option<bool>,
    http_only: Option<bool>,
    expires: Option<String>,
    version: Option<String>,
    same_site: Option<String>,
}

macro_rules! cookie_attribute {
    ($getter:ident, $setter:ident) => {
        pub fn $getter(&self) -> Option<&str> {
            self.$getter.as_deref()
        }

        pub fn $setter(mut self, value: impl Into<String>) -> Self {
            self.$getter = Some(value.into());
            self
        }
    };
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into(), ..Self::default() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    cookie_attribute!(comment, with_comment);
    cookie_attribute!(path, with_path);
    cookie_attribute!(domain, with_domain);
    cookie_attribute!(max_age, with_max_age);
    cookie_attribute!(expires, with_expires);
    cookie_attribute!(version, with_version);
    cookie_attribute!(same_site, with_same_site);

    pub fn secure(&self) -> Option<bool> {
        self.secure
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    pub fn http_only(&self) -> Option<bool> {
        self.http_only
    }

    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = Some(http_only);
        self
    }
}
