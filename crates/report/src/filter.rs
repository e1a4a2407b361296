//! Predicates deciding which messages are left out of the report.
//!
//! A filter that matches means the message is skipped: it is neither buffered nor
//! emitted. The reporting interceptor combines its filters with *OR* logic.

use http::{HeaderName, HeaderValue, Method, Request, Response, StatusCode};

pub trait Filter<M>: Send + Sync {
    fn check(&self, message: &M) -> bool;
}

struct FnFilter<F>(F);

impl<M, F: Fn(&M) -> bool + Send + Sync> Filter<M> for FnFilter<F> {
    fn check(&self, message: &M) -> bool {
        (self.0)(message)
    }
}

pub fn fn_filter<M, F>(f: F) -> impl Filter<M>
where
    F: Fn(&M) -> bool + Send + Sync,
{
    FnFilter(f)
}

#[derive(Debug, Clone)]
pub struct MethodFilter(Method);

impl<B> Filter<Request<B>> for MethodFilter {
    fn check(&self, request: &Request<B>) -> bool {
        self.0.eq(request.method())
    }
}

macro_rules! method_filter {
    ($method:ident, $upper_case_method:ident) => {
        #[inline]
        pub fn $method() -> MethodFilter {
            MethodFilter(Method::$upper_case_method)
        }
    };
}

method_filter!(get_method, GET);
method_filter!(post_method, POST);
method_filter!(put_method, PUT);
method_filter!(delete_method, DELETE);
method_filter!(head_method, HEAD);
method_filter!(options_method, OPTIONS);
method_filter!(connect_method, CONNECT);
method_filter!(patch_method, PATCH);
method_filter!(trace_method, TRACE);

/// Matches requests whose path starts with the given prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixFilter(String);

pub fn path_prefix(prefix: impl Into<String>) -> PathPrefixFilter {
    PathPrefixFilter(prefix.into())
}

impl<B> Filter<Request<B>> for PathPrefixFilter {
    fn check(&self, request: &Request<B>) -> bool {
        request.uri().path().starts_with(&self.0)
    }
}

/// Matches responses with exactly this status.
#[derive(Debug, Clone, Copy)]
pub struct StatusFilter(StatusCode);

pub fn status(status: StatusCode) -> StatusFilter {
    StatusFilter(status)
}

impl<B> Filter<Response<B>> for StatusFilter {
    fn check(&self, response: &Response<B>) -> bool {
        self.0 == response.status()
    }
}

/// Matches requests and responses carrying the header with exactly this value.
///
/// # Errors
///
/// Fails when the name or the value is not a valid header name or value.
pub fn header<K, V>(header_name: K, header_value: V) -> Result<HeaderFilter, http::Error>
where
    HeaderName: TryFrom<K>,
    <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
    HeaderValue: TryFrom<V>,
    <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
{
    let name = <HeaderName as TryFrom<K>>::try_from(header_name).map_err(Into::into)?;
    let value = <HeaderValue as TryFrom<V>>::try_from(header_value).map_err(Into::into)?;
    Ok(HeaderFilter(name, value))
}

#[derive(Debug, Clone)]
pub struct HeaderFilter(HeaderName, HeaderValue);

impl HeaderFilter {
    fn matches(&self, headers: &http::HeaderMap) -> bool {
        headers.get_all(&self.0).iter().any(|value| *value == self.1)
    }
}

impl<B> Filter<Request<B>> for HeaderFilter {
    fn check(&self, request: &Request<B>) -> bool {
        self.matches(request.headers())
    }
}

impl<B> Filter<Response<B>> for HeaderFilter {
    fn check(&self, response: &Response<B>) -> bool {
        self.matches(response.headers())
    }
}
