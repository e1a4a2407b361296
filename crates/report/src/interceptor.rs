//! The reporting interceptor.
//!
//! [`ReportInterceptor`] sits in a client or server pipeline and is handed every request
//! and response. Unless a filter matches, the message is captured with
//! [`micro_capture::snapshot`] and passed to a [`ReportEmitter`]. Capturing buffers the
//! body in place, the message stays fully usable afterwards.
//!
//! The body type table can be replaced at any time with
//! [`ReportInterceptor::set_body_types`]; messages processed afterwards use the new table.

use std::fmt;
use std::fmt::Display;
use std::sync::Arc;

use arc_swap::ArcSwap;
use http::{Request, Response};
use http_body::Body as HttpBody;
use micro_capture::codec::BodyTypeMap;
use micro_capture::entity::{Body, collect_request, collect_response};
use micro_capture::snapshot;
use tracing::{Level, trace};

use crate::converter::Converters;
use crate::emitter::{ReportEmitter, TracingEmitter};
use crate::filter::Filter;

type RequestFilter = Box<dyn Filter<Request<Body>>>;
type ResponseFilter = Box<dyn Filter<Response<Body>>>;

pub struct ReportInterceptor {
    level: Level,
    body_types: ArcSwap<BodyTypeMap>,
    converters: Converters,
    request_filters: Vec<RequestFilter>,
    response_filters: Vec<ResponseFilter>,
    emitter: Box<dyn ReportEmitter>,
}

impl ReportInterceptor {
    pub fn builder() -> ReportInterceptorBuilder {
        ReportInterceptorBuilder::new()
    }

    /// An interceptor logging through `tracing` at `level` with every default.
    pub fn new(level: Level) -> Self {
        Self::builder().level(level).build()
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn converters(&self) -> &Converters {
        &self.converters
    }

    /// The table currently used to classify bodies.
    pub fn body_types(&self) -> Arc<BodyTypeMap> {
        self.body_types.load_full()
    }

    /// Publishes a new body type table, messages already being processed keep the old one.
    pub fn set_body_types(&self, body_types: BodyTypeMap) {
        self.body_types.store(Arc::new(body_types));
    }

    pub fn process_request(&self, request: &mut Request<Body>) {
        if self.request_filters.iter().any(|filter| filter.check(request)) {
            trace!(method = %request.method(), uri = %request.uri(), "request filtered out of the report");
            return;
        }
        let snapshot = snapshot::request(request, &self.body_types.load());
        self.emitter.emit(self.level, &snapshot, &self.converters);
    }

    pub fn process_response(&self, response: &mut Response<Body>) {
        if self.response_filters.iter().any(|filter| filter.check(response)) {
            trace!(status = %response.status(), "response filtered out of the report");
            return;
        }
        let snapshot = snapshot::response(response, &self.body_types.load());
        self.emitter.emit(self.level, &snapshot, &self.converters);
    }

    /// Collects a streaming request body, then reports the request.
    pub async fn intercept_request<B>(&self, request: Request<B>) -> Request<Body>
    where
        B: HttpBody,
        B::Error: Display,
    {
        let mut request = collect_request(request).await;
        self.process_request(&mut request);
        request
    }

    /// Collects a streaming response body, then reports the response.
    pub async fn intercept_response<B>(&self, response: Response<B>) -> Response<Body>
    where
        B: HttpBody,
        B::Error: Display,
    {
        let mut response = collect_response(response).await;
        self.process_response(&mut response);
        response
    }
}

impl Default for ReportInterceptor {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for ReportInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportInterceptor")
            .field("level", &self.level)
            .field("body_types", &self.body_types.load().len())
            .field("converters", &self.converters)
            .field("request_filters", &self.request_filters.len())
            .field("response_filters", &self.response_filters.len())
            .finish_non_exhaustive()
    }
}

pub struct ReportInterceptorBuilder {
    level: Level,
    body_types: BodyTypeMap,
    converters: Converters,
    request_filters: Vec<RequestFilter>,
    response_filters: Vec<ResponseFilter>,
    emitter: Box<dyn ReportEmitter>,
}

impl ReportInterceptorBuilder {
    fn new() -> Self {
        Self {
            level: Level::INFO,
            body_types: BodyTypeMap::default(),
            converters: Converters::default(),
            request_filters: vec![],
            response_filters: vec![],
            emitter: Box::new(TracingEmitter),
        }
    }

    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn body_types(mut self, body_types: BodyTypeMap) -> Self {
        self.body_types = body_types;
        self
    }

    #[must_use]
    pub fn converters(mut self, converters: Converters) -> Self {
        self.converters = converters;
        self
    }

    /// Skips every request the filter matches.
    #[must_use]
    pub fn add_request_filter<F: Filter<Request<Body>> + 'static>(mut self, filter: F) -> Self {
        self.request_filters.push(Box::new(filter));
        self
    }

    /// Skips every response the filter matches.
    #[must_use]
    pub fn add_response_filter<F: Filter<Response<Body>> + 'static>(mut self, filter: F) -> Self {
        self.response_filters.push(Box::new(filter));
        self
    }

    #[must_use]
    pub fn emitter<E: ReportEmitter + 'static>(mut self, emitter: E) -> Self {
        self.emitter = Box::new(emitter);
        self
    }

    pub fn build(self) -> ReportInterceptor {
        ReportInterceptor {
            level: self.level,
            body_types: ArcSwap::from_pointee(self.body_types),
            converters: self.converters,
            request_filters: self.request_filters,
            response_filters: self.response_filters,
            emitter: self.emitter,
        }
    }
}

impl fmt::Debug for ReportInterceptorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportInterceptorBuilder")
            .field("level", &self.level)
            .field("body_types", &self.body_types.len())
            .field("request_filters", &self.request_filters.len())
            .field("response_filters", &self.response_filters.len())
            .finish_non_exhaustive()
    }
}
