//! Readable reports of http traffic, built on top of `micro-capture`.
//!
//! ```
//! use http::Request;
//! use micro_capture::entity::Body;
//! use micro_report::ReportInterceptor;
//! use micro_report::filter::path_prefix;
//! use tracing::Level;
//!
//! let interceptor = ReportInterceptor::builder()
//!     .level(Level::DEBUG)
//!     .add_request_filter(path_prefix("/health"))
//!     .build();
//!
//! let mut request = Request::post("/login").body(Body::from("user=admin")).unwrap();
//! interceptor.process_request(&mut request);
//! ```

mod converter;
mod emitter;
mod interceptor;
mod render;

pub mod filter;

pub use converter::Converters;
pub use converter::{CookieConverter, HeaderConverter, ParamConverter, Prettifier, UriConverter};
pub use converter::{cookie_to_string, header_to_string, json_prettifier, param_to_string};
pub use emitter::ReportEmitter;
pub use emitter::TracingEmitter;
pub use interceptor::ReportInterceptor;
pub use interceptor::ReportInterceptorBuilder;
pub use render::render;
