//! Capture of http messages as structured, formatter-ready snapshots.
//!
//! The crate turns an [`http::Request`] or [`http::Response`] carrying an
//! [`entity::Body`] into a [`protocol::Snapshot`]: headers, decoded cookies and a body
//! decoded according to its content type.
//!
//! # Modules
//!
//! - [`entity`]: message bodies, buffering of single-read entities and collection of
//!   [`http_body::Body`] streams
//! - [`codec`]: content-type resolution, body classification and the form, multipart
//!   and cookie decoders
//! - [`snapshot`]: assembly of a snapshot from a whole message
//! - [`protocol`]: the snapshot data types and the error type
//!
//! # Example
//!
//! ```
//! use http::Request;
//! use micro_capture::codec::BodyTypeMap;
//! use micro_capture::entity::Body;
//! use micro_capture::protocol::SnapshotBody;
//! use micro_capture::snapshot;
//!
//! let mut request = Request::post("/login")
//!     .header("Content-Type", "application/x-www-form-urlencoded")
//!     .header("Cookie", "session=abc")
//!     .body(Body::from("user=admin&remember=true"))
//!     .unwrap();
//!
//! let snapshot = snapshot::request(&mut request, &BodyTypeMap::default());
//!
//! assert_eq!(snapshot.cookies()[0].value(), "abc");
//! assert!(matches!(snapshot.body(), SnapshotBody::Form(params) if params.len() == 2));
//! ```
//!
//! Decoding never fails: malformed input degrades to raw bytes, fewer parts or dropped
//! fields, and body read failures are reported through `tracing`.

pub mod codec;
pub mod entity;
pub mod protocol;
pub mod snapshot;
