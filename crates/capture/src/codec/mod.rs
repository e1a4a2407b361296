//! Decoders turning buffered body bytes into structured values.
//!
//! [`content_type::resolve`] parses a `Content-Type` value, [`classifier::classify`] picks a
//! [`BodyKind`] for it and the [`form`] and [`multipart`] decoders take it from there.
//! Header-level parsing of cookies lives in [`cookie`].

pub mod classifier;
pub mod content_type;
pub mod cookie;
pub mod form;
pub mod multipart;
mod percent;

pub use classifier::{BodyKind, BodyTypeMap, classify};
pub use content_type::{ContentInfo, WILDCARD, resolve};
