//! Data types produced by the capture engine.
//!
//! Everything in here is plain owned data: a [`Snapshot`] outlives the message it was
//! taken from and can be handed to any renderer. All types implement `serde::Serialize`.
//!
//! - [`Snapshot`]: the captured message, with its [`MessageLine`] and [`SnapshotBody`]
//! - [`Header`], [`Cookie`], [`Param`]: decoded header, cookie and form entries
//! - [`Part`]: one section of a multipart body
//! - [`Charset`]: the character set text content was decoded with
//! - [`CaptureError`]: entity read failures, reported but never propagated

mod charset;
pub use charset::Charset;

mod cookie;
pub use cookie::Cookie;

mod header;
pub use header::Header;
pub(crate) use header::latin1;

mod param;
pub use param::Param;

mod part;
pub use part::Part;
pub use part::PartContent;
pub use part::PartKind;

mod snapshot;
pub use snapshot::MessageLine;
pub use snapshot::Snapshot;
pub use snapshot::SnapshotBody;

mod error;
pub use error::CaptureError;
