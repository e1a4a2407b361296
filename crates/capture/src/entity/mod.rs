//! Message entities and the buffering that makes them replayable.
//!
//! A transport hands over bodies that can often be read only once. [`Body::buffer`]
//! reads such an entity a single time, keeps the captured bytes as a [`BufferedBody`]
//! and puts that buffered copy back in place of the original, so whoever processes the
//! message afterwards still sees the full content.
//!
//! Reading failures are never fatal: they are reported with `tracing::warn!` and the
//! message is treated as bodiless.

use std::fmt;
use std::io::{self, Read, Write};

use bytes::Bytes;
use tracing::warn;

use crate::protocol::CaptureError;

mod collect;
mod writer;

pub use collect::collect;
pub use collect::collect_request;
pub use collect::collect_response;

use writer::Writer;

/// A message body considered as a byte-producing source.
pub trait Entity: Send {
    /// The `Content-Type` declared by the entity itself, if any.
    fn content_type(&self) -> Option<&str>;

    /// Whether [`Entity::write_to`] can be called more than once.
    fn is_repeatable(&self) -> bool;

    /// Streams the whole content into `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::Consumed`] when a single-read entity is asked twice,
    /// or [`CaptureError::Io`] when the underlying source fails.
    fn write_to(&mut self, sink: &mut dyn Write) -> Result<(), CaptureError>;

    /// Hands out already-buffered content without copying it.
    fn buffered(&self) -> Option<BufferedBody> {
        None
    }
}

/// An immutable, repeatable entity backed by [`Bytes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferedBody {
    bytes: Bytes,
    content_type: Option<String>,
}

impl BufferedBody {
    pub fn new(bytes: impl Into<Bytes>, content_type: Option<String>) -> Self {
        Self { bytes: bytes.into(), content_type }
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Entity for BufferedBody {
    fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    fn is_repeatable(&self) -> bool {
        true
    }

    fn write_to(&mut self, sink: &mut dyn Write) -> Result<(), CaptureError> {
        sink.write_all(&self.bytes)?;
        Ok(())
    }

    fn buffered(&self) -> Option<BufferedBody> {
        Some(self.clone())
    }
}

/// A single-read entity over any [`Read`] source.
pub struct StreamEntity<R> {
    reader: Option<R>,
    content_type: Option<String>,
}

impl<R: Read + Send> StreamEntity<R> {
    pub fn new(reader: R, content_type: Option<String>) -> Self {
        Self { reader: Some(reader), content_type }
    }
}

impl<R> fmt::Debug for StreamEntity<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamEntity")
            .field("consumed", &self.reader.is_none())
            .field("content_type", &self.content_type)
            .finish()
    }
}

impl<R: Read + Send> Entity for StreamEntity<R> {
    fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    fn is_repeatable(&self) -> bool {
        false
    }

    fn write_to(&mut self, sink: &mut dyn Write) -> Result<(), CaptureError> {
        let mut reader = self.reader.take().ok_or(CaptureError::Consumed)?;
        io::copy(&mut reader, sink).map_err(CaptureError::io)?;
        Ok(())
    }
}

/// The body handle of a captured message: either nothing, or one entity.
pub struct Body {
    entity: Option<Box<dyn Entity>>,
}

impl Body {
    pub fn empty() -> Self {
        Self { entity: None }
    }

    pub fn new<E: Entity + 'static>(entity: E) -> Self {
        Self { entity: Some(Box::new(entity)) }
    }

    pub fn from_bytes(bytes: impl Into<Bytes>, content_type: Option<&str>) -> Self {
        Self::new(BufferedBody::new(bytes, content_type.map(str::to_owned)))
    }

    pub fn from_reader<R: Read + Send + 'static>(reader: R, content_type: Option<&str>) -> Self {
        Self::new(StreamEntity::new(reader, content_type.map(str::to_owned)))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entity.is_none()
    }

    pub fn entity(&self) -> Option<&dyn Entity> {
        self.entity.as_deref()
    }

    pub fn entity_mut(&mut self) -> Option<&mut (dyn Entity + 'static)> {
        self.entity.as_deref_mut()
    }

    /// Makes the body replayable and returns its content.
    ///
    /// A single-read entity is drained once and replaced in place by the resulting
    /// [`BufferedBody`]; calling this again afterwards does not touch the source. When the
    /// read fails a warning is logged, a drained single-read entity is dropped, and `None`
    /// is returned.
    pub fn buffer(&mut self) -> Option<BufferedBody> {
        let entity = self.entity.as_mut()?;
        if let Some(buffered) = entity.buffered() {
            return Some(buffered);
        }

        let repeatable = entity.is_repeatable();
        let content_type = entity.content_type().map(str::to_owned);
        let mut writer = Writer::new();
        match entity.write_to(&mut writer) {
            Ok(()) => {
                let buffered = BufferedBody::new(writer.take(), content_type);
                if !repeatable {
                    self.entity = Some(Box::new(buffered.clone()));
                }
                Some(buffered)
            }
            Err(e) => {
                warn!(cause = %e, repeatable, "unable to read http entity");
                if !repeatable {
                    self.entity = None;
                }
                None
            }
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.entity {
            None => f.write_str("Body::Empty"),
            Some(entity) => f
                .debug_struct("Body")
                .field("repeatable", &entity.is_repeatable())
                .field("content_type", &entity.content_type())
                .finish(),
        }
    }
}

impl From<BufferedBody> for Body {
    fn from(buffered: BufferedBody) -> Self {
        Self::new(buffered)
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Self::from_bytes(bytes, None)
    }
}

impl From<String> for Body {
    fn from(value: String) -> Self {
        Self::from_bytes(value, None)
    }
}

impl From<&'static str> for Body {
    fn from(value: &'static str) -> Self {
        Self::from_bytes(value, None)
    }
}

impl From<()> for Body {
    fn from((): ()) -> Self {
        Self::empty()
    }
}
