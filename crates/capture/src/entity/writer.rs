use bytes::{Bytes, BytesMut};
use std::io;

/// In-memory sink handed to [`Entity::write_to`](super::Entity::write_to) while buffering.
pub(crate) struct Writer {
    buf: BytesMut,
}

impl Writer {
    pub(crate) fn new() -> Self {
        Self { buf: BytesMut::with_capacity(4096) }
    }

    pub(crate) fn take(&mut self) -> Bytes {
        self.buf.split().freeze()
    }
}

impl io::Write for Writer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
