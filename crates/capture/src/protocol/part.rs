use bytes::Bytes;
use serde::Serialize;

use crate::protocol::{Charset, Header};

/// How a multipart section is rendered downstream.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum PartKind {
    Text,
    Binary,
}

/// Decoded content of a multipart section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PartContent {
    Text(String),
    Binary(Bytes),
}

/// One section of a `multipart/*` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Part {
    headers: Vec<Header>,
    mime_type: String,
    charset: Option<Charset>,
    content: PartContent,
}

impl Part {
    pub fn text(headers: Vec<Header>, mime_type: impl Into<String>, charset: Charset, text: String) -> Self {
        Self { headers, mime_type: mime_type.into(), charset: Some(charset), content: PartContent::Text(text) }
    }

    pub fn binary(headers: Vec<Header>, mime_type: impl Into<String>, bytes: Bytes) -> Self {
        Self { headers, mime_type: mime_type.into(), charset: None, content: PartContent::Binary(bytes) }
    }

    pub fn kind(&self) -> PartKind {
        match self.content {
            PartContent::Text(_) => PartKind::Text,
            PartContent::Binary(_) => PartKind::Binary,
        }
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The resolved charset, only present for text parts.
    pub fn charset(&self) -> Option<Charset> {
        self.charset
    }

    pub fn content(&self) -> &PartContent {
        &self.content
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.content {
            PartContent::Text(text) => Some(text),
            PartContent::Binary(_) => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match &self.content {
            PartContent::Text(_) => None,
            PartContent::Binary(bytes) => Some(bytes),
        }
    }
}
