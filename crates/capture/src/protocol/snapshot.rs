use bytes::Bytes;
use http::{Method, StatusCode};
use serde::{Serialize, Serializer};

use crate::protocol::{Cookie, Header, Param, Part};

/// The line identifying a captured message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MessageLine {
    Request {
        #[serde(serialize_with = "serialize_method")]
        method: Method,
        uri: String,
    },
    Response {
        #[serde(serialize_with = "serialize_status")]
        status: StatusCode,
        /// e.g. `HTTP/1.1 201 Created`
        status_line: String,
    },
}

/// The single body representation held by a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SnapshotBody {
    Absent,
    Text { mime_type: String, text: String },
    Bytes { mime_type: String, bytes: Bytes },
    Form(Vec<Param>),
    Multipart(Vec<Part>),
}

impl SnapshotBody {
    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, SnapshotBody::Absent)
    }

    /// The resolved mime type, only text and byte bodies carry one.
    pub fn mime_type(&self) -> Option<&str> {
        match self {
            SnapshotBody::Text { mime_type, .. } | SnapshotBody::Bytes { mime_type, .. } => Some(mime_type),
            SnapshotBody::Absent | SnapshotBody::Form(_) | SnapshotBody::Multipart(_) => None,
        }
    }
}

/// Formatter-ready capture of one http message.
///
/// Cookie-carrying headers are never part of [`Snapshot::headers`], they only show up
/// decoded in [`Snapshot::cookies`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    line: MessageLine,
    headers: Vec<Header>,
    cookies: Vec<Cookie>,
    body: SnapshotBody,
}

impl Snapshot {
    pub fn new(line: MessageLine, headers: Vec<Header>, cookies: Vec<Cookie>, body: SnapshotBody) -> Self {
        Self { line, headers, cookies, body }
    }

    pub fn line(&self) -> &MessageLine {
        &self.line
    }

    pub fn is_request(&self) -> bool {
        matches!(self.line, MessageLine::Request { .. })
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    pub fn body(&self) -> &SnapshotBody {
        &self.body
    }

    pub fn into_body(self) -> SnapshotBody {
        self.body
    }
}

fn serialize_method<S: Serializer>(method: &Method, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(method.as_str())
}

fn serialize_status<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.as_u16())
}
