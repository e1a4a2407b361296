//! Assembly of [`Snapshot`]s from http messages.
//!
//! Both entry points take the message by mutable reference: the body is buffered in
//! place, so the caller can keep processing the very same message afterwards.
//!
//! Headers are listed the way `http::HeaderMap` iterates them: lowercase names, grouped by
//! name in the order each name first appeared. Values of a repeated header keep their
//! relative order, but `Via: a`, `X-Trace: 1`, `Via: b` is listed as `via: a`, `via: b`,
//! `x-trace: 1` since the map does not record the interleaving.

use http::header::{CONTENT_TYPE, COOKIE, HeaderName, SET_COOKIE};
use http::{HeaderMap, Request, Response};
use tracing::trace;

use crate::codec::{BodyKind, BodyTypeMap, classify, cookie, form, multipart, resolve};
use crate::entity::Body;
use crate::protocol::{Header, MessageLine, Snapshot, SnapshotBody, latin1};

/// Captures a request: `METHOD uri`, headers, `Cookie` values and the decoded body.
pub fn request(request: &mut Request<Body>, table: &BodyTypeMap) -> Snapshot {
    let line = MessageLine::Request { method: request.method().clone(), uri: request.uri().to_string() };

    let (headers, cookie_values) = partition_headers(request.headers(), &COOKIE);
    let cookies = cookie_values.iter().map(String::as_str).flat_map(cookie::parse_request_cookies).collect();

    let declared = declared_content_type(request.headers());
    let body = capture_body(request.body_mut(), declared.as_deref(), table);

    Snapshot::new(line, headers, cookies, body)
}

/// Captures a response: status line, headers, every `Set-Cookie` and the decoded body.
pub fn response(response: &mut Response<Body>, table: &BodyTypeMap) -> Snapshot {
    let status = response.status();
    let reason = status.canonical_reason().unwrap_or_default();
    let status_line = format!("{:?} {} {reason}", response.version(), status.as_str());
    let line = MessageLine::Response { status, status_line: status_line.trim_end().to_owned() };

    let (headers, cookie_values) = partition_headers(response.headers(), &SET_COOKIE);
    let cookies = cookie_values
        .iter()
        .filter_map(|value| {
            let cookie = cookie::parse_set_cookie(value);
            if cookie.is_none() {
                trace!(value = %value, "skipping malformed set-cookie header");
            }
            cookie
        })
        .collect();

    let declared = declared_content_type(response.headers());
    let body = capture_body(response.body_mut(), declared.as_deref(), table);

    Snapshot::new(line, headers, cookies, body)
}

// splits the cookie carrying header off the generic ones, in header map order
fn partition_headers(map: &HeaderMap, cookie_header: &HeaderName) -> (Vec<Header>, Vec<String>) {
    let mut headers = Vec::with_capacity(map.len());
    let mut cookies = Vec::new();
    for (name, value) in map {
        let value = latin1(value.as_bytes());
        if name == cookie_header {
            cookies.push(value);
        } else {
            headers.push(Header::new(name.as_str(), value));
        }
    }
    (headers, cookies)
}

fn declared_content_type(map: &HeaderMap) -> Option<String> {
    map.get(CONTENT_TYPE).map(|value| latin1(value.as_bytes()))
}

fn capture_body(body: &mut Body, declared: Option<&str>, table: &BodyTypeMap) -> SnapshotBody {
    if body.is_empty() {
        return SnapshotBody::Absent;
    }
    let Some(buffered) = body.buffer() else {
        return SnapshotBody::Absent;
    };

    let info = resolve(buffered.content_type().or(declared));
    match classify(info.mime_type(), table) {
        BodyKind::Text => SnapshotBody::Text {
            mime_type: info.mime_type().to_owned(),
            text: info.decode(buffered.bytes()).into_owned(),
        },
        BodyKind::Form => SnapshotBody::Form(form::decode(&buffered, &info)),
        BodyKind::Multipart => SnapshotBody::Multipart(multipart::decode(&buffered, &info, table)),
        BodyKind::Binary => {
            SnapshotBody::Bytes { mime_type: info.mime_type().to_owned(), bytes: buffered.bytes().clone() }
        }
    }
}
