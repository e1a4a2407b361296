//! Decoding of buffered `multipart/*` bodies by boundary scanning.
//!
//! The body is already in memory, so instead of a streaming parser the decoder searches
//! for every occurrence of the `--<boundary>` delimiter and cuts the bytes between them:
//!
//! ```text
//! preamble--XYZ\r\n<headers>\r\n\r\n<content>\r\n--XYZ\r\n<headers>\r\n\r\n<content>\r\n--XYZ--\r\n
//!         |  part 1 (framing CRLFs stripped)       |  part 2                          | closing
//! ```
//!
//! The preamble before the first delimiter and the closing segment starting with `--` are
//! discarded. Each part is split at its first blank line into headers and content; the
//! content stays a zero-copy slice of the buffered bytes unless it is decoded as text.
//!
//! Malformed input never aborts the decode: a missing boundary yields no parts, and
//! header lines that are not `Name: Value` pairs are skipped.

use std::ops::Range;

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use tracing::{debug, trace};

use crate::codec::classifier::{BodyKind, BodyTypeMap, classify};
use crate::codec::content_type::{ContentInfo, resolve};
use crate::entity::BufferedBody;
use crate::protocol::{Header, Part, latin1};

const DASHES: &[u8] = b"--";
const CRLF: &[u8] = b"\r\n";
const BLANK_LINE: &[u8] = b"\r\n\r\n";

/// Decodes the parts of a buffered multipart body.
///
/// `info` must be the resolved `Content-Type` of the body, its `boundary` parameter
/// drives the split. Every part is classified with `table`: text parts are decoded with
/// their own charset, all other parts are kept as bytes.
pub fn decode(body: &BufferedBody, info: &ContentInfo, table: &BodyTypeMap) -> Vec<Part> {
    let Some(boundary) = info.boundary().filter(|boundary| !boundary.is_empty()) else {
        debug!(content_type = info.mime_type(), "multipart body without boundary, no parts decoded");
        return Vec::new();
    };

    let mut delimiter = Vec::with_capacity(DASHES.len() + boundary.len());
    delimiter.extend_from_slice(DASHES);
    delimiter.extend_from_slice(boundary.as_bytes());

    let bytes = body.bytes();
    let mut segments = split(bytes, &delimiter);
    if segments.last().is_some_and(|last| bytes[last.clone()].starts_with(DASHES)) {
        segments.pop();
    }

    segments
        .into_iter()
        // the preamble, possibly empty, always precedes the first delimiter
        .skip(1)
        .map(|segment| decode_part(&bytes.slice(segment), table))
        .collect()
}

/// Splits `input` around every non-overlapping occurrence of `pattern`.
///
/// N occurrences always yield N + 1 ranges, scanning resumes right after each match.
pub fn split(input: &[u8], pattern: &[u8]) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = 0;
    while let Some(found) = find(input, pattern, start) {
        ranges.push(start..found);
        start = found + pattern.len();
    }
    ranges.push(start..input.len());
    ranges
}

fn find(input: &[u8], pattern: &[u8], from: usize) -> Option<usize> {
    if pattern.is_empty() {
        return None;
    }
    input
        .get(from..)?
        .windows(pattern.len())
        .position(|window| window == pattern)
        .map(|index| from + index)
}

fn decode_part(segment: &Bytes, table: &BodyTypeMap) -> Part {
    let block = strip_framing(segment);
    let (header_block, content) = split_head(&block);
    let headers = parse_headers(&header_block);

    let content_type = headers.iter().find(|header| header.is(CONTENT_TYPE.as_str())).map(Header::value);
    let info = resolve(content_type);

    match classify(info.mime_type(), table) {
        BodyKind::Text => {
            let text = info.decode(&content).into_owned();
            Part::text(headers, info.mime_type(), info.charset(), text)
        }
        BodyKind::Form | BodyKind::Multipart | BodyKind::Binary => Part::binary(headers, info.mime_type(), content),
    }
}

// the CRLF after a delimiter and the CRLF before the next one belong to the framing
fn strip_framing(segment: &Bytes) -> Bytes {
    let start = if segment.starts_with(CRLF) { CRLF.len() } else { 0 };
    let end = if segment[start..].ends_with(CRLF) { segment.len() - CRLF.len() } else { segment.len() };
    segment.slice(start..end)
}

fn split_head(block: &Bytes) -> (Bytes, Bytes) {
    if block.starts_with(CRLF) {
        return (Bytes::new(), block.slice(CRLF.len()..));
    }
    match find(block, BLANK_LINE, 0) {
        Some(index) => (block.slice(..index), block.slice(index + BLANK_LINE.len()..)),
        None => {
            trace!(len = block.len(), "multipart part without blank line, treating it as headers only");
            (block.clone(), Bytes::new())
        }
    }
}

fn parse_headers(header_block: &[u8]) -> Vec<Header> {
    split(header_block, CRLF)
        .into_iter()
        .map(|line| &header_block[line])
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let header = Header::parse_line(&latin1(line));
            if header.is_none() {
                trace!(line = %latin1(line), "skipping malformed multipart header line");
            }
            header
        })
        .collect()
}
