//! Markdown-flavoured rendering of a [`Snapshot`].
//!
//! A report is a list of sections separated by a blank line, empty sections are left out:
//!
//! ```text
//! **>>> REQUEST**
//! POST to http://localhost/app
//!
//! **Headers**
//! Content-Type: application/json
//!
//! **Cookies**
//! session: abc
//!
//! **Body**
//! ```

use micro_capture::protocol::{MessageLine, Part, PartContent, Snapshot, SnapshotBody};

use crate::converter::Converters;

const REQUEST_TAG: &str = "**>>> REQUEST**";
const RESPONSE_TAG: &str = "**<<< RESPONSE**";
const HEADERS_TAG: &str = "**Headers**";
const COOKIES_TAG: &str = "**Cookies**";
const BODY_TAG: &str = "**Body**";

const SECTION_SEPARATOR: &str = "\n\n";

pub fn render(snapshot: &Snapshot, converters: &Converters) -> String {
    let mut sections = Vec::with_capacity(4);

    sections.push(match snapshot.line() {
        MessageLine::Request { method, uri } => format!("{REQUEST_TAG}\n{method} to {}", converters.uri(uri)),
        MessageLine::Response { status_line, .. } => format!("{RESPONSE_TAG}\n{status_line}"),
    });

    if !snapshot.headers().is_empty() {
        let headers: Vec<String> = snapshot.headers().iter().map(|header| converters.header(header)).collect();
        sections.push(format!("{HEADERS_TAG}\n{}", headers.join("\n")));
    }

    if !snapshot.cookies().is_empty() {
        let cookies: Vec<String> = snapshot.cookies().iter().map(|cookie| converters.cookie(cookie)).collect();
        sections.push(format!("{COOKIES_TAG}\n{}", cookies.join("\n")));
    }

    if let Some(body) = render_body(snapshot.body(), converters) {
        sections.push(format!("{BODY_TAG}\n{body}"));
    }

    sections.join(SECTION_SEPARATOR)
}

fn render_body(body: &SnapshotBody, converters: &Converters) -> Option<String> {
    match body {
        SnapshotBody::Absent => None,
        SnapshotBody::Text { mime_type, text } => Some(fenced(&converters.prettify(mime_type, text))),
        SnapshotBody::Bytes { bytes, .. } if bytes.is_empty() => None,
        SnapshotBody::Bytes { mime_type, bytes } => Some(byte_summary(mime_type, bytes.len())),
        SnapshotBody::Form(params) if params.is_empty() => None,
        SnapshotBody::Form(params) => {
            let params: Vec<String> = params.iter().map(|param| converters.param(param)).collect();
            Some(params.join("\n"))
        }
        SnapshotBody::Multipart(parts) if parts.is_empty() => None,
        SnapshotBody::Multipart(parts) => {
            let parts: Vec<String> = parts.iter().map(|part| render_part(part, converters)).collect();
            Some(parts.join(SECTION_SEPARATOR))
        }
    }
}

fn render_part(part: &Part, converters: &Converters) -> String {
    let mut lines: Vec<String> = part.headers().iter().map(|header| converters.part_header(header)).collect();
    lines.push(match part.content() {
        PartContent::Text(text) => fenced(&converters.prettify(part.mime_type(), text)),
        PartContent::Binary(bytes) => byte_summary(part.mime_type(), bytes.len()),
    });
    lines.join("\n")
}

fn fenced(text: &str) -> String {
    format!("```\n{text}\n```")
}

fn byte_summary(mime_type: &str, len: usize) -> String {
    format!("<{mime_type}, {len} bytes>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{Request, Response};
    use micro_capture::codec::BodyTypeMap;
    use micro_capture::entity::Body;
    use micro_capture::snapshot;

    const URL: &str = "http://docker.local:8080/app";
    const EMPTY_REQUEST: &str = "**>>> REQUEST**\nPOST to http://docker.local:8080/app";
    const EMPTY_RESPONSE: &str = "**<<< RESPONSE**\nHTTP/1.1 201 Created";

    fn request(builder: http::request::Builder, body: Body) -> String {
        let mut request = builder.method("POST").uri(URL).body(body).unwrap();
        render(&snapshot::request(&mut request, &BodyTypeMap::default()), &Converters::default())
    }

    fn response(builder: http::response::Builder, body: Body) -> String {
        let mut response = builder.status(201).body(body).unwrap();
        render(&snapshot::response(&mut response, &BodyTypeMap::default()), &Converters::default())
    }

    #[test]
    fn empty_messages() {
        assert_eq!(request(Request::builder(), Body::empty()), EMPTY_REQUEST);
        assert_eq!(response(Response::builder(), Body::empty()), EMPTY_RESPONSE);
    }

    #[test]
    fn json_body_is_prettified() {
        let json = "{\"object\": {\"key\": \"value\"}}";
        let pretty = "{\n  \"object\": {\n    \"key\": \"value\"\n  }\n}";

        let rendered = request(Request::builder(), Body::from_bytes(json, Some("application/json; charset=UTF-8")));
        assert_eq!(rendered, format!("{EMPTY_REQUEST}\n\n**Body**\n```\n{pretty}\n```"));

        let rendered = response(Response::builder(), Body::from_bytes(json, Some("application/json")));
        assert_eq!(rendered, format!("{EMPTY_RESPONSE}\n\n**Body**\n```\n{pretty}\n```"));
    }

    #[test]
    fn headers_and_cookies() {
        let expires = "Tue, 06 Sep 2022 09:32:51 UTC";
        let rendered = request(
            Request::builder().header("Content-Type", "application/json").header("Cookie", "test=value; tz=Europe%2FMinsk"),
            Body::empty(),
        );
        assert_eq!(
            rendered,
            format!("{EMPTY_REQUEST}\n\n**Headers**\ncontent-type: application/json\n\n**Cookies**\ntest: value\ntz: Europe/Minsk")
        );

        let rendered = response(
            Response::builder()
                .header("Content-Type", "application/json")
                .header("Set-cookie", format!("test=value; comment=test comment; expires={expires}; path=/; version=1"))
                .header("Set-cookie", format!("tz=Europe%2FMinsk; path=/; expires={expires}; secure; HttpOnly; SameSite=Lax")),
            Body::empty(),
        );
        assert_eq!(
            rendered,
            format!(
                "{EMPTY_RESPONSE}\n\n**Headers**\ncontent-type: application/json\n\n**Cookies**\n\
                 test: value; Comment=test comment; Path=/; Expires={expires}; Version=1\n\
                 tz: Europe/Minsk; Path=/; Secure=true; HttpOnly=true; Expires={expires}; SameSite=Lax"
            )
        );
    }

    #[test]
    fn binary_body_summary() {
        let image: &'static [u8] = &[0xFF, 0xD8, 0xFF, 0xE0];
        let rendered = response(Response::builder(), Body::from_bytes(image, Some("image/jpeg")));
        assert_eq!(rendered, format!("{EMPTY_RESPONSE}\n\n**Body**\n<image/jpeg, 4 bytes>"));

        let rendered = request(Request::builder(), Body::from_bytes(Vec::new(), Some("image/jpeg")));
        assert_eq!(rendered, EMPTY_REQUEST);
    }

    #[test]
    fn form_body() {
        let rendered = request(
            Request::builder().header("Content-Type", "application/x-www-form-urlencoded"),
            Body::from("user=admin&tz=Europe%2FMinsk"),
        );
        assert_eq!(
            rendered,
            format!(
                "{EMPTY_REQUEST}\n\n**Headers**\ncontent-type: application/x-www-form-urlencoded\n\n\
                 **Body**\nuser: admin\ntz: Europe/Minsk"
            )
        );
    }

    #[test]
    fn multipart_body() {
        let body = "--XYZ\r\nContent-Type: text/plain\r\n\r\ntest_message\r\n--XYZ\r\nContent-Type: image/jpeg\r\n\r\n\x01\x02\x03\r\n--XYZ--\r\n";
        let rendered = request(Request::builder(), Body::from_bytes(body, Some("multipart/form-data; boundary=XYZ")));
        assert_eq!(
            rendered,
            format!(
                "{EMPTY_REQUEST}\n\n**Body**\nContent-Type: text/plain\n```\ntest_message\n```\n\n\
                 Content-Type: image/jpeg\n<image/jpeg, 3 bytes>"
            )
        );
    }

    #[test]
    fn empty_multipart_is_omitted() {
        let rendered = request(Request::builder(), Body::from_bytes("--XYZ--\r\n", Some("multipart/form-data; boundary=XYZ")));
        assert_eq!(rendered, EMPTY_REQUEST);
    }
}
