//! Buffering for messages whose body is an [`http_body::Body`] stream.
//!
//! The frames are awaited once and the message comes back as a `Request<Body>` /
//! `Response<Body>` holding a [`BufferedBody`], ready for the snapshot assembler.

use std::fmt::Display;

use http::header::CONTENT_TYPE;
use http::{HeaderMap, Request, Response};
use http_body::Body as HttpBody;
use http_body_util::BodyExt;
use tracing::warn;

use super::{Body, BufferedBody};
use crate::protocol::latin1;

/// Collects every data frame of `body` into a [`Body`].
///
/// An already finished stream yields [`Body::empty`]. A failing stream is reported at
/// warn level and also yields an empty body.
pub async fn collect<B>(body: B, content_type: Option<String>) -> Body
where
    B: HttpBody,
    B::Error: Display,
{
    if body.is_end_stream() {
        return Body::empty();
    }

    match body.collect().await {
        Ok(collected) => Body::new(BufferedBody::new(collected.to_bytes(), content_type)),
        Err(e) => {
            warn!(cause = %e, "unable to read http entity");
            Body::empty()
        }
    }
}

pub async fn collect_request<B>(request: Request<B>) -> Request<Body>
where
    B: HttpBody,
    B::Error: Display,
{
    let (parts, body) = request.into_parts();
    let content_type = declared_content_type(&parts.headers);
    Request::from_parts(parts, collect(body, content_type).await)
}

pub async fn collect_response<B>(response: Response<B>) -> Response<Body>
where
    B: HttpBody,
    B::Error: Display,
{
    let (parts, body) = response.into_parts();
    let content_type = declared_content_type(&parts.headers);
    Response::from_parts(parts, collect(body, content_type).await)
}

fn declared_content_type(headers: &HeaderMap) -> Option<String> {
    headers.get(CONTENT_TYPE).map(|value| latin1(value.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http_body::Frame;
    use http_body_util::{Empty, Full, StreamBody};
    use std::io;
    use tracing_test::traced_test;

    #[tokio::test]
    async fn collect_full_body() {
        let request = Request::post("/upload")
            .header(CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from_static(b"{\"key\": \"value\"}")))
            .unwrap();

        let mut request = collect_request(request).await;

        let buffered = request.body_mut().buffer().unwrap();
        assert_eq!(buffered.bytes().as_ref(), b"{\"key\": \"value\"}");
        assert_eq!(buffered.content_type(), Some("application/json"));
        assert_eq!(request.uri().path(), "/upload");
    }

    #[tokio::test]
    async fn collect_empty_body() {
        let response = Response::builder().status(204).body(Empty::<Bytes>::new()).unwrap();

        let response = collect_response(response).await;

        assert!(response.body().is_empty());
    }

    #[tokio::test]
    async fn collect_chunked_stream() {
        let chunks: Vec<Result<_, io::Error>> = vec![
            Ok(Frame::data(Bytes::from_static(b"a=1"))),
            Ok(Frame::data(Bytes::from_static(b"&b=2"))),
            Ok(Frame::data(Bytes::from_static(b"&a=3"))),
        ];
        let body = collect(StreamBody::new(futures::stream::iter(chunks)), None).await;

        let buffered = body.entity().and_then(|entity| entity.buffered()).unwrap();
        assert_eq!(buffered.bytes().as_ref(), b"a=1&b=2&a=3");
    }

    #[traced_test]
    #[tokio::test]
    async fn collect_failing_stream() {
        let chunks: Vec<Result<Frame<Bytes>, io::Error>> = vec![
            Ok(Frame::data(Bytes::from_static(b"partial"))),
            Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stream closed early")),
        ];
        let body = collect(StreamBody::new(futures::stream::iter(chunks)), None).await;

        assert!(body.is_empty());
        assert!(logs_contain("unable to read http entity"));
    }
}
