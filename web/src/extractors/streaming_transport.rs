use crate::error::Error;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, Method, Version},
};

/// Proof that the response to this request has a body the server will
/// flush to the client frame by frame.
///
/// Any protocol version qualifies: HTTP/1.1 uses chunked encoding, HTTP/2
/// uses DATA frames, and HTTP/1.0 gets a body delimited by connection close.
/// A HEAD response has its body discarded by the server, so nothing written
/// to a sink could ever reach the client; those requests are rejected before
/// any connection state is created.
#[derive(Debug, Clone, Copy)]
pub struct StreamingTransport {
    pub version: Version,
}

impl StreamingTransport {
    pub fn supports(method: &Method) -> bool {
        method != Method::HEAD
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for StreamingTransport
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if Self::supports(&parts.method) {
            Ok(StreamingTransport {
                version: parts.version,
            })
        } else {
            Err(Error::UnsupportedTransport)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(method: Method, version: Version) -> Result<StreamingTransport, Error> {
        let (mut parts, _) = Request::builder()
            .method(method)
            .version(version)
            .uri("/events")
            .body(())
            .unwrap()
            .into_parts();
        StreamingTransport::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_every_http_version_is_accepted() {
        for version in [
            Version::HTTP_09,
            Version::HTTP_10,
            Version::HTTP_11,
            Version::HTTP_2,
        ] {
            assert_eq!(
                extract(Method::GET, version).await.unwrap().version,
                version
            );
        }
    }

    #[tokio::test]
    async fn test_head_request_is_rejected() {
        assert_eq!(
            extract(Method::HEAD, Version::HTTP_11).await.unwrap_err(),
            Error::UnsupportedTransport
        );
    }
}
