//! Response wrappers for successful HTTP responses.

use axum::{
    body::Body,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    BoxError, Json,
};
use bytes::Bytes;
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};

use routeguide_lib::{encode_line, NDJSON_CONTENT_TYPE};

/// Wrapper for successful responses with content type metadata.
///
/// This provides symmetry with `ProblemDetails` by including content type
/// information in the response body.
///
/// # Example
///
/// ```
/// use routeguide_service_shared::ServiceResponse;
/// use routeguide_lib::{Feature, Point};
///
/// let feature = Feature::new("Patriots Path", Point::new(408122808, -743999179));
/// let response = ServiceResponse::new(feature);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    /// The actual response payload.
    #[serde(flatten)]
    pub data: T,

    /// Content type for this response.
    pub content_type: String,
}

impl<T> ServiceResponse<T> {
    /// Create a new successful response with the default content type.
    pub fn new(data: T) -> Self {
        Self {
            data,
            content_type: "application/json".to_string(),
        }
    }

    /// Create a response with a custom content type.
    pub fn with_content_type(data: T, content_type: impl Into<String>) -> Self {
        Self {
            data,
            content_type: content_type.into(),
        }
    }
}

impl<T> From<T> for ServiceResponse<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Streaming `application/x-ndjson` response.
///
/// Each item becomes one JSON line. Items are pulled from the stream only as
/// the connection accepts more data. An `Err` item aborts the body; by then the
/// status line has already been sent.
pub struct NdjsonBody<S> {
    stream: S,
}

impl<S, T> NdjsonBody<S>
where
    S: Stream<Item = Result<T, BoxError>> + Send + 'static,
    T: Serialize,
{
    pub fn new(stream: S) -> Self {
        Self { stream }
    }
}

impl<S, T> IntoResponse for NdjsonBody<S>
where
    S: Stream<Item = Result<T, BoxError>> + Send + 'static,
    T: Serialize,
{
    fn into_response(self) -> Response {
        let lines = self.stream.map(|item| {
            item.and_then(|value| {
                encode_line(&value)
                    .map(Bytes::from)
                    .map_err(BoxError::from)
            })
        });

        let mut response = Body::from_stream(lines).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(NDJSON_CONTENT_TYPE),
        );
        response
    }
}
