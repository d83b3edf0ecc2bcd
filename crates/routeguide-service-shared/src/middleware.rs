//! Request correlation and HTTP accounting for the route guide service.
//!
//! [`MetricsLayer`] tags every request with a [`RequestId`] (taken from
//! `X-Request-ID` or freshly generated as a UUID v7), stores it in the request
//! extensions for handlers, and echoes it on the response.
//!
//! Route listing and route chat answer with NDJSON bodies that keep flowing
//! long after the response head is sent. The layer therefore wraps the body in
//! a [`TimedBody`] and records once the body ends or is dropped:
//! - `http_requests_total`: counter by method, path, status bucket
//! - `http_request_duration_seconds`: histogram by method, path
//! - `http_response_size_bytes`: histogram of bytes actually streamed

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Request, Response};
use bytes::Buf;
use http_body::{Body, Frame, SizeHint};
use pin_project_lite::pin_project;
use tower::{Layer, Service};
use tracing::{debug, info, info_span, warn, Span};
use uuid::Uuid;

/// Header carrying the correlation ID in both directions.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Correlation ID of one route guide call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh time-sortable UUID v7.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handlers take the ID stored by [`MetricsLayer`]; without the layer the
/// header is read directly.
impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestId>()
            .cloned()
            .unwrap_or_else(|| extract_or_generate_request_id(&parts.headers)))
    }
}

/// The caller's `X-Request-ID`, or a new UUID v7 when it is missing, empty,
/// or not valid UTF-8.
pub fn extract_or_generate_request_id(headers: &HeaderMap) -> RequestId {
    headers
        .get(&REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(RequestId::new)
        .unwrap_or_else(RequestId::generate)
}

/// Metric label for a request path: no query string, no trailing slash.
pub fn normalize_path(path: &str) -> String {
    let path = path.split('?').next().unwrap_or(path);
    match path.trim_end_matches('/') {
        "" => "/".to_string(),
        trimmed => trimmed.to_string(),
    }
}

fn status_bucket(status: u16) -> &'static str {
    match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        _ => "5xx",
    }
}

/// How a response body stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyEnd {
    Complete,
    Failed,
    Dropped,
}

/// Everything needed to account for one call once its body is done.
#[derive(Debug)]
struct CallRecord {
    start: Instant,
    method: String,
    path: String,
    status: &'static str,
    request_id: RequestId,
    span: Span,
}

impl CallRecord {
    fn finish(self, end: BodyEnd, streamed: u64) {
        let elapsed = self.start.elapsed();

        metrics::counter!(
            "http_requests_total",
            "method" => self.method.clone(),
            "path" => self.path.clone(),
            "status" => self.status,
        )
        .increment(1);
        metrics::histogram!(
            "http_request_duration_seconds",
            "method" => self.method.clone(),
            "path" => self.path.clone(),
        )
        .record(elapsed.as_secs_f64());
        metrics::histogram!(
            "http_response_size_bytes",
            "method" => self.method,
            "path" => self.path,
        )
        .record(streamed as f64);

        let _entered = self.span.enter();
        let elapsed_ms = elapsed.as_millis() as u64;
        match end {
            BodyEnd::Complete => info!(
                request_id = %self.request_id,
                status = self.status,
                elapsed_ms,
                streamed,
                "call finished"
            ),
            BodyEnd::Failed => warn!(
                request_id = %self.request_id,
                elapsed_ms,
                streamed,
                "response stream failed"
            ),
            BodyEnd::Dropped => debug!(
                request_id = %self.request_id,
                elapsed_ms,
                streamed,
                "client went away before the response ended"
            ),
        }
    }
}

pin_project! {
    /// Response body that accounts for its call when the last frame has been
    /// sent, the stream fails, or the body is dropped.
    pub struct TimedBody<B> {
        #[pin]
        inner: B,
        record: Option<CallRecord>,
        streamed: u64,
    }

    impl<B> PinnedDrop for TimedBody<B> {
        fn drop(this: Pin<&mut Self>) {
            let this = this.project();
            if let Some(record) = this.record.take() {
                record.finish(BodyEnd::Dropped, *this.streamed);
            }
        }
    }
}

impl<B: Body> Body for TimedBody<B> {
    type Data = B::Data;
    type Error = B::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.project();
        let polled = this.inner.poll_frame(cx);

        let end = match &polled {
            Poll::Pending => None,
            Poll::Ready(Some(Ok(frame))) => {
                if let Some(data) = frame.data_ref() {
                    *this.streamed += data.remaining() as u64;
                }
                None
            }
            Poll::Ready(Some(Err(_))) => Some(BodyEnd::Failed),
            Poll::Ready(None) => Some(BodyEnd::Complete),
        };

        if let Some(end) = end {
            if let Some(record) = this.record.take() {
                record.finish(end, *this.streamed);
            }
        }

        polled
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}

/// Tower layer adding request IDs and call accounting.
#[derive(Clone, Default)]
pub struct MetricsLayer;

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsMiddleware { inner }
    }
}

#[derive(Clone)]
pub struct MetricsMiddleware<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for MetricsMiddleware<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send,
    ResBody: Body,
{
    type Response = Response<TimedBody<ResBody>>;
    type Error = S::Error;
    type Future = MetricsFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<ReqBody>) -> Self::Future {
        let start = Instant::now();
        let request_id = extract_or_generate_request_id(request.headers());
        let method = request.method().to_string();
        let path = normalize_path(request.uri().path());

        request.extensions_mut().insert(request_id.clone());

        let span = info_span!(
            "call",
            request_id = %request_id,
            method = %method,
            path = %path,
        );

        let future = {
            let _entered = span.enter();
            self.inner.call(request)
        };

        MetricsFuture {
            inner: future,
            pending: Some(PendingCall {
                start,
                method,
                path,
                request_id,
                span,
            }),
        }
    }
}

/// Request data held until the response head is known.
struct PendingCall {
    start: Instant,
    method: String,
    path: String,
    request_id: RequestId,
    span: Span,
}

impl PendingCall {
    fn into_record(self, status: u16) -> CallRecord {
        CallRecord {
            start: self.start,
            method: self.method,
            path: self.path,
            status: status_bucket(status),
            request_id: self.request_id,
            span: self.span,
        }
    }
}

pin_project! {
    pub struct MetricsFuture<F> {
        #[pin]
        inner: F,
        pending: Option<PendingCall>,
    }
}

impl<F, B, E> Future for MetricsFuture<F>
where
    F: Future<Output = Result<Response<B>, E>>,
    B: Body,
{
    type Output = Result<Response<TimedBody<B>>, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let result = {
            let _entered = this.pending.as_ref().map(|pending| pending.span.enter());
            std::task::ready!(this.inner.poll(cx))
        };

        let Some(pending) = this.pending.take() else {
            return Poll::Ready(result.map(|response| {
                response.map(|inner| TimedBody {
                    inner,
                    record: None,
                    streamed: 0,
                })
            }));
        };

        match result {
            Ok(mut response) => {
                if let Ok(value) = HeaderValue::from_str(pending.request_id.as_str()) {
                    response.headers_mut().insert(REQUEST_ID_HEADER, value);
                }
                let record = pending.into_record(response.status().as_u16());
                Poll::Ready(Ok(response.map(|inner| TimedBody {
                    inner,
                    record: Some(record),
                    streamed: 0,
                })))
            }
            Err(error) => {
                pending.into_record(500).finish(BodyEnd::Failed, 0);
                Poll::Ready(Err(error))
            }
        }
    }
}
