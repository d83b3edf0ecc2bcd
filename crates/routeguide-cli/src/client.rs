//! HTTP client for the route guide service.
//!
//! Single JSON replies are decoded in one piece. Streamed replies are read
//! chunk by chunk through [`LineDecoder`], so features and notes are handed to
//! the caller as soon as their line is complete.

use anyhow::{anyhow, Context, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use routeguide_lib::{
    encode_line, Feature, LineDecoder, Point, Rectangle, RouteNote, RouteSummary,
    NDJSON_CONTENT_TYPE,
};

use crate::barrier::FeatureLookup;

/// Default service address, matching the service's default port.
pub const DEFAULT_SERVER: &str = "http://127.0.0.1:50051";

/// The subset of an RFC 9457 problem document the client reports.
#[derive(Debug, Deserialize)]
struct Problem {
    title: String,
    #[serde(default)]
    detail: Option<String>,
}

/// Thin async client for the four route guide operations.
#[derive(Debug, Clone)]
pub struct RouteGuideClient {
    http: Client,
    base_url: String,
}

impl RouteGuideClient {
    /// Create a client for the service at `base_url` (e.g. `http://host:50051`).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("routeguide-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Look up the feature at an exact point. A miss yields the unnamed sentinel.
    pub async fn get_feature(&self, point: Point) -> Result<Feature> {
        let response = self
            .http
            .post(self.url("/api/v1/feature"))
            .json(&point)
            .send()
            .await
            .with_context(|| format!("failed to reach {}", self.base_url))?;

        read_json(response).await
    }

    /// Stream the features inside `rectangle`, calling `on_feature` for each
    /// one in the order the service sends them. Returns how many arrived.
    pub async fn list_features(
        &self,
        rectangle: &Rectangle,
        on_feature: impl FnMut(Feature),
    ) -> Result<usize> {
        let response = self
            .http
            .post(self.url("/api/v1/features"))
            .json(rectangle)
            .send()
            .await
            .with_context(|| format!("failed to reach {}", self.base_url))?;

        read_ndjson(response, on_feature).await
    }

    /// Send a route as an NDJSON stream of points and return its summary.
    pub async fn record_route(&self, points: &[Point]) -> Result<RouteSummary> {
        let body = ndjson_body(points)?;
        debug!(points = points.len(), bytes = body.len(), "sending route");

        let response = self
            .http
            .post(self.url("/api/v1/route"))
            .header(CONTENT_TYPE, NDJSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .with_context(|| format!("failed to reach {}", self.base_url))?;

        read_json(response).await
    }

    /// Post notes to route chat, calling `on_reply` for every earlier note the
    /// service sends back. Returns how many replies arrived.
    pub async fn route_chat(
        &self,
        notes: &[RouteNote],
        on_reply: impl FnMut(RouteNote),
    ) -> Result<usize> {
        let body = ndjson_body(notes)?;

        let response = self
            .http
            .post(self.url("/api/v1/route/chat"))
            .header(CONTENT_TYPE, NDJSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .with_context(|| format!("failed to reach {}", self.base_url))?;

        read_ndjson(response, on_reply).await
    }
}

impl FeatureLookup for RouteGuideClient {
    async fn lookup(&self, point: Point) -> Result<Feature> {
        self.get_feature(point).await
    }
}

fn ndjson_body<T: Serialize>(items: &[T]) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    for item in items {
        body.extend(encode_line(item).context("failed to encode request line")?);
    }
    Ok(body)
}

/// Turn a non-2xx response into an error carrying the problem details.
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<Problem>(&text) {
        Ok(problem) => match problem.detail {
            Some(detail) => format!("{}: {}", problem.title, detail),
            None => problem.title,
        },
        Err(_) if text.trim().is_empty() => status.to_string(),
        Err(_) => text,
    };

    Err(anyhow!("service returned {}: {}", status.as_u16(), message))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = ensure_success(response).await?;
    response
        .json::<T>()
        .await
        .context("failed to decode service response")
}

async fn read_ndjson<T: DeserializeOwned>(
    response: Response,
    mut on_item: impl FnMut(T),
) -> Result<usize> {
    let mut response = ensure_success(response).await?;
    let mut decoder = LineDecoder::<T>::new();
    let mut count = 0;

    while let Some(chunk) = response
        .chunk()
        .await
        .context("failed to read response stream")?
    {
        for item in decoder.push(&chunk).context("malformed response stream")? {
            count += 1;
            on_item(item);
        }
    }

    if let Some(item) = decoder.finish().context("malformed response stream")? {
        count += 1;
        on_item(item);
    }

    Ok(count)
}
