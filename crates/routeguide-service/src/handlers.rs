//! Request handlers for the four route guide operations.
//!
//! Handlers stay thin: they decode the request, call into `routeguide-lib`,
//! record business metrics, and encode the reply. Streaming input arrives as
//! NDJSON and is decoded chunk by chunk with [`LineDecoder`], so a route of any
//! length is folded without buffering the whole body.

use std::collections::VecDeque;

use axum::{
    BoxError, Json,
    body::{Body, BodyDataStream},
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use futures::{StreamExt, stream};
use tracing::{debug, info, warn};

use routeguide_lib::{
    DistanceAccumulator, Feature, LineDecoder, Point, RangeCursor, Rectangle, RouteNote,
    RouteSummary,
};
use routeguide_service_shared::{
    AppState, NdjsonBody, ProblemDetails, RequestId, ServiceResponse, from_lib_error,
    record_feature_lookup, record_features_listed, record_notes_exchanged, record_route_recorded,
};

/// Handle `POST /api/v1/feature`.
///
/// A miss is not an error: the reply carries an empty name and the requested
/// location.
pub async fn get_feature(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<Point>, JsonRejection>,
) -> Result<ServiceResponse<Feature>, ProblemDetails> {
    let Json(point) = payload.map_err(|rejection| invalid_json(rejection, &request_id))?;

    let feature = state.store().lookup_exact(point);
    record_feature_lookup(feature.is_named());

    debug!(
        request_id = %request_id,
        location = %point,
        found = feature.is_named(),
        "feature lookup"
    );

    Ok(ServiceResponse::new(feature))
}

/// Handle `POST /api/v1/features`.
///
/// Matches are produced one per body poll from a [`RangeCursor`], in dataset
/// order.
pub async fn list_features(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<Rectangle>, JsonRejection>,
) -> Result<impl IntoResponse, ProblemDetails> {
    let Json(rectangle) = payload.map_err(|rejection| invalid_json(rejection, &request_id))?;

    let listing = Listing {
        cursor: RangeCursor::new(&rectangle),
        state,
        emitted: 0,
        request_id,
    };

    let features = stream::unfold(listing, |mut listing| async move {
        match listing.cursor.next_match(listing.state.store()).cloned() {
            Some(feature) => {
                listing.emitted += 1;
                Some((Ok::<_, BoxError>(feature), listing))
            }
            None => {
                record_features_listed(listing.emitted);
                info!(
                    request_id = %listing.request_id,
                    count = listing.emitted,
                    "feature listing complete"
                );
                None
            }
        }
    });

    Ok(NdjsonBody::new(features))
}

/// Handle `POST /api/v1/route`.
///
/// The elapsed time in the summary starts when the call is accepted, before
/// the first point is read.
pub async fn record_route(
    State(state): State<AppState>,
    request_id: RequestId,
    body: Body,
) -> Result<ServiceResponse<RouteSummary>, ProblemDetails> {
    let mut recorder = DistanceAccumulator::new(state.store());
    let mut decoder = LineDecoder::<Point>::new();
    let mut chunks = body.into_data_stream();

    while let Some(chunk) = chunks.next().await {
        let chunk = chunk.map_err(|err| unreadable_body(err, &request_id))?;
        let points = decoder
            .push(&chunk)
            .map_err(|err| ProblemDetails::malformed_stream(&err, request_id.as_str()))?;
        for point in points {
            recorder
                .record(point)
                .map_err(|err| from_lib_error(&err, request_id.as_str()))?;
        }
    }

    let trailing = decoder
        .finish()
        .map_err(|err| ProblemDetails::malformed_stream(&err, request_id.as_str()))?;
    if let Some(point) = trailing {
        recorder
            .record(point)
            .map_err(|err| from_lib_error(&err, request_id.as_str()))?;
    }

    let summary = recorder
        .finish()
        .map_err(|err| from_lib_error(&err, request_id.as_str()))?;
    record_route_recorded(summary.point_count, summary.distance_meters);

    info!(
        request_id = %request_id,
        points = summary.point_count,
        features = summary.feature_count,
        distance_m = summary.distance_meters,
        elapsed_s = summary.elapsed_seconds,
        "route recorded"
    );

    Ok(ServiceResponse::new(summary))
}

/// Handle `POST /api/v1/route/chat`.
///
/// Replies are streamed while the request body is still being read. Every
/// incoming note is answered with the notes posted earlier at its location.
pub async fn route_chat(
    State(state): State<AppState>,
    request_id: RequestId,
    body: Body,
) -> impl IntoResponse {
    let session = ChatSession {
        state,
        chunks: body.into_data_stream(),
        decoder: Some(LineDecoder::new()),
        pending: VecDeque::new(),
        received: 0,
        returned: 0,
        request_id,
    };

    let replies = stream::unfold(session, |mut session| async move {
        let reply = session.next_reply().await?;
        Some((reply, session))
    });

    NdjsonBody::new(replies)
}

struct Listing {
    cursor: RangeCursor,
    state: AppState,
    emitted: usize,
    request_id: RequestId,
}

struct ChatSession {
    state: AppState,
    chunks: BodyDataStream,
    /// `None` once the request stream has ended or failed.
    decoder: Option<LineDecoder<RouteNote>>,
    pending: VecDeque<RouteNote>,
    received: usize,
    returned: usize,
    request_id: RequestId,
}

impl ChatSession {
    async fn next_reply(&mut self) -> Option<Result<RouteNote, BoxError>> {
        loop {
            if let Some(note) = self.pending.pop_front() {
                return Some(Ok(note));
            }
            if self.decoder.is_none() {
                return None;
            }

            match self.chunks.next().await {
                Some(Ok(chunk)) => {
                    let decoded = self.decoder.as_mut()?.push(&chunk);
                    match decoded {
                        Ok(notes) => self.accept(notes),
                        Err(err) => return Some(Err(self.abort(err.into()))),
                    }
                }
                Some(Err(err)) => return Some(Err(self.abort(err.into()))),
                None => {
                    let decoder = self.decoder.take()?;
                    match decoder.finish() {
                        Ok(last) => self.accept(last),
                        Err(err) => return Some(Err(self.abort(err.into()))),
                    }
                    record_notes_exchanged(self.received, self.returned);
                    info!(
                        request_id = %self.request_id,
                        received = self.received,
                        returned = self.returned,
                        "route chat complete"
                    );
                }
            }
        }
    }

    fn accept(&mut self, notes: impl IntoIterator<Item = RouteNote>) {
        for note in notes {
            self.received += 1;
            let earlier = self.state.notes().exchange(note);
            self.returned += earlier.len();
            self.pending.extend(earlier);
        }
    }

    fn abort(&mut self, err: BoxError) -> BoxError {
        self.decoder = None;
        record_notes_exchanged(self.received, self.returned);
        warn!(
            request_id = %self.request_id,
            error = %err,
            received = self.received,
            "route chat aborted"
        );
        err
    }
}

fn invalid_json(rejection: JsonRejection, request_id: &RequestId) -> ProblemDetails {
    ProblemDetails::bad_request(rejection.body_text(), request_id.as_str())
}

fn unreadable_body(err: axum::Error, request_id: &RequestId) -> ProblemDetails {
    warn!(request_id = %request_id, error = %err, "failed to read request body");
    ProblemDetails::bad_request(format!("failed to read request body: {err}"), request_id.as_str())
}
