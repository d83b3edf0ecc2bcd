//! Application state for the HTTP service.
//!
//! This module provides the shared state structure that axum handlers use to
//! access the loaded feature dataset and the route chat note log.

use std::path::Path;
use std::sync::Arc;

use routeguide_lib::{Error as LibError, FeatureStore, NoteLog};

use crate::logging::DEFAULT_SERVICE_NAME;

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// The dataset file exists but could not be read or parsed.
    DatasetLoad(LibError),

    /// Dataset file not found.
    DatasetNotFound(String),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatasetLoad(e) => write!(f, "failed to load feature dataset: {}", e),
            Self::DatasetNotFound(path) => write!(f, "dataset not found: {}", path),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DatasetLoad(e) => Some(e),
            Self::DatasetNotFound(_) => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        match err {
            LibError::DatasetNotFound { path } => {
                Self::DatasetNotFound(path.display().to_string())
            }
            other => Self::DatasetLoad(other),
        }
    }
}

/// Shared application state for all axum handlers.
///
/// This struct is cheaply cloneable (using `Arc` internally) and should be
/// shared via axum's `State` extractor. The feature store is read-only; the
/// note log synchronizes itself.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::post, extract::State};
/// use routeguide_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let store = state.store();
///     // ... use store
/// }
///
/// let state = AppState::load("path/to/route_guide_db.json").unwrap();
/// let app = Router::new()
///     .route("/api/v1/feature", post(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    service: Arc<str>,
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: FeatureStore,
    notes: NoteLog,
}

impl AppState {
    /// Load application state from a JSON dataset file.
    ///
    /// Serving must not begin if this fails.
    pub fn load(data_path: impl AsRef<Path>) -> Result<Self, AppStateError> {
        let data_path = data_path.as_ref();

        if !data_path.exists() {
            return Err(AppStateError::DatasetNotFound(
                data_path.display().to_string(),
            ));
        }

        tracing::info!(path = %data_path.display(), "loading feature dataset");
        let store = FeatureStore::load(data_path)?;
        tracing::info!(
            feature_count = store.len(),
            "feature dataset loaded successfully"
        );

        Ok(Self::from_store(store))
    }

    /// Create application state from an already-loaded store.
    ///
    /// This is useful for testing or when the dataset is embedded.
    pub fn from_store(store: FeatureStore) -> Self {
        Self {
            service: Arc::from(DEFAULT_SERVICE_NAME),
            inner: Arc::new(AppStateInner {
                store,
                notes: NoteLog::new(),
            }),
        }
    }

    /// Name the service reports in health responses.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Arc::from(service.into());
        self
    }

    pub fn service_name(&self) -> &str {
        &self.service
    }

    /// Access the loaded feature dataset.
    pub fn store(&self) -> &FeatureStore {
        &self.inner.store
    }

    /// Access the route chat note log.
    pub fn notes(&self) -> &NoteLog {
        &self.inner.notes
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service", &self.service)
            .field("feature_count", &self.inner.store.len())
            .field("note_count", &self.inner.notes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routeguide_lib::{Feature, Point, RouteNote};

    fn minimal_store() -> FeatureStore {
        FeatureStore::from_features(vec![Feature::new(
            "Patriots Path",
            Point::new(408122808, -743999179),
        )])
    }

    #[test]
    fn test_app_state_from_store() {
        let state = AppState::from_store(minimal_store());

        assert_eq!(state.store().len(), 1);
        assert!(state.notes().is_empty());
    }

    #[test]
    fn test_app_state_clone_shares_notes() {
        let state1 = AppState::from_store(minimal_store());
        let state2 = state1.clone();

        state1
            .notes()
            .exchange(RouteNote::new(Point::new(1, 1), "hello"));

        assert_eq!(state2.notes().len(), 1);
        assert_eq!(state1.store().len(), state2.store().len());
    }

    #[test]
    fn test_app_state_service_name() {
        let state = AppState::from_store(minimal_store());
        assert_eq!(state.service_name(), "routeguide");

        let state = state.with_service("routeguide-east");
        assert_eq!(state.service_name(), "routeguide-east");
        assert_eq!(state.store().len(), 1);
    }

    #[test]
    fn test_app_state_debug() {
        let state = AppState::from_store(minimal_store());
        let debug = format!("{:?}", state);

        assert!(debug.contains("AppState"));
        assert!(debug.contains("feature_count"));
        assert!(debug.contains("note_count"));
    }

    #[test]
    fn test_app_state_error_display() {
        let err = AppStateError::DatasetNotFound("/path/to/db.json".to_string());
        assert!(err.to_string().contains("/path/to/db.json"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_app_state_load_nonexistent() {
        let result = AppState::load("/nonexistent/path/to/route_guide_db.json");

        match result.unwrap_err() {
            AppStateError::DatasetNotFound(path) => {
                assert!(path.contains("nonexistent"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
