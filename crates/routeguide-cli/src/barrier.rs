//! Concurrent point lookups joined at a single barrier.
//!
//! [`lookup_all`] issues one lookup per point at once and resolves only when
//! every lookup has returned. Each outcome is captured on its own, so one
//! failure never hides the others.

use std::future::Future;

use anyhow::Result;
use futures::future::join_all;
use tracing::debug;

use routeguide_lib::{Feature, Point};

/// Anything that can resolve a point to a feature.
pub trait FeatureLookup {
    fn lookup(&self, point: Point) -> impl Future<Output = Result<Feature>> + Send;
}

/// The result of one lookup, tagged with the point that was asked for.
#[derive(Debug)]
pub struct LookupOutcome {
    pub point: Point,
    pub result: Result<Feature>,
}

/// All outcomes of one [`lookup_all`] call, in input order.
#[derive(Debug)]
pub struct BarrierReport {
    outcomes: Vec<LookupOutcome>,
}

impl BarrierReport {
    pub fn outcomes(&self) -> &[LookupOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }

    /// The features in input order, or the first error in input order.
    pub fn into_result(self) -> Result<Vec<Feature>> {
        self.outcomes.into_iter().map(|o| o.result).collect()
    }
}

impl IntoIterator for BarrierReport {
    type Item = LookupOutcome;
    type IntoIter = std::vec::IntoIter<LookupOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}

/// Look up every point concurrently and wait for all of them.
///
/// Lookups share no cancellation: a failing lookup does not stop the rest.
pub async fn lookup_all<L>(lookup: &L, points: &[Point]) -> BarrierReport
where
    L: FeatureLookup + Sync,
{
    let pending = points.iter().map(|&point| async move {
        let result = lookup.lookup(point).await;
        LookupOutcome { point, result }
    });

    let outcomes = join_all(pending).await;
    let report = BarrierReport { outcomes };

    debug!(
        lookups = report.len(),
        failures = report.failures(),
        "lookup barrier released"
    );

    report
}
