//! `get-feature`: look up several points at once and report each result.

use anyhow::{bail, Result};

use routeguide_lib::Point;

use super::Output;
use crate::barrier::{lookup_all, FeatureLookup};
use crate::output::{describe_failure, describe_feature};

/// Points queried when none are given: one known feature and one empty spot.
pub const DEFAULT_POINTS: [Point; 2] = [Point::new(408122808, -743999179), Point::new(0, 0)];

/// Run every lookup concurrently, print all outcomes, then fail if any failed.
pub async fn run<L>(lookup: &L, points: &[Point], output: Output) -> Result<()>
where
    L: FeatureLookup + Sync,
{
    let points = if points.is_empty() {
        &DEFAULT_POINTS[..]
    } else {
        points
    };

    let report = lookup_all(lookup, points).await;
    let failures = report.failures();

    for outcome in report.outcomes() {
        match &outcome.result {
            Ok(feature) => output.emit(feature, |p| describe_feature(feature, p))?,
            Err(err) => eprintln!("{}", describe_failure(&outcome.point, err, &output.palette)),
        }
    }

    if failures > 0 {
        bail!("{failures} of {} lookups failed", report.len());
    }
    Ok(())
}
