//! `record-route`: send a sequence of points and print the trip summary.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use routeguide_lib::Point;

use super::Output;
use crate::client::RouteGuideClient;
use crate::output::describe_summary;

/// Read a JSON array of points, e.g. `[{"latitude": 1, "longitude": 2}]`.
pub fn load_points(path: &Path) -> Result<Vec<Point>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read points from {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("failed to parse points in {}", path.display()))
}

pub async fn run(
    client: &RouteGuideClient,
    points_file: Option<&Path>,
    mut points: Vec<Point>,
    output: Output,
) -> Result<()> {
    if let Some(path) = points_file {
        let mut from_file = load_points(path)?;
        from_file.append(&mut points);
        points = from_file;
    }

    if points.is_empty() {
        bail!("no points given; pass --point or --points-file");
    }

    let summary = client.record_route(&points).await?;
    output.emit(&summary, |p| describe_summary(&summary, p))
}
