//! `check-dataset`: load a dataset file offline and report what it holds.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use routeguide_lib::{FeatureStore, Rectangle};

use super::Output;
use crate::terminal::format_with_separators;

#[derive(Debug, Serialize)]
struct DatasetReport<'a> {
    path: &'a Path,
    features: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    within: Option<usize>,
}

/// Validate the file at `path`; with a rectangle, also count the features in it.
pub fn run(path: &Path, rectangle: Option<Rectangle>, output: Output) -> Result<()> {
    let store = FeatureStore::load(path)
        .with_context(|| format!("failed to load dataset from {}", path.display()))?;

    let report = DatasetReport {
        path,
        features: store.len(),
        within: rectangle.map(|r| store.within(&r).count()),
    };

    output.emit(&report, |p| {
        let mut text = format!(
            "Dataset {} holds {}{}{} named features",
            path.display(),
            p.green,
            format_with_separators(report.features as u64),
            p.reset
        );
        if let Some(within) = report.within {
            text.push_str(&format!(
                "\n{}{}{} inside the rectangle",
                p.green,
                format_with_separators(within as u64),
                p.reset
            ));
        }
        text
    })
}
