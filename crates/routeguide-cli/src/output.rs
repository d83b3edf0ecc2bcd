//! Output formatting for command results.
//!
//! Text renderers return strings so they can be tested without capturing
//! stdout; the JSON renderer writes to any [`Write`] sink.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use routeguide_lib::{Feature, Point, RouteNote, RouteSummary};

use crate::terminal::{format_with_separators, ColorPalette};

/// How command results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON document per result.
    Json,
}

/// Describe a lookup result the way the classic route guide client does.
///
/// ```
/// # use routeguide_cli::output::describe_feature;
/// # use routeguide_cli::terminal::ColorPalette;
/// # use routeguide_lib::{Feature, Point};
/// let miss = Feature::unnamed(Point::new(0, 0));
/// assert_eq!(describe_feature(&miss, &ColorPalette::plain()), "Found no feature at 0, 0");
/// ```
pub fn describe_feature(feature: &Feature, palette: &ColorPalette) -> String {
    if feature.is_named() {
        format!(
            "Found feature called \"{}{}{}\" at {}",
            palette.white_bold,
            feature.name,
            palette.reset,
            location(&feature.location, palette)
        )
    } else {
        format!(
            "Found no feature at {}",
            location(&feature.location, palette)
        )
    }
}

/// A feature listed from a range query.
pub fn describe_listed(feature: &Feature, palette: &ColorPalette) -> String {
    format!(
        "{}{}{} at {}",
        palette.white_bold,
        feature.name,
        palette.reset,
        location(&feature.location, palette)
    )
}

/// A route chat reply.
pub fn describe_note(note: &RouteNote, palette: &ColorPalette) -> String {
    format!(
        "Got message \"{}{}{}\" at {}",
        palette.cyan,
        note.message,
        palette.reset,
        location(&note.location, palette)
    )
}

/// A failed lookup in a barrier report.
pub fn describe_failure(point: &Point, error: &anyhow::Error, palette: &ColorPalette) -> String {
    format!(
        "{}Lookup failed{} at {}: {:#}",
        palette.red,
        palette.reset,
        location(point, palette),
        error
    )
}

/// A multi-line route summary.
pub fn describe_summary(summary: &RouteSummary, palette: &ColorPalette) -> String {
    format!(
        "Finished trip with {g}{points}{r} points\n\
         Passed {g}{features}{r} features\n\
         Travelled {g}{distance}{r} meters\n\
         It took {g}{elapsed}{r} seconds",
        g = palette.green,
        r = palette.reset,
        points = format_with_separators(summary.point_count),
        features = format_with_separators(summary.feature_count),
        distance = format_with_separators(summary.distance_meters),
        elapsed = format_with_separators(summary.elapsed_seconds),
    )
}

fn location(point: &Point, palette: &ColorPalette) -> String {
    format!("{}{}{}", palette.gray, point, palette.reset)
}

/// Write `value` as a single JSON line.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn write_json<T: Serialize>(mut out: impl Write, value: &T) -> io::Result<()> {
    serde_json::to_writer(&mut out, value).map_err(io::Error::other)?;
    out.write_all(b"\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: ColorPalette = ColorPalette::plain();

    #[test]
    fn test_describe_named_feature() {
        let feature = Feature::new(
            "Patriots Path, Mendham, NJ 07945, USA",
            Point::new(407838351, -746143763),
        );
        assert_eq!(
            describe_feature(&feature, &PLAIN),
            "Found feature called \"Patriots Path, Mendham, NJ 07945, USA\" at 40.7838351, -74.6143763"
        );
    }

    #[test]
    fn test_describe_miss() {
        let feature = Feature::unnamed(Point::new(0, 0));
        assert_eq!(
            describe_feature(&feature, &PLAIN),
            "Found no feature at 0, 0"
        );
    }

    #[test]
    fn test_describe_summary() {
        let summary = RouteSummary {
            point_count: 3,
            feature_count: 2,
            distance_meters: 57_890,
            elapsed_seconds: 0,
        };
        let text = describe_summary(&summary, &PLAIN);
        assert!(text.contains("Finished trip with 3 points"));
        assert!(text.contains("Passed 2 features"));
        assert!(text.contains("Travelled 57,890 meters"));
        assert!(text.contains("It took 0 seconds"));
    }

    #[test]
    fn test_describe_note() {
        let note = RouteNote::new(Point::new(0, 10_000_000), "First message");
        assert_eq!(
            describe_note(&note, &PLAIN),
            "Got message \"First message\" at 0, 1"
        );
    }

    #[test]
    fn test_colored_output_wraps_name() {
        let feature = Feature::new("Here", Point::new(0, 0));
        let text = describe_feature(&feature, &ColorPalette::colored());
        assert!(text.contains("\x1b[1;97mHere\x1b[0m"));
    }

    #[test]
    fn test_write_json_single_line() {
        let mut out = Vec::new();
        write_json(&mut out, &Point::new(1, 2)).unwrap();
        assert_eq!(out, b"{\"latitude\":1,\"longitude\":2}\n");
    }
}
