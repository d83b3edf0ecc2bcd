//! `route-chat`: post notes and print the earlier notes sent back.

use anyhow::Result;

use routeguide_lib::{Point, RouteNote};

use super::Output;
use crate::client::RouteGuideClient;
use crate::output::describe_note;

/// Notes sent when none are given; the fourth repeats the first location.
pub fn default_notes() -> Vec<RouteNote> {
    vec![
        RouteNote::new(Point::new(0, 0), "First message"),
        RouteNote::new(Point::new(0, 1), "Second message"),
        RouteNote::new(Point::new(1, 0), "Third message"),
        RouteNote::new(Point::new(0, 0), "Fourth message"),
    ]
}

pub async fn run(client: &RouteGuideClient, notes: Vec<RouteNote>, output: Output) -> Result<()> {
    let notes = if notes.is_empty() {
        default_notes()
    } else {
        notes
    };

    let mut write_error = None;
    client
        .route_chat(&notes, |note| {
            if write_error.is_none() {
                if let Err(err) = output.emit(&note, |p| describe_note(&note, p)) {
                    write_error = Some(err);
                }
            }
        })
        .await?;

    match write_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
