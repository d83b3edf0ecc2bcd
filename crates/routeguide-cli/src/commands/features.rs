//! `list-features`: stream the features inside a rectangle.

use anyhow::Result;
use tracing::info;

use routeguide_lib::{Point, Rectangle};

use super::Output;
use crate::client::RouteGuideClient;
use crate::output::describe_listed;

/// Corners of the classic sample rectangle over New Jersey and New York.
pub const DEFAULT_LO: Point = Point::new(400000000, -750000000);
pub const DEFAULT_HI: Point = Point::new(420000000, -730000000);

pub async fn run(client: &RouteGuideClient, rectangle: Rectangle, output: Output) -> Result<()> {
    let mut write_error = None;
    let count = client
        .list_features(&rectangle, |feature| {
            if write_error.is_none() {
                if let Err(err) = output.emit(&feature, |p| describe_listed(&feature, p)) {
                    write_error = Some(err);
                }
            }
        })
        .await?;

    if let Some(err) = write_error {
        return Err(err);
    }

    info!(count, "listed features");
    Ok(())
}
