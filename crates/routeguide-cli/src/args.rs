//! Value parsers for command-line coordinates and notes.
//!
//! Coordinates are given in the wire form: degrees scaled by `1e7`, as
//! `LAT,LON` (for example `408122808,-743999179`).

use routeguide_lib::{Point, RouteNote};

/// Parse `LAT,LON` into a [`Point`].
pub fn parse_point(value: &str) -> Result<Point, String> {
    let (lat, lon) = value
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON but got '{value}'"))?;

    let latitude = lat
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid latitude '{}': {e}", lat.trim()))?;
    let longitude = lon
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid longitude '{}': {e}", lon.trim()))?;

    Ok(Point::new(latitude, longitude))
}

/// Parse `LAT,LON:MESSAGE` into a [`RouteNote`]. The message may be empty.
pub fn parse_note(value: &str) -> Result<RouteNote, String> {
    let (point, message) = value
        .split_once(':')
        .ok_or_else(|| format!("expected LAT,LON:MESSAGE but got '{value}'"))?;

    Ok(RouteNote::new(parse_point(point)?, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(
            parse_point("408122808,-743999179").unwrap(),
            Point::new(408122808, -743999179)
        );
        assert_eq!(parse_point(" 0 , 0 ").unwrap(), Point::new(0, 0));
    }

    #[test]
    fn test_parse_point_rejects_garbage() {
        assert!(parse_point("408122808").unwrap_err().contains("LAT,LON"));
        assert!(parse_point("north,0").unwrap_err().contains("latitude"));
        assert!(parse_point("0,99999999999").unwrap_err().contains("longitude"));
    }

    #[test]
    fn test_parse_note_keeps_colons_in_message() {
        let note = parse_note("0,1:meet at 10:30").unwrap();
        assert_eq!(note.location, Point::new(0, 1));
        assert_eq!(note.message, "meet at 10:30");
    }

    #[test]
    fn test_parse_note_requires_separator() {
        assert!(parse_note("0,1").is_err());
    }
}
