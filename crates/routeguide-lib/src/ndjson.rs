//! Newline-delimited JSON framing for streamed calls.
//!
//! Streams arrive as arbitrary byte chunks. [`LineDecoder`] buffers partial
//! lines across chunk boundaries and decodes each complete line as one value.
//! Blank lines are ignored.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Content type for NDJSON bodies.
pub const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

/// A line that could not be decoded.
#[derive(Debug, Error)]
#[error("invalid JSON on line {line}: {source}")]
pub struct NdjsonError {
    /// 1-based line number within the stream.
    pub line: usize,
    #[source]
    pub source: serde_json::Error,
}

/// Incremental NDJSON decoder.
#[derive(Debug)]
pub struct LineDecoder<T> {
    buffer: Vec<u8>,
    line: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> LineDecoder<T> {
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            line: 0,
            _marker: PhantomData,
        }
    }

    /// Feed a chunk and decode every line it completes.
    pub fn push(&mut self, chunk: &[u8]) -> Result<Vec<T>, NdjsonError> {
        self.buffer.extend_from_slice(chunk);

        let mut values = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            if let Some(value) = self.decode_line(&line[..newline])? {
                values.push(value);
            }
        }
        Ok(values)
    }

    /// Decode whatever remains after the final newline.
    pub fn finish(mut self) -> Result<Option<T>, NdjsonError> {
        let rest = std::mem::take(&mut self.buffer);
        self.decode_line(&rest)
    }

    fn decode_line(&mut self, line: &[u8]) -> Result<Option<T>, NdjsonError> {
        self.line += 1;
        if line.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        serde_json::from_slice(line)
            .map(Some)
            .map_err(|source| NdjsonError {
                line: self.line,
                source,
            })
    }
}

impl<T: DeserializeOwned> Default for LineDecoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode one value as a newline-terminated JSON line.
pub fn encode_line<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut line = serde_json::to_vec(value)?;
    line.push(b'\n');
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Point;

    #[test]
    fn decodes_lines_split_across_chunks() {
        let mut decoder = LineDecoder::<Point>::new();
        let mut points = decoder.push(br#"{"latitude":1,"longi"#).unwrap();
        assert!(points.is_empty());

        points.extend(decoder.push(b"tude\":2}\n{\"latitude\":3,").unwrap());
        assert_eq!(points, vec![Point::new(1, 2)]);

        points.extend(decoder.push(br#""longitude":4}"#).unwrap());
        points.extend(decoder.finish().unwrap());
        assert_eq!(points, vec![Point::new(1, 2), Point::new(3, 4)]);
    }

    #[test]
    fn skips_blank_lines_and_carriage_returns() {
        let mut decoder = LineDecoder::<Point>::new();
        let points = decoder
            .push(b"\n{\"latitude\":1,\"longitude\":2}\r\n   \n")
            .unwrap();
        assert_eq!(points, vec![Point::new(1, 2)]);
        assert!(decoder.finish().unwrap().is_none());
    }

    #[test]
    fn reports_line_number_of_bad_input() {
        let mut decoder = LineDecoder::<Point>::new();
        let err = decoder
            .push(b"{\"latitude\":1,\"longitude\":2}\nnot json\n")
            .unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.to_string().starts_with("invalid JSON on line 2: "));
    }

    #[test]
    fn error_exposes_json_cause() {
        use std::error::Error as _;

        let mut decoder = LineDecoder::<Point>::new();
        let err = decoder.push(b"{\"latitude\":\n").unwrap_err();
        let cause = err.source().expect("decode error has a cause");
        assert!(cause.downcast_ref::<serde_json::Error>().is_some());
    }

    #[test]
    fn encoded_line_ends_with_newline() {
        let line = encode_line(&Point::new(5, 6)).unwrap();
        assert_eq!(line.last(), Some(&b'\n'));
        let mut decoder = LineDecoder::<Point>::new();
        assert_eq!(decoder.push(&line).unwrap(), vec![Point::new(5, 6)]);
    }
}
