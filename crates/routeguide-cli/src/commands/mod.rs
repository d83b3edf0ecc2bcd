//! Subcommand handlers.
//!
//! `main.rs` parses arguments and dispatches here. Every handler receives the
//! output settings through [`Output`] and returns an `anyhow::Result`.

pub mod chat;
pub mod dataset;
pub mod features;
pub mod lookup;
pub mod route;

use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::output::{write_json, OutputFormat};
use crate::terminal::ColorPalette;

/// Where and how a command prints its results.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub format: OutputFormat,
    pub palette: ColorPalette,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            palette: ColorPalette::detect(),
        }
    }

    /// Print `value` as JSON, or `text` when the format is text.
    pub fn emit<T: Serialize>(
        &self,
        value: &T,
        text: impl FnOnce(&ColorPalette) -> String,
    ) -> Result<()> {
        let mut out = io::stdout().lock();
        let written = match self.format {
            OutputFormat::Json => write_json(&mut out, value),
            OutputFormat::Text => writeln!(out, "{}", text(&self.palette)),
        };
        written.context("failed to write output")
    }
}
