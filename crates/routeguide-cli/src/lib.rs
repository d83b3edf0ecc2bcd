//! Route guide CLI library.
//!
//! This crate provides the HTTP client for the route guide service, the
//! concurrent lookup barrier, and terminal output formatting used by the
//! `routeguide-cli` binary.

pub mod args;
pub mod barrier;
pub mod client;
pub mod commands;
pub mod output;
pub mod terminal;

pub use barrier::{lookup_all, BarrierReport, FeatureLookup, LookupOutcome};
pub use client::{RouteGuideClient, DEFAULT_SERVER};
