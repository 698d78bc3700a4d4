//! Filterbrr - release classification and filter matching for torrent announces
//!
//! This library crate ties the parser and rule crates together behind a TOML
//! configuration and exposes the announce pipeline for integration testing.

pub mod config;
pub mod pipeline;

pub use pipeline::{Announce, Pipeline};
