//! Filterbrr-Common: shared types and error handling.
//!
//! This crate provides common functionality used across filterbrr:
//!
//! - **Error Handling**: Common error type and result alias
//! - **Core Types**: The [`ReleaseType`] granularity shared by parser and rules
//!
//! # Examples
//!
//! ```
//! use filterbrr_common::{Error, ReleaseType, Result};
//!
//! fn example() -> Result<ReleaseType> {
//!     Err(Error::invalid_input("empty title"))
//! }
//!
//! assert!(example().is_err());
//! ```

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
