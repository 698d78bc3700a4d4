//! Data model for parsed releases.

mod release;

pub use release::Release;
