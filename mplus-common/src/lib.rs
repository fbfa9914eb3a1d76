//! # Mythic+ Common Library
//!
//! Shared code for the Mythic+ lookup service including:
//! - Upstream and derived data model (runs, rosters, scores, brackets)
//! - Configuration loading and resolution
//! - Error types
//! - Numeric helpers used by the derived statistics

pub mod config;
pub mod error;
pub mod models;
pub mod numeric;

pub use error::{Error, Result};
