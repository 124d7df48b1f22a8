//! Utility modules for common functionality
//!
//! This module provides logging, progress reporting and output path helpers
//! used throughout the application.

pub mod logger;
pub mod progress;
pub mod path_utils;

#[cfg(test)]
pub(crate) mod scratch;
