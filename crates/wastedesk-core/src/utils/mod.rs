//! Utility functions for string formatting and manipulation.

pub mod format;

pub use format::{format_phone, mask, truncate_string};
