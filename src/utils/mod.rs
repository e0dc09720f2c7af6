//! Utility functions shared across layers.
//!
//! - [`pretty_url`] - Short link display formatting

pub mod pretty_url;
