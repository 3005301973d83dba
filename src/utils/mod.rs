//! Utility functions shared across layers.
//!
//! - [`slug_generator`] - Cryptographically secure random slug generation

pub mod slug_generator;
