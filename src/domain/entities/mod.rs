//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Link`] - A persisted slug to URL mapping
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with a separate struct for creation:
//! [`NewLink`] carries the fields chosen by the caller, while [`Link`] adds the
//! identifier assigned by the store. Links are immutable once created.

pub mod link;

pub use link::{Link, NewLink};
