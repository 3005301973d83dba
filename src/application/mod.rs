//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating the link store,
//! the cache and the slug generator. Services consume traits and provide a
//! clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::url_service::UrlService`] - Idempotent shortening and cached resolution

pub mod services;
