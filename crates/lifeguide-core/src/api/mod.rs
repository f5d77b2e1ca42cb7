//! REST client for the Lifeguide API.
//!
//! - `client`: base HTTP plumbing and the authenticated request layer
//! - `catalog`: unauthenticated catalog reads (categories, topics, search)
//! - `errors`: request error taxonomy

pub mod catalog;
pub mod client;
pub mod errors;

pub use client::{ApiClient, MissingToken, decode};
pub use errors::{ApiError, ApiErrorKind};
