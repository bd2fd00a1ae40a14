/// HTTP client for the unavailable tracks endpoint
pub mod backend;
/// Data entities for tracks, artists, albums and request filters
pub mod entities;
/// Error types and result aliases
pub mod errors;

pub use backend::BackendClient;
