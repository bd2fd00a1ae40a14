//! Unavailable tracks - fetch, show and export the tracks a Spotify helper
//! backend reports as no longer playable.
//!
//! One [`fetcher::TrackFetcher::fetch`] call is one interaction: a single GET
//! against the backend, then either a rendered list, a redirect to the login
//! page or a logged failure.

/// Client modules for interacting with the tracks backend
pub mod clients;
/// Configuration from explicit values and environment variables
pub mod config;
/// JSON and CSV export of a fetched track list
pub mod export;
/// The fetch, redirect, render interaction
pub mod fetcher;
/// Pure rendering of track lists and the pane they are shown in
pub mod render;
