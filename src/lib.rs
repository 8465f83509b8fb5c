//! Canonical resolution of Indonesian administrative locations.
//!
//! The [`LocationResolver`](features::locations::LocationResolver) is the
//! entry point for callers that persist a location (e.g. job postings); the
//! binary in `main.rs` exposes it over HTTP.

pub mod core;
pub mod features;
pub mod shared;
