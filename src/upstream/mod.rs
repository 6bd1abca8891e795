//! Upstream call subsystem.
//!
//! # Data Flow
//! ```text
//! raw query string
//!     → upstream_url (plain concatenation onto the base URL)
//!     → OneCallClient::fetch (GET, read body)
//!     → WeatherSnapshot::decode
//! ```
//!
//! # Design Decisions
//! - One pooled hyper client per server, shared by all requests
//! - No retries, no caching: every inbound request is one upstream call
//! - Timeouts only when configured

pub mod client;

pub use client::{upstream_url, OneCallClient, UpstreamError};
