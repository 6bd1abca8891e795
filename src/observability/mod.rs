//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handler produces:
//!     → logging.rs (log lines: upstream URL, OK marker, errors)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape, when enabled)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through log lines for correlation
//! - Metrics are recorded unconditionally; without an exporter they cost nothing

pub mod logging;
pub mod metrics;
