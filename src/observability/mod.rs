//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! keystore / identity / channel / client produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters and gauges)
//!
//! Consumers:
//!     → stdout via tracing-subscriber
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Structured fields (msp_id, node, channel) on every bootstrap event
//! - Key material and certificate bodies are never logged
//! - Metrics are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
