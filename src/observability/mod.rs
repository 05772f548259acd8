//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing middleware
//!     → logging.rs (tracing events: route registered, matched, fell through)
//!     → metrics.rs (dispatch counter, lookup latency)
//!
//! Consumers:
//!     → stdout via tracing-subscriber
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;
