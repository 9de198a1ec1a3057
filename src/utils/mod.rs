//! # Utility Modules
//!
//! Supporting utilities for logging and observability.
//!
//! ## Components
//! - **Logging**: `tracing-subscriber` setup from [`crate::config::LoggingConfig`]
//! - **Metrics**: Thread-safe counters shared by validators of many sessions

pub mod logging;
pub mod metrics;

pub use metrics::{Metrics, MetricsSnapshot};
