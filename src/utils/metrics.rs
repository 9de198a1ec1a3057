//! Observability and Metrics
//!
//! Counters describing validator traffic. A single [`Metrics`] value may be
//! shared by the validators of many sessions.
//!
//! Uses atomic counters for thread-safe metrics collection.

use crate::protocol::state::State;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::info;

/// Metrics collector for validator operations
#[derive(Debug)]
pub struct Metrics {
    /// Total messages validated
    pub messages_total: AtomicU64,
    /// Messages accepted
    pub messages_valid: AtomicU64,
    /// Messages rejected
    pub messages_invalid: AtomicU64,
    /// Accepted `CONNECT` messages
    pub sessions_opened: AtomicU64,
    /// Accepted `DISCONNECT_OK` messages
    pub sessions_completed: AtomicU64,
    /// Rejections that tore down a session outside `INIT`
    pub resets: AtomicU64,
    /// Start time for uptime calculation
    start_time: Instant,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            messages_total: AtomicU64::new(0),
            messages_valid: AtomicU64::new(0),
            messages_invalid: AtomicU64::new(0),
            sessions_opened: AtomicU64::new(0),
            sessions_completed: AtomicU64::new(0),
            resets: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record the outcome of one validated message
    pub fn record(&self, from: State, to: State, accepted: bool) {
        self.messages_total.fetch_add(1, Ordering::Relaxed);

        if !accepted {
            self.messages_invalid.fetch_add(1, Ordering::Relaxed);
            if from != State::Init {
                self.resets.fetch_add(1, Ordering::Relaxed);
            }
            return;
        }

        self.messages_valid.fetch_add(1, Ordering::Relaxed);
        match (from, to) {
            (State::Init, State::Connecting) => {
                self.sessions_opened.fetch_add(1, Ordering::Relaxed);
            }
            (State::Disconnecting, State::Init) => {
                self.sessions_completed.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Point-in-time copy of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            messages_total: self.messages_total.load(Ordering::Relaxed),
            messages_valid: self.messages_valid.load(Ordering::Relaxed),
            messages_invalid: self.messages_invalid.load(Ordering::Relaxed),
            sessions_opened: self.sessions_opened.load(Ordering::Relaxed),
            sessions_completed: self.sessions_completed.load(Ordering::Relaxed),
            resets: self.resets.load(Ordering::Relaxed),
            uptime_seconds: self.uptime_seconds(),
        }
    }

    /// Log a summary of all counters
    pub fn log_summary(&self) {
        let s = self.snapshot();
        info!(
            messages_total = s.messages_total,
            messages_valid = s.messages_valid,
            messages_invalid = s.messages_invalid,
            sessions_opened = s.sessions_opened,
            sessions_completed = s.sessions_completed,
            resets = s.resets,
            uptime_seconds = s.uptime_seconds,
            "Validator metrics summary"
        );
    }

    /// Reset all counters (useful for testing)
    pub fn reset(&self) {
        self.messages_total.store(0, Ordering::Relaxed);
        self.messages_valid.store(0, Ordering::Relaxed);
        self.messages_invalid.store(0, Ordering::Relaxed);
        self.sessions_opened.store(0, Ordering::Relaxed);
        self.sessions_completed.store(0, Ordering::Relaxed);
        self.resets.store(0, Ordering::Relaxed);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable copy of [`Metrics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub messages_total: u64,
    pub messages_valid: u64,
    pub messages_invalid: u64,
    pub sessions_opened: u64,
    pub sessions_completed: u64,
    pub resets: u64,
    pub uptime_seconds: u64,
}
