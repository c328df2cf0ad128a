//! Core services for signal computation and tracking.

pub mod signals;

pub use signals::{ConfluenceScorer, SignalHistory, SignalMonitor};
