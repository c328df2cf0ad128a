//! Confluence - technical indicator engine with confluence scoring

pub mod config;
pub mod error;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use services::signals::{analyze, build_snapshot, SignalHistory, SignalMonitor};
pub use types::*;
