//! Confluence signal engine.
//!
//! Computes technical indicators over a candle series, scores their
//! confluence, and derives targets and a trade plan.

pub mod bias;
pub mod history;
pub mod indicators;
pub mod monitor;
pub mod plan;
pub mod scoring;
pub mod snapshot;
pub mod targets;

pub use history::SignalHistory;
pub use monitor::SignalMonitor;
pub use scoring::ConfluenceScorer;
pub use snapshot::build_snapshot;

use tracing::debug;

use crate::error::Result;
use crate::types::{Analysis, AnalysisConfig, Candle};

/// Run one analysis pass over `candles`.
///
/// Pure function of its input: the same candles and config always produce
/// the same analysis. Fails only on an empty series.
pub fn analyze(candles: &[Candle], config: &AnalysisConfig) -> Result<Analysis> {
    let snapshot = build_snapshot(candles)?;

    let mut confluence = ConfluenceScorer::default().score(&snapshot);
    if config.forced_bias {
        bias::apply(&snapshot, &mut confluence);
    }

    let targets = targets::calculate(&snapshot, confluence.action);
    let plan = plan::build(&snapshot, confluence.action, &targets, config);

    debug!(
        "Analysis on {}: {} score={} forced={}",
        config.timeframe.label(),
        confluence.action.label(),
        confluence.score,
        confluence.forced
    );

    Ok(Analysis {
        snapshot,
        confluence,
        targets,
        plan,
    })
}
