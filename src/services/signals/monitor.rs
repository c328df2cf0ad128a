//! Signal monitor: runs analysis passes and keeps per-market histories.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, info};

use super::analyze;
use super::history::SignalHistory;
use crate::error::Result;
use crate::types::{Analysis, AnalysisConfig, Candle, HistoryEntry, Timeframe};

/// Tracks signal histories per symbol and timeframe.
pub struct SignalMonitor {
    /// Key format: "{symbol}:{timeframe}"
    histories: DashMap<String, SignalHistory>,
}

impl SignalMonitor {
    /// Create a new signal monitor.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            histories: DashMap::new(),
        })
    }

    fn key(symbol: &str, timeframe: Timeframe) -> String {
        format!("{}:{}", symbol.to_lowercase(), timeframe.label())
    }

    /// Analyze `candles` and record the result in the market's history.
    ///
    /// Returns the analysis and whether the signal changed materially.
    pub fn evaluate(
        &self,
        symbol: &str,
        candles: &[Candle],
        config: &AnalysisConfig,
    ) -> Result<(Analysis, bool)> {
        let analysis = analyze(candles, config)?;
        let key = Self::key(symbol, config.timeframe);
        let timestamp = chrono::Utc::now().timestamp_millis();

        // Entry lock serializes writes to one history
        let alert = self.histories.entry(key.clone()).or_default().record(
            analysis.confluence.action,
            analysis.confluence.score,
            analysis.snapshot.price,
            timestamp,
        );

        if alert {
            info!(
                "Signal change for {}: {} (score {})",
                key,
                analysis.confluence.action.label(),
                analysis.confluence.score
            );
        } else {
            debug!("No material change for {}", key);
        }

        Ok((analysis, alert))
    }

    /// History entries for a market, oldest first.
    pub fn history(&self, symbol: &str, timeframe: Timeframe) -> Vec<HistoryEntry> {
        self.histories
            .get(&Self::key(symbol, timeframe))
            .map(|history| history.entries().cloned().collect())
            .unwrap_or_default()
    }

    /// Drop a market's history.
    pub fn clear(&self, symbol: &str, timeframe: Timeframe) {
        self.histories.remove(&Self::key(symbol, timeframe));
    }

    /// Number of tracked markets.
    pub fn tracked(&self) -> usize {
        self.histories.len()
    }
}
