use std::env;

use crate::error::{AppError, Result};
use crate::types::{AnalysisConfig, Timeframe};

/// Runtime configuration for the CLI.
#[derive(Debug, Clone)]
pub struct Config {
    /// Symbol the candles belong to; keys the signal history.
    pub symbol: String,
    pub timeframe: Timeframe,
    pub forced_bias: bool,
    /// JSON file holding the candle array. `-` reads stdin.
    pub candles_path: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let timeframe = match env::var("CONFLUENCE_TIMEFRAME") {
            Ok(value) => {
                Timeframe::from_str(&value).ok_or(AppError::UnknownTimeframe(value))?
            }
            Err(_) => Timeframe::default(),
        };

        Ok(Self {
            symbol: env::var("CONFLUENCE_SYMBOL").unwrap_or_else(|_| "btc".to_string()),
            timeframe,
            forced_bias: env::var("CONFLUENCE_FORCED_BIAS")
                .ok()
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            candles_path: env::var("CONFLUENCE_CANDLES_PATH").ok(),
        })
    }

    /// Override the candles path, e.g. from the first CLI argument.
    pub fn with_candles_path(mut self, path: Option<String>) -> Self {
        if path.is_some() {
            self.candles_path = path;
        }
        self
    }

    pub fn analysis(&self) -> AnalysisConfig {
        AnalysisConfig {
            timeframe: self.timeframe,
            forced_bias: self.forced_bias,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_path_overrides_env() {
        let config = Config {
            symbol: "btc".to_string(),
            timeframe: Timeframe::OneHour,
            forced_bias: false,
            candles_path: Some("env.json".to_string()),
        };
        let config = config.with_candles_path(Some("cli.json".to_string()));
        assert_eq!(config.candles_path.as_deref(), Some("cli.json"));
        let config = config.with_candles_path(None);
        assert_eq!(config.candles_path.as_deref(), Some("cli.json"));
    }

    #[test]
    fn test_analysis_config() {
        let config = Config {
            symbol: "eth".to_string(),
            timeframe: Timeframe::FourHours,
            forced_bias: true,
            candles_path: None,
        };
        let analysis = config.analysis();
        assert_eq!(analysis.timeframe, Timeframe::FourHours);
        assert!(analysis.forced_bias);
    }
}
