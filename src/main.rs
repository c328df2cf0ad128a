use std::fs;
use std::io::Read;

use anyhow::Context;
use confluence::config::Config;
use confluence::{analyze, AppError, Candle};
use serde_json::json;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn read_candles(path: &str) -> anyhow::Result<Vec<Candle>> {
    let raw = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading candles from stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("reading candles from {}", path))?
    };

    let candles: Vec<Candle> = serde_json::from_str(&raw).map_err(AppError::from)?;
    Ok(candles)
}

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing; stdout carries the JSON output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "confluence=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?.with_candles_path(std::env::args().nth(1));
    let path = config.candles_path.clone().ok_or_else(|| {
        AppError::MissingInput("pass a path or set CONFLUENCE_CANDLES_PATH".to_string())
    })?;

    let candles = read_candles(&path)?;
    info!(
        "Analyzing {} {} candles for {}",
        candles.len(),
        config.timeframe.label(),
        config.symbol
    );

    // Single pass with no prior history, so there is no alert to report
    let analysis = analyze(&candles, &config.analysis())?;

    info!("{}", analysis.plan.summary);

    let output = json!({
        "symbol": config.symbol,
        "timeframe": config.timeframe,
        "analysis": analysis,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
