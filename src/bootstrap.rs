// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::Context;
use dotenvy::dotenv;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use crate::{EventSource, FillLog, FillscanConfig, FillscanError, QueryProcessor};

/// Main entry point for the application.
///
/// Loads configuration, loads the fill log (the first command line argument
/// overrides the configured path), then answers queries from stdin until EOF.
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let mut config = FillscanConfig::from_env()?;
    if let Some(path) = std::env::args_os().nth(1) {
        config.trades_path = path.into();
    }

    let log = FillLog::from_csv_path(&config.trades_path)
        .context("fill log is required to answer queries")?
        .with_latency_per_day(config.fetch_latency_per_day);

    let mut processor = QueryProcessor::with_config(log, &config);
    info!(
        trades_path = %config.trades_path.display(),
        coalesce_ranges = config.coalesce_ranges,
        "Reading queries from stdin"
    );

    serve_queries(
        &mut processor,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        tokio::io::stderr(),
    )
    .await?;

    info!(stats = %processor.stats(), "Input exhausted");
    Ok(())
}

/// Answer each query line of `input`, writing one answer per line to `output`.
///
/// Blank lines are ignored. Malformed queries and failed fetches are reported
/// on `rejected` (one line each, whatever the log filter) and skipped; the
/// next line is processed normally.
///
/// # Errors
///
/// Returns an error if reading or writing fails, or if the cache invariant is
/// violated (answers after that point could be wrong).
pub async fn serve_queries<S, R, W, E>(
    processor: &mut QueryProcessor<S>,
    input: R,
    mut output: W,
    mut rejected: E,
) -> Result<(), FillscanError>
where
    S: EventSource,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        match processor.process_line(&line).await {
            Ok(answer) => {
                output
                    .write_all(format!("{}\n", answer.value).as_bytes())
                    .await?;
                output.flush().await?;
            }
            Err(e) if e.is_recoverable() => {
                warn!(query = %line, error = %e, "Skipping query");
                rejected
                    .write_all(format!("skipping query {line:?}: {e}\n").as_bytes())
                    .await?;
                rejected.flush().await?;
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
