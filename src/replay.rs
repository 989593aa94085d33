//! Replays recorded exchange messages through the normalizers.
//!
//! Input is one JSON record per line:
//!
//! ```text
//! {"exchange":"bitmex","message":{"op":"subscribe","args":["trade:XBTUSD"]}}
//! ```
//!
//! Files ending in `.gz` are gunzipped first. Every confirmation
//! produces one output line `{"exchange": ..., "filters": [...]}`.

use std::collections::HashSet;
use std::io::{Cursor, Read, Write};
use std::path::Path;

use anyhow::Result;
use flate2::read::GzDecoder;
use log::{debug, warn};
use serde::{Serialize, Deserialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::{
    exchanges::Exchange,
    metrics::{METRICS, RuntimeMetrics},
    pipeline::{self, NormalizeOutcome},
    schema::CanonicalFilter,
};

/// One recorded line.
#[derive(Debug, Deserialize)]
pub struct RecordedMessage {
    pub exchange: String,
    pub message: Value,
}

/// One output line.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FilterRecord {
    pub exchange: Exchange,
    pub filters: Vec<CanonicalFilter>,
}

/// Per-run counters (the global `METRICS` accumulate across runs).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplaySummary {
    pub lines: usize,
    pub confirmations: usize,
    pub filters: usize,
    pub passthrough: usize,
    pub unsupported: usize,
    pub skipped: usize,
    pub malformed: usize,
    pub parse_errors: usize,

    /// 1-based file line numbers of unparseable or malformed records
    pub error_lines: Vec<usize>,
}

pub struct Replayer {
    enabled: HashSet<Exchange>,
    pretty: bool,
}

impl Replayer {
    pub fn new(enabled: impl IntoIterator<Item = Exchange>, pretty: bool) -> Self {
        Self {
            enabled: enabled.into_iter().collect(),
            pretty,
        }
    }

    /// Normalizes a single recorded line.
    ///
    /// `line_no` is the 1-based position in the input, blank lines included.
    /// Never fails: every problem is logged and counted in `summary`.
    pub fn process_line(
        &self,
        line_no: usize,
        line: &str,
        summary: &mut ReplaySummary,
    ) -> Option<FilterRecord> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        summary.lines += 1;
        RuntimeMetrics::incr(&METRICS.messages_seen);

        let recorded: RecordedMessage = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                warn!("unparseable line {}: {}", line_no, e);
                summary.parse_errors += 1;
                summary.error_lines.push(line_no);
                RuntimeMetrics::incr(&METRICS.parse_errors);
                return None;
            }
        };

        let exchange = match recorded.exchange.parse::<Exchange>() {
            Ok(e) if self.enabled.contains(&e) => e,
            Ok(e) => {
                debug!("[{}] disabled, skipping line {}", e, line_no);
                summary.skipped += 1;
                RuntimeMetrics::incr(&METRICS.skipped);
                return None;
            }
            Err(e) => {
                warn!("line {}: {}", line_no, e);
                summary.skipped += 1;
                RuntimeMetrics::incr(&METRICS.skipped);
                return None;
            }
        };

        match pipeline::normalize(exchange, &recorded.message) {
            Ok(NormalizeOutcome::Filters(filters)) => {
                summary.confirmations += 1;
                summary.filters += filters.len();
                RuntimeMetrics::incr(&METRICS.confirmations);
                RuntimeMetrics::add(&METRICS.filters_emitted, filters.len());

                Some(FilterRecord { exchange, filters })
            }
            Ok(NormalizeOutcome::Passthrough) => {
                summary.passthrough += 1;
                RuntimeMetrics::incr(&METRICS.passthrough);
                None
            }
            Ok(NormalizeOutcome::Unsupported) => {
                summary.unsupported += 1;
                RuntimeMetrics::incr(&METRICS.unsupported);
                None
            }
            // already logged by the pipeline
            Err(_) => {
                warn!("line {}: malformed confirmation skipped", line_no);
                summary.malformed += 1;
                summary.error_lines.push(line_no);
                RuntimeMetrics::incr(&METRICS.malformed);
                None
            }
        }
    }

    /// Replays every line of `reader`, writing filter records to `out`.
    pub async fn run<R, W>(&self, reader: R, out: &mut W) -> Result<ReplaySummary>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut summary = ReplaySummary::default();
        let mut lines = reader.lines();
        let mut line_no = 0;

        while let Some(line) = lines.next_line().await? {
            line_no += 1;
            if let Some(record) = self.process_line(line_no, &line, &mut summary) {
                if self.pretty {
                    serde_json::to_writer_pretty(&mut *out, &record)?;
                } else {
                    serde_json::to_writer(&mut *out, &record)?;
                }
                out.write_all(b"\n")?;
            }
        }

        out.flush()?;
        Ok(summary)
    }

    /// Replays a recording file, gunzipping `.gz` input.
    pub async fn run_file<W: Write>(&self, path: &Path, out: &mut W) -> Result<ReplaySummary> {
        let gzipped = path.extension().is_some_and(|ext| ext == "gz");

        if gzipped {
            let path = path.to_path_buf();
            let text = tokio::task::spawn_blocking(move || -> std::io::Result<Vec<u8>> {
                let file = std::fs::File::open(&path)?;
                let mut text = Vec::new();
                GzDecoder::new(std::io::BufReader::new(file)).read_to_end(&mut text)?;
                Ok(text)
            })
            .await??;

            self.run(BufReader::new(Cursor::new(text)), out).await
        } else {
            let file = tokio::fs::File::open(path).await?;
            self.run(BufReader::new(file), out).await
        }
    }
}
