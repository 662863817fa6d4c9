//! Time log persistence.
//!
//! The text format is one line per forward-pass read:
//! `offset device_ns client_ns overhead_ns`, ready for plotting. When more
//! than one engine was swept, each block starts with a `# <engine>` line.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::sweep::{SweepResult, TimingRecord};

/// On-disk format of the time log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Whitespace-separated columns.
    #[default]
    Text,
    /// A JSON array with one entry per engine.
    Json,
}

#[derive(Serialize)]
struct EngineLog<'a> {
    engine: String,
    records: &'a [TimingRecord],
}

/// Write the forward-pass timings of every sweep to `out`.
pub fn write_records(
    out: &mut dyn Write,
    results: &[SweepResult],
    format: LogFormat,
) -> io::Result<()> {
    match format {
        LogFormat::Text => {
            let labelled = results.len() > 1;
            for result in results {
                if labelled {
                    writeln!(out, "# {}", result.algorithm)?;
                }
                for r in &result.records {
                    writeln!(
                        out,
                        "{} {} {} {}",
                        r.offset, r.device_ns, r.client_ns, r.overhead_ns
                    )?;
                }
            }
        }
        LogFormat::Json => {
            let logs: Vec<EngineLog<'_>> = results
                .iter()
                .map(|r| EngineLog {
                    engine: r.algorithm.to_string(),
                    records: &r.records,
                })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &logs).map_err(io::Error::other)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Create (or truncate) `path` and write the time log to it.
pub fn write_time_log(path: &Path, results: &[SweepResult], format: LogFormat) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_records(&mut file, results, format)?;
    file.flush()?;
    tracing::info!(path = %path.display(), engines = results.len(), "time log written");
    Ok(())
}
