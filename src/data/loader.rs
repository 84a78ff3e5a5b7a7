use crate::config::SeriesConfig;
use crate::metrics::EquitySeries;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CsvRecord {
    timestamp: String,
    equity: f64,
}

//loads (timestamp, equity) snapshots from a csv file
//
//rows are returned in file order; chronological order is the writer's job
pub fn load_equity_csv<P: AsRef<Path>>(path: P) -> Result<Vec<(DateTime<Utc>, f64)>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .context(format!("Failed to open CSV file: {:?}", path))?;

    let mut snapshots = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        let record: CsvRecord =
            result.context(format!("Failed to parse CSV record at line {}", index + 2))?;

        let timestamp = DateTime::parse_from_rfc3339(&record.timestamp)
            .context(format!(
                "Failed to parse timestamp '{}' at line {}",
                record.timestamp,
                index + 2
            ))?
            .with_timezone(&Utc);

        snapshots.push((timestamp, record.equity));
    }

    debug!(path = ?path, rows = snapshots.len(), "loaded equity snapshots");

    Ok(snapshots)
}

//builds a series by appending every snapshot in the file
pub fn series_from_csv<P: AsRef<Path>>(path: P, config: SeriesConfig) -> Result<EquitySeries> {
    let snapshots = load_equity_csv(path)?;

    let mut series = EquitySeries::with_config(SeriesConfig {
        initial_capacity: config.initial_capacity.max(snapshots.len()),
        ..config
    });
    series.extend(snapshots);

    Ok(series)
}
