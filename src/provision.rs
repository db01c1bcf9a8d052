// src/provision.rs

use anyhow::{anyhow, Context, Result};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use reqwest::Client;
use std::{fs, path::Path};
use tempfile::NamedTempFile;
use tracing::{info, instrument};
use url::Url;

use crate::fetch;
use crate::record::{Passenger, COLUMNS};

/// Seaborn's copy of the Titanic passenger list.
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/mwaskom/seaborn-data/master/titanic.csv";

/// Field values treated as missing, alongside the empty string.
/// Mirrors pandas' default `na_values`.
const NA_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Result of projecting a source table down to [`COLUMNS`].
#[derive(Debug)]
pub struct Projection {
    pub passengers: Vec<Passenger>,
    /// Source rows skipped for having a missing value in a kept column.
    pub dropped: usize,
}

impl Projection {
    /// Data rows read from the source, kept or not.
    pub fn source_rows(&self) -> usize {
        self.passengers.len() + self.dropped
    }
}

/// Make sure a dataset file exists at `path`, deriving it from `source` if not.
///
/// An existing file is never inspected or rewritten. Any failure here is
/// meant to stop startup.
#[instrument(level = "info", skip(client))]
pub async fn ensure_dataset(client: &Client, source: &Url, path: &Path) -> Result<()> {
    if path.exists() {
        info!("{} already exists", path.display());
        return Ok(());
    }

    let body = fetch::get_text(client, source).await?;
    let projection = project_source(&body).with_context(|| format!("projecting {}", source))?;
    info!(
        source = projection.source_rows(),
        kept = projection.passengers.len(),
        dropped = projection.dropped,
        "projected source table"
    );

    write_dataset(path, &projection.passengers)?;
    info!("Created {}", path.display());
    Ok(())
}

/// Keep the six dataset columns of a CSV `text`, dropping incomplete rows.
pub fn project_source(text: &str) -> Result<Projection> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = rdr.headers().context("reading source header")?.clone();
    let mut positions = [0usize; 6];
    for (slot, col) in positions.iter_mut().zip(COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h.trim() == col)
            .ok_or_else(|| anyhow!("source table has no {:?} column", col))?;
    }

    let mut passengers = Vec::new();
    let mut dropped = 0;
    for (idx, result) in rdr.records().enumerate() {
        let line = idx + 2;
        let record = result.with_context(|| format!("reading source line {}", line))?;
        match select(&record, &positions) {
            Some(fields) => passengers.push(
                parse_fields(&fields).with_context(|| format!("parsing source line {}", line))?,
            ),
            None => dropped += 1,
        }
    }

    Ok(Projection {
        passengers,
        dropped,
    })
}

/// The kept fields of `record`, or `None` if any of them is missing.
fn select<'r>(record: &'r StringRecord, positions: &[usize; 6]) -> Option<[&'r str; 6]> {
    let mut out = [""; 6];
    for (slot, &pos) in out.iter_mut().zip(positions) {
        let value = record.get(pos)?.trim();
        if is_missing(value) {
            return None;
        }
        *slot = value;
    }
    Some(out)
}

fn is_missing(value: &str) -> bool {
    value.is_empty() || NA_MARKERS.contains(&value)
}

fn parse_fields(fields: &[&str; 6]) -> Result<Passenger> {
    let [survived, pclass, sex, age, fare, embarked] = *fields;
    Ok(Passenger {
        passenger_id: None,
        survived: parse_whole(survived).context("survived")?,
        pclass: parse_whole(pclass).context("pclass")?,
        sex: sex.to_string(),
        age: age.parse::<f64>().with_context(|| format!("age {:?}", age))?,
        fare: fare.parse::<f64>().with_context(|| format!("fare {:?}", fare))?,
        embarked: embarked.to_string(),
    })
}

/// Parse a small integer that may have been written as a float ("3.0").
fn parse_whole(s: &str) -> Result<u8> {
    if let Ok(v) = s.parse::<u8>() {
        return Ok(v);
    }
    let f = s.parse::<f64>().with_context(|| format!("{:?} is not a number", s))?;
    if f.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(&f) {
        Ok(f as u8)
    } else {
        Err(anyhow!("{:?} is not a small whole number", s))
    }
}

/// Write `passengers` to `path` as CSV with a [`COLUMNS`] header.
///
/// The file is staged next to `path` and renamed into place, so readers
/// never observe a partial dataset.
pub fn write_dataset(path: &Path, passengers: &[Passenger]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("creating directory {:?}", dir))?;

    let tmp = NamedTempFile::new_in(dir).with_context(|| format!("staging file in {:?}", dir))?;
    {
        let mut wtr = WriterBuilder::new().from_writer(tmp.as_file());
        wtr.write_record(COLUMNS).context("writing header")?;
        for p in passengers {
            wtr.write_record(p.to_row()).context("writing row")?;
        }
        wtr.flush().context("flushing dataset")?;
    }
    tmp.as_file().sync_all().context("syncing dataset")?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("persisting {:?}", path))?;
    Ok(())
}
