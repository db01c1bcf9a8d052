// src/dataset.rs

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use std::{fmt, fs::File, io::Read, path::Path, str::FromStr};
use tracing::debug;

use crate::record::{Passenger, COLUMNS};

/// How records get an identifier when loaded.
///
/// The persisted file has no identifier column, so under `None` every
/// lookup by id misses. `Positional` numbers rows from 1 in file order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IdPolicy {
    #[default]
    None,
    Positional,
}

impl IdPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdPolicy::None => "none",
            IdPolicy::Positional => "positional",
        }
    }
}

impl fmt::Display for IdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Ok(IdPolicy::None),
            "positional" => Ok(IdPolicy::Positional),
            other => bail!("unknown id policy {:?} (expected \"none\" or \"positional\")", other),
        }
    }
}

/// Read the persisted dataset file at `path`.
pub fn load_dataset(path: &Path, policy: IdPolicy) -> Result<Vec<Passenger>> {
    let file = File::open(path).with_context(|| format!("opening dataset {:?}", path))?;
    read_passengers(file, policy).with_context(|| format!("loading dataset {:?}", path))
}

/// Parse a header row plus one row per passenger from `reader`.
pub fn read_passengers<R: Read>(reader: R, policy: IdPolicy) -> Result<Vec<Passenger>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr.headers().context("reading dataset header")?.clone();
    for col in COLUMNS {
        if !headers.iter().any(|h| h == col) {
            bail!("dataset header is missing column {:?}", col);
        }
    }

    let mut passengers = Vec::new();
    for (idx, result) in rdr.deserialize::<Passenger>().enumerate() {
        // +2: 1-based, after the header line
        let mut passenger = result.with_context(|| format!("parsing dataset line {}", idx + 2))?;
        if policy == IdPolicy::Positional {
            let id = u32::try_from(idx + 1).context("dataset too large for positional ids")?;
            passenger.passenger_id = Some(id);
        }
        passengers.push(passenger);
    }

    debug!(rows = passengers.len(), policy = %policy, "parsed dataset");
    Ok(passengers)
}
