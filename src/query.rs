// src/query.rs

use anyhow::Result;
use std::path::Path;
use thiserror::Error;

use crate::dataset::{load_dataset, read_passengers, IdPolicy};
use crate::record::Passenger;

pub const SURVIVAL_HINT: &str =
    "Invalid survival status. Use 1 for survived and 0 for not survived";
pub const CLASS_HINT: &str = "Invalid class. Use 1, 2, or 3 for passenger class";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Passenger with ID {id} not found")]
    NotFound { id: i64 },

    #[error("{hint}")]
    InvalidArgument { value: i64, hint: &'static str },
}

/// Read-only lookups over the dataset loaded at startup.
///
/// Every operation is a linear scan returning borrowed records in load order.
#[derive(Debug, Default)]
pub struct QueryEngine {
    passengers: Vec<Passenger>,
}

impl QueryEngine {
    pub fn new(passengers: Vec<Passenger>) -> Self {
        Self { passengers }
    }

    /// Load the persisted dataset at `path`.
    pub fn load(path: &Path, policy: IdPolicy) -> Result<Self> {
        Ok(Self::new(load_dataset(path, policy)?))
    }

    pub fn from_reader<R: std::io::Read>(reader: R, policy: IdPolicy) -> Result<Self> {
        Ok(Self::new(read_passengers(reader, policy)?))
    }

    pub fn len(&self) -> usize {
        self.passengers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }

    pub fn list_all(&self) -> &[Passenger] {
        &self.passengers
    }

    pub fn get_by_id(&self, id: i64) -> Result<&Passenger, QueryError> {
        self.passengers
            .iter()
            .find(|p| p.passenger_id.map(i64::from) == Some(id))
            .ok_or(QueryError::NotFound { id })
    }

    /// Passengers with `survived == status`; `status` must be 0 or 1.
    pub fn filter_by_survival(&self, status: i64) -> Result<Vec<&Passenger>, QueryError> {
        accept(status, &[0, 1], SURVIVAL_HINT)?;
        Ok(self.matching(|p| i64::from(p.survived) == status))
    }

    /// Passengers travelling in `class_num`; must be 1, 2 or 3.
    pub fn filter_by_class(&self, class_num: i64) -> Result<Vec<&Passenger>, QueryError> {
        accept(class_num, &[1, 2, 3], CLASS_HINT)?;
        Ok(self.matching(|p| i64::from(p.pclass) == class_num))
    }

    fn matching(&self, pred: impl Fn(&Passenger) -> bool) -> Vec<&Passenger> {
        self.passengers.iter().filter(|p| pred(p)).collect()
    }
}

fn accept(value: i64, accepted: &[i64], hint: &'static str) -> Result<(), QueryError> {
    if accepted.contains(&value) {
        Ok(())
    } else {
        Err(QueryError::InvalidArgument { value, hint })
    }
}
