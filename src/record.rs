// src/record.rs

use serde::{Deserialize, Serialize};

/// Columns of the persisted dataset, in file order.
pub const COLUMNS: [&str; 6] = ["survived", "pclass", "sex", "age", "fare", "embarked"];

/// One passenger row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passenger {
    /// Synthetic 1-based position, only set under [`IdPolicy::Positional`].
    ///
    /// [`IdPolicy::Positional`]: crate::dataset::IdPolicy::Positional
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passenger_id: Option<u32>,
    pub survived: u8,
    pub pclass: u8,
    pub sex: String,
    pub age: f64,
    pub fare: f64,
    pub embarked: String,
}

impl Passenger {
    /// Render as a CSV row matching [`COLUMNS`].
    pub fn to_row(&self) -> [String; 6] {
        [
            self.survived.to_string(),
            self.pclass.to_string(),
            self.sex.clone(),
            format_float(self.age),
            format_float(self.fare),
            self.embarked.clone(),
        ]
    }
}

/// Whole numbers keep a trailing `.0` so the column reads back as a float column.
fn format_float(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        format!("{:.1}", v)
    } else {
        v.to_string()
    }
}
