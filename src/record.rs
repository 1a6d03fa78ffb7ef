use chrono::{Local, NaiveDateTime};

use crate::parser::{Extracted, Indicator};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Header row of the CSV log.
pub fn header() -> Vec<&'static str> {
    std::iter::once("Datetime")
        .chain(Indicator::ALL.iter().map(|i| i.column()))
        .collect()
}

/// One bulletin reading: timestamp plus the eight indicator values.
#[derive(Debug, Clone)]
pub struct Record {
    timestamp: String,
    values: [Extracted; 8],
}

impl Record {
    pub fn build(values: [Extracted; 8]) -> Self {
        Self::build_at(values, Local::now().naive_local())
    }

    pub fn build_at(values: [Extracted; 8], at: NaiveDateTime) -> Self {
        Self {
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            values,
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Indicator/value pairs in column order.
    pub fn fields(&self) -> impl Iterator<Item = (Indicator, &Extracted)> {
        Indicator::ALL.into_iter().zip(self.values.iter())
    }

    pub fn to_row(&self) -> Vec<String> {
        std::iter::once(self.timestamp.clone())
            .chain(self.values.iter().map(|v| v.as_str().to_string()))
            .collect()
    }
}

// ── Tests ──
