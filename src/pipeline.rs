use anyhow::Result;
use serde::Serialize;
use tracing::{info, warn};

use crate::csv_log::CsvLog;
use crate::fetch::PageSource;
use crate::parser::Document;
use crate::record::Record;
use crate::store::ObjectStore;

const UPDATED_MESSAGE: &str = "CSV log updated and uploaded successfully.";
const FETCH_FAILED_MESSAGE: &str = "Failed to retrieve the webpage.";

/// Result reported back to whatever triggered the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOutcome {
    pub status_code: u16,
    pub body: String,
}

impl RunOutcome {
    fn updated() -> Self {
        Self {
            status_code: 200,
            body: UPDATED_MESSAGE.to_string(),
        }
    }

    fn fetch_failed(status_code: u16) -> Self {
        Self {
            status_code,
            body: FETCH_FAILED_MESSAGE.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

/// What a fetch produced: a record, or the HTTP status of a failed fetch.
pub enum Reading {
    Record(Record),
    FetchFailed(u16),
}

/// Fetch the page and extract a record from it; no log is involved.
pub async fn read_page<P: PageSource>(source: &P) -> Result<Reading> {
    let page = source.fetch().await?;
    if !page.is_success() {
        warn!("Failed to retrieve the webpage. Status code: {}", page.status);
        return Ok(Reading::FetchFailed(page.status));
    }

    let document = Document::parse(&page.body);
    let record = Record::build(document.extract_all());
    for (indicator, value) in record.fields() {
        if value.is_found() {
            info!(indicator = indicator.column(), value = %value, "extracted");
        } else {
            warn!(indicator = indicator.column(), label = indicator.label(), "label not found");
        }
    }
    Ok(Reading::Record(record))
}

/// fetch → extract → build record → append to log → upload.
pub struct Pipeline<P, S> {
    source: P,
    log: CsvLog<S>,
}

impl<P: PageSource, S: ObjectStore> Pipeline<P, S> {
    pub fn new(source: P, log: CsvLog<S>) -> Self {
        Self { source, log }
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        let record = match read_page(&self.source).await? {
            Reading::Record(record) => record,
            Reading::FetchFailed(status) => return Ok(RunOutcome::fetch_failed(status)),
        };

        self.log.append(&record).await?;
        Ok(RunOutcome::updated())
    }
}

// ── Tests ──
