//! Vacancy sources: the trait the pipeline fetches through and the raw
//! record type the listings API hands back.

pub mod hh;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

pub use hh::HeadHunter;

/// One vacancy object exactly as the listings API returned it.
///
/// Kept as untyped JSON until load time so a single oddly shaped item
/// cannot fail a whole page; decoding happens per record in the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(pub Value);

impl RawRecord {
    /// The listing's own id, for log lines.
    pub fn source_id(&self) -> &str {
        self.0.get("id").and_then(Value::as_str).unwrap_or("<unknown>")
    }

    /// Both `salary` and `address` are present and non-null.
    pub fn has_salary_and_address(&self) -> bool {
        let present = |key: &str| self.0.get(key).is_some_and(|v| !v.is_null());
        present("salary") && present("address")
    }
}

/// What to ask the source for.
#[derive(Debug, Clone)]
pub struct SourceQuery {
    pub employer_ids: Vec<String>,
    pub per_page: u32,
    pub max_pages: u32,
}

/// Trait that every vacancy source implements.
#[async_trait]
pub trait VacancySource: Send + Sync {
    /// Human-readable source name for logs.
    fn name(&self) -> &str;

    /// Fetch every page for the query and return the records that carry
    /// both a salary and an address, in page order.
    async fn fetch_all(&self, query: &SourceQuery) -> Result<Vec<RawRecord>, AppError>;
}

/// Drop records lacking a salary or an address, keeping the rest in order.
pub fn retain_complete(records: Vec<RawRecord>) -> Vec<RawRecord> {
    let before = records.len();
    let kept: Vec<RawRecord> = records
        .into_iter()
        .filter(RawRecord::has_salary_and_address)
        .collect();
    if kept.len() < before {
        tracing::info!(
            "Discarded {} of {before} vacancies without salary or address",
            before - kept.len()
        );
    }
    kept
}
