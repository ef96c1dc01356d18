use sqlx::PgPool;

use crate::error::AppError;
use crate::loader::{self, LoadSummary};
use crate::sources::{SourceQuery, VacancySource};

/// Fetch everything the source has for the query, then load it.
///
/// A source failure aborts before anything is written.
pub async fn ingest(
    source: &dyn VacancySource,
    query: &SourceQuery,
    pool: &PgPool,
) -> Result<LoadSummary, AppError> {
    tracing::info!(
        "Fetching up to {} pages of {} vacancies for {} employers from {}",
        query.max_pages,
        query.per_page,
        query.employer_ids.len(),
        source.name()
    );
    let records = source.fetch_all(query).await?;
    loader::load(pool, &records).await
}
