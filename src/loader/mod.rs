//! Store loader: writes fetched listings into the employer and vacancy
//! relations, one record at a time.

pub mod normalize;

use sqlx::{PgConnection, PgPool};

use crate::db;
use crate::error::{AppError, SkipReason};
use crate::models::employer::Employer;
use crate::models::vacancy::Vacancy;
use crate::sources::RawRecord;

pub use normalize::{NormalizedRecord, normalize, resolve_salary};

/// Counts from one load. `received == vacancies_created + skipped`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub received: usize,
    pub employers_created: usize,
    pub vacancies_created: usize,
    pub skipped: usize,
}

/// Load every record over a single connection.
///
/// Statements autocommit, so each stored vacancy is durable as soon as it is
/// written. A record that cannot be stored is logged and skipped; only
/// failing to get a connection aborts the load.
pub async fn load(pool: &PgPool, records: &[RawRecord]) -> Result<LoadSummary, AppError> {
    let mut conn = db::acquire(pool).await?;

    let mut summary = LoadSummary {
        received: records.len(),
        ..LoadSummary::default()
    };

    for record in records {
        match load_record(&mut conn, record, &mut summary).await {
            Ok(()) => summary.vacancies_created += 1,
            Err(reason) => {
                tracing::warn!("Skipping vacancy {}: {reason}", record.source_id());
                summary.skipped += 1;
            }
        }
    }

    tracing::info!(
        "Load complete: {} received, {} employers new, {} vacancies stored, {} skipped",
        summary.received,
        summary.employers_created,
        summary.vacancies_created,
        summary.skipped
    );
    Ok(summary)
}

/// The employer row commits on its own, so it is counted even when the
/// vacancy insert that follows fails.
async fn load_record(
    conn: &mut PgConnection,
    record: &RawRecord,
    summary: &mut LoadSummary,
) -> Result<(), SkipReason> {
    let NormalizedRecord { employer, vacancy } = normalize(record)?;
    if Employer::insert_or_ignore(&mut *conn, &employer).await? {
        summary.employers_created += 1;
    }
    Vacancy::create(&mut *conn, &vacancy).await?;
    Ok(())
}
