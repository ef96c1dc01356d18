use serde::Serialize;
use sqlx::{PgConnection, PgPool};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Employer {
    pub employer_id: String,
    pub employer_name: String,
    pub employer_url: String,
}

impl Employer {
    /// Insert the employer unless one with the same id already exists, in
    /// which case the stored row is left as it is. Returns whether a row
    /// was written.
    pub async fn insert_or_ignore(
        conn: &mut PgConnection,
        employer: &Employer,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO employers (employer_id, employer_name, employer_url) VALUES ($1, $2, $3) ON CONFLICT (employer_id) DO NOTHING",
        )
        .bind(&employer.employer_id)
        .bind(&employer.employer_name)
        .bind(&employer.employer_url)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// All stored employers, by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Employer>, AppError> {
        let employers =
            sqlx::query_as::<_, Employer>("SELECT * FROM employers ORDER BY employer_name")
                .fetch_all(pool)
                .await?;
        Ok(employers)
    }

    /// Look up one employer by its hh.ru id.
    pub async fn get(pool: &PgPool, employer_id: &str) -> Result<Option<Employer>, AppError> {
        let employer =
            sqlx::query_as::<_, Employer>("SELECT * FROM employers WHERE employer_id = $1")
                .bind(employer_id)
                .fetch_optional(pool)
                .await?;
        Ok(employer)
    }
}
