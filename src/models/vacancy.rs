use serde::Serialize;
use sqlx::{PgConnection, PgPool};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Vacancy {
    pub vacancy_id: i32,
    pub vacancy_name: Option<String>,
    pub vacancy_url: Option<String>,
    pub city: Option<String>,
    pub salary: Option<i32>,
    pub employer_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVacancy {
    pub vacancy_name: Option<String>,
    pub vacancy_url: Option<String>,
    pub city: Option<String>,
    pub salary: Option<i32>,
    pub employer_id: String,
}

impl Vacancy {
    pub async fn create(conn: &mut PgConnection, input: &NewVacancy) -> Result<Vacancy, sqlx::Error> {
        sqlx::query_as::<_, Vacancy>(
            "INSERT INTO vacancies (vacancy_name, vacancy_url, city, salary, employer_id) VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&input.vacancy_name)
        .bind(&input.vacancy_url)
        .bind(&input.city)
        .bind(input.salary)
        .bind(&input.employer_id)
        .fetch_one(conn)
        .await
    }

    /// Stored vacancies of one employer, in insertion order.
    pub async fn list_for_employer(
        pool: &PgPool,
        employer_id: &str,
    ) -> Result<Vec<Vacancy>, AppError> {
        let vacancies = sqlx::query_as::<_, Vacancy>(
            "SELECT * FROM vacancies WHERE employer_id = $1 ORDER BY vacancy_id",
        )
        .bind(employer_id)
        .fetch_all(pool)
        .await?;
        Ok(vacancies)
    }

    /// Number of stored vacancies.
    pub async fn count(pool: &PgPool) -> Result<i64, AppError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vacancies")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
