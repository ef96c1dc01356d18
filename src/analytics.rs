//! The fixed, read-only report queries over the stored vacancies.

use serde::Serialize;
use sqlx::PgPool;

use crate::db;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct CompanyVacancyCount {
    pub employer_name: String,
    pub vacancy_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct VacancyListing {
    pub employer_name: String,
    pub city: Option<String>,
    pub vacancy_name: Option<String>,
    pub salary: Option<i32>,
    pub vacancy_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct AverageSalary {
    pub vacancy_name: Option<String>,
    pub average_salary: Option<f64>,
}

const LISTING_COLUMNS: &str = "SELECT e.employer_name, v.city, v.vacancy_name, v.salary, v.vacancy_url FROM vacancies v JOIN employers e ON e.employer_id = v.employer_id";

/// Runs the report queries. Each call checks out its own connection.
#[derive(Clone)]
pub struct Analytics {
    pool: PgPool,
}

impl Analytics {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Employers with the number of vacancies each has, most first.
    pub async fn companies_and_vacancy_counts(
        &self,
    ) -> Result<Vec<CompanyVacancyCount>, AppError> {
        let mut conn = db::acquire(&self.pool).await?;
        sqlx::query_as::<_, CompanyVacancyCount>(
            "SELECT e.employer_name, COUNT(v.vacancy_id) AS vacancy_count FROM vacancies v JOIN employers e ON e.employer_id = v.employer_id GROUP BY e.employer_id, e.employer_name ORDER BY vacancy_count DESC, e.employer_name",
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(AppError::query("companies_and_vacancy_counts"))
    }

    /// Every vacancy, best paid first.
    pub async fn all_vacancies(&self) -> Result<Vec<VacancyListing>, AppError> {
        let mut conn = db::acquire(&self.pool).await?;
        sqlx::query_as::<_, VacancyListing>(&format!(
            "{LISTING_COLUMNS} ORDER BY v.salary DESC, v.vacancy_id"
        ))
        .fetch_all(&mut *conn)
        .await
        .map_err(AppError::query("all_vacancies"))
    }

    /// Mean salary per vacancy name. Null salaries are left out of the mean.
    pub async fn average_salary_by_vacancy_name(&self) -> Result<Vec<AverageSalary>, AppError> {
        let mut conn = db::acquire(&self.pool).await?;
        sqlx::query_as::<_, AverageSalary>(
            "SELECT vacancy_name, AVG(salary)::float8 AS average_salary FROM vacancies GROUP BY vacancy_name ORDER BY average_salary DESC, vacancy_name",
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(AppError::query("average_salary_by_vacancy_name"))
    }

    /// Vacancies paying strictly more than the current mean salary.
    pub async fn vacancies_above_average_salary(&self) -> Result<Vec<VacancyListing>, AppError> {
        let mut conn = db::acquire(&self.pool).await?;
        sqlx::query_as::<_, VacancyListing>(&format!(
            "{LISTING_COLUMNS} WHERE v.salary > (SELECT AVG(salary) FROM vacancies) ORDER BY v.salary DESC, v.vacancy_id"
        ))
        .fetch_all(&mut *conn)
        .await
        .map_err(AppError::query("vacancies_above_average_salary"))
    }

    /// Vacancies whose name contains `keyword`, case-sensitively.
    /// An empty keyword matches nothing.
    pub async fn vacancies_matching_keyword(
        &self,
        keyword: &str,
    ) -> Result<Vec<VacancyListing>, AppError> {
        if keyword.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = db::acquire(&self.pool).await?;
        sqlx::query_as::<_, VacancyListing>(&format!(
            "{LISTING_COLUMNS} WHERE v.vacancy_name LIKE $1 ORDER BY v.salary DESC, v.vacancy_id"
        ))
        .bind(contains_pattern(keyword))
        .fetch_all(&mut *conn)
        .await
        .map_err(AppError::query("vacancies_matching_keyword"))
    }
}

/// `LIKE` pattern matching `keyword` literally anywhere in the value.
fn contains_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_becomes_a_substring_pattern() {
        assert_eq!(contains_pattern("Developer"), "%Developer%");
    }

    #[test]
    fn wildcards_in_keywords_match_literally() {
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("C_sharp"), "%C\\_sharp%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }
}
