use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use crate::analytics::{Analytics, AverageSalary, CompanyVacancyCount, VacancyListing};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub keyword: Option<String>,
}

pub async fn companies(
    State(analytics): State<Analytics>,
) -> Result<Json<Vec<CompanyVacancyCount>>, AppError> {
    let rows = analytics.companies_and_vacancy_counts().await?;
    Ok(Json(rows))
}

pub async fn vacancies(
    State(analytics): State<Analytics>,
) -> Result<Json<Vec<VacancyListing>>, AppError> {
    let rows = analytics.all_vacancies().await?;
    Ok(Json(rows))
}

pub async fn average_salaries(
    State(analytics): State<Analytics>,
) -> Result<Json<Vec<AverageSalary>>, AppError> {
    let rows = analytics.average_salary_by_vacancy_name().await?;
    Ok(Json(rows))
}

pub async fn above_average(
    State(analytics): State<Analytics>,
) -> Result<Json<Vec<VacancyListing>>, AppError> {
    let rows = analytics.vacancies_above_average_salary().await?;
    Ok(Json(rows))
}

/// GET /api/v1/vacancies/search?keyword=...
///
/// A missing or empty keyword yields an empty list.
pub async fn search(
    State(analytics): State<Analytics>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<VacancyListing>>, AppError> {
    let keyword = params.keyword.unwrap_or_default();
    let rows = analytics.vacancies_matching_keyword(&keyword).await?;
    Ok(Json(rows))
}
