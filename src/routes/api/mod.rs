pub mod reports;

use axum::Router;
use axum::routing::get;

use crate::analytics::Analytics;

pub fn router(analytics: Analytics) -> Router {
    let reports = Router::new()
        .route("/companies", get(reports::companies))
        .route("/vacancies", get(reports::vacancies))
        .route("/vacancies/above-average", get(reports::above_average))
        .route("/vacancies/search", get(reports::search))
        .route("/salaries/average", get(reports::average_salaries))
        .with_state(analytics);

    Router::new().nest("/api/v1", reports)
}
