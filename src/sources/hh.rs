use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::SourceArgs;
use crate::error::AppError;
use crate::sources::{RawRecord, SourceQuery, VacancySource, retain_complete};

/// Client for the hh.ru public vacancy search API.
pub struct HeadHunter {
    client: reqwest::Client,
    api_url: String,
}

/// One page of search results. Only `items` is used.
#[derive(Debug, Deserialize)]
struct VacancyPage {
    #[serde(default)]
    items: Vec<RawRecord>,
}

impl HeadHunter {
    pub fn new(
        api_url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }

    pub fn from_args(args: &SourceArgs) -> Result<Self, AppError> {
        Self::new(
            args.api_url.clone(),
            &args.user_agent,
            Duration::from_secs(args.http_timeout_secs),
        )
    }

    /// Fetch a single zero-based page.
    async fn fetch_page(&self, query: &SourceQuery, page: u32) -> Result<Vec<RawRecord>, AppError> {
        let mut params: Vec<(&str, String)> = vec![
            ("page", page.to_string()),
            ("per_page", query.per_page.to_string()),
        ];
        params.extend(
            query
                .employer_ids
                .iter()
                .map(|id| ("employer_id", id.clone())),
        );

        let resp = self.client.get(&self.api_url).query(&params).send().await?;

        if !resp.status().is_success() {
            return Err(AppError::SourceUnavailable {
                status: resp.status().as_u16(),
            });
        }

        let body: VacancyPage = resp.json().await?;
        tracing::debug!("Page {page}: {} vacancies", body.items.len());
        Ok(body.items)
    }
}

#[async_trait]
impl VacancySource for HeadHunter {
    fn name(&self) -> &str {
        "hh.ru"
    }

    async fn fetch_all(&self, query: &SourceQuery) -> Result<Vec<RawRecord>, AppError> {
        let mut records = Vec::new();
        for page in 0..query.max_pages {
            records.extend(self.fetch_page(query, page).await?);
        }

        tracing::info!(
            "Fetched {} vacancies over {} pages from {}",
            records.len(),
            query.max_pages,
            self.name()
        );
        Ok(retain_complete(records))
    }
}
