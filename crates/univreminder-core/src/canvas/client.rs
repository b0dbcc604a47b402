//! Canvas planner API client.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use url::Url;

use crate::canvas::traits::TaskSource;
use crate::canvas::types::{decode_planner_items, filter_syncable, RemoteTask};
use crate::error::FetchError;

pub const DEFAULT_BASE_URL: &str = "https://canvas.nus.edu.sg";
const PLANNER_ITEMS_PATH: &str = "/api/v1/planner/items";
const USER_AGENT: &str = "univreminder";

/// Fetches planner items for the authenticated user.
pub struct CanvasClient {
    http: Client,
    base_url: String,
    token: String,
}

impl CanvasClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !self.token.trim().is_empty()
    }

    fn planner_url(&self, window_start: DateTime<Utc>, per_page: u32) -> Result<Url, FetchError> {
        let base = self.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}{PLANNER_ITEMS_PATH}"))
            .map_err(|e| FetchError::InvalidUrl(format!("'{base}': {e}")))?;
        url.query_pairs_mut()
            .append_pair(
                "start_date",
                &window_start.to_rfc3339_opts(SecondsFormat::Secs, true),
            )
            .append_pair("per_page", &per_page.to_string());
        Ok(url)
    }

    /// Fetch and decode every planner item in the window, without filtering.
    pub async fn fetch_all(
        &self,
        window_start: DateTime<Utc>,
        per_page: u32,
    ) -> Result<Vec<RemoteTask>, FetchError> {
        if !self.is_authenticated() {
            return Err(FetchError::Auth("Canvas token is not configured".into()));
        }

        let url = self.planner_url(window_start, per_page)?;
        tracing::debug!(%url, "requesting planner items");

        let resp = self
            .http
            .get(url)
            .bearer_auth(self.token.trim())
            .header("Accept", "application/json")
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await?;
        decode_planner_items(&body)
    }
}

#[async_trait]
impl TaskSource for CanvasClient {
    async fn fetch(
        &self,
        window_start: DateTime<Utc>,
        per_page: u32,
    ) -> Result<Vec<RemoteTask>, FetchError> {
        let all = self.fetch_all(window_start, per_page).await?;
        let total = all.len();
        let tasks = filter_syncable(all);
        tracing::info!(total, syncable = tasks.len(), "fetched planner items");
        Ok(tasks)
    }
}
