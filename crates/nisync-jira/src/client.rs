//! Jira HTTP client for paginated issue search.
//!
//! Uses `/rest/api/2/search` with an empty JQL and an explicit field list,
//! authenticating every request with basic credentials.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use nisync_core::ticket::SEARCH_FIELDS;
use nisync_core::{decode_json, expect_status, IssueSource, RawIssue, ServiceConfig, SyncError, SyncResult};

/// Search endpoint, relative to the Jira base URL.
pub const SEARCH_PATH: &str = "/rest/api/2/search";

const SEARCH_OPERATION: &str = "search issues";

/// Jira search client.
#[derive(Clone)]
pub struct JiraClient {
    base_url: String,
    user: String,
    password: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct SearchResponse {
    issues: Vec<RawIssue>,
}

impl JiraClient {
    /// Create a client for the configured Jira server.
    pub fn new(config: &ServiceConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("nisync/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user: config.user.clone(),
            password: config.password.clone(),
            client,
        }
    }

    /// Build the search request for one page.
    pub fn search_request(&self, start_at: usize, max_results: usize) -> reqwest::Result<reqwest::Request> {
        let fields = SEARCH_FIELDS.join(",");

        self.client
            .get(format!("{}{}", self.base_url, SEARCH_PATH))
            .query(&[("jql", ""), ("fields", fields.as_str())])
            .query(&[("maxResults", max_results), ("startAt", start_at)])
            .basic_auth(&self.user, Some(&self.password))
            .build()
    }
}

#[async_trait]
impl IssueSource for JiraClient {
    async fn fetch_page(&self, start_at: usize, max_results: usize) -> SyncResult<Vec<RawIssue>> {
        let request = self
            .search_request(start_at, max_results)
            .map_err(|e| SyncError::transport(SEARCH_OPERATION, e))?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| SyncError::transport(SEARCH_OPERATION, e))?;

        expect_status(SEARCH_OPERATION, response.status().as_u16(), &[200])?;

        let body = response
            .bytes()
            .await
            .map_err(|e| SyncError::transport(SEARCH_OPERATION, e))?;
        let issues = parse_page(&body)?;

        debug!(start_at, count = issues.len(), "Jira search page");
        Ok(issues)
    }
}

/// Decode a search response body into its issues.
fn parse_page(body: &[u8]) -> SyncResult<Vec<RawIssue>> {
    let page: SearchResponse = decode_json(SEARCH_OPERATION, body)?;
    Ok(page.issues)
}
