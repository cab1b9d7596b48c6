//! Paginated reading of issues from the tracker.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::check_page_size;
use crate::error::SyncResult;
use crate::ticket::RawIssue;

/// A paginated issue search backend.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Fetch one page of at most `max_results` issues starting at `start_at`.
    async fn fetch_page(&self, start_at: usize, max_results: usize) -> SyncResult<Vec<RawIssue>>;
}

/// Fetch every issue, page by page, until a page comes back empty.
pub async fn fetch_all_issues<S>(source: &S, page_size: usize) -> SyncResult<Vec<RawIssue>>
where
    S: IssueSource + ?Sized,
{
    let page_size = check_page_size(page_size)?;

    let mut issues = Vec::new();
    let mut start_at = 0;

    loop {
        let page = source.fetch_page(start_at, page_size).await?;
        debug!(start_at, count = page.len(), "Fetched issue page");

        if page.is_empty() {
            break;
        }

        issues.extend(page);
        start_at += page_size;
    }

    info!(count = issues.len(), "Fetched all issues");
    Ok(issues)
}
