//! Tracker to inventory synchronization pipeline.
//!
//! Fetches every issue, projects it to a ticket record, wipes the inventory's
//! ticket nodes and writes them back. Runs strictly in sequence:
//! `Fetching → Projecting → Resetting → Writing → Done`, or `Aborted` on the
//! first fatal error. There is no resume; a new run starts from scratch.

use std::fmt;

use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::error::{PipelineError, SyncError};
use crate::inventory::{self, Inventory};
use crate::observer::SyncObserver;
use crate::source::{self, IssueSource};
use crate::ticket;

/// Stage of a sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStage {
    Fetching,
    Projecting,
    Resetting,
    Writing,
    Done,
    Aborted,
}

impl SyncStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStage::Fetching => "fetching",
            SyncStage::Projecting => "projecting",
            SyncStage::Resetting => "resetting",
            SyncStage::Writing => "writing",
            SyncStage::Done => "done",
            SyncStage::Aborted => "aborted",
        }
    }
}

impl fmt::Display for SyncStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a completed sync run.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub issues_fetched: usize,
    pub tickets_created: usize,
    pub relationships_created: usize,
    pub services_skipped: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// One sync run over an issue source and an inventory.
pub struct SyncPipeline<'a, S: ?Sized, I: ?Sized> {
    source: &'a S,
    inventory: &'a I,
    page_size: usize,
    stage: SyncStage,
    failed_stage: Option<SyncStage>,
}

impl<'a, S, I> SyncPipeline<'a, S, I>
where
    S: IssueSource + ?Sized,
    I: Inventory + ?Sized,
{
    pub fn new(source: &'a S, inventory: &'a I, page_size: usize) -> Self {
        Self {
            source,
            inventory,
            page_size,
            stage: SyncStage::Fetching,
            failed_stage: None,
        }
    }

    /// Current stage of the run.
    pub fn stage(&self) -> SyncStage {
        self.stage
    }

    /// Stage that was active when the run aborted.
    pub fn failed_stage(&self) -> Option<SyncStage> {
        self.failed_stage
    }

    /// Drive the run to `Done`, or to `Aborted` on the first fatal error.
    ///
    /// Mutations already issued before an abort are not rolled back.
    pub async fn run<O>(&mut self, observer: &mut O) -> Result<SyncReport, PipelineError>
    where
        O: SyncObserver + ?Sized,
    {
        let started_at = Utc::now();
        info!(page_size = self.page_size, "Starting ticket sync");

        self.stage = SyncStage::Fetching;
        let issues = source::fetch_all_issues(self.source, self.page_size)
            .await
            .map_err(|e| self.abort(e))?;
        let issues_fetched = issues.len();
        observer.issues_fetched(issues_fetched);

        self.stage = SyncStage::Projecting;
        let tickets = ticket::project_issues(issues);

        self.stage = SyncStage::Resetting;
        inventory::reset_tickets(self.inventory)
            .await
            .map_err(|e| self.abort(e))?;

        self.stage = SyncStage::Writing;
        let written = inventory::write_tickets(self.inventory, &tickets, observer)
            .await
            .map_err(|e| self.abort(e))?;

        self.stage = SyncStage::Done;
        let report = SyncReport {
            issues_fetched,
            tickets_created: written.tickets_created,
            relationships_created: written.relationships_created,
            services_skipped: written.services_skipped,
            started_at,
            finished_at: Utc::now(),
        };

        info!(
            issues = report.issues_fetched,
            tickets = report.tickets_created,
            relationships = report.relationships_created,
            skipped = report.services_skipped,
            "Ticket sync complete"
        );

        Ok(report)
    }

    fn abort(&mut self, source: SyncError) -> PipelineError {
        let stage = self.stage;
        error!(stage = %stage, error = %source, "Ticket sync aborted");
        self.failed_stage = Some(stage);
        self.stage = SyncStage::Aborted;
        PipelineError { stage, source }
    }
}
