//! Progress callbacks for a sync run.

use crate::ticket::TicketRecord;

/// Receives progress events as the pipeline runs.
///
/// Every method defaults to doing nothing.
pub trait SyncObserver: Send {
    /// All issues have been fetched from the tracker.
    fn issues_fetched(&mut self, _count: usize) {}

    /// A ticket node was created at `path`.
    fn ticket_created(&mut self, _ticket: &TicketRecord, _path: &str) {}

    /// `service` matched exactly one service node, which is about to be linked.
    fn service_linked(&mut self, _service: &str, _service_path: &str) {}

    /// `service` matched zero or several service nodes and was skipped.
    fn service_skipped(&mut self, _service: &str, _total_count: usize) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SyncObserver for NoopObserver {}
