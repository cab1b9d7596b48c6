//! In-memory fakes shared by the unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{SyncError, SyncResult};
use crate::inventory::{Inventory, Relationship, ServiceLookup};
use crate::observer::SyncObserver;
use crate::source::IssueSource;
use crate::ticket::{RawIssue, TicketRecord};

/// A call received by [`FakeInventory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    DeleteAllTickets,
    CreateTicket(String),
    FindService(String),
    CreateRelationship(Relationship),
}

/// Inventory that records every call and serves services from a map.
#[derive(Default)]
pub struct FakeInventory {
    services: HashMap<String, Vec<String>>,
    delete_status: Option<u16>,
    create_ticket_status: Option<u16>,
    find_service_status: Option<u16>,
    calls: Mutex<Vec<Call>>,
}

impl FakeInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_service(mut self, name: &str, uris: &[&str]) -> Self {
        self.services
            .insert(name.to_string(), uris.iter().map(|u| u.to_string()).collect());
        self
    }

    pub fn failing_delete(mut self, status: u16) -> Self {
        self.delete_status = Some(status);
        self
    }

    pub fn failing_create_ticket(mut self, status: u16) -> Self {
        self.create_ticket_status = Some(status);
        self
    }

    pub fn failing_find_service(mut self, status: u16) -> Self {
        self.find_service_status = Some(status);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn tickets_created(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::CreateTicket(_)))
            .count()
    }

    pub fn relationships(&self) -> Vec<Relationship> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreateRelationship(rel) => Some(rel),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn fail(operation: &'static str, expected: &'static [u16], status: Option<u16>) -> SyncResult<()> {
    match status {
        Some(actual) => Err(SyncError::UnexpectedStatus { operation, expected, actual }),
        None => Ok(()),
    }
}

#[async_trait]
impl Inventory for FakeInventory {
    async fn delete_all_tickets(&self) -> SyncResult<()> {
        self.record(Call::DeleteAllTickets);
        fail("delete tickets", &[200, 204], self.delete_status)
    }

    async fn create_ticket(&self, name: &str) -> SyncResult<String> {
        self.record(Call::CreateTicket(name.to_string()));
        fail("create ticket", &[201], self.create_ticket_status)?;
        Ok(format!("/api/v1/ticket/{}/", self.tickets_created()))
    }

    async fn find_service(&self, name: &str) -> SyncResult<ServiceLookup> {
        self.record(Call::FindService(name.to_string()));
        fail("find service", &[200], self.find_service_status)?;
        let resource_uris = self.services.get(name).cloned().unwrap_or_default();
        Ok(ServiceLookup {
            total_count: resource_uris.len(),
            resource_uris,
        })
    }

    async fn create_relationship(&self, relationship: &Relationship) -> SyncResult<()> {
        self.record(Call::CreateRelationship(relationship.clone()));
        Ok(())
    }
}

/// Issue source that serves a fixed list in pages.
pub struct FakeSource {
    issues: Vec<RawIssue>,
}

impl FakeSource {
    pub fn new(issues: Vec<RawIssue>) -> Self {
        Self { issues }
    }
}

#[async_trait]
impl IssueSource for FakeSource {
    async fn fetch_page(&self, start_at: usize, max_results: usize) -> SyncResult<Vec<RawIssue>> {
        Ok(self
            .issues
            .iter()
            .skip(start_at)
            .take(max_results)
            .cloned()
            .collect())
    }
}

/// Observer that records events as short strings.
#[derive(Default)]
pub struct RecordingObserver {
    pub events: Vec<String>,
}

impl SyncObserver for RecordingObserver {
    fn issues_fetched(&mut self, count: usize) {
        self.events.push(format!("fetched {count}"));
    }

    fn ticket_created(&mut self, ticket: &TicketRecord, path: &str) {
        self.events.push(format!("ticket {} {}", ticket.key, path));
    }

    fn service_linked(&mut self, service: &str, service_path: &str) {
        self.events.push(format!("link {service} {service_path}"));
    }

    fn service_skipped(&mut self, service: &str, total_count: usize) {
        self.events.push(format!("skip {service} {total_count}"));
    }
}
