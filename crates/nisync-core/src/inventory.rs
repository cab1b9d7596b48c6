//! Inventory side of the sync: wiping ticket nodes and writing them back.
//!
//! Creates nodes and relationships:
//! - one ticket node per ticket, named `"<key>: <summary>"`
//! - (ticket)-[:Is_about]->(service) for every service name with exactly one match

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{SyncError, SyncResult};
use crate::observer::SyncObserver;
use crate::ticket::TicketRecord;

/// Relationship type linking a ticket node to a service node.
pub const IS_ABOUT: &str = "Is_about";

/// Node type assigned to ticket nodes.
pub const TICKET_NODE_TYPE: &str = "/api/v1/node_type/ticket/";

/// Meta type assigned to ticket nodes.
pub const TICKET_META_TYPE: &str = "Logical";

/// Result of looking up service nodes by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceLookup {
    pub total_count: usize,
    pub resource_uris: Vec<String>,
}

impl ServiceLookup {
    /// The matched service path, if the lookup found exactly one node.
    pub fn single_match(&self) -> SyncResult<Option<&str>> {
        if self.total_count != 1 {
            return Ok(None);
        }
        self.resource_uris
            .first()
            .map(|uri| Some(uri.as_str()))
            .ok_or_else(|| SyncError::MalformedResponse {
                operation: "find service",
                detail: "total_count is 1 but no objects were returned".to_string(),
            })
    }
}

/// Directed relationship between two inventory nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    #[serde(rename = "type")]
    pub rel_type: String,
    pub start: String,
    pub end: String,
}

impl Relationship {
    /// An `Is_about` edge from a ticket node to a service node.
    pub fn is_about(ticket_path: &str, service_path: &str) -> Self {
        Self {
            rel_type: IS_ABOUT.to_string(),
            start: ticket_path.to_string(),
            end: service_path.to_string(),
        }
    }
}

/// Operations the sync needs from the inventory system.
#[async_trait]
pub trait Inventory: Send + Sync {
    /// Delete every ticket node.
    async fn delete_all_tickets(&self) -> SyncResult<()>;

    /// Create a ticket node with the given display name and return its path.
    async fn create_ticket(&self, name: &str) -> SyncResult<String>;

    /// Look up service nodes whose name is exactly `name`.
    async fn find_service(&self, name: &str) -> SyncResult<ServiceLookup>;

    /// Create a relationship between two existing nodes.
    async fn create_relationship(&self, relationship: &Relationship) -> SyncResult<()>;
}

/// Counts from writing tickets to the inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub tickets_created: usize,
    pub relationships_created: usize,
    pub services_skipped: usize,
}

/// Remove all ticket nodes from the inventory, whatever created them.
pub async fn reset_tickets<I>(inventory: &I) -> SyncResult<()>
where
    I: Inventory + ?Sized,
{
    inventory.delete_all_tickets().await?;
    info!("Deleted all inventory ticket nodes");
    Ok(())
}

/// Create a node per ticket and link it to the services it names.
pub async fn write_tickets<I, O>(
    inventory: &I,
    tickets: &[TicketRecord],
    observer: &mut O,
) -> SyncResult<WriteReport>
where
    I: Inventory + ?Sized,
    O: SyncObserver + ?Sized,
{
    let mut report = WriteReport::default();

    for ticket in tickets {
        let name = ticket.display_name()?;
        let ticket_path = inventory.create_ticket(&name).await?;
        report.tickets_created += 1;
        debug!(key = %ticket.key, path = %ticket_path, "Created ticket node");
        observer.ticket_created(ticket, &ticket_path);

        for service in &ticket.service {
            let lookup = inventory.find_service(service).await?;

            let Some(service_path) = lookup.single_match()? else {
                debug!(key = %ticket.key, service = %service, matches = lookup.total_count, "Skipped service");
                observer.service_skipped(service, lookup.total_count);
                report.services_skipped += 1;
                continue;
            };

            observer.service_linked(service, service_path);
            inventory
                .create_relationship(&Relationship::is_about(&ticket_path, service_path))
                .await?;
            report.relationships_created += 1;
            debug!(key = %ticket.key, service = %service, path = %service_path, "Linked service");
        }
    }

    info!(
        tickets = report.tickets_created,
        relationships = report.relationships_created,
        skipped = report.services_skipped,
        "Wrote tickets to inventory"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoopObserver;
    use crate::testing::{Call, FakeInventory, RecordingObserver};

    fn ticket(key: &str, summary: &str, services: &[&str]) -> TicketRecord {
        TicketRecord {
            key: key.to_string(),
            summary: Some(summary.to_string()),
            service: services.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_single_match_creates_relationship() {
        let inventory = FakeInventory::new().with_service("svcA", &["/api/v1/service/7/"]);
        let tickets = vec![ticket("OPS-42", "disk full", &["svcA"])];

        let report = write_tickets(&inventory, &tickets, &mut NoopObserver).await.unwrap();

        assert_eq!(report.tickets_created, 1);
        assert_eq!(report.relationships_created, 1);
        assert_eq!(
            inventory.calls(),
            vec![
                Call::CreateTicket("OPS-42: disk full".to_string()),
                Call::FindService("svcA".to_string()),
                Call::CreateRelationship(Relationship {
                    rel_type: "Is_about".to_string(),
                    start: "/api/v1/ticket/1/".to_string(),
                    end: "/api/v1/service/7/".to_string(),
                }),
            ]
        );
    }

    #[tokio::test]
    async fn test_zero_or_many_matches_are_skipped() {
        let inventory = FakeInventory::new()
            .with_service("dup", &["/api/v1/service/1/", "/api/v1/service/2/"]);
        let tickets = vec![ticket("OPS-1", "x", &["missing", "dup"])];
        let mut observer = RecordingObserver::default();

        let report = write_tickets(&inventory, &tickets, &mut observer).await.unwrap();

        assert_eq!(report.relationships_created, 0);
        assert_eq!(report.services_skipped, 2);
        assert_eq!(inventory.relationships().len(), 0);
        assert_eq!(
            observer.events,
            vec![
                "ticket OPS-1 /api/v1/ticket/1/".to_string(),
                "skip missing 0".to_string(),
                "skip dup 2".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_service_name_is_looked_up() {
        let inventory = FakeInventory::new();
        let tickets = vec![ticket("OPS-1", "x", &["a", ""])];

        write_tickets(&inventory, &tickets, &mut NoopObserver).await.unwrap();

        assert!(inventory.calls().contains(&Call::FindService(String::new())));
    }

    #[tokio::test]
    async fn test_create_failure_aborts_before_lookup() {
        let inventory = FakeInventory::new()
            .with_service("svcA", &["/api/v1/service/7/"])
            .failing_create_ticket(500);
        let tickets = vec![ticket("OPS-1", "x", &["svcA"])];

        let err = write_tickets(&inventory, &tickets, &mut NoopObserver).await.unwrap_err();

        assert!(matches!(err, SyncError::UnexpectedStatus { actual: 500, .. }));
        assert_eq!(inventory.calls(), vec![Call::CreateTicket("OPS-1: x".to_string())]);
    }

    #[tokio::test]
    async fn test_lookup_failure_aborts_remaining_tickets() {
        let inventory = FakeInventory::new().failing_find_service(502);
        let tickets = vec![ticket("OPS-1", "x", &["svcA"]), ticket("OPS-2", "y", &[])];

        let err = write_tickets(&inventory, &tickets, &mut NoopObserver).await.unwrap_err();

        assert!(matches!(err, SyncError::UnexpectedStatus { actual: 502, .. }));
        assert_eq!(inventory.tickets_created(), 1);
    }

    #[tokio::test]
    async fn test_ticket_without_summary_aborts_before_create() {
        let inventory = FakeInventory::new();
        let unnamed = TicketRecord {
            key: "OPS-7".to_string(),
            service: vec!["svcA".to_string()],
            ..Default::default()
        };
        let tickets = vec![ticket("OPS-1", "x", &[]), unnamed, ticket("OPS-8", "y", &[])];

        let err = write_tickets(&inventory, &tickets, &mut NoopObserver).await.unwrap_err();

        assert!(matches!(err, SyncError::MissingField { field: "summary", .. }));
        assert_eq!(inventory.calls(), vec![Call::CreateTicket("OPS-1: x".to_string())]);
    }

    #[tokio::test]
    async fn test_reset_failure_is_reported() {
        let inventory = FakeInventory::new().failing_delete(500);
        let err = reset_tickets(&inventory).await.unwrap_err();
        assert!(matches!(err, SyncError::UnexpectedStatus { actual: 500, .. }));
    }

    #[test]
    fn test_single_match_with_no_objects_is_malformed() {
        let lookup = ServiceLookup { total_count: 1, resource_uris: Vec::new() };
        assert!(matches!(lookup.single_match(), Err(SyncError::MalformedResponse { .. })));
    }

    #[test]
    fn test_relationship_wire_form() {
        let rel = Relationship::is_about("/api/v1/ticket/1/", "/api/v1/service/2/");
        assert_eq!(
            serde_json::to_value(&rel).unwrap(),
            serde_json::json!({
                "type": "Is_about",
                "start": "/api/v1/ticket/1/",
                "end": "/api/v1/service/2/"
            })
        );
    }
}
