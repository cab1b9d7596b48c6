//! Inventory REST client.
//!
//! Every call checks the response status against the single code (or pair,
//! for the bulk delete) it accepts; anything else is returned as a fatal
//! [`SyncError::UnexpectedStatus`].

use async_trait::async_trait;
use reqwest::header::{HeaderMap, LOCATION};
use reqwest::{Request, Response};
use tracing::debug;

use nisync_core::inventory::{TICKET_META_TYPE, TICKET_NODE_TYPE};
use nisync_core::{
    decode_json, expect_status, ConfigError, Inventory, Relationship, ServiceConfig, ServiceLookup, SyncError,
    SyncResult,
};

use crate::auth::ApiKeyAuth;
use crate::wire::{NewTicketNode, NodeName, ServiceList};

pub const TICKET_PATH: &str = "/api/v1/ticket/";
pub const SERVICE_PATH: &str = "/api/v1/service/";
pub const RELATIONSHIP_PATH: &str = "/api/v1/relationship/";

const DELETE_TICKETS: &str = "delete tickets";
const CREATE_TICKET: &str = "create ticket";
const FIND_SERVICE: &str = "find service";
const CREATE_RELATIONSHIP: &str = "create relationship";

/// Client for the inventory's node and relationship endpoints.
#[derive(Clone)]
pub struct InventoryClient {
    base_url: String,
    auth: ApiKeyAuth,
    client: reqwest::Client,
}

impl InventoryClient {
    /// Create a client for the configured inventory.
    pub fn new(config: &ServiceConfig) -> SyncResult<Self> {
        let auth = ApiKeyAuth::new(&config.user, &config.password)
            .map_err(|_| ConfigError::InvalidCredential("inventory credentials"))?;

        let client = reqwest::Client::builder()
            .user_agent(concat!("nisync/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth,
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn delete_tickets_request(&self) -> reqwest::Result<Request> {
        self.auth.apply(self.client.delete(self.url(TICKET_PATH))).build()
    }

    pub fn create_ticket_request(&self, name: &str) -> reqwest::Result<Request> {
        let body = NewTicketNode {
            node_type: TICKET_NODE_TYPE,
            node_meta_type: TICKET_META_TYPE,
            node: NodeName { name },
        };
        self.auth
            .apply(self.client.post(self.url(TICKET_PATH)))
            .json(&body)
            .build()
    }

    pub fn find_service_request(&self, name: &str) -> reqwest::Result<Request> {
        self.auth
            .apply(self.client.get(self.url(SERVICE_PATH)))
            .query(&[("node_name", name)])
            .build()
    }

    pub fn create_relationship_request(&self, relationship: &Relationship) -> reqwest::Result<Request> {
        self.auth
            .apply(self.client.post(self.url(RELATIONSHIP_PATH)))
            .json(relationship)
            .build()
    }

    /// Send a built request and check its status.
    async fn send(
        &self,
        operation: &'static str,
        request: reqwest::Result<Request>,
        expected: &'static [u16],
    ) -> SyncResult<Response> {
        let request = request.map_err(|e| SyncError::transport(operation, e))?;
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| SyncError::transport(operation, e))?;

        let status = response.status().as_u16();
        debug!(operation, status, "Inventory response");
        expect_status(operation, status, expected)?;
        Ok(response)
    }
}

/// Read the created node's path from the headers of a `201 Created` response.
pub fn created_location(headers: &HeaderMap) -> SyncResult<String> {
    headers
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .ok_or(SyncError::MissingHeader {
            operation: CREATE_TICKET,
            header: "Location",
        })
}

fn service_lookup(body: &[u8]) -> SyncResult<ServiceLookup> {
    let list: ServiceList = decode_json(FIND_SERVICE, body)?;
    Ok(ServiceLookup {
        total_count: list.meta.total_count,
        resource_uris: list.objects.into_iter().map(|o| o.resource_uri).collect(),
    })
}

#[async_trait]
impl Inventory for InventoryClient {
    async fn delete_all_tickets(&self) -> SyncResult<()> {
        self.send(DELETE_TICKETS, self.delete_tickets_request(), &[200, 204])
            .await?;
        Ok(())
    }

    async fn create_ticket(&self, name: &str) -> SyncResult<String> {
        let response = self
            .send(CREATE_TICKET, self.create_ticket_request(name), &[201])
            .await?;
        created_location(response.headers())
    }

    async fn find_service(&self, name: &str) -> SyncResult<ServiceLookup> {
        let response = self
            .send(FIND_SERVICE, self.find_service_request(name), &[200])
            .await?;

        let body = response
            .bytes()
            .await
            .map_err(|e| SyncError::transport(FIND_SERVICE, e))?;
        service_lookup(&body)
    }

    async fn create_relationship(&self, relationship: &Relationship) -> SyncResult<()> {
        self.send(
            CREATE_RELATIONSHIP,
            self.create_relationship_request(relationship),
            &[201],
        )
        .await?;
        Ok(())
    }
}
