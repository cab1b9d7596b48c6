//! Request and response bodies of the inventory REST API.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/ticket/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTicketNode<'a> {
    pub node_type: &'a str,
    pub node_meta_type: &'a str,
    pub node: NodeName<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeName<'a> {
    pub name: &'a str,
}

/// Body of `GET /api/v1/service/?node_name=...`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceList {
    pub meta: ListMeta,
    #[serde(default)]
    pub objects: Vec<ServiceObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListMeta {
    pub total_count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceObject {
    pub resource_uri: String,
}
