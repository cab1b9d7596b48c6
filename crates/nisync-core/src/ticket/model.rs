//! Ticket data models.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{SyncError, SyncResult};

pub const FIELD_SUMMARY: &str = "summary";
pub const FIELD_SERVICE: &str = "customfield_10286";
pub const FIELD_CONNECTION: &str = "customfield_10287";
pub const FIELD_EQUIPMENT: &str = "customfield_10288";
pub const FIELD_VERSION: &str = "customfield_10289";
pub const FIELD_SITE: &str = "customfield_10290";
pub const FIELD_ESCALATED_TO: &str = "customfield_10292";
pub const FIELD_AFFECTED_ORGS: &str = "customfield_10294";

/// Fields requested from the search endpoint.
pub const SEARCH_FIELDS: [&str; 8] = [
    FIELD_SUMMARY,
    FIELD_SERVICE,
    FIELD_CONNECTION,
    FIELD_EQUIPMENT,
    FIELD_VERSION,
    FIELD_SITE,
    FIELD_ESCALATED_TO,
    FIELD_AFFECTED_ORGS,
];

/// An issue as returned by the tracker's search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawIssue {
    pub key: String,
    #[serde(default)]
    pub fields: RawFields,
}

/// The subset of issue fields nisync reads. `null` and absent both map to `None`.
///
/// `service` must be a string since it is split into names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFields {
    pub summary: Option<String>,
    #[serde(rename = "customfield_10286")]
    pub service: Option<String>,
    #[serde(rename = "customfield_10287", default, deserialize_with = "passthrough")]
    pub connection: Option<String>,
    #[serde(rename = "customfield_10288", default, deserialize_with = "passthrough")]
    pub equipment: Option<String>,
    #[serde(rename = "customfield_10289", default, deserialize_with = "passthrough")]
    pub version: Option<String>,
    #[serde(rename = "customfield_10290", default, deserialize_with = "passthrough")]
    pub site: Option<String>,
    #[serde(rename = "customfield_10292", default, deserialize_with = "passthrough")]
    pub escalated_to: Option<String>,
    #[serde(rename = "customfield_10294", default, deserialize_with = "passthrough")]
    pub affected_orgs: Option<String>,
}

/// Accept any JSON value for a passthrough attribute.
///
/// Strings are kept as-is; select, multi-select and other structured values
/// are kept as their compact JSON text. `null` means absent.
fn passthrough<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Normalized ticket derived from a [`RawIssue`].
///
/// Absent optional attributes are left out of the serialized form entirely.
/// `service` is always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRecord {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub service: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalated_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_orgs: Option<String>,
}

impl TicketRecord {
    /// Name given to the ticket's inventory node, `"<key>: <summary>"`.
    ///
    /// A ticket without a summary cannot be named and aborts the run.
    pub fn display_name(&self) -> SyncResult<String> {
        match &self.summary {
            Some(summary) => Ok(format!("{}: {}", self.key, summary)),
            None => Err(SyncError::MissingField {
                key: self.key.clone(),
                field: "summary",
            }),
        }
    }
}
