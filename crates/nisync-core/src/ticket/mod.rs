//! Ticket domain: raw issues from the tracker and the records derived from them.

pub mod model;
pub mod projector;

pub use model::{RawFields, RawIssue, TicketRecord, SEARCH_FIELDS};
pub use projector::{project_issue, project_issues, split_services};
