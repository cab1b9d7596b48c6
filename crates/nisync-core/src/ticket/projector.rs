//! Projection of raw tracker issues into ticket records.

use super::model::{RawIssue, TicketRecord};

/// Split a comma-separated service list, trimming each entry.
///
/// Empty entries are kept, so `""` yields `[""]` and `"a,,b"` yields
/// `["a", "", "b"]`.
pub fn split_services(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}

/// Project one raw issue into a ticket record.
pub fn project_issue(issue: RawIssue) -> TicketRecord {
    let fields = issue.fields;

    TicketRecord {
        key: issue.key,
        summary: fields.summary,
        service: fields
            .service
            .as_deref()
            .map(split_services)
            .unwrap_or_default(),
        connection: fields.connection,
        equipment: fields.equipment,
        version: fields.version,
        site: fields.site,
        escalated_to: fields.escalated_to,
        affected_orgs: fields.affected_orgs,
    }
}

/// Project every issue, preserving order.
pub fn project_issues(issues: Vec<RawIssue>) -> Vec<TicketRecord> {
    issues.into_iter().map(project_issue).collect()
}
