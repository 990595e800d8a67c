//! Audit log entries recording ticket lifecycle events.
//!
//! Entries are append-only: once written they are never mutated or
//! deleted, and the exposed collection is ordered most recent first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Action label written when a ticket is created.
pub const ACTION_CREATED: &str = "Ticket Created";

/// Action label written when a ticket is assigned to an admin.
pub const ACTION_ASSIGNED: &str = "Ticket Assigned";

/// Action label written when a ticket is resolved.
pub const ACTION_RESOLVED: &str = "Ticket Resolved";

/// One immutable entry in the ticket audit log.
///
/// `ticket_id` is a soft reference: the log keeps entries for tickets that
/// no longer exist (or never did), so consumers must tolerate dangling
/// ids. The serialized form is the persisted `ticketLogs` document entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketLog {
    /// Unique entry id.
    pub id: String,
    /// Id of the ticket the entry refers to.
    pub ticket_id: String,
    /// What happened; lifecycle operations use the `ACTION_*` constants,
    /// free-form appends may use anything.
    pub action: String,
    /// User id or role label of whoever performed the action.
    pub performed_by: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Payload for appending an audit entry; the store stamps the id and
/// timestamp itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLogEntry {
    pub ticket_id: String,
    pub action: String,
    pub performed_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewLogEntry {
    pub fn new(
        ticket_id: impl Into<String>,
        action: impl Into<String>,
        performed_by: impl Into<String>,
    ) -> Self {
        Self {
            ticket_id: ticket_id.into(),
            action: action.into(),
            performed_by: performed_by.into(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
