//! Ticket domain types: the ticket record, its classification enums, and
//! the creation/update payloads accepted by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Classification enums
// ---------------------------------------------------------------------------

/// Lifecycle state of a [`Ticket`].
///
/// Assignment drives `Open` to `InProgress` and resolution drives
/// `InProgress` to `Resolved`. `Closed` is a legal stored value with no
/// dedicated operation; it is reachable only through an explicit status
/// patch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketStatus {
    #[default]
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    /// The storage label for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "Open",
            TicketStatus::InProgress => "In Progress",
            TicketStatus::Resolved => "Resolved",
            TicketStatus::Closed => "Closed",
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency of a [`Ticket`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketPriority {
    Low,
    Medium,
    High,
}

impl TicketPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketPriority::Low => "Low",
            TicketPriority::Medium => "Medium",
            TicketPriority::High => "High",
        }
    }
}

impl std::fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Broad category a [`Ticket`] is filed under.
///
/// Ordered by declaration so per-type breakdowns list categories in a
/// stable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IssueType {
    Hardware,
    Software,
    Network,
    Others,
}

impl IssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::Hardware => "Hardware",
            IssueType::Software => "Software",
            IssueType::Network => "Network",
            IssueType::Others => "Others",
        }
    }
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Ticket record
// ---------------------------------------------------------------------------

/// A support ticket.
///
/// `id`, `user_id`, and `created_at` never change after creation;
/// `updated_at` advances on every mutation. The serialized form is the
/// persisted `tickets` document entry: camelCase keys, optional fields
/// omitted when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Unique ticket id.
    pub id: String,
    pub subject: String,
    pub description: String,
    pub issue_type: IssueType,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    /// Id of the creating user, the owner for visibility purposes.
    pub user_id: String,
    /// Id of the handling admin; absent until assignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    /// Display name of the handling admin; absent until assignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Attachment file names only; no file bytes are retained.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,
    /// Closing summary, set at resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Creation payload
// ---------------------------------------------------------------------------

/// Payload for creating a [`Ticket`].
///
/// Deliberately carries no id, status, or timestamps: the store generates
/// the id, forces the initial status to [`TicketStatus::Open`], and stamps
/// both timestamps itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    pub subject: String,
    pub description: String,
    pub issue_type: IssueType,
    pub priority: TicketPriority,
    /// Id of the creating user.
    pub user_id: String,
    /// Attachment file names, if any were supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,
}

impl NewTicket {
    /// Build a creation payload with no attachments.
    pub fn new(
        subject: impl Into<String>,
        description: impl Into<String>,
        issue_type: IssueType,
        priority: TicketPriority,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            description: description.into(),
            issue_type,
            priority,
            user_id: user_id.into(),
            attachments: None,
        }
    }

    /// Attach a list of file names to the payload.
    pub fn with_attachments(mut self, names: Vec<String>) -> Self {
        self.attachments = Some(names);
        self
    }

    /// Check the required-field rules an intake form would enforce.
    ///
    /// The store itself trusts its caller and never runs these checks;
    /// embedders that accept untrusted input call this before handing the
    /// payload over.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule: subject, description, and reporter
    /// id must each contain at least one non-whitespace character.
    pub fn validate(&self) -> Result<(), NewTicketError> {
        if self.subject.trim().is_empty() {
            return Err(NewTicketError::EmptySubject);
        }
        if self.description.trim().is_empty() {
            return Err(NewTicketError::EmptyDescription);
        }
        if self.user_id.trim().is_empty() {
            return Err(NewTicketError::EmptyUserId);
        }
        Ok(())
    }
}

/// Validation failures for a [`NewTicket`] payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NewTicketError {
    /// The subject was empty or whitespace.
    #[error("ticket subject must not be empty")]
    EmptySubject,

    /// The description was empty or whitespace.
    #[error("ticket description must not be empty")]
    EmptyDescription,

    /// The reporter id was empty or whitespace.
    #[error("ticket reporter id must not be empty")]
    EmptyUserId,
}

// ---------------------------------------------------------------------------
// Update payload
// ---------------------------------------------------------------------------

/// A partial update merged over an existing [`Ticket`].
///
/// Only the fields that are set get written; everything else keeps its
/// current value. `Default` is the empty patch that changes nothing (the
/// store still advances `updated_at` when it applies one).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<IssueType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_notes: Option<String>,
}

impl TicketPatch {
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_issue_type(mut self, issue_type: IssueType) -> Self {
        self.issue_type = Some(issue_type);
        self
    }

    pub fn with_priority(mut self, priority: TicketPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set both assignee fields; they always travel together.
    pub fn with_assignee(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.assigned_to = Some(id.into());
        self.assigned_to_name = Some(name.into());
        self
    }

    pub fn with_attachments(mut self, names: Vec<String>) -> Self {
        self.attachments = Some(names);
        self
    }

    pub fn with_resolution_notes(mut self, notes: impl Into<String>) -> Self {
        self.resolution_notes = Some(notes.into());
        self
    }

    /// Merge the patch into `ticket`, consuming the patch.
    ///
    /// Does not touch `updated_at`; the store stamps that as part of the
    /// surrounding mutation.
    pub fn apply(self, ticket: &mut Ticket) {
        if let Some(subject) = self.subject {
            ticket.subject = subject;
        }
        if let Some(description) = self.description {
            ticket.description = description;
        }
        if let Some(issue_type) = self.issue_type {
            ticket.issue_type = issue_type;
        }
        if let Some(priority) = self.priority {
            ticket.priority = priority;
        }
        if let Some(status) = self.status {
            ticket.status = status;
        }
        if let Some(assigned_to) = self.assigned_to {
            ticket.assigned_to = Some(assigned_to);
        }
        if let Some(assigned_to_name) = self.assigned_to_name {
            ticket.assigned_to_name = Some(assigned_to_name);
        }
        if let Some(attachments) = self.attachments {
            ticket.attachments = Some(attachments);
        }
        if let Some(resolution_notes) = self.resolution_notes {
            ticket.resolution_notes = Some(resolution_notes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ticket() -> Ticket {
        let now = Utc::now();
        Ticket {
            id: "42".into(),
            subject: "Monitor flickers".into(),
            description: "External monitor flickers at 60Hz".into(),
            issue_type: IssueType::Hardware,
            priority: TicketPriority::Medium,
            status: TicketStatus::Open,
            user_id: "1".into(),
            assigned_to: None,
            assigned_to_name: None,
            created_at: now,
            updated_at: now,
            attachments: None,
            resolution_notes: None,
        }
    }

    #[test]
    fn status_labels_match_storage_format() {
        assert_eq!(
            serde_json::to_string(&TicketStatus::InProgress).expect("serialize should succeed"),
            "\"In Progress\""
        );
        assert_eq!(
            serde_json::to_string(&TicketStatus::Open).expect("serialize should succeed"),
            "\"Open\""
        );
        let status: TicketStatus =
            serde_json::from_str("\"In Progress\"").expect("deserialize should succeed");
        assert_eq!(status, TicketStatus::InProgress);
        assert_eq!(TicketStatus::InProgress.to_string(), "In Progress");
    }

    #[test]
    fn default_status_is_open() {
        assert_eq!(TicketStatus::default(), TicketStatus::Open);
    }

    #[test]
    fn priority_and_issue_type_labels() {
        assert_eq!(
            serde_json::to_string(&TicketPriority::High).expect("serialize should succeed"),
            "\"High\""
        );
        assert_eq!(
            serde_json::to_string(&IssueType::Others).expect("serialize should succeed"),
            "\"Others\""
        );
        assert_eq!(IssueType::Network.to_string(), "Network");
    }

    #[test]
    fn ticket_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(sample_ticket()).expect("serialize should succeed");
        assert!(json.get("issueType").is_some());
        assert!(json.get("userId").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("issue_type").is_none());
    }

    #[test]
    fn ticket_omits_absent_optional_fields() {
        let json = serde_json::to_value(sample_ticket()).expect("serialize should succeed");
        for key in ["assignedTo", "assignedToName", "attachments", "resolutionNotes"] {
            assert!(json.get(key).is_none(), "{key} should be omitted");
        }
    }

    #[test]
    fn ticket_serde_roundtrip_with_all_fields() {
        let mut ticket = sample_ticket();
        ticket.assigned_to = Some("2".into());
        ticket.assigned_to_name = Some("Admin User".into());
        ticket.attachments = Some(vec!["diag.log".into()]);
        ticket.resolution_notes = Some("Replaced cable".into());
        let json = serde_json::to_string(&ticket).expect("serialize should succeed");
        let back: Ticket = serde_json::from_str(&json).expect("deserialize should succeed");
        assert_eq!(back, ticket);
    }

    #[test]
    fn validate_accepts_complete_payload() {
        let new = NewTicket::new(
            "VPN fails",
            "Cannot reach the VPN gateway",
            IssueType::Network,
            TicketPriority::High,
            "3",
        );
        assert!(new.validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_required_fields() {
        let blank_subject = NewTicket::new("   ", "desc", IssueType::Others, TicketPriority::Low, "1");
        assert_eq!(blank_subject.validate(), Err(NewTicketError::EmptySubject));

        let blank_description =
            NewTicket::new("subject", "", IssueType::Others, TicketPriority::Low, "1");
        assert_eq!(
            blank_description.validate(),
            Err(NewTicketError::EmptyDescription)
        );

        let blank_user = NewTicket::new("subject", "desc", IssueType::Others, TicketPriority::Low, " ");
        assert_eq!(blank_user.validate(), Err(NewTicketError::EmptyUserId));
    }

    #[test]
    fn patch_merges_only_set_fields() {
        let mut ticket = sample_ticket();
        let before = ticket.clone();

        TicketPatch::default()
            .with_priority(TicketPriority::High)
            .with_status(TicketStatus::InProgress)
            .apply(&mut ticket);

        assert_eq!(ticket.priority, TicketPriority::High);
        assert_eq!(ticket.status, TicketStatus::InProgress);
        assert_eq!(ticket.subject, before.subject);
        assert_eq!(ticket.description, before.description);
        assert_eq!(ticket.user_id, before.user_id);
        assert_eq!(ticket.created_at, before.created_at);
        assert_eq!(ticket.updated_at, before.updated_at, "apply must not stamp");
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut ticket = sample_ticket();
        let before = ticket.clone();
        TicketPatch::default().apply(&mut ticket);
        assert_eq!(ticket, before);
    }

    #[test]
    fn patch_sets_both_assignee_fields_together() {
        let mut ticket = sample_ticket();
        TicketPatch::default()
            .with_assignee("2", "Admin User")
            .apply(&mut ticket);
        assert_eq!(ticket.assigned_to.as_deref(), Some("2"));
        assert_eq!(ticket.assigned_to_name.as_deref(), Some("Admin User"));
    }

    #[test]
    fn new_ticket_attachments_survive_serde() {
        let new = NewTicket::new("a", "b", IssueType::Software, TicketPriority::Low, "1")
            .with_attachments(vec!["screenshot.png".into()]);
        let json = serde_json::to_value(&new).expect("serialize should succeed");
        assert_eq!(json["attachments"][0], "screenshot.png");
        let back: NewTicket =
            serde_json::from_str(&json.to_string()).expect("deserialize should succeed");
        assert_eq!(back, new);
    }
}
