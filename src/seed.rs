//! Compiled-in demo fixtures: the credential roster and the first-run
//! ticket set.
//!
//! Ticket timestamps are relative to the moment the fixtures are built, so
//! a freshly seeded store always looks recently used.

use chrono::{Duration, Utc};

use crate::session::Credential;
use crate::ticket::{IssueType, Ticket, TicketPriority, TicketStatus};
use crate::user::{User, UserRole};

/// The fixed login roster: two clients and one admin.
pub fn demo_roster() -> Vec<Credential> {
    let now = Utc::now();
    vec![
        Credential::new(
            "john.doe",
            "password123",
            User {
                id: "1".into(),
                username: "john.doe".into(),
                email: "john.doe@company.com".into(),
                role: UserRole::Client,
                department: Some("Marketing".into()),
                created_at: now,
            },
        ),
        Credential::new(
            "admin",
            "admin123",
            User {
                id: "2".into(),
                username: "admin".into(),
                email: "admin@company.com".into(),
                role: UserRole::Admin,
                department: Some("IT".into()),
                created_at: now,
            },
        ),
        Credential::new(
            "jane.smith",
            "password123",
            User {
                id: "3".into(),
                username: "jane.smith".into(),
                email: "jane.smith@company.com".into(),
                role: UserRole::Client,
                department: Some("Finance".into()),
                created_at: now,
            },
        ),
    ]
}

/// The three tickets a fresh store is seeded with.
///
/// Fixture order is kept as-is; tickets created afterwards are prepended
/// in front of these.
pub fn demo_tickets() -> Vec<Ticket> {
    let now = Utc::now();
    vec![
        Ticket {
            id: "1".into(),
            subject: "Computer won't start".into(),
            description: "My computer is not turning on when I press the power button. \
                          The LED light is not showing."
                .into(),
            issue_type: IssueType::Hardware,
            priority: TicketPriority::High,
            status: TicketStatus::Open,
            user_id: "1".into(),
            assigned_to: None,
            assigned_to_name: None,
            created_at: now - Duration::days(2),
            updated_at: now - Duration::days(2),
            attachments: None,
            resolution_notes: None,
        },
        Ticket {
            id: "2".into(),
            subject: "Outlook email sync issues".into(),
            description: "Emails are not syncing properly in Outlook. \
                          Some emails from yesterday are missing."
                .into(),
            issue_type: IssueType::Software,
            priority: TicketPriority::Medium,
            status: TicketStatus::InProgress,
            user_id: "3".into(),
            assigned_to: Some("2".into()),
            assigned_to_name: Some("Admin User".into()),
            created_at: now - Duration::days(1),
            updated_at: now - Duration::hours(12),
            attachments: None,
            resolution_notes: None,
        },
        Ticket {
            id: "3".into(),
            subject: "Wi-Fi connection dropping".into(),
            description: "Internet connection keeps dropping every few minutes. \
                          Need to reconnect manually."
                .into(),
            issue_type: IssueType::Network,
            priority: TicketPriority::Medium,
            status: TicketStatus::Open,
            user_id: "1".into(),
            assigned_to: None,
            assigned_to_name: None,
            created_at: now - Duration::hours(6),
            updated_at: now - Duration::hours(6),
            attachments: None,
            resolution_notes: None,
        },
    ]
}
