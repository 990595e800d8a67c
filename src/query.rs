//! Read-side helpers: list filtering and dashboard counters.
//!
//! Nothing here mutates or caches anything; results are derived from the
//! ticket collection on every call.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::ticket::{IssueType, Ticket, TicketPriority, TicketStatus};

/// Criteria for narrowing a ticket list.
///
/// Unset fields match every ticket, so the default filter matches all.
/// `search` is a case-insensitive substring match over subject and
/// description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketFilter {
    pub search: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub issue_type: Option<IssueType>,
    pub user_id: Option<String>,
}

impl TicketFilter {
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: TicketPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_issue_type(mut self, issue_type: IssueType) -> Self {
        self.issue_type = Some(issue_type);
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Whether `ticket` satisfies every set criterion.
    pub fn matches(&self, ticket: &Ticket) -> bool {
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            if !ticket.subject.to_lowercase().contains(&term)
                && !ticket.description.to_lowercase().contains(&term)
            {
                return false;
            }
        }
        if self.status.is_some_and(|s| s != ticket.status) {
            return false;
        }
        if self.priority.is_some_and(|p| p != ticket.priority) {
            return false;
        }
        if self.issue_type.is_some_and(|t| t != ticket.issue_type) {
            return false;
        }
        if self.user_id.as_deref().is_some_and(|u| u != ticket.user_id) {
            return false;
        }
        true
    }
}

/// Dashboard counters over a set of tickets.
///
/// `resolved` counts both `Resolved` and `Closed` tickets; the dashboard
/// buckets finished work together.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub high_priority: usize,
    /// Distinct users that created at least one ticket.
    pub reporters: usize,
    /// Ticket count per issue type, keyed in declaration order.
    pub by_issue_type: BTreeMap<IssueType, usize>,
}

impl TicketStats {
    /// Tallies counters over the given tickets.
    pub fn collect<'a, I>(tickets: I) -> Self
    where
        I: IntoIterator<Item = &'a Ticket>,
    {
        let mut stats = Self::default();
        let mut reporters = HashSet::new();

        for ticket in tickets {
            stats.total += 1;
            match ticket.status {
                TicketStatus::Open => stats.open += 1,
                TicketStatus::InProgress => stats.in_progress += 1,
                TicketStatus::Resolved | TicketStatus::Closed => stats.resolved += 1,
            }
            if ticket.priority == TicketPriority::High {
                stats.high_priority += 1;
            }
            reporters.insert(ticket.user_id.as_str());
            *stats.by_issue_type.entry(ticket.issue_type).or_default() += 1;
        }

        stats.reporters = reporters.len();
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn ticket(
        id: &str,
        subject: &str,
        issue_type: IssueType,
        priority: TicketPriority,
        status: TicketStatus,
        user_id: &str,
    ) -> Ticket {
        let now = Utc::now();
        Ticket {
            id: id.into(),
            subject: subject.into(),
            description: format!("description of {subject}"),
            issue_type,
            priority,
            status,
            user_id: user_id.into(),
            assigned_to: None,
            assigned_to_name: None,
            created_at: now,
            updated_at: now,
            attachments: None,
            resolution_notes: None,
        }
    }

    fn fixture() -> Vec<Ticket> {
        vec![
            ticket(
                "1",
                "Laptop battery drains",
                IssueType::Hardware,
                TicketPriority::High,
                TicketStatus::Open,
                "1",
            ),
            ticket(
                "2",
                "Spreadsheet macro error",
                IssueType::Software,
                TicketPriority::Medium,
                TicketStatus::InProgress,
                "3",
            ),
            ticket(
                "3",
                "VPN unreachable from home",
                IssueType::Network,
                TicketPriority::High,
                TicketStatus::Resolved,
                "1",
            ),
            ticket(
                "4",
                "Desk phone crackles",
                IssueType::Others,
                TicketPriority::Low,
                TicketStatus::Closed,
                "3",
            ),
        ]
    }

    #[test]
    fn default_filter_matches_everything() {
        let tickets = fixture();
        let filter = TicketFilter::default();
        assert!(tickets.iter().all(|t| filter.matches(t)));
    }

    #[test]
    fn search_is_case_insensitive_over_subject_and_description() {
        let tickets = fixture();

        let by_subject = TicketFilter::default().with_search("LAPTOP");
        assert!(by_subject.matches(&tickets[0]));
        assert!(!by_subject.matches(&tickets[1]));

        // "description of Spreadsheet macro error" matches on description.
        let by_description = TicketFilter::default().with_search("macro");
        assert!(by_description.matches(&tickets[1]));
    }

    #[test]
    fn single_field_filters_narrow_correctly() {
        let tickets = fixture();

        let open = TicketFilter::default().with_status(TicketStatus::Open);
        assert_eq!(tickets.iter().filter(|t| open.matches(t)).count(), 1);

        let high = TicketFilter::default().with_priority(TicketPriority::High);
        assert_eq!(tickets.iter().filter(|t| high.matches(t)).count(), 2);

        let network = TicketFilter::default().with_issue_type(IssueType::Network);
        assert_eq!(tickets.iter().filter(|t| network.matches(t)).count(), 1);

        let by_user = TicketFilter::default().with_user_id("3");
        assert_eq!(tickets.iter().filter(|t| by_user.matches(t)).count(), 2);
    }

    #[test]
    fn combined_criteria_are_conjunctive() {
        let tickets = fixture();
        let filter = TicketFilter::default()
            .with_priority(TicketPriority::High)
            .with_status(TicketStatus::Resolved);

        let matching: Vec<_> = tickets.iter().filter(|t| filter.matches(t)).collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].id, "3");
    }

    #[test]
    fn stats_tally_all_counters() {
        let tickets = fixture();
        let stats = TicketStats::collect(&tickets);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.open, 1);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.resolved, 2, "Resolved and Closed count together");
        assert_eq!(stats.high_priority, 2);
        assert_eq!(stats.reporters, 2);
    }

    #[test]
    fn stats_break_down_by_issue_type() {
        let tickets = fixture();
        let stats = TicketStats::collect(&tickets);

        assert_eq!(stats.by_issue_type[&IssueType::Hardware], 1);
        assert_eq!(stats.by_issue_type[&IssueType::Software], 1);
        assert_eq!(stats.by_issue_type[&IssueType::Network], 1);
        assert_eq!(stats.by_issue_type[&IssueType::Others], 1);
    }

    #[test]
    fn stats_over_no_tickets_are_all_zero() {
        let stats = TicketStats::collect(std::iter::empty());
        assert_eq!(stats, TicketStats::default());
    }
}
