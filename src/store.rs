//! The ticket store: owns the ticket collection and the append-only audit
//! log, and is the only writer of either.
//!
//! Every mutation updates in-memory state and synchronously writes the
//! affected collection back through [`Storage`] before returning. There is
//! no background work and no caching layer; what the store holds is what
//! the storage directory holds.

use std::io;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::audit::{ACTION_ASSIGNED, ACTION_CREATED, ACTION_RESOLVED, NewLogEntry, TicketLog};
use crate::query::{TicketFilter, TicketStats};
use crate::seed::demo_tickets;
use crate::storage::{Storage, TICKETS_KEY, TICKET_LOGS_KEY};
use crate::ticket::{NewTicket, Ticket, TicketPatch, TicketStatus};
use crate::user::User;

/// Resolution text stored on the ticket when the resolver supplied none.
const DEFAULT_RESOLUTION_NOTES: &str = "Ticket resolved by admin";

/// Audit note written for a resolution without explicit notes.
const DEFAULT_RESOLUTION_LOG_NOTES: &str = "Ticket marked as resolved";

/// Actor label written for a resolution without an explicit resolver.
const DEFAULT_RESOLVER: &str = "admin";

/// Owns the ticket collection and the append-only audit log.
///
/// Both collections are kept most-recent-first and written through to
/// storage on every change. The design assumes one store instance per
/// storage directory; if several instances share a directory anyway, the
/// last writer wins.
#[derive(Debug)]
pub struct TicketStore {
    storage: Storage,
    tickets: Vec<Ticket>,
    logs: Vec<TicketLog>,
}

impl TicketStore {
    /// Opens the store, seeding the demo ticket set on first run.
    ///
    /// Equivalent to [`open_with_seed`](TicketStore::open_with_seed) with
    /// [`demo_tickets`](crate::demo_tickets) as the seed.
    ///
    /// # Errors
    ///
    /// Returns `std::io::Error` if loading or persisting a collection
    /// fails.
    pub fn open(storage: Storage) -> io::Result<Self> {
        Self::open_with_seed(storage, demo_tickets())
    }

    /// Opens the store with a caller-chosen first-run seed.
    ///
    /// Loads the persisted collections from storage. A missing or
    /// unreadable `tickets` document is replaced by `seed`; a missing or
    /// unreadable log document starts empty. Both collections are written
    /// back immediately, so the storage directory reflects the store from
    /// its first moment.
    ///
    /// # Errors
    ///
    /// Returns `std::io::Error` if loading or persisting a collection
    /// fails.
    pub fn open_with_seed(storage: Storage, seed: Vec<Ticket>) -> io::Result<Self> {
        let tickets = storage.read::<Vec<Ticket>>(TICKETS_KEY)?.unwrap_or(seed);
        let logs = storage
            .read::<Vec<TicketLog>>(TICKET_LOGS_KEY)?
            .unwrap_or_default();

        let store = Self {
            storage,
            tickets,
            logs,
        };
        store.persist_tickets()?;
        store.persist_logs()?;

        tracing::debug!(
            tickets = store.tickets.len(),
            logs = store.logs.len(),
            "ticket store opened"
        );
        Ok(store)
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// All tickets, most recently created first.
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// All audit entries, most recent first.
    pub fn logs(&self) -> &[TicketLog] {
        &self.logs
    }

    /// Looks up a ticket by id.
    pub fn ticket(&self, id: &str) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    /// Audit entries naming the given ticket, most recent first.
    pub fn logs_for(&self, ticket_id: &str) -> Vec<&TicketLog> {
        self.logs
            .iter()
            .filter(|l| l.ticket_id == ticket_id)
            .collect()
    }

    /// Tickets matching `filter`, in collection order.
    pub fn filter(&self, filter: &TicketFilter) -> Vec<&Ticket> {
        self.tickets.iter().filter(|t| filter.matches(t)).collect()
    }

    /// Tickets the given user may see: admins see everything, clients only
    /// the tickets they created.
    pub fn visible_to(&self, user: &User) -> Vec<&Ticket> {
        self.tickets
            .iter()
            .filter(|t| user.role.is_admin() || t.user_id == user.id)
            .collect()
    }

    /// Dashboard counters over the whole collection.
    pub fn stats(&self) -> TicketStats {
        TicketStats::collect(&self.tickets)
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Creates a ticket from `new`, prepending it to the collection.
    ///
    /// The store assigns a fresh id, forces the initial status to
    /// [`TicketStatus::Open`], stamps both timestamps with the same
    /// instant, and appends a "Ticket Created" audit entry performed by
    /// the creating user. Payload content is trusted; callers accepting
    /// untrusted input run [`NewTicket::validate`] first.
    ///
    /// # Returns
    ///
    /// The stored ticket, including the generated id.
    ///
    /// # Errors
    ///
    /// Returns `std::io::Error` if writing either collection fails.
    pub fn create_ticket(&mut self, new: NewTicket) -> io::Result<Ticket> {
        let now = Utc::now();
        let ticket = Ticket {
            id: Uuid::new_v4().to_string(),
            subject: new.subject,
            description: new.description,
            issue_type: new.issue_type,
            priority: new.priority,
            status: TicketStatus::Open,
            user_id: new.user_id,
            assigned_to: None,
            assigned_to_name: None,
            created_at: now,
            updated_at: now,
            attachments: new.attachments,
            resolution_notes: None,
        };

        self.tickets.insert(0, ticket.clone());
        self.persist_tickets()?;
        tracing::debug!(ticket_id = %ticket.id, user_id = %ticket.user_id, "ticket created");

        self.add_log(NewLogEntry::new(&ticket.id, ACTION_CREATED, &ticket.user_id))?;
        Ok(ticket)
    }

    /// Merges `patch` over the ticket with the given id.
    ///
    /// An unknown id is a silent no-op: nothing changes, nothing is
    /// persisted, and no error is signaled. On a match only the fields set
    /// in the patch are written, and `updated_at` advances strictly past
    /// its previous value. No audit entry is appended; lifecycle
    /// operations that want one add it themselves.
    ///
    /// # Errors
    ///
    /// Returns `std::io::Error` if writing the ticket collection fails.
    pub fn update_ticket(&mut self, id: &str, patch: TicketPatch) -> io::Result<()> {
        let Some(ticket) = self.tickets.iter_mut().find(|t| t.id == id) else {
            tracing::debug!(ticket_id = %id, "update ignored, no such ticket");
            return Ok(());
        };

        let previous = ticket.updated_at;
        patch.apply(ticket);
        ticket.updated_at = next_timestamp(previous);

        self.persist_tickets()?;
        tracing::debug!(ticket_id = %id, "ticket updated");
        Ok(())
    }

    /// Assigns a ticket to an admin, moving it to
    /// [`TicketStatus::InProgress`].
    ///
    /// Appends a "Ticket Assigned" audit entry performed by the assignee,
    /// noting the assignee's display name. The entry is appended even when
    /// the id matches no ticket; audit references are soft and may dangle.
    ///
    /// # Arguments
    ///
    /// * `id` - Ticket to assign.
    /// * `assigned_to` - User id of the handling admin.
    /// * `assigned_to_name` - Display name of the handling admin.
    ///
    /// # Errors
    ///
    /// Returns `std::io::Error` if writing either collection fails.
    pub fn assign_ticket(
        &mut self,
        id: &str,
        assigned_to: &str,
        assigned_to_name: &str,
    ) -> io::Result<()> {
        self.update_ticket(
            id,
            TicketPatch::default()
                .with_assignee(assigned_to, assigned_to_name)
                .with_status(TicketStatus::InProgress),
        )?;
        self.add_log(
            NewLogEntry::new(id, ACTION_ASSIGNED, assigned_to)
                .with_notes(format!("Assigned to {assigned_to_name}")),
        )
    }

    /// Resolves a ticket, moving it to [`TicketStatus::Resolved`].
    ///
    /// Stores `resolution_notes` on the ticket (falling back to a stock
    /// phrase) and appends a "Ticket Resolved" audit entry. A missing
    /// `resolved_by` is recorded as `"admin"`. As with assignment, the
    /// audit entry is appended even when the id matches no ticket.
    ///
    /// # Arguments
    ///
    /// * `id` - Ticket to resolve.
    /// * `resolution_notes` - Closing summary, or `None` for the default.
    /// * `resolved_by` - User id of the resolver, or `None` for the
    ///   default actor label.
    ///
    /// # Errors
    ///
    /// Returns `std::io::Error` if writing either collection fails.
    pub fn resolve_ticket(
        &mut self,
        id: &str,
        resolution_notes: Option<&str>,
        resolved_by: Option<&str>,
    ) -> io::Result<()> {
        self.update_ticket(
            id,
            TicketPatch::default()
                .with_status(TicketStatus::Resolved)
                .with_resolution_notes(resolution_notes.unwrap_or(DEFAULT_RESOLUTION_NOTES)),
        )?;
        self.add_log(
            NewLogEntry::new(id, ACTION_RESOLVED, resolved_by.unwrap_or(DEFAULT_RESOLVER))
                .with_notes(resolution_notes.unwrap_or(DEFAULT_RESOLUTION_LOG_NOTES)),
        )
    }

    /// Appends an audit entry with a fresh id and the current timestamp.
    ///
    /// Entries go to the front of the log and are never mutated or removed
    /// afterwards. The named ticket does not have to exist.
    ///
    /// # Errors
    ///
    /// Returns `std::io::Error` if writing the log fails.
    pub fn add_log(&mut self, entry: NewLogEntry) -> io::Result<()> {
        let log = TicketLog {
            id: Uuid::new_v4().to_string(),
            ticket_id: entry.ticket_id,
            action: entry.action,
            performed_by: entry.performed_by,
            timestamp: Utc::now(),
            notes: entry.notes,
        };
        tracing::debug!(ticket_id = %log.ticket_id, action = %log.action, "audit entry appended");

        self.logs.insert(0, log);
        self.persist_logs()
    }

    /// Reloads the ticket collection from storage.
    ///
    /// Discards the in-memory tickets in favor of the persisted document.
    /// When no persisted document is readable the in-memory collection is
    /// kept as-is. With write-through persistence this is a reconciliation
    /// hook for storage directories modified behind the store's back.
    ///
    /// # Errors
    ///
    /// Returns `std::io::Error` if reading the document fails for a reason
    /// other than being absent.
    pub fn refresh_tickets(&mut self) -> io::Result<()> {
        if let Some(tickets) = self.storage.read::<Vec<Ticket>>(TICKETS_KEY)? {
            self.tickets = tickets;
            tracing::debug!(tickets = self.tickets.len(), "ticket collection refreshed");
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    fn persist_tickets(&self) -> io::Result<()> {
        self.storage.write(TICKETS_KEY, &self.tickets)
    }

    fn persist_logs(&self) -> io::Result<()> {
        self.storage.write(TICKET_LOGS_KEY, &self.logs)
    }
}

/// Next value for a ticket's `updated_at`.
///
/// The wall clock can return the same reading for two back-to-back
/// mutations; `updated_at` must still advance strictly so last-modified
/// ordering never ties.
fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}
