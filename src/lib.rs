//! Embeddable single-tenant IT helpdesk core.
//!
//! Two stores carry the whole system: [`SessionStore`] validates logins
//! against a fixed credential roster and remembers the authenticated
//! identity, and [`TicketStore`] owns the ticket collection plus its
//! append-only audit log. Both persist synchronously as JSON documents
//! under one [`Storage`] directory and restore from it on open.
//!
//! There is no server and no background work: callers hold the stores
//! directly, every operation runs to completion before returning, and
//! state is written through on each change.

mod audit;
pub use audit::{ACTION_ASSIGNED, ACTION_CREATED, ACTION_RESOLVED, NewLogEntry, TicketLog};
mod query;
pub use query::{TicketFilter, TicketStats};
mod seed;
pub use seed::{demo_roster, demo_tickets};
mod session;
pub use session::{Credential, SessionStore};
mod storage;
pub use storage::{CURRENT_USER_KEY, Storage, TICKETS_KEY, TICKET_LOGS_KEY};
mod store;
pub use store::TicketStore;
mod ticket;
pub use ticket::{
    IssueType, NewTicket, NewTicketError, Ticket, TicketPatch, TicketPriority, TicketStatus,
};
mod user;
pub use user::{User, UserRole};
