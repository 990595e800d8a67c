//! Session store: roster-checked login and the persisted current identity.

use std::io;

use crate::storage::{CURRENT_USER_KEY, Storage};
use crate::user::User;

/// One login entry in the fixed credential roster.
///
/// The password lives beside the profile, never inside it, so a persisted
/// or returned [`User`] structurally cannot leak one.
#[derive(Debug, Clone)]
pub struct Credential {
    /// Login name, matched case-sensitively.
    pub username: String,
    /// Plaintext password, matched case-sensitively. The roster is a
    /// compiled-in demo fixture, not a real credential store.
    pub password: String,
    /// Profile handed out (and persisted) on a successful login.
    pub user: User,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>, user: User) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            user,
        }
    }
}

/// Validates logins against a fixed roster and remembers the current
/// authenticated identity across restarts.
///
/// The identity is persisted under the `currentUser` key on login, removed
/// on logout, and restored verbatim when the store is opened. Restoration
/// trusts the persisted copy; nothing is re-verified against the roster.
#[derive(Debug)]
pub struct SessionStore {
    storage: Storage,
    roster: Vec<Credential>,
    current: Option<User>,
}

impl SessionStore {
    /// Opens the session store, restoring any persisted identity.
    ///
    /// A missing or corrupt `currentUser` document simply yields an
    /// unauthenticated session.
    ///
    /// # Errors
    ///
    /// Returns `std::io::Error` if the persisted identity cannot be read
    /// for a reason other than being absent.
    pub fn open(storage: Storage, roster: Vec<Credential>) -> io::Result<Self> {
        let current = storage.read::<User>(CURRENT_USER_KEY)?;
        if let Some(user) = &current {
            tracing::debug!(user_id = %user.id, username = %user.username, "session restored");
        }
        Ok(Self {
            storage,
            roster,
            current,
        })
    }

    /// Attempts a login with the given username and password.
    ///
    /// On a match the profile becomes the current identity and is
    /// persisted. On a mismatch nothing changes; an unknown username and a
    /// wrong password are deliberately indistinguishable to the caller.
    ///
    /// # Returns
    ///
    /// `true` when the credentials matched a roster entry.
    ///
    /// # Errors
    ///
    /// Returns `std::io::Error` if persisting the identity fails; the
    /// in-memory session is left unchanged in that case.
    pub fn login(&mut self, username: &str, password: &str) -> io::Result<bool> {
        let Some(found) = self
            .roster
            .iter()
            .find(|c| c.username == username && c.password == password)
        else {
            tracing::debug!(username, "login rejected");
            return Ok(false);
        };

        let user = found.user.clone();
        self.storage.write(CURRENT_USER_KEY, &user)?;
        tracing::debug!(user_id = %user.id, role = %user.role, "login accepted");
        self.current = Some(user);
        Ok(true)
    }

    /// Ends the current session, removing the persisted identity.
    ///
    /// Logging out while not logged in is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `std::io::Error` if removing the persisted identity fails.
    pub fn logout(&mut self) -> io::Result<()> {
        self.storage.remove(CURRENT_USER_KEY)?;
        if let Some(user) = self.current.take() {
            tracing::debug!(user_id = %user.id, "session ended");
        }
        Ok(())
    }

    /// The currently authenticated user, if any.
    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// Whether a user is currently logged in.
    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }
}
