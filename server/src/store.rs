//! In-memory user store with store-assigned sequential ids.
//!
//! # Design
//! The store is the sole owner of all records. Ids come from a monotonic
//! counter starting at 1 and are never reused, even after deletion, so a
//! deleted id stays dead for the lifetime of the process. Records are kept
//! in a `Vec` because `list` must return insertion order; lookups are a
//! linear scan, which is fine at this scale.
//!
//! The store itself is not synchronized. Handlers wrap it in
//! `Arc<RwLock<_>>` and take the write guard for every mutating operation.

use serde::{Deserialize, Serialize};

/// A stored user record. The id is assigned by the store and immutable.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
}

/// Request payload for creating or updating a user.
///
/// Carries only the mutable fields. A client-supplied `id` in the JSON body
/// is an unknown field to serde and silently ignored.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
}

/// Authoritative in-memory collection of users for one process.
#[derive(Debug)]
pub struct UserStore {
    users: Vec<User>,
    next_id: u64,
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            next_id: 1,
        }
    }

    /// All users in insertion order.
    pub fn list(&self) -> Vec<User> {
        self.users.clone()
    }

    /// Look up a user by id. `None` means not found.
    pub fn get(&self, id: u64) -> Option<User> {
        self.users.iter().find(|u| u.id == id).cloned()
    }

    /// Assign the next id, append the record, and return the stored copy.
    pub fn create(&mut self, payload: UserPayload) -> User {
        let user = User {
            id: self.next_id,
            name: payload.name,
            email: payload.email,
        };
        self.next_id += 1;
        self.users.push(user.clone());
        user
    }

    /// Overwrite name and email of an existing record in place. The id is
    /// unchanged. `None` means not found; the collection is untouched then.
    pub fn update(&mut self, id: u64, payload: UserPayload) -> Option<User> {
        let user = self.users.iter_mut().find(|u| u.id == id)?;
        user.name = payload.name;
        user.email = payload.email;
        Some(user.clone())
    }

    /// Remove the record with the given id. `None` means not found.
    pub fn delete(&mut self, id: u64) -> Option<()> {
        let pos = self.users.iter().position(|u| u.id == id)?;
        self.users.remove(pos);
        Some(())
    }
}
