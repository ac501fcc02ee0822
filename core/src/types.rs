//! Domain DTOs for the users API.
//!
//! # Design
//! These types mirror the server's schema but are defined independently, so
//! the client core stays free of Axum internals. Integration tests catch any
//! schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// A single user record returned by the API. The id is assigned server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
}

/// Request payload for creating or updating a user. Update is a full
/// overwrite of both fields; the server assigns (create) or keeps (update)
/// the id itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
}
