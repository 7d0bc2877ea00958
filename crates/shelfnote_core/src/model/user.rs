//! Session user model.
//!
//! # Responsibility
//! - Define the single current-user record mirrored to durable storage.
//!
//! # Invariants
//! - At most one user record is alive at a time; "anonymous" is the
//!   absence of the record, not a sentinel value.
//!
//! # See also
//! - docs/architecture/data-model.md

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The local session owner.
///
/// Serialized camelCase to match the persisted layout of the original
/// web client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque id generated at login/register time.
    pub id: String,
    /// Display name shown in the profile tab.
    pub name: String,
    /// Email as entered; never verified.
    pub email: String,
    /// Optional avatar reference, unused by the core flows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    /// Creates a user with a freshly generated id and no avatar.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.into(),
            avatar: None,
        }
    }
}
