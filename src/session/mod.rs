//! Session state shared by every screen.
//!
//! DESIGN
//! ======
//! `Session` is a plain value snapshot. `SessionStore` owns the live copy,
//! publishes every change over a `watch` channel, and mirrors the token and
//! user into durable storage in the background.

pub mod store;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

pub use store::SessionStore;

// =============================================================================
// USER PROFILE
// =============================================================================

/// Profile of the signed-in user as returned by the auth server.
///
/// Field names on the wire are `_id`, `name`, and `phoneNumber`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Server-assigned unique identifier.
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "name")]
    pub display_name: String,
    /// Phone number as entered; not validated here.
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
}

// =============================================================================
// SESSION
// =============================================================================

/// Authentication state of the device.
///
/// Token and user are independent: either may be present without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
    /// True only until the initial restore from storage finishes.
    pub is_loading: bool,
}

impl Session {
    /// Empty session awaiting its initial restore.
    #[must_use]
    pub fn loading() -> Self {
        Self { token: None, user: None, is_loading: true }
    }

    /// Whether the token is present and non-empty.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::loading()
    }
}
