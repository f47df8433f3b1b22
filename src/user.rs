//! Authenticated identity.
//!
//! A [`User`] is produced by the service's authentication handshake and held
//! for the session. The API key is a secret: `User` is not `Serialize` and
//! its `Debug` output redacts the key. [`User::view`] is the only way to put
//! the credential on the wire.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity record attached to authenticated requests.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    user_id: i64,
    username: String,
    api_key: String,
}

impl User {
    /// Create a user. Empty `username` or `api_key` values are accepted as-is.
    pub fn new(user_id: i64, username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
            api_key: api_key.into(),
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Fixed-shape structural view for authenticated request payloads.
    pub fn view(&self) -> UserView<'_> {
        UserView {
            user_id: self.user_id,
            username: &self.username,
            api_key: &self.api_key,
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .field("api_key", &"***")
            .finish()
    }
}

/// Borrowed `{ user_id, username, api_key }` view of a [`User`].
#[derive(Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserView<'a> {
    pub user_id: i64,
    pub username: &'a str,
    pub api_key: &'a str,
}

impl fmt::Debug for UserView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserView")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .field("api_key", &"***")
            .finish()
    }
}
