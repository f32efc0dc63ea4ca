//! The authenticated principal, independent of transport.

use entities::User;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated identity.
///
/// Produced by [`authenticate`](crate::authenticate), carried through a
/// session token, never persisted directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// User ID.
    pub user_id: Uuid,
    /// Email address.
    pub email: String,
    /// Display name (if available).
    pub name: Option<String>,
    /// Profile image URL (if available).
    pub picture: Option<String>,
}

impl Identity {
    /// Returns the display name, falling back to the email.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            picture: user.picture.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_email() {
        let user = User::new("test@example.com");
        let identity = Identity::from(&user);
        assert_eq!(identity.display_name(), "test@example.com");

        let named = User::new("test@example.com").with_name("Test User");
        let identity = Identity::from(&named);
        assert_eq!(identity.display_name(), "Test User");
    }
}
