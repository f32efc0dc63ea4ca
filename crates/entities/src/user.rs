//! User-related entity definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account.
///
/// Accounts created through an external provider carry no password hash;
/// password logins against them always fail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: Uuid,
    /// Email address. Uniquely identifies at most one user, case-sensitive
    /// as stored.
    pub email: String,
    /// Bcrypt password hash. Never serialized into responses.
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Profile image URL.
    pub picture: Option<String>,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
    /// When this record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with no password hash.
    pub fn new(email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash: None,
            name: None,
            picture: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the password hash.
    pub fn with_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the profile image URL.
    pub fn with_picture(mut self, picture: impl Into<String>) -> Self {
        self.picture = Some(picture.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("test@example.com").with_name("Test User");

        assert_eq!(user.email, "test@example.com");
        assert_eq!(user.name, Some("Test User".to_string()));
        assert!(user.password_hash.is_none());
        assert!(user.picture.is_none());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User::new("test@example.com").with_password_hash("$2b$10$abc");

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "test@example.com");
    }
}
