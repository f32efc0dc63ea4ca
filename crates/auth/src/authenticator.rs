//! Credential authentication.
//!
//! Login and signup share one code path: authenticating a password against
//! an unseen email silently provisions a new account instead of failing.
//! That policy is externally observable product behavior and lives behind
//! this single entry point so it can later be split without touching
//! callers.

use entities::User;
use note_store::NoteStore;

use crate::{hash_password, verify_password, AuthError, AuthResult, Identity};

/// A verified profile returned by an external provider.
///
/// The provider's own verification is trusted as-is; nothing here is
/// re-checked against the provider.
#[derive(Debug, Clone)]
pub struct ProviderProfile {
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: Option<String>,
    /// Profile image URL.
    pub picture: Option<String>,
}

/// A submitted credential.
#[derive(Debug, Clone)]
pub enum Credential {
    /// Email and plaintext password.
    Password { email: String, password: String },
    /// Verified external-provider profile.
    Provider(ProviderProfile),
}

/// Authenticates a credential against the store.
///
/// Every failure a caller could use to probe for accounts is reported as
/// the same generic [`AuthError::InvalidCredentials`].
pub async fn authenticate<S>(store: &S, credential: Credential) -> AuthResult<Identity>
where
    S: NoteStore + ?Sized,
{
    match credential {
        Credential::Password { email, password } => {
            password_login(store, &email, &password).await
        }
        Credential::Provider(profile) => provider_login(store, profile).await,
    }
}

fn validate_email(email: &str) -> AuthResult<()> {
    if email.is_empty() || !email.contains('@') {
        return Err(AuthError::InvalidInput("malformed email".to_string()));
    }
    Ok(())
}

async fn password_login<S>(store: &S, email: &str, password: &str) -> AuthResult<Identity>
where
    S: NoteStore + ?Sized,
{
    validate_email(email)?;
    if password.is_empty() {
        return Err(AuthError::InvalidInput("empty password".to_string()));
    }

    match store.get_user_by_email(email).await? {
        Some(user) => {
            // Provider-only accounts hold no hash and can never pass a
            // password login.
            let verified = user
                .password_hash
                .as_deref()
                .is_some_and(|hash| verify_password(password, hash));

            if !verified {
                tracing::debug!(email = %email, "Password verification failed");
                return Err(AuthError::InvalidCredentials);
            }

            Ok(Identity::from(&user))
        }
        None => provision(store, email, password).await,
    }
}

/// Creates an account for an unseen email as a side effect of login.
async fn provision<S>(store: &S, email: &str, password: &str) -> AuthResult<Identity>
where
    S: NoteStore + ?Sized,
{
    let hash = hash_password(password)?;
    let user = User::new(email).with_password_hash(hash);

    match store.create_user(user).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "Auto-provisioned account on login");
            Ok(Identity::from(&user))
        }
        // A concurrent login won the race for this email. The store's
        // uniqueness constraint is the only safeguard; surface the loss
        // as an ordinary credential failure.
        Err(e) if e.is_unique_violation() => {
            tracing::debug!(email = %email, "Lost provisioning race");
            Err(AuthError::InvalidCredentials)
        }
        Err(e) => Err(e.into()),
    }
}

async fn provider_login<S>(store: &S, profile: ProviderProfile) -> AuthResult<Identity>
where
    S: NoteStore + ?Sized,
{
    validate_email(&profile.email)?;

    if let Some(user) = store.get_user_by_email(&profile.email).await? {
        return Ok(Identity::from(&user));
    }

    let mut user = User::new(&profile.email);
    user.name = profile.name;
    user.picture = profile.picture;

    match store.create_user(user).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "Provisioned account from provider profile");
            Ok(Identity::from(&user))
        }
        Err(e) if e.is_unique_violation() => {
            tracing::debug!(email = %profile.email, "Lost provisioning race");
            Err(AuthError::InvalidCredentials)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use note_store::MemoryNoteStore;

    use super::*;

    fn password_credential(email: &str, password: &str) -> Credential {
        Credential::Password {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_auto_provisioning_creates_exactly_one_user() {
        let store = MemoryNoteStore::new();

        let first = authenticate(&store, password_credential("new@example.com", "hunter2"))
            .await
            .unwrap();
        let second = authenticate(&store, password_credential("new@example.com", "hunter2"))
            .await
            .unwrap();

        assert_eq!(first.user_id, second.user_id);
        let stored = store
            .get_user_by_email("new@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.id, first.user_id);
    }

    #[tokio::test]
    async fn test_wrong_password_fails_generically() {
        let store = MemoryNoteStore::new();
        authenticate(&store, password_credential("a@example.com", "hunter2"))
            .await
            .unwrap();

        let err = authenticate(&store, password_credential("a@example.com", "wrong"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[tokio::test]
    async fn test_provider_profile_creates_passwordless_account() {
        let store = MemoryNoteStore::new();
        let profile = ProviderProfile {
            email: "oauth@example.com".to_string(),
            name: Some("OAuth User".to_string()),
            picture: Some("https://example.com/p.png".to_string()),
        };

        let identity = authenticate(&store, Credential::Provider(profile))
            .await
            .unwrap();

        assert_eq!(identity.name.as_deref(), Some("OAuth User"));
        let stored = store
            .get_user_by_email("oauth@example.com")
            .await
            .unwrap()
            .unwrap();
        assert!(stored.password_hash.is_none());
    }

    #[tokio::test]
    async fn test_password_login_against_provider_only_account_fails() {
        let store = MemoryNoteStore::new();
        let profile = ProviderProfile {
            email: "oauth@example.com".to_string(),
            name: None,
            picture: None,
        };
        authenticate(&store, Credential::Provider(profile))
            .await
            .unwrap();

        let err = authenticate(&store, password_credential("oauth@example.com", "anything"))
            .await
            .unwrap_err();

        // Indistinguishable from a wrong password.
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[tokio::test]
    async fn test_provider_login_reuses_existing_account() {
        let store = MemoryNoteStore::new();
        let first = authenticate(&store, password_credential("a@example.com", "hunter2"))
            .await
            .unwrap();

        let profile = ProviderProfile {
            email: "a@example.com".to_string(),
            name: Some("Renamed".to_string()),
            picture: None,
        };
        let second = authenticate(&store, Credential::Provider(profile))
            .await
            .unwrap();

        assert_eq!(first.user_id, second.user_id);
    }

    #[tokio::test]
    async fn test_malformed_email_rejected_before_store() {
        let store = MemoryNoteStore::new();

        let err = authenticate(&store, password_credential("not-an-email", "hunter2"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidInput(_)));
        assert!(store
            .get_user_by_email("not-an-email")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_empty_password_rejected() {
        let store = MemoryNoteStore::new();

        let err = authenticate(&store, password_credential("a@example.com", ""))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidInput(_)));
    }
}
