//! JWT session token issuance and resolution.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AuthError, AuthResult, DEFAULT_JWT_ISSUER, DEFAULT_SESSION_TTL_HOURS, Identity};

/// JWT claims for Quick Notes session tokens.
///
/// Claims are immutable for the life of the token; a user's name or
/// picture change is not reflected until re-issuance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: String,
    /// Email address.
    pub email: String,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Profile image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
    /// Issuer.
    pub iss: String,
    /// JWT ID.
    pub jti: String,
}

impl Claims {
    /// Creates new claims for an identity.
    pub fn new(identity: &Identity, ttl_hours: u64, issuer: impl Into<String>) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(ttl_hours as i64);

        Self {
            sub: identity.user_id.to_string(),
            email: identity.email.clone(),
            name: identity.name.clone(),
            picture: identity.picture.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: issuer.into(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Reconstructs the identity carried by these claims.
    pub fn identity(&self) -> AuthResult<Identity> {
        let user_id: Uuid = self.sub.parse().map_err(|_| AuthError::InvalidToken)?;
        Ok(Identity {
            user_id,
            email: self.email.clone(),
            name: self.name.clone(),
            picture: self.picture.clone(),
        })
    }

    /// Returns true if the token is expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Session signing configuration.
///
/// Built once at process start and handed to the issuer explicitly; the
/// secret is never rotated at runtime.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Token lifetime in hours.
    pub ttl_hours: u64,
    /// Token issuer.
    pub issuer: String,
}

impl SessionConfig {
    /// Creates a new session configuration.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            issuer: DEFAULT_JWT_ISSUER.to_string(),
        }
    }

    /// Sets the token lifetime in hours.
    pub fn with_ttl_hours(mut self, hours: u64) -> Self {
        self.ttl_hours = hours;
        self
    }

    /// Sets the issuer.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }
}

/// Session token issuer.
#[derive(Clone)]
pub struct SessionIssuer {
    config: SessionConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for SessionIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionIssuer")
            .field("ttl_hours", &self.config.ttl_hours)
            .field("issuer", &self.config.issuer)
            .finish_non_exhaustive()
    }
}

impl SessionIssuer {
    /// Creates a new session issuer.
    pub fn new(config: SessionConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issues a signed session token for an identity.
    pub fn issue(&self, identity: &Identity) -> AuthResult<String> {
        let claims = Claims::new(identity, self.config.ttl_hours, &self.config.issuer);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::JwtEncoding(e.to_string()))
    }

    /// Verifies a token and reconstructs the identity it carries.
    ///
    /// No store lookup happens here; the claims are trusted as of issuance
    /// time.
    pub fn resolve(&self, token: &str) -> AuthResult<Identity> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;

        token_data.claims.identity()
    }

    /// Returns the token lifetime in seconds.
    pub fn ttl_seconds(&self) -> u64 {
        self.config.ttl_hours * 3600
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> SessionIssuer {
        SessionIssuer::new(SessionConfig::new(
            "test-secret-key-must-be-long-enough-for-security",
        ))
    }

    fn identity() -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            name: Some("Test User".to_string()),
            picture: Some("https://example.com/avatar.png".to_string()),
        }
    }

    #[test]
    fn test_issue_and_resolve_round_trip() {
        let issuer = issuer();
        let identity = identity();

        let token = issuer.issue(&identity).unwrap();
        let resolved = issuer.resolve(&token).unwrap();

        assert_eq!(resolved, identity);
    }

    #[test]
    fn test_round_trip_without_optional_claims() {
        let issuer = issuer();
        let identity = Identity {
            user_id: Uuid::new_v4(),
            email: "bare@example.com".to_string(),
            name: None,
            picture: None,
        };

        let token = issuer.issue(&identity).unwrap();
        let resolved = issuer.resolve(&token).unwrap();

        assert_eq!(resolved, identity);
    }

    #[test]
    fn test_expired_token() {
        let issuer = issuer();
        let mut claims = Claims::new(&identity(), 24, DEFAULT_JWT_ISSUER);
        // Far enough in the past to clear the default validation leeway.
        claims.exp = (Utc::now() - Duration::hours(2)).timestamp();
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test-secret-key-must-be-long-enough-for-security".as_bytes()),
        )
        .unwrap();

        let err = issuer.resolve(&token).unwrap_err();
        assert!(matches!(err, AuthError::TokenExpired));
    }

    #[test]
    fn test_tampered_signature() {
        let issuer = issuer();
        let token = issuer.issue(&identity()).unwrap();

        let (payload, signature) = token.rsplit_once('.').unwrap();
        let flipped = if signature.starts_with('A') { "B" } else { "A" };
        let tampered = format!("{payload}.{flipped}{}", &signature[1..]);

        let err = issuer.resolve(&tampered).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[test]
    fn test_wrong_secret() {
        let minting = SessionIssuer::new(SessionConfig::new("secret-one-must-be-long-enough"));
        let verifying = SessionIssuer::new(SessionConfig::new("secret-two-must-be-long-enough"));

        let token = minting.issue(&identity()).unwrap();

        assert!(matches!(
            verifying.resolve(&token).unwrap_err(),
            AuthError::InvalidToken
        ));
    }

    #[test]
    fn test_garbage_token() {
        let err = issuer().resolve("not-a-token").unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }
}
