use crate::config::AuthConfig;
use crate::error::app_error::AppError;
use crate::models::role::UserRole;
use crate::models::session::SessionPayload;
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    role: UserRole,
    iat: i64,
    exp: i64,
}

impl From<Claims> for SessionPayload {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// Issues and verifies HS256 session tokens. Built once from configuration and
/// shared read-only through Rocket managed state.
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
}

impl TokenSigner {
    pub fn new(secret: &[u8], ttl: TimeDelta) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.jwt_secret.as_bytes(), TimeDelta::seconds(config.token_ttl_seconds))
    }

    pub fn generate_token(&self, payload: &SessionPayload) -> Result<String, AppError> {
        self.generate_token_at(payload, Utc::now())
    }

    fn generate_token_at(&self, payload: &SessionPayload, issued_at: DateTime<Utc>) -> Result<String, AppError> {
        let claims = Claims {
            sub: payload.user_id.clone(),
            email: payload.email.clone(),
            role: payload.role,
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    /// Returns the payload of a well-formed, correctly signed, unexpired token
    /// and `None` for anything else.
    pub fn verify_token(&self, token: &str) -> Option<SessionPayload> {
        if token.is_empty() {
            return None;
        }

        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Some(data.claims.into()),
            Err(e) => {
                debug!(reason = ?e.kind(), "rejected session token");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn signer() -> TokenSigner {
        TokenSigner::new(b"test-secret-key-for-testing-purposes-only", TimeDelta::hours(8))
    }

    fn payload(user_id: &str, email: &str, role: UserRole) -> SessionPayload {
        SessionPayload {
            user_id: user_id.to_string(),
            email: email.to_string(),
            role,
        }
    }

    #[test]
    fn generates_non_empty_token() {
        let token = signer().generate_token(&payload("test-user-id", "test@example.com", UserRole::Diretor)).unwrap();
        assert!(!token.is_empty());
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn different_payloads_give_different_tokens() {
        let signer = signer();
        let first = signer.generate_token(&payload("user1", "user1@example.com", UserRole::Diretor)).unwrap();
        let second = signer.generate_token(&payload("user2", "user2@example.com", UserRole::Analista)).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn verifies_own_token() {
        let signer = signer();
        let original = payload("test-user-id", "test@example.com", UserRole::Diretor);
        let token = signer.generate_token(&original).unwrap();
        assert_eq!(signer.verify_token(&token), Some(original));
    }

    #[test]
    fn rejects_invalid_and_empty_tokens() {
        let signer = signer();
        assert_eq!(signer.verify_token("invalid.token.here"), None);
        assert_eq!(signer.verify_token(""), None);
        assert_eq!(signer.verify_token("not-even-a-jwt"), None);
    }

    #[test]
    fn rejects_token_signed_with_another_secret() {
        let other = TokenSigner::new(b"some-other-secret-of-sufficient-length", TimeDelta::hours(8));
        let token = other.generate_token(&payload("u", "u@example.com", UserRole::Operador)).unwrap();
        assert_eq!(signer().verify_token(&token), None);
    }

    #[test]
    fn rejects_expired_token() {
        let signer = signer();
        let issued_at = Utc::now() - TimeDelta::hours(9);
        let token = signer.generate_token_at(&payload("u", "u@example.com", UserRole::Gerente), issued_at).unwrap();
        assert_eq!(signer.verify_token(&token), None);
    }

    #[test]
    fn rejects_tampered_token() {
        let signer = signer();
        let token = signer.generate_token(&payload("u", "u@example.com", UserRole::Analista)).unwrap();
        let forged = signer.generate_token(&payload("u", "u@example.com", UserRole::Diretor)).unwrap();
        let forged_claims = forged.split('.').nth(1).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        parts[1] = forged_claims;
        assert_eq!(signer.verify_token(&parts.join(".")), None);
    }

    proptest! {
        #[test]
        fn verify_returns_what_was_issued(
            user_id in "[a-z0-9-]{1,36}",
            email in "[a-z]{1,12}@[a-z]{1,12}\\.com",
            role in proptest::sample::select(UserRole::ALL.to_vec()),
        ) {
            let signer = signer();
            let original = payload(&user_id, &email, role);
            let token = signer.generate_token(&original).unwrap();
            prop_assert_eq!(signer.verify_token(&token), Some(original));
        }
    }
}
