use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AppConfig;

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user id
    pub iat: usize,  // issued at
    pub exp: usize,  // expiration
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("invalid token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("token lifetime {0} cannot produce a valid expiry")]
    Lifetime(Duration),
}

/// Password hashing and bearer token issuance/verification.
#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(secret: &str, token_ttl: Duration, bcrypt_cost: u32) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl,
            bcrypt_cost,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.jwt_secret,
            Duration::days(config.token_ttl_days),
            config.bcrypt_cost,
        )
    }

    /// Salted bcrypt hash; runs on the blocking pool.
    pub async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let password = password.to_owned();
        let cost = self.bcrypt_cost;
        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
        Ok(hashed)
    }

    pub async fn verify_password(&self, password: &str, hashed: &str) -> Result<bool, AuthError> {
        let password = password.to_owned();
        let hashed = hashed.to_owned();
        let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hashed)).await??;
        Ok(valid)
    }

    pub fn issue_token(&self, user_id: &str) -> Result<String, AuthError> {
        self.issue_token_at(user_id, Utc::now())
    }

    fn issue_token_at(&self, user_id: &str, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        if self.token_ttl <= Duration::zero() {
            return Err(AuthError::Lifetime(self.token_ttl));
        }
        let expires_at = issued_at
            .checked_add_signed(self.token_ttl)
            .ok_or(AuthError::Lifetime(self.token_ttl))?;

        let claims = Claims {
            sub: user_id.to_string(),
            iat: issued_at.timestamp().max(0) as usize,
            exp: expires_at.timestamp().max(0) as usize,
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// Returns the user id the token was issued for.
    pub fn verify_token(&self, token: &str) -> Result<String, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new("test-secret", Duration::days(7), 4)
    }

    #[tokio::test]
    async fn hash_is_salted_and_verifies() {
        let auth = service();
        let first = auth.hash_password("pw123").await.unwrap();
        let second = auth.hash_password("pw123").await.unwrap();

        assert_ne!(first, second);
        assert_ne!(first, "pw123");
        assert!(auth.verify_password("pw123", &first).await.unwrap());
        assert!(!auth.verify_password("wrong", &first).await.unwrap());
    }

    #[test]
    fn token_authenticates_only_its_user() {
        let auth = service();
        let token_a = auth.issue_token("user-a").unwrap();
        let token_b = auth.issue_token("user-b").unwrap();

        assert_eq!(auth.verify_token(&token_a).unwrap(), "user-a");
        assert_eq!(auth.verify_token(&token_b).unwrap(), "user-b");
    }

    #[test]
    fn token_expires_after_seven_days() {
        let auth = service();

        let fresh = auth.issue_token_at("user-a", Utc::now() - Duration::days(6)).unwrap();
        assert!(auth.verify_token(&fresh).is_ok());

        let stale = auth.issue_token_at("user-a", Utc::now() - Duration::days(8)).unwrap();
        assert!(auth.verify_token(&stale).is_err());
    }

    #[test]
    fn unusable_lifetimes_fail_instead_of_panicking() {
        let huge = AuthService::new("test-secret", Duration::days(100_000_000), 4);
        assert!(matches!(huge.issue_token("user-a"), Err(AuthError::Lifetime(_))));

        let negative = AuthService::new("test-secret", Duration::days(-1), 4);
        assert!(matches!(negative.issue_token("user-a"), Err(AuthError::Lifetime(_))));
    }

    #[test]
    fn tampered_or_foreign_tokens_are_rejected() {
        let auth = service();
        let token = auth.issue_token("user-a").unwrap();

        let sig_start = token.rfind('.').unwrap() + 1;
        let flipped = if token[sig_start..].starts_with('A') { "B" } else { "A" };
        let mut tampered = token.clone();
        tampered.replace_range(sig_start..sig_start + 1, flipped);
        assert!(auth.verify_token(&tampered).is_err());

        let other = AuthService::new("another-secret", Duration::days(7), 4);
        assert!(other.verify_token(&token).is_err());

        assert!(auth.verify_token("not-a-token").is_err());
    }
}
