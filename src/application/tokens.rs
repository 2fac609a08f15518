use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::debug;

use crate::config::TokenConfig;
use crate::domain::auth::{Claims, TokenPurpose};
use crate::domain::errors::DomainError;

/// Signs and verifies HS256 tokens. Recovery tokens use their own key so a
/// leaked access key cannot reset passwords.
#[derive(Clone)]
pub struct TokenIssuer {
    sign_key: Vec<u8>,
    recovery_key: Vec<u8>,
}

impl TokenIssuer {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            sign_key: config.sign_key.as_bytes().to_vec(),
            recovery_key: config.password_recovery_key.as_bytes().to_vec(),
        }
    }

    fn key(&self, purpose: TokenPurpose) -> &[u8] {
        match purpose {
            TokenPurpose::PasswordRecovery => &self.recovery_key,
            TokenPurpose::ConfirmEmail | TokenPurpose::Access => &self.sign_key,
        }
    }

    pub fn confirm_email_token(&self, name: &str, email: &str) -> Result<String, DomainError> {
        self.issue(Claims {
            sub: None,
            email: Some(email.to_string()),
            name: Some(name.to_string()),
            purpose: TokenPurpose::ConfirmEmail,
            exp: expiry(TokenPurpose::ConfirmEmail),
        })
    }

    pub fn access_token(&self, user_id: i32) -> Result<String, DomainError> {
        self.issue(Claims {
            sub: Some(user_id),
            email: None,
            name: None,
            purpose: TokenPurpose::Access,
            exp: expiry(TokenPurpose::Access),
        })
    }

    pub fn recovery_token(&self, user_id: i32) -> Result<String, DomainError> {
        self.issue(Claims {
            sub: Some(user_id),
            email: None,
            name: None,
            purpose: TokenPurpose::PasswordRecovery,
            exp: expiry(TokenPurpose::PasswordRecovery),
        })
    }

    pub fn issue(&self, claims: Claims) -> Result<String, DomainError> {
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.key(claims.purpose)),
        )
        .map_err(|e| DomainError::internal(format!("token encoding failed: {e}")))
    }

    /// Verify signature and expiry, then require the expected purpose.
    pub fn verify(&self, token: &str, purpose: TokenPurpose) -> Result<Claims, DomainError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.key(purpose)),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| {
            debug!("token rejected: {}", e);
            DomainError::unauthorized("invalid token")
        })?;

        if data.claims.purpose != purpose {
            return Err(DomainError::unauthorized("invalid token"));
        }
        Ok(data.claims)
    }

    pub fn user_id(&self, token: &str, purpose: TokenPurpose) -> Result<i32, DomainError> {
        self.verify(token, purpose)?
            .sub
            .ok_or_else(|| DomainError::unauthorized("invalid token"))
    }
}

fn expiry(purpose: TokenPurpose) -> i64 {
    Utc::now().timestamp() + purpose.ttl_seconds()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(&TokenConfig {
            sign_key: "sign-key".to_string(),
            password_recovery_key: "recovery-key".to_string(),
        })
    }

    #[test]
    fn access_token_round_trips_user_id() {
        let issuer = issuer();
        let token = issuer.access_token(42).unwrap();
        assert_eq!(issuer.user_id(&token, TokenPurpose::Access).unwrap(), 42);
    }

    #[test]
    fn confirmation_token_is_not_an_access_token() {
        let issuer = issuer();
        let token = issuer.confirm_email_token("Ada", "ada@example.com").unwrap();
        assert_eq!(
            issuer.verify(&token, TokenPurpose::Access),
            Err(DomainError::unauthorized("invalid token"))
        );
        let claims = issuer.verify(&token, TokenPurpose::ConfirmEmail).unwrap();
        assert_eq!(claims.email.as_deref(), Some("ada@example.com"));
        assert_eq!(claims.name.as_deref(), Some("Ada"));
    }

    #[test]
    fn recovery_token_needs_recovery_key() {
        let issuer = issuer();
        let token = issuer.recovery_token(7).unwrap();
        assert!(issuer.verify(&token, TokenPurpose::Access).is_err());
        assert_eq!(issuer.user_id(&token, TokenPurpose::PasswordRecovery).unwrap(), 7);
    }

    #[test]
    fn expired_token_is_rejected() {
        let issuer = issuer();
        let token = issuer
            .issue(Claims {
                sub: Some(1),
                email: None,
                name: None,
                purpose: TokenPurpose::Access,
                exp: Utc::now().timestamp() - 3600,
            })
            .unwrap();
        assert!(issuer.verify(&token, TokenPurpose::Access).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(issuer().verify("not-a-jwt", TokenPurpose::Access).is_err());
    }
}
