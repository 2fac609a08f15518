use std::sync::Arc;

use log::info;

use crate::config::ClientConfig;
use crate::domain::auth::TokenPurpose;
use crate::domain::errors::DomainError;
use crate::domain::ports::{Mailer, UserRepository};
use crate::domain::user::NewUser;

use super::password::{hash_password, verify_password};
use super::tokens::TokenIssuer;

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    mailer: Arc<dyn Mailer>,
    tokens: TokenIssuer,
    client: ClientConfig,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        mailer: Arc<dyn Mailer>,
        tokens: TokenIssuer,
        client: ClientConfig,
    ) -> Self {
        Self {
            users,
            mailer,
            tokens,
            client,
        }
    }

    /// Mail a confirmation link; the account is created by [`Self::confirm_email`].
    pub fn sign_up(&self, name: &str, email: &str) -> Result<(), DomainError> {
        if self.users.find_by_email(email)?.is_some() {
            return Err(DomainError::bad_request(
                "user with such email already exists",
            ));
        }

        let token = self.tokens.confirm_email_token(name, email)?;
        let link = format!("{}?confToken={}", self.client.confirmation_email_url, token);
        self.mailer.send(
            email,
            "Sign up confirmation",
            &format!("Please, enter through this link to confirm your email: {link}"),
        )
    }

    pub fn confirm_email(&self, token: &str, password: &str) -> Result<i32, DomainError> {
        let claims = self.tokens.verify(token, TokenPurpose::ConfirmEmail)?;
        let (Some(name), Some(email)) = (claims.name, claims.email) else {
            return Err(DomainError::unauthorized("invalid token"));
        };

        let id = self
            .users
            .create(NewUser {
                name,
                email,
                password_hash: hash_password(password)?,
            })
            .map_err(|e| match e {
                DomainError::AlreadyExists(_) => {
                    DomainError::bad_request("user with such email already exists")
                }
                other => other,
            })?;

        info!("user {} confirmed email and was created", id);
        Ok(id)
    }

    pub fn sign_in(&self, email: &str, password: &str) -> Result<String, DomainError> {
        let invalid = || DomainError::unauthorized("invalid email or password");

        let credentials = self.users.credentials(email).map_err(|e| match e {
            DomainError::NoRows => invalid(),
            other => other,
        })?;
        if !verify_password(password, &credentials.password_hash)? {
            return Err(invalid());
        }

        self.tokens.access_token(credentials.user_id)
    }

    pub fn recover_password(&self, email: &str) -> Result<(), DomainError> {
        let user = self
            .users
            .find_by_email(email)?
            .ok_or(DomainError::NotFound("user"))?;

        let token = self.tokens.recovery_token(user.id)?;
        let link = format!("{}?confToken={}", self.client.password_recovery_url, token);
        self.mailer.send(
            &user.email,
            "Password recovery confirmation",
            &format!("Please, enter through this link to change your password: {link}"),
        )
    }

    pub fn update_password(&self, token: &str, password: &str) -> Result<(), DomainError> {
        let user_id = self.tokens.user_id(token, TokenPurpose::PasswordRecovery)?;
        self.users
            .update_password(user_id, hash_password(password)?)
            .map_err(|e| e.or_not_found("user"))
    }

    /// Resolve a bearer access token into the user id it was issued for.
    pub fn authenticate(&self, token: &str) -> Result<i32, DomainError> {
        self.tokens.user_id(token, TokenPurpose::Access)
    }
}
