use std::sync::Arc;

use log::info;

use crate::domain::errors::DomainError;
use crate::domain::media::ImageUpload;
use crate::domain::ports::UserRepository;
use crate::domain::user::{ProfilePatch, User};

use super::password::verify_password;

pub struct ProfileService {
    users: Arc<dyn UserRepository>,
}

impl ProfileService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub fn get_profile(&self, user_id: i32) -> Result<User, DomainError> {
        self.users.get(user_id).map_err(|e| e.or_not_found("user"))
    }

    pub fn update_profile(
        &self,
        user_id: i32,
        patch: ProfilePatch,
        image: Option<ImageUpload>,
    ) -> Result<(), DomainError> {
        if patch.name.is_none() && image.is_none() {
            return Err(DomainError::bad_request("no fields to update"));
        }
        self.users
            .update_profile(user_id, patch, image)
            .map_err(|e| e.or_not_found("user"))
    }

    /// Delete the account after re-checking its password. Orders go with it.
    pub fn delete_profile(&self, user_id: i32, password: &str) -> Result<(), DomainError> {
        let credentials = self
            .users
            .credentials_by_id(user_id)
            .map_err(|e| e.or_not_found("user"))?;
        if !verify_password(password, &credentials.password_hash)? {
            return Err(DomainError::Forbidden("wrong password".to_string()));
        }

        self.users
            .delete(user_id)
            .map_err(|e| e.or_not_found("user"))?;
        info!("user {} deleted their profile", user_id);
        Ok(())
    }
}
