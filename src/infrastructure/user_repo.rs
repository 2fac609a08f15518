use std::sync::Arc;

use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::media::{ImageKind, ImageUpload};
use crate::domain::ports::{ImageStorage, UserRepository};
use crate::domain::user::{Credentials, NewUser, ProfilePatch, User};
use crate::schema::users;

use super::models::{NewUserRow, UserChangeset, UserRow};

pub struct DieselUserRepository {
    pool: DbPool,
    storage: Arc<dyn ImageStorage>,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool, storage: Arc<dyn ImageStorage>) -> Self {
        Self { pool, storage }
    }
}

impl UserRepository for DieselUserRepository {
    fn create(&self, user: NewUser) -> Result<i32, DomainError> {
        let mut conn = self.pool.get()?;

        let id = diesel::insert_into(users::table)
            .values(&NewUserRow {
                name: user.name,
                email: user.email,
                password_hash: user.password_hash,
            })
            .returning(users::id)
            .get_result(&mut conn)?;
        Ok(id)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Into::into))
    }

    fn credentials(&self, email: &str) -> Result<Credentials, DomainError> {
        let mut conn = self.pool.get()?;

        let (user_id, password_hash) = users::table
            .filter(users::email.eq(email))
            .select((users::id, users::password_hash))
            .first::<(i32, String)>(&mut conn)?;
        Ok(Credentials {
            user_id,
            password_hash,
        })
    }

    fn credentials_by_id(&self, user_id: i32) -> Result<Credentials, DomainError> {
        let mut conn = self.pool.get()?;

        let password_hash = users::table
            .find(user_id)
            .select(users::password_hash)
            .first::<String>(&mut conn)?;
        Ok(Credentials {
            user_id,
            password_hash,
        })
    }

    fn get(&self, user_id: i32) -> Result<User, DomainError> {
        let mut conn = self.pool.get()?;

        let row = users::table
            .find(user_id)
            .select(UserRow::as_select())
            .first(&mut conn)?;
        Ok(row.into())
    }

    fn update_profile(
        &self,
        user_id: i32,
        patch: ProfilePatch,
        image: Option<ImageUpload>,
    ) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            users::table
                .find(user_id)
                .select(users::id)
                .for_update()
                .first::<i32>(conn)?;

            let mut changes = UserChangeset {
                name: patch.name,
                profile_image: None,
            };
            if let Some(image) = &image {
                changes.profile_image = Some(self.storage.save(ImageKind::Users, user_id, image)?);
            }

            diesel::update(users::table.find(user_id))
                .set(&changes)
                .execute(conn)?;
            Ok(())
        })
    }

    fn update_password(&self, user_id: i32, password_hash: String) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        diesel::update(users::table.find(user_id))
            .set(users::password_hash.eq(password_hash))
            .returning(users::id)
            .get_result::<i32>(&mut conn)?;
        Ok(())
    }

    fn delete(&self, user_id: i32) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // Orders and their lines go with the user (ON DELETE CASCADE).
            diesel::delete(users::table.find(user_id))
                .returning(users::id)
                .get_result::<i32>(conn)?;
            self.storage.remove(ImageKind::Users, user_id)
        })
    }
}
