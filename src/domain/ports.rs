use std::path::PathBuf;

#[cfg(test)]
use mockall::automock;

use super::catalog::{
    CatalogQuery, Category, CategoryPatch, NewCategory, NewProduct, Page, Product, ProductPatch,
};
use super::errors::DomainError;
use super::media::{ImageKind, ImageUpload};
use super::order::{Order, OrderItems};
use super::user::{Credentials, NewUser, ProfilePatch, User};

#[cfg_attr(test, automock)]
pub trait UserRepository: Send + Sync + 'static {
    fn create(&self, user: NewUser) -> Result<i32, DomainError>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    fn credentials(&self, email: &str) -> Result<Credentials, DomainError>;
    fn credentials_by_id(&self, user_id: i32) -> Result<Credentials, DomainError>;
    fn get(&self, user_id: i32) -> Result<User, DomainError>;
    fn update_profile(
        &self,
        user_id: i32,
        patch: ProfilePatch,
        image: Option<ImageUpload>,
    ) -> Result<(), DomainError>;
    fn update_password(&self, user_id: i32, password_hash: String) -> Result<(), DomainError>;
    /// Remove the account, its orders, and its stored profile image.
    fn delete(&self, user_id: i32) -> Result<(), DomainError>;
}

#[cfg_attr(test, automock)]
pub trait CategoryRepository: Send + Sync + 'static {
    fn list(&self, query: &CatalogQuery) -> Result<Vec<Category>, DomainError>;
    fn get(&self, id: i32) -> Result<Category, DomainError>;
    fn list_products(
        &self,
        category_id: i32,
        query: &CatalogQuery,
    ) -> Result<Vec<Product>, DomainError>;
    fn create(&self, category: NewCategory, image: ImageUpload) -> Result<i32, DomainError>;
    fn update(
        &self,
        id: i32,
        patch: CategoryPatch,
        image: Option<ImageUpload>,
    ) -> Result<(), DomainError>;
}

#[cfg_attr(test, automock)]
pub trait ProductRepository: Send + Sync + 'static {
    fn list(&self, query: &CatalogQuery) -> Result<Vec<Product>, DomainError>;
    fn get(&self, id: i32) -> Result<Product, DomainError>;
    fn create(&self, product: NewProduct, image: ImageUpload) -> Result<i32, DomainError>;
    fn update(
        &self,
        id: i32,
        patch: ProductPatch,
        image: Option<ImageUpload>,
    ) -> Result<(), DomainError>;
}

#[cfg_attr(test, automock)]
pub trait OrderRepository: Send + Sync + 'static {
    /// Create the order and decrement stock for every item in one transaction.
    fn place(&self, user_id: i32, items: &OrderItems) -> Result<i32, DomainError>;
    fn list(&self, user_id: i32, page: Page) -> Result<Vec<Order>, DomainError>;
    /// Fetch an order only if it belongs to `user_id`.
    fn find(&self, user_id: i32, order_id: i32) -> Result<Order, DomainError>;
}

#[cfg_attr(test, automock)]
pub trait ImageStorage: Send + Sync + 'static {
    /// Replace the image stored for `(kind, owner_id)` and return its public URL.
    fn save(&self, kind: ImageKind, owner_id: i32, image: &ImageUpload)
        -> Result<String, DomainError>;
    fn remove(&self, kind: ImageKind, owner_id: i32) -> Result<(), DomainError>;
    fn file_path(
        &self,
        kind: ImageKind,
        owner_id: i32,
        file_name: &str,
    ) -> Result<PathBuf, DomainError>;
}

#[cfg_attr(test, automock)]
pub trait Mailer: Send + Sync + 'static {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), DomainError>;
}
