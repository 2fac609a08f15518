use std::path::PathBuf;
use std::sync::Arc;

use log::info;

use crate::domain::catalog::{
    CatalogQuery, Category, CategoryPatch, NewCategory, NewProduct, Product, ProductPatch,
};
use crate::domain::errors::DomainError;
use crate::domain::media::{ImageKind, ImageUpload};
use crate::domain::ports::{CategoryRepository, ImageStorage, ProductRepository};

const UNKNOWN_CATEGORY: &str = "provided category_id does not correspond to any existing category";
const DUPLICATE_CATEGORY: &str = "category with such name already exists";

/// Public browsing plus the admin mutations of categories and products.
pub struct CatalogService {
    categories: Arc<dyn CategoryRepository>,
    products: Arc<dyn ProductRepository>,
    storage: Arc<dyn ImageStorage>,
}

impl CatalogService {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        products: Arc<dyn ProductRepository>,
        storage: Arc<dyn ImageStorage>,
    ) -> Self {
        Self {
            categories,
            products,
            storage,
        }
    }

    pub fn get_all_categories(&self, query: &CatalogQuery) -> Result<Vec<Category>, DomainError> {
        self.categories.list(query)
    }

    pub fn get_category_by_id(&self, id: i32) -> Result<Category, DomainError> {
        self.categories
            .get(id)
            .map_err(|e| e.or_not_found("category"))
    }

    pub fn get_category_products(
        &self,
        category_id: i32,
        query: &CatalogQuery,
    ) -> Result<Vec<Product>, DomainError> {
        self.categories.list_products(category_id, query)
    }

    pub fn get_all_products(&self, query: &CatalogQuery) -> Result<Vec<Product>, DomainError> {
        self.products.list(query)
    }

    pub fn get_product_by_id(&self, id: i32) -> Result<Product, DomainError> {
        self.products.get(id).map_err(|e| e.or_not_found("product"))
    }

    pub fn create_category(
        &self,
        category: NewCategory,
        image: ImageUpload,
    ) -> Result<i32, DomainError> {
        if category.name.trim().is_empty() {
            return Err(DomainError::bad_request("name: cannot be blank"));
        }
        let id = self
            .categories
            .create(category, image)
            .map_err(category_error)?;
        info!("category {} created", id);
        Ok(id)
    }

    pub fn update_category(
        &self,
        id: i32,
        patch: CategoryPatch,
        image: Option<ImageUpload>,
    ) -> Result<(), DomainError> {
        if patch.is_empty() && image.is_none() {
            return Err(DomainError::bad_request("no fields to update"));
        }
        self.categories
            .update(id, patch, image)
            .map_err(|e| category_error(e).or_not_found("category"))
    }

    pub fn create_product(&self, product: NewProduct, image: ImageUpload) -> Result<i32, DomainError> {
        product.validate()?;
        let id = self
            .products
            .create(product, image)
            .map_err(product_error)?;
        info!("product {} created", id);
        Ok(id)
    }

    pub fn update_product(
        &self,
        id: i32,
        patch: ProductPatch,
        image: Option<ImageUpload>,
    ) -> Result<(), DomainError> {
        if patch.is_empty() && image.is_none() {
            return Err(DomainError::bad_request("no fields to update"));
        }
        patch.validate()?;
        self.products
            .update(id, patch, image)
            .map_err(|e| product_error(e).or_not_found("product"))
    }

    /// Resolve a stored image to its location on disk.
    pub fn media_path(
        &self,
        kind: &str,
        owner_id: i32,
        file_name: &str,
    ) -> Result<PathBuf, DomainError> {
        let kind: ImageKind = kind.parse()?;
        self.storage.file_path(kind, owner_id, file_name)
    }
}

fn category_error(e: DomainError) -> DomainError {
    match e {
        DomainError::AlreadyExists(_) => DomainError::bad_request(DUPLICATE_CATEGORY),
        other => other,
    }
}

fn product_error(e: DomainError) -> DomainError {
    match e {
        DomainError::ForeignKeyViolation => DomainError::bad_request(UNKNOWN_CATEGORY),
        DomainError::ConstraintViolation(name) if name == "stock" => {
            DomainError::bad_request("stock: must not be negative")
        }
        other => other,
    }
}
