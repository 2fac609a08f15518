use std::str::FromStr;

use actix_multipart::form::bytes::Bytes;
use actix_multipart::form::text::Text;
use actix_multipart::form::MultipartForm;
use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;

use crate::domain::catalog::{CategoryPatch, NewCategory, NewProduct, ProductPatch};
use crate::errors::AppError;
use crate::handlers::extractors::AdminGuard;
use crate::handlers::profile::image_upload;
use crate::handlers::response::{created, ok_empty, EnvelopeSchema};
use crate::handlers::validation;
use crate::AppState;

#[derive(Debug, MultipartForm)]
pub struct NewCategoryForm {
    pub name: Text<String>,
    pub description: Option<Text<String>>,
    pub available: Option<Text<bool>>,
    #[multipart(limit = "10MB")]
    pub image_file: Bytes,
}

#[derive(Debug, MultipartForm)]
pub struct CategoryPatchForm {
    pub name: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub available: Option<Text<bool>>,
    #[multipart(limit = "10MB")]
    pub image_file: Option<Bytes>,
}

#[derive(Debug, MultipartForm)]
pub struct NewProductForm {
    pub category_id: Text<i32>,
    pub name: Text<String>,
    pub description: Option<Text<String>>,
    pub price: Text<String>,
    pub undiscounted_price: Text<String>,
    pub stock: Text<i32>,
    pub available: Option<Text<bool>>,
    #[multipart(limit = "10MB")]
    pub image_file: Bytes,
}

#[derive(Debug, MultipartForm)]
pub struct ProductPatchForm {
    pub category_id: Option<Text<i32>>,
    pub name: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub price: Option<Text<String>>,
    pub undiscounted_price: Option<Text<String>>,
    pub stock: Option<Text<i32>>,
    pub available: Option<Text<bool>>,
    #[multipart(limit = "10MB")]
    pub image_file: Option<Bytes>,
}

/// Prices are stored as `NUMERIC(10, 2)`.
const PRICE_SCALE: i64 = 2;
const PRICE_LIMIT: i64 = 100_000_000;

fn price(field: &str, raw: &str) -> Result<BigDecimal, AppError> {
    let value = BigDecimal::from_str(raw.trim())
        .map_err(|_| AppError::bad_request(format!("{field}: invalid decimal '{raw}'")))?;
    let (_, scale) = value.normalized().as_bigint_and_exponent();
    if scale > PRICE_SCALE {
        return Err(AppError::bad_request(format!(
            "{field}: at most {PRICE_SCALE} decimal places"
        )));
    }
    if value.abs() >= BigDecimal::from(PRICE_LIMIT) {
        return Err(AppError::bad_request(format!(
            "{field}: must be less than {PRICE_LIMIT}"
        )));
    }
    Ok(value.with_scale(PRICE_SCALE))
}

fn text<T: serde::de::DeserializeOwned>(part: Option<Text<T>>) -> Option<T> {
    part.map(Text::into_inner)
}

/// POST /admin/categories
///
/// Multipart form: `name`, `description`, `available`, `image_file`.
#[utoipa::path(
    post,
    path = "/admin/categories",
    responses(
        (status = 201, description = "Category created", body = EnvelopeSchema),
        (status = 400, description = "Invalid input or duplicate name", body = EnvelopeSchema),
        (status = 403, description = "Not an admin", body = EnvelopeSchema),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn create_category(
    _admin: AdminGuard,
    state: web::Data<AppState>,
    MultipartForm(form): MultipartForm<NewCategoryForm>,
) -> Result<HttpResponse, AppError> {
    let category = NewCategory {
        name: form.name.into_inner().trim().to_string(),
        description: text(form.description).unwrap_or_default(),
        available: text(form.available).unwrap_or(true),
    };
    validation::name(&category.name)?;
    let image = image_upload(form.image_file)?;

    let id = web::block(move || state.catalog.create_category(category, image)).await??;
    Ok(created(id))
}

/// PUT /admin/categories/{id}
///
/// Multipart form; every part is optional but at least one is required.
#[utoipa::path(
    put,
    path = "/admin/categories/{id}",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category updated", body = EnvelopeSchema),
        (status = 400, description = "Nothing to update or invalid input", body = EnvelopeSchema),
        (status = 404, description = "Category not found", body = EnvelopeSchema),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn update_category(
    _admin: AdminGuard,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    MultipartForm(form): MultipartForm<CategoryPatchForm>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let patch = CategoryPatch {
        name: text(form.name).map(|n| n.trim().to_string()),
        description: text(form.description),
        available: text(form.available),
    };
    if let Some(name) = &patch.name {
        validation::name(name)?;
    }
    let image = form.image_file.map(image_upload).transpose()?;

    web::block(move || state.catalog.update_category(id, patch, image)).await??;
    Ok(ok_empty())
}

/// POST /admin/products
///
/// Multipart form: `category_id`, `name`, `description`, `price`,
/// `undiscounted_price`, `stock`, `available`, `image_file`.
#[utoipa::path(
    post,
    path = "/admin/products",
    responses(
        (status = 201, description = "Product created", body = EnvelopeSchema),
        (status = 400, description = "Invalid input or unknown category", body = EnvelopeSchema),
        (status = 403, description = "Not an admin", body = EnvelopeSchema),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn create_product(
    _admin: AdminGuard,
    state: web::Data<AppState>,
    MultipartForm(form): MultipartForm<NewProductForm>,
) -> Result<HttpResponse, AppError> {
    let product = NewProduct {
        category_id: form.category_id.into_inner(),
        name: form.name.into_inner().trim().to_string(),
        description: text(form.description).unwrap_or_default(),
        price: price("price", &form.price)?,
        undiscounted_price: price("undiscounted_price", &form.undiscounted_price)?,
        stock: form.stock.into_inner(),
        available: text(form.available).unwrap_or(true),
    };
    validation::name(&product.name)?;
    let image = image_upload(form.image_file)?;

    let id = web::block(move || state.catalog.create_product(product, image)).await??;
    Ok(created(id))
}

#[utoipa::path(
    put,
    path = "/admin/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product updated", body = EnvelopeSchema),
        (status = 400, description = "Nothing to update or invalid input", body = EnvelopeSchema),
        (status = 404, description = "Product not found", body = EnvelopeSchema),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn update_product(
    _admin: AdminGuard,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    MultipartForm(form): MultipartForm<ProductPatchForm>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let patch = ProductPatch {
        category_id: text(form.category_id),
        name: text(form.name).map(|n| n.trim().to_string()),
        description: text(form.description),
        price: text(form.price).map(|p| price("price", &p)).transpose()?,
        undiscounted_price: text(form.undiscounted_price)
            .map(|p| price("undiscounted_price", &p))
            .transpose()?,
        stock: text(form.stock),
        available: text(form.available),
    };
    if let Some(name) = &patch.name {
        validation::name(name)?;
    }
    let image = form.image_file.map(image_upload).transpose()?;

    web::block(move || state.catalog.update_product(id, patch, image)).await??;
    Ok(ok_empty())
}
