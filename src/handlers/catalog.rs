use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::catalog::{Category, Product};
use crate::errors::AppError;
use crate::handlers::response::{ok, EnvelopeSchema};
use crate::handlers::validation::CatalogParams;
use crate::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub available: bool,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            image_url: c.image_url,
            available: c.available,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: String,
    #[schema(value_type = String)]
    pub price: BigDecimal,
    #[schema(value_type = String)]
    pub undiscounted_price: BigDecimal,
    pub image_url: String,
    pub available: bool,
    pub stock: i32,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            category_id: p.category_id,
            name: p.name,
            description: p.description,
            price: p.price,
            undiscounted_price: p.undiscounted_price,
            image_url: p.image_url,
            available: p.available,
            stock: p.stock,
        }
    }
}

fn products_body(products: Vec<Product>) -> Vec<ProductResponse> {
    products.into_iter().map(Into::into).collect()
}

#[utoipa::path(
    get,
    path = "/api/categories",
    params(CatalogParams),
    responses(
        (status = 200, description = "Available categories in id order", body = EnvelopeSchema),
        (status = 400, description = "Invalid pagination", body = EnvelopeSchema),
    ),
    tag = "catalog"
)]
pub async fn list_categories(
    state: web::Data<AppState>,
    query: web::Query<CatalogParams>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner().query()?;

    let categories = web::block(move || state.catalog.get_all_categories(&query)).await??;
    Ok(ok(categories
        .into_iter()
        .map(CategoryResponse::from)
        .collect::<Vec<_>>()))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category found", body = EnvelopeSchema),
        (status = 404, description = "Category not found or hidden", body = EnvelopeSchema),
    ),
    tag = "catalog"
)]
pub async fn get_category(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let category = web::block(move || state.catalog.get_category_by_id(id)).await??;
    Ok(ok(CategoryResponse::from(category)))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}/products",
    params(("id" = i32, Path, description = "Category id"), CatalogParams),
    responses(
        (status = 200, description = "Available products of the category", body = EnvelopeSchema),
    ),
    tag = "catalog"
)]
pub async fn list_category_products(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    query: web::Query<CatalogParams>,
) -> Result<HttpResponse, AppError> {
    let category_id = path.into_inner();
    let query = query.into_inner().query()?;

    let products =
        web::block(move || state.catalog.get_category_products(category_id, &query)).await??;
    Ok(ok(products_body(products)))
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(CatalogParams),
    responses(
        (status = 200, description = "Available products in id order", body = EnvelopeSchema),
    ),
    tag = "catalog"
)]
pub async fn list_products(
    state: web::Data<AppState>,
    query: web::Query<CatalogParams>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner().query()?;

    let products = web::block(move || state.catalog.get_all_products(&query)).await??;
    Ok(ok(products_body(products)))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = EnvelopeSchema),
        (status = 404, description = "Product not found or hidden", body = EnvelopeSchema),
    ),
    tag = "catalog"
)]
pub async fn get_product(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let product = web::block(move || state.catalog.get_product_by_id(id)).await??;
    Ok(ok(ProductResponse::from(product)))
}
