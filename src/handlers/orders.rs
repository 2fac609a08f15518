use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::order::{Order, OrderItem, OrderItems, OrderLine};
use crate::errors::AppError;
use crate::handlers::extractors::AuthUser;
use crate::handlers::response::{created, ok, EnvelopeSchema};
use crate::handlers::validation::PageParams;
use crate::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderProductRequest {
    pub id: i32,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub products: Vec<OrderProductRequest>,
}

impl CreateOrderRequest {
    fn into_items(self) -> Result<OrderItems, AppError> {
        let items = self
            .products
            .into_iter()
            .map(|p| OrderItem {
                product_id: p.id,
                quantity: p.quantity,
            })
            .collect();
        Ok(OrderItems::new(items)?)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderedProductResponse {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub name: String,
    pub description: String,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    #[schema(value_type = String)]
    pub price: BigDecimal,
    #[schema(value_type = String)]
    pub undiscounted_price: BigDecimal,
    pub image_url: String,
    pub quantity: i32,
}

impl From<OrderLine> for OrderedProductResponse {
    fn from(line: OrderLine) -> Self {
        Self {
            id: line.id,
            order_id: line.order_id,
            product_id: line.product_id,
            name: line.name,
            description: line.description,
            price: line.price,
            undiscounted_price: line.undiscounted_price,
            image_url: line.image_url,
            quantity: line.quantity,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: i32,
    pub user_id: i32,
    pub date: DateTime<Utc>,
    pub products: Vec<OrderedProductResponse>,
    #[schema(value_type = String)]
    pub total_cost: BigDecimal,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            date: order.date,
            products: order.lines.into_iter().map(Into::into).collect(),
            total_cost: order.total_cost,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /profile/orders
///
/// Places an order for the signed-in user. Stock of every product is
/// decremented in the same transaction that stores the order, so a failure on
/// any product leaves the catalog untouched.
#[utoipa::path(
    post,
    path = "/profile/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created successfully", body = EnvelopeSchema),
        (status = 400, description = "Invalid items or stock exceeded", body = EnvelopeSchema),
        (status = 404, description = "Product not found", body = EnvelopeSchema),
        (status = 500, description = "Internal server error", body = EnvelopeSchema),
    ),
    security(("bearer" = [])),
    tag = "orders"
)]
pub async fn create_order(
    state: web::Data<AppState>,
    user: AuthUser,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let items = body.into_inner().into_items()?;

    let order_id = web::block(move || state.orders.place_order(user.0, &items)).await??;
    Ok(created(order_id))
}

/// GET /profile/orders
///
/// Orders of the signed-in user in id order, each with its products.
#[utoipa::path(
    get,
    path = "/profile/orders",
    params(PageParams),
    responses(
        (status = 200, description = "Page of orders", body = EnvelopeSchema),
        (status = 400, description = "Invalid pagination", body = EnvelopeSchema),
    ),
    security(("bearer" = [])),
    tag = "orders"
)]
pub async fn list_orders(
    state: web::Data<AppState>,
    user: AuthUser,
    query: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    let page = query.page()?;

    let orders = web::block(move || state.orders.get_all_orders(user.0, page)).await??;
    Ok(ok(orders
        .into_iter()
        .map(OrderResponse::from)
        .collect::<Vec<_>>()))
}

/// GET /profile/orders/{id}
///
/// Another user's order is reported as not found.
#[utoipa::path(
    get,
    path = "/profile/orders/{id}",
    params(
        ("id" = i32, Path, description = "Order id"),
    ),
    responses(
        (status = 200, description = "Order found", body = EnvelopeSchema),
        (status = 404, description = "Order not found", body = EnvelopeSchema),
    ),
    security(("bearer" = [])),
    tag = "orders"
)]
pub async fn get_order(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let order = web::block(move || state.orders.get_order_by_id(user.0, order_id)).await??;
    Ok(ok(OrderResponse::from(order)))
}
