use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::catalog::{
    Category, CategoryPatch, NewCategory, NewProduct, Product, ProductPatch,
};
use crate::domain::order::{OrderLine, ProductSnapshot};
use crate::domain::user::User;
use crate::schema::{categories, ordered_products, orders, products, users};

// ── Users ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub profile_image: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            profile_image: row.profile_image,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// `None` fields are left untouched by the generated `UPDATE`.
#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = users)]
pub struct UserChangeset {
    pub name: Option<String>,
    pub profile_image: Option<String>,
}

// ── Catalog ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CategoryRow {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub available: bool,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            description: row.description,
            image_url: row.image_url,
            available: row.available,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = categories)]
pub struct NewCategoryRow {
    pub name: String,
    pub description: String,
    pub available: bool,
}

impl From<NewCategory> for NewCategoryRow {
    fn from(c: NewCategory) -> Self {
        NewCategoryRow {
            name: c.name,
            description: c.description,
            available: c.available,
        }
    }
}

#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = categories)]
pub struct CategoryChangeset {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
    pub image_url: Option<String>,
}

impl From<CategoryPatch> for CategoryChangeset {
    fn from(p: CategoryPatch) -> Self {
        CategoryChangeset {
            name: p.name,
            description: p.description,
            available: p.available,
            image_url: None,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub undiscounted_price: BigDecimal,
    pub image_url: String,
    pub available: bool,
    pub stock: i32,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            category_id: row.category_id,
            name: row.name,
            description: row.description,
            price: row.price,
            undiscounted_price: row.undiscounted_price,
            image_url: row.image_url,
            available: row.available,
            stock: row.stock,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = products)]
pub struct NewProductRow {
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub undiscounted_price: BigDecimal,
    pub stock: i32,
    pub available: bool,
}

impl From<NewProduct> for NewProductRow {
    fn from(p: NewProduct) -> Self {
        NewProductRow {
            category_id: p.category_id,
            name: p.name,
            description: p.description,
            price: p.price,
            undiscounted_price: p.undiscounted_price,
            stock: p.stock,
            available: p.available,
        }
    }
}

#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = products)]
pub struct ProductChangeset {
    pub category_id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<BigDecimal>,
    pub undiscounted_price: Option<BigDecimal>,
    pub stock: Option<i32>,
    pub available: Option<bool>,
    pub image_url: Option<String>,
}

impl From<ProductPatch> for ProductChangeset {
    fn from(p: ProductPatch) -> Self {
        ProductChangeset {
            category_id: p.category_id,
            name: p.name,
            description: p.description,
            price: p.price,
            undiscounted_price: p.undiscounted_price,
            stock: p.stock,
            available: p.available,
            image_url: None,
        }
    }
}

/// Columns read back by the stock-decrementing `UPDATE ... RETURNING`.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductSnapshotRow {
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub undiscounted_price: BigDecimal,
    pub image_url: String,
    pub stock: i32,
}

impl From<ProductSnapshotRow> for ProductSnapshot {
    fn from(row: ProductSnapshotRow) -> Self {
        ProductSnapshot {
            name: row.name,
            description: row.description,
            price: row.price,
            undiscounted_price: row.undiscounted_price,
            image_url: row.image_url,
            stock: row.stock,
        }
    }
}

// ── Orders ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: i32,
    pub user_id: i32,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub user_id: i32,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = ordered_products)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderedProductRow {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub undiscounted_price: BigDecimal,
    pub image_url: String,
    pub quantity: i32,
}

impl From<OrderedProductRow> for OrderLine {
    fn from(row: OrderedProductRow) -> Self {
        OrderLine {
            id: row.id,
            order_id: row.order_id,
            product_id: row.product_id,
            name: row.name,
            description: row.description,
            price: row.price,
            undiscounted_price: row.undiscounted_price,
            image_url: row.image_url,
            quantity: row.quantity,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = ordered_products)]
pub struct NewOrderedProductRow {
    pub order_id: i32,
    pub product_id: i32,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub undiscounted_price: BigDecimal,
    pub image_url: String,
    pub quantity: i32,
}

impl NewOrderedProductRow {
    pub fn snapshot(
        order_id: i32,
        product_id: i32,
        quantity: i32,
        product: ProductSnapshot,
    ) -> Self {
        NewOrderedProductRow {
            order_id,
            product_id,
            name: product.name,
            description: product.description,
            price: product.price,
            undiscounted_price: product.undiscounted_price,
            image_url: product.image_url,
            quantity,
        }
    }
}
