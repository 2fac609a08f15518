use chrono::Utc;
use diesel::prelude::*;
use log::warn;

use crate::db::DbPool;
use crate::domain::catalog::Page;
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderItems, ProductSnapshot};
use crate::domain::ports::OrderRepository;
use crate::schema::{ordered_products, orders, products};

use super::models::{
    NewOrderRow, NewOrderedProductRow, OrderRow, OrderedProductRow, ProductSnapshotRow,
};

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn assemble(order: OrderRow, lines: Vec<OrderedProductRow>) -> Order {
    Order::new(
        order.id,
        order.user_id,
        order.date,
        lines.into_iter().map(Into::into).collect(),
    )
}

impl OrderRepository for DieselOrderRepository {
    fn place(&self, user_id: i32, items: &OrderItems) -> Result<i32, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Insert the order
            let order_id: i32 = diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    user_id,
                    date: Utc::now(),
                })
                .returning(orders::id)
                .get_result(conn)?;

            // 2. Decrement stock item by item, in ascending product id order,
            //    reading the product back in the same statement.
            let mut lines = Vec::with_capacity(items.len());
            for item in items.iter() {
                let product: ProductSnapshot = diesel::update(products::table.find(item.product_id))
                    .set(products::stock.eq(products::stock - item.quantity))
                    .returning(ProductSnapshotRow::as_returning())
                    .get_result(conn)
                    .map_err(|e| {
                        let err = DomainError::from(e);
                        if matches!(err, DomainError::ConstraintViolation(_)) {
                            warn!(
                                "order for user {} exceeds stock of product {}",
                                user_id, item.product_id
                            );
                        }
                        err
                    })?
                    .into();

                lines.push(NewOrderedProductRow::snapshot(
                    order_id,
                    item.product_id,
                    item.quantity,
                    product,
                ));
            }

            // 3. Insert the snapshotted order lines
            diesel::insert_into(ordered_products::table)
                .values(&lines)
                .execute(conn)?;

            Ok(order_id)
        })
    }

    fn list(&self, user_id: i32, page: Page) -> Result<Vec<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let rows = orders::table
                .filter(orders::user_id.eq(user_id))
                .select(OrderRow::as_select())
                .order(orders::id.asc())
                .limit(page.limit)
                .offset(page.offset)
                .load(conn)?;

            let lines = OrderedProductRow::belonging_to(&rows)
                .select(OrderedProductRow::as_select())
                .order(ordered_products::id.asc())
                .load(conn)?;

            Ok(lines
                .grouped_by(&rows)
                .into_iter()
                .zip(rows)
                .map(|(lines, order)| assemble(order, lines))
                .collect())
        })
    }

    fn find(&self, user_id: i32, order_id: i32) -> Result<Order, DomainError> {
        let mut conn = self.pool.get()?;

        // Keyed by both ids: another user's order reads as missing.
        let order = orders::table
            .filter(orders::id.eq(order_id))
            .filter(orders::user_id.eq(user_id))
            .select(OrderRow::as_select())
            .first(&mut conn)?;

        let lines = OrderedProductRow::belonging_to(&order)
            .select(OrderedProductRow::as_select())
            .order(ordered_products::id.asc())
            .load(&mut conn)?;

        Ok(assemble(order, lines))
    }
}
