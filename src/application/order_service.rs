use std::sync::Arc;

use log::info;

use crate::domain::catalog::Page;
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderItems};
use crate::domain::ports::OrderRepository;

pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
}

impl OrderService {
    pub fn new(repo: Arc<dyn OrderRepository>) -> Self {
        Self { repo }
    }

    /// Place the order and return its id. Either every product's stock is
    /// decremented and the order is stored, or nothing changes.
    pub fn place_order(&self, user_id: i32, items: &OrderItems) -> Result<i32, DomainError> {
        let order_id = self.repo.place(user_id, items).map_err(|e| match e {
            DomainError::NoRows => DomainError::NotFound("product"),
            DomainError::ConstraintViolation(name) if name == "stock" => {
                DomainError::bad_request("stock exceeded")
            }
            other => other,
        })?;

        info!(
            "user {} placed order {} with {} product(s)",
            user_id,
            order_id,
            items.len()
        );
        Ok(order_id)
    }

    pub fn get_all_orders(&self, user_id: i32, page: Page) -> Result<Vec<Order>, DomainError> {
        self.repo.list(user_id, page)
    }

    pub fn get_order_by_id(&self, user_id: i32, order_id: i32) -> Result<Order, DomainError> {
        self.repo
            .find(user_id, order_id)
            .map_err(|e| e.or_not_found("order"))
    }
}
