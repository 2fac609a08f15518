use std::collections::HashSet;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

use super::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderItem {
    pub product_id: i32,
    pub quantity: i32,
}

/// A validated order request: non-empty, positive ids and quantities, no
/// repeated product, sorted by ascending product id.
///
/// The ordering fixes the sequence in which product rows are locked while the
/// order is placed, so two orders sharing several products cannot deadlock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItems(Vec<OrderItem>);

impl OrderItems {
    pub fn new(mut items: Vec<OrderItem>) -> Result<Self, DomainError> {
        if items.is_empty() {
            return Err(DomainError::bad_request("products: cannot be blank"));
        }

        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if item.product_id <= 0 {
                return Err(DomainError::bad_request(format!(
                    "invalid product id {}",
                    item.product_id
                )));
            }
            if item.quantity < 1 {
                return Err(DomainError::bad_request(format!(
                    "quantity for product {} must be at least 1",
                    item.product_id
                )));
            }
            if !seen.insert(item.product_id) {
                return Err(DomainError::bad_request(format!(
                    "duplicate product id {}",
                    item.product_id
                )));
            }
        }

        items.sort_by_key(|item| item.product_id);
        Ok(Self(items))
    }

    pub fn iter(&self) -> impl Iterator<Item = &OrderItem> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Product fields read back while decrementing stock.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSnapshot {
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub undiscounted_price: BigDecimal,
    pub image_url: String,
    pub stock: i32,
}

/// A purchased product as it looked at the moment of sale.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
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

impl OrderLine {
    pub fn subtotal(&self) -> BigDecimal {
        &self.price * BigDecimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub date: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
    pub total_cost: BigDecimal,
}

impl Order {
    /// Assemble an order; the total is always derived from `lines`.
    pub fn new(id: i32, user_id: i32, date: DateTime<Utc>, lines: Vec<OrderLine>) -> Self {
        let total_cost = lines
            .iter()
            .map(OrderLine::subtotal)
            .fold(BigDecimal::from(0), |acc, subtotal| acc + subtotal);
        Self {
            id,
            user_id,
            date,
            lines,
            total_cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn item(product_id: i32, quantity: i32) -> OrderItem {
        OrderItem {
            product_id,
            quantity,
        }
    }

    fn line(id: i32, price: &str, quantity: i32) -> OrderLine {
        OrderLine {
            id,
            order_id: 1,
            product_id: id,
            name: format!("product {id}"),
            description: String::new(),
            price: BigDecimal::from_str(price).expect("valid decimal"),
            undiscounted_price: BigDecimal::from_str(price).expect("valid decimal"),
            image_url: String::new(),
            quantity,
        }
    }

    #[test]
    fn items_are_sorted_by_product_id() {
        let items = OrderItems::new(vec![item(9, 1), item(2, 4), item(5, 2)]).expect("valid");
        let ids: Vec<i32> = items.iter().map(|i| i.product_id).collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[test]
    fn empty_request_is_rejected() {
        assert!(matches!(
            OrderItems::new(vec![]),
            Err(DomainError::BadRequest(_))
        ));
    }

    #[test]
    fn duplicate_product_id_is_rejected() {
        let err = OrderItems::new(vec![item(3, 1), item(3, 2)]).unwrap_err();
        assert_eq!(err, DomainError::bad_request("duplicate product id 3"));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        assert!(OrderItems::new(vec![item(1, 0)]).is_err());
    }

    #[test]
    fn non_positive_product_id_is_rejected() {
        assert!(OrderItems::new(vec![item(0, 1)]).is_err());
        assert!(OrderItems::new(vec![item(-4, 1)]).is_err());
    }

    #[test]
    fn total_cost_is_sum_of_line_subtotals() {
        let order = Order::new(
            1,
            7,
            Utc::now(),
            vec![line(1, "5.00", 3), line(2, "0.99", 2)],
        );
        assert_eq!(order.total_cost, BigDecimal::from_str("16.98").unwrap());
    }

    #[test]
    fn order_without_lines_costs_nothing() {
        let order = Order::new(1, 7, Utc::now(), vec![]);
        assert_eq!(order.total_cost, BigDecimal::from(0));
    }
}
