use bigdecimal::BigDecimal;

use super::errors::DomainError;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    /// Build a window from 1-based `page` and `page_size`. Missing values fall
    /// back to the first page of [`DEFAULT_PAGE_SIZE`] items.
    pub fn from_params(page: Option<i64>, page_size: Option<i64>) -> Result<Self, DomainError> {
        match (page, page_size) {
            (Some(page), Some(size)) => {
                if page < 1 {
                    return Err(DomainError::bad_request("page must be at least 1"));
                }
                if !(1..=MAX_PAGE_SIZE).contains(&size) {
                    return Err(DomainError::bad_request(format!(
                        "pageSize must be between 1 and {MAX_PAGE_SIZE}"
                    )));
                }
                let offset = (page - 1)
                    .checked_mul(size)
                    .ok_or_else(|| DomainError::bad_request("page out of range"))?;
                Ok(Self {
                    limit: size,
                    offset,
                })
            }
            _ => Ok(Self::default()),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub page: Page,
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
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

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
    pub available: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

impl CategoryPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.available.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub undiscounted_price: BigDecimal,
    pub stock: i32,
    pub available: bool,
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::bad_request("name: cannot be blank"));
        }
        if self.stock < 0 {
            return Err(DomainError::bad_request("stock: must not be negative"));
        }
        validate_price("price", &self.price)?;
        validate_price("undiscounted_price", &self.undiscounted_price)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub category_id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<BigDecimal>,
    pub undiscounted_price: Option<BigDecimal>,
    pub stock: Option<i32>,
    pub available: Option<bool>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.category_id.is_none()
            && self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.undiscounted_price.is_none()
            && self.stock.is_none()
            && self.available.is_none()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if matches!(self.stock, Some(stock) if stock < 0) {
            return Err(DomainError::bad_request("stock: must not be negative"));
        }
        if let Some(price) = &self.price {
            validate_price("price", price)?;
        }
        if let Some(price) = &self.undiscounted_price {
            validate_price("undiscounted_price", price)?;
        }
        Ok(())
    }
}

fn validate_price(field: &str, price: &BigDecimal) -> Result<(), DomainError> {
    if price < &BigDecimal::from(0) {
        return Err(DomainError::bad_request(format!(
            "{field}: must not be negative"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn page_defaults_when_params_missing() {
        assert_eq!(Page::from_params(None, None).unwrap(), Page::default());
        assert_eq!(Page::from_params(Some(3), None).unwrap(), Page::default());
    }

    #[test]
    fn page_computes_offset() {
        let page = Page::from_params(Some(3), Some(20)).unwrap();
        assert_eq!(page, Page { limit: 20, offset: 40 });
    }

    #[test]
    fn page_rejects_out_of_range_values() {
        assert!(Page::from_params(Some(0), Some(10)).is_err());
        assert!(Page::from_params(Some(1), Some(0)).is_err());
        assert!(Page::from_params(Some(1), Some(MAX_PAGE_SIZE + 1)).is_err());
    }

    #[test]
    fn page_offset_overflow_is_bad_request() {
        let err = Page::from_params(Some(i64::MAX), Some(MAX_PAGE_SIZE)).unwrap_err();
        assert!(matches!(err, DomainError::BadRequest(msg) if msg == "page out of range"));
        let last = Page::from_params(Some(i64::MAX), Some(1)).unwrap();
        assert_eq!(last.offset, i64::MAX - 1);
    }

    #[test]
    fn empty_patches_are_detected() {
        assert!(CategoryPatch::default().is_empty());
        assert!(ProductPatch::default().is_empty());
        assert!(!ProductPatch {
            stock: Some(4),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn negative_stock_patch_is_rejected() {
        let patch = ProductPatch {
            stock: Some(-1),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn new_product_with_negative_price_is_rejected() {
        let product = NewProduct {
            category_id: 1,
            name: "Kettle".to_string(),
            description: String::new(),
            price: BigDecimal::from_str("-1.00").unwrap(),
            undiscounted_price: BigDecimal::from_str("2.00").unwrap(),
            stock: 1,
            available: true,
        };
        assert!(product.validate().is_err());
    }
}
