use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::catalog::{CatalogQuery, Page};
use crate::errors::AppError;

const MAX_NAME_LEN: usize = 100;
const MAX_PASSWORD_LEN: usize = 30;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Page number, starting at 1.
    pub page: Option<i64>,
    /// Items per page, 1 to 100.
    #[serde(rename = "pageSize")]
    pub page_size: Option<i64>,
}

impl PageParams {
    pub fn page(&self) -> Result<Page, AppError> {
        Ok(Page::from_params(self.page, self.page_size)?)
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogParams {
    /// Page number, starting at 1.
    pub page: Option<i64>,
    /// Items per page, 1 to 100.
    #[serde(rename = "pageSize")]
    pub page_size: Option<i64>,
    /// Case-insensitive substring of the name.
    pub search: Option<String>,
}

impl CatalogParams {
    pub fn query(self) -> Result<CatalogQuery, AppError> {
        let page = Page::from_params(self.page, self.page_size)?;
        let search = self
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Ok(CatalogQuery { page, search })
    }
}

pub fn name(value: &str) -> Result<(), AppError> {
    let len = value.trim().chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        return Err(AppError::bad_request(format!(
            "name: must be between 1 and {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Same address grammar the mailer uses when it builds the `To` header.
pub fn email(value: &str) -> Result<(), AppError> {
    value
        .parse::<lettre::Address>()
        .map(|_| ())
        .map_err(|_| AppError::bad_request("email: invalid format"))
}

pub fn password(value: &str) -> Result<(), AppError> {
    let len = value.chars().count();
    if len == 0 || len > MAX_PASSWORD_LEN {
        return Err(AppError::bad_request(format!(
            "password: must be between 1 and {MAX_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

pub fn token(value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::bad_request("token: cannot be blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(email("ada@example.com").is_ok());
        assert!(email("ada.l+shop@mail.example.org").is_ok());
        assert!(email("@example.com").is_err());
        assert!(email("ada@@example.com").is_err());
        assert!(email("ada example@x.com").is_err());
        assert!(email("").is_err());
    }

    #[test]
    fn name_length_is_bounded() {
        assert!(name("Ada").is_ok());
        assert!(name("   ").is_err());
        assert!(name(&"x".repeat(101)).is_err());
        assert!(name(&"x".repeat(100)).is_ok());
    }

    #[test]
    fn password_length_is_bounded() {
        assert!(password("p").is_ok());
        assert!(password("").is_err());
        assert!(password(&"p".repeat(31)).is_err());
    }

    #[test]
    fn blank_search_is_dropped() {
        let query = CatalogParams {
            search: Some("  ".to_string()),
            ..Default::default()
        }
        .query()
        .unwrap();
        assert_eq!(query.search, None);
        assert_eq!(query.page, Page::default());
    }

    #[test]
    fn bad_page_is_client_error() {
        let params = PageParams {
            page: Some(0),
            page_size: Some(10),
        };
        assert!(matches!(params.page(), Err(AppError::BadRequest(_))));
    }
}
