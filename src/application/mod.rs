pub mod auth_service;
pub mod catalog_service;
pub mod order_service;
pub mod password;
pub mod profile_service;
pub mod tokens;

pub use auth_service::AuthService;
pub use catalog_service::CatalogService;
pub use order_service::OrderService;
pub use profile_service::ProfileService;
pub use tokens::TokenIssuer;
