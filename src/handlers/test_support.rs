use std::sync::Arc;

use actix_web::web;

use crate::application::{AuthService, CatalogService, OrderService, ProfileService, TokenIssuer};
use crate::config::{ClientConfig, TokenConfig};
use crate::domain::ports::{
    MockCategoryRepository, MockImageStorage, MockMailer, MockOrderRepository,
    MockProductRepository, MockUserRepository,
};
use crate::AppState;

pub const ADMIN_SECRET: &str = "admin-secret";

pub fn tokens() -> TokenIssuer {
    TokenIssuer::new(&TokenConfig {
        sign_key: "test-sign-key".to_string(),
        password_recovery_key: "test-recovery-key".to_string(),
    })
}

/// `Authorization` header value carrying an access token for `user_id`.
pub fn bearer(user_id: i32) -> String {
    let token = tokens()
        .access_token(user_id)
        .expect("access token should encode");
    format!("Bearer {token}")
}

/// One mock per port; set expectations, then turn it into app state.
#[derive(Default)]
pub struct Mocks {
    pub users: MockUserRepository,
    pub categories: MockCategoryRepository,
    pub products: MockProductRepository,
    pub orders: MockOrderRepository,
    pub storage: MockImageStorage,
    pub mailer: MockMailer,
}

impl Mocks {
    pub fn into_state(self) -> web::Data<AppState> {
        let users = Arc::new(self.users);
        web::Data::new(AppState {
            auth: AuthService::new(
                users.clone(),
                Arc::new(self.mailer),
                tokens(),
                ClientConfig {
                    confirmation_email_url: "http://client.test/confirm".to_string(),
                    password_recovery_url: "http://client.test/recover".to_string(),
                },
            ),
            profile: ProfileService::new(users),
            orders: OrderService::new(Arc::new(self.orders)),
            catalog: CatalogService::new(
                Arc::new(self.categories),
                Arc::new(self.products),
                Arc::new(self.storage),
            ),
            admin_secret: ADMIN_SECRET.to_string(),
        })
    }
}
