pub mod auth;
pub mod catalog;
pub mod errors;
pub mod media;
pub mod order;
pub mod ports;
pub mod user;
