pub mod admin;
pub mod auth;

pub use admin::AdminGate;
pub use auth::AuthMiddleware;
