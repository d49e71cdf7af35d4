pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod services;

pub use error::Error;

// Re-export main components for easier use
pub use api::rest::{create_router, AppState, RestApi};
pub use db::DatabaseService;
pub use services::{classify, HealthChecker, HealthStatus};
