pub mod classification;
pub mod health;

pub use classification::{classify, Classification};
pub use health::{HealthChecker, HealthStatus};
