pub mod alert_models;
pub mod camera_models;

pub use alert_models::{Alert, AlertType, NewAlert, Severity};
pub use camera_models::{Camera, CameraUpdate, NewCamera};
