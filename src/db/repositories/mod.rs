pub mod alerts;
pub mod cameras;

pub use alerts::AlertsRepository;
pub use cameras::CamerasRepository;
