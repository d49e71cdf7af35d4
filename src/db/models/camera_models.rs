use serde::{Deserialize, Serialize};

/// Camera model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Camera {
    pub id: i64,
    pub name: String,
    #[serde(rename = "streamUrl")]
    pub stream_url: String,
    pub location: String,
}

/// Fields required to insert a camera; the id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewCamera {
    pub name: String,
    pub stream_url: String,
    pub location: String,
}

/// Partial camera update. Only `Some` fields are written.
#[derive(Debug, Clone, Default)]
pub struct CameraUpdate {
    pub name: Option<String>,
    pub stream_url: Option<String>,
    pub location: Option<String>,
}

impl CameraUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.stream_url.is_none() && self.location.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_serializes_stream_url_in_camel_case() {
        let camera = Camera {
            id: 7,
            name: "Lobby".to_string(),
            stream_url: "http://10.0.0.7:8080".to_string(),
            location: "Building A".to_string(),
        };

        let value = serde_json::to_value(&camera).unwrap();
        assert_eq!(value["streamUrl"], "http://10.0.0.7:8080");
        assert!(value.get("stream_url").is_none());
    }

    #[test]
    fn empty_update() {
        assert!(CameraUpdate::default().is_empty());
        let update = CameraUpdate {
            location: Some("Dock 4".to_string()),
            ..CameraUpdate::default()
        };
        assert!(!update.is_empty());
    }
}
