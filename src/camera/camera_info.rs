use serde::Deserialize;

/// A camera as reported by `getCameraUserAttributesList`.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CameraInfo {
    #[serde(rename = "cameraId")]
    pub id: String,
    #[serde(rename = "cameraName")]
    pub name: String,
}

impl CameraInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        CameraInfo {
            id: id.into(),
            name: name.into(),
        }
    }
}
