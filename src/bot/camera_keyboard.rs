use crate::camera::camera_info::CameraInfo;
use log::warn;
use teloxide::types::{KeyboardButton, KeyboardMarkup};

/// Ordered camera buttons. Insertion order is the row order of the reply keyboard,
/// one camera per row, and the button label is the camera name.
#[derive(Debug, Clone, Default)]
pub struct CameraKeyboard {
    cameras: Vec<CameraInfo>,
}

impl CameraKeyboard {
    pub fn new() -> Self {
        CameraKeyboard { cameras: Vec::new() }
    }

    pub fn add_camera(&mut self, id: impl Into<String>, name: impl Into<String>) {
        let camera = CameraInfo::new(id, name);
        if self.find_by_label(&camera.name).is_some() {
            warn!(
                "⚠️ Camera '{}' ({}) shares its button label with an earlier camera; presses go to the first one.",
                camera.name, camera.id
            );
        }
        self.cameras.push(camera);
    }

    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }

    pub fn find_by_label(&self, label: &str) -> Option<&CameraInfo> {
        self.cameras.iter().find(|camera| camera.name == label)
    }

    pub fn to_markup(&self) -> KeyboardMarkup {
        let rows: Vec<Vec<KeyboardButton>> = self
            .cameras
            .iter()
            .map(|camera| vec![KeyboardButton::new(camera.name.clone())])
            .collect();
        KeyboardMarkup::new(rows)
    }
}
