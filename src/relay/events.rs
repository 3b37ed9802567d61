use crate::camera::camera_info::CameraInfo;
use chrono::{DateTime, Utc};
use teloxide::types::Message;
use tokio::sync::broadcast;

const EVENT_BUS_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotionEvent {
    pub camera_id: String,
    pub received_at: DateTime<Utc>,
}

impl MotionEvent {
    pub fn new(camera_id: impl Into<String>) -> Self {
        MotionEvent {
            camera_id: camera_id.into(),
            received_at: Utc::now(),
        }
    }
}

/// Everything the bot and the motion webhook publish for subscribers.
#[derive(Debug, Clone)]
pub enum BridgeEvent {
    /// `request` is the button message; the snapshot is sent as a reply to it.
    CameraButtonPressed { camera: CameraInfo, request: Box<Message> },
    Motion(MotionEvent),
}

pub type EventSender = broadcast::Sender<BridgeEvent>;
pub type EventReceiver = broadcast::Receiver<BridgeEvent>;

pub fn event_bus() -> EventSender {
    let (sender, _) = broadcast::channel(EVENT_BUS_CAPACITY);
    sender
}

/// Publishes `event`; returns false when nobody is listening.
pub fn publish(events: &EventSender, event: BridgeEvent) -> bool {
    events.send(event).is_ok()
}
