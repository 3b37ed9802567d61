use crate::bot::recipient::Recipient;
use crate::camera::camera_info::CameraInfo;
use crate::errors::AppError;
use crate::relay::events::{BridgeEvent, EventReceiver, MotionEvent};
use crate::relay::photo_sink::PhotoSink;
use crate::relay::snapshot_source::SnapshotSource;
use chrono::Utc;
use futures::future::join_all;
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Instant;
use teloxide::types::Message;
use tokio::sync::broadcast::error::RecvError;

/// Turns bridge events into snapshot fetches and photo sends.
///
/// Failures stay local to the event that caused them: they are logged, a
/// failed button press is answered with a short text, and the relay carries
/// on with the next event.
#[derive(Clone)]
pub struct SnapshotRelay {
    source: Arc<dyn SnapshotSource>,
    sink: Arc<dyn PhotoSink>,
    motion_recipients: Arc<Vec<Recipient>>,
}

impl SnapshotRelay {
    pub fn new(
        source: Arc<dyn SnapshotSource>,
        sink: Arc<dyn PhotoSink>,
        motion_recipients: Vec<Recipient>,
    ) -> Self {
        SnapshotRelay {
            source,
            sink,
            motion_recipients: Arc::new(motion_recipients),
        }
    }

    /// Consumes events until the channel closes. Each event runs in its own task.
    pub async fn run(self, mut events: EventReceiver) {
        info!("🔁 Snapshot relay started ({} motion recipient(s))", self.motion_recipients.len());
        loop {
            match events.recv().await {
                Ok(event) => {
                    let relay = self.clone();
                    tokio::spawn(async move {
                        if let Err(e) = relay.handle_event(event).await {
                            error!("❌ Event handling failed: {:#}", e);
                        }
                    });
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("⚠️ Snapshot relay fell behind, {} event(s) skipped.", skipped);
                }
                Err(RecvError::Closed) => {
                    info!("Event channel closed, snapshot relay stopping.");
                    break;
                }
            }
        }
    }

    pub async fn handle_event(&self, event: BridgeEvent) -> Result<(), AppError> {
        match event {
            BridgeEvent::CameraButtonPressed { camera, request } => {
                self.handle_button_press(&camera, &request).await
            }
            BridgeEvent::Motion(motion) => self.handle_motion(&motion).await.map(|_| ()),
        }
    }

    /// Replies to the requester with a snapshot, or with an apology text if the fetch fails.
    pub async fn handle_button_press(&self, camera: &CameraInfo, request: &Message) -> Result<(), AppError> {
        let start_time = Instant::now();
        let reply_to = Recipient::reply_target(request);
        match self.source.fetch_snapshot(&camera.id).await {
            Ok(image) => {
                self.sink.reply_with_photo(request, image).await?;
                debug!("Snapshot of '{}' delivered to {} in {:?}", camera.name, reply_to, start_time.elapsed());
                Ok(())
            }
            Err(e) => {
                error!("❌ Snapshot of '{}' ({}) for {} failed: {}", camera.name, camera.id, reply_to, e);
                let text = format!("Sorry, could not get a snapshot from {} right now.", camera.name);
                self.sink.send_text(&reply_to, &text).await?;
                Err(e)
            }
        }
    }

    /// Sends the motion snapshot to every recipient and returns how many got it.
    pub async fn handle_motion(&self, motion: &MotionEvent) -> Result<usize, AppError> {
        let start_time = Instant::now();
        let image = self.source.fetch_snapshot(&motion.camera_id).await?;

        let sends = self.motion_recipients.iter().map(|recipient| {
            let image = image.clone();
            async move {
                info!("📨 Sending motion event for '{}' to: {}", motion.camera_id, recipient);
                (recipient, self.sink.send_photo(recipient, image).await)
            }
        });

        let mut delivered = 0;
        for (recipient, result) in join_all(sends).await {
            match result {
                Ok(()) => delivered += 1,
                Err(e) => error!("❌ Motion photo for '{}' to {} failed: {}", motion.camera_id, recipient, e),
            }
        }

        let latency = Utc::now().signed_duration_since(motion.received_at);
        info!(
            "✅ Motion event for '{}' delivered to {}/{} recipient(s) in {:?} ({} ms after receipt)",
            motion.camera_id,
            delivered,
            self.motion_recipients.len(),
            start_time.elapsed(),
            latency.num_milliseconds()
        );
        Ok(delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::test_messages::{group_message, private_message, supergroup_message};
    use crate::camera::nx_client::NxClient;
    use crate::relay::events;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct FakeSource {
        fail_for: Option<String>,
        requested: Mutex<Vec<String>>,
    }

    impl FakeSource {
        fn new(fail_for: Option<&str>) -> Self {
            FakeSource {
                fail_for: fail_for.map(str::to_string),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SnapshotSource for FakeSource {
        async fn fetch_snapshot(&self, camera_id: &str) -> Result<Vec<u8>, AppError> {
            self.requested.lock().unwrap().push(camera_id.to_string());
            if self.fail_for.as_deref() == Some(camera_id) {
                return Err(AppError::Network("connection reset".to_string()));
            }
            Ok(camera_id.as_bytes().to_vec())
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Sent {
        Photo(Recipient, Vec<u8>),
        Text(Recipient, String),
    }

    #[derive(Default)]
    struct RecordingSink {
        reject: Option<Recipient>,
        sent: Mutex<Vec<Sent>>,
    }

    impl RecordingSink {
        fn sent(&self) -> Vec<Sent> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PhotoSink for RecordingSink {
        async fn send_photo(&self, recipient: &Recipient, image: Vec<u8>) -> Result<(), AppError> {
            if self.reject.as_ref() == Some(recipient) {
                return Err(AppError::Telegram("chat not found".to_string()));
            }
            self.sent.lock().unwrap().push(Sent::Photo(recipient.clone(), image));
            Ok(())
        }

        async fn send_text(&self, recipient: &Recipient, text: &str) -> Result<(), AppError> {
            self.sent.lock().unwrap().push(Sent::Text(recipient.clone(), text.to_string()));
            Ok(())
        }
    }

    fn relay(source: Arc<FakeSource>, sink: Arc<RecordingSink>, recipients: Vec<Recipient>) -> SnapshotRelay {
        SnapshotRelay::new(source, sink, recipients)
    }

    #[tokio::test]
    async fn reply_with_photo_goes_to_private_sender() {
        let sink = RecordingSink::default();
        sink.reply_with_photo(&private_message(4242, "Front Door"), vec![1, 2, 3])
            .await
            .unwrap();
        assert_eq!(sink.sent(), vec![Sent::Photo(Recipient::Chat(4242), vec![1, 2, 3])]);
    }

    #[tokio::test]
    async fn reply_with_photo_goes_to_group_chat() {
        let sink = RecordingSink::default();
        sink.reply_with_photo(&group_message(-100555, 4242, "Front Door"), vec![1])
            .await
            .unwrap();
        sink.reply_with_photo(&supergroup_message(-100777, 4242, "Front Door"), vec![2])
            .await
            .unwrap();
        assert_eq!(
            sink.sent(),
            vec![
                Sent::Photo(Recipient::Chat(-100555), vec![1]),
                Sent::Photo(Recipient::Chat(-100777), vec![2]),
            ]
        );
    }

    #[tokio::test]
    async fn button_press_replies_with_photo() {
        let source = Arc::new(FakeSource::new(None));
        let sink = Arc::new(RecordingSink::default());
        let relay = relay(source.clone(), sink.clone(), vec![]);

        relay
            .handle_button_press(&CameraInfo::new("c1", "Front Door"), &private_message(42, "Front Door"))
            .await
            .unwrap();

        assert_eq!(*source.requested.lock().unwrap(), vec!["c1".to_string()]);
        assert_eq!(sink.sent(), vec![Sent::Photo(Recipient::Chat(42), b"c1".to_vec())]);
    }

    #[tokio::test]
    async fn group_button_press_replies_to_group() {
        let source = Arc::new(FakeSource::new(None));
        let sink = Arc::new(RecordingSink::default());
        let relay = relay(source, sink.clone(), vec![]);

        relay
            .handle_button_press(&CameraInfo::new("c2", "Garage"), &group_message(-100555, 42, "Garage"))
            .await
            .unwrap();

        assert_eq!(sink.sent(), vec![Sent::Photo(Recipient::Chat(-100555), b"c2".to_vec())]);
    }

    #[tokio::test]
    async fn failed_fetch_is_reported_to_requester() {
        let source = Arc::new(FakeSource::new(Some("c1")));
        let sink = Arc::new(RecordingSink::default());
        let relay = relay(source, sink.clone(), vec![]);

        let result = relay
            .handle_button_press(&CameraInfo::new("c1", "Front Door"), &private_message(42, "Front Door"))
            .await;

        assert!(matches!(result, Err(AppError::Network(_))));
        match sink.sent().as_slice() {
            [Sent::Text(to, text)] => {
                assert_eq!(*to, Recipient::Chat(42));
                assert!(text.contains("Front Door"));
            }
            other => panic!("unexpected sends: {:?}", other),
        }
    }

    #[tokio::test]
    async fn motion_is_broadcast_to_all_recipients() {
        let source = Arc::new(FakeSource::new(None));
        let sink = Arc::new(RecordingSink {
            reject: Some(Recipient::Username("@gone".into())),
            ..Default::default()
        });
        let recipients = vec![
            Recipient::Chat(1),
            Recipient::Username("@gone".into()),
            Recipient::Chat(-100),
        ];
        let relay = relay(source, sink.clone(), recipients);

        let delivered = relay.handle_motion(&MotionEvent::new("cam-7")).await.unwrap();

        assert_eq!(delivered, 2);
        let sent = sink.sent();
        assert!(sent.contains(&Sent::Photo(Recipient::Chat(1), b"cam-7".to_vec())));
        assert!(sent.contains(&Sent::Photo(Recipient::Chat(-100), b"cam-7".to_vec())));
    }

    #[tokio::test]
    async fn motion_fetch_failure_sends_nothing() {
        let source = Arc::new(FakeSource::new(Some("cam-7")));
        let sink = Arc::new(RecordingSink::default());
        let relay = relay(source, sink.clone(), vec![Recipient::Chat(1)]);

        assert!(relay.handle_motion(&MotionEvent::new("cam-7")).await.is_err());
        assert!(sink.sent().is_empty());
    }

    #[tokio::test]
    async fn relay_keeps_running_after_a_failed_event() {
        let source = Arc::new(FakeSource::new(Some("broken")));
        let sink = Arc::new(RecordingSink::default());
        let relay = relay(source, sink.clone(), vec![Recipient::Chat(9)]);

        let bus = events::event_bus();
        let task = tokio::spawn(relay.run(bus.subscribe()));
        bus.send(BridgeEvent::Motion(MotionEvent::new("broken"))).unwrap();
        bus.send(BridgeEvent::Motion(MotionEvent::new("ok"))).unwrap();

        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        while sink.sent().is_empty() && tokio::time::Instant::now() < deadline {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(sink.sent(), vec![Sent::Photo(Recipient::Chat(9), b"ok".to_vec())]);

        drop(bus);
        tokio::time::timeout(Duration::from_secs(5), task).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn camera_list_button_fetches_snapshot_from_nx() {
        let server = MockServer::start().await;
        Mock::given(path("/ec2/getCurrentTime"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(path("/ec2/getCameraUserAttributesList"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"[{"cameraId":"c1","cameraName":"Front Door"}]"#),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ec2/cameraThumbnail"))
            .and(query_param("cameraId", "c1"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8]))
            .expect(1)
            .mount(&server)
            .await;

        let nx = NxClient::connect(&server.address().to_string(), "admin", "secret").await.unwrap();
        let mut keyboard = crate::bot::camera_keyboard::CameraKeyboard::new();
        for camera in nx.get_cameras().await.unwrap() {
            keyboard.add_camera(camera.id, camera.name);
        }
        assert_eq!(keyboard.to_markup().keyboard[0][0].text, "Front Door");

        let camera = keyboard.find_by_label("Front Door").cloned().unwrap();
        assert_eq!(camera.id, "c1");

        let sink = Arc::new(RecordingSink::default());
        let relay = SnapshotRelay::new(Arc::new(nx), sink.clone(), vec![]);
        relay
            .handle_event(BridgeEvent::CameraButtonPressed {
                camera,
                request: Box::new(private_message(5, "Front Door")),
            })
            .await
            .unwrap();

        assert_eq!(sink.sent(), vec![Sent::Photo(Recipient::Chat(5), vec![0xFF, 0xD8])]);
    }
}
