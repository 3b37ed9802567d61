use crate::errors::AppError;
use crate::relay::events::{self, BridgeEvent, EventSender, MotionEvent};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Router;
use log::{debug, error, info, warn};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// HTTP webhook for motion events.
///
/// Every request, whatever its method or path, carries a camera id as its
/// plaintext body. The id is trimmed and published as a motion event; the
/// response is always an empty `200 OK`.
pub struct MotionReceiver {
    listener: TcpListener,
    events: EventSender,
}

impl MotionReceiver {
    pub async fn bind(http_ip_port: &str, events: EventSender) -> Result<Self, AppError> {
        let listener = TcpListener::bind(http_ip_port).await.map_err(|e| {
            AppError::Io(format!("Failed to bind motion receiver on '{}': {}", http_ip_port, e))
        })?;
        Ok(MotionReceiver { listener, events })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, AppError> {
        Ok(self.listener.local_addr()?)
    }

    pub async fn serve(self) -> Result<(), AppError> {
        info!("👂 Motion receiver listening on http://{}", self.local_addr()?);
        axum::serve(self.listener, router(self.events)).await?;
        Ok(())
    }

    /// Serves in a background task. Errors are logged; the bot keeps running.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            if let Err(e) = self.serve().await {
                error!("❌ Motion receiver stopped: {:#}", e);
            }
        })
    }
}

pub fn router(events: EventSender) -> Router {
    Router::new().fallback(handle_motion).with_state(events)
}

async fn handle_motion(State(events): State<EventSender>, body: Bytes) -> StatusCode {
    let camera_id = String::from_utf8_lossy(&body).trim().to_string();
    if camera_id.is_empty() {
        warn!("⚠️ Motion event without a camera id ignored.");
        return StatusCode::OK;
    }

    info!("🚨 Motion event received: {}", camera_id);
    if !events::publish(&events, BridgeEvent::Motion(MotionEvent::new(camera_id))) {
        debug!("No subscriber for motion events, event dropped.");
    }
    StatusCode::OK
}
