use crate::errors::AppError;
use async_trait::async_trait;

/// Anything that can hand out a fresh snapshot for a camera id.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch_snapshot(&self, camera_id: &str) -> Result<Vec<u8>, AppError>;
}
