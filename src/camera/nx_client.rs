use crate::camera::camera_info::CameraInfo;
use crate::errors::AppError;
use crate::relay::snapshot_source::SnapshotSource;
use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Instant;

const AUTH_PROBE_ENDPOINT: &str = "getCurrentTime";
const CAMERA_LIST_ENDPOINT: &str = "getCameraUserAttributesList";
const THUMBNAIL_ENDPOINT: &str = "cameraThumbnail";

/// Client for the Nx server's `/ec2` API, authenticated with HTTP Basic Auth.
///
/// Every call is a single GET with no retry; the shared `reqwest::Client`
/// provides whatever connection reuse there is.
#[derive(Clone)]
pub struct NxClient {
    http: Client,
    ip_port: String,
    user: String,
    pass: String,
}

impl NxClient {
    /// Creates the client and checks the credentials with a `getCurrentTime` call.
    pub async fn connect(ip_port: &str, user: &str, pass: &str) -> Result<Self, AppError> {
        let client = NxClient {
            http: Client::new(),
            ip_port: ip_port.to_string(),
            user: user.to_string(),
            pass: pass.to_string(),
        };
        client.test_auth().await?;
        Ok(client)
    }

    async fn test_auth(&self) -> Result<(), AppError> {
        debug!("🔐 Probing Nx API at {} as '{}'", self.ip_port, self.user);
        let start_time = Instant::now();
        let response = self
            .request(AUTH_PROBE_ENDPOINT)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Nx auth probe to {} failed: {}", self.ip_port, e)))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            error!("❌ Nx server {} rejected credentials for '{}'", self.ip_port, self.user);
            return Err(AppError::Authentication {
                endpoint: self.ip_port.clone(),
                details: "invalid username or password".to_string(),
            });
        }
        debug!("Nx auth probe answered {} in {:?}", response.status(), start_time.elapsed());
        Ok(())
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("http://{}/ec2/{}", self.ip_port, endpoint)
    }

    fn request(&self, endpoint: &str) -> RequestBuilder {
        self.http
            .get(self.api_url(endpoint))
            .basic_auth(&self.user, Some(&self.pass))
    }

    async fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<Vec<u8>, AppError> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::Network(format!("GET '{}' failed: {}", endpoint, e)))?;
        let response = check_status(endpoint, response)?;
        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::Network(format!("Reading body of '{}' failed: {}", endpoint, e)))?;
        Ok(body.to_vec())
    }

    /// GETs `endpoint` and decodes the whole JSON body into `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, AppError> {
        let body = self.send(endpoint, self.request(endpoint)).await?;
        serde_json::from_slice(&body)
            .map_err(|e| AppError::Decode(format!("Response of '{}' is not the expected JSON: {}", endpoint, e)))
    }

    pub async fn get_cameras(&self) -> Result<Vec<CameraInfo>, AppError> {
        let start_time = Instant::now();
        let cameras: Vec<CameraInfo> = self.get_json(CAMERA_LIST_ENDPOINT).await?;
        info!("📷 Retrieved {} camera(s) from Nx API in {:?}", cameras.len(), start_time.elapsed());
        Ok(cameras)
    }

    /// Raw thumbnail bytes for one camera. The body is passed through untouched.
    pub async fn get_snapshot(&self, camera_id: &str) -> Result<Vec<u8>, AppError> {
        let start_time = Instant::now();
        let request = self.request(THUMBNAIL_ENDPOINT).query(&[("cameraId", camera_id)]);
        let image = self.send(THUMBNAIL_ENDPOINT, request).await?;
        debug!(
            "🖼️ Snapshot for camera '{}': {} bytes in {:?}",
            camera_id,
            image.len(),
            start_time.elapsed()
        );
        Ok(image)
    }
}

fn check_status(endpoint: &str, response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(AppError::HttpStatus {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
        })
    }
}

#[async_trait]
impl SnapshotSource for NxClient {
    async fn fetch_snapshot(&self, camera_id: &str) -> Result<Vec<u8>, AppError> {
        self.get_snapshot(camera_id).await
    }
}
