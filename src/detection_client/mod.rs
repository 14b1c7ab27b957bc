//! DetectionClient - Detection Service Adapter
//!
//! ## Responsibilities
//!
//! - Authenticate and hold the session identifier
//! - Open and close detection sessions
//! - Upload frames as multipart JPEG and parse results
//! - Drive the continuous-detection capture loop

mod capture;
mod types;

pub use types::{AuthResponse, Detection, DetectionResult, SessionConfig, SessionInfo, SessionRequest};

use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::video_source::{FrameEncoder, VideoSource};

/// Callback receiving every continuous-detection outcome, sentinel results included
pub type ResultCallback = Arc<dyn Fn(DetectionResult) + Send + Sync>;

/// Authentication and session state
#[derive(Debug, Default)]
struct ClientState {
    api_key: Option<String>,
    session_id: Option<String>,
    connected: bool,
}

/// Detection service client
///
/// One instance per consumer, shared via `Arc` where the capture loop needs it.
/// Holds the authenticated session and at most one active capture loop.
pub struct DetectionClient {
    http: reqwest::Client,
    base_url: String,
    config: ClientConfig,
    state: RwLock<ClientState>,
    capture: Mutex<Option<JoinHandle<()>>>,
}

impl DetectionClient {
    /// Create a client for the given service base URL with default settings
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_config(ClientConfig {
            base_url: base_url.into(),
            ..ClientConfig::default()
        })
    }

    /// Create a client from full configuration
    pub fn with_config(config: ClientConfig) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().expect("Failed to create HTTP client");

        let base_url = config.base_url.trim_end_matches('/').to_string();

        Self {
            http,
            base_url,
            config,
            state: RwLock::new(ClientState::default()),
            capture: Mutex::new(None),
        }
    }

    /// Get base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether `initialize` has succeeded
    pub async fn is_connected(&self) -> bool {
        self.state.read().await.connected
    }

    /// Current session identifier, if connected
    pub async fn session_id(&self) -> Option<String> {
        self.state.read().await.session_id.clone()
    }

    /// Whether a continuous-detection loop is active
    pub async fn is_capturing(&self) -> bool {
        self.capture.lock().await.is_some()
    }

    /// Authenticate with the service and obtain a session identifier
    ///
    /// Returns true on success. Every failure (rejected credential, transport
    /// error, malformed body) is logged and reported as false; the client stays
    /// unconnected.
    pub async fn initialize(&self, api_key: &str) -> bool {
        let url = format!("{}/auth", self.base_url);

        match self.http.post(&url).bearer_auth(api_key).send().await {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    error!(status = %status, "Failed to authenticate with detection service");
                    return false;
                }

                match response.json::<AuthResponse>().await {
                    Ok(auth) => {
                        let mut state = self.state.write().await;
                        state.api_key = Some(api_key.to_string());
                        state.session_id = Some(auth.session_id.clone());
                        state.connected = true;

                        info!(session_id = %auth.session_id, "Detection service connection established");
                        true
                    }
                    Err(e) => {
                        error!(error = %e, "Auth response parse failed");
                        false
                    }
                }
            }
            Err(e) => {
                error!(error = %e, "Detection service connection error");
                false
            }
        }
    }

    /// Open a detection session with the configured threshold
    ///
    /// Requires a successful `initialize`. Unlike `process_frame`, failures here
    /// propagate to the caller.
    pub async fn start_session(&self) -> Result<SessionInfo> {
        let (api_key, session_id) = self.credentials().await?;

        let url = format!("{}/sessions", self.base_url);
        let request = SessionRequest {
            session_id,
            config: SessionConfig::from(&self.config),
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Session start request failed");
                Error::SessionStart(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, "Failed to start detection session");
            return Err(Error::SessionStart(format!("HTTP {}", status.as_u16())));
        }

        let info: SessionInfo = response.json().await.map_err(|e| {
            error!(error = %e, "Session response parse failed");
            Error::SessionStart(e.to_string())
        })?;

        info!(status = ?info.status, "Detection session started");
        Ok(info)
    }

    /// Upload a single JPEG frame for detection
    ///
    /// Requires a successful `initialize`. Transport and service failures do not
    /// propagate: they come back as a sentinel result with `error` set and an
    /// empty `detected` list, so a capture loop keeps running through them.
    pub async fn process_frame(&self, frame: Vec<u8>) -> Result<DetectionResult> {
        let (api_key, session_id) = self.credentials().await?;

        let url = format!("{}/detect", self.base_url);

        let image = match Part::bytes(frame)
            .file_name("frame.jpg")
            .mime_str("image/jpeg")
        {
            Ok(part) => part,
            Err(e) => {
                error!(error = %e, "Frame part build failed");
                return Ok(DetectionResult::failure(e.to_string()));
            }
        };

        let form = Form::new().part("image", image).text("sessionId", session_id);

        match self
            .http
            .post(&url)
            .bearer_auth(&api_key)
            .multipart(form)
            .send()
            .await
        {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    warn!(status = %status, "Frame processing failed");
                    return Ok(DetectionResult::failure("Frame processing failed"));
                }

                match response.json::<DetectionResult>().await {
                    Ok(result) => Ok(result),
                    Err(e) => {
                        warn!(error = %e, "Detection response parse failed");
                        Ok(DetectionResult::failure(e.to_string()))
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "Frame upload error");
                Ok(DetectionResult::failure(e.to_string()))
            }
        }
    }

    /// Start continuous detection at the configured frame interval
    ///
    /// See [`DetectionClient::start_continuous_detection_with_interval`].
    pub async fn start_continuous_detection<F>(
        self: &Arc<Self>,
        source: Arc<dyn VideoSource>,
        callback: F,
    ) -> Result<()>
    where
        F: Fn(DetectionResult) + Send + Sync + 'static,
    {
        let interval = self.config.frame_interval;
        self.start_continuous_detection_with_interval(source, callback, interval)
            .await
    }

    /// Start continuous detection with an explicit frame interval
    ///
    /// Requires a successful `initialize`. Any previously running loop is
    /// replaced, never stacked. Each tick skips idle sources, otherwise grabs a
    /// frame, JPEG-encodes it, and hands the upload to its own task so a slow
    /// request never delays the next tick. The callback fires for every
    /// completed upload, sentinel results included.
    pub async fn start_continuous_detection_with_interval<F>(
        self: &Arc<Self>,
        source: Arc<dyn VideoSource>,
        callback: F,
        interval: Duration,
    ) -> Result<()>
    where
        F: Fn(DetectionResult) + Send + Sync + 'static,
    {
        if !self.is_connected().await {
            return Err(Error::NotConnected);
        }

        let encoder = FrameEncoder::new(source.width(), source.height(), self.config.jpeg_quality);

        info!(
            width = source.width(),
            height = source.height(),
            interval_ms = interval.as_millis() as u64,
            "Starting continuous detection"
        );

        let callback: ResultCallback = Arc::new(callback);
        let handle =
            capture::spawn_capture_loop(Arc::clone(self), source, callback, encoder, interval);

        // Replace any prior loop under the same lock that stores the new handle
        let mut guard = self.capture.lock().await;
        if let Some(prior) = guard.take() {
            prior.abort();
            debug!("Replaced existing continuous detection loop");
        }
        *guard = Some(handle);

        Ok(())
    }

    /// Stop the continuous-detection loop
    ///
    /// Idempotent: a no-op when no loop is active. An upload already in flight
    /// is not cancelled; its callback may still fire once.
    pub async fn stop_continuous_detection(&self) {
        let mut guard = self.capture.lock().await;
        if let Some(handle) = guard.take() {
            handle.abort();
            info!("Continuous detection stopped");
        }
    }

    /// Close the detection session
    ///
    /// Returns false without a network call when never connected or no session
    /// is held. On success the capture loop (if any) is stopped as a side
    /// effect; connection state itself is left intact. On failure the loop
    /// keeps running and false is returned.
    pub async fn end_session(&self) -> bool {
        let (api_key, session_id) = {
            let state = self.state.read().await;
            if !state.connected {
                debug!("end_session called while not connected");
                return false;
            }
            match (state.api_key.clone(), state.session_id.clone()) {
                (Some(key), Some(sid)) => (key, sid),
                _ => {
                    debug!("end_session called without a session identifier");
                    return false;
                }
            }
        };

        let url = format!("{}/sessions/{}", self.base_url, session_id);

        match self.http.delete(&url).bearer_auth(&api_key).send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    self.stop_continuous_detection().await;
                    info!(session_id = %session_id, "Session ended");
                    true
                } else {
                    error!(status = %status, "Failed to end session properly");
                    false
                }
            }
            Err(e) => {
                error!(error = %e, "End session error");
                false
            }
        }
    }

    /// Credential snapshot for an authenticated request
    async fn credentials(&self) -> Result<(String, String)> {
        let state = self.state.read().await;
        if !state.connected {
            return Err(Error::NotConnected);
        }

        match (state.api_key.clone(), state.session_id.clone()) {
            (Some(key), Some(sid)) => Ok((key, sid)),
            _ => Err(Error::NotConnected),
        }
    }
}
