//! Client configuration
//!
//! Connection and capture settings, loadable from environment variables.

use std::env;
use std::time::Duration;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Detection service base URL
    pub base_url: String,
    /// Detection threshold sent when opening a session
    pub detection_threshold: f32,
    /// Ask the service to return annotated sign images
    pub return_sign_images: bool,
    /// Interval between frame captures during continuous detection
    pub frame_interval: Duration,
    /// JPEG quality for uploaded frames (0-100)
    pub jpeg_quality: u8,
    /// Request timeout. None means requests may wait indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            detection_threshold: 0.75,
            return_sign_images: true,
            frame_interval: Duration::from_millis(500),
            jpeg_quality: 80,
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            base_url: env::var("SIGNDETECT_BASE_URL").unwrap_or(defaults.base_url),
            detection_threshold: env::var("SIGNDETECT_DETECTION_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.detection_threshold),
            return_sign_images: env::var("SIGNDETECT_RETURN_SIGN_IMAGES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.return_sign_images),
            frame_interval: env::var("SIGNDETECT_FRAME_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.frame_interval),
            jpeg_quality: env::var("SIGNDETECT_JPEG_QUALITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.jpeg_quality),
            timeout: env::var("SIGNDETECT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs),
        }
    }
}
