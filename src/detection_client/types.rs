//! Wire types for the detection service API

use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;

/// `/auth` response
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

/// Session configuration sent when opening a detection session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    pub detection_threshold: f32,
    pub return_sign_images: bool,
}

impl From<&ClientConfig> for SessionConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            detection_threshold: config.detection_threshold,
            return_sign_images: config.return_sign_images,
        }
    }
}

/// `/sessions` request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub session_id: String,
    pub config: SessionConfig,
}

/// `/sessions` response
///
/// The service may attach fields beyond the documented ones; unknown fields are
/// preserved in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    #[serde(rename = "sessionId", default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A single recognized sign, as the service reports it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub sign: String,
    pub confidence: f32,
}

/// `/detect` response
///
/// The detection payload is service-defined; entries in `detected` are kept as raw
/// JSON so the result passes through the client unchanged. A failed upload is
/// reported as a sentinel result (`error` set, `detected` empty) instead of an Err.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default)]
    pub detected: Vec<serde_json::Value>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DetectionResult {
    /// Sentinel result for a failed frame upload
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            detected: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// Whether this result carries an error marker
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    /// Typed view of the entries that match the service's documented sign shape
    pub fn signs(&self) -> Vec<Detection> {
        self.detected
            .iter()
            .filter_map(|value| serde_json::from_value(value.clone()).ok())
            .collect()
    }
}
