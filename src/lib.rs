//! SignDetect Client Library
//!
//! Client for a remote sign language detection service: authenticate, open a
//! detection session, stream video frames for analysis, and deliver results to
//! a caller-supplied callback.
//!
//! ## Architecture (5 Components)
//!
//! 1. ClientConfig - Connection and capture settings
//! 2. DetectionClient - Auth, session, and frame upload operations
//! 3. Capture loop - Interval-driven continuous detection
//! 4. VideoSource - Seam for the live frame supplier
//! 5. FrameEncoder - RGB frame to JPEG conversion
//!
//! ## Design Principles
//!
//! - Explicitly owned client: constructed and injected, no process-wide instance
//! - Split failure policy: session start propagates errors, frame uploads
//!   degrade to sentinel results so capture keeps running
//! - Time-driven ticks: the capture interval never waits on an in-flight upload

pub mod config;
pub mod detection_client;
pub mod error;
pub mod video_source;

pub use config::ClientConfig;
pub use detection_client::{
    Detection, DetectionClient, DetectionResult, ResultCallback, SessionConfig, SessionInfo,
};
pub use error::{Error, Result};
pub use video_source::{FrameEncoder, RawFrame, VideoSource};
