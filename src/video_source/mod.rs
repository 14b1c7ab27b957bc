//! VideoSource - Frame Supply Seam
//!
//! ## Responsibilities
//!
//! - Abstract over whatever produces live video frames (capture device,
//!   decoder, test fixture)
//! - Report native dimensions and playback state
//! - Hand raw RGB frames to the capture loop

mod encoder;

pub use encoder::FrameEncoder;

use async_trait::async_trait;

use crate::error::{Error, Result};

/// A single raw frame: tightly packed RGB8 pixels
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl RawFrame {
    /// Build an RGB8 frame, validating the buffer length
    pub fn rgb8(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(Error::Capture(format!(
                "RGB8 buffer is {} bytes, expected {} for {}x{}",
                data.len(),
                expected,
                width,
                height
            )));
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }
}

/// Source of live video frames
///
/// Implementations wrap a camera, a decoded stream, or a synthetic source in
/// tests. `is_idle` mirrors a paused-or-ended player: while it reports true the
/// capture loop skips ticks without grabbing frames.
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Native frame width in pixels
    fn width(&self) -> u32;

    /// Native frame height in pixels
    fn height(&self) -> u32;

    /// Whether the source is currently paused or has ended
    fn is_idle(&self) -> bool;

    /// Grab the current frame
    async fn grab_frame(&self) -> Result<RawFrame>;
}
