//! JPEG encoding for captured frames

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::error::{Error, Result};
use crate::video_source::RawFrame;

/// Encodes raw RGB frames to JPEG at a fixed quality
///
/// Sized once to the source's native dimensions; frames that do not match are
/// rejected rather than rescaled.
#[derive(Debug, Clone)]
pub struct FrameEncoder {
    width: u32,
    height: u32,
    quality: u8,
}

impl FrameEncoder {
    /// Create an encoder for a source with the given native dimensions
    pub fn new(width: u32, height: u32, quality: u8) -> Self {
        Self {
            width,
            height,
            quality,
        }
    }

    /// Encode a frame to JPEG bytes
    pub fn encode(&self, frame: &RawFrame) -> Result<Vec<u8>> {
        if frame.width != self.width || frame.height != self.height {
            return Err(Error::Encode(format!(
                "frame is {}x{}, encoder expects {}x{}",
                frame.width, frame.height, self.width, self.height
            )));
        }

        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, self.quality)
            .write_image(
                &frame.data,
                frame.width,
                frame.height,
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| Error::Encode(e.to_string()))?;

        Ok(jpeg)
    }
}
