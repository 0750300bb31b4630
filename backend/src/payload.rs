//! Image payload preparation
//!
//! Wraps the JPEG bytes handed to the uploader. Images in other formats are
//! decoded and re-encoded as JPEG before upload, the way the capture screen
//! compresses a photo before sending it.

use crate::error::AnnotateError;
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use std::path::Path;
use tracing::{debug, warn};

const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Immutable JPEG bytes ready for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    bytes: Bytes,
}

impl ImagePayload {
    /// Wrap bytes that are assumed to already be JPEG-encoded
    ///
    /// # Errors
    /// * Returns `AnnotateError::Encoding` if the payload is empty.
    pub fn from_jpeg_bytes(bytes: impl Into<Bytes>) -> Result<Self, AnnotateError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(AnnotateError::Encoding("image payload is empty".to_string()));
        }

        let payload = Self { bytes };
        if !payload.looks_like_jpeg() {
            warn!(
                payload_len = payload.len(),
                "Image payload does not start with a JPEG marker"
            );
        }
        Ok(payload)
    }

    /// Encode a decoded image as JPEG at the given quality (1-100)
    pub fn from_image(image: &DynamicImage, quality: u8) -> Result<Self, AnnotateError> {
        let quality = quality.clamp(1, 100);
        // JPEG has no alpha channel
        let rgb = image.to_rgb8();

        let mut encoded = Vec::new();
        JpegEncoder::new_with_quality(&mut encoded, quality)
            .encode_image(&rgb)
            .map_err(|e| {
                AnnotateError::Encoding(format!("could not get JPEG representation of image: {}", e))
            })?;

        debug!(
            width = rgb.width(),
            height = rgb.height(),
            quality = quality,
            encoded_len = encoded.len(),
            "Encoded image as JPEG"
        );

        Self::from_jpeg_bytes(encoded)
    }

    /// Read an image file in any supported format and re-encode it as JPEG
    pub fn from_image_file(path: impl AsRef<Path>, quality: u8) -> Result<Self, AnnotateError> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|e| {
            AnnotateError::Encoding(format!("failed to decode image {}: {}", path.display(), e))
        })?;
        Self::from_image(&image, quality)
    }

    /// Number of bytes in the payload
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false for a constructed payload
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Cheap clone of the underlying buffer
    pub fn bytes(&self) -> Bytes {
        self.bytes.clone()
    }

    /// Whether the payload starts with the JPEG SOI marker
    pub fn looks_like_jpeg(&self) -> bool {
        self.bytes.starts_with(&JPEG_MAGIC)
    }
}
