//! ABR data types
//!
//! Type definitions for parsed ABR brush data.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use image::{ImageFormat, Rgba, RgbaImage};
use sha2::{Digest, Sha256};

use super::defaults::AbrDefaults;

/// Decoded brush tip bitmap, one gray byte per pixel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrushSample {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl BrushSample {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            pixels,
            width,
            height,
        }
    }

    /// Placeholder for a sample that could not be decoded.
    ///
    /// Kept in the sample list so later samples still pair with the right
    /// descriptor.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Get pixel value at coordinates
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x < self.width && y < self.height {
            let idx = y as usize * self.width as usize + x as usize;
            self.pixels.get(idx).copied()
        } else {
            None
        }
    }
}

/// Brush metadata from a `desc` block.
///
/// The block is not decoded, so this always holds [`AbrDefaults`].
#[derive(Debug, Clone, PartialEq)]
pub struct BrushDescriptor {
    pub name: String,
    pub diameter: f32,
    pub hardness: f32,
    pub spacing: f32,
    pub angle: f32,
    pub roundness: f32,
    pub tip_width: u32,
    pub tip_height: u32,
}

impl Default for BrushDescriptor {
    fn default() -> Self {
        Self {
            name: String::new(),
            diameter: AbrDefaults::DIAMETER,
            hardness: AbrDefaults::HARDNESS,
            spacing: AbrDefaults::SPACING,
            angle: AbrDefaults::ANGLE,
            roundness: AbrDefaults::ROUNDNESS,
            tip_width: 0,
            tip_height: 0,
        }
    }
}

/// Brush tip as an alpha-only RGBA image: white color, gray value as alpha
#[derive(Debug, Clone, PartialEq)]
pub struct AlphaMask {
    image: RgbaImage,
}

impl AlphaMask {
    /// Build a mask from a decoded sample. Empty or inconsistent samples
    /// produce no mask.
    pub fn from_sample(sample: &BrushSample) -> Option<Self> {
        if sample.is_empty() {
            return None;
        }
        let expected = sample.width as usize * sample.height as usize;
        if sample.pixels.len() != expected {
            tracing::warn!(
                "Sample pixel buffer has {} bytes, expected {}",
                sample.pixels.len(),
                expected
            );
            return None;
        }

        let width = sample.width;
        let image = RgbaImage::from_fn(sample.width, sample.height, |x, y| {
            let gray = sample.pixels[y as usize * width as usize + x as usize];
            Rgba([255, 255, 255, gray])
        });
        Some(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Alpha at coordinates
    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        self.image.get_pixel_checked(x, y).map(|p| p.0[3])
    }

    /// Raw RGBA bytes, row-major
    pub fn as_rgba(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Encode as PNG
    pub fn encode_png(&self) -> Result<Vec<u8>, image::ImageError> {
        let mut png_data = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut png_data), ImageFormat::Png)?;
        Ok(png_data)
    }

    /// Encode as a base64 PNG string
    pub fn to_png_base64(&self) -> Result<String, image::ImageError> {
        Ok(BASE64.encode(self.encode_png()?))
    }

    /// Hex SHA-256 of the dimensions and RGBA bytes
    pub fn content_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.width().to_be_bytes());
        hasher.update(self.height().to_be_bytes());
        hasher.update(self.as_rgba());
        hex::encode(hasher.finalize())
    }
}

/// A brush preset assembled from one descriptor and its paired sample
#[derive(Debug, Clone, PartialEq)]
pub struct BrushPreset {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Tip mask, if a non-empty sample was paired with this preset
    pub tip_image: Option<AlphaMask>,
    /// Brush diameter in pixels
    pub diameter: f32,
    /// Hardness (1.0 = hard edge, 0.0 = soft)
    pub hardness: f32,
    /// Spacing as fraction of diameter (0.25 = 25%)
    pub spacing: f32,
    /// Brush angle in degrees
    pub angle: f32,
    /// Roundness (1.0 = circular, 0.0 = flat line)
    pub roundness: f32,
    /// Where the preset was imported from
    pub source: String,
}

/// Outcome of parsing an ABR buffer.
///
/// Parsing never fails outright: problems are reported in `warnings` and
/// whatever was decoded before them is kept.
#[derive(Debug, Clone, Default)]
pub struct AbrParseResult {
    /// Major version read from the header, 0 if the buffer was too small
    pub version: u16,
    pub subversion: u16,
    /// Decoded samples in file order, including empty placeholders
    pub samples: Vec<BrushSample>,
    /// One entry per `desc` block
    pub descriptors: Vec<BrushDescriptor>,
    pub brushes: Vec<BrushPreset>,
    pub warnings: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_mask_from_sample() {
        let sample = BrushSample::new(2, 2, vec![0, 64, 128, 255]);
        let mask = AlphaMask::from_sample(&sample).unwrap();

        assert_eq!((mask.width(), mask.height()), (2, 2));
        assert_eq!(mask.alpha_at(1, 0), Some(64));
        assert_eq!(mask.alpha_at(1, 1), Some(255));
        assert_eq!(mask.alpha_at(2, 0), None);
        assert_eq!(&mask.as_rgba()[8..12], &[255, 255, 255, 128]);
    }

    #[test]
    fn test_alpha_mask_rejects_empty_or_short_samples() {
        assert!(AlphaMask::from_sample(&BrushSample::empty()).is_none());
        assert!(AlphaMask::from_sample(&BrushSample::new(2, 2, vec![1, 2, 3])).is_none());
    }

    #[test]
    fn test_alpha_mask_png_signature() {
        let mask = AlphaMask::from_sample(&BrushSample::new(1, 1, vec![200])).unwrap();
        let png = mask.encode_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_content_hash_tracks_pixels_and_shape() {
        let a = AlphaMask::from_sample(&BrushSample::new(2, 1, vec![1, 2])).unwrap();
        let b = AlphaMask::from_sample(&BrushSample::new(2, 1, vec![1, 2])).unwrap();
        let c = AlphaMask::from_sample(&BrushSample::new(1, 2, vec![1, 2])).unwrap();

        assert_eq!(a.content_hash(), b.content_hash());
        assert_ne!(a.content_hash(), c.content_hash());
        assert_eq!(a.content_hash().len(), 64);
    }

    #[test]
    fn test_png_base64_decodes_to_png() {
        let mask = AlphaMask::from_sample(&BrushSample::new(1, 1, vec![7])).unwrap();
        let encoded = mask.to_png_base64().unwrap();
        let png = BASE64.decode(encoded).unwrap();
        assert_eq!(&png[..4], b"\x89PNG");
    }

    #[test]
    fn test_descriptor_defaults() {
        let desc = BrushDescriptor::default();
        assert_eq!(desc.diameter, AbrDefaults::DIAMETER);
        assert_eq!(desc.spacing, 0.25);
        assert_eq!((desc.tip_width, desc.tip_height), (0, 0));
    }

    #[test]
    fn test_sample_get_pixel() {
        let sample = BrushSample::new(3, 1, vec![1, 2, 3]);
        assert_eq!(sample.get_pixel(2, 0), Some(3));
        assert_eq!(sample.get_pixel(0, 1), None);
    }
}
