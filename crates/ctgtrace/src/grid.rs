//! Pixel containers shared by all pipeline stages.
//!
//! [`PixelGrid`] holds decoded image samples normalized to `[0, 1]`;
//! [`GradientMap`] holds per-pixel gradient magnitudes. Both are plain
//! row-major `f32` buffers validated at construction so downstream stages
//! can scan them without per-pixel checks.

use image::{DynamicImage, GrayImage};

// ── Error type ─────────────────────────────────────────────────────────────

/// Errors raised when input pixel data cannot enter the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Image dimensions are below the minimum required by a stage.
    TooSmall {
        /// Provided width in pixels.
        width: u32,
        /// Provided height in pixels.
        height: u32,
        /// Required minimum for both dimensions.
        min: u32,
    },
    /// Zero-sized pixel buffer.
    Empty,
    /// A sample is NaN or infinite.
    NonFinite {
        /// Flat index of the offending sample.
        index: usize,
    },
    /// Buffer length does not match `width * height * channels`.
    BadLength {
        /// Expected number of samples.
        expected: usize,
        /// Provided number of samples.
        got: usize,
    },
    /// Channel count outside the supported set {1, 3, 4}.
    BadChannelCount {
        /// Provided channel count.
        channels: u8,
    },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooSmall { width, height, min } => {
                write!(f, "image {}x{} is smaller than {}x{}", width, height, min, min)
            }
            Self::Empty => write!(f, "empty pixel buffer"),
            Self::NonFinite { index } => {
                write!(f, "non-finite sample at flat index {}", index)
            }
            Self::BadLength { expected, got } => {
                write!(f, "bad buffer length: expected {}, got {}", expected, got)
            }
            Self::BadChannelCount { channels } => {
                write!(f, "unsupported channel count {} (expected 1, 3 or 4)", channels)
            }
        }
    }
}

impl std::error::Error for InputError {}

// ── PixelGrid ──────────────────────────────────────────────────────────────

/// A decoded image: `height x width x channels` samples in `[0, 1]`.
///
/// Layout is row-major with the channel index varying fastest. The grid is
/// immutable once constructed; pipeline stages allocate fresh grids instead
/// of mutating in place.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<f32>,
}

impl PixelGrid {
    /// Build a grid from raw samples, validating shape and finiteness.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: u8,
        data: Vec<f32>,
    ) -> Result<Self, InputError> {
        if width == 0 || height == 0 {
            return Err(InputError::Empty);
        }
        if !matches!(channels, 1 | 3 | 4) {
            return Err(InputError::BadChannelCount { channels });
        }
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(InputError::BadLength {
                expected,
                got: data.len(),
            });
        }
        if let Some(index) = data.iter().position(|v| !v.is_finite()) {
            return Err(InputError::NonFinite { index });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Convert a decoded image into a normalized grid.
    ///
    /// Grayscale sources map to one channel, color sources to three, and
    /// sources with an alpha channel to four. 8-bit samples are scaled by
    /// `1/255`.
    pub fn from_dynamic(img: &DynamicImage) -> Self {
        let (width, height) = (img.width(), img.height());
        let (channels, bytes): (u8, Vec<u8>) = match img.color().channel_count() {
            1 => (1, img.to_luma8().into_raw()),
            4 => (4, img.to_rgba8().into_raw()),
            _ => (3, img.to_rgb8().into_raw()),
        };
        let data = bytes.iter().map(|&b| b as f32 / 255.0).collect();
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// Internal constructor for stage outputs known to be valid.
    pub(crate) fn single_channel(width: u32, height: u32, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize);
        Self {
            width,
            height,
            channels: 1,
            data,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of channels (1, 3 or 4).
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Raw sample buffer (row-major, channel fastest).
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Sample at `(x, y)` for channel `c`.
    #[inline]
    pub fn get(&self, x: u32, y: u32, c: u8) -> f32 {
        let idx = (y as usize * self.width as usize + x as usize) * self.channels as usize
            + c as usize;
        self.data[idx]
    }
}

// ── GradientMap ────────────────────────────────────────────────────────────

/// Per-pixel gradient magnitudes: `height x width` non-negative samples.
///
/// Produced by the edge detector and consumed by both the normalizer (for
/// display) and the feature extractor (raw scale). Never mutated in place.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientMap {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl GradientMap {
    /// Build a map from raw magnitudes, validating shape and finiteness.
    pub fn from_raw(width: u32, height: u32, data: Vec<f32>) -> Result<Self, InputError> {
        if width == 0 || height == 0 {
            return Err(InputError::Empty);
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(InputError::BadLength {
                expected,
                got: data.len(),
            });
        }
        if let Some(index) = data.iter().position(|v| !v.is_finite()) {
            return Err(InputError::NonFinite { index });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Internal constructor for stage outputs known to be valid.
    pub(crate) fn new_unchecked(width: u32, height: u32, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize);
        Self {
            width,
            height,
            data,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw magnitude buffer (row-major).
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Magnitude at `(x, y)`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Render as an 8-bit grayscale image, clamping samples to `[0, 1]`.
    ///
    /// Intended for writing normalized display maps to disk.
    pub fn to_gray_image(&self) -> GrayImage {
        let mut out = GrayImage::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let v = self.get(x, y).clamp(0.0, 1.0);
                out.put_pixel(x, y, image::Luma([(v * 255.0).round() as u8]));
            }
        }
        out
    }
}
