//! Optional Gaussian denoise applied before edge detection.

use image::{ImageBuffer, Luma};

use crate::grid::PixelGrid;

/// Gaussian-blur a single-channel grid via `imageproc`.
///
/// Photographed traces carry sensor noise that inflates the gradient
/// statistics; a small sigma (1.0-2.0) suppresses it without flattening the
/// trace itself.
pub fn gaussian(gray: &PixelGrid, sigma: f32) -> PixelGrid {
    debug_assert_eq!(gray.channels(), 1);
    let w = gray.width();
    let h = gray.height();
    let buf = ImageBuffer::<Luma<f32>, Vec<f32>>::from_raw(w, h, gray.data().to_vec())
        .expect("grid dimensions match buffer length");
    let blurred = imageproc::filter::gaussian_blur_f32(&buf, sigma);
    PixelGrid::single_channel(w, h, blurred.into_raw())
}
