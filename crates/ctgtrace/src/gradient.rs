//! Sobel edge detection over a single-channel grid.
//!
//! A fixed bank of two 3x3 kernels is convolved with "same"-size output and
//! combined per pixel as `sqrt(gx^2 + gy^2)`. No parameters are tuned at
//! runtime.

use crate::grid::{GradientMap, InputError, PixelGrid};

/// Horizontal gradient kernel.
const SOBEL_X: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];

/// Vertical gradient kernel.
const SOBEL_Y: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Minimum image extent accepted by the detector.
const MIN_DIM: u32 = 3;

/// Compute the gradient-magnitude map of a single-channel grid.
///
/// Output dimensions equal input dimensions. Out-of-bounds kernel taps read
/// the nearest edge pixel (clamp-to-edge), so a uniform image produces an
/// identically zero map rather than a spurious bright frame. Images smaller
/// than 3x3 in either dimension are rejected.
pub fn sobel_magnitude(gray: &PixelGrid) -> Result<GradientMap, InputError> {
    if gray.channels() != 1 {
        return Err(InputError::BadChannelCount {
            channels: gray.channels(),
        });
    }
    let w = gray.width();
    let h = gray.height();
    if w < MIN_DIM || h < MIN_DIM {
        return Err(InputError::TooSmall {
            width: w,
            height: h,
            min: MIN_DIM,
        });
    }

    let wu = w as usize;
    let hu = h as usize;
    let src = gray.data();
    let mut out = vec![0.0f32; wu * hu];

    for y in 0..hu {
        for x in 0..wu {
            let mut gx = 0.0f32;
            let mut gy = 0.0f32;
            for ky in 0..3usize {
                let sy = (y + ky).saturating_sub(1).min(hu - 1);
                let row = sy * wu;
                for kx in 0..3usize {
                    let sx = (x + kx).saturating_sub(1).min(wu - 1);
                    let v = src[row + sx];
                    gx += v * SOBEL_X[ky][kx];
                    gy += v * SOBEL_Y[ky][kx];
                }
            }
            out[y * wu + x] = (gx * gx + gy * gy).sqrt();
        }
    }

    Ok(GradientMap::new_unchecked(w, h, out))
}
