//! Shared test utilities for image-based unit tests.

use crate::grid::PixelGrid;

/// Build a single-channel grid filled with one value.
pub(crate) fn uniform_grid(w: u32, h: u32, value: f32) -> PixelGrid {
    PixelGrid::single_channel(w, h, vec![value; w as usize * h as usize])
}

/// Render a synthetic CTG-like trace: a dark sine curve on a light
/// background, two pixels thick.
///
/// `amplitude` is the vertical swing in pixels and `period` the horizontal
/// wavelength in pixels.
pub(crate) fn draw_trace_image(w: u32, h: u32, amplitude: f32, period: f32) -> PixelGrid {
    let mid = h as f32 / 2.0;
    let mut data = vec![0.9f32; w as usize * h as usize];
    for x in 0..w {
        let phase = x as f32 / period * std::f32::consts::TAU;
        let cy = mid + amplitude * phase.sin();
        for dy in 0..2 {
            let y = (cy as i64 + dy).clamp(0, h as i64 - 1) as usize;
            data[y * w as usize + x as usize] = 0.1;
        }
    }
    PixelGrid::single_channel(w, h, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_image_contains_both_trace_and_background() {
        let img = draw_trace_image(50, 40, 10.0, 20.0);
        assert!(img.data().iter().any(|&v| v == 0.1));
        assert!(img.data().iter().any(|&v| v == 0.9));
    }
}
