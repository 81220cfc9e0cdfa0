//! Channel-mean grayscale reduction.

use crate::grid::PixelGrid;

/// Collapse a grid to a single intensity channel.
///
/// Each output sample is the arithmetic mean of the channel samples at that
/// pixel. Single-channel input yields an equal copy, never an alias.
pub fn reduce(grid: &PixelGrid) -> PixelGrid {
    let w = grid.width();
    let h = grid.height();
    let c = grid.channels() as usize;
    if c == 1 {
        return PixelGrid::single_channel(w, h, grid.data().to_vec());
    }

    let src = grid.data();
    let n = w as usize * h as usize;
    let inv_c = 1.0 / c as f32;
    let mut out = Vec::with_capacity(n);
    for px in src.chunks_exact(c) {
        out.push(px.iter().sum::<f32>() * inv_c);
    }
    debug_assert_eq!(out.len(), n);
    PixelGrid::single_channel(w, h, out)
}
