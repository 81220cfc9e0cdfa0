//! Min-max rescaling of gradient maps for display.
//!
//! Feature extraction deliberately consumes the raw magnitude scale; this
//! stage only feeds visualization.

use crate::grid::GradientMap;

/// Linearly rescale a map so its minimum maps to 0 and its maximum to 1.
///
/// A uniform map (max == min) yields an all-zero map of the same shape; the
/// degenerate branch is explicit rather than a division by zero.
pub fn min_max(map: &GradientMap) -> GradientMap {
    let data = map.data();
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &v in data {
        min = min.min(v);
        max = max.max(v);
    }

    let span = max - min;
    let out = if span > 0.0 {
        data.iter().map(|&v| (v - min) / span).collect()
    } else {
        vec![0.0; data.len()]
    };
    GradientMap::new_unchecked(map.width(), map.height(), out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_uniform_map_spans_unit_range() {
        let map = GradientMap::from_raw(2, 2, vec![1.0, 3.0, 5.0, 2.0]).unwrap();
        let norm = min_max(&map);
        let lo = norm.data().iter().cloned().fold(f32::INFINITY, f32::min);
        let hi = norm.data().iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        assert_eq!(lo, 0.0);
        assert_eq!(hi, 1.0);
        assert!((norm.get(1, 0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn uniform_map_becomes_all_zeros() {
        let map = GradientMap::from_raw(3, 3, vec![0.7; 9]).unwrap();
        let norm = min_max(&map);
        assert!(norm.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn input_is_not_mutated() {
        let map = GradientMap::from_raw(2, 1, vec![2.0, 4.0]).unwrap();
        let _ = min_max(&map);
        assert_eq!(map.data(), &[2.0, 4.0]);
    }
}
