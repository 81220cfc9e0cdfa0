//! Trace statistics and the simulated feature vector.
//!
//! A single row-major scan of the raw gradient-magnitude map derives the
//! scalar statistics that stand in for a CTG machine's signal measurements:
//! mean edge intensity, vertical-derivative variability, sudden-drop
//! ("deceleration") events, and low-variability row windows.

use crate::grid::{GradientMap, InputError};

/// Thresholds for the windowed scan.
///
/// The constants are empirically chosen against raw Sobel magnitudes of
/// rendered trace photographs; they have no documented physiological
/// derivation and are kept configurable rather than re-derived.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Vertical-difference magnitude above which a drop candidate is considered.
    pub decel_jump: f32,
    /// Required fall below the previously scanned pixel to count a deceleration.
    pub decel_drop: f32,
    /// Mean vertical difference below which a row window counts as low-variability.
    pub low_var_threshold: f32,
    /// Number of rows per low-variability window.
    pub segment_rows: usize,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            decel_jump: 0.1,
            decel_drop: 0.08,
            low_var_threshold: 0.012,
            segment_rows: 30,
        }
    }
}

/// Raw scan statistics of a gradient map.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TraceStats {
    /// Mean magnitude over all pixels.
    pub avg_pixel: f32,
    /// Mean absolute vertical difference (rows >= 1).
    pub variability: f32,
    /// Minimum magnitude.
    pub min_pixel: f32,
    /// Maximum magnitude.
    pub max_pixel: f32,
    /// Number of sudden-drop events detected during the scan.
    pub deceleration_count: u32,
    /// Number of row windows whose mean vertical difference fell below threshold.
    pub low_var_segments: u32,
}

impl TraceStats {
    /// Magnitude spread, `max - min`.
    pub fn range(&self) -> f32 {
        self.max_pixel - self.min_pixel
    }
}

/// Scan a raw-scale gradient map into [`TraceStats`].
///
/// Traversal is row-major with the column varying fastest; the "previously
/// scanned pixel" used by deceleration detection carries across row
/// boundaries. Window accounting only fires at full `segment_rows`
/// boundaries; a trailing partial window is not evaluated.
pub fn extract_stats(map: &GradientMap, config: &FeatureConfig) -> Result<TraceStats, InputError> {
    let data = map.data();
    if data.is_empty() {
        return Err(InputError::Empty);
    }

    let w = map.width() as usize;
    let h = map.height() as usize;

    let mut pixel_sum = 0.0f64;
    let mut min_pixel = f32::INFINITY;
    let mut max_pixel = f32::NEG_INFINITY;
    let mut variability_sum = 0.0f64;
    let mut deceleration_count = 0u32;
    let mut low_var_segments = 0u32;

    // Per-window accumulator, reset at every boundary regardless of outcome.
    let mut window_sum = 0.0f64;
    let mut window_count = 0usize;

    let mut prev_scanned: Option<f32> = None;

    for y in 0..h {
        let row = y * w;
        for x in 0..w {
            let v = data[row + x];
            pixel_sum += v as f64;
            min_pixel = min_pixel.min(v);
            max_pixel = max_pixel.max(v);

            if y >= 1 {
                let above = data[row - w + x];
                let vdiff = (v - above).abs();
                variability_sum += vdiff as f64;
                window_sum += vdiff as f64;
                window_count += 1;

                if vdiff > config.decel_jump {
                    if let Some(prev) = prev_scanned {
                        if v < prev - config.decel_drop {
                            deceleration_count += 1;
                        }
                    }
                }
            }

            prev_scanned = Some(v);
        }

        if config.segment_rows > 0 && (y + 1) % config.segment_rows == 0 {
            if window_count > 0 && window_sum / (window_count as f64) < config.low_var_threshold as f64
            {
                low_var_segments += 1;
            }
            window_sum = 0.0;
            window_count = 0;
        }
    }

    let pixel_count = (w * h) as f64;
    let stats = TraceStats {
        avg_pixel: (pixel_sum / pixel_count) as f32,
        variability: (variability_sum / pixel_count) as f32,
        min_pixel,
        max_pixel,
        deceleration_count,
        low_var_segments,
    };
    tracing::debug!(
        "trace scan: avg={:.4} variability={:.4} range={:.4} decel={} low_var={}",
        stats.avg_pixel,
        stats.variability,
        stats.range(),
        stats.deceleration_count,
        stats.low_var_segments,
    );
    Ok(stats)
}

/// The twelve-field payload shape of the external prediction endpoint.
///
/// Field values are *simulation mappings*: fixed deterministic scalings of
/// the pixel statistics dressed in the endpoint's clinical field names. They
/// are not calibrated physiological units and must not be interpreted as
/// such.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FeatureVector {
    pub baseline_value: f64,
    pub accelerations: f64,
    pub fetal_movement: f64,
    pub uterine_contractions: f64,
    pub light_decelerations: f64,
    pub severe_decelerations: f64,
    pub prolonged_decelerations: f64,
    pub abnormal_short_term_variability: f64,
    pub histogram_min: f64,
    pub histogram_max: f64,
    pub histogram_mean: f64,
    pub histogram_median: f64,
}

impl FeatureVector {
    /// Map raw scan statistics into the endpoint payload shape.
    pub fn from_stats(stats: &TraceStats) -> Self {
        let avg = stats.avg_pixel as f64;
        let variability = stats.variability as f64;
        let range = stats.range() as f64;
        let decel = stats.deceleration_count as f64;
        let low_var = stats.low_var_segments as f64;

        Self {
            baseline_value: (avg * 150.0).round(),
            accelerations: variability * 0.1,
            fetal_movement: range * 0.5,
            uterine_contractions: variability * 0.25,
            light_decelerations: decel * 0.001,
            severe_decelerations: (decel - 5.0).max(0.0) * 0.001,
            prolonged_decelerations: low_var * 0.001,
            abnormal_short_term_variability: avg * 0.5,
            histogram_min: stats.min_pixel as f64 * 15.0,
            histogram_max: stats.max_pixel as f64 * 15.0,
            histogram_mean: avg * 15.0,
            histogram_median: avg * 12.0,
        }
    }

    /// True when every field is finite.
    pub fn is_finite(&self) -> bool {
        [
            self.baseline_value,
            self.accelerations,
            self.fetal_movement,
            self.uterine_contractions,
            self.light_decelerations,
            self.severe_decelerations,
            self.prolonged_decelerations,
            self.abnormal_short_term_variability,
            self.histogram_min,
            self.histogram_max,
            self.histogram_mean,
            self.histogram_median,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_of(map: &GradientMap) -> TraceStats {
        extract_stats(map, &FeatureConfig::default()).unwrap()
    }

    #[test]
    fn uniform_zero_map_yields_zero_stats() {
        let map = GradientMap::from_raw(10, 10, vec![0.0; 100]).unwrap();
        let stats = stats_of(&map);
        assert_eq!(stats.avg_pixel, 0.0);
        assert_eq!(stats.variability, 0.0);
        assert_eq!(stats.range(), 0.0);
        assert_eq!(stats.deceleration_count, 0);
        // 10 rows never reach a 30-row window boundary.
        assert_eq!(stats.low_var_segments, 0);
    }

    #[test]
    fn empty_map_is_rejected_upstream() {
        let err = GradientMap::from_raw(0, 30, Vec::new()).unwrap_err();
        assert_eq!(err, InputError::Empty);
    }

    #[test]
    fn counts_a_sudden_drop() {
        // Row 0 flat at 0.5; row 1 drops to 0.2 in one column. The drop pixel
        // has vertical diff 0.3 > 0.1 and sits 0.3 below the previously
        // scanned pixel (0.5), beyond the 0.08 drop threshold.
        let data = vec![0.5, 0.5, 0.5, 0.5, 0.5, 0.2];
        let map = GradientMap::from_raw(3, 2, data).unwrap();
        let stats = stats_of(&map);
        assert_eq!(stats.deceleration_count, 1);
        assert!((stats.variability - 0.3 / 6.0).abs() < 1e-6);
    }

    #[test]
    fn jump_without_drop_is_not_a_deceleration() {
        // Vertical diff exceeds the jump threshold but the value rises above
        // the previously scanned pixel instead of falling.
        let data = vec![0.2, 0.2, 0.2, 0.2, 0.2, 0.6];
        let map = GradientMap::from_raw(3, 2, data).unwrap();
        assert_eq!(stats_of(&map).deceleration_count, 0);
    }

    #[test]
    fn previous_pixel_carries_across_row_boundary() {
        // First pixel of row 1 compares against the last pixel of row 0.
        let data = vec![0.1, 0.5, 0.1, 0.3];
        let map = GradientMap::from_raw(2, 2, data).unwrap();
        // (0,1): vdiff = |0.1 - 0.1| = 0 -> no. (1,1): vdiff = |0.3 - 0.5| =
        // 0.2 > 0.1, prev scanned = 0.1, 0.3 > 0.1 - 0.08 -> no drop.
        assert_eq!(stats_of(&map).deceleration_count, 0);

        let data = vec![0.1, 0.5, 0.35, 0.3];
        let map = GradientMap::from_raw(2, 2, data).unwrap();
        // (0,1): vdiff = 0.25 > 0.1, prev scanned = 0.5, 0.35 < 0.42 -> drop.
        assert_eq!(stats_of(&map).deceleration_count, 1);
    }

    #[test]
    fn flat_windows_count_as_low_variability_segments() {
        // 60 rows of constant magnitude: two full 30-row windows, both with
        // zero mean vertical difference.
        let map = GradientMap::from_raw(4, 60, vec![0.3; 240]).unwrap();
        assert_eq!(stats_of(&map).low_var_segments, 2);
    }

    #[test]
    fn trailing_partial_window_is_not_evaluated() {
        let map = GradientMap::from_raw(4, 45, vec![0.3; 180]).unwrap();
        assert_eq!(stats_of(&map).low_var_segments, 1);
    }

    #[test]
    fn busy_window_is_not_low_variability() {
        // Alternating rows of 0 and 1 give mean vertical diff 1.0 per window.
        let mut data = Vec::with_capacity(4 * 30);
        for y in 0..30 {
            let v = if y % 2 == 0 { 0.0 } else { 1.0 };
            data.extend_from_slice(&[v; 4]);
        }
        let map = GradientMap::from_raw(4, 30, data).unwrap();
        assert_eq!(stats_of(&map).low_var_segments, 0);
    }

    #[test]
    fn window_accumulator_resets_after_each_boundary() {
        // Window 1 is flat (counts); window 2 alternates (does not). Without
        // the reset, window 1's quiet sum would dilute window 2's mean.
        let mut data = Vec::with_capacity(4 * 60);
        for _ in 0..30 {
            data.extend_from_slice(&[0.3; 4]);
        }
        for y in 0..30 {
            let v = if y % 2 == 0 { 0.0 } else { 1.0 };
            data.extend_from_slice(&[v; 4]);
        }
        let map = GradientMap::from_raw(4, 60, data).unwrap();
        assert_eq!(stats_of(&map).low_var_segments, 1);
    }

    #[test]
    fn feature_vector_mapping_is_deterministic_and_finite() {
        let stats = TraceStats {
            avg_pixel: 0.6,
            variability: 0.05,
            min_pixel: 0.0,
            max_pixel: 0.3,
            deceleration_count: 7,
            low_var_segments: 2,
        };
        let fv = FeatureVector::from_stats(&stats);
        assert!(fv.is_finite());
        assert_eq!(fv.baseline_value, 90.0);
        assert!((fv.abnormal_short_term_variability - 0.3).abs() < 1e-9);
        assert!((fv.light_decelerations - 0.007).abs() < 1e-9);
        assert!((fv.severe_decelerations - 0.002).abs() < 1e-9);
        assert_eq!(fv, FeatureVector::from_stats(&stats));
    }
}
