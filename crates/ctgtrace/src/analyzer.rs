//! High-level analysis API.
//!
//! [`Analyzer`] is the primary entry point: it wraps an [`AnalyzeConfig`]
//! and runs the full pipeline on a decoded image. Each call owns its
//! intermediate buffers, so one analyzer may serve concurrent invocations
//! without coordination.

use crate::classify::{classify, Diagnosis};
use crate::features::{extract_stats, FeatureConfig, FeatureVector, TraceStats};
use crate::grid::{GradientMap, InputError, PixelGrid};
use crate::{blur, grayscale, gradient, normalize};

/// Configuration for a full analysis run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnalyzeConfig {
    /// Thresholds for the feature scan.
    pub features: FeatureConfig,
    /// Optional Gaussian denoise sigma applied before edge detection.
    pub blur_sigma: Option<f32>,
    /// Collect a min-max normalized edge map for display.
    pub collect_display_map: bool,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            features: FeatureConfig::default(),
            blur_sigma: None,
            collect_display_map: true,
        }
    }
}

/// Full analysis result for a single image.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisResult {
    /// Locally derived diagnosis.
    pub diagnosis: Diagnosis,
    /// Simulated feature vector in the remote endpoint's payload shape.
    pub features: FeatureVector,
    /// Raw scan statistics the classifier consumed.
    pub stats: TraceStats,
    /// Image dimensions [width, height].
    pub image_size: [u32; 2],
    /// Min-max normalized edge map for display, if collected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_map: Option<GradientMap>,
}

/// Primary analysis interface.
///
/// Create once, analyze many images.
///
/// # Examples
///
/// ```
/// use ctgtrace::{Analyzer, PixelGrid};
///
/// let analyzer = Analyzer::new();
/// let image = PixelGrid::from_raw(10, 10, 1, vec![0.5; 100]).unwrap();
/// let result = analyzer.analyze(&image).unwrap();
/// println!("Diagnosis: {}", result.diagnosis);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzeConfig,
}

impl Analyzer {
    /// Create an analyzer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with full config control.
    pub fn with_config(config: AnalyzeConfig) -> Self {
        Self { config }
    }

    /// Access the current configuration.
    pub fn config(&self) -> &AnalyzeConfig {
        &self.config
    }

    /// Mutable access to configuration for post-construction tuning.
    pub fn config_mut(&mut self) -> &mut AnalyzeConfig {
        &mut self.config
    }

    /// Run the full pipeline on a decoded image.
    ///
    /// Stages: grayscale reduction, optional denoise, Sobel magnitude,
    /// feature scan + classification, and (if configured) a normalized
    /// display map. The display map is derived from the same edge map the
    /// extractor reads but never feeds back into it.
    pub fn analyze(&self, image: &PixelGrid) -> Result<AnalysisResult, InputError> {
        let mut gray = grayscale::reduce(image);
        if let Some(sigma) = self.config.blur_sigma {
            if sigma > 0.0 {
                gray = blur::gaussian(&gray, sigma);
            }
        }

        let edges = gradient::sobel_magnitude(&gray)?;
        let stats = extract_stats(&edges, &self.config.features)?;
        let features = FeatureVector::from_stats(&stats);
        let diagnosis = classify(&stats);

        tracing::info!(
            "analysis: {}x{} -> {} ({} decelerations, {} low-variability segments)",
            image.width(),
            image.height(),
            diagnosis.label,
            stats.deceleration_count,
            stats.low_var_segments,
        );

        let display_map = self
            .config
            .collect_display_map
            .then(|| normalize::min_max(&edges));

        Ok(AnalysisResult {
            diagnosis,
            features,
            stats,
            image_size: [image.width(), image.height()],
            display_map,
        })
    }
}
