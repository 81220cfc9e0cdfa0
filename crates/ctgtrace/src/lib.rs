//! ctgtrace — heuristic analysis of photographed CTG traces.
//!
//! Converts an uploaded raster image of a cardiotocography strip into a
//! numeric feature vector approximating what a CTG machine would report,
//! then classifies it with a fixed rule set. The pipeline stages are:
//!
//! 1. **Grayscale** – collapse channels to a single intensity plane.
//! 2. **Denoise** – optional Gaussian blur before edge detection.
//! 3. **Gradient** – fixed 3x3 Sobel bank, zero-padded, magnitude map.
//! 4. **Normalize** – min-max rescale of the edge map, display only.
//! 5. **Features** – windowed scan: mean, variability, deceleration events,
//!    low-variability row windows; simulation mapping into the remote
//!    endpoint's twelve-field payload.
//! 6. **Classify** – fixed-priority decision list over the raw statistics.
//!
//! The encoded rules are heuristic thresholds calibrated on pixel statistics
//! of rendered trace images, not a clinically validated interpreter.
//!
//! # Public API
//! [`Analyzer`] and [`AnalyzeConfig`] are the primary entry points; the
//! stage modules are public for callers that need individual steps. Image
//! decoding and the remote prediction HTTP call live outside this crate —
//! [`PixelGrid::from_dynamic`] and [`remote`] define the boundary shapes.

pub mod analyzer;
pub mod blur;
pub mod classify;
pub mod features;
pub mod gradient;
pub mod grayscale;
pub mod grid;
pub mod normalize;
pub mod remote;
#[cfg(test)]
mod test_utils;

pub use analyzer::{AnalysisResult, AnalyzeConfig, Analyzer};
pub use classify::{classify, Diagnosis, DiagnosisLabel};
pub use features::{extract_stats, FeatureConfig, FeatureVector, TraceStats};
pub use grid::{GradientMap, InputError, PixelGrid};
pub use remote::{diagnosis_from_code, PredictionResponse};
