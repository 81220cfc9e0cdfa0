//! Payload shapes for the external prediction endpoint.
//!
//! The core never performs the HTTP call. It produces the request body (a
//! serialized [`FeatureVector`](crate::FeatureVector)) and interprets the
//! reply; transport, retry and backoff belong to the calling layer.

use crate::classify::{Diagnosis, DiagnosisLabel};

/// Reply body of the prediction endpoint: `{"prediction": n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PredictionResponse {
    /// Prediction code; 1, 2 and 3 are the recognized values.
    pub prediction: i64,
}

/// Map a remote prediction code to a diagnosis.
///
/// Codes 1/2/3 map to Normal/Suspicious/Pathological. Any other value maps
/// to [`DiagnosisLabel::Unknown`] rather than failing.
pub fn diagnosis_from_code(code: i64) -> Diagnosis {
    match code {
        1 => Diagnosis::new(DiagnosisLabel::Normal, "remote prediction code 1"),
        2 => Diagnosis::new(DiagnosisLabel::Suspicious, "remote prediction code 2"),
        3 => Diagnosis::new(DiagnosisLabel::Pathological, "remote prediction code 3"),
        other => Diagnosis::new(
            DiagnosisLabel::Unknown,
            format!("unrecognized prediction code {}", other),
        ),
    }
}

impl From<PredictionResponse> for Diagnosis {
    fn from(resp: PredictionResponse) -> Self {
        diagnosis_from_code(resp.prediction)
    }
}
