//! Fixed-priority rule classification of trace statistics.
//!
//! The rules form a decision list, not a tree: they are checked in a
//! documented order and the first match wins. Overlapping conditions (for
//! example a high deceleration count together with many low-variability
//! segments) resolve by position in the list, so the order is part of the
//! contract.

use crate::features::TraceStats;

/// Diagnostic category of a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosisLabel {
    Normal,
    Suspicious,
    Pathological,
    /// Returned for unrecognized remote prediction codes.
    Unknown,
}

impl std::fmt::Display for DiagnosisLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Normal => "Normal",
            Self::Suspicious => "Suspicious",
            Self::Pathological => "Pathological",
            Self::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// A diagnosis label with a human-readable rationale.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Diagnosis {
    /// Diagnostic category.
    pub label: DiagnosisLabel,
    /// Free-text explanation of the matched rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

impl Diagnosis {
    pub(crate) fn new(label: DiagnosisLabel, rationale: impl Into<String>) -> Self {
        Self {
            label,
            rationale: Some(rationale.into()),
        }
    }
}

impl std::fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.rationale {
            Some(r) => write!(f, "{} ({})", self.label, r),
            None => write!(f, "{}", self.label),
        }
    }
}

/// Classify raw trace statistics.
///
/// Pure function of its input; no state is retained between calls.
pub fn classify(stats: &TraceStats) -> Diagnosis {
    let avg = stats.avg_pixel;
    let variability = stats.variability;
    let range = stats.range();
    let decel = stats.deceleration_count;
    let low_var = stats.low_var_segments;

    // Rule 1: strong signal, healthy variability, few events.
    if avg > 0.5 && variability > 0.04 && range > 0.25 && decel < 3 && low_var < 2 {
        return Diagnosis::new(
            DiagnosisLabel::Normal,
            "edge intensity, variability and range within expected bands",
        );
    }

    // Rule 2: mildly reduced variability.
    if low_var > 2 && low_var < 5 {
        return Diagnosis::new(
            DiagnosisLabel::Suspicious,
            format!("mildly reduced variability ({} low-variability segments)", low_var),
        );
    }

    // Rule 3: pronounced decelerations or sustained flat tracing.
    if decel > 5 || low_var > 5 {
        let rationale = if decel > 5 {
            format!("high deceleration count ({})", decel)
        } else {
            format!("sustained low variability ({} segments)", low_var)
        };
        return Diagnosis::new(DiagnosisLabel::Pathological, rationale);
    }

    // Catch-all.
    Diagnosis::new(DiagnosisLabel::Suspicious, "needs further evaluation")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(
        avg_pixel: f32,
        variability: f32,
        range: f32,
        deceleration_count: u32,
        low_var_segments: u32,
    ) -> TraceStats {
        TraceStats {
            avg_pixel,
            variability,
            min_pixel: 0.0,
            max_pixel: range,
            deceleration_count,
            low_var_segments,
        }
    }

    #[test]
    fn rule_one_matches_a_clean_trace() {
        let d = classify(&stats(0.6, 0.05, 0.3, 1, 0));
        assert_eq!(d.label, DiagnosisLabel::Normal);
    }

    #[test]
    fn rule_two_flags_mildly_reduced_variability() {
        let d = classify(&stats(0.6, 0.05, 0.3, 1, 3));
        assert_eq!(d.label, DiagnosisLabel::Suspicious);
        assert!(d.rationale.as_deref().unwrap().contains("3"));
    }

    #[test]
    fn rule_three_flags_heavy_decelerations() {
        let d = classify(&stats(0.6, 0.05, 0.3, 6, 0));
        assert_eq!(d.label, DiagnosisLabel::Pathological);
    }

    #[test]
    fn catch_all_is_suspicious() {
        // All-zero statistics fail rule 1's range gate and fall through.
        let d = classify(&stats(0.0, 0.0, 0.0, 0, 0));
        assert_eq!(d.label, DiagnosisLabel::Suspicious);
        assert_eq!(d.rationale.as_deref(), Some("needs further evaluation"));
    }

    #[test]
    fn overlapping_rules_resolve_by_list_position() {
        // Satisfies rule 1's deceleration clause (1 < 3) but fails its
        // low-variability gate (6 >= 2); rule 2's band excludes 6; rule 3's
        // low-variability clause fires.
        let d = classify(&stats(0.6, 0.05, 0.3, 1, 6));
        assert_eq!(d.label, DiagnosisLabel::Pathological);
        assert!(d.rationale.as_deref().unwrap().contains("low variability"));
    }

    #[test]
    fn low_var_exactly_five_falls_through_to_catch_all() {
        // 5 is outside rule 2's open band and not above rule 3's threshold.
        let d = classify(&stats(0.1, 0.0, 0.0, 0, 5));
        assert_eq!(d.label, DiagnosisLabel::Suspicious);
        assert_eq!(d.rationale.as_deref(), Some("needs further evaluation"));
    }

    #[test]
    fn classifier_is_pure() {
        let s = stats(0.42, 0.03, 0.2, 4, 1);
        assert_eq!(classify(&s), classify(&s));
    }
}
