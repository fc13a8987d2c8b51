//! Numeric helpers shared by the aggregation and trend pipeline.

/// Fallback body weight (kg) when the caller provides none.
pub const DEFAULT_BABY_WEIGHT_KG: f64 = 4.0;

/// Recommended daily intake per kilogram of body weight.
pub const ML_PER_KG_PER_DAY: f64 = 150.0;

/// Explicit per-run configuration for the summary assembler.
///
/// These were process-wide globals in earlier incarnations of the tool;
/// they are now passed into the pipeline so every run is deterministic
/// with respect to its inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Body weight in kilograms used for the recommended-intake figure.
    pub baby_weight_kg: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            baby_weight_kg: DEFAULT_BABY_WEIGHT_KG,
        }
    }
}

/// Round to 1 decimal place, ties away from zero.
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Arithmetic mean of a slice. 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Percentage change from `older` to `recent`, rounded to 1 decimal.
///
/// Returns `None` when `older` is 0: the comparison is undefined and no
/// trend is emitted rather than a non-finite value.
pub fn percent_change(recent: f64, older: f64) -> Option<f64> {
    if older == 0.0 {
        return None;
    }
    Some(round1((recent - older) / older * 100.0))
}

/// Recommended daily intake in milliliters for a given body weight.
pub fn recommended_intake_ml(weight_kg: f64) -> f64 {
    weight_kg * ML_PER_KG_PER_DAY
}

// ── Tests ─────────────────────────────────────────────────────────────────────
