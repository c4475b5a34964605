//! Per-pass inputs.

use liquidtype_axes::AxisSet;

/// The inputs of one fit pass, assembled fresh at each trigger and never
/// persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct FitTarget {
    pub text: String,
    pub container_width_px: f32,
    pub font_size_px: f32,
    pub relevance: f32,
    pub locked_axes: AxisSet,
}

/// A partial update; only fields that actually change trigger a new fit
/// pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FitUpdate {
    pub relevance: Option<f32>,
    /// Replaces the locked-axis snapshot wholesale when present.
    pub locked_axes: Option<AxisSet>,
}

impl FitUpdate {
    pub fn relevance(relevance: f32) -> Self {
        Self { relevance: Some(relevance), ..Self::default() }
    }

    pub fn locked(locked_axes: AxisSet) -> Self {
        Self { locked_axes: Some(locked_axes), ..Self::default() }
    }
}
