//! Construction-time configuration.

use std::time::Duration;

use liquidtype_animator::AnimatorConfig;
use liquidtype_axes::AxisSet;

use crate::SolverTuning;

/// Configuration for one fitted text instance. Everything is optional in
/// the sense that [`FitOptions::default`] is a complete working setup.
#[derive(Debug, Clone)]
pub struct FitOptions {
    /// Font family the host renders with; carried through to style
    /// reporting, the engine itself only measures.
    pub font_family: String,
    /// Semantic importance in `[0, 1]`, driving weight and grade.
    pub relevance: f32,
    /// Quiet period for coalescing resize notifications.
    pub debounce: Duration,
    /// Search and correction tuning.
    pub tuning: SolverTuning,
    /// Axis values held fixed across fit passes (a user-adjusted slant,
    /// for example). Locked axes are never solved or reduced.
    pub locked_axes: AxisSet,
    /// When set, font size joins the solved variables instead of staying
    /// fixed at the constructed value.
    pub font_size_flexible: bool,
    /// Per-character pointer animation; `None` disables it entirely.
    pub animation: Option<AnimatorConfig>,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            relevance: 0.5,
            debounce: Duration::from_millis(100),
            tuning: SolverTuning::default(),
            locked_axes: AxisSet::new(),
            font_size_flexible: false,
            animation: None,
        }
    }
}
