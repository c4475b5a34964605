//! The numerical core: relevance mapping and bounded width/size searches.

use std::cell::Cell;

use liquidtype_axes::{AxisRangeTable, AxisSet, tags};
use log::debug;

/// Tuning constants for the searches and the reduction/correction loops.
///
/// The step floors and the reduction rate are empirically tuned values,
/// kept as defaults and exposed for hosts to adjust.
#[derive(Debug, Clone, Copy)]
pub struct SolverTuning {
    /// Fraction of the container width the text may occupy.
    pub margin_factor: f32,
    /// Extra pixels subtracted from the width target.
    pub safety_offset_px: f32,
    /// A best width landing closer than this to the target is backed off
    /// by one more unit in anticipation of per-cell rounding.
    pub snap_margin_px: f32,
    /// Floor for the coarse-ascent step of the width search.
    pub width_step: i32,
    /// Measurement budget for one width search.
    pub max_width_probes: u32,
    /// Measurement budget for one font-size search.
    pub max_font_size_probes: u32,
    pub min_font_size: f32,
    pub max_font_size: f32,
    /// Minimum per-pass weight reduction in the overflow loop.
    pub weight_step_floor: f32,
    /// Minimum per-pass grade reduction in the overflow loop.
    pub grade_step_floor: f32,
    /// Minimum per-pass width reduction in the overflow loop.
    pub width_step_floor: f32,
    /// Fraction of the remaining axis headroom shed per overflow pass.
    pub reduction_rate: f32,
    pub max_reduction_passes: u32,
    pub max_correction_steps: u32,
    /// Fraction of an axis maximum above which it counts as maximized.
    pub maximized_threshold: f32,
}

impl Default for SolverTuning {
    fn default() -> Self {
        Self {
            margin_factor: 0.95,
            safety_offset_px: 0.0,
            snap_margin_px: 5.0,
            width_step: 5,
            max_width_probes: 50,
            max_font_size_probes: 30,
            min_font_size: 8.0,
            max_font_size: 1000.0,
            weight_step_floor: 10.0,
            grade_step_floor: 5.0,
            width_step_floor: 2.0,
            reduction_rate: 0.1,
            max_reduction_passes: 15,
            max_correction_steps: 20,
            maximized_threshold: 0.95,
        }
    }
}

/// Pure search procedures over a design space.
///
/// Every search is integer-stable (candidates are whole axis units),
/// deterministic for a deterministic measure function, and hard-bounded by
/// a probe budget so it terminates under measurement noise. A measure
/// result of `0.0` means "inconclusive" and is treated as not fitting.
#[derive(Debug, Clone)]
pub struct AxisSolver {
    ranges: AxisRangeTable,
    tuning: SolverTuning,
}

impl AxisSolver {
    pub fn new(ranges: AxisRangeTable, tuning: SolverTuning) -> Self {
        Self { ranges, tuning }
    }

    pub fn ranges(&self) -> &AxisRangeTable {
        &self.ranges
    }

    pub fn tuning(&self) -> &SolverTuning {
        &self.tuning
    }

    /// Weight for a relevance scalar, `None` when the design space has no
    /// weight axis.
    pub fn calculate_weight(&self, relevance: f32) -> Option<f32> {
        self.ranges.get(tags::WGHT).map(|range| range.lerp(relevance))
    }

    /// Grade for a relevance scalar, `None` when the design space has no
    /// grade axis.
    pub fn calculate_grade(&self, relevance: f32) -> Option<f32> {
        self.ranges.get(tags::GRAD).map(|range| range.lerp(relevance))
    }

    /// Largest width-axis value whose measured text width stays under the
    /// width target, or the axis minimum when even that overflows (the
    /// caller compensates through weight/grade reduction).
    ///
    /// Two phases: a coarse ascent from the minimum with shrinking steps
    /// establishes a `[fits, overflows]` bracket, then integer binary
    /// search closes it. A best value within `snap_margin_px` of the
    /// target is backed off one more unit so the later cell-verified pass
    /// rarely has work to do.
    pub fn calculate_optimal_width(
        &self,
        container_width_px: f32,
        fixed_axes: &AxisSet,
        measure: &mut dyn FnMut(&AxisSet) -> f32,
    ) -> Option<f32> {
        let range = self.ranges.get(tags::WDTH)?;
        let min = range.min.round() as i32;
        let max = range.max.round() as i32;
        let tuning = &self.tuning;

        let target =
            (container_width_px * tuning.margin_factor).floor() - tuning.safety_offset_px;
        if target <= 0.0 || min >= max {
            return Some(range.min);
        }

        let probes = Cell::new(0u32);
        let mut probe = |width: i32| -> f32 {
            probes.set(probes.get() + 1);
            measure(&fixed_axes.clone().with(tags::WDTH, width as f32))
        };

        let measured_min = probe(min);
        if measured_min <= 0.0 {
            debug!("width search: inconclusive measurement at minimum, keeping {min}");
            return Some(range.min);
        }
        if measured_min > target {
            return Some(range.min);
        }
        let measured_max = probe(max);
        if measured_max > 0.0 && measured_max <= target {
            return Some(range.max);
        }

        let mut low = min;
        let mut high = max;
        let mut best = min;
        let mut best_measured = measured_min;

        // Phase 1: coarse ascent, shrinking steps.
        let mut step = ((max - min) / 4).max(tuning.width_step.max(1));
        while probes.get() < tuning.max_width_probes {
            let next = (low + step).min(max);
            if next == low {
                break;
            }
            let measured = probe(next);
            if measured > 0.0 && measured <= target {
                low = next;
                best = next;
                best_measured = measured;
            } else {
                high = next;
                break;
            }
            step = (step / 2).max(tuning.width_step.max(1));
        }

        // Phase 2: binary search within the bracket.
        while high - low > 1 && probes.get() < tuning.max_width_probes {
            let mid = (low + high) / 2;
            let measured = probe(mid);
            if measured > 0.0 && measured <= target {
                low = mid;
                best = mid;
                best_measured = measured;
            } else {
                high = mid;
            }
        }

        // Anticipate the per-cell rounding gap instead of re-measuring.
        if best > min && target - best_measured < tuning.snap_margin_px {
            best -= 1;
        }

        debug!("width search: {best} after {} probes (target {target} px)", probes.get());
        Some(best as f32)
    }

    /// Largest font size in `[min_font_size, max_font_size]` whose
    /// measured width fits the container, by bounded binary search.
    pub fn calculate_max_font_size(
        &self,
        container_width_px: f32,
        measure: &mut dyn FnMut(f32) -> f32,
    ) -> f32 {
        let tuning = &self.tuning;
        let mut low = tuning.min_font_size.round() as i32;
        let mut high = tuning.max_font_size.round() as i32;

        let probes = Cell::new(0u32);
        let mut probe = |size: i32| -> f32 {
            probes.set(probes.get() + 1);
            measure(size as f32)
        };

        let measured_min = probe(low);
        if measured_min <= 0.0 || measured_min > container_width_px {
            return tuning.min_font_size;
        }
        let measured_max = probe(high);
        if measured_max > 0.0 && measured_max <= container_width_px {
            return tuning.max_font_size;
        }

        while high - low > 1 && probes.get() < tuning.max_font_size_probes {
            let mid = (low + high) / 2;
            let measured = probe(mid);
            if measured > 0.0 && measured <= container_width_px {
                low = mid;
            } else {
                high = mid;
            }
        }
        low as f32
    }

    /// True when weight, grade and width all sit within the maximized
    /// threshold of their declared maxima; surplus horizontal space should
    /// then be redistributed rather than pushed into the axes.
    pub fn axes_maximized(&self, axes: &AxisSet) -> bool {
        [tags::WGHT, tags::GRAD, tags::WDTH].into_iter().all(|tag| {
            match self.ranges.get(tag) {
                Some(range) => {
                    let value = axes.get(tag).unwrap_or(range.default);
                    value >= range.max * self.tuning.maximized_threshold
                }
                // An axis the design space never declared cannot hold the
                // decision back.
                None => true,
            }
        })
    }
}
