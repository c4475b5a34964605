//! The fit controller: orchestrates measure, solve, correct, settle.

use std::time::Instant;

use liquidtype_animator::{FrameListener, PointerState, ProximityAnimator, Rgb};
use liquidtype_axes::{AxisSet, Tag, tags};
use liquidtype_measure::{CharRun, TextMeasurer, TextStyle};
use log::{debug, info, warn};

use crate::{
    AxisSolver, Error, FitOptions, FitTarget, FitUpdate, LayoutProvider, ResizeDebouncer, Result,
    StyleSink,
};

/// Phase of the fit state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitPhase {
    Idle,
    Measuring,
    Correcting,
    Settled,
}

/// Why a fit pass did not run. All of these are soft conditions; the pass
/// is simply retried on the next trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyText,
    DegenerateContainer,
    MeasurementInconclusive,
    InFlight,
    Destroyed,
}

/// Result of one settled fit pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FitReport {
    /// The settled snapshot, integer-rounded.
    pub axes: AxisSet,
    pub font_size_px: f32,
    pub container_width_px: f32,
    /// Continuous-run width at the settled values.
    pub synthetic_width_px: f32,
    /// Summed per-cell width at the settled values (authoritative).
    pub rendered_width_px: f32,
    /// Width-axis decrements the cell-verified correction loop needed.
    pub correction_steps: u32,
    /// Weight, grade and width are all near their maxima; surplus space
    /// should be redistributed rather than pushed into the axes.
    pub axes_maximized: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FitOutcome {
    Settled(FitReport),
    /// The freshly computed snapshot equals the settled one; no style was
    /// written.
    Unchanged,
    Skipped(SkipReason),
}

/// Presentation state of one character cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellStyle {
    pub ch: char,
    pub axes: AxisSet,
    pub color: Rgb,
}

/// One fitted text instance.
///
/// Owns the per-character cell grid for the current text, the settled
/// axis snapshot, and (when animation is enabled) one proximity animator
/// per cell, re-baselined on every settle.
pub struct FitText<M: TextMeasurer + Clone> {
    options: FitOptions,
    solver: AxisSolver,
    measurer: M,
    run: CharRun<M>,
    viewport: Box<dyn LayoutProvider>,
    sink: Option<Box<dyn StyleSink>>,
    debouncer: ResizeDebouncer,
    /// Solver output before cell-verified correction; the suppression
    /// check compares against this, since correction may trim the
    /// published snapshot below what an identical re-solve produces.
    solved: Option<AxisSet>,
    current: Option<AxisSet>,
    font_size_px: f32,
    /// The host-declared size; flexible passes re-solve from here.
    base_font_size_px: f32,
    animators: Vec<ProximityAnimator>,
    phase: FitPhase,
    in_flight: bool,
    destroyed: bool,
}

impl<M: TextMeasurer + Clone> FitText<M> {
    pub fn new(
        measurer: M,
        ranges: liquidtype_axes::AxisRangeTable,
        text: &str,
        font_size_px: f32,
        viewport: Box<dyn LayoutProvider>,
        mut options: FitOptions,
    ) -> Result<Self> {
        if !font_size_px.is_finite() || font_size_px <= 0.0 {
            return Err(Error::InvalidFontSize(font_size_px));
        }
        options.relevance = clamp_relevance(options.relevance);
        let run = CharRun::new(measurer.clone(), text, font_size_px);
        let debouncer = ResizeDebouncer::new(options.debounce);
        let solver = AxisSolver::new(ranges, options.tuning);
        let mut fit = Self {
            solver,
            measurer,
            run,
            viewport,
            sink: None,
            debouncer,
            solved: None,
            current: None,
            font_size_px,
            base_font_size_px: font_size_px,
            animators: Vec::new(),
            phase: FitPhase::Idle,
            in_flight: false,
            destroyed: false,
            options,
        };
        fit.rebuild_animators();
        Ok(fit)
    }

    /// Runs one full fit pass immediately.
    pub fn fit(&mut self) -> FitOutcome {
        if self.destroyed {
            return FitOutcome::Skipped(SkipReason::Destroyed);
        }
        if self.in_flight {
            debug!("fit requested while a pass is in flight, deferring");
            return FitOutcome::Skipped(SkipReason::InFlight);
        }
        if self.run.is_empty() {
            debug!("nothing to fit: empty text");
            return FitOutcome::Skipped(SkipReason::EmptyText);
        }
        let width = self.viewport.content_width();
        if width <= 0 {
            warn!("container not laid out yet ({width} px wide), skipping fit");
            return FitOutcome::Skipped(SkipReason::DegenerateContainer);
        }

        let target = FitTarget {
            text: self.run.text(),
            container_width_px: width as f32,
            font_size_px: self.base_font_size_px,
            relevance: self.options.relevance,
            locked_axes: self.options.locked_axes.clone(),
        };

        self.in_flight = true;
        self.phase = FitPhase::Measuring;
        let outcome = if self.solver.ranges().is_empty() {
            self.fit_font_size_only(&target)
        } else {
            self.fit_axes(&target)
        };
        self.in_flight = false;
        outcome
    }

    /// Merges changed inputs and refits only when something actually
    /// changed.
    pub fn update(&mut self, update: FitUpdate) -> FitOutcome {
        if self.destroyed {
            return FitOutcome::Skipped(SkipReason::Destroyed);
        }
        let mut changed = false;
        if let Some(relevance) = update.relevance {
            let relevance = clamp_relevance(relevance);
            if relevance != self.options.relevance {
                self.options.relevance = relevance;
                changed = true;
            }
        }
        if let Some(locked) = update.locked_axes
            && locked != self.options.locked_axes
        {
            self.options.locked_axes = locked;
            changed = true;
        }
        if changed { self.fit() } else { FitOutcome::Unchanged }
    }

    /// Replaces the text, destroying and rebuilding the cell grid and its
    /// animators, then refits.
    pub fn set_text(&mut self, text: &str) -> FitOutcome {
        if self.destroyed {
            return FitOutcome::Skipped(SkipReason::Destroyed);
        }
        self.run.set_text(text);
        self.rebuild_animators();
        self.solved = None;
        self.current = None;
        self.fit()
    }

    /// Host resize notification; coalesced by the debouncer.
    pub fn notify_resize(&mut self, now: Instant) {
        if !self.destroyed {
            self.debouncer.notify(now);
        }
    }

    /// Runs the pending debounced fit once its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<FitOutcome> {
        self.debouncer.ready(now).then(|| self.fit())
    }

    /// Immutable snapshot of the last settled axis values.
    pub fn current_axes(&self) -> Option<AxisSet> {
        self.current.clone()
    }

    pub fn phase(&self) -> FitPhase {
        self.phase
    }

    pub fn font_size(&self) -> f32 {
        self.font_size_px
    }

    pub fn relevance(&self) -> f32 {
        self.options.relevance
    }

    pub fn options(&self) -> &FitOptions {
        &self.options
    }

    pub fn text(&self) -> String {
        self.run.text()
    }

    pub fn cell_count(&self) -> usize {
        self.run.len()
    }

    /// Attaches an observer for every style write the engine performs.
    pub fn set_style_sink(&mut self, sink: Box<dyn StyleSink>) {
        self.sink = Some(sink);
    }

    /// Places the run in host coordinates so cell centers line up with
    /// pointer input.
    pub fn set_origin(&mut self, x: f32, y: f32) {
        self.run.set_origin(x, y);
    }

    /// Updates the animation colors; animators re-sample them on the next
    /// settle, mirroring a host theme change.
    pub fn set_colors(&mut self, base: Rgb, hover: Rgb) {
        if let Some(config) = &mut self.options.animation {
            config.color_base = base;
            config.color_hover = hover;
        }
    }

    /// Current presentation state per cell: the animator's smoothed axes
    /// and color when animation is enabled, the settled run style
    /// otherwise.
    pub fn cell_styles(&self) -> Vec<CellStyle> {
        if self.animators.is_empty() {
            let resting = self
                .options
                .animation
                .as_ref()
                .map(|config| config.color_base)
                .unwrap_or(Rgb::WHITE);
            return self
                .run
                .cells()
                .iter()
                .map(|cell| CellStyle {
                    ch: cell.ch(),
                    axes: self.run.axes().clone(),
                    color: resting,
                })
                .collect();
        }
        self.run
            .cells()
            .iter()
            .zip(&self.animators)
            .map(|(cell, animator)| CellStyle {
                ch: cell.ch(),
                axes: animator.current_axes().clone(),
                color: animator.current_color(),
            })
            .collect()
    }

    /// Releases everything: pending debounce, applied styles, animators.
    /// Idempotent; later calls and fit requests are no-ops.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.debouncer.cancel();
        self.run.clear();
        if let Some(sink) = &mut self.sink {
            sink.clear();
        }
        self.animators.clear();
        self.solved = None;
        self.current = None;
        self.phase = FitPhase::Idle;
    }

    /// The axis-solving pass: relevance mapping, width search, overflow
    /// reduction, then the cell-verified correction loop.
    fn fit_axes(&mut self, target: &FitTarget) -> FitOutcome {
        let ranges = self.solver.ranges().clone();
        let tuning = *self.solver.tuning();
        let container = target.container_width_px;
        let locked = &target.locked_axes;

        let wght_locked = locked.contains(tags::WGHT);
        let grad_locked = locked.contains(tags::GRAD);
        let width_locked = locked.contains(tags::WDTH);

        let mut wght = locked
            .get(tags::WGHT)
            .or_else(|| self.solver.calculate_weight(target.relevance));
        let mut grad = locked
            .get(tags::GRAD)
            .or_else(|| self.solver.calculate_grade(target.relevance));
        let slnt = locked.get(tags::SLNT).or_else(|| {
            self.current
                .as_ref()
                .and_then(|axes| axes.get(tags::SLNT))
                .or_else(|| ranges.get(tags::SLNT).map(|range| range.default))
        });
        let rond = locked.get(tags::ROND).or_else(|| {
            self.current
                .as_ref()
                .and_then(|axes| axes.get(tags::ROND))
                .or_else(|| ranges.get(tags::ROND).map(|range| range.default))
        });

        let measurer = self.measurer.clone();
        let text = target.text.clone();

        let mut font_size = target.font_size_px;
        if self.options.font_size_flexible {
            let fixed = compose(&[
                (tags::WGHT, wght),
                (tags::GRAD, grad),
                (tags::SLNT, slnt),
                (tags::ROND, rond),
            ]);
            let mut measure_at = |size: f32| {
                measurer.measure(&text, TextStyle { font_size_px: size, axes: &fixed })
            };
            font_size = self.solver.calculate_max_font_size(container, &mut measure_at);
        }

        let mut measure = |axes: &AxisSet| {
            measurer.measure(&text, TextStyle { font_size_px: font_size, axes })
        };

        let fixed = compose(&[
            (tags::WGHT, wght),
            (tags::GRAD, grad),
            (tags::SLNT, slnt),
            (tags::ROND, rond),
        ]);
        let mut wdth = if width_locked {
            locked.get(tags::WDTH)
        } else {
            self.solver.calculate_optimal_width(container, &fixed, &mut measure)
        };

        let mut measured = measure(&compose(&[
            (tags::WGHT, wght),
            (tags::WDTH, wdth),
            (tags::GRAD, grad),
            (tags::SLNT, slnt),
            (tags::ROND, rond),
        ]));
        if measured <= 0.0 {
            warn!("inconclusive measurement for non-empty text, skipping fit");
            self.phase = FitPhase::Idle;
            return FitOutcome::Skipped(SkipReason::MeasurementInconclusive);
        }

        // Even the width minimum can overflow; shed weight and grade
        // proportionally to the overflow until the text fits or every axis
        // is at its floor.
        let mut passes = 0u32;
        while measured > container && passes < tuning.max_reduction_passes {
            let overflow_ratio = ((measured - container) / container).min(1.0);
            let mut changed = false;

            if !wght_locked
                && let Some(range) = ranges.get(tags::WGHT)
                && let Some(value) = wght
                && value > range.min
            {
                let step = ((value - range.min) * tuning.reduction_rate * overflow_ratio)
                    .floor()
                    .max(tuning.weight_step_floor);
                wght = Some((value - step).max(range.min));
                changed = true;
            }
            if !grad_locked
                && let Some(range) = ranges.get(tags::GRAD)
                && let Some(value) = grad
                && value > range.min
            {
                let step = ((value - range.min) * tuning.reduction_rate * overflow_ratio)
                    .floor()
                    .max(tuning.grade_step_floor);
                grad = Some((value - step).max(range.min));
                changed = true;
            }
            if !width_locked
                && let Some(range) = ranges.get(tags::WDTH)
                && let Some(value) = wdth
                && value > range.min
            {
                let step = ((value - range.min) * tuning.reduction_rate * overflow_ratio)
                    .floor()
                    .max(tuning.width_step_floor);
                wdth = Some((value - step).max(range.min));
                changed = true;
            }
            if !changed {
                break;
            }

            let fixed = compose(&[
                (tags::WGHT, wght),
                (tags::GRAD, grad),
                (tags::SLNT, slnt),
                (tags::ROND, rond),
            ]);
            if !width_locked
                && let Some(resolved) =
                    self.solver.calculate_optimal_width(container, &fixed, &mut measure)
            {
                wdth = Some(resolved);
            }
            measured = measure(&compose(&[
                (tags::WGHT, wght),
                (tags::WDTH, wdth),
                (tags::GRAD, grad),
                (tags::SLNT, slnt),
                (tags::ROND, rond),
            ]));
            passes += 1;
        }
        if passes == tuning.max_reduction_passes {
            debug!("overflow reduction budget exhausted, accepting {measured} px");
        }

        let mut candidate = compose(&[
            (tags::WGHT, wght),
            (tags::WDTH, wdth),
            (tags::GRAD, grad),
            (tags::SLNT, slnt),
            (tags::ROND, rond),
        ])
        .rounded();

        if self.solved.as_ref() == Some(&candidate) && font_size == self.font_size_px {
            self.phase = FitPhase::Settled;
            debug!("fit unchanged, skipping style writes");
            return FitOutcome::Unchanged;
        }
        let solved = candidate.clone();

        // Correction: verify against the summed cell widths, which round
        // differently from the continuous run, and trim the width axis
        // until the real layout fits.
        self.phase = FitPhase::Correcting;
        if font_size != self.font_size_px {
            self.font_size_px = font_size;
            self.run.set_font_size(font_size);
            if let Some(sink) = &mut self.sink {
                sink.apply_font_size(font_size);
            }
        }
        self.apply(&candidate);
        let mut rendered = self.run.total_width();
        let safety = container * tuning.margin_factor;
        let width_min = ranges.get(tags::WDTH).map(|range| range.min);
        let mut steps = 0u32;
        while rendered > safety && steps < tuning.max_correction_steps && !width_locked {
            let Some(min) = width_min else { break };
            let Some(width) = candidate.get(tags::WDTH) else { break };
            if width <= min {
                break;
            }
            candidate = candidate.merged(&AxisSet::new().with(tags::WDTH, (width - 1.0).max(min)));
            self.apply(&candidate);
            rendered = self.run.total_width();
            steps += 1;
        }

        let synthetic = measure(&candidate);
        self.solved = Some(solved);
        self.settle(candidate, font_size, container, synthetic, rendered, steps, &target.text)
    }

    /// Fallback for fonts without variable axes: scale the font size by
    /// the overflow ratio, floored at the configured minimum.
    fn fit_font_size_only(&mut self, target: &FitTarget) -> FitOutcome {
        let container = target.container_width_px;
        let axes = AxisSet::new();
        let style = TextStyle { font_size_px: target.font_size_px, axes: &axes };
        let measured = self.measurer.measure(&target.text, style);
        if measured <= 0.0 {
            warn!("inconclusive measurement for non-empty text, skipping fit");
            self.phase = FitPhase::Idle;
            return FitOutcome::Skipped(SkipReason::MeasurementInconclusive);
        }

        let mut font_size = target.font_size_px;
        if measured > container {
            let scale = container / measured;
            font_size = (target.font_size_px * scale)
                .floor()
                .max(self.solver.tuning().min_font_size);
        }

        let candidate = AxisSet::new();
        if self.solved.as_ref() == Some(&candidate) && font_size == self.font_size_px {
            self.phase = FitPhase::Settled;
            return FitOutcome::Unchanged;
        }
        self.solved = Some(candidate.clone());

        self.phase = FitPhase::Correcting;
        if font_size != self.font_size_px {
            self.font_size_px = font_size;
            self.run.set_font_size(font_size);
            if let Some(sink) = &mut self.sink {
                sink.apply_font_size(font_size);
            }
        }
        self.apply(&candidate);
        let rendered = self.run.total_width();
        let synthetic = self
            .measurer
            .measure(&target.text, TextStyle { font_size_px: font_size, axes: &candidate });
        self.settle(candidate, font_size, container, synthetic, rendered, 0, &target.text)
    }

    fn settle(
        &mut self,
        candidate: AxisSet,
        font_size: f32,
        container: f32,
        synthetic: f32,
        rendered: f32,
        correction_steps: u32,
        text: &str,
    ) -> FitOutcome {
        self.phase = FitPhase::Settled;
        self.current = Some(candidate.clone());
        self.sync_animators();
        info!(
            "settled \"{text}\" at [{candidate}] in {container} px ({rendered} px rendered)"
        );
        let report = FitReport {
            axes_maximized: self.solver.axes_maximized(&candidate),
            axes: candidate,
            font_size_px: font_size,
            container_width_px: container,
            synthetic_width_px: synthetic,
            rendered_width_px: rendered,
            correction_steps,
        };
        FitOutcome::Settled(report)
    }

    fn apply(&mut self, axes: &AxisSet) {
        self.run.apply_axes(axes);
        if let Some(sink) = &mut self.sink {
            sink.apply_axes(axes);
        }
    }

    fn rebuild_animators(&mut self) {
        self.animators = match self.options.animation {
            Some(config) => {
                let base = self.current.clone().unwrap_or_default();
                (0..self.run.len())
                    .map(|_| ProximityAnimator::new(&base, self.solver.ranges(), config))
                    .collect()
            }
            None => Vec::new(),
        };
    }

    fn sync_animators(&mut self) {
        let Some(config) = self.options.animation else {
            return;
        };
        let Some(current) = self.current.clone() else {
            return;
        };
        for animator in &mut self.animators {
            animator.set_base_axes(&current, config.color_base);
        }
    }
}

impl<M: TextMeasurer + Clone> FrameListener for FitText<M> {
    /// One animation frame: every cell's animator re-reads its center and
    /// interpolates around the settled baseline.
    fn frame(&mut self, pointer: &PointerState) {
        if self.destroyed || self.animators.is_empty() {
            return;
        }
        for (index, animator) in self.animators.iter_mut().enumerate() {
            if let Some(center) = self.run.cell_center(index) {
                animator.update(pointer, center);
            }
        }
    }
}

fn clamp_relevance(relevance: f32) -> f32 {
    if relevance.is_finite() { relevance.clamp(0.0, 1.0) } else { 0.5 }
}

fn compose(values: &[(Tag, Option<f32>)]) -> AxisSet {
    let mut axes = AxisSet::new();
    for (tag, value) in values {
        if let Some(value) = value {
            axes.insert(*tag, *value);
        }
    }
    axes
}
