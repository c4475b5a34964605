//! End-to-end fit passes against a deterministic measurement model.
//!
//! The model is linear in every axis the solver touches, so expected
//! behavior can be reasoned out exactly: a character is
//! `font_size * (0.42 + 0.08 * wght/1000 + 0.02 * GRAD/100) * wdth/100`
//! pixels wide.

use std::{
    cell::RefCell,
    rc::Rc,
    time::{Duration, Instant},
};

use liquidtype_animator::{AnimatorConfig, FrameScheduler, Rgb};
use liquidtype_axes::{AxisRangeTable, AxisSet, tags};
use liquidtype_engine::{
    FitOptions, FitOutcome, FitPhase, FitReport, FitText, FitUpdate, FixedViewport,
    SharedViewport, SkipReason, StyleSink,
};
use liquidtype_measure::{TextMeasurer, TextStyle};

#[derive(Debug, Clone)]
struct ModelMeasurer;

impl TextMeasurer for ModelMeasurer {
    fn measure(&self, text: &str, style: TextStyle<'_>) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        let wght = style.axes.get(tags::WGHT).unwrap_or(400.0);
        let grad = style.axes.get(tags::GRAD).unwrap_or(0.0);
        let wdth = style.axes.get(tags::WDTH).unwrap_or(100.0);
        let per_char = style.font_size_px
            * (0.42 + 0.08 * wght / 1000.0 + 0.02 * grad / 100.0)
            * (wdth / 100.0);
        text.chars().count() as f32 * per_char
    }
}

#[derive(Debug, Default)]
struct SinkLog {
    axis_writes: u32,
    font_size_writes: u32,
    cleared: bool,
}

#[derive(Debug, Clone)]
struct CountingSink {
    log: Rc<RefCell<SinkLog>>,
}

impl CountingSink {
    fn new() -> (Self, Rc<RefCell<SinkLog>>) {
        let log = Rc::new(RefCell::new(SinkLog::default()));
        (Self { log: log.clone() }, log)
    }
}

impl StyleSink for CountingSink {
    fn apply_axes(&mut self, _axes: &AxisSet) {
        self.log.borrow_mut().axis_writes += 1;
    }

    fn apply_font_size(&mut self, _font_size_px: f32) {
        self.log.borrow_mut().font_size_writes += 1;
    }

    fn clear(&mut self) {
        self.log.borrow_mut().cleared = true;
    }
}

fn fit_text(width: i32, options: FitOptions) -> FitText<ModelMeasurer> {
    FitText::new(
        ModelMeasurer,
        AxisRangeTable::default(),
        "Hello World",
        48.0,
        Box::new(FixedViewport { width, height: 120 }),
        options,
    )
    .expect("valid construction")
}

fn settled(outcome: FitOutcome) -> FitReport {
    match outcome {
        FitOutcome::Settled(report) => report,
        other => panic!("expected a settled fit, got {other:?}"),
    }
}

#[test]
fn high_relevance_fills_a_300px_container() {
    let mut fit = fit_text(300, FitOptions { relevance: 0.9, ..FitOptions::default() });
    let report = settled(fit.fit());

    assert_eq!(report.axes.get(tags::WGHT), Some(900.0));
    assert_eq!(report.axes.get(tags::GRAD), Some(90.0));
    let wdth = report.axes.get(tags::WDTH).unwrap();
    assert!((95.0..=110.0).contains(&wdth), "wdth {wdth}");
    assert!(report.rendered_width_px <= 285.0);
    assert!(report.rendered_width_px >= 250.0, "{} px", report.rendered_width_px);
    assert_eq!(fit.phase(), FitPhase::Settled);
}

#[test]
fn zero_relevance_fits_the_same_budget_with_light_letterforms() {
    let mut fit = fit_text(300, FitOptions { relevance: 0.0, ..FitOptions::default() });
    let report = settled(fit.fit());

    assert_eq!(report.axes.get(tags::WGHT), Some(1.0));
    assert_eq!(report.axes.get(tags::GRAD), Some(0.0));
    // Width is solved independently; the lighter face takes more width.
    assert!(report.axes.get(tags::WDTH).unwrap() > 110.0);
    assert!(report.rendered_width_px <= 285.0);
}

#[test]
fn refit_without_changes_is_suppressed_with_zero_style_writes() {
    let mut fit = fit_text(300, FitOptions::default());
    let (sink, log) = CountingSink::new();
    fit.set_style_sink(Box::new(sink));

    let first = settled(fit.fit());
    let writes_after_first = log.borrow().axis_writes;
    assert!(writes_after_first > 0);

    let second = fit.fit();
    assert_eq!(second, FitOutcome::Unchanged);
    assert_eq!(log.borrow().axis_writes, writes_after_first);
    assert_eq!(fit.current_axes(), Some(first.axes));
}

#[test]
fn correction_pass_terminates_and_meets_the_safety_margin() {
    for width in [60, 100, 150, 300, 500, 900] {
        let mut fit = fit_text(width, FitOptions::default());
        let report = settled(fit.fit());
        assert!(report.correction_steps <= 20);
        let within_margin = report.rendered_width_px <= width as f32 * 0.95;
        let at_width_floor = report.axes.get(tags::WDTH) == Some(25.0);
        assert!(
            within_margin || at_width_floor,
            "{width} px container: rendered {} px at {:?}",
            report.rendered_width_px,
            report.axes
        );
    }
}

#[test]
fn impossible_container_reduces_weight_and_grade_then_accepts_overflow() {
    let mut fit = fit_text(40, FitOptions { relevance: 0.5, ..FitOptions::default() });
    let report = settled(fit.fit());

    assert_eq!(report.axes.get(tags::WDTH), Some(25.0));
    // Weight was shed from its relevance-mapped 501.
    assert!(report.axes.get(tags::WGHT).unwrap() < 501.0);
    // Still does not fit; the overflow is accepted rather than thrown.
    assert!(report.rendered_width_px > 40.0);
    assert_eq!(fit.phase(), FitPhase::Settled);
}

#[test]
fn shrinking_container_reduces_width_before_weight() {
    let host = SharedViewport::new(300, 120);
    let mut fit = FitText::new(
        ModelMeasurer,
        AxisRangeTable::default(),
        "Hello World",
        48.0,
        Box::new(host.clone()),
        FitOptions::default(),
    )
    .unwrap();

    let wide = settled(fit.fit());
    let wide_wdth = wide.axes.get(tags::WDTH).unwrap();

    host.resize(100, 120);
    let t0 = Instant::now();
    fit.notify_resize(t0);
    assert_eq!(fit.poll(t0 + Duration::from_millis(50)), None);
    let narrow = settled(fit.poll(t0 + Duration::from_millis(150)).expect("debounce elapsed"));

    assert!(narrow.axes.get(tags::WDTH).unwrap() < wide_wdth);
    // Width alone absorbed the shrink; weight is untouched.
    assert_eq!(narrow.axes.get(tags::WGHT), wide.axes.get(tags::WGHT));
    assert!(narrow.rendered_width_px <= 95.0);
}

#[test]
fn resize_bursts_coalesce_into_one_fit() {
    let host = SharedViewport::new(300, 120);
    let mut fit = FitText::new(
        ModelMeasurer,
        AxisRangeTable::default(),
        "Hello World",
        48.0,
        Box::new(host.clone()),
        FitOptions::default(),
    )
    .unwrap();
    settled(fit.fit());

    let t0 = Instant::now();
    for burst in 0..5 {
        host.resize(300 - burst * 40, 120);
        fit.notify_resize(t0 + Duration::from_millis(burst as u64 * 20));
    }
    // Quiet period counts from the last notification.
    assert_eq!(fit.poll(t0 + Duration::from_millis(150)), None);
    assert!(fit.poll(t0 + Duration::from_millis(200)).is_some());
    assert_eq!(fit.poll(t0 + Duration::from_millis(300)), None);
}

#[test]
fn update_with_identical_values_does_not_refit() {
    let mut fit = fit_text(300, FitOptions::default());
    settled(fit.fit());
    assert_eq!(fit.update(FitUpdate::relevance(0.5)), FitOutcome::Unchanged);
}

#[test]
fn update_with_new_relevance_refits_heavier() {
    let mut fit = fit_text(300, FitOptions { relevance: 0.2, ..FitOptions::default() });
    let light = settled(fit.fit());
    let heavy = settled(fit.update(FitUpdate::relevance(0.95)));
    assert!(
        heavy.axes.get(tags::WGHT).unwrap() > light.axes.get(tags::WGHT).unwrap()
    );
}

#[test]
fn out_of_range_relevance_is_clamped_not_rejected() {
    let mut fit = fit_text(300, FitOptions::default());
    settled(fit.fit());
    let clamped = settled(fit.update(FitUpdate::relevance(7.0)));
    assert_eq!(clamped.axes.get(tags::WGHT), Some(1000.0));
}

#[test]
fn locked_axes_are_held_fixed_across_passes() {
    let mut fit = fit_text(300, FitOptions::default());
    settled(fit.fit());

    let locked = AxisSet::new().with(tags::SLNT, -5.0).with(tags::WGHT, 200.0);
    let report = settled(fit.update(FitUpdate::locked(locked)));
    assert_eq!(report.axes.get(tags::SLNT), Some(-5.0));
    // Relevance mapping would say 501; the lock wins.
    assert_eq!(report.axes.get(tags::WGHT), Some(200.0));
}

#[test]
fn flexible_font_size_joins_the_solve() {
    let options = FitOptions { font_size_flexible: true, ..FitOptions::default() };
    let mut fit = fit_text(300, options);
    let report = settled(fit.fit());
    assert!((50.0..60.0).contains(&report.font_size_px), "{} px", report.font_size_px);
    assert!(report.rendered_width_px <= 285.0);
    assert_eq!(fit.font_size(), report.font_size_px);
}

#[test]
fn static_font_falls_back_to_font_size_scaling() {
    let mut fit = FitText::new(
        ModelMeasurer,
        AxisRangeTable::new(),
        "Hello World",
        48.0,
        Box::new(FixedViewport { width: 100, height: 120 }),
        FitOptions::default(),
    )
    .unwrap();
    let report = settled(fit.fit());
    assert!(report.axes.is_empty());
    assert!(report.font_size_px < 48.0);
    assert!(report.font_size_px >= 8.0);
    assert_eq!(fit.fit(), FitOutcome::Unchanged);
}

#[test]
fn empty_text_skips_the_pass() {
    let mut fit = FitText::new(
        ModelMeasurer,
        AxisRangeTable::default(),
        "",
        48.0,
        Box::new(FixedViewport { width: 300, height: 120 }),
        FitOptions::default(),
    )
    .unwrap();
    assert_eq!(fit.fit(), FitOutcome::Skipped(SkipReason::EmptyText));
}

#[test]
fn hidden_container_skips_and_recovers_on_next_trigger() {
    let host = SharedViewport::new(0, 0);
    let mut fit = FitText::new(
        ModelMeasurer,
        AxisRangeTable::default(),
        "Hello World",
        48.0,
        Box::new(host.clone()),
        FitOptions::default(),
    )
    .unwrap();
    assert_eq!(fit.fit(), FitOutcome::Skipped(SkipReason::DegenerateContainer));

    host.resize(300, 120);
    settled(fit.fit());
}

#[test]
fn zero_font_size_is_rejected_at_construction() {
    let result = FitText::new(
        ModelMeasurer,
        AxisRangeTable::default(),
        "Hello World",
        0.0,
        Box::new(FixedViewport { width: 300, height: 120 }),
        FitOptions::default(),
    );
    assert!(result.is_err());
}

#[test]
fn set_text_rebuilds_and_refits() {
    let mut fit = fit_text(300, FitOptions::default());
    settled(fit.fit());
    let report = settled(fit.set_text("Hi"));
    assert_eq!(fit.cell_count(), 2);
    assert!(report.rendered_width_px <= 285.0);
}

#[test]
fn destroy_is_idempotent_and_disables_fitting() {
    let mut fit = fit_text(300, FitOptions::default());
    let (sink, log) = CountingSink::new();
    fit.set_style_sink(Box::new(sink));
    settled(fit.fit());

    fit.destroy();
    assert!(log.borrow().cleared);
    assert_eq!(fit.fit(), FitOutcome::Skipped(SkipReason::Destroyed));
    assert_eq!(fit.current_axes(), None);
    fit.destroy();
}

#[test]
fn settle_baselines_every_animator() {
    let animation = AnimatorConfig {
        color_base: Rgb::BLACK,
        color_hover: Rgb::WHITE,
        ..AnimatorConfig::default()
    };
    let mut fit = fit_text(300, FitOptions { animation: Some(animation), ..FitOptions::default() });
    let report = settled(fit.fit());

    for style in fit.cell_styles() {
        assert_eq!(style.axes, report.axes);
        assert_eq!(style.color, Rgb::BLACK);
    }
}

#[test]
fn pointer_proximity_animates_cells_without_touching_width() {
    let animation = AnimatorConfig {
        lerp_factor: 0.3,
        color_base: Rgb::BLACK,
        color_hover: Rgb::WHITE,
        ..AnimatorConfig::default()
    };
    let fit = Rc::new(RefCell::new(fit_text(
        300,
        FitOptions { relevance: 0.9, animation: Some(animation), ..FitOptions::default() },
    )));
    let report = settled(fit.borrow_mut().fit());
    let settled_wdth = report.axes.get(tags::WDTH);

    let mut scheduler = FrameScheduler::new();
    scheduler.register(fit.clone());

    // Hover the first character.
    let (cx, cy) = (13.0, 24.0);
    scheduler.pointer_moved(cx, cy);
    for _ in 0..40 {
        scheduler.tick();
    }

    let styles = fit.borrow().cell_styles();
    let first = &styles[0];
    assert!(first.axes.get(tags::WGHT).unwrap() < 900.0);
    assert!(first.color.r > 100.0);
    for style in &styles {
        assert_eq!(style.axes.get(tags::WDTH), settled_wdth);
    }

    // Pointer leaves: everything decays back toward the baseline.
    scheduler.pointer_left();
    for _ in 0..200 {
        scheduler.tick();
    }
    let styles = fit.borrow().cell_styles();
    let wght = styles[0].axes.get(tags::WGHT).unwrap();
    assert!((wght - 900.0).abs() < 1.0, "decayed to {wght}");
}
