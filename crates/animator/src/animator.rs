//! Per-character proximity animation.

use liquidtype_axes::{AxisRangeTable, AxisSet, Tag, tags};

use crate::{PointerState, Rgb};

/// How an axis responds to pointer proximity.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Motion {
    /// Rests at the baseline (its maximum) and pulls toward the range
    /// minimum as the pointer approaches.
    Inverted,
    /// Rests at the baseline (its floor) and pushes toward the range
    /// maximum as the pointer approaches.
    Normal,
}

/// The width axis is excluded: animating it would desynchronize the run
/// from the width the fit pass solved for.
const ANIMATED: [(Tag, Motion); 4] = [
    (tags::WGHT, Motion::Inverted),
    (tags::GRAD, Motion::Normal),
    (tags::SLNT, Motion::Inverted),
    (tags::ROND, Motion::Normal),
];

#[derive(Debug, Clone, Copy)]
pub struct AnimatorConfig {
    /// Pointer distance (px) at which influence fades to zero.
    pub radius: f32,
    /// Per-frame smoothing factor for axes and color channels.
    pub lerp_factor: f32,
    /// Resting color, normally re-sampled from the host on every settle.
    pub color_base: Rgb,
    /// Color reached at full influence.
    pub color_hover: Rgb,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            radius: 220.0,
            lerp_factor: 0.12,
            color_base: Rgb::WHITE,
            color_hover: Rgb::WHITE,
        }
    }
}

/// Animates one character's axis values around a fit-settled baseline.
///
/// `base` is written only by the fit controller (via [`set_base_axes`]);
/// `current` and `target` are written only here, once per frame. Snapshots
/// are rebuilt wholesale each frame, never field-mutated in place.
///
/// [`set_base_axes`]: ProximityAnimator::set_base_axes
#[derive(Debug, Clone)]
pub struct ProximityAnimator {
    ranges: AxisRangeTable,
    config: AnimatorConfig,
    base: AxisSet,
    current: AxisSet,
    target: AxisSet,
    color_base: Rgb,
    color_current: Rgb,
}

impl ProximityAnimator {
    pub fn new(base: &AxisSet, ranges: &AxisRangeTable, config: AnimatorConfig) -> Self {
        Self {
            ranges: ranges.clone(),
            config,
            base: base.clone(),
            current: base.clone(),
            target: base.clone(),
            color_base: config.color_base,
            color_current: config.color_base,
        }
    }

    /// Re-baselines after a fit pass settles. `current` and `target` snap
    /// to the new resting points immediately so no jump is deferred to the
    /// next frame, and the resting color is re-sampled from the host.
    pub fn set_base_axes(&mut self, base: &AxisSet, resting_color: Rgb) {
        self.base = base.clone();
        self.current = base.clone();
        self.target = base.clone();
        self.color_base = resting_color;
        self.color_current = resting_color;
    }

    /// One frame: derive influence from pointer distance to `center`,
    /// retarget every animated axis, and smooth toward the targets.
    pub fn update(&mut self, pointer: &PointerState, center: (f32, f32)) {
        let influence = self.influence(pointer, center);

        let mut target = AxisSet::new();
        for (tag, motion) in ANIMATED {
            let Some(base) = self.base.get(tag) else {
                continue;
            };
            let Some(range) = self.ranges.get(tag) else {
                // No declared range, nothing to interpolate toward.
                target.insert(tag, base);
                continue;
            };
            let value = match motion {
                Motion::Inverted => (base - (base - range.min) * influence).min(base),
                Motion::Normal => (base + (range.max - base) * influence).max(base),
            };
            target.insert(tag, value);
        }
        // Width and any remaining axes are copied verbatim from base.
        for (tag, value) in self.base.iter() {
            if !target.contains(tag) {
                target.insert(tag, value);
            }
        }
        self.target = target;

        let lerp = self.config.lerp_factor;
        let mut next = AxisSet::new();
        for (tag, tgt) in self.target.iter() {
            let animated = ANIMATED.iter().any(|(animated_tag, _)| *animated_tag == tag);
            let value = if animated {
                let cur = self.current.get(tag).unwrap_or(tgt);
                cur + (tgt - cur) * lerp
            } else {
                tgt
            };
            next.insert(tag, value);
        }
        self.current = next;

        let color_target = self.color_base.lerp(self.config.color_hover, influence);
        self.color_current.approach(color_target, lerp);
    }

    fn influence(&self, pointer: &PointerState, center: (f32, f32)) -> f32 {
        let Some((x, y)) = pointer.position() else {
            return 0.0;
        };
        let dx = x - center.0;
        let dy = y - center.1;
        let distance = (dx * dx + dy * dy).sqrt();
        (1.0 - distance / self.config.radius).clamp(0.0, 1.0)
    }

    pub fn base_axes(&self) -> &AxisSet {
        &self.base
    }

    pub fn current_axes(&self) -> &AxisSet {
        &self.current
    }

    pub fn current_color(&self) -> Rgb {
        self.color_current
    }
}
