//! Axis ranges and the per-font range table.

use font_types::Tag;
use indexmap::IndexMap;

use crate::tags;

/// Legal domain of one variable axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

impl AxisRange {
    pub const fn new(min: f32, max: f32, default: f32) -> Self {
        Self { min, max, default }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Maps `t` in `[0, 1]` linearly across the range, rounded to the
    /// nearest integer value. `t` outside `[0, 1]` is clamped.
    pub fn lerp(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        (self.min + (self.max - self.min) * t).round()
    }

    pub fn span(&self) -> f32 {
        self.max - self.min
    }
}

/// Tag-to-range mapping describing a design space.
///
/// Constant for the lifetime of the process once built, either from the
/// built-in defaults or from a font's own fvar table. Iteration preserves
/// insertion order, which for the default table is the canonical tag order.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisRangeTable {
    ranges: IndexMap<Tag, AxisRange>,
}

impl AxisRangeTable {
    pub fn new() -> Self {
        Self { ranges: IndexMap::new() }
    }

    pub fn insert(&mut self, tag: Tag, range: AxisRange) {
        self.ranges.insert(tag, range);
    }

    pub fn get(&self, tag: Tag) -> Option<&AxisRange> {
        self.ranges.get(&tag)
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.ranges.contains_key(&tag)
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tag, &AxisRange)> {
        self.ranges.iter().map(|(tag, range)| (*tag, range))
    }

    /// Axis values a renderer would use when nothing is specified.
    pub fn default_set(&self) -> crate::AxisSet {
        let mut set = crate::AxisSet::new();
        for (tag, range) in self.iter() {
            set.insert(tag, range.default);
        }
        set
    }
}

impl Default for AxisRangeTable {
    /// Design space of a five-axis grading/width display family.
    fn default() -> Self {
        let mut table = Self::new();
        table.insert(tags::WGHT, AxisRange::new(1.0, 1000.0, 400.0));
        table.insert(tags::WDTH, AxisRange::new(25.0, 151.0, 100.0));
        table.insert(tags::GRAD, AxisRange::new(0.0, 100.0, 0.0));
        table.insert(tags::SLNT, AxisRange::new(-10.0, 0.0, 0.0));
        table.insert(tags::ROND, AxisRange::new(0.0, 100.0, 0.0));
        table.insert(tags::OPSZ, AxisRange::new(6.0, 144.0, 14.0));
        table
    }
}
