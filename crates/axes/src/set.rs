//! Axis-value snapshots.

use std::fmt;

use font_types::Tag;
use indexmap::IndexMap;

use crate::{AxisRangeTable, tags};

/// A mapping from axis tag to value.
///
/// Treated as an immutable snapshot by everything downstream of the fit
/// pass: a "current axes" value is replaced wholesale rather than mutated
/// field by field, so structural equality is a reliable change check.
/// Equality ignores insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisSet {
    values: IndexMap<Tag, f32>,
}

impl AxisSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert for snapshot construction.
    pub fn with(mut self, tag: Tag, value: f32) -> Self {
        self.values.insert(tag, value);
        self
    }

    pub fn insert(&mut self, tag: Tag, value: f32) {
        self.values.insert(tag, value);
    }

    pub fn get(&self, tag: Tag) -> Option<f32> {
        self.values.get(&tag).copied()
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.values.contains_key(&tag)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tag, f32)> + '_ {
        self.values.iter().map(|(tag, value)| (*tag, *value))
    }

    /// New snapshot with every value from `overrides` replacing the
    /// corresponding value here.
    pub fn merged(&self, overrides: &AxisSet) -> AxisSet {
        let mut out = self.clone();
        for (tag, value) in overrides.iter() {
            out.values.insert(tag, value);
        }
        out
    }

    /// New snapshot with every value clamped to its declared range.
    /// Tags absent from the table pass through unchanged.
    pub fn clamped_to(&self, ranges: &AxisRangeTable) -> AxisSet {
        let mut out = AxisSet::new();
        for (tag, value) in self.iter() {
            let value = match ranges.get(tag) {
                Some(range) => range.clamp(value),
                None => value,
            };
            out.values.insert(tag, value);
        }
        out
    }

    /// New snapshot with every value rounded to the nearest integer, as
    /// settled fit results are stored.
    pub fn rounded(&self) -> AxisSet {
        let mut out = AxisSet::new();
        for (tag, value) in self.iter() {
            out.values.insert(tag, value.round());
        }
        out
    }

    /// Canonical `font-variation-settings` encoding: known tags in
    /// canonical order, then any remaining tags in insertion order, values
    /// rounded to integers. Empty sets encode as `normal`.
    pub fn variation_settings(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(self.values.len());
        for tag in tags::CANONICAL_ORDER {
            if let Some(value) = self.get(tag) {
                parts.push(format!("\"{tag}\" {}", value.round() as i64));
            }
        }
        for (tag, value) in self.iter() {
            if !tags::CANONICAL_ORDER.contains(&tag) {
                parts.push(format!("\"{tag}\" {}", value.round() as i64));
            }
        }
        if parts.is_empty() { "normal".to_string() } else { parts.join(", ") }
    }
}

impl fmt::Display for AxisSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.variation_settings())
    }
}

impl FromIterator<(Tag, f32)> for AxisSet {
    fn from_iter<I: IntoIterator<Item = (Tag, f32)>>(iter: I) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}
