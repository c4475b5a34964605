//! # liquidtype-axes
//!
//! Data model for continuous variable-font axes: per-axis ranges, the range
//! table describing a font's design space, and immutable axis-value
//! snapshots with a canonical `font-variation-settings` encoding.
//!
//! ## Example
//!
//! ```
//! use liquidtype_axes::{AxisRangeTable, AxisSet, tags};
//!
//! let ranges = AxisRangeTable::default();
//! let axes = AxisSet::new()
//!     .with(tags::WGHT, 700.0)
//!     .with(tags::WDTH, 110.0);
//!
//! let clamped = axes.clamped_to(&ranges);
//! assert_eq!(clamped.variation_settings(), r#""wght" 700, "wdth" 110"#);
//! ```

mod range;
mod set;
pub mod tags;

pub use font_types::Tag;
pub use range::{AxisRange, AxisRangeTable};
pub use set::AxisSet;
