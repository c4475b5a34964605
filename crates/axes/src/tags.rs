//! Registered and custom axis tags used by the fitting engine.

use font_types::Tag;

/// Weight.
pub const WGHT: Tag = Tag::new(b"wght");
/// Width.
pub const WDTH: Tag = Tag::new(b"wdth");
/// Grade (custom axis).
pub const GRAD: Tag = Tag::new(b"GRAD");
/// Slant.
pub const SLNT: Tag = Tag::new(b"slnt");
/// Roundness (custom axis).
pub const ROND: Tag = Tag::new(b"ROND");
/// Optical size.
pub const OPSZ: Tag = Tag::new(b"opsz");

/// Canonical encoding order for variation settings. Rendering engines can be
/// sensitive to the order tags appear in, so every encoding emits known tags
/// in this order and unknown tags after them.
pub const CANONICAL_ORDER: [Tag; 6] = [WGHT, WDTH, GRAD, SLNT, ROND, OPSZ];
