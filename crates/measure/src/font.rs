//! Variable font loading and continuous-run measurement.

use std::{fs, path::Path, sync::Arc};

use log::warn;
use skrifa::{
    FontRef, MetadataProvider,
    charmap::Charmap,
    instance::{Location, Size},
    metrics::GlyphMetrics,
};

use liquidtype_axes::{AxisRange, AxisRangeTable};

use crate::{Result, TextMeasurer, TextStyle, normalize_text};

const NBSP: char = '\u{00A0}';

/// A loaded variable font.
///
/// Cheap to clone (shared byte buffer); the table directory is re-parsed
/// per measurement, which is inexpensive and keeps the type free of
/// self-referential lifetimes.
#[derive(Debug, Clone)]
pub struct VarFont {
    data: Arc<Vec<u8>>,
}

impl VarFont {
    /// Validates and wraps raw font bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        FontRef::new(&data)?;
        Ok(Self { data: Arc::new(data) })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_bytes(fs::read(path)?)
    }

    /// The font's fvar design space. Empty for a static font.
    pub fn axes(&self) -> AxisRangeTable {
        let mut table = AxisRangeTable::new();
        let Ok(font) = FontRef::new(&self.data) else {
            return table;
        };
        for axis in font.axes().iter() {
            table.insert(
                axis.tag(),
                AxisRange::new(axis.min_value(), axis.max_value(), axis.default_value()),
            );
        }
        table
    }

    pub fn has_axes(&self) -> bool {
        !self.axes().is_empty()
    }

    fn location(font: &FontRef<'_>, style: &TextStyle<'_>) -> Location {
        font.axes().location(style.axes.iter())
    }
}

fn char_advance(charmap: &Charmap<'_>, metrics: &GlyphMetrics<'_>, ch: char) -> f32 {
    // Fonts without a no-break space glyph fall back to the plain space
    // advance, keeping normalized and raw text the same width.
    let glyph = charmap
        .map(ch)
        .or_else(|| (ch == NBSP).then(|| charmap.map(' ')).flatten());
    glyph.and_then(|gid| metrics.advance_width(gid)).unwrap_or(0.0)
}

impl TextMeasurer for VarFont {
    /// Width of the normalized string measured as one continuous run of
    /// unrounded glyph advances at the requested size and axis location.
    fn measure(&self, text: &str, style: TextStyle<'_>) -> f32 {
        if text.is_empty() || style.font_size_px <= 0.0 {
            return 0.0;
        }
        let Ok(font) = FontRef::new(&self.data) else {
            warn!("font data no longer parseable, treating measurement as inconclusive");
            return 0.0;
        };
        let location = Self::location(&font, &style);
        let metrics = font.glyph_metrics(Size::new(style.font_size_px), &location);
        let charmap = font.charmap();
        normalize_text(text)
            .chars()
            .map(|ch| char_advance(&charmap, &metrics, ch))
            .sum()
    }
}
