//! Variable-axis introspection.

use std::path::Path;

use anyhow::{Context, Result};
use liquidtype_measure::VarFont;

pub fn run(path: &Path) -> Result<()> {
    let font = VarFont::load(path)
        .with_context(|| format!("Failed to load font: {}", path.display()))?;

    let axes = font.axes();
    if axes.is_empty() {
        println!("Not a variable font");
        return Ok(());
    }

    println!("Variable font axes:");
    for (tag, range) in axes.iter() {
        println!(
            "  {tag:4}  {:6.0} .. {:6.0} (default: {:6.0})",
            range.min, range.max, range.default,
        );
    }
    Ok(())
}
