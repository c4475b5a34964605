//! One headless fit pass.

use anyhow::{Context, Result, bail};
use liquidtype_animator::AnimatorConfig;
use liquidtype_axes::{AxisSet, Tag};
use liquidtype_engine::{FitOptions, FitOutcome, FitText, FixedViewport};
use liquidtype_measure::VarFont;
use log::debug;

use crate::cli::FitArgs;

/// Builds a fit instance for one container width.
pub fn build(
    args: &FitArgs,
    width: i32,
    animation: Option<AnimatorConfig>,
) -> Result<FitText<VarFont>> {
    let font = VarFont::load(&args.font)
        .with_context(|| format!("Failed to load font: {}", args.font.display()))?;
    let ranges = font.axes();
    debug!("{} axes in {}", ranges.len(), args.font.display());

    let options = FitOptions {
        relevance: args.relevance,
        locked_axes: parse_locked(&args.locked)?,
        font_size_flexible: args.font_size_flexible,
        animation,
        ..FitOptions::default()
    };

    let viewport = Box::new(FixedViewport { width, height: args.height });
    FitText::new(font, ranges, &args.text, args.font_size, viewport, options)
        .context("Failed to construct fit instance")
}

pub fn run(args: &FitArgs, quiet: bool) -> Result<()> {
    let mut fit = build(args, args.width, None)?;
    match fit.fit() {
        FitOutcome::Settled(report) => {
            if quiet {
                println!("{}", report.axes);
                return Ok(());
            }
            println!("Settled: {}", report.axes);
            println!("  font-size: {:.0} px", report.font_size_px);
            println!("  container: {:.0} px", report.container_width_px);
            println!(
                "  rendered:  {:.1} px (continuous {:.1} px)",
                report.rendered_width_px, report.synthetic_width_px,
            );
            println!("  correction steps: {}", report.correction_steps);
            if report.axes_maximized {
                println!("  axes maximized; surplus space is the host's to distribute");
            }
        }
        FitOutcome::Unchanged => println!("Nothing to do"),
        FitOutcome::Skipped(reason) => bail!("fit skipped: {reason:?}"),
    }
    Ok(())
}

fn parse_locked(specs: &[String]) -> Result<AxisSet> {
    let mut locked = AxisSet::new();
    for spec in specs {
        let (tag, value) = parse_axis_spec(spec)?;
        locked.insert(tag, value);
    }
    Ok(locked)
}

fn parse_axis_spec(s: &str) -> Result<(Tag, f32)> {
    let (tag, value) = s
        .split_once('=')
        .with_context(|| format!("expected TAG=VALUE: {s}"))?;

    if tag.len() != 4 {
        bail!("axis tag must be 4 characters: {tag}");
    }
    let tag = Tag::new_checked(tag.as_bytes())
        .with_context(|| format!("invalid axis tag: {tag}"))?;
    let value: f32 = value
        .parse()
        .with_context(|| format!("invalid value: {value}"))?;

    Ok((tag, value))
}
