//! Simulated hover: sweep a pointer across the fitted text and print the
//! per-character weights as they liquefy.

use std::{cell::RefCell, rc::Rc};

use anyhow::{Result, bail};
use liquidtype_animator::{AnimatorConfig, FrameScheduler};
use liquidtype_axes::tags;
use liquidtype_engine::FitOutcome;

use crate::{cli::FitArgs, fit};

pub fn run(args: &FitArgs, frames: u32) -> Result<()> {
    let mut instance = fit::build(args, args.width, Some(AnimatorConfig::default()))?;

    let outcome = instance.fit();
    let FitOutcome::Settled(report) = outcome else {
        bail!("fit skipped: {outcome:?}");
    };
    println!("Settled: {}", report.axes);

    let text_width = report.rendered_width_px;
    let instance = Rc::new(RefCell::new(instance));
    let mut scheduler = FrameScheduler::new();
    scheduler.register(instance.clone());

    for frame in 0..frames.max(1) {
        let t = frame as f32 / frames.max(1) as f32;
        scheduler.pointer_moved(t * text_width, args.font_size / 2.0);
        scheduler.tick();

        if frame % 10 == 0 {
            let weights: String = instance
                .borrow()
                .cell_styles()
                .iter()
                .map(|style| {
                    format!("{}:{:<4.0}", style.ch, style.axes.get(tags::WGHT).unwrap_or(0.0))
                })
                .collect::<Vec<_>>()
                .join(" ");
            println!("frame {frame:>3}  {weights}");
        }
    }
    scheduler.pointer_left();
    Ok(())
}
