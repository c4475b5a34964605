//! Fit the same text across a range of container widths.

use anyhow::Result;
use liquidtype_engine::FitOutcome;
use rayon::prelude::*;

use crate::{cli::FitArgs, fit};

pub fn run(args: &FitArgs, from: i32, to: i32, step: i32) -> Result<()> {
    let widths = widths(from, to, step);

    // Each width is an independent fit pass.
    let rows: Vec<(i32, FitOutcome)> = widths
        .par_iter()
        .map(|&width| -> Result<(i32, FitOutcome)> {
            let mut fit = fit::build(args, width, None)?;
            Ok((width, fit.fit()))
        })
        .collect::<Result<Vec<_>>>()?;

    println!("{:>7}  {:>9}  axes", "width", "rendered");
    for (width, outcome) in rows {
        match outcome {
            FitOutcome::Settled(report) => {
                println!("{width:>7}  {:>9.1}  {}", report.rendered_width_px, report.axes);
            }
            other => println!("{width:>7}  {other:?}"),
        }
    }
    Ok(())
}

fn widths(from: i32, to: i32, step: i32) -> Vec<i32> {
    let step = step.max(1);
    (from..=to).step_by(step as usize).collect()
}
