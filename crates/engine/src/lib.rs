//! # liquidtype-engine
//!
//! The fitting core: given a text, a container width and a relevance
//! scalar, converge on variable-font axis values whose rendered width
//! fills the container without overflowing it, using as few measurements
//! as possible.
//!
//! A fit pass runs `Measuring -> Correcting -> Settled`: the solver
//! searches against the cheap continuous-run measurement, the correction
//! pass verifies against the authoritative per-cell widths, and the
//! settled snapshot becomes the baseline every proximity animator rests
//! on.
//!
//! ```no_run
//! use liquidtype_engine::{FitOptions, FitText, FixedViewport};
//! use liquidtype_measure::VarFont;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let font = VarFont::load("display.ttf")?;
//! let ranges = font.axes();
//! let viewport = Box::new(FixedViewport { width: 300, height: 120 });
//! let mut fit = FitText::new(font, ranges, "Hello World", 48.0, viewport, FitOptions::default())?;
//! let outcome = fit.fit();
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

mod controller;
mod debounce;
mod error;
mod host;
mod options;
mod solver;
mod target;

pub use controller::{CellStyle, FitOutcome, FitPhase, FitReport, FitText, SkipReason};
pub use debounce::ResizeDebouncer;
pub use error::{Error, Result};
pub use host::{FixedViewport, LayoutProvider, SharedViewport, StyleSink};
pub use options::FitOptions;
pub use solver::{AxisSolver, SolverTuning};
pub use target::{FitTarget, FitUpdate};
