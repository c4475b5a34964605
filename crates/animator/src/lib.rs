//! # liquidtype-animator
//!
//! Per-character pointer-proximity animation around a fit-settled baseline,
//! plus the single shared frame tick that drives every animated instance.
//!
//! The animator never touches the width axis and never pushes an inverted
//! axis above its baseline, so hover animation cannot re-introduce the
//! overflow the fit pass just eliminated.

mod animator;
mod color;
mod pointer;
mod scheduler;

pub use animator::{AnimatorConfig, ProximityAnimator};
pub use color::Rgb;
pub use pointer::PointerState;
pub use scheduler::{FrameListener, FrameScheduler, ListenerId};
