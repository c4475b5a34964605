//! CLI definitions and command dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "liquidtype")]
#[command(about = "Fit text into a pixel budget by solving variable-font axes")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, clap::Args)]
pub struct FitArgs {
    /// Variable TTF file
    pub font: PathBuf,

    /// Text to fit
    pub text: String,

    /// Container width in pixels
    #[arg(long, default_value_t = 300)]
    pub width: i32,

    /// Container height in pixels
    #[arg(long, default_value_t = 120)]
    pub height: i32,

    /// Font size in pixels
    #[arg(long, default_value_t = 48.0)]
    pub font_size: f32,

    /// Relevance in 0..1 driving weight and grade
    #[arg(short, long, default_value_t = 0.5)]
    pub relevance: f32,

    /// Axis values held fixed, as TAG=VALUE (e.g. slnt=-5)
    #[arg(long = "lock")]
    pub locked: Vec<String>,

    /// Let font size join the solved variables
    #[arg(long)]
    pub font_size_flexible: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a font's variable axes
    Axes {
        /// Font file to inspect
        font: PathBuf,
    },
    /// Run one fit pass and print the settled axes
    Fit {
        #[command(flatten)]
        args: FitArgs,

        /// Print only the settled variation settings
        #[arg(short, long)]
        quiet: bool,
    },
    /// Fit the same text across a range of container widths
    Sweep {
        #[command(flatten)]
        args: FitArgs,

        #[arg(long, default_value_t = 100)]
        from: i32,

        #[arg(long, default_value_t = 800)]
        to: i32,

        #[arg(long, default_value_t = 50)]
        step: i32,
    },
    /// Simulate pointer hover frames over the fitted text
    Hover {
        #[command(flatten)]
        args: FitArgs,

        /// Frames to simulate
        #[arg(long, default_value_t = 60)]
        frames: u32,
    },
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Axes { font } => crate::axes::run(&font),
            Commands::Fit { args, quiet } => crate::fit::run(&args, quiet),
            Commands::Sweep { args, from, to, step } => crate::sweep::run(&args, from, to, step),
            Commands::Hover { args, frames } => crate::hover::run(&args, frames),
        }
    }
}
