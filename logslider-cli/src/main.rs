//! LogSlider CLI: slider math and scripted drags from the command line.
//!
//! Commands:
//! - `percent`: map a domain value to a track percent
//! - `value`: map a track percent to a domain value
//! - `quantize`: snap a raw value onto a step grid
//! - `simulate`: run one drag gesture against a TOML slider config

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use logslider_core::config::validate_domain;
use logslider_core::{
    quantize, GestureHost, HandleId, InputFamily, PointerEvent, ScaleMode, Slider, SliderConfig,
    SliderSnapshot, TrackBounds, MAX_PRECISION,
};

const LOG_ENV: &str = "LOGSLIDER_LOG";

#[derive(Parser)]
#[command(
    name = "logslider",
    about = "LogSlider CLI - linear and logarithmic slider math"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the track percent (0–100) for a domain value.
    Percent {
        #[arg(long)]
        floor: f64,

        #[arg(long)]
        ceiling: f64,

        /// Use the logarithmic transfer function.
        #[arg(long, default_value_t = false)]
        log: bool,

        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Print the domain value for a track percent.
    Value {
        #[arg(long)]
        floor: f64,

        #[arg(long)]
        ceiling: f64,

        /// Use the logarithmic transfer function.
        #[arg(long, default_value_t = false)]
        log: bool,

        #[arg(allow_negative_numbers = true)]
        percent: f64,
    },
    /// Snap a value onto the grid `align_floor + k * step`, then round.
    Quantize {
        /// Decimal digits kept after snapping (at most 100).
        #[arg(long, default_value_t = 0)]
        precision: u32,

        #[arg(long, default_value_t = 1.0)]
        step: f64,

        /// Grid origin.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        align_floor: f64,

        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Drag one handle through pixel positions, printing a JSON snapshot per move.
    Simulate {
        /// Path to a TOML slider config.
        #[arg(long)]
        config: PathBuf,

        /// Track width in pixels.
        #[arg(long)]
        width: f64,

        /// Track left edge in pixels.
        #[arg(long, default_value_t = 0.0)]
        left: f64,

        /// Handle grabbed at the start of the gesture.
        #[arg(long, value_enum, default_value_t = HandleArg::Low)]
        handle: HandleArg,

        /// Pointer x positions, one per move.
        #[arg(required = true, allow_negative_numbers = true)]
        xs: Vec<f64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum HandleArg {
    Low,
    High,
}

impl From<HandleArg> for HandleId {
    fn from(arg: HandleArg) -> Self {
        match arg {
            HandleArg::Low => HandleId::Low,
            HandleArg::High => HandleId::High,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Percent {
            floor,
            ceiling,
            log,
            value,
        } => {
            let scale = scale_for(log);
            validate_domain(floor, ceiling, scale)?;
            println!("{}", scale.percent_from_value(value, floor, ceiling));
            Ok(())
        }
        Commands::Value {
            floor,
            ceiling,
            log,
            percent,
        } => {
            let scale = scale_for(log);
            validate_domain(floor, ceiling, scale)?;
            println!("{}", scale.value_from_percent(percent, floor, ceiling));
            Ok(())
        }
        Commands::Quantize {
            precision,
            step,
            align_floor,
            value,
        } => {
            if !(step.is_finite() && step > 0.0) {
                bail!("--step must be a positive number, got {step}");
            }
            if precision > MAX_PRECISION {
                bail!("--precision must be at most {MAX_PRECISION}, got {precision}");
            }
            println!("{}", quantize(value, precision, step, align_floor));
            Ok(())
        }
        Commands::Simulate {
            config,
            width,
            left,
            handle,
            xs,
        } => {
            let config = SliderConfig::load(&config)?;
            for snapshot in simulate(config, TrackBounds::new(left, width), handle.into(), &xs)? {
                println!("{}", serde_json::to_string(&snapshot)?);
            }
            Ok(())
        }
    }
}

fn scale_for(log: bool) -> ScaleMode {
    if log {
        ScaleMode::Logarithmic
    } else {
        ScaleMode::Linear
    }
}

/// Fixed-geometry host for scripted drags.
#[derive(Debug)]
struct PixelTrack {
    bounds: TrackBounds,
}

impl GestureHost for PixelTrack {
    fn track_bounds(&self) -> TrackBounds {
        self.bounds
    }

    fn bind_gesture(&mut self, family: InputFamily) {
        tracing::trace!(?family, "bind");
    }

    fn unbind_gesture(&mut self, family: InputFamily) {
        tracing::trace!(?family, "unbind");
    }

    fn set_handle_active(&mut self, handle: HandleId, active: bool) {
        tracing::trace!(?handle, active, "handle mark");
    }
}

/// Run one mouse gesture through `xs` and collect the snapshot after each move.
fn simulate(
    config: SliderConfig,
    bounds: TrackBounds,
    handle: HandleId,
    xs: &[f64],
) -> Result<Vec<SliderSnapshot>> {
    if !(bounds.width.is_finite() && bounds.width > 0.0) {
        bail!("--width must be a positive number, got {}", bounds.width);
    }
    let mut slider = Slider::new(config)?;
    let mut host = PixelTrack { bounds };

    let first = xs.first().copied().unwrap_or(bounds.left);
    slider.gesture_start(handle, &PointerEvent::mouse(first), &mut host);

    let mut snapshots = Vec::with_capacity(xs.len());
    for &x in xs {
        slider.gesture_move(&PointerEvent::mouse(x), &mut host);
        snapshots.push(slider.snapshot());
    }
    slider.gesture_end(&mut host);
    Ok(snapshots)
}
