//! Command-line front end of `tilemap2anim`.
//!
//! # Usage
//!
//! ```bash
//! # Convert a map, writing level.gif next to it
//! tilemap2anim -i maps/level.tmx
//!
//! # Start from a tileset image and pick the output path
//! tilemap2anim -i tilesets/water.png -o out/water.gif
//!
//! # Static maps: show the single frame for 250 ms
//! tilemap2anim -i maps/level.tmx --frame-delay 250
//! ```

use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tilemap2anim::prelude::{ConvertOptions, ConvertReport, DEFAULT_FRAME_DELAY_MS, convert};

#[derive(Parser, Debug)]
#[command(name = "tilemap2anim")]
#[command(author = "tilemap2anim project")]
#[command(version)]
#[command(about = "Convert an animated Tiled map into a looping GIF", long_about = None)]
struct Cli {
	/// TMX map, TSX tileset or tileset image (.png, .jpg, .jpeg, .bmp, .gif)
	#[arg(short, long, value_name = "PATH", value_parser = existing_path)]
	input: PathBuf,

	/// Output file, defaults to the input path with a .gif extension
	#[arg(short, long, value_name = "PATH")]
	output: Option<PathBuf>,

	/// Frame delay in milliseconds for maps without animated tiles
	#[arg(
		short = 'd',
		long,
		value_name = "MS",
		env = "TILEMAP2ANIM_FRAME_DELAY",
		default_value_t = DEFAULT_FRAME_DELAY_MS,
		value_parser = clap::value_parser!(u32).range(1..)
	)]
	frame_delay: u32,

	/// Frames per second, takes precedence over --frame-delay
	#[arg(short, long, value_name = "FPS")]
	fps: Option<f64>,

	/// Output format
	#[arg(long, value_enum, default_value_t = OutputFormat::Gif)]
	format: OutputFormat,

	/// Log every pipeline step
	#[arg(short, long, default_value_t = false)]
	verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
	/// Animated GIF
	Gif,
}

impl Cli {
	// --fps wins, so an exported TILEMAP2ANIM_FRAME_DELAY never blocks it.
	fn frame_delay_ms(&self) -> Result<u32> {
		match self.fps {
			Some(fps) => fps_to_delay(fps),
			None => Ok(self.frame_delay),
		}
	}

	fn options(&self) -> Result<ConvertOptions> {
		let mut options = ConvertOptions::new(&self.input).with_frame_delay(self.frame_delay_ms()?);
		if let Some(output) = &self.output {
			options = options.with_output(output);
		}
		Ok(options)
	}
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	let level = if cli.verbose { "trace" } else { "info" };
	env_logger::init_from_env(env_logger::Env::default().default_filter_or(level));

	match run(&cli) {
		Ok(report) => {
			log::info!(
				"Wrote {} frames ({} ms loop) from {} to {}",
				report.frame_count,
				report.period_ms,
				report.tilemap.display(),
				report.output.display()
			);
			ExitCode::SUCCESS
		}
		Err(e) => {
			log::error!("{e:#}");
			ExitCode::FAILURE
		}
	}
}

fn run(cli: &Cli) -> Result<ConvertReport> {
	log::debug!("Output format: {:?}", cli.format);
	let options = cli.options()?;
	convert(&options).with_context(|| format!("Failed to convert {}", options.input.display()))
}

fn fps_to_delay(fps: f64) -> Result<u32> {
	if !fps.is_finite() || fps <= 0.0 {
		bail!("FPS must be greater than 0, got {fps}");
	}
	let delay = (1000.0 / fps).round();
	if delay < 1.0 || delay > f64::from(u32::MAX) {
		bail!("FPS {fps} gives a frame delay outside 1..={} ms", u32::MAX);
	}
	Ok(delay as u32)
}

fn existing_path(value: &str) -> Result<PathBuf, String> {
	let path = PathBuf::from(value);
	if path.exists() {
		Ok(path)
	} else {
		Err(format!("{value} does not exist"))
	}
}
