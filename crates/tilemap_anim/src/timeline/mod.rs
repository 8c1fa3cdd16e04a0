//! Animation timeline synthesis.
//!
//! Every animated tile cycles on its own period. The whole map therefore
//! repeats after the least common multiple of all those periods, the global
//! period. Within one global period the picture only changes when some tile
//! used on the map crosses a frame boundary, so one composited frame is rendered
//! per interval between consecutive change instants.
//!
//! ```text
//! tile A (100 + 200 ms):  |A1 |A2     |A1 |A2     |A1 |A2     |
//! tile B (450 ms, 2x):    |B1          |B2            |
//!                         0   100     300 400 450     600 700     900
//! events:                 0, 100, 300, 400, 450, 600, 700, 900
//! frames:                 [0,100) [100,300) [300,400) [400,450) ...
//! ```
//!
//! # Examples
//!
//! ```
//! use image::RgbaImage;
//! use tilemap_anim::{tilesets::{TilesetEntry, Tilesets}, timeline::{Scene, generate_animation}};
//! use tilemap_types::{tmx::{LayerData, Tilemap}, tsx::{AnimationFrame, Tileset}};
//!
//! # fn main() -> Result<(), tilemap_anim::AnimError> {
//! let mut tileset = Tileset::new("water", 8, 8, 2);
//! tileset.set_animation(0, vec![AnimationFrame::new(0, 100), AnimationFrame::new(1, 200)]);
//! let tilesets = Tilesets::new(vec![TilesetEntry::new(1, tileset, RgbaImage::new(16, 8))]);
//!
//! let mut map = Tilemap::new(1, 1, 8, 8);
//! map.push_layer(LayerData::from_gids("ground", &[1]));
//! let layers = map.decode_layers()?;
//!
//! let sequence = generate_animation(&Scene::new(&map, &tilesets, &layers), 100)?;
//! assert_eq!(sequence.delays, vec![100, 200]);
//! # Ok(())
//! # }
//! ```

mod render;

use std::collections::{BTreeSet, HashSet};

use image::{Rgba, RgbaImage};
use rayon::prelude::*;
use tilemap_types::{
	tmx::{Layer, Tilemap},
	tsx::{TileKind, Tileset},
};

use crate::{AnimError, color::parse_hex_color, constants::MIN_FRAME_DELAY_MS, tilesets::Tilesets};

pub use self::render::render_frame;

/// Read-only inputs shared by every frame of one animation.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
	tilemap: &'a Tilemap,
	tilesets: &'a Tilesets,
	layers: &'a [Layer],
	background: Option<Rgba<u8>>,
}

impl<'a> Scene<'a> {
	/// Bundles a map, its loaded tilesets and its decoded layers.
	///
	/// The map background color is parsed once here. An invalid color is logged
	/// and the canvas stays transparent.
	pub fn new(tilemap: &'a Tilemap, tilesets: &'a Tilesets, layers: &'a [Layer]) -> Self {
		let background = tilemap.background_color().and_then(|color| match parse_hex_color(color) {
			Ok(rgba) => Some(rgba),
			Err(e) => {
				log::warn!("Ignoring map background color: {e}");
				None
			}
		});
		Self {
			tilemap,
			tilesets,
			layers,
			background,
		}
	}

	/// Map being rendered.
	pub fn tilemap(&self) -> &'a Tilemap {
		self.tilemap
	}

	/// Loaded tilesets.
	pub fn tilesets(&self) -> &'a Tilesets {
		self.tilesets
	}

	/// Decoded layers, bottom first.
	pub fn layers(&self) -> &'a [Layer] {
		self.layers
	}

	/// Parsed background color, if set and valid.
	pub fn background(&self) -> Option<Rgba<u8>> {
		self.background
	}
}

/// Loop length of a whole map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPeriod {
	/// No tile has an animation with a positive period
	Static,
	/// Least common multiple of every positive tile period, in milliseconds
	Animated(u64),
}

impl LoopPeriod {
	/// Loop length in milliseconds, `default_ms` for a static map.
	pub fn duration_ms(self, default_ms: u32) -> u64 {
		match self {
			Self::Static => u64::from(default_ms),
			Self::Animated(period) => period,
		}
	}
}

/// One output frame: the instant it shows and how long it stays on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSpan {
	/// Elapsed time at which the frame is rendered, in milliseconds
	pub start: u64,
	/// Display time in milliseconds, never below [`MIN_FRAME_DELAY_MS`]
	pub delay_ms: u32,
}

/// Rendered frames with their index-aligned delays.
#[derive(Debug, Clone)]
pub struct FrameSequence {
	/// Composited frames in display order
	pub frames: Vec<RgbaImage>,
	/// Delay of each frame in milliseconds, all positive
	pub delays: Vec<u32>,
	/// Loop length in milliseconds
	pub period_ms: u64,
}

impl FrameSequence {
	/// Number of frames.
	pub fn len(&self) -> usize {
		self.frames.len()
	}

	/// Returns `true` if there are no frames.
	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}
}

/// Cycle length of a local tile, `None` for static tiles.
pub fn tile_period(tileset: &Tileset, local_id: u32) -> Option<u64> {
	tileset.tile_kind(local_id).period()
}

/// Local tile id to draw for `local_id` after `elapsed_ms`.
///
/// Static tiles draw themselves. Animated tiles pick the frame whose
/// closed-open interval contains `elapsed_ms mod period`.
pub fn select_frame(tileset: &Tileset, local_id: u32, elapsed_ms: u64) -> u32 {
	tileset.tile_kind(local_id).tile_at(local_id, elapsed_ms)
}

/// Least common multiple of every positive animation period across all tilesets.
///
/// Animations defined in a tileset count even if the map never places them.
///
/// # Errors
///
/// Returns [`AnimError::PeriodOverflow`] if the combined period exceeds `u64`.
///
/// # Examples
///
/// ```
/// use image::RgbaImage;
/// use tilemap_anim::{tilesets::{TilesetEntry, Tilesets}, timeline::{LoopPeriod, global_period}};
/// use tilemap_types::tsx::{AnimationFrame, Tileset};
///
/// let mut tileset = Tileset::new("fx", 8, 8, 4);
/// tileset.set_animation(0, vec![AnimationFrame::new(0, 300)]);
/// tileset.set_animation(1, vec![AnimationFrame::new(1, 450)]);
/// let tilesets = Tilesets::new(vec![TilesetEntry::new(1, tileset, RgbaImage::new(32, 8))]);
///
/// assert_eq!(global_period(&tilesets).unwrap(), LoopPeriod::Animated(900));
/// assert_eq!(global_period(&Tilesets::default()).unwrap(), LoopPeriod::Static);
/// ```
pub fn global_period(tilesets: &Tilesets) -> Result<LoopPeriod, AnimError> {
	let periods = tilesets
		.iter()
		.flat_map(|entry| entry.tileset().animations())
		.map(|(_, animation)| animation.period())
		.filter(|&period| period > 0);

	let mut accumulated: Option<u64> = None;
	for period in periods {
		accumulated = Some(match accumulated {
			None => period,
			Some(acc) => lcm(acc, period).ok_or(AnimError::PeriodOverflow {
				period,
				accumulated: acc,
			})?,
		});
	}

	Ok(accumulated.map_or(LoopPeriod::Static, LoopPeriod::Animated))
}

/// Every instant in `[0, global_period]` at which some placed animated tile changes.
///
/// Each distinct animation used on the map is enumerated once, cycle by cycle,
/// adding the end of every non-empty frame. Zero-length frames add nothing.
/// The result always contains `0` and `global_period`.
pub fn change_events(scene: &Scene<'_>, global_period: u64) -> BTreeSet<u64> {
	let mut events = BTreeSet::from([0, global_period]);
	let mut visited = HashSet::new();
	let mut unowned = HashSet::new();

	for layer in scene.layers() {
		for (_, gid) in layer.occupied() {
			let actual = gid.actual();
			let Some((entry, local_id)) = scene.tilesets().owner(actual) else {
				if unowned.insert(actual) {
					log::warn!("Layer '{}': GID {actual} belongs to no tileset, skipped", layer.name());
				}
				continue;
			};
			if !visited.insert((entry.first_gid(), local_id)) {
				continue;
			}
			let TileKind::Animated(animation) = entry.tileset().tile_kind(local_id) else {
				continue;
			};
			let period = animation.period();
			if period == 0 {
				continue;
			}

			let mut cycle_start = 0u64;
			while cycle_start < global_period {
				events.extend(
					animation
						.boundaries()
						.map(|boundary| cycle_start + boundary)
						.filter(|&t| t <= global_period),
				);
				cycle_start += period;
			}
			log::trace!(
				"Tile {local_id} of '{}' cycles every {period} ms",
				entry.tileset().name()
			);
		}
	}

	events
}

/// Turns sorted change instants into frames, one per consecutive pair.
///
/// Delays shorter than [`MIN_FRAME_DELAY_MS`] are raised to it.
pub fn frame_spans(events: &BTreeSet<u64>) -> Vec<FrameSpan> {
	events
		.iter()
		.zip(events.iter().skip(1))
		.map(|(&start, &end)| FrameSpan {
			start,
			delay_ms: clamp_delay(end - start),
		})
		.collect()
}

/// Builds the complete looping frame sequence for a scene.
///
/// A static map yields one frame with `default_delay_ms`. Otherwise one frame is
/// rendered per change interval, in parallel, in event order.
///
/// # Errors
///
/// Returns an error if the period overflows or a frame cannot be rendered.
pub fn generate_animation(scene: &Scene<'_>, default_delay_ms: u32) -> Result<FrameSequence, AnimError> {
	let period = match global_period(scene.tilesets())? {
		LoopPeriod::Static => {
			log::info!("No animated tiles, rendering a single frame");
			let frame = render_frame(scene, 0)?;
			return Ok(FrameSequence {
				frames: vec![frame],
				delays: vec![default_delay_ms],
				period_ms: u64::from(default_delay_ms),
			});
		}
		LoopPeriod::Animated(period) => period,
	};

	let events = change_events(scene, period);
	let mut spans = frame_spans(&events);
	if spans.is_empty() {
		spans.push(FrameSpan {
			start: 0,
			delay_ms: clamp_delay(period),
		});
	}
	log::info!("Global period {period} ms, {} frames", spans.len());

	let frames = spans
		.par_iter()
		.map(|span| {
			log::debug!("Rendering frame at {} ms ({} ms)", span.start, span.delay_ms);
			render_frame(scene, span.start)
		})
		.collect::<Result<Vec<_>, _>>()?;

	Ok(FrameSequence {
		frames,
		delays: spans.iter().map(|span| span.delay_ms).collect(),
		period_ms: period,
	})
}

fn clamp_delay(duration: u64) -> u32 {
	u32::try_from(duration).unwrap_or(u32::MAX).max(MIN_FRAME_DELAY_MS)
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
	while b != 0 {
		(a, b) = (b, a % b);
	}
	a
}

fn lcm(a: u64, b: u64) -> Option<u64> {
	if a == 0 || b == 0 {
		return Some(a.max(b));
	}
	(a / gcd(a, b)).checked_mul(b)
}
