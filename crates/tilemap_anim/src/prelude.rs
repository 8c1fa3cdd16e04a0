//! Prelude module for `tilemap_anim`.
//!
//! Re-exports the pipeline entry points together with the document model prelude.
//!
//! # Examples
//!
//! ```no_run
//! use tilemap_anim::prelude::*;
//!
//! # fn main() -> Result<(), AnimError> {
//! let report = convert(&ConvertOptions::new("assets/tiles.png").with_frame_delay(80))?;
//! assert!(report.frame_count > 0);
//! # Ok(())
//! # }
//! ```

#[doc(inline)]
pub use crate::{
	AnimError,

	// Constants
	constants::{DEFAULT_FRAME_DELAY_MS, MIN_FRAME_DELAY_MS},

	// Atlas
	atlas::{apply_flips, apply_transparency, crop_tile, load_atlas},

	// Tileset registry
	tilesets::{TilesetEntry, Tilesets},

	// Timeline
	timeline::{
		FrameSequence, FrameSpan, LoopPeriod, Scene, change_events, frame_spans, generate_animation,
		global_period, render_frame, select_frame, tile_period,
	},

	// Output
	gif::save_gif,

	// Workflow
	workflow::{ConvertOptions, ConvertReport, convert, load_tilesets, resolve_tilemap},
};

#[doc(inline)]
pub use tilemap_types::prelude::*;
