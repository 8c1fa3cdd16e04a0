//! Error type for animation synthesis, encoding and the conversion workflow.

use std::path::PathBuf;

use thiserror::Error;
use tilemap_types::TilemapError;

/// Errors that can occur while turning a tilemap into an animation
#[derive(Debug, Error)]
pub enum AnimError {
	/// Document loading or layer decoding failed
	#[error(transparent)]
	Tilemap(#[from] TilemapError),

	/// A tileset atlas image could not be loaded
	#[error("Failed to load tileset image {}: {source}", .path.display())]
	AtlasLoad {
		/// Image path
		path: PathBuf,
		/// Underlying image error
		#[source]
		source: image::ImageError,
	},

	/// GIF encoding failed
	#[error("Failed to encode GIF {}: {source}", .path.display())]
	Encode {
		/// Output path
		path: PathBuf,
		/// Underlying image error
		#[source]
		source: image::ImageError,
	},

	/// Output could not be written
	#[error("Failed to write {}: {source}", .path.display())]
	Write {
		/// Path being written
		path: PathBuf,
		/// Underlying I/O error
		#[source]
		source: std::io::Error,
	},

	/// Encoder called without frames
	#[error("No frames to encode")]
	EmptyFrames,

	/// Encoder called with mismatched frame and delay lists
	#[error("Delays must match the number of frames: {frames} frames, {delays} delays")]
	DelayCountMismatch {
		/// Number of frames
		frames: usize,
		/// Number of delays
		delays: usize,
	},

	/// The composited canvas would not fit in memory addressing
	#[error("Canvas of {columns}x{rows} tiles at {tile_width}x{tile_height} px is too large")]
	CanvasTooLarge {
		/// Map width in tiles
		columns: u32,
		/// Map height in tiles
		rows: u32,
		/// Cell width in pixels
		tile_width: u32,
		/// Cell height in pixels
		tile_height: u32,
	},

	/// The combined loop length does not fit in 64 bits
	#[error("Animation period overflowed while combining a {period} ms cycle into {accumulated} ms")]
	PeriodOverflow {
		/// Period being folded in
		period: u64,
		/// Least common multiple so far
		accumulated: u64,
	},

	/// Input path has no supported extension
	#[error("Unsupported input file type {}. File must end with one of: .tmx, .tsx, .png, .jpg, .jpeg, .bmp, .gif", .0.display())]
	UnsupportedInput(PathBuf),

	/// No TSX references the input image
	#[error("No TSX file found referencing the input image: {}", .0.display())]
	NoTilesetFound(PathBuf),

	/// No TMX references the tileset
	#[error("No TMX file found referencing the tileset: {}", .0.display())]
	NoTilemapFound(PathBuf),

	/// None of the map's tilesets could be loaded
	#[error("No tilesets could be loaded for {}", .0.display())]
	NoTilesetsLoaded(PathBuf),

	/// Conversion options are inconsistent
	#[error("Invalid option: {0}")]
	InvalidOption(String),

	/// A color string is not valid hexadecimal RGB/ARGB
	#[error("Invalid color '{0}'")]
	InvalidColor(String),
}
