//! `.TSX` tileset document support.
//!
//! A tileset describes an atlas image cut into a grid of equally sized tiles.
//! Tiles are addressed by a 0-based local id, laid out left to right, top to
//! bottom:
//!
//! ```text
//! x = margin + (id mod columns) × (tile_width + spacing)
//! y = margin + (id div columns) × (tile_height + spacing)
//! ```
//!
//! Any tile may carry an `<animation>`: an ordered list of local tile ids to
//! display, each for a duration in milliseconds.
//!
//! # Examples
//!
//! ```
//! use tilemap_types::tsx::{TileKind, Tileset};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tileset = Tileset::from_str(r#"
//!     <tileset name="water" tilewidth="8" tileheight="8" tilecount="4" columns="2">
//!       <image source="water.png" trans="ff00ff" width="16" height="16"/>
//!       <tile id="0">
//!         <animation>
//!           <frame tileid="0" duration="100"/>
//!           <frame tileid="1" duration="200"/>
//!         </animation>
//!       </tile>
//!     </tileset>"#)?;
//!
//! match tileset.tile_kind(0) {
//!     TileKind::Animated(animation) => assert_eq!(animation.period(), 300),
//!     TileKind::Static => unreachable!(),
//! }
//! assert!(matches!(tileset.tile_kind(3), TileKind::Static));
//! # Ok(())
//! # }
//! ```

mod animation;

use std::{
	collections::BTreeMap,
	path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{DocumentKind, TilemapError};

pub use self::animation::{Animation, AnimationFrame, TileKind};

/// Atlas image reference of a tileset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilesetImage {
	/// Image path, resolved against the TSX directory when loaded from disk
	pub source: PathBuf,
	/// Transparency key color (`RRGGBB`, optional `#`)
	pub trans: Option<String>,
	/// Declared image width in pixels, 0 if absent
	pub width: u32,
	/// Declared image height in pixels, 0 if absent
	pub height: u32,
}

/// A parsed TSX tileset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tileset {
	name: String,
	tile_width: u32,
	tile_height: u32,
	spacing: u32,
	margin: u32,
	tile_count: u32,
	columns: u32,
	image: Option<TilesetImage>,
	animations: BTreeMap<u32, Animation>,
}

impl Tileset {
	/// Creates a tileset without image or animations.
	pub fn new(name: impl Into<String>, tile_width: u32, tile_height: u32, columns: u32) -> Self {
		Self {
			name: name.into(),
			tile_width,
			tile_height,
			spacing: 0,
			margin: 0,
			tile_count: 0,
			columns,
			image: None,
			animations: BTreeMap::new(),
		}
	}

	/// Opens and parses a TSX file, resolving the image path against the file's directory.
	///
	/// # Errors
	///
	/// Returns an error if the file cannot be read or is not a valid TSX document.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, TilemapError> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path).map_err(|source| TilemapError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		let mut tileset = Self::parse(&text, path)?;
		if let Some(image) = tileset.image.as_mut() {
			image.source = resolve_relative(path, &image.source);
		}
		Ok(tileset)
	}

	/// Parses TSX text held in memory. The image path is kept as written.
	///
	/// # Errors
	///
	/// Returns an error if the text is not a valid TSX document.
	#[allow(clippy::should_implement_trait)]
	pub fn from_str(text: &str) -> Result<Self, TilemapError> {
		Self::parse(text, Path::new("<inline>"))
	}

	fn parse(text: &str, path: &Path) -> Result<Self, TilemapError> {
		let raw: RawTileset = quick_xml::de::from_str(text).map_err(|source| TilemapError::Xml {
			kind: DocumentKind::Tsx,
			path: path.to_path_buf(),
			source,
		})?;

		let image = raw.image.and_then(|image| {
			let source = image.source.filter(|source| !source.is_empty())?;
			Some(TilesetImage {
				source: PathBuf::from(source),
				trans: image.trans.filter(|trans| !trans.is_empty()),
				width: image.width,
				height: image.height,
			})
		});

		let animations = raw
			.tiles
			.into_iter()
			.filter_map(|tile| {
				let frames: Vec<AnimationFrame> = tile
					.animation?
					.frames
					.into_iter()
					.map(|frame| AnimationFrame::new(frame.tile_id, frame.duration))
					.collect();
				Animation::new(frames).map(|animation| (tile.id, animation))
			})
			.collect();

		Ok(Self {
			name: raw.name,
			tile_width: raw.tile_width,
			tile_height: raw.tile_height,
			spacing: raw.spacing,
			margin: raw.margin,
			tile_count: raw.tile_count,
			columns: raw.columns,
			image,
			animations,
		})
	}

	/// Tileset name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Tile width in pixels.
	pub fn tile_width(&self) -> u32 {
		self.tile_width
	}

	/// Tile height in pixels.
	pub fn tile_height(&self) -> u32 {
		self.tile_height
	}

	/// Pixels between neighbouring tiles in the atlas.
	pub fn spacing(&self) -> u32 {
		self.spacing
	}

	/// Pixels around the tile grid in the atlas.
	pub fn margin(&self) -> u32 {
		self.margin
	}

	/// Declared tile count, 0 if absent.
	pub fn tile_count(&self) -> u32 {
		self.tile_count
	}

	/// Atlas width in tiles, as declared (may be 0 in old documents).
	pub fn columns(&self) -> u32 {
		self.columns
	}

	/// Atlas image reference, if any.
	pub fn image(&self) -> Option<&TilesetImage> {
		self.image.as_ref()
	}

	/// Sets the atlas image reference.
	pub fn set_image(&mut self, image: Option<TilesetImage>) {
		self.image = image;
	}

	/// Sets the atlas grid parameters.
	pub fn set_grid(&mut self, columns: u32, margin: u32, spacing: u32) {
		self.columns = columns;
		self.margin = margin;
		self.spacing = spacing;
	}

	/// Sets the declared tile count. Zero means undeclared.
	pub fn set_tile_count(&mut self, tile_count: u32) {
		self.tile_count = tile_count;
	}

	/// Derives the column count from an atlas width, used when `columns` was not declared.
	pub fn columns_for_width(&self, image_width: u32) -> u32 {
		let stride = self.tile_width.saturating_add(self.spacing);
		if stride == 0 {
			return 1;
		}
		let usable = image_width.saturating_add(self.spacing).saturating_sub(self.margin.saturating_mul(2));
		(usable / stride).max(1)
	}

	/// Registers an animation for a local tile id. Empty frame lists are ignored.
	pub fn set_animation(&mut self, local_id: u32, frames: Vec<AnimationFrame>) {
		match Animation::new(frames) {
			Some(animation) => {
				self.animations.insert(local_id, animation);
			}
			None => {
				self.animations.remove(&local_id);
			}
		}
	}

	/// Classifies a local tile id as static or animated.
	pub fn tile_kind(&self, local_id: u32) -> TileKind<'_> {
		match self.animations.get(&local_id) {
			Some(animation) => TileKind::Animated(animation),
			None => TileKind::Static,
		}
	}

	/// Iterates over every animated tile as `(local_id, animation)`, ordered by id.
	pub fn animations(&self) -> impl Iterator<Item = (u32, &Animation)> {
		self.animations.iter().map(|(&id, animation)| (id, animation))
	}

	/// Top-left pixel of a local tile in the atlas, for a given column count.
	pub fn tile_origin(&self, local_id: u32, columns: u32) -> (u32, u32) {
		let columns = columns.max(1);
		let column = local_id % columns;
		let row = local_id / columns;
		(
			self.margin.saturating_add(column.saturating_mul(self.tile_width.saturating_add(self.spacing))),
			self.margin.saturating_add(row.saturating_mul(self.tile_height.saturating_add(self.spacing))),
		)
	}
}

/// Resolves `target` against the directory containing `document`, unless absolute.
pub fn resolve_relative(document: &Path, target: &Path) -> PathBuf {
	if target.is_absolute() {
		return target.to_path_buf();
	}
	document.parent().map_or_else(|| target.to_path_buf(), |dir| dir.join(target))
}

#[derive(Debug, Deserialize)]
struct RawTileset {
	#[serde(rename = "@name", default)]
	name: String,
	#[serde(rename = "@tilewidth")]
	tile_width: u32,
	#[serde(rename = "@tileheight")]
	tile_height: u32,
	#[serde(rename = "@spacing", default)]
	spacing: u32,
	#[serde(rename = "@margin", default)]
	margin: u32,
	#[serde(rename = "@tilecount", default)]
	tile_count: u32,
	#[serde(rename = "@columns", default)]
	columns: u32,
	#[serde(default)]
	image: Option<RawImage>,
	#[serde(rename = "tile", default)]
	tiles: Vec<RawTile>,
}

#[derive(Debug, Deserialize)]
struct RawImage {
	#[serde(rename = "@source", default)]
	source: Option<String>,
	#[serde(rename = "@trans", default)]
	trans: Option<String>,
	#[serde(rename = "@width", default)]
	width: u32,
	#[serde(rename = "@height", default)]
	height: u32,
}

#[derive(Debug, Deserialize)]
struct RawTile {
	#[serde(rename = "@id")]
	id: u32,
	#[serde(default)]
	animation: Option<RawAnimation>,
}

#[derive(Debug, Deserialize)]
struct RawAnimation {
	#[serde(rename = "frame", default)]
	frames: Vec<RawFrame>,
}

#[derive(Debug, Deserialize)]
struct RawFrame {
	#[serde(rename = "@tileid")]
	tile_id: u32,
	#[serde(rename = "@duration")]
	duration: u32,
}
