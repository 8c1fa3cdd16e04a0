//! `.TMX` map document support.
//!
//! Only the subset of the TMX schema needed to render an orthogonal map is read:
//!
//! ```text
//! <map orientation="orthogonal" width=".." height=".." tilewidth=".." tileheight=".."
//!      backgroundcolor="#AARRGGBB">
//!   <tileset firstgid="1" source="terrain.tsx"/>
//!   <layer name="Ground" width=".." height="..">
//!     <data encoding="csv|base64" compression="gzip|zlib">...</data>
//!   </layer>
//! </map>
//! ```
//!
//! Object groups, image layers, properties and editor settings are ignored.
//! Inline tilesets (a `<tileset>` without a `source`) are skipped with a warning.
//!
//! # Examples
//!
//! ```
//! use tilemap_types::tmx::Tilemap;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let map = Tilemap::from_str(r#"
//!     <map orientation="orthogonal" width="2" height="1" tilewidth="8" tileheight="8">
//!       <tileset firstgid="1" source="tiles.tsx"/>
//!       <layer name="Ground" width="2" height="1">
//!         <data encoding="csv">1,2</data>
//!       </layer>
//!     </map>"#)?;
//!
//! assert_eq!(map.pixel_size(), (16, 8));
//! assert_eq!(map.tilesets()[0].first_gid, 1);
//! # Ok(())
//! # }
//! ```

mod layer;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{DocumentKind, TilemapError};

pub use self::layer::{Compression, Encoding, Layer, LayerData};

/// Reference from a map to an external tileset document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilesetRef {
	/// Smallest GID claimed by the tileset
	pub first_gid: u32,
	/// TSX path as written in the map, relative to the map's directory
	pub source: PathBuf,
}

/// A parsed TMX map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tilemap {
	width: u32,
	height: u32,
	tile_width: u32,
	tile_height: u32,
	background_color: Option<String>,
	layers: Vec<LayerData>,
	tilesets: Vec<TilesetRef>,
}

impl Tilemap {
	/// Creates a map from already decoded parts.
	pub fn new(width: u32, height: u32, tile_width: u32, tile_height: u32) -> Self {
		Self {
			width,
			height,
			tile_width,
			tile_height,
			background_color: None,
			layers: Vec::new(),
			tilesets: Vec::new(),
		}
	}

	/// Opens and parses a TMX file.
	///
	/// # Errors
	///
	/// Returns an error if the file cannot be read, is not a valid TMX document,
	/// or describes a non-orthogonal or infinite map.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, TilemapError> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path).map_err(|source| TilemapError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::parse(&text, path)
	}

	/// Parses TMX text held in memory.
	///
	/// # Errors
	///
	/// See [`Tilemap::open`].
	#[allow(clippy::should_implement_trait)]
	pub fn from_str(text: &str) -> Result<Self, TilemapError> {
		Self::parse(text, Path::new("<inline>"))
	}

	fn parse(text: &str, path: &Path) -> Result<Self, TilemapError> {
		let raw: RawMap = quick_xml::de::from_str(text).map_err(|source| TilemapError::Xml {
			kind: DocumentKind::Tmx,
			path: path.to_path_buf(),
			source,
		})?;

		if !raw.orientation.eq_ignore_ascii_case("orthogonal") {
			return Err(TilemapError::UnsupportedOrientation(raw.orientation));
		}
		if raw.infinite != 0 {
			return Err(TilemapError::InfiniteMap);
		}

		let mut tilesets = Vec::with_capacity(raw.tilesets.len());
		for tileset in raw.tilesets {
			match tileset.source {
				Some(source) if !source.is_empty() => tilesets.push(TilesetRef {
					first_gid: tileset.first_gid,
					source: PathBuf::from(source),
				}),
				_ => log::warn!(
					"Tileset with firstgid {} in {} has no source defined, skipping",
					tileset.first_gid,
					path.display()
				),
			}
		}

		let layers = raw
			.layers
			.into_iter()
			.enumerate()
			.map(|(index, layer)| {
				let name = layer.name.unwrap_or_else(|| format!("Layer {}", index + 1));
				let data = layer.data.unwrap_or_default();
				LayerData::new(
					name,
					data.encoding.as_deref().unwrap_or("csv"),
					data.compression.as_deref(),
					data.text,
				)
			})
			.collect();

		Ok(Self {
			width: raw.width,
			height: raw.height,
			tile_width: raw.tile_width,
			tile_height: raw.tile_height,
			background_color: raw.background_color.filter(|color| !color.is_empty()),
			layers,
			tilesets,
		})
	}

	/// Width of the map in tiles.
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Height of the map in tiles.
	pub fn height(&self) -> u32 {
		self.height
	}

	/// Width of a map cell in pixels.
	pub fn tile_width(&self) -> u32 {
		self.tile_width
	}

	/// Height of a map cell in pixels.
	pub fn tile_height(&self) -> u32 {
		self.tile_height
	}

	/// Number of cells in every layer (`width × height`).
	pub fn cell_count(&self) -> usize {
		self.width as usize * self.height as usize
	}

	/// Canvas size in pixels, or `(u32::MAX, u32::MAX)` saturated on overflow.
	pub fn pixel_size(&self) -> (u32, u32) {
		(
			self.width.saturating_mul(self.tile_width),
			self.height.saturating_mul(self.tile_height),
		)
	}

	/// Background color as written in the document (`#AARRGGBB` or `#RRGGBB`).
	pub fn background_color(&self) -> Option<&str> {
		self.background_color.as_deref()
	}

	/// Sets the background color string.
	pub fn set_background_color(&mut self, color: Option<String>) {
		self.background_color = color;
	}

	/// Raw layer payloads in document order (bottom to top).
	pub fn layers(&self) -> &[LayerData] {
		&self.layers
	}

	/// Appends a layer payload on top of the existing ones.
	pub fn push_layer(&mut self, layer: LayerData) {
		self.layers.push(layer);
	}

	/// External tileset references in document order.
	pub fn tilesets(&self) -> &[TilesetRef] {
		&self.tilesets
	}

	/// Appends an external tileset reference.
	pub fn push_tileset(&mut self, tileset: TilesetRef) {
		self.tilesets.push(tileset);
	}

	/// Decodes every layer, checking that each one covers the whole grid.
	///
	/// # Errors
	///
	/// Returns the first decode failure, naming the offending layer.
	pub fn decode_layers(&self) -> Result<Vec<Layer>, TilemapError> {
		self.layers
			.iter()
			.map(|data| {
				let layer = data.decode()?;
				if layer.gids().len() != self.cell_count() {
					return Err(TilemapError::layer_decode(
						layer.name(),
						format!(
							"expected {} cells ({}x{}), decoded {}",
							self.cell_count(),
							self.width,
							self.height,
							layer.gids().len()
						),
					));
				}
				Ok(layer)
			})
			.collect()
	}

	/// Returns `true` if any tileset reference points at a file named like `file_name`.
	///
	/// The comparison ignores directories and ASCII case.
	pub fn references_tileset(&self, file_name: &str) -> bool {
		self.tilesets.iter().any(|tileset| {
			tileset
				.source
				.file_name()
				.and_then(|name| name.to_str())
				.is_some_and(|name| name.eq_ignore_ascii_case(file_name))
		})
	}
}

fn default_orientation() -> String {
	"orthogonal".to_string()
}

#[derive(Debug, Deserialize)]
struct RawMap {
	#[serde(rename = "@orientation", default = "default_orientation")]
	orientation: String,
	#[serde(rename = "@infinite", default)]
	infinite: u8,
	#[serde(rename = "@width")]
	width: u32,
	#[serde(rename = "@height")]
	height: u32,
	#[serde(rename = "@tilewidth")]
	tile_width: u32,
	#[serde(rename = "@tileheight")]
	tile_height: u32,
	#[serde(rename = "@backgroundcolor", default)]
	background_color: Option<String>,
	#[serde(rename = "tileset", default)]
	tilesets: Vec<RawTilesetRef>,
	#[serde(rename = "layer", default)]
	layers: Vec<RawLayer>,
}

#[derive(Debug, Deserialize)]
struct RawTilesetRef {
	#[serde(rename = "@firstgid")]
	first_gid: u32,
	#[serde(rename = "@source", default)]
	source: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLayer {
	#[serde(rename = "@name", default)]
	name: Option<String>,
	#[serde(default)]
	data: Option<RawData>,
}

#[derive(Debug, Default, Deserialize)]
struct RawData {
	#[serde(rename = "@encoding", default)]
	encoding: Option<String>,
	#[serde(rename = "@compression", default)]
	compression: Option<String>,
	#[serde(rename = "$text", default)]
	text: String,
}
