//! Tile layer payloads and their decoding into GID grids.
//!
//! Tiled stores the grid of a tile layer as text inside `<data>`:
//!
//! - `encoding="csv"`: comma separated decimal GIDs (whitespace is ignored)
//! - `encoding="base64"`: little-endian `u32` GIDs, optionally compressed with
//!   `gzip` or `zlib` before base64 encoding

use std::io::Read;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use flate2::read::{GzDecoder, ZlibDecoder};

use crate::{TilemapError, gid::Gid};

/// Text encoding of a layer payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoding {
	/// Comma separated values
	Csv,
	/// Base64 of little-endian `u32` values
	Base64,
	/// Anything else, rejected when decoding
	Unsupported(String),
}

impl Encoding {
	fn parse(value: &str) -> Self {
		match value.to_ascii_lowercase().as_str() {
			"csv" => Self::Csv,
			"base64" => Self::Base64,
			_ => Self::Unsupported(value.to_string()),
		}
	}
}

/// Compression applied to a base64 payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compression {
	/// Gzip stream
	Gzip,
	/// Zlib stream
	Zlib,
	/// Anything else, rejected when decoding
	Unsupported(String),
}

impl Compression {
	fn parse(value: &str) -> Option<Self> {
		match value.to_ascii_lowercase().as_str() {
			"" => None,
			"gzip" => Some(Self::Gzip),
			"zlib" => Some(Self::Zlib),
			_ => Some(Self::Unsupported(value.to_string())),
		}
	}
}

/// Undecoded tile layer as it appears in a TMX document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerData {
	name: String,
	encoding: Encoding,
	compression: Option<Compression>,
	payload: String,
}

impl LayerData {
	/// Creates a layer payload from its `<data>` attributes and text.
	pub fn new(
		name: impl Into<String>,
		encoding: &str,
		compression: Option<&str>,
		payload: impl Into<String>,
	) -> Self {
		Self {
			name: name.into(),
			encoding: Encoding::parse(encoding),
			compression: compression.and_then(Compression::parse),
			payload: payload.into(),
		}
	}

	/// Creates a CSV layer from already known GIDs.
	pub fn from_gids(name: impl Into<String>, gids: &[u32]) -> Self {
		let payload = gids.iter().map(u32::to_string).collect::<Vec<_>>().join(",");
		Self::new(name, "csv", None, payload)
	}

	/// Layer name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Payload encoding.
	pub fn encoding(&self) -> &Encoding {
		&self.encoding
	}

	/// Payload compression, if any.
	pub fn compression(&self) -> Option<&Compression> {
		self.compression.as_ref()
	}

	/// Decodes the payload into a flat, row-major GID array.
	///
	/// # Errors
	///
	/// Returns [`TilemapError::LayerDecode`] if the payload is empty, uses an
	/// unsupported encoding or compression, or is otherwise malformed.
	pub fn decode(&self) -> Result<Layer, TilemapError> {
		if self.payload.trim().is_empty() {
			return Err(TilemapError::layer_decode(&self.name, "layer data is missing or empty"));
		}

		let gids = match &self.encoding {
			Encoding::Csv => self.decode_csv()?,
			Encoding::Base64 => self.decode_base64()?,
			Encoding::Unsupported(other) => {
				return Err(TilemapError::layer_decode(
					&self.name,
					format!("unsupported layer data encoding '{other}'"),
				));
			}
		};

		log::trace!("Decoded layer '{}': {} cells", self.name, gids.len());

		Ok(Layer {
			name: self.name.clone(),
			gids,
		})
	}

	fn decode_csv(&self) -> Result<Vec<Gid>, TilemapError> {
		self.payload
			.split(',')
			.map(str::trim)
			.filter(|token| !token.is_empty())
			.map(|token| {
				token.parse::<u32>().map(Gid::new).map_err(|e| {
					TilemapError::layer_decode(&self.name, format!("invalid CSV value '{token}': {e}"))
				})
			})
			.collect()
	}

	fn decode_base64(&self) -> Result<Vec<Gid>, TilemapError> {
		let cleaned: String = self.payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
		let bytes = BASE64_STANDARD
			.decode(cleaned.as_bytes())
			.map_err(|e| TilemapError::layer_decode(&self.name, format!("invalid base64 data: {e}")))?;

		let bytes = match &self.compression {
			None => bytes,
			Some(Compression::Gzip) => self.inflate(GzDecoder::new(bytes.as_slice()), "gzip")?,
			Some(Compression::Zlib) => self.inflate(ZlibDecoder::new(bytes.as_slice()), "zlib")?,
			Some(Compression::Unsupported(other)) => {
				return Err(TilemapError::layer_decode(
					&self.name,
					format!("unsupported compression format '{other}'"),
				));
			}
		};

		if bytes.len() % 4 != 0 {
			return Err(TilemapError::layer_decode(
				&self.name,
				format!("decoded {} bytes, which is not a whole number of GIDs", bytes.len()),
			));
		}

		Ok(bytes
			.chunks_exact(4)
			.map(|chunk| Gid::new(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])))
			.collect())
	}

	fn inflate(&self, mut decoder: impl Read, format: &str) -> Result<Vec<u8>, TilemapError> {
		let mut out = Vec::new();
		decoder.read_to_end(&mut out).map_err(|e| {
			TilemapError::layer_decode(&self.name, format!("failed to decompress {format} data: {e}"))
		})?;
		Ok(out)
	}
}

/// A decoded tile layer: a row-major GID grid where `index = y × width + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
	name: String,
	gids: Vec<Gid>,
}

impl Layer {
	/// Creates a decoded layer.
	pub fn new(name: impl Into<String>, gids: Vec<Gid>) -> Self {
		Self {
			name: name.into(),
			gids,
		}
	}

	/// Layer name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// GIDs in row-major order.
	pub fn gids(&self) -> &[Gid] {
		&self.gids
	}

	/// Iterates over non-empty cells as `(index, gid)`.
	pub fn occupied(&self) -> impl Iterator<Item = (usize, Gid)> + '_ {
		self.gids.iter().copied().enumerate().filter(|(_, gid)| gid.actual() != 0)
	}
}
