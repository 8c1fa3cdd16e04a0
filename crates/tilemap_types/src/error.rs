//! Error types for Tiled document loading and layer decoding.

use std::path::PathBuf;

use thiserror::Error;

/// Tiled document kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
	/// TMX map document
	Tmx,
	/// TSX tileset document
	Tsx,
}

impl std::fmt::Display for DocumentKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Tmx => write!(f, "TMX"),
			Self::Tsx => write!(f, "TSX"),
		}
	}
}

/// Errors that can occur when loading Tiled documents or decoding layer data
#[derive(Debug, Error)]
pub enum TilemapError {
	/// A document could not be read from disk
	#[error("Failed to read {}: {source}", .path.display())]
	Io {
		/// Path that was being read
		path: PathBuf,
		/// Underlying I/O error
		#[source]
		source: std::io::Error,
	},

	/// A document is not valid XML or does not match the schema
	#[error("Malformed {kind} document {}: {source}", .path.display())]
	Xml {
		/// Kind of document being parsed
		kind: DocumentKind,
		/// Path of the document, or `<inline>` for in-memory text
		path: PathBuf,
		/// Underlying deserialization error
		#[source]
		source: quick_xml::DeError,
	},

	/// Layer payload could not be decoded into GIDs
	#[error("Layer '{layer}': {message}")]
	LayerDecode {
		/// Name of the offending layer
		layer: String,
		/// Description of the failure
		message: String,
	},

	/// Map orientation other than orthogonal
	#[error("Unsupported map orientation '{0}', only orthogonal maps are supported")]
	UnsupportedOrientation(String),

	/// Infinite (chunked) maps
	#[error("Infinite maps are not supported")]
	InfiniteMap,

	/// Directory scan failed at its root
	#[error("Failed to scan {}: {source}", .path.display())]
	Scan {
		/// Directory being scanned
		path: PathBuf,
		/// Underlying walk error
		#[source]
		source: walkdir::Error,
	},
}

impl TilemapError {
	/// Creates a layer decode error.
	pub fn layer_decode(layer: &str, message: impl Into<String>) -> Self {
		Self::LayerDecode {
			layer: layer.to_string(),
			message: message.into(),
		}
	}
}
