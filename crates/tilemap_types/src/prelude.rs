//! Prelude module for `tilemap_types`.
//!
//! This module provides a convenient way to import commonly used types.
//!
//! # Examples
//!
//! ```no_run
//! use tilemap_types::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let map = Tilemap::open("level.tmx")?;
//! let layers: Vec<Layer> = map.decode_layers()?;
//! # Ok(())
//! # }
//! ```

#[doc(inline)]
pub use crate::{
	// Errors
	DocumentKind,
	TilemapError,

	// Discovery
	discovery::{InputKind, find_tmx_referencing_tsx, find_tsx_referencing_image},

	// GIDs
	gid::{FlipFlags, Gid},

	// TMX types
	tmx::{Layer, LayerData, Tilemap, TilesetRef},

	// TSX types
	tsx::{Animation, AnimationFrame, TileKind, Tileset, TilesetImage},
};
