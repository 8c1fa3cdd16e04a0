//! This crate provides the Tiled document model used by the `tilemap2anim` project.
//!
//! # Documents
//!
//! - **TMX**: Map documents with an orthogonal tile grid, tile layers and tileset references
//! - **TSX**: External tileset documents with an atlas image and per-tile animations
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use tilemap_types::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let map = Tilemap::open("assets/level.tmx")?;
//! for data in map.layers() {
//!     let layer = data.decode()?;
//!     println!("{}: {} cells", layer.name(), layer.gids().len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod discovery;
pub mod gid;
pub mod tmx;
pub mod tsx;

mod error;

/// `use tilemap_types::prelude::*;` to import commonly used items.
pub mod prelude;

pub use error::{DocumentKind, TilemapError};
