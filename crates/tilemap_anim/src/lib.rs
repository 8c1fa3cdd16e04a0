//! This crate turns Tiled maps into looping animations for the `tilemap2anim` project.
//!
//! # Pipeline
//!
//! - **Atlas**: Loads tileset images as RGBA, applies transparency keys, crops and flips tiles
//! - **Tilesets**: Resolves which loaded tileset owns a global tile id
//! - **Timeline**: Reconciles independently cycling tile animations into one seamless loop
//!   and renders a composited frame for every instant at which the picture changes
//! - **GIF**: Encodes the frames with per-frame delays and infinite repeat
//! - **Workflow**: Finds the map for a TMX, TSX or image input and runs the pipeline end to end
//!
//! # Examples
//!
//! ```no_run
//! use tilemap_anim::prelude::*;
//!
//! # fn main() -> Result<(), AnimError> {
//! let options = ConvertOptions::new("assets/level.tmx");
//! let report = convert(&options)?;
//! println!("{} frames written to {}", report.frame_count, report.output.display());
//! # Ok(())
//! # }
//! ```

pub mod atlas;
pub mod color;
pub mod constants;
pub mod gif;
pub mod tilesets;
pub mod timeline;
pub mod workflow;

mod error;

/// `use tilemap_anim::prelude::*;` to import commonly used items.
pub mod prelude;

pub use error::AnimError;

// Re-export the document model for convenience
pub use tilemap_types;
