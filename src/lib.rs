#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `tilemap2anim` turns animated [Tiled](https://www.mapeditor.org/) maps into seamless,
//! infinitely looping GIF animations.
//!
//! Every animated tile on a map cycles on its own period. The converter finds the
//! shortest loop that contains a whole number of cycles of every animation, renders
//! one frame per instant at which the picture changes, and encodes the frames with
//! exact per-frame delays.
//!
//! # Examples
//!
//! ```no_run
//! use tilemap2anim::prelude::*;
//!
//! # fn main() -> Result<(), AnimError> {
//! let report = convert(&ConvertOptions::new("assets/level.tmx").with_output("out/level.gif"))?;
//! println!("{} frames, {} ms loop", report.frame_count, report.period_ms);
//! # Ok(())
//! # }
//! ```

/// `use tilemap2anim::prelude::*;` to import commonly used items.
pub mod prelude {
	#[doc(inline)]
	pub use tilemap_anim::prelude::*;
}

pub use tilemap_anim::{self, tilemap_types};
