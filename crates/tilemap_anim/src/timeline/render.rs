//! Compositing of a single frame.

use image::{RgbaImage, imageops};

use super::{Scene, select_frame};
use crate::{
	AnimError,
	atlas::{apply_flips, crop_tile},
};

/// Renders the map as it looks `elapsed_ms` milliseconds into the animation.
///
/// The canvas is `width × tile_width` by `height × tile_height` pixels, filled
/// with the background color if one is set. Layers are drawn bottom first; each
/// non-empty cell draws its current tile, flipped as its GID requests, alpha
/// blended over what is already there. Cells whose GID belongs to no tileset are
/// left untouched.
///
/// Rendering the same instant twice produces identical images.
///
/// # Errors
///
/// Returns [`AnimError::CanvasTooLarge`] if the canvas cannot be allocated.
pub fn render_frame(scene: &Scene<'_>, elapsed_ms: u64) -> Result<RgbaImage, AnimError> {
	let map = scene.tilemap();
	let (canvas_width, canvas_height) = canvas_size(scene)?;
	let mut canvas = match scene.background() {
		Some(color) => RgbaImage::from_pixel(canvas_width, canvas_height, color),
		None => RgbaImage::new(canvas_width, canvas_height),
	};

	let columns = map.width().max(1) as usize;
	for layer in scene.layers() {
		for (index, gid) in layer.occupied() {
			let Some((entry, local_id)) = scene.tilesets().owner(gid.actual()) else {
				log::trace!("Layer '{}': cell {index} has unowned GID {gid}", layer.name());
				continue;
			};

			let tileset = entry.tileset();
			let frame_id = select_frame(tileset, local_id, elapsed_ms);
			let (x, y) = tileset.tile_origin(frame_id, entry.columns());
			let tile = crop_tile(entry.atlas(), x, y, tileset.tile_width(), tileset.tile_height());
			let tile = apply_flips(tile, gid.flags());

			let column = (index % columns) as i64;
			let row = (index / columns) as i64;
			imageops::overlay(
				&mut canvas,
				&tile,
				column * i64::from(map.tile_width()),
				row * i64::from(map.tile_height()),
			);
		}
	}

	Ok(canvas)
}

fn canvas_size(scene: &Scene<'_>) -> Result<(u32, u32), AnimError> {
	let map = scene.tilemap();
	let too_large = || AnimError::CanvasTooLarge {
		columns: map.width(),
		rows: map.height(),
		tile_width: map.tile_width(),
		tile_height: map.tile_height(),
	};

	let width = map.width().checked_mul(map.tile_width()).ok_or_else(too_large)?;
	let height = map.height().checked_mul(map.tile_height()).ok_or_else(too_large)?;
	u64::from(width)
		.checked_mul(u64::from(height))
		.and_then(|pixels| pixels.checked_mul(4))
		.and_then(|bytes| usize::try_from(bytes).ok())
		.ok_or_else(too_large)?;

	Ok((width, height))
}
