//! Tileset atlas loading and per-tile image operations.
//!
//! Tiles are cut out of the atlas as fresh owned images, transformed according
//! to the cell's flip flags and then composited by the renderer.
//!
//! # Flip order
//!
//! The diagonal flag is applied first, as a transpose (rotate 90° clockwise,
//! then mirror horizontally). After the transpose the horizontal and vertical
//! flags swap meaning, then the horizontal mirror is applied, then the vertical
//! one.

use std::path::Path;

use image::{Rgba, RgbaImage, imageops};
use tilemap_types::gid::FlipFlags;

use crate::{AnimError, color::parse_hex_color};

/// Opens an atlas image as 8-bit RGBA.
///
/// # Arguments
///
/// * `path` - Image file, in any format the `image` crate can decode
///
/// # Errors
///
/// Returns [`AnimError::AtlasLoad`] if the file cannot be opened or decoded.
pub fn load_atlas(path: &Path) -> Result<RgbaImage, AnimError> {
	let image = image::open(path).map_err(|source| AnimError::AtlasLoad {
		path: path.to_path_buf(),
		source,
	})?;
	log::debug!("Loaded atlas {} ({}x{})", path.display(), image.width(), image.height());
	Ok(image.into_rgba8())
}

/// Makes every pixel matching a color key fully transparent.
///
/// Only the RGB channels are compared. The key may be `RRGGBB` or `AARRGGBB`,
/// with or without a leading `#`. An unparsable key is logged and leaves the
/// image untouched.
///
/// # Examples
///
/// ```
/// use image::{Rgba, RgbaImage};
/// use tilemap_anim::atlas::apply_transparency;
///
/// let mut image = RgbaImage::from_pixel(2, 1, Rgba([255, 0, 255, 255]));
/// image.put_pixel(1, 0, Rgba([1, 2, 3, 255]));
/// apply_transparency(&mut image, "#ff00ff");
/// assert_eq!(image.get_pixel(0, 0)[3], 0);
/// assert_eq!(image.get_pixel(1, 0)[3], 255);
/// ```
pub fn apply_transparency(image: &mut RgbaImage, key: &str) {
	let key = match parse_hex_color(key) {
		Ok(color) => color,
		Err(e) => {
			log::warn!("Ignoring transparency key: {e}");
			return;
		}
	};

	let mut keyed = 0usize;
	for pixel in image.pixels_mut() {
		if pixel[0] == key[0] && pixel[1] == key[1] && pixel[2] == key[2] {
			pixel[3] = 0;
			keyed += 1;
		}
	}
	log::trace!("Transparency key {key:?} cleared {keyed} pixels");
}

/// Cuts a rectangle out of an atlas.
///
/// The rectangle is clamped to the atlas bounds, so a tile hanging over the edge
/// comes back smaller. A rectangle entirely outside the atlas yields a fully
/// transparent tile of the requested size.
pub fn crop_tile(atlas: &RgbaImage, x: u32, y: u32, width: u32, height: u32) -> RgbaImage {
	if x >= atlas.width() || y >= atlas.height() {
		log::trace!(
			"Tile rect {x},{y} {width}x{height} lies outside the {}x{} atlas",
			atlas.width(),
			atlas.height()
		);
		return RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));
	}
	imageops::crop_imm(atlas, x, y, width, height).to_image()
}

/// Applies Tiled flip flags to a tile.
pub fn apply_flips(tile: RgbaImage, flags: FlipFlags) -> RgbaImage {
	if flags.is_empty() {
		return tile;
	}

	let mut tile = tile;
	let (mut horizontal, mut vertical) = (flags.horizontal, flags.vertical);

	if flags.diagonal {
		tile = imageops::rotate90(&tile);
		imageops::flip_horizontal_in_place(&mut tile);
		std::mem::swap(&mut horizontal, &mut vertical);
	}
	if horizontal {
		imageops::flip_horizontal_in_place(&mut tile);
	}
	if vertical {
		imageops::flip_vertical_in_place(&mut tile);
	}

	tile
}
