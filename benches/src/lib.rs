//! Benchmark helper utilities for tilemap2anim
//!
//! This module generates synthetic maps for the timeline benchmarks. A map is
//! filled row by row with a repeating pattern of static and animated tiles, so
//! both the change-event walk and the compositor see a realistic mix.

use image::{Rgba, RgbaImage};
use tilemap_anim::{
	tilesets::{TilesetEntry, Tilesets},
	timeline::Scene,
};
use tilemap_types::{
	tmx::{Layer, LayerData, Tilemap},
	tsx::{AnimationFrame, Tileset},
};

/// Edge length of a generated tile in pixels
pub const TILE_SIZE: u32 = 16;

/// Number of tiles in the generated atlas
pub const ATLAS_TILES: u32 = 64;

/// Owned inputs of a [`Scene`].
pub struct Fixture {
	/// Generated map
	pub tilemap: Tilemap,
	/// Generated tileset with its atlas
	pub tilesets: Tilesets,
	/// Decoded layers
	pub layers: Vec<Layer>,
}

impl Fixture {
	/// Borrows the fixture as a renderable scene.
	pub fn scene(&self) -> Scene<'_> {
		Scene::new(&self.tilemap, &self.tilesets, &self.layers)
	}
}

/// Generates a map of `columns × rows` cells over `layers` layers.
///
/// Local tiles `0..periods.len()` are animated: tile `i` cycles through four
/// frames that together last `periods[i]` milliseconds. Every other cell uses a
/// static tile.
pub fn generate_fixture(columns: u32, rows: u32, layers: u32, periods: &[u32]) -> Fixture {
	let mut tileset = Tileset::new("bench", TILE_SIZE, TILE_SIZE, 8);
	for (local_id, &period) in periods.iter().enumerate() {
		let local_id = local_id as u32;
		let frames = (0..4).map(|step| AnimationFrame::new((local_id + step) % ATLAS_TILES, period / 4)).collect();
		tileset.set_animation(local_id, frames);
	}
	let tilesets = Tilesets::new(vec![TilesetEntry::new(1, tileset, generate_atlas())]);

	let mut tilemap = Tilemap::new(columns, rows, TILE_SIZE, TILE_SIZE);
	tilemap.set_background_color(Some("#202020".to_string()));
	for layer in 0..layers {
		let gids: Vec<u32> = (0..columns * rows)
			.map(|cell| match (cell + layer) % 5 {
				0 => 0,
				1 if !periods.is_empty() => 1 + cell % periods.len() as u32,
				_ => 1 + periods.len() as u32 + cell % 16,
			})
			.collect();
		tilemap.push_layer(LayerData::from_gids(format!("layer {layer}"), &gids));
	}

	let layers = tilemap.decode_layers().unwrap_or_default();
	Fixture {
		tilemap,
		tilesets,
		layers,
	}
}

/// Generates an 8-column atlas where every tile has its own color.
fn generate_atlas() -> RgbaImage {
	let size = 8 * TILE_SIZE;
	RgbaImage::from_fn(size, size, |x, y| {
		let tile = (y / TILE_SIZE) * 8 + x / TILE_SIZE;
		Rgba([(tile * 4) as u8, (255 - tile * 3) as u8, (tile * 7) as u8, if x % TILE_SIZE == 0 { 0 } else { 255 }])
	})
}

/// Common benchmark map sizes in cells
pub mod sizes {
	/// Small room: 16x12
	pub const SMALL: (u32, u32) = (16, 12);
	/// Typical level screen: 40x30
	pub const MEDIUM: (u32, u32) = (40, 30);
	/// Large overworld chunk: 128x96
	pub const LARGE: (u32, u32) = (128, 96);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_generate_fixture() {
		let fixture = generate_fixture(4, 3, 2, &[300, 450]);
		assert_eq!(fixture.layers.len(), 2);
		assert_eq!(fixture.layers[0].gids().len(), 12);
		assert_eq!(fixture.tilesets.len(), 1);
	}
}
