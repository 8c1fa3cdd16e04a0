//! Loaded tilesets and global tile id ownership.
//!
//! A map numbers the tiles of all its tilesets in one global id space. Each
//! tileset claims the ids starting at its `first_gid`; the owner of an id is the
//! tileset with the largest `first_gid` that does not exceed it.
//!
//! ```text
//! first_gid:   1                 100
//!              |-- tileset A ----|-- tileset B -------->
//! gid 3    ->  A, local 2
//! gid 101  ->  B, local 1
//! ```
//!
//! A referenced tileset that could not be rendered still claims its range, so
//! its ids resolve to no owner instead of falling through to the tileset below.

use image::RgbaImage;
use tilemap_types::tsx::Tileset;

/// A tileset ready for rendering: its definition, decoded atlas and grid width.
#[derive(Debug, Clone)]
pub struct TilesetEntry {
	first_gid: u32,
	tileset: Tileset,
	atlas: RgbaImage,
	columns: u32,
}

impl TilesetEntry {
	/// Creates an entry.
	///
	/// When the tileset does not declare its column count, it is derived from the
	/// atlas width.
	pub fn new(first_gid: u32, tileset: Tileset, atlas: RgbaImage) -> Self {
		let columns = match tileset.columns() {
			0 => tileset.columns_for_width(atlas.width()),
			declared => declared,
		};
		Self {
			first_gid,
			tileset,
			atlas,
			columns,
		}
	}

	/// First global id owned by this tileset.
	pub fn first_gid(&self) -> u32 {
		self.first_gid
	}

	/// Tileset definition.
	pub fn tileset(&self) -> &Tileset {
		&self.tileset
	}

	/// Atlas image, transparency already applied.
	pub fn atlas(&self) -> &RgbaImage {
		&self.atlas
	}

	/// Atlas width in tiles.
	pub fn columns(&self) -> u32 {
		self.columns
	}
}

/// Ordered collection of [`TilesetEntry`] values.
#[derive(Debug, Clone, Default)]
pub struct Tilesets {
	// Sorted by first_gid, descending.
	entries: Vec<TilesetEntry>,
	// first_gid of referenced tilesets without a renderable atlas.
	skipped: Vec<u32>,
}

impl Tilesets {
	/// Creates a collection from entries in any order.
	pub fn new(mut entries: Vec<TilesetEntry>) -> Self {
		entries.sort_by(|a, b| b.first_gid.cmp(&a.first_gid));
		Self {
			entries,
			skipped: Vec::new(),
		}
	}

	/// Reserves the id range of a referenced tileset that was not loaded.
	///
	/// Ids from `first_gid` up to the next tileset resolve to no owner.
	pub fn mark_skipped(&mut self, first_gid: u32) {
		if let Err(index) = self.skipped.binary_search(&first_gid) {
			self.skipped.insert(index, first_gid);
		}
	}

	/// First gids reserved by [`Tilesets::mark_skipped`], ascending.
	pub fn skipped(&self) -> &[u32] {
		&self.skipped
	}

	/// Number of tilesets.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns `true` if no tileset was loaded.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates over the entries, highest `first_gid` first.
	pub fn iter(&self) -> impl Iterator<Item = &TilesetEntry> {
		self.entries.iter()
	}

	/// Finds the tileset owning an actual (flag-free) global id.
	///
	/// Returns the entry and the local id within it, or `None` when the id lies
	/// below every `first_gid`, inside the range of a skipped tileset, or past the
	/// declared tile count of its tileset.
	///
	/// # Examples
	///
	/// ```
	/// use image::RgbaImage;
	/// use tilemap_anim::tilesets::{TilesetEntry, Tilesets};
	/// use tilemap_types::tsx::Tileset;
	///
	/// let tilesets = Tilesets::new(vec![
	///     TilesetEntry::new(1, Tileset::new("a", 8, 8, 4), RgbaImage::new(32, 32)),
	///     TilesetEntry::new(100, Tileset::new("b", 8, 8, 4), RgbaImage::new(32, 32)),
	/// ]);
	/// let (entry, local) = tilesets.owner(101).unwrap();
	/// assert_eq!((entry.first_gid(), local), (100, 1));
	/// ```
	pub fn owner(&self, actual_gid: u32) -> Option<(&TilesetEntry, u32)> {
		let entry = self.entries.iter().find(|entry| entry.first_gid <= actual_gid)?;
		if self.skipped.iter().any(|&first_gid| first_gid > entry.first_gid && first_gid <= actual_gid) {
			return None;
		}

		let local_id = actual_gid - entry.first_gid;
		let tile_count = entry.tileset.tile_count();
		if tile_count > 0 && local_id >= tile_count {
			return None;
		}
		Some((entry, local_id))
	}
}

impl FromIterator<TilesetEntry> for Tilesets {
	fn from_iter<T: IntoIterator<Item = TilesetEntry>>(iter: T) -> Self {
		Self::new(iter.into_iter().collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn entry(first_gid: u32, name: &str) -> TilesetEntry {
		TilesetEntry::new(first_gid, Tileset::new(name, 16, 16, 4), RgbaImage::new(64, 64))
	}

	#[test]
	fn test_owner_lookup() {
		let tilesets = Tilesets::new(vec![entry(1, "terrain"), entry(100, "water")]);

		let (owner, local) = tilesets.owner(3).unwrap();
		assert_eq!(owner.first_gid(), 1);
		assert_eq!(owner.tileset().name(), "terrain");
		assert_eq!(local, 2);

		let (owner, local) = tilesets.owner(101).unwrap();
		assert_eq!(owner.first_gid(), 100);
		assert_eq!(local, 1);

		let (owner, local) = tilesets.owner(100).unwrap();
		assert_eq!(owner.tileset().name(), "water");
		assert_eq!(local, 0);
	}

	#[test]
	fn test_owner_order_independent() {
		let forward = Tilesets::new(vec![entry(1, "a"), entry(50, "b"), entry(200, "c")]);
		let reverse = Tilesets::new(vec![entry(200, "c"), entry(1, "a"), entry(50, "b")]);

		for gid in [1, 49, 50, 199, 200, 5000] {
			let a = forward.owner(gid).map(|(e, l)| (e.first_gid(), l));
			let b = reverse.owner(gid).map(|(e, l)| (e.first_gid(), l));
			assert_eq!(a, b, "gid {gid}");
		}
	}

	#[test]
	fn test_gid_below_every_tileset() {
		let tilesets = Tilesets::new(vec![entry(10, "late")]);
		assert!(tilesets.owner(9).is_none());
		assert!(Tilesets::default().owner(1).is_none());
	}

	#[test]
	fn test_skipped_tileset_claims_its_range() {
		let mut tilesets = Tilesets::new(vec![entry(1, "terrain"), entry(20, "water")]);
		tilesets.mark_skipped(10);
		tilesets.mark_skipped(10);
		assert_eq!(tilesets.skipped(), [10]);
		assert_eq!(tilesets.len(), 2);

		assert_eq!(tilesets.owner(9).map(|(e, l)| (e.first_gid(), l)), Some((1, 8)));
		assert!(tilesets.owner(10).is_none());
		assert!(tilesets.owner(19).is_none());
		assert_eq!(tilesets.owner(21).map(|(e, l)| (e.first_gid(), l)), Some((20, 1)));
	}

	#[test]
	fn test_owner_respects_tile_count() {
		let mut counted = Tileset::new("counted", 16, 16, 4);
		counted.set_tile_count(2);
		let tilesets = Tilesets::new(vec![TilesetEntry::new(1, counted, RgbaImage::new(64, 64))]);

		assert_eq!(tilesets.owner(2).map(|(_, l)| l), Some(1));
		assert!(tilesets.owner(3).is_none());
	}

	#[test]
	fn test_columns_derived_from_atlas() {
		let derived = TilesetEntry::new(1, Tileset::new("a", 16, 16, 0), RgbaImage::new(80, 32));
		assert_eq!(derived.columns(), 5);

		let declared = TilesetEntry::new(1, Tileset::new("a", 16, 16, 2), RgbaImage::new(80, 32));
		assert_eq!(declared.columns(), 2);
	}
}
