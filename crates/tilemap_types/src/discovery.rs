//! Reverse lookup of Tiled documents.
//!
//! A conversion may start from any file of a map's dependency chain:
//!
//! ```text
//! atlas image  <-  TSX tileset  <-  TMX map
//! ```
//!
//! Starting from an image or a tileset, the directory containing it is scanned
//! recursively for the document one level up that references it by file name.
//! Unreadable candidates are logged and skipped.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{TilemapError, tmx::Tilemap, tsx::Tileset};

/// Image extensions accepted as conversion input
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

/// Kind of file a conversion starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
	/// A TMX map
	Tilemap,
	/// A TSX tileset
	Tileset,
	/// A tileset atlas image
	Image,
}

impl InputKind {
	/// Classifies a path by its extension, ignoring ASCII case.
	///
	/// # Examples
	///
	/// ```
	/// use tilemap_types::discovery::InputKind;
	///
	/// assert_eq!(InputKind::classify("maps/Level.TMX"), Some(InputKind::Tilemap));
	/// assert_eq!(InputKind::classify("atlas.png"), Some(InputKind::Image));
	/// assert_eq!(InputKind::classify("notes.txt"), None);
	/// ```
	pub fn classify(path: impl AsRef<Path>) -> Option<Self> {
		let extension = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
		match extension.as_str() {
			"tmx" => Some(Self::Tilemap),
			"tsx" => Some(Self::Tileset),
			ext if IMAGE_EXTENSIONS.contains(&ext) => Some(Self::Image),
			_ => None,
		}
	}
}

impl std::fmt::Display for InputKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Tilemap => write!(f, "TMX map"),
			Self::Tileset => write!(f, "TSX tileset"),
			Self::Image => write!(f, "tileset image"),
		}
	}
}

/// Finds TSX files under the image's directory whose atlas has the image's file name.
///
/// # Errors
///
/// Returns an error only if the directory itself cannot be scanned.
pub fn find_tsx_referencing_image(image_path: &Path) -> Result<Vec<PathBuf>, TilemapError> {
	let Some(image_name) = file_name(image_path) else {
		return Ok(Vec::new());
	};

	let mut found = Vec::new();
	for candidate in collect_with_extension(search_root(image_path), "tsx")? {
		match Tileset::open(&candidate) {
			Ok(tileset) => {
				let matches = tileset
					.image()
					.and_then(|image| file_name(&image.source))
					.is_some_and(|name| name.eq_ignore_ascii_case(image_name));
				if matches {
					log::debug!("{} references {}", candidate.display(), image_name);
					found.push(candidate);
				}
			}
			Err(e) => log::warn!("Error reading TSX file {}: {}", candidate.display(), e),
		}
	}
	Ok(found)
}

/// Finds TMX files under the tileset's directory that reference the tileset's file name.
///
/// # Errors
///
/// Returns an error only if the directory itself cannot be scanned.
pub fn find_tmx_referencing_tsx(tsx_path: &Path) -> Result<Vec<PathBuf>, TilemapError> {
	let Some(tsx_name) = file_name(tsx_path) else {
		return Ok(Vec::new());
	};

	let mut found = Vec::new();
	for candidate in collect_with_extension(search_root(tsx_path), "tmx")? {
		match Tilemap::open(&candidate) {
			Ok(map) if map.references_tileset(tsx_name) => {
				log::debug!("{} references {}", candidate.display(), tsx_name);
				found.push(candidate);
			}
			Ok(_) => {}
			Err(e) => log::warn!("Error reading TMX file {}: {}", candidate.display(), e),
		}
	}
	Ok(found)
}

fn file_name(path: &Path) -> Option<&str> {
	path.file_name()?.to_str()
}

fn search_root(path: &Path) -> &Path {
	match path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	}
}

fn collect_with_extension(root: &Path, extension: &str) -> Result<Vec<PathBuf>, TilemapError> {
	let mut files = Vec::new();

	for entry in WalkDir::new(root).follow_links(false) {
		let entry = match entry {
			Ok(entry) => entry,
			Err(err) if err.depth() == 0 => {
				return Err(TilemapError::Scan {
					path: root.to_path_buf(),
					source: err,
				});
			}
			Err(err) => {
				log::warn!("Skipping unreadable entry: {}", err);
				continue;
			}
		};

		let matches = entry
			.path()
			.extension()
			.and_then(|ext| ext.to_str())
			.is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
		if entry.file_type().is_file() && matches {
			files.push(entry.into_path());
		}
	}

	files.sort();
	Ok(files)
}
