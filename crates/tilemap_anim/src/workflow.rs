//! End-to-end conversion from a TMX, TSX or atlas image to an animated GIF.
//!
//! ```text
//! image ──find TSX──> tileset ──find TMX──> map
//!                                            │
//!                 load TSX + atlas per tileset reference
//!                                            │
//!                     decode layers ──> timeline ──> GIF
//! ```

use std::path::{Path, PathBuf};

use tilemap_types::{
	discovery::{InputKind, find_tmx_referencing_tsx, find_tsx_referencing_image},
	tmx::Tilemap,
	tsx::{Tileset, resolve_relative},
};

use crate::{
	AnimError,
	atlas::{apply_transparency, load_atlas},
	constants::DEFAULT_FRAME_DELAY_MS,
	gif::save_gif,
	tilesets::{TilesetEntry, Tilesets},
	timeline::{Scene, generate_animation},
};

/// Settings for one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
	/// TMX map, TSX tileset or tileset atlas image
	pub input: PathBuf,
	/// Output file, derived from the input when `None`
	pub output: Option<PathBuf>,
	/// Frame delay used for maps without animation, in milliseconds
	pub frame_delay_ms: u32,
}

impl ConvertOptions {
	/// Creates options for `input` with the default frame delay and output path.
	pub fn new(input: impl Into<PathBuf>) -> Self {
		Self {
			input: input.into(),
			output: None,
			frame_delay_ms: DEFAULT_FRAME_DELAY_MS,
		}
	}

	/// Sets the output path.
	pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
		self.output = Some(output.into());
		self
	}

	/// Sets the frame delay used for maps without animation.
	pub fn with_frame_delay(mut self, frame_delay_ms: u32) -> Self {
		self.frame_delay_ms = frame_delay_ms;
		self
	}

	/// Effective output path.
	///
	/// Without an explicit output, the input path with a `.gif` extension is
	/// used. An explicit output not ending in `.gif` gets its extension replaced.
	///
	/// # Examples
	///
	/// ```
	/// use std::path::Path;
	/// use tilemap_anim::workflow::ConvertOptions;
	///
	/// assert_eq!(ConvertOptions::new("maps/level.tmx").output_path(), Path::new("maps/level.gif"));
	/// assert_eq!(
	///     ConvertOptions::new("level.tmx").with_output("out/anim.png").output_path(),
	///     Path::new("out/anim.gif")
	/// );
	/// assert_eq!(
	///     ConvertOptions::new("level.tmx").with_output("out/Anim.GIF").output_path(),
	///     Path::new("out/Anim.GIF")
	/// );
	/// ```
	pub fn output_path(&self) -> PathBuf {
		match &self.output {
			Some(output) if has_gif_extension(output) => output.clone(),
			Some(output) => output.with_extension("gif"),
			None => self.input.with_extension("gif"),
		}
	}
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertReport {
	/// Map that was rendered
	pub tilemap: PathBuf,
	/// File that was written
	pub output: PathBuf,
	/// Number of frames in the GIF
	pub frame_count: usize,
	/// Loop length in milliseconds
	pub period_ms: u64,
}

/// Runs a complete conversion.
///
/// # Errors
///
/// Returns an error if the options are invalid, no map can be found for the
/// input, a document or atlas fails to load, a layer fails to decode, or the
/// GIF cannot be written. No output is produced on error.
pub fn convert(options: &ConvertOptions) -> Result<ConvertReport, AnimError> {
	if options.frame_delay_ms == 0 {
		return Err(AnimError::InvalidOption("frame delay must be greater than 0".to_string()));
	}

	log::info!("Starting conversion of {}", options.input.display());
	let tmx_path = resolve_tilemap(&options.input)?;

	log::info!("Parsing TMX file {}", tmx_path.display());
	let tilemap = Tilemap::open(&tmx_path)?;
	let tilesets = load_tilesets(&tilemap, &tmx_path)?;
	if tilesets.is_empty() {
		return Err(AnimError::NoTilesetsLoaded(tmx_path));
	}

	let layers = tilemap.decode_layers()?;
	log::info!(
		"Map is {}x{} tiles of {}x{} px with {} layers",
		tilemap.width(),
		tilemap.height(),
		tilemap.tile_width(),
		tilemap.tile_height(),
		layers.len()
	);

	let sequence = generate_animation(&Scene::new(&tilemap, &tilesets, &layers), options.frame_delay_ms)?;
	let frame_count = sequence.len();
	let period_ms = sequence.period_ms;

	let output = options.output_path();
	save_gif(sequence.frames, &sequence.delays, &output)?;

	Ok(ConvertReport {
		tilemap: tmx_path,
		output,
		frame_count,
		period_ms,
	})
}

/// Finds the TMX map to render for an input file.
///
/// A TMX input is used as is. A TSX input is looked up among the maps in its
/// directory tree. An image input is first matched to a TSX, then to a map.
/// When several documents match, the first in path order wins.
///
/// # Errors
///
/// Returns [`AnimError::UnsupportedInput`], [`AnimError::NoTilesetFound`] or
/// [`AnimError::NoTilemapFound`] when resolution fails.
pub fn resolve_tilemap(input: &Path) -> Result<PathBuf, AnimError> {
	let kind = InputKind::classify(input).ok_or_else(|| AnimError::UnsupportedInput(input.to_path_buf()))?;
	log::info!("Input is a {kind}: {}", input.display());

	let tsx_path = match kind {
		InputKind::Tilemap => return Ok(input.to_path_buf()),
		InputKind::Tileset => input.to_path_buf(),
		InputKind::Image => {
			let tsx_path = find_tsx_referencing_image(input)?
				.into_iter()
				.next()
				.ok_or_else(|| AnimError::NoTilesetFound(input.to_path_buf()))?;
			log::info!("Found TSX file referencing this image: {}", tsx_path.display());
			tsx_path
		}
	};

	let tmx_path = find_tmx_referencing_tsx(&tsx_path)?
		.into_iter()
		.next()
		.ok_or(AnimError::NoTilemapFound(tsx_path))?;
	log::info!("Found TMX file referencing this tileset: {}", tmx_path.display());
	Ok(tmx_path)
}

/// Loads every tileset a map references, with its keyed atlas.
///
/// TSX paths are resolved against the map's directory. Tilesets without an
/// atlas image are skipped with a warning, and their id ranges stay reserved
/// so their cells are not drawn from another tileset.
///
/// # Errors
///
/// Returns an error if a referenced TSX or its atlas cannot be loaded.
pub fn load_tilesets(tilemap: &Tilemap, tmx_path: &Path) -> Result<Tilesets, AnimError> {
	let mut entries = Vec::with_capacity(tilemap.tilesets().len());
	let mut skipped = Vec::new();

	for reference in tilemap.tilesets() {
		let tsx_path = resolve_relative(tmx_path, &reference.source);
		log::info!("Loading tileset {} (firstgid {})", tsx_path.display(), reference.first_gid);
		let tileset = Tileset::open(&tsx_path)?;

		let Some(image) = tileset.image() else {
			log::warn!("Tileset {} has no image defined, skipping", tsx_path.display());
			skipped.push(reference.first_gid);
			continue;
		};

		let mut atlas = load_atlas(&image.source)?;
		if let Some(key) = image.trans.as_deref() {
			apply_transparency(&mut atlas, key);
		}
		log::debug!("Tileset '{}' has {} animated tiles", tileset.name(), tileset.animations().count());
		entries.push(TilesetEntry::new(reference.first_gid, tileset, atlas));
	}

	let mut tilesets = Tilesets::new(entries);
	for first_gid in skipped {
		tilesets.mark_skipped(first_gid);
	}
	Ok(tilesets)
}

fn has_gif_extension(path: &Path) -> bool {
	path.extension().and_then(|ext| ext.to_str()).is_some_and(|ext| ext.eq_ignore_ascii_case("gif"))
}
