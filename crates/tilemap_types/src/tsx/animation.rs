//! Per-tile animation types.
//!
//! An animation is strictly periodic. Its period is the sum of its frame
//! durations, and frame `i` covers the closed-open interval
//! `[start_i, start_i + duration_i)` of each cycle. A frame with a duration of
//! zero covers an empty interval: it is never displayed and never marks a change.

/// A single animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationFrame {
	/// Local id of the tile to display
	pub tile_id: u32,
	/// Display time in milliseconds
	pub duration: u32,
}

impl AnimationFrame {
	/// Creates a new animation frame.
	pub fn new(tile_id: u32, duration: u32) -> Self {
		Self {
			tile_id,
			duration,
		}
	}
}

/// A non-empty, looping frame sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
	frames: Vec<AnimationFrame>,
}

impl Animation {
	/// Creates an animation, or `None` if `frames` is empty.
	pub fn new(frames: Vec<AnimationFrame>) -> Option<Self> {
		if frames.is_empty() {
			return None;
		}
		Some(Self {
			frames,
		})
	}

	/// Frames in display order.
	pub fn frames(&self) -> &[AnimationFrame] {
		&self.frames
	}

	/// Cycle length in milliseconds. May be 0 when every frame has zero duration.
	pub fn period(&self) -> u64 {
		self.frames.iter().map(|frame| u64::from(frame.duration)).sum()
	}

	/// Local tile id displayed `elapsed` milliseconds after the animation started.
	///
	/// At an exact boundary the next frame wins. A zero-length period falls back to
	/// the first frame.
	///
	/// # Examples
	///
	/// ```
	/// use tilemap_types::tsx::{Animation, AnimationFrame};
	///
	/// let animation =
	///     Animation::new(vec![AnimationFrame::new(1, 100), AnimationFrame::new(2, 200)]).unwrap();
	/// assert_eq!(animation.tile_at(99), 1);
	/// assert_eq!(animation.tile_at(100), 2);
	/// assert_eq!(animation.tile_at(300), 1);
	/// ```
	pub fn tile_at(&self, elapsed: u64) -> u32 {
		let period = self.period();
		if period == 0 {
			return self.frames[0].tile_id;
		}

		let t = elapsed % period;
		let mut start = 0u64;
		for frame in &self.frames {
			let end = start + u64::from(frame.duration);
			if t < end {
				return frame.tile_id;
			}
			start = end;
		}

		self.frames[0].tile_id
	}

	/// Offsets within one cycle at which a new frame ends, skipping zero-length frames.
	///
	/// The last value equals [`Animation::period`].
	pub fn boundaries(&self) -> impl Iterator<Item = u64> + '_ {
		self.frames.iter().filter(|frame| frame.duration > 0).scan(0u64, |acc, frame| {
			*acc += u64::from(frame.duration);
			Some(*acc)
		})
	}
}

/// What a local tile id displays over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind<'a> {
	/// Always shows its own image
	Static,
	/// Cycles through an animation
	Animated(&'a Animation),
}

impl TileKind<'_> {
	/// Period of the tile, `None` for static tiles.
	pub fn period(&self) -> Option<u64> {
		match self {
			Self::Static => None,
			Self::Animated(animation) => Some(animation.period()),
		}
	}

	/// Local tile id to draw for `local_id` at `elapsed` milliseconds.
	pub fn tile_at(&self, local_id: u32, elapsed: u64) -> u32 {
		match self {
			Self::Static => local_id,
			Self::Animated(animation) => animation.tile_at(elapsed),
		}
	}
}
