//! Global tile identifiers.
//!
//! A GID is a 32-bit value referencing a tile across every tileset of a map.
//! The three most significant bits carry flip flags:
//!
//! ```text
//! Bit  Mask         Meaning
//! ---  -----------  ------------------------------------------
//! 31   0x8000_0000  Flip horizontally
//! 30   0x4000_0000  Flip vertically
//! 29   0x2000_0000  Flip diagonally (transpose, applied first)
//! ```
//!
//! The remaining 29 bits form the actual GID. Zero means an empty cell.

/// Horizontal flip flag (bit 31)
pub const FLIP_H: u32 = 0x8000_0000;

/// Vertical flip flag (bit 30)
pub const FLIP_V: u32 = 0x4000_0000;

/// Diagonal flip flag (bit 29)
pub const FLIP_D: u32 = 0x2000_0000;

/// Mask keeping the actual tile id (lower 29 bits)
pub const GID_MASK: u32 = !(FLIP_H | FLIP_V | FLIP_D);

/// Flip flags carried by a GID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FlipFlags {
	/// Mirror around the vertical axis
	pub horizontal: bool,
	/// Mirror around the horizontal axis
	pub vertical: bool,
	/// Transpose (swap x and y) before the other flips
	pub diagonal: bool,
}

impl FlipFlags {
	/// Returns `true` if no flag is set.
	pub fn is_empty(&self) -> bool {
		!(self.horizontal || self.vertical || self.diagonal)
	}

	/// Encodes the flags into their GID bit positions.
	pub fn bits(&self) -> u32 {
		let mut bits = 0;
		if self.horizontal {
			bits |= FLIP_H;
		}
		if self.vertical {
			bits |= FLIP_V;
		}
		if self.diagonal {
			bits |= FLIP_D;
		}
		bits
	}
}

/// A raw GID as stored in layer data.
///
/// # Examples
///
/// ```
/// use tilemap_types::gid::{FlipFlags, Gid};
///
/// let gid = Gid::new(0x8000_0003);
/// assert_eq!(gid.actual(), 3);
/// assert!(gid.flags().horizontal);
///
/// let same = Gid::from_parts(3, gid.flags());
/// assert_eq!(same, gid);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Gid(u32);

impl Gid {
	/// The empty cell.
	pub const EMPTY: Gid = Gid(0);

	/// Wraps a raw 32-bit GID.
	pub fn new(raw: u32) -> Self {
		Self(raw)
	}

	/// Combines an actual GID with flip flags. Bits of `actual` above bit 28 are discarded.
	pub fn from_parts(actual: u32, flags: FlipFlags) -> Self {
		Self((actual & GID_MASK) | flags.bits())
	}

	/// Returns the raw value including flag bits.
	pub fn raw(self) -> u32 {
		self.0
	}

	/// Returns the actual GID with flag bits masked off.
	pub fn actual(self) -> u32 {
		self.0 & GID_MASK
	}

	/// Returns `true` for an empty cell.
	pub fn is_empty(self) -> bool {
		self.0 == 0
	}

	/// Extracts the flip flags.
	pub fn flags(self) -> FlipFlags {
		FlipFlags {
			horizontal: self.0 & FLIP_H != 0,
			vertical: self.0 & FLIP_V != 0,
			diagonal: self.0 & FLIP_D != 0,
		}
	}
}

impl From<u32> for Gid {
	fn from(raw: u32) -> Self {
		Self(raw)
	}
}

impl std::fmt::Display for Gid {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.actual())?;
		let flags = self.flags();
		if flags.is_empty() {
			return Ok(());
		}
		let marks: String = [(flags.horizontal, 'H'), (flags.vertical, 'V'), (flags.diagonal, 'D')]
			.iter()
			.filter_map(|&(set, mark)| set.then_some(mark))
			.collect();
		write!(f, " [{marks}]")
	}
}
