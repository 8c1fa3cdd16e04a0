//! Hex color strings as written by Tiled.
//!
//! ```text
//! Form        Example      Used by
//! ----------  -----------  ---------------------------------
//! RRGGBB      ff00ff       tileset transparency key (trans)
//! #RRGGBB     #336699      map background color
//! #AARRGGBB   #80336699    map background color with alpha
//! ```

use image::Rgba;

use crate::AnimError;

/// Parses `RRGGBB` or `AARRGGBB`, with an optional leading `#`.
///
/// # Errors
///
/// Returns [`AnimError::InvalidColor`] for anything else.
///
/// # Examples
///
/// ```
/// use image::Rgba;
/// use tilemap_anim::color::parse_hex_color;
///
/// assert_eq!(parse_hex_color("#336699").unwrap(), Rgba([0x33, 0x66, 0x99, 0xFF]));
/// assert_eq!(parse_hex_color("80336699").unwrap(), Rgba([0x33, 0x66, 0x99, 0x80]));
/// assert!(parse_hex_color("#12345").is_err());
/// ```
pub fn parse_hex_color(value: &str) -> Result<Rgba<u8>, AnimError> {
	let digits = value.trim().trim_start_matches('#');
	let invalid = || AnimError::InvalidColor(value.to_string());
	let bytes = hex::decode(digits).map_err(|_| invalid())?;

	match bytes.as_slice() {
		&[r, g, b] => Ok(Rgba([r, g, b, 0xFF])),
		&[a, r, g, b] => Ok(Rgba([r, g, b, a])),
		_ => Err(invalid()),
	}
}
