//! Timeline constants.

/// Delay used for a map without animated tiles, in milliseconds
pub const DEFAULT_FRAME_DELAY_MS: u32 = 100;

/// Shortest on-screen duration given to any rendered frame, in milliseconds.
///
/// Many GIF players clamp or skip frames shorter than this.
pub const MIN_FRAME_DELAY_MS: u32 = 10;

/// Palette quantization speed handed to the GIF encoder, 1 (best) to 30 (fastest)
pub const GIF_ENCODER_SPEED: i32 = 10;
