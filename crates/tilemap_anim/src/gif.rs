//! Animated GIF output.

use std::{fs, path::Path};

use image::{
	Delay, Frame, RgbaImage,
	codecs::gif::{GifEncoder, Repeat},
};

use crate::{AnimError, constants::GIF_ENCODER_SPEED};

/// Encodes frames as an infinitely looping GIF and writes it to `path`.
///
/// The whole file is encoded in memory first, so nothing is written when
/// encoding fails. Parent directories are created and an existing file is
/// overwritten. Delays are in milliseconds; GIF stores centiseconds, so they are
/// rounded by the encoder.
///
/// # Arguments
///
/// * `frames` - Frames in display order, all the same size
/// * `delays` - Display time of each frame in milliseconds
/// * `path` - Output file
///
/// # Errors
///
/// Returns [`AnimError::EmptyFrames`] or [`AnimError::DelayCountMismatch`]
/// before touching the filesystem, [`AnimError::Encode`] if encoding fails and
/// [`AnimError::Write`] if the file cannot be written.
pub fn save_gif(frames: Vec<RgbaImage>, delays: &[u32], path: &Path) -> Result<(), AnimError> {
	if frames.is_empty() {
		return Err(AnimError::EmptyFrames);
	}
	if frames.len() != delays.len() {
		return Err(AnimError::DelayCountMismatch {
			frames: frames.len(),
			delays: delays.len(),
		});
	}

	log::info!("Encoding {} frames to {}", frames.len(), path.display());
	let encode_error = |source| AnimError::Encode {
		path: path.to_path_buf(),
		source,
	};

	let mut buffer = Vec::new();
	{
		let mut encoder = GifEncoder::new_with_speed(&mut buffer, GIF_ENCODER_SPEED);
		encoder.set_repeat(Repeat::Infinite).map_err(encode_error)?;
		let gif_frames = frames
			.into_iter()
			.zip(delays)
			.map(|(image, &ms)| Frame::from_parts(image, 0, 0, Delay::from_numer_denom_ms(ms, 1)));
		encoder.encode_frames(gif_frames).map_err(encode_error)?;
	}

	let write_error = |source| AnimError::Write {
		path: path.to_path_buf(),
		source,
	};
	if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
		fs::create_dir_all(parent).map_err(write_error)?;
	}
	fs::write(path, &buffer).map_err(write_error)?;

	log::info!("Saved {} ({} bytes)", path.display(), buffer.len());
	Ok(())
}
