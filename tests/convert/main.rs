//! End-to-end conversion tests for `tilemap2anim`.

mod fixture;

use std::{fs::File, io::BufReader, path::Path, process::Command};

use image::{AnimationDecoder, Frame, Rgba, codecs::gif::GifDecoder};
use tilemap2anim::prelude::*;

use crate::fixture::{MAGENTA, write_atlas, write_tmx, write_tsx};

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

fn decode_gif(path: &Path) -> Vec<Frame> {
	let reader = BufReader::new(File::open(path).unwrap());
	GifDecoder::new(reader).unwrap().into_frames().collect_frames().unwrap()
}

fn delays_ms(frames: &[Frame]) -> Vec<u32> {
	frames
		.iter()
		.map(|frame| {
			let (numer, denom) = frame.delay().numer_denom_ms();
			numer / denom
		})
		.collect()
}

#[test_log::test]
fn test_static_map_single_frame() {
	let dir = tempfile::tempdir().unwrap();
	let root = dir.path();
	write_atlas(&root.join("plain.png"), &[RED, GREEN, BLUE, MAGENTA]);
	write_tsx(&root.join("plain.tsx"), "plain.png", 4, &[]);
	write_tmx(&root.join("static.tmx"), 2, 2, &[(1, "plain.tsx")], &[&[1, 2, 3, 0]]);

	let report = convert(&ConvertOptions::new(root.join("static.tmx"))).unwrap();
	assert_eq!(report.frame_count, 1);
	assert_eq!(report.output, root.join("static.gif"));

	let frames = decode_gif(&report.output);
	assert_eq!(frames.len(), 1);
	assert_eq!(delays_ms(&frames), [DEFAULT_FRAME_DELAY_MS]);

	let image = frames[0].buffer();
	assert_eq!(image.dimensions(), (8, 8));
	assert_eq!(image.get_pixel(1, 1)[3], 255);
	assert!(image.get_pixel(1, 1)[0] > 200);
	assert!(image.get_pixel(5, 1)[1] > 200);
	assert!(image.get_pixel(1, 5)[2] > 200);
	assert_eq!(image.get_pixel(5, 5)[3], 0);
}

#[test_log::test]
fn test_two_tilesets_share_one_loop() {
	let dir = tempfile::tempdir().unwrap();
	let root = dir.path();
	write_atlas(&root.join("tiles/a.png"), &[RED, GREEN]);
	write_atlas(&root.join("tiles/b.png"), &[BLUE, MAGENTA, RED]);
	write_tsx(&root.join("tiles/a.tsx"), "a.png", 2, &[(0, &[(0, 100), (1, 200)])]);
	write_tsx(&root.join("tiles/b.tsx"), "b.png", 3, &[(0, &[(0, 150), (2, 300)])]);
	write_tmx(
		&root.join("maps/level.tmx"),
		2,
		1,
		&[(1, "../tiles/a.tsx"), (3, "../tiles/b.tsx")],
		&[&[1, 3]],
	);

	let output = root.join("out/level.gif");
	let report = convert(&ConvertOptions::new(root.join("maps/level.tmx")).with_output(&output)).unwrap();
	assert_eq!(report.output, output);
	assert_eq!(report.period_ms, 900);

	let frames = decode_gif(&output);
	assert_eq!(frames.len(), 8);
	assert_eq!(delays_ms(&frames), [100, 50, 150, 100, 50, 150, 100, 200]);
	assert_eq!(delays_ms(&frames).iter().sum::<u32>(), 900);
}

#[test_log::test]
fn test_image_input_resolves_map() {
	let dir = tempfile::tempdir().unwrap();
	let root = dir.path();
	write_atlas(&root.join("water.png"), &[BLUE, GREEN]);
	write_tsx(&root.join("water.tsx"), "water.png", 2, &[(0, &[(0, 120), (1, 120)])]);
	write_tmx(&root.join("maps/pond.tmx"), 1, 1, &[(1, "../water.tsx")], &[&[1]]);

	let options = ConvertOptions::new(root.join("water.png")).with_output(root.join("pond.png"));
	let report = convert(&options).unwrap();

	assert_eq!(report.tilemap, root.join("maps/pond.tmx"));
	assert_eq!(report.output, root.join("pond.gif"));
	let frames = decode_gif(&report.output);
	assert_eq!(delays_ms(&frames), [120, 120]);
}

#[test_log::test]
fn test_flipped_cells_and_transparency_key() {
	const FLIP_H: u32 = 0x8000_0000;

	let dir = tempfile::tempdir().unwrap();
	let root = dir.path();
	write_atlas(&root.join("keyed.png"), &[MAGENTA, RED]);
	write_tsx(&root.join("keyed.tsx"), "keyed.png", 2, &[]);
	write_tmx(&root.join("keyed.tmx"), 2, 1, &[(1, "keyed.tsx")], &[&[2 | FLIP_H, 1]]);

	let report = convert(&ConvertOptions::new(root.join("keyed.tmx"))).unwrap();
	let frames = decode_gif(&report.output);
	let image = frames[0].buffer();

	assert!(image.get_pixel(0, 0)[0] > 200);
	assert_eq!(image.get_pixel(0, 0)[3], 255);
	assert_eq!(image.get_pixel(6, 2)[3], 0);
}

#[test_log::test]
fn test_missing_map_is_fatal() {
	let dir = tempfile::tempdir().unwrap();
	let root = dir.path();
	write_atlas(&root.join("lonely.png"), &[RED]);
	write_tsx(&root.join("lonely.tsx"), "lonely.png", 1, &[]);

	let result = convert(&ConvertOptions::new(root.join("lonely.tsx")));
	assert!(matches!(result, Err(AnimError::NoTilemapFound(_))));
	assert!(!root.join("lonely.gif").exists());

	let result = convert(&ConvertOptions::new(root.join("orphan.png")));
	assert!(matches!(result, Err(AnimError::NoTilesetFound(_))));
}

#[test_log::test]
fn test_layer_size_mismatch_is_fatal() {
	let dir = tempfile::tempdir().unwrap();
	let root = dir.path();
	write_atlas(&root.join("plain.png"), &[RED]);
	write_tsx(&root.join("plain.tsx"), "plain.png", 1, &[]);
	write_tmx(&root.join("short.tmx"), 2, 2, &[(1, "plain.tsx")], &[&[1, 1, 1]]);

	let result = convert(&ConvertOptions::new(root.join("short.tmx")));
	assert!(matches!(result, Err(AnimError::Tilemap(TilemapError::LayerDecode { .. }))));
	assert!(!root.join("short.gif").exists());
}

#[test]
fn test_cli_fps_wins_over_exported_frame_delay() {
	let dir = tempfile::tempdir().unwrap();
	let root = dir.path();
	write_atlas(&root.join("plain.png"), &[RED]);
	write_tsx(&root.join("plain.tsx"), "plain.png", 1, &[]);
	write_tmx(&root.join("still.tmx"), 1, 1, &[(1, "plain.tsx")], &[&[1]]);

	let status = Command::new(env!("CARGO_BIN_EXE_tilemap2anim"))
		.env("TILEMAP2ANIM_FRAME_DELAY", "50")
		.arg("-i")
		.arg(root.join("still.tmx"))
		.args(["--fps", "4"])
		.status()
		.unwrap();
	assert!(status.success());
	assert_eq!(delays_ms(&decode_gif(&root.join("still.gif"))), [250]);

	let status = Command::new(env!("CARGO_BIN_EXE_tilemap2anim"))
		.env("TILEMAP2ANIM_FRAME_DELAY", "50")
		.arg("-i")
		.arg(root.join("still.tmx"))
		.status()
		.unwrap();
	assert!(status.success());
	assert_eq!(delays_ms(&decode_gif(&root.join("still.gif"))), [50]);
}
