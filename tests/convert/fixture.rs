use std::{fs, path::Path};

use image::{Rgba, RgbaImage};

pub(super) const MAGENTA: Rgba<u8> = Rgba([255, 0, 255, 255]);

/// Writes a horizontal strip of solid 4x4 tiles.
pub(super) fn write_atlas(path: &Path, colors: &[Rgba<u8>]) {
	let atlas = RgbaImage::from_fn(4 * colors.len() as u32, 4, |x, _| colors[(x / 4) as usize]);
	fs::create_dir_all(path.parent().unwrap()).unwrap();
	atlas.save(path).unwrap();
}

/// Writes a TSX with 4x4 tiles. Each animation is `(tile id, [(frame tile id, duration)])`.
pub(super) fn write_tsx(path: &Path, image: &str, columns: u32, animations: &[(u32, &[(u32, u32)])]) {
	let mut tiles = String::new();
	for (id, frames) in animations {
		tiles.push_str(&format!("  <tile id=\"{id}\">\n   <animation>\n"));
		for (tile_id, duration) in *frames {
			tiles.push_str(&format!("    <frame tileid=\"{tile_id}\" duration=\"{duration}\"/>\n"));
		}
		tiles.push_str("   </animation>\n  </tile>\n");
	}

	let text = format!(
		r#"<?xml version="1.0" encoding="UTF-8"?>
<tileset version="1.10" tiledversion="1.11.0" name="fixture" tilewidth="4" tileheight="4" tilecount="{columns}" columns="{columns}">
  <image source="{image}" trans="ff00ff" width="{width}" height="4"/>
{tiles}</tileset>
"#,
		width = columns * 4
	);
	fs::create_dir_all(path.parent().unwrap()).unwrap();
	fs::write(path, text).unwrap();
}

/// Writes an orthogonal TMX with 4x4 cells and CSV layers.
pub(super) fn write_tmx(path: &Path, width: u32, height: u32, tilesets: &[(u32, &str)], layers: &[&[u32]]) {
	let mut body = String::new();
	for (first_gid, source) in tilesets {
		body.push_str(&format!(" <tileset firstgid=\"{first_gid}\" source=\"{source}\"/>\n"));
	}
	for (i, gids) in layers.iter().enumerate() {
		let csv = gids.iter().map(u32::to_string).collect::<Vec<_>>().join(",");
		body.push_str(&format!(
			" <layer id=\"{}\" name=\"layer {i}\" width=\"{width}\" height=\"{height}\">\n  <data encoding=\"csv\">\n{csv}\n</data>\n </layer>\n",
			i + 1
		));
	}

	let text = format!(
		r#"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.10" orientation="orthogonal" renderorder="right-down" width="{width}" height="{height}" tilewidth="4" tileheight="4" infinite="0">
{body}</map>
"#
	);
	fs::create_dir_all(path.parent().unwrap()).unwrap();
	fs::write(path, text).unwrap();
}
