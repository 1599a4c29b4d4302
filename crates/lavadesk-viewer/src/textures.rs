//! Texture decoding for the scene.
//!
//! Images are decoded to RGBA8, flipped so row 0 is the bottom of the image
//! (matching the mesh UVs, where v = 0 is the bottom), and expanded into a
//! full mip chain on the CPU.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::{imageops, RgbaImage};

use crate::scene::{texture_names, ShapeInstance};

/// Error returned by [`load_texture_image`].
#[derive(Debug)]
pub enum TextureError {
    /// The file could not be opened or decoded.
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    /// Only 3- and 4-channel images are accepted.
    UnsupportedChannels { path: PathBuf, channels: u8 },
    Empty { path: PathBuf },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Decode { path, source } => {
                write!(f, "cannot decode {}: {source}", path.display())
            }
            TextureError::UnsupportedChannels { path, channels } => write!(
                f,
                "{} has {channels} channel(s); expected 3 or 4",
                path.display()
            ),
            TextureError::Empty { path } => write!(f, "{} has zero size", path.display()),
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// A decoded texture with all of its mip levels, level 0 first.
#[derive(Debug, Clone)]
pub struct LoadedTexture {
    pub name: &'static str,
    pub levels: Vec<RgbaImage>,
}

/// Reverses the order of rows in a tightly packed pixel buffer, in place.
///
/// A trailing partial row (when `pixels.len()` is not a multiple of
/// `row_len`) is left untouched.
pub fn flip_rows(pixels: &mut [u8], row_len: usize) {
    if row_len == 0 {
        return;
    }
    let height = pixels.len() / row_len;
    for y in 0..height / 2 {
        let (top, bottom) = pixels.split_at_mut((height - 1 - y) * row_len);
        top[y * row_len..(y + 1) * row_len].swap_with_slice(&mut bottom[..row_len]);
    }
}

/// Decodes an RGB or RGBA image from `path` into bottom-up RGBA8.
pub fn load_texture_image(path: &Path) -> Result<RgbaImage, TextureError> {
    let img = image::open(path).map_err(|source| TextureError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let channels = img.color().channel_count();
    if channels != 3 && channels != 4 {
        return Err(TextureError::UnsupportedChannels {
            path: path.to_path_buf(),
            channels,
        });
    }
    if img.width() == 0 || img.height() == 0 {
        return Err(TextureError::Empty {
            path: path.to_path_buf(),
        });
    }

    let mut rgba = img.to_rgba8();
    let row_len = rgba.width() as usize * 4;
    flip_rows(&mut rgba, row_len);

    log::debug!(
        "decoded {} ({}x{}, {channels} channels)",
        path.display(),
        rgba.width(),
        rgba.height()
    );
    Ok(rgba)
}

/// Number of levels in a full mip chain for a `width x height` image.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Builds every mip level by repeated 2x box-like downsampling.
pub fn mip_chain(base: RgbaImage) -> Vec<RgbaImage> {
    let count = mip_level_count(base.width(), base.height()) as usize;
    let mut levels = Vec::with_capacity(count);
    levels.push(base);

    while levels.len() < count {
        let Some(prev) = levels.last() else { break };
        let w = (prev.width() / 2).max(1);
        let h = (prev.height() / 2).max(1);
        let next = imageops::resize(prev, w, h, imageops::FilterType::Triangle);
        levels.push(next);
    }

    levels
}

/// Loads every texture the scene references from `dir`.
///
/// Fails on the first texture that cannot be loaded, naming it.
pub fn load_scene_textures<'a>(
    dir: &Path,
    instances: impl IntoIterator<Item = &'a ShapeInstance>,
) -> anyhow::Result<Vec<LoadedTexture>> {
    texture_names(instances)
        .into_iter()
        .map(|name| {
            let path = dir.join(name);
            let base = load_texture_image(&path)
                .with_context(|| format!("Failed to load texture {}", path.display()))?;
            Ok(LoadedTexture {
                name,
                levels: mip_chain(base),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba};

    // ── row flip ─────────────────────────────────────────────────────────

    #[test]
    fn flip_reverses_rows() {
        let mut px = vec![1, 1, 2, 2, 3, 3];
        flip_rows(&mut px, 2);
        assert_eq!(px, [3, 3, 2, 2, 1, 1]);
    }

    #[test]
    fn flip_twice_is_identity() {
        for (w, h, c) in [(1, 1, 3), (5, 4, 3), (7, 9, 4), (16, 3, 4)] {
            let row_len = w * c;
            let original: Vec<u8> = (0..row_len * h).map(|i| (i * 31 % 251) as u8).collect();
            let mut px = original.clone();
            flip_rows(&mut px, row_len);
            if h > 1 {
                assert_ne!(px, original);
            }
            flip_rows(&mut px, row_len);
            assert_eq!(px, original, "{w}x{h}x{c}");
        }
    }

    #[test]
    fn flip_ignores_degenerate_input() {
        let mut empty: Vec<u8> = Vec::new();
        flip_rows(&mut empty, 4);
        let mut px = vec![1, 2, 3];
        flip_rows(&mut px, 0);
        assert_eq!(px, [1, 2, 3]);
    }

    // ── decode ───────────────────────────────────────────────────────────

    #[test]
    fn rgb_png_loads_bottom_up_with_opaque_alpha() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("two_rows.png");

        let mut img = RgbImage::new(1, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(0, 1, Rgb([0, 0, 255]));
        img.save(&path).expect("write png");

        let loaded = load_texture_image(&path).expect("load");
        assert_eq!(loaded.dimensions(), (1, 2));
        assert_eq!(*loaded.get_pixel(0, 0), Rgba([0, 0, 255, 255]));
        assert_eq!(*loaded.get_pixel(0, 1), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn rgba_png_keeps_alpha() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("alpha.png");
        RgbaImage::from_pixel(3, 3, Rgba([10, 20, 30, 40])).save(&path).expect("write png");

        let loaded = load_texture_image(&path).expect("load");
        assert!(loaded.pixels().all(|p| *p == Rgba([10, 20, 30, 40])));
    }

    #[test]
    fn grayscale_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("gray.png");
        GrayImage::from_pixel(2, 2, Luma([128])).save(&path).expect("write png");

        match load_texture_image(&path) {
            Err(TextureError::UnsupportedChannels { channels, .. }) => assert_eq!(channels, 1),
            other => panic!("expected channel error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nope.png");
        let err = load_texture_image(&path).expect_err("missing file");
        assert!(matches!(err, TextureError::Decode { .. }));
        assert!(err.to_string().contains("nope.png"));
    }

    #[test]
    fn scene_load_reports_first_missing_texture() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_scene_textures(dir.path(), &crate::scene::desk_scene())
            .expect_err("empty directory");
        let msg = format!("{err:#}");
        assert!(msg.starts_with("Failed to load texture"), "{msg}");
        assert!(msg.contains("blacksparkle.png"), "{msg}");
    }

    // ── mips ─────────────────────────────────────────────────────────────

    #[test]
    fn mip_counts() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(2, 1), 2);
        assert_eq!(mip_level_count(256, 256), 9);
        assert_eq!(mip_level_count(300, 20), 9);
    }

    #[test]
    fn mip_chain_halves_down_to_one_pixel() {
        let levels = mip_chain(RgbaImage::from_pixel(8, 2, Rgba([200, 100, 50, 255])));
        let dims: Vec<_> = levels.iter().map(|l| l.dimensions()).collect();
        assert_eq!(dims, [(8, 2), (4, 1), (2, 1), (1, 1)]);
        // A flat color stays flat.
        assert!(levels[3].pixels().all(|p| *p == Rgba([200, 100, 50, 255])));
    }
}
