//! Pixel acquisition: turn an encoded image or raw RGBA buffer into pixels.

use std::path::Path;

use image::{DynamicImage, GenericImageView};

use crate::error::{PaletteError, Result};
use crate::pixel::Pixel;

/// Decoded image as a flat, row-major pixel sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelSource {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Pixel>,
}

impl PixelSource {
    /// Decode any format the `image` crate recognizes.
    pub fn from_bytes(input: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(input)?;
        Ok(Self::from_image(&img))
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let img = image::open(path)?;
        Ok(Self::from_image(&img))
    }

    pub fn from_image(img: &DynamicImage) -> Self {
        let (width, height) = img.dimensions();
        // Work with RGBA to preserve alpha channel
        let pixels = img
            .to_rgba8()
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                Pixel::new(r, g, b, a)
            })
            .collect();
        Self { width, height, pixels }
    }

    /// Wrap an undecoded RGBA8 buffer, e.g. canvas `ImageData`.
    pub fn from_rgba(width: u32, height: u32, raw: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if raw.len() != expected {
            return Err(PaletteError::invalid(format!(
                "expected {expected} bytes for a {width}x{height} RGBA buffer, got {}",
                raw.len()
            )));
        }
        Ok(Self { width, height, pixels: pixels_from_rgba(raw) })
    }
}

/// Split RGBA8 bytes into pixels; a trailing partial pixel is ignored.
pub fn pixels_from_rgba(raw: &[u8]) -> Vec<Pixel> {
    raw.chunks_exact(4)
        .map(|c| Pixel::new(c[0], c[1], c[2], c[3]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn checker_png(w: u32, h: u32) -> Vec<u8> {
        let img = RgbaImage::from_fn(w, h, |x, y| {
            if (x + y) % 2 == 0 { Rgba([255, 0, 0, 255]) } else { Rgba([0, 0, 255, 128]) }
        });
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn decodes_png_row_major() {
        let source = PixelSource::from_bytes(&checker_png(4, 3)).unwrap();
        assert_eq!((source.width, source.height), (4, 3));
        assert_eq!(source.pixels.len(), 12);
        assert_eq!(source.pixels[0], Pixel::new(255, 0, 0, 255));
        assert_eq!(source.pixels[1], Pixel::new(0, 0, 255, 128));
        // second row starts shifted by one
        assert_eq!(source.pixels[4], Pixel::new(0, 0, 255, 128));
    }

    #[test]
    fn garbage_is_an_image_load_error() {
        let err = PixelSource::from_bytes(b"definitely not an image").unwrap_err();
        assert!(matches!(err, PaletteError::ImageLoad(_)));
    }

    #[test]
    fn opens_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checker.png");
        std::fs::write(&path, checker_png(10, 10)).unwrap();
        let source = PixelSource::open(&path).unwrap();
        assert_eq!(source.pixels.len(), 100);
    }

    #[test]
    fn raw_buffer_length_is_checked() {
        let raw = [10u8, 20, 30, 40, 50, 60, 70, 80];
        let source = PixelSource::from_rgba(2, 1, &raw).unwrap();
        assert_eq!(source.pixels, vec![Pixel::new(10, 20, 30, 40), Pixel::new(50, 60, 70, 80)]);
        assert!(matches!(
            PixelSource::from_rgba(3, 1, &raw),
            Err(PaletteError::InvalidInput { .. })
        ));
    }
}
