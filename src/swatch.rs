//! Presenting a palette: hex strings, serializable records and swatch strips.

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::pixel::Pixel;

pub const DEFAULT_SWATCH_SIZE: u32 = 100;

/// Output record handed to presentation code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRecord {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl From<Pixel> for ColorRecord {
    fn from(p: Pixel) -> Self {
        Self { red: p.red, green: p.green, blue: p.blue, alpha: p.alpha }
    }
}

impl From<ColorRecord> for Pixel {
    fn from(c: ColorRecord) -> Self {
        Pixel::new(c.red, c.green, c.blue, c.alpha)
    }
}

/// `RRGGBB`, uppercase, alpha dropped.
pub fn to_hex(color: Pixel) -> String {
    format!("{:02X}{:02X}{:02X}", color.red, color.green, color.blue)
}

/// Lay the colors out left to right as opaque `size`x`size` squares.
/// A `size` of zero falls back to [`DEFAULT_SWATCH_SIZE`].
pub fn render_swatches(colors: &[Pixel], size: u32) -> RgbaImage {
    let size = if size == 0 { DEFAULT_SWATCH_SIZE } else { size };
    let width = size * colors.len().max(1) as u32;

    RgbaImage::from_fn(width, size, |x, _y| {
        match colors.get((x / size) as usize) {
            Some(c) => Rgba([c.red, c.green, c.blue, 255]),
            None => Rgba([0, 0, 0, 0]),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_uppercase_and_padded() {
        assert_eq!(to_hex(Pixel::new(255, 10, 0, 12)), "FF0A00");
    }

    #[test]
    fn record_serializes_with_channel_names() {
        let record = ColorRecord::from(Pixel::new(1, 2, 3, 4));
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"red":1,"green":2,"blue":3,"alpha":4}"#);
        let back: ColorRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(Pixel::from(back), Pixel::new(1, 2, 3, 4));
    }

    #[test]
    fn swatches_are_opaque_squares_in_order() {
        let colors = [Pixel::new(255, 0, 0, 0), Pixel::new(0, 0, 255, 255)];
        let img = render_swatches(&colors, 4);
        assert_eq!(img.dimensions(), (8, 4));
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(3, 3).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(4, 0).0, [0, 0, 255, 255]);
    }

    #[test]
    fn zero_size_uses_default() {
        let img = render_swatches(&[Pixel::new(1, 1, 1, 255)], 0);
        assert_eq!(img.dimensions(), (DEFAULT_SWATCH_SIZE, DEFAULT_SWATCH_SIZE));
    }
}
