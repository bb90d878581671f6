//! Input validation and stride downsampling of the working pixel set.

use log::debug;

use crate::error::{PaletteError, Result};
use crate::pixel::Pixel;

/// Smallest accepted input, a 10x10 image.
pub const MIN_PIXELS: usize = 100;
pub const MIN_COLORS: usize = 1;
pub const MAX_COLORS: usize = 10;

/// Inputs longer than this are stride-sampled before clustering.
pub const DOWNSAMPLE_THRESHOLD: usize = 100_000;
/// Approximate size of the sampled working set.
pub const DOWNSAMPLE_TARGET: usize = 5000;

pub fn validate_color_count(color_count: usize) -> Result<()> {
    if !(MIN_COLORS..=MAX_COLORS).contains(&color_count) {
        return Err(PaletteError::invalid(format!(
            "a palette must be between {MIN_COLORS} and {MAX_COLORS} colors, got {color_count}"
        )));
    }
    Ok(())
}

pub fn validate_pixel_count(pixel_count: usize) -> Result<()> {
    if pixel_count < MIN_PIXELS {
        return Err(PaletteError::invalid(format!(
            "pixel data must hold at least {MIN_PIXELS} pixels (10x10px), got {pixel_count}"
        )));
    }
    Ok(())
}

/// Keep every `ceil(len / DOWNSAMPLE_TARGET)`-th pixel once the input exceeds
/// [`DOWNSAMPLE_THRESHOLD`]; smaller inputs are returned untouched.
pub fn downsample(pixels: Vec<Pixel>) -> Vec<Pixel> {
    let len = pixels.len();
    if len <= DOWNSAMPLE_THRESHOLD {
        return pixels;
    }

    let stride = len.div_ceil(DOWNSAMPLE_TARGET);
    let reduced: Vec<Pixel> = pixels.into_iter().step_by(stride).collect();
    debug!("downsampled {len} pixels to {} (stride {stride})", reduced.len());
    reduced
}
