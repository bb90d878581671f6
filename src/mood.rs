use std::fmt;
use std::str::FromStr;

use crate::error::PaletteError;
use crate::pixel::Pixel;

/// The character of palette to bias seed selection towards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PaletteMood {
    #[default]
    Default,
    Bright,
    Dark,
    Muted,
}

impl PaletteMood {
    pub const ALL: [PaletteMood; 4] = [Self::Default, Self::Bright, Self::Dark, Self::Muted];

    /// Inclusive brightness/saturation bounds a seed candidate must fall within.
    pub const fn window(self) -> MoodWindow {
        match self {
            Self::Default => MoodWindow::new(0.0, 1.0, 0.3, 1.0),
            Self::Bright => MoodWindow::new(0.5, 1.0, 0.5, 1.0),
            Self::Dark => MoodWindow::new(0.0, 0.4, 0.1, 1.0),
            Self::Muted => MoodWindow::new(0.2, 1.0, 0.0, 0.4),
        }
    }

    pub fn accepts(self, pixel: Pixel) -> bool {
        self.window().accepts(pixel)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Bright => "bright",
            Self::Dark => "dark",
            Self::Muted => "muted",
        }
    }
}

impl fmt::Display for PaletteMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaletteMood {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "default" => Ok(Self::Default),
            "bright" => Ok(Self::Bright),
            "dark" => Ok(Self::Dark),
            "muted" => Ok(Self::Muted),
            _ => Err(PaletteError::UnknownMood(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoodWindow {
    pub min_brightness: f64,
    pub max_brightness: f64,
    pub min_saturation: f64,
    pub max_saturation: f64,
}

impl MoodWindow {
    pub const fn new(
        min_brightness: f64,
        max_brightness: f64,
        min_saturation: f64,
        max_saturation: f64,
    ) -> Self {
        Self { min_brightness, max_brightness, min_saturation, max_saturation }
    }

    pub fn accepts(&self, pixel: Pixel) -> bool {
        let b = brightness(pixel);
        let s = saturation(pixel);
        b >= self.min_brightness
            && b <= self.max_brightness
            && s >= self.min_saturation
            && s <= self.max_saturation
    }
}

/// Rec. 601 luma, normalized to `0.0..=1.0`.
pub fn brightness(pixel: Pixel) -> f64 {
    (0.299 * pixel.red as f64 + 0.587 * pixel.green as f64 + 0.114 * pixel.blue as f64) / 255.0
}

/// Channel spread `(max - min) / 255`; alpha is ignored.
pub fn saturation(pixel: Pixel) -> f64 {
    let max = pixel.red.max(pixel.green).max(pixel.blue);
    let min = pixel.red.min(pixel.green).min(pixel.blue);
    (max - min) as f64 / 255.0
}
