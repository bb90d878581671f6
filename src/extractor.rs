//! Palette extraction: seeding, clustering and backfill wired together.

use log::debug;

use crate::cluster::{self, ClusterRun};
use crate::error::{PaletteError, Result};
use crate::mood::PaletteMood;
use crate::pixel::Pixel;
use crate::sampling::{downsample, validate_color_count, validate_pixel_count};
use crate::seed::select_seeds;
use crate::source::PixelSource;

/// Everything a single extraction run depends on besides the pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtractionConfig {
    pub mood: PaletteMood,
    pub color_count: usize,
    /// Seed from every pixel when the mood filter admits none.
    pub fallback_to_unfiltered: bool,
}

impl ExtractionConfig {
    pub fn new(color_count: usize) -> Self {
        Self { mood: PaletteMood::Default, color_count, fallback_to_unfiltered: true }
    }

    pub fn with_mood(mut self, mood: PaletteMood) -> Self {
        self.mood = mood;
        self
    }

    pub fn strict(mut self) -> Self {
        self.fallback_to_unfiltered = false;
        self
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self::new(5)
    }
}

/// Result of one extraction run.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pub mood: PaletteMood,
    /// Exactly `color_count` entries, backfilled when fewer clusters formed.
    pub colors: Vec<Pixel>,
    /// Colors that came from a cluster rather than from backfill.
    pub produced: usize,
    pub missing: usize,
    pub iterations: usize,
    pub converged: bool,
}

impl Palette {
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pixel> {
        self.colors.iter()
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Pixel;
    type IntoIter = std::slice::Iter<'a, Pixel>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}

/// One color per cluster: its first member, or the rounded centroid when the
/// cluster ended the run empty.
fn representatives(run: &ClusterRun) -> Vec<Pixel> {
    run.clusters
        .iter()
        .zip(&run.centroids)
        .map(|(members, centroid)| members.first().copied().unwrap_or_else(|| centroid.to_pixel()))
        .collect()
}

/// Repeat the last color until `colors` holds `target` entries.
fn backfill(colors: &mut Vec<Pixel>, target: usize) {
    if let Some(&last) = colors.last() {
        colors.resize(target, last);
    }
}

/// Extract a palette from an already validated and downsampled working set.
///
/// Nothing is carried between calls; every run starts from `config`.
pub fn extract_palette(pixels: &[Pixel], config: &ExtractionConfig) -> Result<Palette> {
    validate_color_count(config.color_count)?;

    let seeds = select_seeds(
        pixels,
        config.mood,
        config.color_count,
        config.fallback_to_unfiltered,
    )?;
    let run = cluster::run(pixels, seeds.centroids);

    let mut colors = representatives(&run);
    let produced = colors.len();
    if produced == 0 {
        return Err(PaletteError::ExtractionFailed);
    }
    backfill(&mut colors, config.color_count);

    debug!(
        "{} palette: {produced} clustered, {} backfilled",
        config.mood,
        colors.len() - produced
    );

    Ok(Palette {
        mood: config.mood,
        colors,
        produced,
        missing: seeds.missing,
        iterations: run.iterations,
        converged: run.converged,
    })
}

/// Validated pixel set and requested palette size, reusable across moods.
#[derive(Clone, Debug)]
pub struct PaletteExtractor {
    pixels: Vec<Pixel>,
    color_count: usize,
}

impl PaletteExtractor {
    /// Fails with [`PaletteError::InvalidInput`] for fewer than 100 pixels or
    /// a color count outside `1..=10`. Oversized inputs are downsampled here.
    pub fn new(pixels: Vec<Pixel>, color_count: usize) -> Result<Self> {
        validate_color_count(color_count)?;
        validate_pixel_count(pixels.len())?;
        Ok(Self { pixels: downsample(pixels), color_count })
    }

    pub fn from_source(source: PixelSource, color_count: usize) -> Result<Self> {
        Self::new(source.pixels, color_count)
    }

    /// The working set after downsampling.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn color_count(&self) -> usize {
        self.color_count
    }

    pub fn config(&self, mood: PaletteMood) -> ExtractionConfig {
        ExtractionConfig::new(self.color_count).with_mood(mood)
    }

    pub fn extract_with(&self, config: &ExtractionConfig) -> Result<Palette> {
        extract_palette(&self.pixels, config)
    }

    pub fn extract(&self, mood: PaletteMood) -> Result<Palette> {
        self.extract_with(&self.config(mood))
    }

    pub fn default_palette(&self) -> Result<Palette> {
        self.extract(PaletteMood::Default)
    }

    pub fn muted_palette(&self) -> Result<Palette> {
        self.extract(PaletteMood::Muted)
    }

    pub fn dark_palette(&self) -> Result<Palette> {
        self.extract(PaletteMood::Dark)
    }

    pub fn bright_palette(&self) -> Result<Palette> {
        self.extract(PaletteMood::Bright)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(r: u8, g: u8, b: u8) -> Pixel {
        Pixel::new(r, g, b, 255)
    }

    #[test]
    fn backfill_repeats_last_color() {
        let mut colors = vec![px(1, 1, 1), px(2, 2, 2)];
        backfill(&mut colors, 4);
        assert_eq!(colors, vec![px(1, 1, 1), px(2, 2, 2), px(2, 2, 2), px(2, 2, 2)]);

        let mut empty: Vec<Pixel> = Vec::new();
        backfill(&mut empty, 3);
        assert!(empty.is_empty());
    }

    #[test]
    fn rejects_bad_construction() {
        assert!(matches!(
            PaletteExtractor::new(vec![px(0, 0, 0); 99], 3),
            Err(PaletteError::InvalidInput { .. })
        ));
        assert!(matches!(
            PaletteExtractor::new(vec![px(0, 0, 0); 100], 0),
            Err(PaletteError::InvalidInput { .. })
        ));
        assert!(matches!(
            PaletteExtractor::new(vec![px(0, 0, 0); 100], 11),
            Err(PaletteError::InvalidInput { .. })
        ));
    }

    #[test]
    fn strict_run_reports_insufficient_colors() {
        let extractor = PaletteExtractor::new(vec![px(10, 10, 10); 100], 2).unwrap();
        let config = extractor.config(PaletteMood::Bright).strict();
        assert!(matches!(
            extractor.extract_with(&config),
            Err(PaletteError::InsufficientColors { .. })
        ));
    }

    #[test]
    fn moods_do_not_leak_between_calls() {
        let mut pixels = vec![px(230, 40, 40); 60];
        pixels.extend(vec![px(20, 20, 70); 40]);
        let extractor = PaletteExtractor::new(pixels, 3).unwrap();

        let first = extractor.default_palette().unwrap();
        let _ = extractor.dark_palette().unwrap();
        let again = extractor.default_palette().unwrap();

        assert_eq!(first, again);
        assert_eq!(again.len(), 3);
        assert_eq!(extractor.color_count(), 3);
    }

    #[test]
    fn every_mood_fills_the_palette() {
        let mut pixels = vec![px(230, 40, 40); 40];
        pixels.extend(vec![px(20, 20, 70); 30]);
        pixels.extend(vec![px(150, 150, 140); 30]);
        let extractor = PaletteExtractor::new(pixels, 4).unwrap();

        for mood in PaletteMood::ALL {
            let palette = extractor.extract(mood).unwrap();
            assert_eq!(palette.len(), 4, "{mood}");
            assert_eq!(palette.mood, mood);
            assert_eq!(palette.produced + palette.missing, 4);
        }
    }

    #[test]
    fn dark_palette_seeds_from_dark_pixels() {
        let mut pixels = vec![px(250, 80, 80); 60];
        pixels.extend(vec![px(20, 20, 70); 40]);
        let extractor = PaletteExtractor::new(pixels, 1).unwrap();
        assert_eq!(extractor.dark_palette().unwrap().colors, vec![px(20, 20, 70)]);
        assert_eq!(extractor.default_palette().unwrap().colors, vec![px(250, 80, 80)]);
    }
}
