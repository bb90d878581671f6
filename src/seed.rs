//! Initial centroid selection from the most frequent color groups.

use log::debug;

use crate::error::{PaletteError, Result};
use crate::mood::PaletteMood;
use crate::pixel::{distance, Centroid, Pixel};

/// Pixels closer than this to a bucket's representative count towards it.
pub const SEED_GROUP_THRESHOLD: f64 = 50.0;

/// A representative color and how many seed candidates fell near it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrequencyBucket {
    pub pixel: Pixel,
    pub count: usize,
}

/// Group the candidates accepted by `accept` into frequency buckets, most
/// frequent first. Equal counts keep first-seen order.
///
/// A candidate near several representatives counts towards every one of
/// them; it only opens a new bucket when no representative is within
/// [`SEED_GROUP_THRESHOLD`].
pub fn frequency_buckets<F>(pixels: &[Pixel], accept: F) -> Vec<FrequencyBucket>
where
    F: Fn(Pixel) -> bool,
{
    let mut buckets: Vec<FrequencyBucket> = Vec::new();

    for &pixel in pixels.iter().filter(|&&p| accept(p)) {
        let mut grouped = false;
        for bucket in buckets.iter_mut() {
            if distance(pixel, bucket.pixel) < SEED_GROUP_THRESHOLD {
                bucket.count += 1;
                grouped = true;
            }
        }
        if !grouped {
            buckets.push(FrequencyBucket { pixel, count: 1 });
        }
    }

    // `sort_by` is stable, which keeps insertion order among ties.
    buckets.sort_by(|a, b| b.count.cmp(&a.count));
    buckets
}

/// Starting centroids for a run, plus how many requested slots had no seed.
#[derive(Clone, Debug, PartialEq)]
pub struct Seeds {
    pub centroids: Vec<Centroid>,
    pub missing: usize,
}

/// Pick up to `color_count` seeds from the buckets of mood-accepted pixels.
///
/// When the mood admits nothing and `fallback_to_unfiltered` is set, the
/// buckets are rebuilt from the whole working set instead.
pub fn select_seeds(
    pixels: &[Pixel],
    mood: PaletteMood,
    color_count: usize,
    fallback_to_unfiltered: bool,
) -> Result<Seeds> {
    let window = mood.window();
    let mut buckets = frequency_buckets(pixels, |p| window.accepts(p));

    if buckets.is_empty() && fallback_to_unfiltered {
        debug!("{mood} filter admitted no pixels, seeding from the unfiltered set");
        buckets = frequency_buckets(pixels, |_| true);
    }
    debug!("{} seed buckets for the {mood} palette", buckets.len());
    if buckets.is_empty() {
        return Err(PaletteError::InsufficientColors { mood });
    }

    let available = buckets.len().min(color_count);
    let missing = color_count - available;
    if missing > 0 {
        debug!("only {available} seed groups for {color_count} requested colors");
    }

    let centroids = buckets
        .iter()
        .take(available)
        .map(|b| Centroid::from(b.pixel))
        .collect();

    Ok(Seeds { centroids, missing })
}
