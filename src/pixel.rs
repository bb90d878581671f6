use palette::Srgba;

/// A single input sample: 8-bit red, green, blue and alpha.
pub type Pixel = Srgba<u8>;

/// Mean color of a cluster, kept in floating point between refinement rounds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Centroid {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Centroid {
    pub const fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self { red, green, blue, alpha }
    }

    /// Nearest 8-bit color, saturating at the channel bounds.
    pub fn to_pixel(self) -> Pixel {
        let q = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        Pixel::new(q(self.red), q(self.green), q(self.blue), q(self.alpha))
    }
}

impl From<Pixel> for Centroid {
    fn from(p: Pixel) -> Self {
        Self::new(p.red as f64, p.green as f64, p.blue as f64, p.alpha as f64)
    }
}

/// Anything that can be viewed as four RGBA channels on the 0-255 scale.
pub trait Rgba: Copy {
    fn channels(self) -> [f64; 4];
}

impl Rgba for Pixel {
    #[inline(always)]
    fn channels(self) -> [f64; 4] {
        [self.red as f64, self.green as f64, self.blue as f64, self.alpha as f64]
    }
}

impl Rgba for Centroid {
    #[inline(always)]
    fn channels(self) -> [f64; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }
}

/// Euclidean distance over all four channels, alpha included.
#[inline]
pub fn distance<A: Rgba, B: Rgba>(a: A, b: B) -> f64 {
    let a = a.channels();
    let b = b.channels();
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let samples = [
            Pixel::new(0, 0, 0, 0),
            Pixel::new(255, 255, 255, 255),
            Pixel::new(12, 200, 37, 128),
            Pixel::new(99, 1, 254, 255),
        ];
        for &a in &samples {
            assert_eq!(distance(a, a), 0.0);
            for &b in &samples {
                assert_eq!(distance(a, b), distance(b, a));
            }
        }
    }

    #[test]
    fn distance_counts_alpha() {
        let opaque = Pixel::new(10, 20, 30, 255);
        let clear = Pixel::new(10, 20, 30, 0);
        assert_eq!(distance(opaque, clear), 255.0);
    }

    #[test]
    fn distance_matches_pythagoras() {
        let a = Pixel::new(0, 0, 0, 255);
        let b = Pixel::new(3, 4, 0, 255);
        assert_eq!(distance(a, b), 5.0);
        assert_eq!(distance(Centroid::from(a), b), 5.0);
    }

    #[test]
    fn centroid_rounds_to_nearest_pixel() {
        let c = Centroid::new(10.4, 10.6, 300.0, -2.0);
        assert_eq!(c.to_pixel(), Pixel::new(10, 11, 255, 0));
    }
}
