use wasm_bindgen::prelude::*;
use js_sys::{Array, Object, Reflect};

pub mod cluster;
pub mod error;
pub mod extractor;
pub mod mood;
pub mod pixel;
pub mod sampling;
pub mod seed;
pub mod source;
pub mod swatch;

pub use error::{PaletteError, Result};
pub use extractor::{extract_palette, ExtractionConfig, Palette, PaletteExtractor};
pub use mood::{PaletteMood, MoodWindow};
pub use pixel::{distance, Centroid, Pixel};
pub use source::PixelSource;
pub use swatch::{render_swatches, to_hex, ColorRecord};

// ------------------------------------------------------------
// JavaScript bindings
// ------------------------------------------------------------

fn js_err(e: PaletteError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_mood(mood: Option<String>) -> std::result::Result<PaletteMood, JsValue> {
    match mood {
        Some(name) => name.parse().map_err(js_err),
        None => Ok(PaletteMood::Default),
    }
}

/// Convert a palette into `[{ red, green, blue, alpha }, ...]`.
fn palette_to_js(palette: &Palette) -> std::result::Result<Array, JsValue> {
    let out = Array::new();
    for color in palette {
        let obj = Object::new();
        Reflect::set(&obj, &JsValue::from_str("red"), &JsValue::from(color.red))?;
        Reflect::set(&obj, &JsValue::from_str("green"), &JsValue::from(color.green))?;
        Reflect::set(&obj, &JsValue::from_str("blue"), &JsValue::from(color.blue))?;
        Reflect::set(&obj, &JsValue::from_str("alpha"), &JsValue::from(color.alpha))?;
        out.push(&obj);
    }
    Ok(out)
}

/// Extract a palette from raw RGBA8 bytes, e.g. canvas `ImageData.data`.
///
/// `mood` is one of `default`, `bright`, `dark` or `muted`; omitted means
/// `default`. The returned array always holds `n_colors` entries.
#[wasm_bindgen(js_name = extractPalette)]
pub fn extract_palette_js(
    rgba: Vec<u8>,
    n_colors: usize,
    mood: Option<String>,
) -> std::result::Result<Array, JsValue> {
    let mood = parse_mood(mood)?;
    let extractor =
        PaletteExtractor::new(source::pixels_from_rgba(&rgba), n_colors).map_err(js_err)?;
    let palette = extractor.extract(mood).map_err(js_err)?;
    palette_to_js(&palette)
}

/// Decode an encoded image (PNG, JPEG, ...) and extract its palette.
#[wasm_bindgen(js_name = extractPaletteFromImage)]
pub fn extract_palette_from_image_js(
    input: Vec<u8>,
    n_colors: usize,
    mood: Option<String>,
) -> std::result::Result<Array, JsValue> {
    let mood = parse_mood(mood)?;
    let source = PixelSource::from_bytes(&input).map_err(js_err)?;
    let extractor = PaletteExtractor::from_source(source, n_colors).map_err(js_err)?;
    let palette = extractor.extract(mood).map_err(js_err)?;
    palette_to_js(&palette)
}

/// Reusable extractor for JavaScript callers that want several moods from
/// one pixel set.
#[wasm_bindgen(js_name = PaletteExtractor)]
pub struct JsPaletteExtractor {
    inner: PaletteExtractor,
}

#[wasm_bindgen(js_class = PaletteExtractor)]
impl JsPaletteExtractor {
    #[wasm_bindgen(constructor)]
    pub fn new(rgba: Vec<u8>, n_colors: usize) -> std::result::Result<JsPaletteExtractor, JsValue> {
        let inner =
            PaletteExtractor::new(source::pixels_from_rgba(&rgba), n_colors).map_err(js_err)?;
        Ok(Self { inner })
    }

    #[wasm_bindgen(js_name = getColorPalette)]
    pub fn color_palette(&self) -> std::result::Result<Array, JsValue> {
        palette_to_js(&self.inner.default_palette().map_err(js_err)?)
    }

    #[wasm_bindgen(js_name = getMutedPalette)]
    pub fn muted_palette(&self) -> std::result::Result<Array, JsValue> {
        palette_to_js(&self.inner.muted_palette().map_err(js_err)?)
    }

    #[wasm_bindgen(js_name = getDarkPalette)]
    pub fn dark_palette(&self) -> std::result::Result<Array, JsValue> {
        palette_to_js(&self.inner.dark_palette().map_err(js_err)?)
    }

    #[wasm_bindgen(js_name = getBrightPalette)]
    pub fn bright_palette(&self) -> std::result::Result<Array, JsValue> {
        palette_to_js(&self.inner.bright_palette().map_err(js_err)?)
    }

    /// Working pixels after downsampling, flattened back to RGBA8.
    #[wasm_bindgen(js_name = getRgbaValues)]
    pub fn rgba_values(&self) -> Vec<u8> {
        self.inner
            .pixels()
            .iter()
            .flat_map(|p| [p.red, p.green, p.blue, p.alpha])
            .collect()
    }
}

// ------------------------------------------------------------
// Native helpers
// ------------------------------------------------------------

/// Decode an image and return its palette as `RRGGBB` strings.
#[cfg(not(target_arch = "wasm32"))]
pub fn extract_palette_bytes(
    input: &[u8],
    n_colors: usize,
    mood: PaletteMood,
) -> Result<Vec<String>> {
    let source = PixelSource::from_bytes(input)?;
    let extractor = PaletteExtractor::from_source(source, n_colors)?;
    let palette = extractor.extract(mood)?;
    Ok(palette.iter().map(|&c| to_hex(c)).collect())
}
