use clap::{Parser, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use color_palette_extractor::{
    render_swatches, to_hex, ColorRecord, ExtractionConfig, Palette, PaletteExtractor,
    PaletteMood, PixelSource,
};
use anyhow::Context;
use anyhow::Result;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MoodArg {
    Default,
    Bright,
    Dark,
    Muted,
    /// Every mood, one palette each
    All,
}

impl MoodArg {
    fn moods(self) -> Vec<PaletteMood> {
        match self {
            MoodArg::Default => vec![PaletteMood::Default],
            MoodArg::Bright => vec![PaletteMood::Bright],
            MoodArg::Dark => vec![PaletteMood::Dark],
            MoodArg::Muted => vec![PaletteMood::Muted],
            MoodArg::All => PaletteMood::ALL.to_vec(),
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Hex,
    Json,
}

/// Extract dominant color palettes from images.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Number of colors in the palette (1-10)
    #[arg(short = 'k', long, default_value_t = 5)]
    colors: usize,

    /// Palette mood used to pick seed colors
    #[arg(short, long, value_enum, default_value_t = MoodArg::Default)]
    mood: MoodArg,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Hex)]
    format: Format,

    /// Fail instead of seeding from all pixels when no pixel fits the mood
    #[arg(long)]
    strict: bool,

    /// Write a PNG strip of color swatches (suffixed per input and mood when ambiguous)
    #[arg(long)]
    swatch: Option<PathBuf>,

    /// Edge length of each swatch square in px
    #[arg(long, default_value_t = 100)]
    swatch_size: u32,
}

fn swatch_path(base: &Path, input: &Path, mood: PaletteMood, many: bool) -> PathBuf {
    if !many {
        return base.to_path_buf();
    }
    let stem = base.file_stem().unwrap_or_default().to_string_lossy();
    let input_stem = input.file_stem().unwrap_or_default().to_string_lossy();
    base.with_file_name(format!("{stem}_{input_stem}_{mood}.png"))
}

fn print_palette(input: &Path, palette: &Palette, format: Format) -> Result<()> {
    match format {
        Format::Hex => {
            let hex: Vec<String> = palette.iter().map(|&c| to_hex(c)).collect();
            println!("{} [{}] {}", input.display(), palette.mood, hex.join(" "));
        }
        Format::Json => {
            let records: Vec<ColorRecord> = palette.iter().map(|&c| c.into()).collect();
            let value = serde_json::json!({
                "input": input.display().to_string(),
                "mood": palette.mood.to_string(),
                "colors": records,
            });
            println!("{}", serde_json::to_string(&value)?);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let moods = args.mood.moods();
    let many = args.inputs.len() > 1 || moods.len() > 1;

    for input in &args.inputs {
        let source = PixelSource::open(input)
            .with_context(|| format!("loading {}", input.display()))?;
        log::info!("{}: {}x{} pixels", input.display(), source.width, source.height);

        let extractor = PaletteExtractor::from_source(source, args.colors)
            .context("palette extraction setup failed")?;

        for &mood in &moods {
            let mut config = ExtractionConfig::new(args.colors).with_mood(mood);
            if args.strict {
                config = config.strict();
            }
            let palette = extractor
                .extract_with(&config)
                .with_context(|| format!("{mood} palette extraction failed"))?;
            print_palette(input, &palette, args.format)?;

            if let Some(base) = &args.swatch {
                let out_path = swatch_path(base, input, mood, many);
                if let Some(parent) = out_path.parent() {
                    fs::create_dir_all(parent)?;
                }
                render_swatches(&palette.colors, args.swatch_size)
                    .save(&out_path)
                    .with_context(|| format!("writing {}", out_path.display()))?;
                log::info!("Saved → {}", out_path.display());
            }
        }
    }

    Ok(())
}
