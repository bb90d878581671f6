use thiserror::Error;

use crate::mood::PaletteMood;

/// Errors raised while validating input or extracting a palette.
#[derive(Debug, Error)]
pub enum PaletteError {
    /// Construction-time rejection: too few pixels or a color count outside `1..=10`.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// No pixel survived the mood filter, so no seed could be chosen.
    #[error("no pixels qualify as seeds for the {mood} palette")]
    InsufficientColors { mood: PaletteMood },

    #[error("could not extract any colors from these pixels")]
    ExtractionFailed,

    #[error("unknown palette mood: {0:?}")]
    UnknownMood(String),

    #[error("unable to decode image: {0}")]
    ImageLoad(#[from] image::ImageError),
}

impl PaletteError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput { reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, PaletteError>;
