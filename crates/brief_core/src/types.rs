use serde::{Deserialize, Serialize};
use crate::{Error, Result};

/// Inputs shorter than this many characters are rejected before they reach
/// the model.
pub const MIN_INPUT_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SliderRange {
    pub min: usize,
    pub max: usize,
    pub step: usize,
    pub default: usize,
}

impl SliderRange {
    pub fn clamp(&self, value: usize) -> usize {
        value.clamp(self.min, self.max)
    }
}

pub const MAX_LENGTH_SLIDER: SliderRange = SliderRange {
    min: 50,
    max: 300,
    step: 10,
    default: 150,
};

pub const MIN_LENGTH_SLIDER: SliderRange = SliderRange {
    min: 10,
    max: 100,
    step: 5,
    default: 30,
};

/// Token length bounds for one generated summary. `min_length` never
/// exceeds `max_length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    min_length: usize,
    max_length: usize,
}

impl LengthBounds {
    /// Builds bounds as given, pulling `min_length` down to `max_length`
    /// when the two are crossed.
    pub fn new(min_length: usize, max_length: usize) -> Self {
        if min_length > max_length {
            tracing::warn!(
                "min_length {} exceeds max_length {}, clamping min_length",
                min_length,
                max_length
            );
            return Self { min_length: max_length, max_length };
        }
        Self { min_length, max_length }
    }

    /// Bounds as the sliders would produce them: each value clamped into
    /// its slider range, missing values replaced by the slider default.
    pub fn from_sliders(min_length: Option<usize>, max_length: Option<usize>) -> Self {
        let min_length = MIN_LENGTH_SLIDER.clamp(min_length.unwrap_or(MIN_LENGTH_SLIDER.default));
        let max_length = MAX_LENGTH_SLIDER.clamp(max_length.unwrap_or(MAX_LENGTH_SLIDER.default));
        Self::new(min_length, max_length)
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

impl Default for LengthBounds {
    fn default() -> Self {
        Self::from_sliders(None, None)
    }
}

/// Rejects input the model should never see: blank text and text too short
/// to be worth summarizing.
pub fn validate_input(text: &str) -> Result<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("Please enter some text to summarize.".to_string()));
    }
    if text.chars().count() < MIN_INPUT_CHARS {
        return Err(Error::InvalidInput(
            "Input text is too short. Please provide a longer paragraph.".to_string(),
        ));
    }
    Ok(trimmed)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub text: String,
    #[serde(default)]
    pub min_length: Option<usize>,
    #[serde(default)]
    pub max_length: Option<usize>,
}

impl SummaryRequest {
    pub fn bounds(&self) -> LengthBounds {
        LengthBounds::from_sliders(self.min_length, self.max_length)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
    pub model: String,
}
