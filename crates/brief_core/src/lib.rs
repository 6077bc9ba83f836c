pub mod error;
pub mod models;
pub mod types;

pub use error::{Error, Result};
pub use models::Summarizer;
pub use types::{
    validate_input, LengthBounds, SliderRange, SummaryRequest, SummaryResponse,
    MAX_LENGTH_SLIDER, MIN_INPUT_CHARS, MIN_LENGTH_SLIDER,
};
