use serde::Serialize;
use brief_core::{SliderRange, Summarizer, MAX_LENGTH_SLIDER, MIN_LENGTH_SLIDER};

pub const INDEX_HTML: &str = include_str!("assets/index.html");

pub const APP_TITLE: &str = "Text Summarizer";

pub const SAMPLE_TEXT: &str = "Apollo 11 was the American spaceflight that first landed humans on the Moon. \
Commander Neil Armstrong and lunar module pilot Buzz Aldrin landed the Apollo Lunar Module Eagle on July 20, 1969. \
Armstrong became the first person to step onto the lunar surface six hours and 39 minutes later on July 21 at 02:56 UTC; \
Aldrin joined him 19 minutes later. They spent about two and a quarter hours together outside the spacecraft, \
and they collected 47.5 pounds (21.5 kg) of lunar material to bring back to Earth. \
Michael Collins flew the Command Module Columbia alone in lunar orbit while they were on the Moon's surface. \
Armstrong and Aldrin spent 21 hours, 36 minutes on the lunar surface before lifting off to rejoin Columbia.";

/// Everything the page needs to lay itself out, fetched once on load.
#[derive(Debug, Clone, Serialize)]
pub struct UiConfig {
    pub title: String,
    pub description: String,
    pub model: String,
    pub device: String,
    pub sample_text: String,
    pub min_length: SliderRange,
    pub max_length: SliderRange,
}

impl UiConfig {
    pub fn for_model(summarizer: &dyn Summarizer) -> Self {
        Self {
            title: format!("{} using {}", APP_TITLE, summarizer.name()),
            description: format!("Summarize text using the {} model.", summarizer.name()),
            model: summarizer.name().to_string(),
            device: summarizer.device().to_string(),
            sample_text: SAMPLE_TEXT.to_string(),
            min_length: MIN_LENGTH_SLIDER,
            max_length: MAX_LENGTH_SLIDER,
        }
    }
}
