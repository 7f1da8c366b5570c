use crate::models::{ErrorPayload, Segment, TextResult, VideoResult};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Video,
    Text,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown mode: {0:?} (expected \"video\" or \"text\")")]
pub struct ModeParseError(pub String);

impl FromStr for Mode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "video" | "youtube" => Ok(Mode::Video),
            "text" => Ok(Mode::Text),
            other => Err(ModeParseError(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Video => write!(f, "video"),
            Mode::Text => write!(f, "text"),
        }
    }
}

/// Where a result or failure came from, as reported by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    YoutubeVideo,
    CustomText,
    Unknown(String),
}

impl From<&str> for Source {
    fn from(value: &str) -> Self {
        match value {
            "youtube_video" => Source::YoutubeVideo,
            "custom_text" => Source::CustomText,
            other => Source::Unknown(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub message: String,
    pub details: String,
}

impl From<&ErrorPayload> for ErrorRecord {
    fn from(payload: &ErrorPayload) -> Self {
        Self {
            message: payload
                .error
                .clone()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string()),
            details: payload.details.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct VideoPackage {
    pub video_id: Option<String>,
    pub video_url: Option<String>,
    pub title: String,
    pub transcript_text: String,
    pub segments: Vec<Segment>,
    pub analysis: Option<Value>,
    pub loading: bool,
    pub error: Option<ErrorRecord>,
    pub show_fallback: bool,
}

impl VideoPackage {
    pub fn loading_for(video_url: String) -> Self {
        Self {
            video_url: Some(video_url),
            loading: true,
            ..Self::default()
        }
    }
}

impl From<VideoResult> for VideoPackage {
    fn from(result: VideoResult) -> Self {
        Self {
            video_id: result.video_id,
            video_url: result.video_url,
            title: result.title,
            transcript_text: result.transcript_text,
            segments: result.segments,
            analysis: result.analysis,
            loading: false,
            error: None,
            show_fallback: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextPackage {
    pub id: Option<String>,
    pub title: String,
    pub original_text: String,
    pub analysis: Option<Value>,
    pub loading: bool,
    pub error: Option<ErrorRecord>,
}

impl TextPackage {
    pub fn loading_for(title: String, original_text: String) -> Self {
        Self {
            title,
            original_text,
            loading: true,
            ..Self::default()
        }
    }
}

impl From<TextResult> for TextPackage {
    fn from(result: TextResult) -> Self {
        Self {
            id: result.id,
            title: result.title,
            original_text: result.original_text,
            analysis: result.analysis,
            loading: false,
            error: None,
        }
    }
}

/// Borrow of whichever package the current mode selects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivePackage<'a> {
    Video(&'a VideoPackage),
    Text(&'a TextPackage),
}
