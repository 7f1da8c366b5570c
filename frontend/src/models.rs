use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field decoders that never reject a payload. The backend passes LLM output
/// through untouched, so `null`s and off-type values have to degrade to
/// defaults instead of failing the whole response.
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(text_of(Value::deserialize(deserializer)?))
    }

    pub fn optional_string<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => None,
            other => Some(text_of(other)),
        })
    }

    pub fn seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(seconds_of(&Value::deserialize(deserializer)?))
    }

    /// Keeps the entries that decode and drops the rest.
    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
            _ => Vec::new(),
        })
    }

    fn text_of(value: Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(s) => s,
            other => other.to_string(),
        }
    }

    fn seconds_of(value: &Value) -> f64 {
        match value {
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            Value::String(s) => parse_clock(s).unwrap_or(0.0),
            _ => 0.0,
        }
    }

    // "90", "01:30" and "1:01:30" are all accepted
    fn parse_clock(s: &str) -> Option<f64> {
        s.trim()
            .split(':')
            .try_fold(0.0, |acc, part| {
                part.trim().parse::<f64>().ok().map(|p| acc * 60.0 + p)
            })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default, deserialize_with = "lenient::string")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient::seconds")]
    pub start: f64,
    #[serde(default, deserialize_with = "lenient::seconds")]
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TocEntry {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::seconds")]
    pub timestamp_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KeyTerm {
    #[serde(default, deserialize_with = "lenient::string")]
    pub term: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub definition: String,
}

/// Rendering-side reading of the analysis object. The store keeps the raw
/// JSON; this is decoded from it on demand.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(default, deserialize_with = "lenient::list")]
    pub table_of_contents: Vec<TocEntry>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub key_terms: Vec<KeyTerm>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub logical_flow: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub summary: String,
}

impl Analysis {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value.clone()).unwrap_or_default(),
            // a bare string is treated as the summary
            Value::String(summary) => Self {
                summary: summary.clone(),
                ..Self::default()
            },
            _ => Self::default(),
        }
    }
}

/// Success body of `/api/process_video` and the custom transcript endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VideoResult {
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub video_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub video_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub transcript_text: String,
    #[serde(default, deserialize_with = "lenient::list")]
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub analysis: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextResult {
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub original_text: String,
    #[serde(default)]
    pub analysis: Option<Value>,
}

/// Error body returned by the backend, optionally carrying the hints needed
/// to offer a manual transcript paste.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorPayload {
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub details: Option<String>,
    #[serde(default, alias = "showFallback")]
    pub show_fallback: bool,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub video_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub video_url: Option<String>,
}

impl ErrorPayload {
    pub fn message(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessVideoRequest {
    pub video_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CustomTranscriptRequest {
    pub video_id: String,
    pub video_url: String,
    pub custom_transcript_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessTextRequest {
    pub title: String,
    pub text: String,
}

/// Body of `/api/explain_text`; the video id only gives the backend context.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExplainRequest {
    pub selected_text: String,
    pub current_video_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExplainResponse {
    #[serde(default, deserialize_with = "lenient::string")]
    pub explanation: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub original_text: String,
}
