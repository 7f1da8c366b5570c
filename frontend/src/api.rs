use crate::config::CONFIG;
use crate::models::{
    CustomTranscriptRequest, ErrorPayload, ExplainRequest, ExplainResponse, ProcessTextRequest,
    ProcessVideoRequest, TextResult, VideoResult,
};
use crate::store::{ContentAction, ContentContext, ProcessedData, ProcessingRequest, Source};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use yew::UseStateHandle;

/// Status the backend answers with when a transcript could not be fetched
/// automatically but the video itself was recognized.
const TRANSCRIPT_UNAVAILABLE: u16 = 422;

/// Failures of the explain call belong to no package and land in the
/// store's global error.
pub const EXPLAIN_SOURCE: &str = "explain_text";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to connect to backend: {0}")]
    Network(#[from] gloo_net::Error),

    #[error("Failed to parse response: {0}")]
    Parse(gloo_net::Error),

    #[error("Backend returned HTTP {status}")]
    Backend { status: u16, payload: ErrorPayload },
}

impl From<ApiError> for ErrorPayload {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Backend { payload, .. } => payload,
            other => ErrorPayload::message(other.to_string()),
        }
    }
}

/// Decodes a non-success response body. Structured bodies are kept as sent;
/// anything else is wrapped into a message with the status.
pub fn error_payload_from_body(status: u16, body: &str) -> ErrorPayload {
    match serde_json::from_str::<ErrorPayload>(body) {
        Ok(mut payload) => {
            if status == TRANSCRIPT_UNAVAILABLE && payload.video_id.is_some() {
                payload.show_fallback = true;
            }
            payload
        }
        Err(_) => ErrorPayload::message(format!("Request failed ({}): {}", status, body)),
    }
}

async fn post_json<B, T>(path: &str, body: &B) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let url = format!("{}{}", CONFIG.backend_url, path);
    let response = Request::post(&url).json(body)?.send().await?;

    if response.ok() {
        response.json::<T>().await.map_err(ApiError::Parse)
    } else {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        Err(ApiError::Backend {
            status,
            payload: error_payload_from_body(status, &text),
        })
    }
}

pub async fn process_video(video_url: &str) -> Result<VideoResult, ApiError> {
    let request = ProcessVideoRequest {
        video_url: video_url.to_string(),
    };
    post_json("/api/process_video", &request).await
}

pub async fn process_custom_transcript(
    request: &CustomTranscriptRequest,
) -> Result<VideoResult, ApiError> {
    post_json("/api/process_video_with_custom_transcript", request).await
}

pub async fn process_text(request: &ProcessTextRequest) -> Result<TextResult, ApiError> {
    post_json("/api/process_text", request).await
}

pub async fn explain_text(request: &ExplainRequest) -> Result<ExplainResponse, ApiError> {
    post_json("/api/explain_text", request).await
}

pub fn explain_failure(error: ApiError) -> ContentAction {
    ContentAction::SetProcessingError(Source::from(EXPLAIN_SOURCE), error.into())
}

fn settle<T>(
    store: &ContentContext,
    source: Source,
    result: Result<T, ApiError>,
    wrap: impl FnOnce(T) -> ProcessedData,
) {
    let action = match result {
        Ok(data) => ContentAction::SetProcessedData(wrap(data)),
        Err(e) => {
            log::error!("{source:?} request failed: {e}");
            ContentAction::SetProcessingError(source, e.into())
        }
    };
    store.dispatch(action);
}

pub fn submit_video(store: ContentContext, video_url: String) {
    store.dispatch(ContentAction::StartProcessing(ProcessingRequest::Video {
        url: video_url.clone(),
    }));

    wasm_bindgen_futures::spawn_local(async move {
        let result = process_video(&video_url).await;
        settle(&store, Source::YoutubeVideo, result, ProcessedData::Video);
    });
}

pub fn submit_text(store: ContentContext, title: String, text: String) {
    store.dispatch(ContentAction::StartProcessing(ProcessingRequest::Text {
        title: title.clone(),
        text: text.clone(),
    }));

    wasm_bindgen_futures::spawn_local(async move {
        let result = process_text(&ProcessTextRequest { title, text }).await;
        settle(&store, Source::CustomText, result, ProcessedData::Text);
    });
}

pub fn submit_fallback_transcript(store: ContentContext, request: CustomTranscriptRequest) {
    store.dispatch(ContentAction::StartProcessingFallbackTranscript);

    wasm_bindgen_futures::spawn_local(async move {
        let result = process_custom_transcript(&request).await;
        settle(&store, Source::YoutubeVideo, result, ProcessedData::Video);
    });
}

/// Asks the backend to explain a passage. The answer goes into local
/// component state; only a failure reaches the store.
pub fn submit_explanation(
    store: ContentContext,
    selected_text: String,
    current_video_id: Option<String>,
    explanation: UseStateHandle<Option<String>>,
    loading: UseStateHandle<bool>,
) {
    let selected_text = selected_text.trim().to_string();
    if selected_text.is_empty() {
        log::warn!("Explain requested without any text");
        return;
    }

    loading.set(true);
    explanation.set(None);

    wasm_bindgen_futures::spawn_local(async move {
        let request = ExplainRequest {
            selected_text,
            current_video_id,
        };
        match explain_text(&request).await {
            Ok(response) => {
                log::debug!("Explanation received for {:?}", response.original_text);
                explanation.set(Some(response.explanation));
            }
            Err(e) => {
                log::error!("Explain request failed: {e}");
                store.dispatch(explain_failure(e));
            }
        }
        loading.set(false);
    });
}
