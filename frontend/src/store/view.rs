use super::{ContentStore, ErrorRecord, Mode};
use crate::models::Segment;
use serde_json::Value;

/// Flattened projection of the active package, shaped for the notebook pages
/// and the player.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NotebookView {
    pub raw_transcript_text: String,
    pub transcript_segments: Vec<Segment>,
    pub analysis_for_overview: Option<Value>,
    pub current_title: String,
    pub is_loading: bool,
    pub error: Option<ErrorRecord>,
    pub show_transcript_paste_fallback: bool,
    pub current_video_id_for_fallback: Option<String>,
    pub current_video_url_for_fallback: Option<String>,
    pub video_id_for_player: Option<String>,
}

impl NotebookView {
    pub fn derive(store: &ContentStore) -> Self {
        let video = store.video();
        let global_error = store.global_error().cloned();

        let mut view = match store.active_mode() {
            Mode::Video => Self {
                raw_transcript_text: video.transcript_text.clone(),
                transcript_segments: video.segments.clone(),
                analysis_for_overview: video.analysis.clone(),
                current_title: video.title.clone(),
                is_loading: video.loading,
                error: video.error.clone(),
                show_transcript_paste_fallback: video.show_fallback,
                video_id_for_player: video.video_id.clone(),
                ..Self::default()
            },
            Mode::Text => {
                let text = store.text();
                Self {
                    raw_transcript_text: text.original_text.clone(),
                    analysis_for_overview: text.analysis.clone(),
                    current_title: text.title.clone(),
                    is_loading: text.loading,
                    error: text.error.clone(),
                    ..Self::default()
                }
            }
        };

        view.is_loading |= store.global_loading();
        view.error = view.error.or(global_error);
        view.current_video_id_for_fallback = video.video_id.clone();
        view.current_video_url_for_fallback = video.video_url.clone();
        view
    }
}

/// Keeps the last derived view and rebuilds it only when the store revision
/// moves.
#[derive(Debug, Default)]
pub struct ViewCache {
    revision: Option<u64>,
    view: NotebookView,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, store: &ContentStore) -> &NotebookView {
        if self.revision != Some(store.revision()) {
            self.view = store.view();
            self.revision = Some(store.revision());
        }
        &self.view
    }
}
