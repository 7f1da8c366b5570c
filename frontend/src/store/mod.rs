mod package;
mod reducer;
mod view;

pub use package::{
    ActivePackage, ErrorRecord, Mode, ModeParseError, Source, TextPackage, VideoPackage,
};
pub use reducer::{ContentAction, ContentContext};
pub use view::{NotebookView, ViewCache};

use crate::models::{ErrorPayload, TextResult, VideoResult};
use log::{debug, error, warn};

/// Input that kicks off a new processing run.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingRequest {
    Video { url: String },
    Text { title: String, text: String },
}

/// A successful result, tagged by the package it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessedData {
    Video(VideoResult),
    Text(TextResult),
}

/// Session state shared by the notebook views: one package per mode plus the
/// mode flag selecting which of them is shown.
///
/// Every mutation that actually changes something bumps `revision`, which
/// lets [`ViewCache`] skip re-deriving the notebook view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentStore {
    active_mode: Mode,
    video: VideoPackage,
    text: TextPackage,
    global_loading: bool,
    global_error: Option<ErrorRecord>,
    revision: u64,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_mode(&self) -> Mode {
        self.active_mode
    }

    pub fn video(&self) -> &VideoPackage {
        &self.video
    }

    pub fn text(&self) -> &TextPackage {
        &self.text
    }

    pub fn global_loading(&self) -> bool {
        self.global_loading
    }

    pub fn global_error(&self) -> Option<&ErrorRecord> {
        self.global_error.as_ref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn active_package(&self) -> ActivePackage<'_> {
        match self.active_mode {
            Mode::Video => ActivePackage::Video(&self.video),
            Mode::Text => ActivePackage::Text(&self.text),
        }
    }

    pub fn view(&self) -> NotebookView {
        NotebookView::derive(self)
    }

    /// Switches mode from its string name. Unknown names leave the store
    /// untouched.
    pub fn set_active_mode(&mut self, mode: &str) -> Result<(), ModeParseError> {
        let mode = mode.parse::<Mode>()?;
        self.switch_mode(mode);
        Ok(())
    }

    pub fn switch_mode(&mut self, mode: Mode) {
        debug!("Switching active mode to {mode}");
        self.active_mode = mode;
        // stale once the user looks at the other package
        self.global_loading = false;
        self.global_error = None;
        self.touch();
    }

    pub fn start_processing(&mut self, request: ProcessingRequest) {
        match request {
            ProcessingRequest::Video { url } => {
                debug!("Start processing video: {url}");
                self.active_mode = Mode::Video;
                self.video = VideoPackage::loading_for(url);
                self.text.loading = false;
                self.text.error = None;
            }
            ProcessingRequest::Text { title, text } => {
                debug!("Start processing text: {title:?} ({} chars)", text.len());
                self.active_mode = Mode::Text;
                self.text = TextPackage::loading_for(title, text);
                self.video.loading = false;
                self.video.error = None;
                self.video.show_fallback = false;
            }
        }
        self.global_loading = true;
        self.global_error = None;
        self.touch();
    }

    /// Marks the pasted-transcript submission as in flight. The fallback form
    /// stays visible until a result arrives.
    pub fn start_processing_fallback_transcript(&mut self) {
        debug!("Start processing fallback transcript");
        self.active_mode = Mode::Video;
        self.video.loading = true;
        self.video.error = None;
        self.video.show_fallback = true;
        self.touch();
    }

    pub fn set_processed_data(&mut self, data: ProcessedData) {
        self.global_loading = false;
        match data {
            ProcessedData::Video(result) => {
                debug!(
                    "Video processed: {:?} ({} segments)",
                    result.video_id,
                    result.segments.len()
                );
                self.video = result.into();
            }
            ProcessedData::Text(result) => {
                debug!("Text processed: {:?}", result.id);
                self.text = result.into();
            }
        }
        self.touch();
    }

    pub fn set_processing_error(&mut self, source: Source, payload: ErrorPayload) {
        error!("Processing failed for {source:?}: {payload:?}");
        self.global_loading = false;
        let record = ErrorRecord::from(&payload);

        match source {
            Source::YoutubeVideo => {
                self.video.loading = false;
                self.video.error = Some(record);
                if payload.show_fallback && payload.video_id.is_some() {
                    self.video.show_fallback = true;
                    self.video.video_id = payload.video_id;
                    self.video.video_url = payload.video_url;
                }
            }
            Source::CustomText => {
                self.text.loading = false;
                self.text.error = Some(record);
            }
            Source::Unknown(name) => {
                warn!("Error from unrecognized source {name:?} stored globally");
                self.global_error = Some(record);
            }
        }
        self.touch();
    }

    pub fn clear_fallback(&mut self) {
        self.video.show_fallback = false;
        self.touch();
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Segment;
    use serde_json::json;

    fn video_result(video_id: &str, title: &str) -> VideoResult {
        VideoResult {
            video_id: Some(video_id.to_string()),
            video_url: Some(format!("https://youtu.be/{video_id}")),
            title: title.to_string(),
            transcript_text: "hello world".to_string(),
            segments: vec![Segment {
                text: "hello world".to_string(),
                start: 0.0,
                duration: 2.5,
            }],
            analysis: Some(json!({ "summary": "greeting", "key_terms": [] })),
        }
    }

    #[test]
    fn new_store_starts_empty_in_video_mode() {
        let store = ContentStore::new();
        assert_eq!(store.active_mode(), Mode::Video);
        assert_eq!(store.video(), &VideoPackage::default());
        assert_eq!(store.text(), &TextPackage::default());
        assert!(!store.global_loading());
        assert!(store.global_error().is_none());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn invalid_mode_is_a_no_op() {
        let mut store = ContentStore::new();
        store.start_processing(ProcessingRequest::Text {
            title: "Notes".to_string(),
            text: "body".to_string(),
        });
        let before = store.clone();

        assert!(store.set_active_mode("audio").is_err());
        assert_eq!(store, before);
    }

    #[test]
    fn valid_mode_switch_clears_global_status() {
        let mut store = ContentStore::new();
        store.start_processing(ProcessingRequest::Video {
            url: "u1".to_string(),
        });
        store.set_processing_error(Source::from("other"), ErrorPayload::message("x"));
        store.global_loading = true;

        store.set_active_mode("text").unwrap();

        assert_eq!(store.active_mode(), Mode::Text);
        assert!(!store.global_loading());
        assert!(store.global_error().is_none());
    }

    #[test]
    fn start_video_resets_package_and_quiets_text() {
        let mut store = ContentStore::new();
        store.start_processing(ProcessingRequest::Text {
            title: "Notes".to_string(),
            text: "body".to_string(),
        });
        store.set_processing_error(Source::CustomText, ErrorPayload::message("bad"));
        store.set_processed_data(ProcessedData::Video(video_result("old", "Old")));
        store.text.loading = true;

        store.start_processing(ProcessingRequest::Video {
            url: "u1".to_string(),
        });

        assert_eq!(store.active_mode(), Mode::Video);
        assert_eq!(
            store.video(),
            &VideoPackage {
                video_url: Some("u1".to_string()),
                loading: true,
                ..VideoPackage::default()
            }
        );
        assert!(!store.text().loading);
        assert!(store.text().error.is_none());
        assert_eq!(store.text().original_text, "body");
        assert!(store.global_loading());
    }

    #[test]
    fn start_text_resets_package_and_hides_fallback() {
        let mut store = ContentStore::new();
        store.start_processing(ProcessingRequest::Video {
            url: "u1".to_string(),
        });
        store.set_processing_error(
            Source::YoutubeVideo,
            ErrorPayload {
                error: Some("no transcript".to_string()),
                show_fallback: true,
                video_id: Some("v1".to_string()),
                video_url: Some("u1".to_string()),
                ..ErrorPayload::default()
            },
        );

        store.start_processing(ProcessingRequest::Text {
            title: "Notes".to_string(),
            text: "body".to_string(),
        });

        assert_eq!(store.active_mode(), Mode::Text);
        assert_eq!(
            store.text(),
            &TextPackage {
                title: "Notes".to_string(),
                original_text: "body".to_string(),
                loading: true,
                ..TextPackage::default()
            }
        );
        assert!(!store.video().loading);
        assert!(store.video().error.is_none());
        assert!(!store.video().show_fallback);
        assert_eq!(store.video().video_id.as_deref(), Some("v1"));
    }

    #[test]
    fn processed_video_replaces_package_wholesale() {
        let mut store = ContentStore::new();
        store.start_processing(ProcessingRequest::Video {
            url: "u1".to_string(),
        });
        let result = video_result("v1", "Title");

        store.set_processed_data(ProcessedData::Video(result.clone()));

        let video = store.video();
        assert_eq!(video.video_id, result.video_id);
        assert_eq!(video.video_url, result.video_url);
        assert_eq!(video.title, result.title);
        assert_eq!(video.transcript_text, result.transcript_text);
        assert_eq!(video.segments, result.segments);
        assert_eq!(video.analysis, result.analysis);
        assert!(!video.loading);
        assert!(video.error.is_none());
        assert!(!store.global_loading());
    }

    #[test]
    fn processed_video_without_segments_gets_empty_list() {
        let mut store = ContentStore::new();
        let result: VideoResult =
            serde_json::from_value(json!({ "video_id": "v1", "title": "T" })).unwrap();

        store.set_processed_data(ProcessedData::Video(result));

        assert!(store.video().segments.is_empty());
        assert!(store.video().video_url.is_none());
    }

    #[test]
    fn processed_text_replaces_package_wholesale() {
        let mut store = ContentStore::new();
        store.start_processing(ProcessingRequest::Text {
            title: "Draft".to_string(),
            text: "body".to_string(),
        });

        store.set_processed_data(ProcessedData::Text(TextResult {
            id: Some("t1".to_string()),
            title: "Final".to_string(),
            original_text: "body".to_string(),
            analysis: None,
        }));

        assert_eq!(
            store.text(),
            &TextPackage {
                id: Some("t1".to_string()),
                title: "Final".to_string(),
                original_text: "body".to_string(),
                ..TextPackage::default()
            }
        );
    }

    #[test]
    fn text_error_is_recorded_against_text_package() {
        let mut store = ContentStore::new();
        store.start_processing(ProcessingRequest::Text {
            title: "Notes".to_string(),
            text: "body".to_string(),
        });

        store.set_processing_error(Source::CustomText, ErrorPayload::message("x"));

        let error = store.text().error.as_ref().unwrap();
        assert_eq!(error.message, "x");
        assert_eq!(error.details, "");
        assert!(!store.text().loading);
        assert!(!store.global_loading());
        assert!(store.global_error().is_none());
    }

    #[test]
    fn recoverable_video_error_raises_fallback() {
        let mut store = ContentStore::new();
        store.start_processing(ProcessingRequest::Video {
            url: "https://www.youtube.com/watch?v=abc".to_string(),
        });

        store.set_processing_error(
            Source::YoutubeVideo,
            serde_json::from_value(json!({
                "error": "Failed to retrieve transcript automatically",
                "details": "Transcripts are disabled for this video.",
                "showFallback": true,
                "video_id": "abc",
                "video_url": "https://youtu.be/abc"
            }))
            .unwrap(),
        );

        let video = store.video();
        assert!(video.show_fallback);
        assert!(!video.loading);
        assert_eq!(video.video_id.as_deref(), Some("abc"));
        assert_eq!(video.video_url.as_deref(), Some("https://youtu.be/abc"));
        assert_eq!(
            video.error.as_ref().unwrap().details,
            "Transcripts are disabled for this video."
        );
    }

    #[test]
    fn loose_backend_result_is_stored_not_rejected() {
        let analysis = json!({
            "table_of_contents": [{ "title": "Intro", "timestamp_seconds": "00:30" }],
            "key_terms": null,
            "summary": null
        });
        let result: VideoResult = serde_json::from_value(json!({
            "video_id": "v1",
            "title": null,
            "segments": null,
            "analysis": analysis.clone()
        }))
        .unwrap();
        let mut store = ContentStore::new();
        store.start_processing(ProcessingRequest::Video {
            url: "u1".to_string(),
        });

        store.set_processed_data(ProcessedData::Video(result));

        let video = store.video();
        assert!(video.error.is_none());
        assert!(!video.loading);
        assert_eq!(video.title, "");
        assert!(video.segments.is_empty());
        assert_eq!(video.analysis, Some(analysis));
    }

    #[test]
    fn fallback_needs_a_video_id() {
        let mut store = ContentStore::new();
        store.start_processing(ProcessingRequest::Video {
            url: "u1".to_string(),
        });

        store.set_processing_error(
            Source::YoutubeVideo,
            ErrorPayload {
                error: Some("nope".to_string()),
                show_fallback: true,
                ..ErrorPayload::default()
            },
        );

        assert!(!store.video().show_fallback);
        assert_eq!(store.video().video_url.as_deref(), Some("u1"));
    }

    #[test]
    fn unknown_error_source_goes_global() {
        let mut store = ContentStore::new();
        store.start_processing(ProcessingRequest::Video {
            url: "u1".to_string(),
        });

        store.set_processing_error(Source::from("explain"), ErrorPayload::default());

        assert_eq!(
            store.global_error().map(|e| e.message.as_str()),
            Some("An unknown error occurred.")
        );
        assert!(!store.global_loading());
        assert!(store.video().loading);
        assert!(store.video().error.is_none());
    }

    #[test]
    fn fallback_submission_and_clear() {
        let mut store = ContentStore::new();
        store.start_processing(ProcessingRequest::Text {
            title: "Notes".to_string(),
            text: "body".to_string(),
        });
        store.set_processing_error(Source::YoutubeVideo, ErrorPayload::message("old"));

        store.start_processing_fallback_transcript();

        assert_eq!(store.active_mode(), Mode::Video);
        assert!(store.video().loading);
        assert!(store.video().error.is_none());
        assert!(store.video().show_fallback);

        store.clear_fallback();
        assert!(!store.video().show_fallback);
    }

    #[test]
    fn active_package_follows_mode() {
        let mut store = ContentStore::new();
        assert!(matches!(store.active_package(), ActivePackage::Video(_)));

        store.switch_mode(Mode::Text);
        match store.active_package() {
            ActivePackage::Text(text) => assert_eq!(text, store.text()),
            other => panic!("expected text package, got {other:?}"),
        }
    }

    #[test]
    fn every_mutation_bumps_revision() {
        let mut store = ContentStore::new();
        store.start_processing(ProcessingRequest::Video {
            url: "u1".to_string(),
        });
        store.set_processed_data(ProcessedData::Video(video_result("v1", "T")));
        store.clear_fallback();
        let _ = store.set_active_mode("bogus");
        assert_eq!(store.revision(), 3);
    }
}
