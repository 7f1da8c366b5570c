use super::{ContentStore, ModeParseError, ProcessedData, ProcessingRequest, Source};
use crate::models::ErrorPayload;
use std::rc::Rc;
use yew::prelude::*;

/// Handle passed down through `ContextProvider` to every component that reads
/// or mutates the store.
pub type ContentContext = UseReducerHandle<ContentStore>;

#[derive(Debug, Clone, PartialEq)]
pub enum ContentAction {
    SetActiveMode(String),
    StartProcessing(ProcessingRequest),
    StartProcessingFallbackTranscript,
    SetProcessedData(ProcessedData),
    SetProcessingError(Source, ErrorPayload),
    ClearFallback,
}

impl ContentStore {
    /// Runs one action against the store. Only a mode switch to an unknown
    /// name can be rejected, in which case nothing was touched.
    pub fn apply(&mut self, action: ContentAction) -> Result<(), ModeParseError> {
        match action {
            ContentAction::SetActiveMode(mode) => return self.set_active_mode(&mode),
            ContentAction::StartProcessing(request) => self.start_processing(request),
            ContentAction::StartProcessingFallbackTranscript => {
                self.start_processing_fallback_transcript()
            }
            ContentAction::SetProcessedData(data) => self.set_processed_data(data),
            ContentAction::SetProcessingError(source, payload) => {
                self.set_processing_error(source, payload)
            }
            ContentAction::ClearFallback => self.clear_fallback(),
        }
        Ok(())
    }
}

impl Reducible for ContentStore {
    type Action = ContentAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match next.apply(action) {
            Ok(()) => Rc::new(next),
            Err(e) => {
                // keep the same Rc so subscribers skip a render
                log::warn!("Ignoring mode switch: {e}");
                self
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VideoResult;

    #[test]
    fn invalid_mode_returns_same_state() {
        let state = Rc::new(ContentStore::new());
        let next = state
            .clone()
            .reduce(ContentAction::SetActiveMode("podcast".to_string()));
        assert!(Rc::ptr_eq(&state, &next));
    }

    #[test]
    fn apply_reports_rejected_mode() {
        let mut store = ContentStore::new();
        assert_eq!(
            store.apply(ContentAction::SetActiveMode("podcast".to_string())),
            Err(ModeParseError("podcast".to_string()))
        );
        assert_eq!(store, ContentStore::new());
        assert_eq!(
            store.apply(ContentAction::SetActiveMode("text".to_string())),
            Ok(())
        );
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn actions_flow_through_to_the_view() {
        let state = Rc::new(ContentStore::new())
            .reduce(ContentAction::StartProcessing(ProcessingRequest::Video {
                url: "u1".to_string(),
            }))
            .reduce(ContentAction::SetProcessedData(ProcessedData::Video(
                VideoResult {
                    video_id: Some("v1".to_string()),
                    title: "T".to_string(),
                    ..VideoResult::default()
                },
            )));

        let view = state.view();
        assert_eq!(view.current_title, "T");
        assert_eq!(view.video_id_for_player.as_deref(), Some("v1"));
        assert_eq!(state.revision(), 2);
    }

    #[test]
    fn fallback_actions_toggle_visibility() {
        let state = Rc::new(ContentStore::new())
            .reduce(ContentAction::SetProcessingError(
                Source::YoutubeVideo,
                ErrorPayload {
                    error: Some("Failed to retrieve transcript automatically".to_string()),
                    show_fallback: true,
                    video_id: Some("abc".to_string()),
                    ..ErrorPayload::default()
                },
            ))
            .reduce(ContentAction::StartProcessingFallbackTranscript);
        assert!(state.view().show_transcript_paste_fallback);
        assert!(state.view().is_loading);

        let state = state.reduce(ContentAction::ClearFallback);
        assert!(!state.view().show_transcript_paste_fallback);
    }
}
