use crate::api::{submit_explanation, submit_fallback_transcript, submit_text, submit_video};
use crate::models::{Analysis, CustomTranscriptRequest, Segment};
use crate::store::{ContentAction, ContentContext, Mode, NotebookView};
use crate::utils::{format_timestamp, youtube_embed_url, youtube_watch_url};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ViewProps {
    pub view: NotebookView,
}

#[derive(Properties, PartialEq)]
pub struct SegmentListProps {
    pub segments: Vec<Segment>,
    pub video_id: Option<String>,
}

#[derive(Properties, PartialEq)]
pub struct AnalysisProps {
    pub analysis: Analysis,
    pub video_id: Option<String>,
}

#[derive(Properties, PartialEq)]
pub struct ExplainProps {
    pub video_id: Option<String>,
}

#[hook]
fn use_content_store() -> ContentContext {
    use_context::<ContentContext>().expect("ContentStore context is not provided")
}

#[function_component(ModeSwitcher)]
pub fn mode_switcher() -> Html {
    let store = use_content_store();
    let active = store.active_mode();

    let button = |mode: Mode, label: &'static str| {
        let store = store.clone();
        let class = if active == mode {
            "px-4 py-2 bg-blue-600 text-white rounded"
        } else {
            "px-4 py-2 bg-gray-200 text-gray-700 rounded hover:bg-gray-300"
        };
        // Switch notebook mode
        let onclick = Callback::from(move |_: MouseEvent| {
            store.dispatch(ContentAction::SetActiveMode(mode.to_string()));
        });
        html! { <button {class} {onclick}>{label}</button> }
    };

    html! {
        <div class="flex gap-2 mb-4">
            { button(Mode::Video, "YouTube Video") }
            { button(Mode::Text, "Analyze My Text") }
        </div>
    }
}

#[function_component(VideoForm)]
pub fn video_form() -> Html {
    let store = use_content_store();
    let current_input = use_state(String::new);
    let loading = store.video().loading;

    // Handle input changes
    let on_input = {
        let current_input = current_input.clone();
        Callback::from(move |e: InputEvent| {
            let input_value = e.target_unchecked_into::<HtmlInputElement>().value();
            current_input.set(input_value);
        })
    };

    // Handle URL submission
    let on_submit = {
        let store = store.clone();
        let current_input = current_input.clone();
        Callback::from(move |e: web_sys::SubmitEvent| {
            e.prevent_default();
            let video_url = current_input.trim().to_string();
            if video_url.is_empty() {
                return;
            }
            submit_video(store.clone(), video_url);
        })
    };

    html! {
        <form onsubmit={on_submit} class="flex mb-4">
            <input
                type="text"
                class="flex-grow p-3 border border-gray-300 rounded-l-lg focus:outline-none focus:ring-2 focus:ring-blue-500"
                placeholder="Paste a YouTube video URL..."
                value={(*current_input).clone()}
                oninput={on_input}
                disabled={loading}
            />
            <button
                type="submit"
                class="bg-blue-600 text-white p-3 rounded-r-lg hover:bg-blue-700 disabled:opacity-50"
                disabled={loading}
            >
                { if loading { "Processing..." } else { "Analyze" } }
            </button>
        </form>
    }
}

#[function_component(TextForm)]
pub fn text_form() -> Html {
    let store = use_content_store();
    let title = use_state(String::new);
    let text = use_state(String::new);
    let loading = store.text().loading;

    // Handle title and body changes
    let on_title = {
        let title = title.clone();
        Callback::from(move |e: InputEvent| {
            title.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_text = {
        let text = text.clone();
        Callback::from(move |e: InputEvent| {
            text.set(e.target_unchecked_into::<HtmlTextAreaElement>().value());
        })
    };

    // Handle text submission
    let on_submit = {
        let store = store.clone();
        let title = title.clone();
        let text = text.clone();
        Callback::from(move |e: web_sys::SubmitEvent| {
            e.prevent_default();
            if text.trim().is_empty() {
                return;
            }
            let title = match title.trim() {
                "" => "Untitled text".to_string(),
                t => t.to_string(),
            };
            submit_text(store.clone(), title, (*text).clone());
        })
    };

    html! {
        <form onsubmit={on_submit} class="flex flex-col gap-2 mb-4">
            <input
                type="text"
                class="p-3 border border-gray-300 rounded-lg"
                placeholder="Title"
                value={(*title).clone()}
                oninput={on_title}
                disabled={loading}
            />
            <textarea
                class="p-3 border border-gray-300 rounded-lg h-48"
                placeholder="Paste the text you want analyzed..."
                value={(*text).clone()}
                oninput={on_text}
                disabled={loading}
            />
            <button
                type="submit"
                class="bg-blue-600 text-white p-3 rounded-lg hover:bg-blue-700 disabled:opacity-50"
                disabled={loading}
            >
                { if loading { "Processing..." } else { "Analyze text" } }
            </button>
        </form>
    }
}

/// Manual transcript entry, shown when the backend could not fetch one.
#[function_component(TranscriptFallbackForm)]
pub fn transcript_fallback_form(props: &ViewProps) -> Html {
    let store = use_content_store();
    let transcript = use_state(String::new);
    let view = &props.view;

    if !view.show_transcript_paste_fallback {
        return html! {};
    }

    // Handle transcript changes
    let on_input = {
        let transcript = transcript.clone();
        Callback::from(move |e: InputEvent| {
            transcript.set(e.target_unchecked_into::<HtmlTextAreaElement>().value());
        })
    };

    // Resubmit the video with the pasted transcript
    let on_submit = {
        let store = store.clone();
        let transcript = transcript.clone();
        let video_id = view.current_video_id_for_fallback.clone();
        let video_url = view.current_video_url_for_fallback.clone();
        Callback::from(move |e: web_sys::SubmitEvent| {
            e.prevent_default();
            let Some(video_id) = video_id.clone() else {
                return;
            };
            if transcript.trim().is_empty() {
                return;
            }
            let request = CustomTranscriptRequest {
                video_url: video_url
                    .clone()
                    .unwrap_or_else(|| youtube_watch_url(&video_id, 0.0)),
                video_id,
                custom_transcript_text: (*transcript).clone(),
                title: None,
            };
            submit_fallback_transcript(store.clone(), request);
        })
    };

    // Hide the form without submitting
    let on_cancel = Callback::from(move |_: MouseEvent| {
        store.dispatch(ContentAction::ClearFallback);
    });

    html! {
        <form onsubmit={on_submit} class="flex flex-col gap-2 mb-4 p-4 bg-yellow-50 rounded-lg">
            <p class="text-sm text-gray-700">
                {"The transcript could not be fetched automatically. Paste it below (timestamps like [01:23] are understood)."}
            </p>
            <textarea
                class="p-3 border border-gray-300 rounded-lg h-48"
                value={(*transcript).clone()}
                oninput={on_input}
                disabled={view.is_loading}
            />
            <div class="flex gap-2">
                <button type="submit" class="bg-blue-600 text-white px-4 py-2 rounded" disabled={view.is_loading}>
                    {"Process transcript"}
                </button>
                <button type="button" class="bg-gray-200 px-4 py-2 rounded" onclick={on_cancel}>
                    {"Cancel"}
                </button>
            </div>
        </form>
    }
}

#[function_component(StatusBanner)]
pub fn status_banner(props: &ViewProps) -> Html {
    let view = &props.view;
    if view.is_loading {
        return html! { <p class="text-center text-gray-500 mb-4">{"Processing..."}</p> };
    }
    match &view.error {
        Some(error) => html! {
            <div class="p-4 mb-4 bg-red-100 text-red-800 rounded-lg">
                <p class="font-semibold">{&error.message}</p>
                { if error.details.is_empty() { html! {} } else { html! { <p class="text-sm">{&error.details}</p> } } }
            </div>
        },
        None => html! {},
    }
}

#[function_component(Player)]
pub fn player(props: &ViewProps) -> Html {
    match &props.view.video_id_for_player {
        Some(video_id) => html! {
            <div class="aspect-video mb-4">
                <iframe
                    class="w-full h-full rounded-lg"
                    src={youtube_embed_url(video_id)}
                    title={props.view.current_title.clone()}
                    allowfullscreen=true
                />
            </div>
        },
        None => html! {},
    }
}

#[function_component(AnalysisOverview)]
pub fn analysis_overview(props: &AnalysisProps) -> Html {
    let analysis = &props.analysis;

    let toc_entry = |title: &str, seconds: f64| -> Html {
        let label = format_timestamp(seconds);
        match &props.video_id {
            Some(video_id) => html! {
                <li>
                    <a href={youtube_watch_url(video_id, seconds)} target="_blank" class="text-blue-600 hover:underline">{label}</a>
                    {format!(" {}", title)}
                </li>
            },
            None => html! { <li>{format!("{} {}", label, title)}</li> },
        }
    };

    html! {
        <div class="space-y-4">
            <section>
                <h3 class="text-lg font-semibold">{"Summary"}</h3>
                <p>{&analysis.summary}</p>
            </section>
            <section>
                <h3 class="text-lg font-semibold">{"Table of contents"}</h3>
                <ul>
                    { for analysis.table_of_contents.iter().map(|entry| toc_entry(&entry.title, entry.timestamp_seconds)) }
                </ul>
            </section>
            <section>
                <h3 class="text-lg font-semibold">{"Key terms"}</h3>
                <dl>
                    { for analysis.key_terms.iter().map(|kt| html! {
                        <>
                            <dt class="font-semibold">{&kt.term}</dt>
                            <dd class="ml-4 text-gray-700">{&kt.definition}</dd>
                        </>
                    }) }
                </dl>
            </section>
            <section>
                <h3 class="text-lg font-semibold">{"Logical flow"}</h3>
                <p class="whitespace-pre-line">{&analysis.logical_flow}</p>
            </section>
        </div>
    }
}

#[function_component(SegmentList)]
pub fn segment_list(props: &SegmentListProps) -> Html {
    html! {
        <div class="divide-y divide-gray-200">
            { for props.segments.iter().map(|segment| {
                let stamp = format_timestamp(segment.start);
                html! {
                    <p class="p-2 text-sm">
                        { match &props.video_id {
                            Some(video_id) => html! {
                                <a href={youtube_watch_url(video_id, segment.start)} target="_blank" class="mr-2 text-blue-600 hover:underline">{stamp}</a>
                            },
                            None => html! { <span class="mr-2 text-gray-500">{stamp}</span> },
                        } }
                        {&segment.text}
                    </p>
                }
            }) }
        </div>
    }
}

#[function_component(Notebook)]
pub fn notebook(props: &ViewProps) -> Html {
    let view = &props.view;
    let show_full_text = use_state(|| false);

    // Show or hide the full transcript
    let toggle = {
        let show_full_text = show_full_text.clone();
        Callback::from(move |_: MouseEvent| show_full_text.set(!*show_full_text))
    };

    html! {
        <div class="bg-white rounded-lg p-4 space-y-4">
            if !view.current_title.is_empty() {
                <h2 class="text-2xl font-bold">{&view.current_title}</h2>
            }
            if let Some(analysis) = &view.analysis_for_overview {
                <AnalysisOverview analysis={Analysis::from_value(analysis)} video_id={view.video_id_for_player.clone()} />
            }
            if !view.raw_transcript_text.is_empty() {
                <section>
                    <button class="text-blue-600 hover:underline" onclick={toggle}>
                        { if *show_full_text { "Hide full text" } else { "Show full text" } }
                    </button>
                    if *show_full_text {
                        if view.transcript_segments.is_empty() {
                            <p class="whitespace-pre-line mt-2">{&view.raw_transcript_text}</p>
                        } else {
                            <SegmentList segments={view.transcript_segments.clone()} video_id={view.video_id_for_player.clone()} />
                        }
                    }
                </section>
            }
        </div>
    }
}

/// Free-form "explain this" box. Answers stay local to the panel; failures
/// are reported through the store's global error.
#[function_component(ExplainPanel)]
pub fn explain_panel(props: &ExplainProps) -> Html {
    let store = use_content_store();
    let selected_text = use_state(String::new);
    let explanation = use_state(|| None::<String>);
    let loading = use_state(|| false);

    // Handle passage changes
    let on_input = {
        let selected_text = selected_text.clone();
        Callback::from(move |e: InputEvent| {
            selected_text.set(e.target_unchecked_into::<HtmlTextAreaElement>().value());
        })
    };

    // Ask the backend to explain the passage
    let on_submit = {
        let selected_text = selected_text.clone();
        let explanation = explanation.clone();
        let loading = loading.clone();
        let video_id = props.video_id.clone();
        Callback::from(move |e: web_sys::SubmitEvent| {
            e.prevent_default();
            submit_explanation(
                store.clone(),
                (*selected_text).clone(),
                video_id.clone(),
                explanation.clone(),
                loading.clone(),
            );
        })
    };

    html! {
        <form onsubmit={on_submit} class="flex flex-col gap-2 mb-4 p-4 bg-white rounded-lg">
            <h3 class="text-lg font-semibold">{"Explain a passage"}</h3>
            <textarea
                class="p-3 border border-gray-300 rounded-lg h-24"
                placeholder="Paste a sentence or term you want explained..."
                value={(*selected_text).clone()}
                oninput={on_input}
                disabled={*loading}
            />
            <button
                type="submit"
                class="bg-blue-600 text-white p-3 rounded-lg hover:bg-blue-700 disabled:opacity-50"
                disabled={*loading || selected_text.trim().is_empty()}
            >
                { if *loading { "Explaining..." } else { "Explain" } }
            </button>
            if let Some(text) = &*explanation {
                <p class="whitespace-pre-line text-gray-800">{text}</p>
            }
        </form>
    }
}
