mod api;
mod components;
mod config;
mod logging;
mod models;
mod store;
mod utils;

use crate::components::{
    ExplainPanel, ModeSwitcher, Notebook, Player, StatusBanner, TextForm, TranscriptFallbackForm,
    VideoForm,
};
use crate::config::CONFIG;
use crate::store::{ActivePackage, ContentContext, ContentStore, ViewCache};
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let store = use_reducer(ContentStore::new);
    let view_cache = use_mut_ref(ViewCache::new);
    let view = view_cache.borrow_mut().get(&store).clone();

    html! {
        <ContextProvider<ContentContext> context={store.clone()}>
            <main class="max-w-4xl mx-auto p-6">
                <h1 class="text-3xl font-bold mb-6">{&CONFIG.app_name}</h1>
                <ModeSwitcher />
                {
                    match store.active_package() {
                        ActivePackage::Video(_) => html! { <VideoForm /> },
                        ActivePackage::Text(_) => html! { <TextForm /> },
                    }
                }
                <StatusBanner view={view.clone()} />
                <TranscriptFallbackForm view={view.clone()} />
                <Player view={view.clone()} />
                <ExplainPanel video_id={view.video_id_for_player.clone()} />
                <Notebook {view} />
            </main>
        </ContextProvider<ContentContext>>
    }
}

fn main() {
    logging::init_logger(CONFIG.debug_mode);
    yew::Renderer::<App>::new().render();

    log::info!(
        "NAME: \"{}\", API: \"{}\" DEBUG: \"{}\"",
        CONFIG.app_name,
        CONFIG.backend_url,
        CONFIG.debug_mode
    );
}
