mod components;
mod hooks;
mod live_api;
mod pages;
pub mod utils;

use live_api::LiveApiProvider;
use pages::live::LivePage;
use yew::prelude::*;

#[function_component(App)]
fn app() -> Html {
    // The key is taken from the page URL (or baked in at build time) so the
    // console works as a static bundle; a missing key still renders, connect
    // attempts just fail and surface in the transcript.
    let api_key = utils::api_key_from_location()
        .or_else(|| option_env!("GEMINI_API_KEY").map(str::to_string))
        .unwrap_or_default();

    html! {
        <LiveApiProvider {api_key}>
            <LivePage />
        </LiveApiProvider>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
