use dioxus::prelude::*;

mod components;
mod config;
mod media;
mod utils;

use components::PlayerBoard;
use config::load_config;

const APP_CSS: Asset = asset!("/assets/styling/app.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(load_config);

    rsx! {
        document::Title { "Media Mirror" }
        document::Meta { name: "theme-color", content: "#a38449" }
        document::Stylesheet { href: APP_CSS }

        PlayerBoard {}
    }
}
