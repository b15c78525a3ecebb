mod api;
mod components;
mod pages;

use dioxus::prelude::*;

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Home {},
    #[route("/presentation/:building_id")]
    Presentation { building_id: String },
}

#[component]
fn Home() -> Element {
    rsx! {
        pages::home::BuildingIndex {}
    }
}

#[component]
fn Presentation(building_id: String) -> Element {
    rsx! {
        pages::presentation::PresentationPage { building_id }
    }
}

const CSS: Asset = asset!("/assets/main.css");
const FAVICON: Asset = asset!("/assets/favicon.svg");

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }
        document::Stylesheet { href: CSS }
        Router::<Route> {}
    }
}

fn main() {
    launch(App);
}
