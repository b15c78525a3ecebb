use dioxus::prelude::*;

use super::carousel::Carousel;

#[component]
pub fn GalleryModal(show: Signal<bool>, title: String, images: Vec<String>) -> Element {
    if !*show.read() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| show.set(false),

            div {
                class: "gallery-modal",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),

                div { class: "gallery-modal-header",
                    h2 { "{title}" }
                    button {
                        class: "gallery-modal-close",
                        onclick: move |_| show.set(false),
                        "\u{00d7}"
                    }
                }

                Carousel {
                    images: images,
                    auto_play: true,
                    interval_ms: 5000,
                }
            }
        }
    }
}
