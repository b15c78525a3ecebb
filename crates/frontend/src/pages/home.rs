use dioxus::prelude::*;

use crate::api::{self, BuildingData};
use crate::Route;

#[component]
pub fn BuildingIndex() -> Element {
    let buildings_resource = use_resource(|| api::fetch_buildings());

    rsx! {
        div { class: "app",
            div { class: "header",
                h1 { "Atrium" }
            }

            div { class: "building-index",
                match &*buildings_resource.read() {
                    None => rsx! {
                        p { class: "index-status", "Loading buildings\u{2026}" }
                    },
                    Some(Err(e)) => rsx! {
                        p { class: "index-status index-error", "Could not load buildings: {e}" }
                    },
                    Some(Ok(buildings)) if buildings.is_empty() => rsx! {
                        p { class: "index-status", "No buildings published yet." }
                    },
                    Some(Ok(buildings)) => rsx! {
                        for building in buildings.clone() {
                            BuildingCard { building: building }
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn BuildingCard(building: BuildingData) -> Element {
    rsx! {
        Link {
            class: "building-card",
            to: Route::Presentation { building_id: building.id.clone() },

            h2 { "{building.name}" }
            if let Some(address) = &building.address {
                p { class: "building-address", "{address}" }
            }
        }
    }
}
