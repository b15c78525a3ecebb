use dioxus::prelude::*;

use atrium_shared::gallery;

use crate::api::{self, DepartmentModelData};
use crate::components::detail_panel::DetailPanel;
use crate::components::floor_plan::FloorPlan;
use crate::components::gallery_modal::GalleryModal;
use crate::components::unit_grid::UnitGrid;

#[component]
pub fn PresentationPage(building_id: String) -> Element {
    let building_resource = use_resource({
        let id = building_id.clone();
        move || {
            let id = id.clone();
            async move { api::fetch_building(&id).await }
        }
    });
    let models_resource = use_resource({
        let id = building_id.clone();
        move || {
            let id = id.clone();
            async move { api::fetch_department_models(&id).await }
        }
    });
    let units_resource = use_resource({
        let id = building_id.clone();
        move || {
            let id = id.clone();
            async move { api::fetch_units(&id).await }
        }
    });

    let selected = use_signal(|| None::<DepartmentModelData>);
    let mut show_gallery = use_signal(|| false);

    let building = match &*building_resource.read() {
        None => {
            return rsx! {
                div { class: "app",
                    p { class: "index-status", "Loading\u{2026}" }
                }
            };
        }
        Some(Err(e)) => {
            return rsx! {
                div { class: "app",
                    p { class: "index-status index-error", "Could not load building: {e}" }
                }
            };
        }
        Some(Ok(None)) => {
            return rsx! {
                div { class: "app",
                    p { class: "index-status", "This building does not exist." }
                }
            };
        }
        Some(Ok(Some(b))) => b.clone(),
    };

    let models: Vec<DepartmentModelData> = match &*models_resource.read() {
        Some(Ok(m)) => m.clone(),
        _ => vec![],
    };
    let units = match &*units_resource.read() {
        Some(Ok(u)) => u.clone(),
        _ => vec![],
    };

    let current = selected.read().clone();
    let gallery_images: Vec<String> = current
        .as_ref()
        .map(|m| gallery::parse_gallery(m.batch_images.as_ref()))
        .unwrap_or_default();
    let gallery_len = gallery_images.len();

    // With no model selected the showcase falls back to the building's
    // distribution render, then to the primary image of nothing at all.
    let showcase_image = current
        .as_ref()
        .and_then(|m| m.primary_image.clone())
        .or_else(|| building.distribution_image.clone());
    let modal_title = current
        .as_ref()
        .map(|m| m.name.clone())
        .unwrap_or_else(|| building.name.clone());

    rsx! {
        div { class: "app",
            div { class: "header",
                h1 { "{building.name}" }
                if let Some(address) = &building.address {
                    span { class: "building-address", "{address}" }
                }
            }

            div { class: "presentation",
                div { class: "showcase",
                    if let Some(src) = showcase_image {
                        img { class: "showcase-image", src: "{src}", alt: "{modal_title}" }
                    }
                    if let Some(model) = current.clone() {
                        DetailPanel {
                            model: model,
                            gallery_len: gallery_len,
                            on_open_gallery: move |_| show_gallery.set(true),
                        }
                    }
                }

                div { class: "plan-pane",
                    FloorPlan {
                        plan_url: building.plan_image.clone(),
                        models: models,
                        selected: selected,
                    }
                }
            }

            UnitGrid { units: units }

            GalleryModal {
                show: show_gallery,
                title: modal_title,
                images: gallery_images,
            }
        }
    }
}
