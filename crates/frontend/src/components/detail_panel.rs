use dioxus::prelude::*;

use crate::api::DepartmentModelData;

/// Format square meters for display, dropping a trailing `.0`.
fn format_area(square_meters: f64) -> String {
    if square_meters.fract() == 0.0 {
        format!("{} m\u{00b2}", square_meters as i64)
    } else {
        format!("{:.1} m\u{00b2}", square_meters)
    }
}

#[component]
pub fn DetailPanel(
    model: DepartmentModelData,
    gallery_len: usize,
    on_open_gallery: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "detail-panel",
            h2 { class: "detail-name", "{model.name}" }

            if let Some(area) = model.base_square_meters {
                p { class: "detail-area", {format_area(area)} }
            }

            if gallery_len > 0 {
                button {
                    class: "detail-gallery-button",
                    onclick: move |_| on_open_gallery.call(()),
                    "View gallery ({gallery_len})"
                }
            }
        }
    }
}
