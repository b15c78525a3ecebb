use dioxus::logger::tracing;
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

use atrium_shared::{resolve, sanitize, selection};

use crate::api::{self, DepartmentModelData};

const MAX_FETCH_ATTEMPTS: u32 = 3;
const RETRY_DELAY_MS: u32 = 800;

/// Inline style applied to the selected zone. Written straight onto the
/// element so it works for any zone shape the SVG happens to use.
const HIGHLIGHT_STYLE: &str = "fill: rgba(45, 212, 191, 0.45); stroke: #0f766e; stroke-width: 3;";

#[derive(Debug, Clone, PartialEq)]
enum PlanState {
    Loading,
    Ready(String),
    Unavailable,
}

fn document() -> Option<web_sys::Document> {
    web_sys::window()?.document()
}

/// Hit-test a click against the rendered plan: take the deepest element at
/// the point, then walk up to the nearest ancestor carrying an id. Returns
/// `None` for clicks that land outside any identified zone.
fn zone_at_point(x: f64, y: f64) -> Option<String> {
    let doc = document()?;
    let target = doc.element_from_point(x as f32, y as f32)?;
    let zone = target.closest("[id]").ok().flatten()?;
    let id = zone.id();
    if id.is_empty() || id == "plan-container" {
        None
    } else {
        Some(id)
    }
}

/// Move the selection highlight from one zone element to another. Clearing
/// removes the whole style attribute, which also restores any hover styling
/// the stylesheet provides.
fn move_highlight(prev: Option<&str>, next: Option<&str>) {
    let Some(doc) = document() else { return };
    if let Some(id) = prev {
        if let Some(el) = doc.get_element_by_id(id) {
            let _ = el.remove_attribute("style");
        }
    }
    if let Some(id) = next {
        if let Some(el) = doc.get_element_by_id(id) {
            let _ = el.set_attribute("style", HIGHLIGHT_STYLE);
        }
    }
}

async fn fetch_with_retry(url: &str) -> Option<String> {
    for attempt in 1..=MAX_FETCH_ATTEMPTS {
        match api::fetch_plan_document(url).await {
            Ok(text) => return Some(text),
            Err(e) => {
                tracing::warn!("plan fetch attempt {attempt}/{MAX_FETCH_ATTEMPTS} failed: {e}");
                if attempt < MAX_FETCH_ATTEMPTS {
                    TimeoutFuture::new(RETRY_DELAY_MS).await;
                }
            }
        }
    }
    None
}

#[component]
pub fn FloorPlan(
    plan_url: String,
    models: Vec<DepartmentModelData>,
    selected: Signal<Option<DepartmentModelData>>,
) -> Element {
    let mut plan = use_signal(|| PlanState::Loading);
    // Raw element id of the currently highlighted zone. Tracked separately
    // from `selected` because the element id may carry whitespace that the
    // trimmed comparison ignores.
    let mut highlighted = use_signal(|| None::<String>);

    // The resource future is dropped when this component unmounts, so a
    // response arriving after navigation has nowhere to land.
    let _loader = use_resource(move || {
        let url = plan_url.clone();
        async move {
            plan.set(PlanState::Loading);
            highlighted.set(None);
            match fetch_with_retry(&url).await {
                Some(raw) => plan.set(PlanState::Ready(sanitize::sanitize_plan_svg(&raw))),
                None => {
                    tracing::error!("plan unavailable after {MAX_FETCH_ATTEMPTS} attempts: {url}");
                    plan.set(PlanState::Unavailable);
                }
            }
        }
    });

    let models_for_click = models.clone();
    let on_plan_click = move |evt: Event<MouseData>| {
        let point = evt.client_coordinates();
        let Some(zone_id) = zone_at_point(point.x, point.y) else {
            return;
        };

        match resolve::resolve_zone(&zone_id, &models_for_click) {
            Some(model) => {
                let current = selected.read().as_ref().map(|m| m.id_plan.trim().to_string());
                let next = selection::toggle_single(current.as_deref(), model.id_plan.trim());
                let prev_el = highlighted.read().clone();
                if next.is_some() {
                    move_highlight(prev_el.as_deref(), Some(&zone_id));
                    highlighted.set(Some(zone_id));
                    selected.set(Some(model.clone()));
                } else {
                    move_highlight(prev_el.as_deref(), None);
                    highlighted.set(None);
                    selected.set(None);
                }
            }
            None => {
                // Normal for clicks on decorative geometry that happens to
                // carry an id. Logged to make zone naming mistakes visible.
                tracing::debug!("no model matches plan zone '{zone_id}'");
            }
        }
    };

    let rendered = match &*plan.read() {
        PlanState::Loading => rsx! {
            div { class: "plan-loading",
                div { class: "spinner" }
                p { "Loading floor plan\u{2026}" }
            }
        },
        PlanState::Unavailable => rsx! {
            div { class: "plan-unavailable",
                p { "The floor plan could not be loaded." }
                p { class: "plan-unavailable-hint", "Please try again later." }
            }
        },
        PlanState::Ready(svg) => rsx! {
            div {
                id: "plan-container",
                class: "plan-container",
                onclick: on_plan_click,
                dangerous_inner_html: "{svg}",
            }
        },
    };
    rendered
}
