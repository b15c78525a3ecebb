use dioxus::prelude::*;

use atrium_shared::selection::{self, CompareSelection};

use crate::api::{UnitData, UnitStateData};

/// Group units by floor, highest floor first, units ordered by number within
/// each floor. The backend already sorts this way; grouping here keeps the
/// component robust if it ever receives unsorted data.
pub fn group_by_floor(units: &[UnitData]) -> Vec<(i32, Vec<UnitData>)> {
    let mut sorted: Vec<UnitData> = units.to_vec();
    sorted.sort_by(|a, b| {
        b.floor
            .cmp(&a.floor)
            .then_with(|| a.unit_number.cmp(&b.unit_number))
    });

    let mut floors: Vec<(i32, Vec<UnitData>)> = Vec::new();
    for unit in sorted {
        match floors.last_mut() {
            Some((floor, group)) if *floor == unit.floor => group.push(unit),
            _ => floors.push((unit.floor, vec![unit])),
        }
    }
    floors
}

fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(1024.0)
}

#[component]
pub fn UnitGrid(units: Vec<UnitData>) -> Element {
    // The cap is fixed at mount time; a mid-session resize keeps the cap the
    // viewport had when the page opened.
    let mut compare = use_signal(|| CompareSelection::new(selection::compare_cap(viewport_width())));

    let floors = group_by_floor(&units);
    let selected_units: Vec<UnitData> = units
        .iter()
        .filter(|u| compare.read().contains(&u.id))
        .cloned()
        .collect();
    let cap = compare.read().cap();
    let picked = compare.read().len();

    rsx! {
        div { class: "unit-grid",
            div { class: "unit-grid-header",
                h2 { "Units" }
                if picked > 0 {
                    div { class: "compare-bar",
                        span { class: "compare-count", "{picked} / {cap} to compare" }
                        for unit in &selected_units {
                            span { class: "compare-chip", "{unit.unit_number}" }
                        }
                        button {
                            class: "compare-clear",
                            onclick: move |_| {
                                let cap = compare.read().cap();
                                compare.set(CompareSelection::new(cap));
                            },
                            "Clear"
                        }
                    }
                }
            }

            for (floor, group) in floors {
                div { class: "floor-row",
                    span { class: "floor-label", "Floor {floor}" }
                    div { class: "floor-units",
                        for unit in group {
                            UnitCell { unit: unit, compare: compare }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn UnitCell(unit: UnitData, compare: Signal<CompareSelection>) -> Element {
    let available = unit.state == UnitStateData::Available;
    let selected = compare.read().contains(&unit.id);
    let unit_id = unit.id.clone();

    let class = if selected {
        format!("unit-cell {} selected", unit.state.css_class())
    } else {
        format!("unit-cell {}", unit.state.css_class())
    };

    rsx! {
        button {
            class: "{class}",
            disabled: !available,
            title: "{unit.state.label()}",
            onclick: move |_| {
                // Toggling past the cap is silently ignored inside the
                // selection itself.
                compare.write().toggle(&unit_id);
            },

            span { class: "unit-number", "{unit.unit_number}" }
            if let Some(area) = unit.real_square_meters {
                span { class: "unit-area", "{area} m\u{00b2}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(id: &str, number: &str, floor: i32, state: UnitStateData) -> UnitData {
        UnitData {
            id: id.to_string(),
            unit_number: number.to_string(),
            floor,
            real_square_meters: Some(80.0),
            state,
        }
    }

    #[test]
    fn test_group_by_floor_highest_first() {
        let units = vec![
            unit("u1", "101", 1, UnitStateData::Available),
            unit("u2", "301", 3, UnitStateData::Sold),
            unit("u3", "201", 2, UnitStateData::Reserved),
        ];
        let floors = group_by_floor(&units);
        let order: Vec<i32> = floors.iter().map(|(f, _)| *f).collect();
        assert_eq!(order, vec![3, 2, 1]);
    }

    #[test]
    fn test_group_by_floor_orders_units_within_floor() {
        let units = vec![
            unit("u1", "103", 1, UnitStateData::Available),
            unit("u2", "101", 1, UnitStateData::Available),
            unit("u3", "102", 1, UnitStateData::Available),
        ];
        let floors = group_by_floor(&units);
        assert_eq!(floors.len(), 1);
        let numbers: Vec<&str> = floors[0].1.iter().map(|u| u.unit_number.as_str()).collect();
        assert_eq!(numbers, vec!["101", "102", "103"]);
    }

    #[test]
    fn test_group_by_floor_empty() {
        assert!(group_by_floor(&[]).is_empty());
    }

    #[test]
    fn test_group_by_floor_negative_floor_last() {
        // Basement levels sort below ground floors
        let units = vec![
            unit("u1", "S1", -1, UnitStateData::Available),
            unit("u2", "101", 1, UnitStateData::Available),
        ];
        let floors = group_by_floor(&units);
        assert_eq!(floors[0].0, 1);
        assert_eq!(floors[1].0, -1);
    }
}
