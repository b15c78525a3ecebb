use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sales state of a unit. Only available units are selectable in the
/// comparison grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitState {
    Available,
    Reserved,
    Sold,
}

impl std::fmt::Display for UnitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitState::Available => write!(f, "Available"),
            UnitState::Reserved => write!(f, "Reserved"),
            UnitState::Sold => write!(f, "Sold"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub id: Uuid,
    pub name: String,
    /// URL of the floor-plan SVG rendered by the interactive selector.
    pub plan_image: String,
    /// Fallback image shown before any zone is selected.
    pub distribution_image: Option<String>,
    pub address: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// A floor-plan model: correlated with a plan zone through `id_plan`,
/// matched by exact trimmed string equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentModel {
    pub id: Uuid,
    pub building_id: Uuid,
    pub name: String,
    pub base_square_meters: Option<f64>,
    pub id_plan: String,
    pub primary_image: Option<String>,
    /// Free-shape gallery field: a JSON-encoded string, a plain array, or
    /// garbage. Always read through `gallery::parse_gallery`.
    pub batch_images: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: Uuid,
    pub building_id: Uuid,
    pub unit_number: String,
    pub floor: i32,
    pub real_square_meters: Option<f64>,
    pub state: UnitState,
}
