//! Selection state for the interactive plan and the comparison grid.

/// Viewport width below which the comparison grid is considered narrow.
const NARROW_VIEWPORT_PX: f64 = 640.0;

/// Canonical single-select toggle: clicking the already-selected zone
/// deselects it, clicking a different zone moves the selection.
pub fn toggle_single(current: Option<&str>, clicked: &str) -> Option<String> {
    if current == Some(clicked) {
        None
    } else {
        Some(clicked.to_string())
    }
}

/// Maximum number of simultaneous comparison selections for a viewport width.
pub fn compare_cap(viewport_width: f64) -> usize {
    if viewport_width < NARROW_VIEWPORT_PX {
        2
    } else {
        4
    }
}

/// Capped multi-select for unit comparison. Selections beyond the cap are
/// silently ignored: no eviction, no error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareSelection {
    cap: usize,
    selected: Vec<String>,
}

impl CompareSelection {
    pub fn new(cap: usize) -> Self {
        CompareSelection {
            cap,
            selected: Vec::new(),
        }
    }

    /// Toggle an id: deselect it if present, otherwise select it while room
    /// remains under the cap.
    pub fn toggle(&mut self, id: &str) {
        if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
        } else if self.selected.len() < self.cap {
            self.selected.push(id.to_string());
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Selected ids in the order they were chosen.
    pub fn ids(&self) -> &[String] {
        &self.selected
    }
}
