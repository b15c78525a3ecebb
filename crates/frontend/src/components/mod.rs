pub mod carousel;
pub mod detail_panel;
pub mod floor_plan;
pub mod gallery_modal;
pub mod unit_grid;
