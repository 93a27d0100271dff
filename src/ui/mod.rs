//! egui control panel

pub mod panels;
pub mod state;

pub use panels::{draw_side_panel, PanelInfo};
pub use state::UiState;
