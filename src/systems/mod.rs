//! Application systems
//!
//! Modular systems extracted from main.rs for better organization and testability.

mod frames;
mod render;
mod window;

pub use frames::{RedrawRequester, RedrawTarget};
pub use render::{RenderError, RenderSystem, UiFrame};
pub use window::{WindowError, WindowSystem};
