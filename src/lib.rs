//! Animated Sierpinski gasket viewer
//!
//! Application-level modules shared by the binary and the integration tests.

pub mod config;
pub mod systems;
pub mod ui;
