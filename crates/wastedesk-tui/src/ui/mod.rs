//! Terminal UI module using ratatui.
//!
//! - `render`: frame layout, shell (title, sidebar, status bar) and overlays
//! - `input`: keyboard event handling
//! - `styles`: colors and text styling
//! - `pages`: content pane for each dashboard page

pub mod input;
pub mod pages;
pub mod render;
pub mod styles;
