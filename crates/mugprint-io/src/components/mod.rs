//! Dioxus UI components for the mug customizer.
//!
//! The control panel, the live preview canvas, and the export button.

mod control_panel;
mod export;
mod preview;

pub use control_panel::ControlPanel;
pub use export::ExportButton;
pub use preview::{PREVIEW_CANVAS_ID, PreviewCanvas};
