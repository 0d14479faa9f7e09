//! mugprint-io: Browser I/O and Dioxus component library.
//!
//! Fetches and caches catalog assets, blits composited frames to the
//! preview canvas, triggers Blob downloads, and provides the UI
//! components of the mugprint web application.

pub mod components;
pub mod download;
pub mod fetch;
pub mod loader;
pub mod raster;

pub use components::{ControlPanel, ExportButton, PREVIEW_CANVAS_ID, PreviewCanvas};
pub use fetch::CrossOrigin;
pub use loader::{AssetLoader, use_asset_loader};
