//! mugprint-scene: Pure scene building and compositing (sans-IO).
//!
//! Turns the customizer's selection into pixels:
//! selection snapshot -> layer list -> rasterized frame.
//!
//! This crate has **no I/O dependencies** -- assets arrive as byte
//! slices, are decoded here, and are looked up by URL in an
//! [`AssetCache`]. Fetching, canvas access, and downloads live in
//! `mugprint-io`.

pub mod assets;
pub mod catalog;
pub mod compose;
pub mod decode;
pub mod scene;
pub mod selection;
pub mod text;
pub mod types;

pub use assets::{AssetCache, AssetState, Assets};
pub use catalog::{Catalog, CatalogEntry, DESIGNS, DesignOption, MUGS, MugOption};
pub use compose::{Frame, render, render_skipping};
pub use decode::{decode_font, decode_image};
pub use scene::{Layer, LayerKind, Scene, build_scene};
pub use selection::{Action, DEFAULT_DISPLAY_NAME, SelectionError, SelectionState};
pub use types::{
    Dimensions, FontArc, FrameGeometry, Pixmap, Rect, Rgba8, SceneError, TextAlign, TextStyle,
};

/// Build the scene for `state` with the default geometry and label
/// style, then rasterize it at on-screen size.
///
/// # Errors
///
/// See [`build_scene`] and [`compose::render`].
pub fn compose_default(state: &SelectionState, assets: &Assets<'_>) -> Result<Frame, SceneError> {
    let scene = build_scene(state, &FrameGeometry::default(), &TextStyle::default())?;
    render(&scene, assets, 1.0)
}
