//! Live preview canvas.

use dioxus::prelude::*;
use mugprint_scene::Dimensions;

/// DOM id of the preview `<canvas>`; [`crate::raster::blit_to_canvas`]
/// looks it up by this id.
pub const PREVIEW_CANVAS_ID: &str = "mug-preview";

/// Props for the [`PreviewCanvas`] component.
#[derive(Props, Clone, PartialEq)]
pub struct PreviewCanvasProps {
    /// Backing size of the canvas in pixels.
    dimensions: Dimensions,
    /// Whether any asset of the current selection is still loading.
    #[props(default)]
    loading: bool,
}

/// The preview surface. Pixels are pushed into it from outside, so the
/// element itself is static apart from its size.
#[component]
pub fn PreviewCanvas(props: PreviewCanvasProps) -> Element {
    let w = props.dimensions.width;
    let h = props.dimensions.height;

    rsx! {
        div { class: "panel preview",
            div { class: "preview-header",
                h2 { class: "preview-title", "Xem trước thiết kế" }
                span { class: "badge", "Live Preview" }
            }
            div { class: "canvas-frame",
                canvas {
                    id: PREVIEW_CANVAS_ID,
                    width: "{w}",
                    height: "{h}",
                    class: if props.loading { "preview-canvas loading" } else { "preview-canvas" },
                }
            }
        }
    }
}
