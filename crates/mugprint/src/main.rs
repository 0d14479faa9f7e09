use std::rc::Rc;

use dioxus::prelude::*;
use mugprint_io::raster;
use mugprint_io::{
    ControlPanel, CrossOrigin, ExportButton, PREVIEW_CANVAS_ID, PreviewCanvas, use_asset_loader,
};
use mugprint_scene::{Action, Frame, FrameGeometry, Scene, SelectionState, TextStyle};

fn main() {
    console_error_panic_hook::set_once();
    dioxus::launch(app);
}

/// Scene for `state` with the on-screen geometry and label style.
///
/// `None` (with a console warning) if the geometry is invalid.
fn current_scene(state: &SelectionState) -> Option<Scene> {
    mugprint_scene::build_scene(state, &FrameGeometry::default(), &TextStyle::default())
        .inspect_err(|e| web_sys::console::warn_1(&format!("invalid scene: {e}").into()))
        .ok()
}

/// Root application component.
///
/// Owns the selection and the last painted frame, and wires the
/// control panel, preview canvas, and export button together.
fn app() -> Element {
    // --- Application state ---
    let mut selection = use_signal(SelectionState::default);
    let mut frame = use_signal(|| Option::<Rc<Frame>>::None);
    let loader = use_asset_loader(CrossOrigin::Anonymous);

    // --- Asset requests ---
    // Re-runs on selection change only; the fetches it starts write the
    // caches, which wakes the render effect below.
    use_effect(move || {
        let Some(scene) = current_scene(&selection.read()) else {
            return;
        };
        for url in scene.image_urls() {
            loader.ensure_image(url);
        }
        for url in scene.font_urls() {
            loader.ensure_font(url);
        }
    });

    // --- Render effect ---
    // Re-runs whenever the selection or either cache changes. Each run
    // paints from a fresh snapshot, so the canvas always shows the
    // latest selection with whatever assets have arrived.
    // The frame is only replaced once its pixels are on the canvas.
    use_effect(move || {
        let Some(scene) = current_scene(&selection.read()) else {
            return;
        };
        match loader.with_assets(|assets| mugprint_scene::render(&scene, assets, 1.0)) {
            Ok(painted) => {
                match raster::present(painted, |p| raster::blit_to_canvas(PREVIEW_CANVAS_ID, p)) {
                    Ok(shown) => frame.set(Some(shown)),
                    Err(e) => {
                        web_sys::console::warn_1(&format!("preview paint failed: {e}").into());
                    }
                }
            }
            Err(e) => {
                web_sys::console::warn_1(&format!("render failed: {e}").into());
            }
        }
    });

    // --- Control handler ---
    let on_action = move |action: Action| {
        let next = selection.peek().apply(action);
        match next {
            Ok(next) => selection.set(next),
            Err(e) => web_sys::console::warn_1(&format!("selection rejected: {e}").into()),
        }
    };

    let loading = current_scene(&selection.read()).is_some_and(|scene| {
        let images = loader.images.read();
        let fonts = loader.fonts.read();
        scene.image_urls().any(|url| images.is_pending(url))
            || scene.font_urls().any(|url| fonts.is_pending(url))
    });

    // --- Layout ---
    rsx! {
        style { dangerous_inner_html: include_str!("../assets/main.css") }

        div { class: "app",
            ControlPanel {
                state: selection(),
                on_action: on_action,
                ExportButton {
                    frame: frame(),
                    loader: loader,
                }
            }

            div { class: "stage",
                PreviewCanvas {
                    dimensions: FrameGeometry::default().canvas,
                    loading: loading,
                }
            }
        }
    }
}
