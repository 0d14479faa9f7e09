//! Print-file export button.

use std::rc::Rc;

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdDownload;
use mugprint_export::{OVERSAMPLING, PNG_MIME, export_latest};
use mugprint_scene::Frame;

use crate::download;
use crate::loader::AssetLoader;

/// Props for the [`ExportButton`] component.
#[derive(Props, Clone)]
pub struct ExportButtonProps {
    /// The frame currently on the preview canvas. `None` until the
    /// first paint.
    frame: Option<Rc<Frame>>,
    /// Asset caches the frame was painted from.
    loader: AssetLoader,
}

impl PartialEq for ExportButtonProps {
    fn eq(&self, other: &Self) -> bool {
        let frames_eq = match (&self.frame, &other.frame) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        frames_eq && self.loader == other.loader
    }
}

/// Downloads the painted design as `custom-mug-design.png` at
/// [`OVERSAMPLING`] times the preview resolution.
#[component]
pub fn ExportButton(props: ExportButtonProps) -> Element {
    let mut export_error = use_signal(|| Option::<String>::None);

    let onclick = {
        let frame = props.frame.clone();
        let loader = props.loader;
        move |_| {
            let outcome = loader
                .peek_assets(|assets| export_latest(frame.as_deref(), assets, OVERSAMPLING));
            match outcome {
                Ok(Some(export)) => {
                    if let Err(e) =
                        download::trigger_download_bytes(&export.png, export.filename, PNG_MIME)
                    {
                        export_error.set(Some(format!("Download failed: {e}")));
                    } else {
                        export_error.set(None);
                    }
                }
                Ok(None) => {
                    web_sys::console::warn_1(&"export requested before first paint".into());
                }
                Err(e) => export_error.set(Some(format!("Export failed: {e}"))),
            }
        }
    };

    rsx! {
        div { class: "export",
            button {
                class: "export-button",
                onclick: onclick,
                Icon { width: 18, height: 18, icon: LdDownload }
                span { "Tải File In (300 DPI)" }
            }
            if let Some(ref err) = export_error() {
                p { class: "export-error", "{err}" }
            }
        }
    }
}
