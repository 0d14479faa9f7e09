//! Left-hand control panel: display name, design grid, mug color grid,
//! and below a divider whatever the caller nests in it.

use dioxus::prelude::*;
use mugprint_scene::{Action, CatalogEntry, DESIGNS, MUGS, SelectionState};

/// Props for the [`ControlPanel`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ControlPanelProps {
    /// Current selection, used to mark the active options and fill the
    /// name input.
    state: SelectionState,
    /// Fired once per user interaction.
    on_action: EventHandler<Action>,
    /// Panel footer, drawn after a divider (the export button).
    children: Element,
}

/// Customization controls.
///
/// Every interaction is translated into one [`Action`]; the panel owns
/// no selection state of its own.
#[component]
pub fn ControlPanel(props: ControlPanelProps) -> Element {
    let on_action = props.on_action;

    rsx! {
        div { class: "panel controls",
            header { class: "panel-header",
                h1 { class: "title", "Mug Designer" }
                p { class: "subtitle", "Tùy chỉnh thiết kế của bạn" }
            }

            div { class: "control-group",
                label { class: "control-label", r#for: "display-name", "Tên hiển thị" }
                input {
                    id: "display-name",
                    class: "text-input",
                    r#type: "text",
                    placeholder: "Nhập tên của bạn...",
                    value: "{props.state.display_name}",
                    oninput: move |e| on_action.call(Action::SetDisplayName(e.value())),
                }
            }

            div { class: "control-group",
                span { class: "control-label", "Chọn Design" }
                div { class: "option-grid designs",
                    for entry in DESIGNS.entries() {
                        {render_design(entry, entry == props.state.design, on_action)}
                    }
                }
            }

            div { class: "control-group",
                span { class: "control-label", "Màu Mug" }
                div { class: "option-grid mugs",
                    for entry in MUGS.entries() {
                        {render_mug(entry, entry == props.state.mug, on_action)}
                    }
                }
            }

            hr { class: "divider" }
            {props.children}
        }
    }
}

/// CSS class for an option tile.
const fn option_class(active: bool) -> &'static str {
    if active { "option active" } else { "option" }
}

/// A design tile: thumbnail of the design image.
fn render_design(
    entry: &'static CatalogEntry,
    active: bool,
    on_action: EventHandler<Action>,
) -> Element {
    rsx! {
        button {
            class: option_class(active),
            title: "{entry.label}",
            "aria-pressed": "{active}",
            onclick: move |_| on_action.call(Action::SelectDesign(entry)),
            img {
                src: "{entry.image_url}",
                alt: "{entry.label}",
                crossorigin: "anonymous",
            }
        }
    }
}

/// A mug color tile: text label only.
fn render_mug(
    entry: &'static CatalogEntry,
    active: bool,
    on_action: EventHandler<Action>,
) -> Element {
    rsx! {
        button {
            class: option_class(active),
            "aria-pressed": "{active}",
            onclick: move |_| on_action.call(Action::SelectMug(entry)),
            "{entry.label}"
        }
    }
}
