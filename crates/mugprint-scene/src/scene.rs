//! Scene building: selection snapshot in, ordered layer list out.
//!
//! [`build_scene`] is pure. The compositor turns a [`Scene`] into
//! pixels; the scene itself never looks at asset state.

use crate::selection::SelectionState;
use crate::types::{Dimensions, FrameGeometry, Rect, SceneError, TextStyle};

/// Which of the three fixed layers a [`Layer`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum LayerKind {
    /// Mug background, stretched over the whole canvas.
    Background,
    /// Printed design, inside the placement rectangle.
    Design,
    /// Display name label, in the bottom band.
    Label,
}

/// One drawable layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    /// An image stretched to exactly fill `rect`.
    Image {
        /// Background or design.
        kind: LayerKind,
        /// Image URL, the asset cache key.
        url: String,
        /// Target rectangle in canvas coordinates.
        rect: Rect,
    },
    /// A single line of text.
    Text {
        /// Text content, drawn verbatim.
        text: String,
        /// Label box in canvas coordinates.
        rect: Rect,
        /// Font, colors and shadow.
        style: TextStyle,
    },
}

impl Layer {
    /// The layer's role in the frame.
    #[must_use]
    pub const fn kind(&self) -> LayerKind {
        match self {
            Self::Image { kind, .. } => *kind,
            Self::Text { .. } => LayerKind::Label,
        }
    }
}

/// Ordered layers, back to front, for one selection snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// On-screen canvas size.
    pub canvas: Dimensions,
    /// Layers, back to front.
    pub layers: Vec<Layer>,
}

impl Scene {
    /// URLs of every image layer, back to front.
    pub fn image_urls(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().filter_map(|layer| match layer {
            Layer::Image { url, .. } => Some(url.as_str()),
            Layer::Text { .. } => None,
        })
    }

    /// Font URLs needed by text layers. Labels on the built-in face need
    /// none.
    pub fn font_urls(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().filter_map(|layer| match layer {
            Layer::Text { style, .. } => style.font_url.as_deref(),
            Layer::Image { .. } => None,
        })
    }

    /// The first layer of the given kind.
    #[must_use]
    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind() == kind)
    }

    /// Text content of the label layer.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self.layer(LayerKind::Label) {
            Some(Layer::Text { text, .. }) => Some(text),
            _ => None,
        }
    }
}

/// Build the layer list for `state`.
///
/// Back to front: the mug background over the full canvas, the design
/// in the placement rectangle minus the label band, then the name
/// label. An empty name still produces a label layer; it just draws
/// nothing.
///
/// # Errors
///
/// Returns [`SceneError::InvalidGeometry`] if `geometry` does not pass
/// [`FrameGeometry::validate`].
pub fn build_scene(
    state: &SelectionState,
    geometry: &FrameGeometry,
    style: &TextStyle,
) -> Result<Scene, SceneError> {
    geometry.validate()?;
    Ok(Scene {
        canvas: geometry.canvas,
        layers: vec![
            Layer::Image {
                kind: LayerKind::Background,
                url: state.mug.image_url.to_owned(),
                rect: geometry.background_rect(),
            },
            Layer::Image {
                kind: LayerKind::Design,
                url: state.design.image_url.to_owned(),
                rect: geometry.design_rect(),
            },
            Layer::Text {
                text: state.display_name.clone(),
                rect: geometry.text_rect(),
                style: style.clone(),
            },
        ],
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{DESIGNS, MUGS};
    use crate::selection::Action;

    fn default_scene(state: &SelectionState) -> Scene {
        build_scene(state, &FrameGeometry::default(), &TextStyle::default()).unwrap()
    }

    #[test]
    fn layers_are_ordered_back_to_front() {
        let scene = default_scene(&SelectionState::default());
        let kinds: Vec<_> = scene.layers.iter().map(Layer::kind).collect();
        assert_eq!(
            kinds,
            [LayerKind::Background, LayerKind::Design, LayerKind::Label]
        );
    }

    #[test]
    fn background_fills_canvas() {
        let scene = default_scene(&SelectionState::default());
        let Some(Layer::Image { url, rect, .. }) = scene.layer(LayerKind::Background) else {
            unreachable!("background is always an image layer");
        };
        assert_eq!(url, "/front.png");
        assert_eq!(*rect, Rect::new(0.0, 0.0, 600.0, 500.0));
    }

    #[test]
    fn design_rect_is_the_same_for_every_design() {
        let placement = Rect::new(250.0, 140.0, 180.0, 280.0);
        for entry in DESIGNS.entries() {
            let state = SelectionState::default().apply(Action::SelectDesign(entry)).unwrap();
            let scene = default_scene(&state);
            let Some(Layer::Image { url, rect, .. }) = scene.layer(LayerKind::Design) else {
                unreachable!("design is always an image layer");
            };
            assert_eq!(url, entry.image_url);
            assert_eq!(*rect, Rect::new(250.0, 140.0, 180.0, 230.0));
            assert!(placement.contains_rect(*rect));
            assert!(rect.bottom() <= placement.bottom() - 50.0);
        }
    }

    #[test]
    fn label_text_equals_display_name() {
        let names = ["", "POD Software", "Trần Thị Bích Ngọc", "こんにちは", "a\u{0301}"];
        for name in names {
            let state = SelectionState::default()
                .apply(Action::SetDisplayName(name.to_owned()))
                .unwrap();
            assert_eq!(default_scene(&state).text(), Some(name));
        }
    }

    #[test]
    fn mug_change_replaces_only_background() {
        let before = default_scene(&SelectionState::default());
        let black = MUGS.get("black").unwrap();
        let after = SelectionState::default().apply(Action::SelectMug(black)).unwrap();
        let after = default_scene(&after);
        assert_ne!(before.layers[0], after.layers[0]);
        assert_eq!(before.layers[1..], after.layers[1..]);
    }

    #[test]
    fn urls_needed_by_scene() {
        let scene = default_scene(&SelectionState::default());
        let urls: Vec<_> = scene.image_urls().collect();
        assert_eq!(urls, ["/front.png", DESIGNS.first().image_url]);
        assert_eq!(scene.font_urls().count(), 0);

        let style = TextStyle {
            font_url: Some("/fonts/Brand-Bold.ttf".into()),
            ..TextStyle::default()
        };
        let scene =
            build_scene(&SelectionState::default(), &FrameGeometry::default(), &style).unwrap();
        let fonts: Vec<_> = scene.font_urls().collect();
        assert_eq!(fonts, ["/fonts/Brand-Bold.ttf"]);
    }

    #[test]
    fn invalid_geometry_builds_no_scene() {
        let geometry = FrameGeometry {
            text_offset: 0.0,
            ..FrameGeometry::default()
        };
        let result = build_scene(&SelectionState::default(), &geometry, &TextStyle::default());
        assert!(matches!(result, Err(SceneError::InvalidGeometry(_))));
    }
}
