//! Shared types for the mugprint scene: geometry, text style, errors.

use serde::{Deserialize, Serialize};

/// Re-export `Pixmap` so downstream crates can hold composited frames
/// and decoded images without depending on `tiny-skia` directly.
pub use tiny_skia::Pixmap;

/// Re-export `FontArc` so downstream crates can cache decoded fonts
/// without depending on `ab_glyph` directly.
pub use ab_glyph::FontArc;

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Dimensions multiplied uniformly by an integer factor.
    #[must_use]
    pub const fn scaled(self, factor: u32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

/// An axis-aligned rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    #[must_use]
    pub fn right(self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(self) -> f32 {
        self.y + self.height
    }

    /// Returns `true` if `other` lies entirely within `self`
    /// (shared edges count as inside).
    #[must_use]
    pub fn contains_rect(self, other: Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Fixed layout of the composited frame.
///
/// The placement rectangle is the print-safe area on the mug artwork.
/// The design image fills its top slice; the name label sits in the
/// bottom `text_band`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameGeometry {
    /// On-screen canvas size.
    pub canvas: Dimensions,
    /// Region reserved for the design image and the name label.
    pub placement: Rect,
    /// Height reserved at the bottom of `placement` for the label.
    pub text_band: f32,
    /// Distance from the bottom of `placement` to the top of the label box.
    pub text_offset: f32,
}

impl FrameGeometry {
    /// Default canvas size.
    pub const DEFAULT_CANVAS: Dimensions = Dimensions {
        width: 600,
        height: 500,
    };
    /// Default placement rectangle, centered on the mug face.
    pub const DEFAULT_PLACEMENT: Rect = Rect::new(250.0, 140.0, 180.0, 280.0);
    /// Default label band height.
    pub const DEFAULT_TEXT_BAND: f32 = 50.0;
    /// Default label box offset from the placement bottom.
    pub const DEFAULT_TEXT_OFFSET: f32 = 40.0;

    /// The full canvas as a rectangle; the mug background fills it.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn background_rect(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            self.canvas.width as f32,
            self.canvas.height as f32,
        )
    }

    /// Where the design image is drawn: the placement rectangle minus
    /// the bottom label band.
    #[must_use]
    pub fn design_rect(&self) -> Rect {
        Rect::new(
            self.placement.x,
            self.placement.y,
            self.placement.width,
            self.placement.height - self.text_band,
        )
    }

    /// The label box: full placement width, starting `text_offset`
    /// above the bottom of the placement rectangle.
    #[must_use]
    pub fn text_rect(&self) -> Rect {
        Rect::new(
            self.placement.x,
            self.placement.bottom() - self.text_offset,
            self.placement.width,
            self.text_offset,
        )
    }

    /// Check that the placement fits inside the canvas and that the
    /// label band leaves room for the design.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidGeometry`] describing the first
    /// violated constraint.
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(SceneError::InvalidGeometry(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        if !self.background_rect().contains_rect(self.placement) {
            return Err(SceneError::InvalidGeometry(format!(
                "placement {:?} does not fit in the {}x{} canvas",
                self.placement, self.canvas.width, self.canvas.height
            )));
        }
        if !(self.text_band > 0.0 && self.text_band < self.placement.height) {
            return Err(SceneError::InvalidGeometry(format!(
                "text band {} must be in (0, {})",
                self.text_band, self.placement.height
            )));
        }
        if !(self.text_offset > 0.0 && self.text_offset <= self.text_band) {
            return Err(SceneError::InvalidGeometry(format!(
                "text offset {} must be in (0, {}]",
                self.text_offset, self.text_band
            )));
        }
        Ok(())
    }
}

impl Default for FrameGeometry {
    fn default() -> Self {
        Self {
            canvas: Self::DEFAULT_CANVAS,
            placement: Self::DEFAULT_PLACEMENT,
            text_band: Self::DEFAULT_TEXT_BAND,
            text_offset: Self::DEFAULT_TEXT_OFFSET,
        }
    }
}

/// Straight (non-premultiplied) RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8 {
    /// Create a new color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Horizontal alignment of the label within its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    /// Flush left.
    Left,
    /// Centered.
    #[default]
    Center,
    /// Flush right.
    Right,
}

/// Visual style of the name label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in canvas pixels.
    pub font_size: f32,
    /// Font file to load instead of the built-in bold face. `None`
    /// draws with [`crate::text::default_font`]. The weight comes from
    /// the face itself, so a bold label needs a bold font file.
    pub font_url: Option<String>,
    /// Fill color.
    pub fill: Rgba8,
    /// Drop shadow color.
    pub shadow_color: Rgba8,
    /// Drop shadow blur radius in canvas pixels.
    pub shadow_blur: f32,
    /// Drop shadow offset `(dx, dy)` in canvas pixels.
    pub shadow_offset: (f32, f32),
    /// Horizontal alignment.
    pub align: TextAlign,
}

impl TextStyle {
    /// Default font size.
    pub const DEFAULT_FONT_SIZE: f32 = 24.0;
    /// `#333`
    pub const DEFAULT_FILL: Rgba8 = Rgba8::new(0x33, 0x33, 0x33, 0xff);
    /// `rgba(0,0,0,0.1)`
    pub const DEFAULT_SHADOW_COLOR: Rgba8 = Rgba8::new(0, 0, 0, 26);
    /// Default shadow blur.
    pub const DEFAULT_SHADOW_BLUR: f32 = 2.0;
    /// Default shadow offset.
    pub const DEFAULT_SHADOW_OFFSET: (f32, f32) = (0.0, 1.0);
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: Self::DEFAULT_FONT_SIZE,
            font_url: None,
            fill: Self::DEFAULT_FILL,
            shadow_color: Self::DEFAULT_SHADOW_COLOR,
            shadow_blur: Self::DEFAULT_SHADOW_BLUR,
            shadow_offset: Self::DEFAULT_SHADOW_OFFSET,
            align: TextAlign::Center,
        }
    }
}

/// Errors that can occur while decoding assets or compositing a frame.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// The asset bytes were empty.
    #[error("asset data is empty")]
    EmptyInput,

    /// Failed to decode an image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// Failed to parse a font file.
    #[error("failed to parse font: {0}")]
    FontParse(#[from] ab_glyph::InvalidFont),

    /// An image or frame has zero or unrepresentable dimensions.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// The render scale is not a finite positive number.
    #[error("invalid render scale: {0}")]
    InvalidScale(f32),

    /// The frame geometry is inconsistent.
    #[error("invalid frame geometry: {0}")]
    InvalidGeometry(String),
}
