//! Module implementing the render request types and their builder.

use std::fmt;

use thiserror::Error;

use crate::model::constants::{MAX_BOX_COUNT, MAX_CAPTION_LENGTH, MAX_FONT_SIZE,
                              MAX_STROKE_WIDTH};
use crate::model::de::deserialize_id;
use super::color::Color;
use super::geometry::BoxPosition;


/// Describes a single text box of a render request.
///
/// Every field other than `text` is optional and, when present,
/// overrides the corresponding default from the request or template.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BoxSpec {
    /// Text to render in the box.
    ///
    /// Ignored when the request carries a `caption` to distribute instead.
    #[serde(default)]
    pub text: String,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Text color.
    pub color: Option<Color>,
    /// Color of the text outline.
    pub outline_color: Option<Color>,
    /// Width of the text outline. Zero means no outline.
    pub stroke_width: Option<u32>,
}

impl BoxSpec {
    /// Create a box with given text and everything else left at defaults.
    #[inline]
    pub fn text<S: Into<String>>(text: S) -> Self {
        BoxSpec{text: text.into(), ..BoxSpec::default()}
    }

    /// Place the box at an explicit position.
    #[inline]
    pub fn at(self, rect: BoxPosition) -> Self {
        BoxSpec{
            x: Some(rect.x), y: Some(rect.y),
            width: Some(rect.width), height: Some(rect.height),
            ..self
        }
    }

    /// Whether the box has any text to render.
    #[inline]
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Whether the box specifies any of its coordinates.
    #[inline]
    pub fn has_geometry(&self) -> bool {
        self.x.is_some() || self.y.is_some() || self.width.is_some() || self.height.is_some()
    }

    /// Apply the coordinates of this box over the `base` rectangle.
    pub fn place(&self, base: BoxPosition) -> BoxPosition {
        BoxPosition{
            x: self.x.unwrap_or(base.x),
            y: self.y.unwrap_or(base.y),
            width: self.width.unwrap_or(base.width),
            height: self.height.unwrap_or(base.height),
        }
    }
}

impl fmt::Debug for BoxSpec {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let mut ds = fmt.debug_struct("BoxSpec");
        ds.field("text", &self.text);

        macro_rules! fmt_opt_field {
            ($name:ident) => (
                if let Some(ref $name) = self.$name {
                    ds.field(stringify!($name), $name);
                }
            );
        }
        fmt_opt_field!(x);
        fmt_opt_field!(y);
        fmt_opt_field!(width);
        fmt_opt_field!(height);
        fmt_opt_field!(color);
        fmt_opt_field!(outline_color);
        fmt_opt_field!(stroke_width);

        ds.finish()
    }
}


/// Describes a request to render a meme. Used as an input structure.
///
/// The text comes either from `caption`, which is split between the template's
/// boxes, or from the `text` of each box in `boxes`.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RenderRequest {
    /// Identifier of the template to caption.
    #[serde(deserialize_with = "deserialize_id")]
    pub template_id: String,
    /// Caption to distribute between boxes, possibly with `||`-separated segments.
    #[serde(default)]
    pub caption: Option<String>,
    /// Text boxes, or per-box overrides if `caption` is given.
    #[serde(default)]
    pub boxes: Vec<BoxSpec>,
    /// Name of the font to use.
    pub font: Option<String>,
    /// Font size (in pixels).
    pub max_font_size: Option<u32>,
    /// Default text color for all boxes.
    pub color: Option<Color>,
    /// Default outline color for all boxes.
    pub outline_color: Option<Color>,
    /// Default outline width for all boxes.
    pub stroke_width: Option<u32>,
    /// Name of the output file. If omitted, a unique one is generated.
    pub filename: Option<String>,
}

impl RenderRequest {
    /// Create a `Builder` for a `RenderRequest`.
    #[inline]
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Whether the request includes any text to render.
    pub fn has_text(&self) -> bool {
        match self.caption {
            Some(ref c) => !c.trim().is_empty(),
            None => self.boxes.iter().any(BoxSpec::has_text),
        }
    }

    /// Check the request against the limits of the data model.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.template_id.trim().is_empty() {
            return Err(RequestError::NoTemplate);
        }
        if self.boxes.len() > MAX_BOX_COUNT {
            return Err(RequestError::TooManyBoxes(self.boxes.len()));
        }

        let texts = self.caption.iter().chain(self.boxes.iter().map(|b| &b.text));
        for text in texts {
            let length = text.chars().count();
            if length > MAX_CAPTION_LENGTH {
                return Err(RequestError::TextTooLong(length));
            }
        }

        if let Some(size) = self.max_font_size {
            if size == 0 || size > MAX_FONT_SIZE {
                return Err(RequestError::FontSize(size));
            }
        }
        let strokes = self.stroke_width.iter()
            .chain(self.boxes.iter().filter_map(|b| b.stroke_width.as_ref()));
        for &stroke in strokes {
            if stroke > MAX_STROKE_WIDTH {
                return Err(RequestError::StrokeWidth(stroke));
            }
        }

        if !self.has_text() {
            return Err(RequestError::NoText);
        }
        Ok(())
    }
}

impl fmt::Debug for RenderRequest {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let mut ds = fmt.debug_struct("RenderRequest");
        ds.field("template_id", &self.template_id);

        macro_rules! fmt_opt_field {
            ($name:ident) => (
                if let Some(ref $name) = self.$name {
                    ds.field(stringify!($name), $name);
                }
            );
        }
        fmt_opt_field!(caption);
        if !self.boxes.is_empty() {
            ds.field("boxes", &self.boxes);
        }
        fmt_opt_field!(font);
        fmt_opt_field!(max_font_size);
        fmt_opt_field!(color);
        fmt_opt_field!(outline_color);
        fmt_opt_field!(stroke_width);
        fmt_opt_field!(filename);

        ds.finish()
    }
}


/// Builder for `RenderRequest`.
#[derive(Debug, Default)]
#[must_use = "unused builder which must be used"]
pub struct Builder {
    request: RenderRequest,
}

impl Builder {
    /// Create a new `Builder` for a `RenderRequest`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Builder {
    /// Set the template that the resulting request will caption.
    #[inline]
    pub fn template<S: Into<String>>(mut self, id: S) -> Self {
        self.request.template_id = id.into(); self
    }

    /// Set the caption to distribute between the template's boxes.
    #[inline]
    pub fn caption<S: Into<String>>(mut self, caption: S) -> Self {
        self.request.caption = Some(caption.into()); self
    }

    /// Add a text box (or, if a caption is set, a per-box override).
    #[inline]
    pub fn text_box(mut self, spec: BoxSpec) -> Self {
        self.request.boxes.push(spec); self
    }

    /// Add a text box with just the text.
    #[inline]
    pub fn text<S: Into<String>>(self, text: S) -> Self {
        self.text_box(BoxSpec::text(text))
    }

    #[inline]
    pub fn font<S: Into<String>>(mut self, font: S) -> Self {
        self.request.font = Some(font.into()); self
    }

    #[inline]
    pub fn font_size(mut self, size: u32) -> Self {
        self.request.max_font_size = Some(size); self
    }

    #[inline]
    pub fn color(mut self, color: Color) -> Self {
        self.request.color = Some(color); self
    }

    #[inline]
    pub fn outline_color(mut self, color: Color) -> Self {
        self.request.outline_color = Some(color); self
    }

    #[inline]
    pub fn stroke_width(mut self, width: u32) -> Self {
        self.request.stroke_width = Some(width); self
    }

    /// Set the name of the output file.
    #[inline]
    pub fn filename<S: Into<String>>(mut self, filename: S) -> Self {
        self.request.filename = Some(filename.into()); self
    }

    /// Build the resulting `RenderRequest`.
    pub fn build(self) -> Result<RenderRequest, RequestError> {
        self.request.validate()?;
        Ok(self.request)
    }
}


/// Error while building or validating a `RenderRequest`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RequestError {
    /// No template given.
    #[error("template_id is required")]
    NoTemplate,
    /// Neither the caption nor any of the boxes have text.
    #[error("at least one box with non-empty text is required")]
    NoText,
    /// Too many boxes.
    #[error("too many boxes: {0} > {max}", max = MAX_BOX_COUNT)]
    TooManyBoxes(usize),
    /// Caption or box text too long.
    #[error("text too long: {0} > {max}", max = MAX_CAPTION_LENGTH)]
    TextTooLong(usize),
    /// Font size out of range.
    #[error("invalid font size: {0} (must be between 1 and {max})", max = MAX_FONT_SIZE)]
    FontSize(u32),
    /// Outline too wide.
    #[error("stroke width too large: {0} > {max}", max = MAX_STROKE_WIDTH)]
    StrokeWidth(u32),
}
