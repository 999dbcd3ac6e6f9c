//! Rendering of text lines inside caption boxes.

use std::fmt;

use image::RgbaImage;

use crate::model::{BoxPosition, Color, HorizontalAnchor};
use crate::resources::SizedFont;
use super::mask::Clip;
use super::wrap::TextMetrics;


/// Style of the rendered caption text.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub color: Color,
    pub outline_color: Color,
    /// Width of the outline in pixels. Zero means no outline.
    pub stroke_width: u32,
}

impl TextStyle {
    #[inline]
    pub fn new(color: Color, outline_color: Color, stroke_width: u32) -> Self {
        TextStyle{color, outline_color, stroke_width}
    }
}

impl fmt::Debug for TextStyle {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "TextStyle({} on {}/{}px)",
            self.color, self.outline_color, self.stroke_width)
    }
}


/// How the outline of a box's text was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrokeOutcome {
    /// Text was drawn with an outline.
    Applied,
    /// Text was drawn without an outline, because none was requested.
    NotRequested,
    /// The font cannot be outlined, so text was drawn without one.
    Unsupported,
}


/// Summary of rendering text within a single box.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BoxOutcome {
    /// Rectangle that the text was laid out in.
    pub rect: BoxPosition,
    /// Lines that were drawn, top to bottom.
    pub lines: Vec<String>,
    /// Number of trailing lines that didn't fit in the box.
    pub dropped: usize,
    pub stroke: StrokeOutcome,
}


/// Render the lines of text within given box.
///
/// The block of lines is centered vertically if it fits in the box,
/// and starts at the box's top otherwise. Lines starting at or below
/// the box's bottom edge are dropped, but the first one is always drawn.
/// Each line is centered horizontally around the anchor.
pub fn render_box(img: &mut RgbaImage,
                  font: &SizedFont,
                  lines: &[String],
                  rect: BoxPosition,
                  anchor: HorizontalAnchor,
                  style: &TextStyle) -> BoxOutcome {
    trace!("render_box(..., {:?}, <{} line(s)>, {}, {:?}, {:?})",
        font, lines.len(), rect, anchor, style);

    let line_metrics = font.line_metrics();
    let total_height = line_metrics.height * lines.len() as f32;
    let box_height = rect.height as f32;
    let top = if total_height < box_height {
        rect.y as f32 + ((box_height - total_height) / 2.0).floor()
    } else {
        rect.y as f32
    };
    let bottom = rect.bottom() as f32;
    let anchor_x = anchor.anchor_x(&rect);

    let stroke = if style.stroke_width == 0 {
        StrokeOutcome::NotRequested
    } else if font.supports_stroke() {
        StrokeOutcome::Applied
    } else {
        debug!("Font `{}` doesn't support outlines, drawing plain text", font.name());
        StrokeOutcome::Unsupported
    };

    let mut drawn = vec![];
    for (i, line) in lines.iter().enumerate() {
        let line_top = top + line_metrics.height * i as f32;
        if i > 0 && line_top >= bottom {
            break;
        }
        let width = font.text_width(line);
        let x = (anchor_x - width / 2.0).round() as i32;
        let y = (line_top + line_metrics.baseline).round() as i32;

        let margin = if stroke == StrokeOutcome::Applied { style.stroke_width } else { 0 };
        let mask = font.coverage(line, Some(Clip::around_image(img, x, y, margin)));
        trace!("Line #{} at ({}, {}) covers {}x{} pixel(s)",
            i + 1, x, y, mask.width(), mask.height());
        if stroke == StrokeOutcome::Applied {
            mask.dilate(style.stroke_width).draw(img, x, y, style.outline_color);
        }
        mask.draw(img, x, y, style.color);
        drawn.push(line.clone());
    }

    let dropped = lines.len() - drawn.len();
    if dropped > 0 {
        debug!("{} line(s) didn't fit in the {} box", dropped, rect);
    }
    BoxOutcome{rect, lines: drawn, dropped, stroke}
}
