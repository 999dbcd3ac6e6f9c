//! Module implementing the `Template` type.

use std::fmt;

use crate::model::constants::{font_size_for, DEFAULT_BOX_COUNT, DEFAULT_TEMPLATE_HEIGHT,
                              DEFAULT_TEMPLATE_WIDTH};
use crate::model::de::deserialize_id;
use super::color::Color;
use super::geometry::BoxPosition;


/// Describes a registered meme template:
/// its base image, together with default geometry & style of its captions.
///
/// Templates are loaded once (see `TemplateRegistry`) and never modified.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Template {
    /// Identifier of the template in its registry.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Human readable name, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Reference to the template image:
    /// either a path (relative to the image root) or an http(s) URL.
    #[serde(alias = "url_cleanmeme", alias = "url")]
    pub image: String,
    /// Nominal width of the template image.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Nominal height of the template image.
    #[serde(default = "default_height")]
    pub height: u32,
    /// How many text boxes the template expects.
    #[serde(default = "default_box_count")]
    pub box_count: usize,
    /// Explicit positions of the text boxes, in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_positions: Option<Vec<BoxPosition>>,
    /// Name of the preferred font.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    /// Font size (in pixels) that captions are rendered with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_font_size: Option<u32>,
    /// Default text color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Default color of the text outline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_color: Option<Color>,
    /// Default width of the text outline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<u32>,
}

fn default_width() -> u32 { DEFAULT_TEMPLATE_WIDTH }
fn default_height() -> u32 { DEFAULT_TEMPLATE_HEIGHT }
fn default_box_count() -> usize { DEFAULT_BOX_COUNT }

impl Template {
    /// Create a template for given image, with all the defaults.
    pub fn new<I: Into<String>, S: Into<String>>(id: I, image: S, width: u32, height: u32) -> Self {
        Template{
            id: id.into(),
            name: None,
            image: image.into(),
            width, height,
            box_count: DEFAULT_BOX_COUNT,
            box_positions: None,
            font: None,
            max_font_size: None,
            color: None,
            outline_color: None,
            stroke_width: None,
        }
    }
}

impl Template {
    /// Explicit box positions of this template, if it has any.
    ///
    /// An empty list of positions is treated the same as no list at all.
    #[inline]
    pub fn positions(&self) -> Option<&[BoxPosition]> {
        match self.box_positions {
            Some(ref positions) if !positions.is_empty() => Some(&positions[..]),
            _ => None,
        }
    }

    /// Font size to render the captions with, if the request doesn't say otherwise.
    #[inline]
    pub fn font_size(&self) -> u32 {
        self.max_font_size.unwrap_or_else(|| font_size_for(self.width, self.height))
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let mut ds = fmt.debug_struct("Template");
        ds.field("id", &self.id);
        ds.field("image", &self.image);
        ds.field("size", &format_args!("{}x{}", self.width, self.height));
        ds.field("box_count", &self.box_count);

        macro_rules! fmt_opt_field {
            ($name:ident) => (
                if let Some(ref $name) = self.$name {
                    ds.field(stringify!($name), $name);
                }
            );
        }
        fmt_opt_field!(box_positions);
        fmt_opt_field!(font);
        fmt_opt_field!(max_font_size);
        fmt_opt_field!(color);
        fmt_opt_field!(outline_color);
        fmt_opt_field!(stroke_width);

        ds.finish()
    }
}


#[cfg(test)]
mod tests {
    use speculoos::prelude::*;
    use crate::model::{BoxPosition, Color};
    use super::Template;

    #[test]
    fn registry_entry_with_numeric_id() {
        let json = r#"{"id": 61579, "name": "One Does Not Simply",
                       "url_cleanmeme": "memes/61579.jpg",
                       "width": 568, "height": 335, "box_count": 2}"#;
        let template: Template = serde_json::from_str(json).unwrap();
        assert_eq!("61579", template.id);
        assert_eq!("memes/61579.jpg", template.image);
        assert_eq!((568, 335), (template.width, template.height));
        assert_that!(template.positions()).is_none();
        assert_eq!(40, template.font_size());
    }

    #[test]
    fn registry_entry_with_everything() {
        let json = r##"{"id": "drake", "image": "memes/drake.png",
                        "width": 1200, "height": 1200, "box_count": 2,
                        "box_positions": [
                            {"x": 600, "y": 0, "width": 600, "height": 600},
                            {"x": 600, "y": 600, "width": 600, "height": 600}
                        ],
                        "font": "arial", "max_font_size": 55,
                        "color": "black", "outline_color": "#fff", "stroke_width": 0}"##;
        let template: Template = serde_json::from_str(json).unwrap();
        assert_eq!(Some(&[BoxPosition::new(600, 0, 600, 600),
                          BoxPosition::new(600, 600, 600, 600)][..]),
                   template.positions());
        assert_eq!(Some("arial".to_owned()), template.font);
        assert_eq!(55, template.font_size());
        assert_eq!(Some(Color::black()), template.color);
        assert_eq!(Some(Color::white()), template.outline_color);
        assert_eq!(Some(0), template.stroke_width);
    }

    #[test]
    fn defaults_for_missing_fields() {
        let template: Template = serde_json::from_str(
            r#"{"id": "x", "url": "https://example.com/x.png", "box_positions": []}"#).unwrap();
        assert_eq!((600, 400), (template.width, template.height));
        assert_eq!(2, template.box_count);
        assert_that!(template.positions()).is_none();
    }

    #[test]
    fn image_reference_is_required() {
        let result = serde_json::from_str::<Template>(r#"{"id": "x"}"#);
        assert_that!(result).is_err();
    }
}
