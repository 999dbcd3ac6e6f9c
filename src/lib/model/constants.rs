//! Module defining constants relevant to the data model.

use super::types::Color;


/// Name of the default font.
pub const DEFAULT_FONT: &str = "impact";

/// Default color of the text.
pub const DEFAULT_COLOR: Color = Color(0xff, 0xff, 0xff);
/// Default color of the text outline.
/// This should be the inversion of DEFAULT_COLOR.
pub const DEFAULT_OUTLINE_COLOR: Color = Color(0x0, 0x0, 0x0);
/// Default width of the text outline, in pixels.
pub const DEFAULT_STROKE_WIDTH: u32 = 2;

/// Template width assumed when the registry doesn't provide one.
pub const DEFAULT_TEMPLATE_WIDTH: u32 = 600;
/// Template height assumed when the registry doesn't provide one.
pub const DEFAULT_TEMPLATE_HEIGHT: u32 = 400;
/// Box count assumed when the registry doesn't provide one.
pub const DEFAULT_BOX_COUNT: usize = 2;

/// Separator of per-box segments within a single caption string.
pub const CAPTION_DELIMITER: &str = "||";
/// How caption segments are joined back when presented as a single string.
pub const CAPTION_JOINER: &str = " || ";

/// Distance (in pixels) between the edges of the image and synthesized boxes.
pub const BOX_MARGIN: u32 = 10;


/// Maximum number of boxes in a single render request.
pub const MAX_BOX_COUNT: usize = 16;

/// Maximum length (in Unicode codepoints) of a caption or a single box text.
pub const MAX_CAPTION_LENGTH: usize = 1024;

/// Maximum font size (in pixels).
pub const MAX_FONT_SIZE: u32 = 512;

/// Maximum width of the text outline (in pixels).
pub const MAX_STROKE_WIDTH: u32 = 32;


/// Pick a font size suitable for a template of given dimensions.
///
/// Used when neither the request nor the template specify `max_font_size`.
pub fn font_size_for(width: u32, height: u32) -> u32 {
    match width.max(height) {
        d if d > 2000 => 80,
        d if d > 1500 => 70,
        d if d > 1000 => 60,
        d if d > 800 => 50,
        _ => 40,
    }
}


#[cfg(test)]
mod tests {
    use super::font_size_for;

    #[test]
    fn font_size_grows_with_template() {
        assert_eq!(40, font_size_for(600, 400));
        assert_eq!(40, font_size_for(800, 800));
        assert_eq!(50, font_size_for(801, 10));
        assert_eq!(60, font_size_for(500, 1200));
        assert_eq!(70, font_size_for(1600, 900));
        assert_eq!(80, font_size_for(2048, 2048));
    }
}
