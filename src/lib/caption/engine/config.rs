//! Module with captioning engine configuration.

use crate::model::HorizontalAnchor;


/// Default quality of the generated JPEG images (in %).
pub const DEFAULT_JPEG_QUALITY: u8 = 85;


/// Structure holding configuration for the `Engine`.
///
/// This is shared with `CaptionTask`s.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Quality of the generated JPEG images (in %).
    pub jpeg_quality: u8,
    /// Point of each box that its lines of text are centered around.
    pub horizontal_anchor: HorizontalAnchor,
    /// Whether a render should fail when no font can be loaded,
    /// rather than use the built-in fallback font.
    pub strict_fonts: bool,
}

impl Default for Config {
    /// Initialize Config with default values.
    fn default() -> Self {
        Config {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            horizontal_anchor: HorizontalAnchor::default(),
            strict_fonts: true,
        }
    }
}
