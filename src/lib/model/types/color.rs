//! Module implementing the `Color` type.

use std::fmt;

use image::Rgba;
use serde::ser::{Serialize, Serializer};


/// RGB color of the text or its outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    /// Create a white color.
    #[inline]
    pub fn white() -> Self {
        Self::gray(0xff)
    }

    /// Create a black color.
    #[inline]
    pub fn black() -> Self {
        Self::gray(0x00)
    }

    /// Create a gray color of given intensity.
    #[inline]
    pub fn gray(value: u8) -> Self {
        Color(value, value, value)
    }
}

impl Color {
    /// Convert the color to its chromatic inverse.
    #[inline]
    pub fn invert(self) -> Self {
        let Color(r, g, b) = self;
        Color(0xff - r, 0xff - g, 0xff - b)
    }

    /// Pixel of this color with given opacity.
    #[inline]
    pub(crate) fn to_rgba(self, alpha: u8) -> Rgba<u8> {
        let Color(r, g, b) = self;
        Rgba([r, g, b, alpha])
    }
}

impl From<Color> for Rgba<u8> {
    #[inline]
    fn from(color: Color) -> Rgba<u8> {
        color.to_rgba(0xff)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let Color(r, g, b) = *self;
        write!(fmt, "#{:0>2x}{:0>2x}{:0>2x}", r, g, b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}


#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn display_as_hex() {
        assert_eq!("#ffffff", format!("{}", Color::white()));
        assert_eq!("#000000", format!("{}", Color::black()));
        assert_eq!("#0a80ff", format!("{}", Color(10, 128, 255)));
    }

    #[test]
    fn invert() {
        assert_eq!(Color::black(), Color::white().invert());
        assert_eq!(Color(0xf5, 0x7f, 0x00), Color(10, 128, 255).invert());
    }
}
