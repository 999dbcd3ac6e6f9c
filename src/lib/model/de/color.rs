//! Deserializer for the Color type.

use std::fmt;
use std::str::FromStr;

use css_color_parser::Color as CssColor;
use serde::de::{self, Deserialize, Visitor};
use thiserror::Error;

use super::super::Color;


const CHANNELS: &[&str] = &["r", "g", "b"];
const EXPECTING_MSG: &str = "CSS color string, [r, g, b] array, or {r, g, b} map";

/// Hex prefixes accepted in addition to the CSS `#`.
/// Colors using them must spell out all six hex digits.
const EXTRA_HEX_PREFIXES: &[&str] = &["0x", "$"];


impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: de::Deserializer<'de>
    {
        deserializer.deserialize_any(ColorVisitor)
    }
}

struct ColorVisitor;
impl<'de> Visitor<'de> for ColorVisitor {
    type Value = Color;

    fn expecting(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", EXPECTING_MSG)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Color::from_str(v).map_err(|e| {
            warn!("Failed to parse color `{}`: {}", v, e);
            E::custom(e)
        })
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where A: de::SeqAccess<'de>
    {
        let expected = &"3 color channels";
        if let Some(len) = seq.size_hint() {
            if len != CHANNELS.len() {
                return Err(de::Error::invalid_length(len, expected));
            }
        }

        let mut rgb = [0u8; 3];
        for (i, channel) in rgb.iter_mut().enumerate() {
            *channel = seq.next_element()?
                .ok_or_else(|| de::Error::invalid_length(i, expected))?;
        }
        if seq.next_element::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(CHANNELS.len() + 1, expected));
        }

        let [r, g, b] = rgb;
        Ok(Color(r, g, b))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where A: de::MapAccess<'de>
    {
        let mut rgb: [Option<u8>; 3] = [None, None, None];
        while let Some(key) = map.next_key::<String>()? {
            let index = match key.trim().to_lowercase().as_str() {
                "r" | "red" => 0,
                "g" | "green" => 1,
                "b" | "blue" => 2,
                other => return Err(de::Error::unknown_field(other, CHANNELS)),
            };
            if rgb[index].is_some() {
                return Err(de::Error::duplicate_field(CHANNELS[index]));
            }
            rgb[index] = Some(map.next_value()?);
        }

        let channel = |i: usize| rgb[i].ok_or_else(|| de::Error::missing_field(CHANNELS[i]));
        Ok(Color(channel(0)?, channel(1)?, channel(2)?))
    }
}


impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(v: &str) -> Result<Self, Self::Err> {
        let mut s = v.trim().to_lowercase();
        if let Some(prefix) = EXTRA_HEX_PREFIXES.iter().find(|p| s.starts_with(*p)) {
            let digits = &s[prefix.len()..];
            if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(ColorParseError::Css);
            }
            s = format!("#{}", digits);
        }

        let css_color: CssColor = s.parse().map_err(|_| ColorParseError::Css)?;
        if css_color.a < 1.0 {
            return Err(ColorParseError::Alpha(css_color.a));
        }
        Ok(Color(css_color.r, css_color.g, css_color.b))
    }
}


/// Error that may occur while parsing a Color.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ColorParseError {
    /// The string is not a valid CSS color.
    #[error("invalid CSS color syntax")]
    Css,
    /// The color has transparency, which isn't supported.
    #[error("color transparency not supported (alpha = {0})")]
    Alpha(f32),
}


#[cfg(test)]
mod tests {
    mod generic {
        use serde_test::{assert_de_tokens, assert_de_tokens_error, Token as T};
        use super::super::{Color, EXPECTING_MSG};

        #[test]
        fn must_be_valid_type() {
            assert_de_tokens_error::<Color>(
                &[T::Bool(true)],
                &format!("invalid type: boolean `true`, expected {}", EXPECTING_MSG));
            assert_de_tokens_error::<Color>(
                &[T::I32(7)],
                &format!("invalid type: integer `7`, expected {}", EXPECTING_MSG));
        }

        #[test]
        fn css_strings() {
            assert_de_tokens(&Color(255, 255, 255), &[T::Str("#ffffff")]);
            assert_de_tokens(&Color(0, 0, 0), &[T::Str("#000")]);
            assert_de_tokens(&Color(255, 99, 71), &[T::Str("Tomato")]);
            assert_de_tokens_error::<Color>(&[T::Str("bleen")], "invalid CSS color syntax");
        }

        #[test]
        fn rgb_sequences() {
            assert_de_tokens(&Color(1, 2, 3), &[
                T::Seq{len: Some(3)}, T::U8(1), T::U8(2), T::U8(3), T::SeqEnd]);
            assert_de_tokens(&Color(4, 5, 6), &[
                T::Tuple{len: 3}, T::U8(4), T::U8(5), T::U8(6), T::TupleEnd]);
            assert_de_tokens_error::<Color>(
                &[T::Seq{len: Some(4)}], "invalid length 4, expected 3 color channels");
            assert_de_tokens_error::<Color>(
                &[T::Seq{len: None}, T::U8(1), T::U8(2), T::SeqEnd],
                "invalid length 2, expected 3 color channels");
        }

        #[test]
        fn rgb_maps() {
            assert_de_tokens(&Color(10, 20, 30), &[
                T::Map{len: None},
                T::Str("b"), T::U8(30), T::Str("Red"), T::U8(10), T::Str("green"), T::U8(20),
                T::MapEnd,
            ]);
            assert_de_tokens_error::<Color>(
                &[T::Map{len: None}, T::Str("r"), T::U8(1), T::Str("g"), T::U8(2), T::MapEnd],
                "missing field `b`");
            assert_de_tokens_error::<Color>(
                &[T::Map{len: None}, T::Str("r"), T::U8(1), T::Str("red")],
                "duplicate field `r`");
            assert_de_tokens_error::<Color>(
                &[T::Map{len: None}, T::Str("alpha")],
                "unknown field `alpha`, expected one of `r`, `g`, `b`");
        }
    }

    mod from_str {
        use std::str::FromStr;
        use speculoos::prelude::*;
        use super::super::{Color, ColorParseError};

        #[test]
        fn named_colors() {
            assert_that!(Color::from_str("white")).is_ok().is_equal_to(Color::white());
            assert_that!(Color::from_str("black")).is_ok().is_equal_to(Color::black());
            assert_that!(Color::from_str(" YELLOW ")).is_ok().is_equal_to(Color(255, 255, 0));
            assert_that!(Color::from_str("navy")).is_ok().is_equal_to(Color(0, 0, 0x80));
        }

        #[test]
        fn hex_notations() {
            assert_that!(Color::from_str("#0f0")).is_ok().is_equal_to(Color(0, 0xff, 0));
            assert_that!(Color::from_str("#00ff00")).is_ok().is_equal_to(Color(0, 0xff, 0));
            assert_that!(Color::from_str("0xFF0000")).is_ok().is_equal_to(Color(0xff, 0, 0));
            assert_that!(Color::from_str("$0000ff")).is_ok().is_equal_to(Color(0, 0, 0xff));
            assert_that!(Color::from_str("0xf0f")).is_err().is_equal_to(ColorParseError::Css);
            assert_that!(Color::from_str("$0x00ffff")).is_err();
            assert_that!(Color::from_str("ff00ff")).is_err();
        }

        #[test]
        fn functional_notation() {
            assert_that!(Color::from_str("rgb(1, 2, 3)")).is_ok().is_equal_to(Color(1, 2, 3));
        }

        #[test]
        fn transparency_not_supported() {
            assert_that!(Color::from_str("rgba(0, 0, 0, 0.5)"))
                .is_err().is_equal_to(ColorParseError::Alpha(0.5));
            assert_that!(Color::from_str("transparent")).is_err();
        }
    }
}
