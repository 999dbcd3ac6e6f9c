//! Deserializer for identifiers that may be given as either strings or numbers.

use std::fmt;

use serde::de::{self, Deserializer, Unexpected, Visitor};


const EXPECTING_MSG: &str = "non-empty string or non-negative integer identifier";


/// Deserialize an identifier (of a template) into a string.
///
/// Registries derived from public meme APIs tend to use numeric IDs,
/// so `61579` and `"61579"` both deserialize to `"61579"`.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
    where D: Deserializer<'de>
{
    deserializer.deserialize_any(IdVisitor)
}

struct IdVisitor;
impl<'de> Visitor<'de> for IdVisitor {
    type Value = String;

    fn expecting(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", EXPECTING_MSG)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let id = v.trim();
        if id.is_empty() {
            return Err(E::invalid_value(Unexpected::Str(v), &self));
        }
        Ok(id.to_owned())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        if v < 0 {
            return Err(E::invalid_value(Unexpected::Signed(v), &self));
        }
        Ok(v.to_string())
    }
}


#[cfg(test)]
mod tests {
    use serde::de::IntoDeserializer;
    use serde::de::value::Error as ValueError;
    use speculoos::prelude::*;
    use super::deserialize_id;

    fn id_from<'de, T: IntoDeserializer<'de, ValueError>>(v: T) -> Result<String, ValueError> {
        deserialize_id(v.into_deserializer())
    }

    #[test]
    fn strings_and_numbers() {
        assert_that!(id_from("drake")).is_ok().is_equal_to("drake".to_owned());
        assert_that!(id_from(" 61579 ")).is_ok().is_equal_to("61579".to_owned());
        assert_that!(id_from(61579u64)).is_ok().is_equal_to("61579".to_owned());
        assert_that!(id_from(42i64)).is_ok().is_equal_to("42".to_owned());
    }

    #[test]
    fn invalid_ids() {
        assert_that!(id_from("")).is_err();
        assert_that!(id_from("   ")).is_err();
        assert_that!(id_from(-1i64)).is_err();
        assert_that!(id_from(true)).is_err();
    }
}
