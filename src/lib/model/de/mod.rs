//! Deserializers for data model types.

mod color;
mod id;

pub use self::color::ColorParseError;
pub(crate) use self::id::deserialize_id;

#[cfg(test)]
mod tests;
