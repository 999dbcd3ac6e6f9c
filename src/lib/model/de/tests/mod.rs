//! Tests for deserializing complete model structures.

mod json;
