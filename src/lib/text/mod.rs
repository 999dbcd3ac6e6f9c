//! Module responsible for laying out and rendering caption text.

mod mask;
mod render;
mod wrap;


pub(crate) use self::mask::{Clip, GlyphMask};
pub use self::render::{render_box, BoxOutcome, StrokeOutcome, TextStyle};
pub use self::wrap::{wrap, TextMetrics};
