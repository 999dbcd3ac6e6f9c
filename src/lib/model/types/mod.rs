//! Module defining the model types.

mod color;
mod geometry;
mod request;
mod template;

pub use self::color::Color;
pub use self::geometry::{BoxPosition, HorizontalAnchor};
pub use self::request::{BoxSpec,
                        RenderRequest,
                        Builder as RenderRequestBuilder,
                        RequestError};
pub use self::template::Template;
