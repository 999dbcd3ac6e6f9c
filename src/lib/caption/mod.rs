//! Module implementing meme captioning.

mod distribute;
mod engine;
mod error;
mod layout;
mod output;
mod task;


pub use self::distribute::{distribute, join_segments, split_caption};
pub use self::engine::{Builder as EngineBuilder,
                       BuildError as EngineBuildError,
                       Config as EngineConfig,
                       Engine,
                       DEFAULT_JPEG_QUALITY, DEFAULT_OUTPUT_DIRECTORY};
pub use self::error::{CaptionError, ErrorKind};
pub use self::layout::{default_layout, fallback_box, template_layout};
pub use self::output::{OutputDirectory, RenderedImage,
                       DEFAULT_OUTPUT_FORMAT, IMAGE_FORMAT_EXTENSIONS};
