//! Captioning error.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::RequestError;
use crate::resources::{FontError, LoadError};


/// Error that may occur during the captioning.
#[derive(Debug, Error)]
pub enum CaptionError {
    /// Requested template is not in the registry.
    #[error("template `{0}` not found")]
    NotFound(String),
    /// Request (or its combination with the template) is invalid.
    #[error("invalid request: {0}")]
    Validation(String),
    /// Caption can't be split into the segments required by the template.
    #[error("malformed caption: {0}")]
    Format(String),
    /// Template image cannot be loaded.
    #[error("cannot load template image `{reference}`: {source}")]
    Load { reference: String, source: LoadError },
    /// No usable font was found.
    #[error("cannot resolve font `{font}`: {source}")]
    FontResolution { font: String, source: FontError },
    /// Drawing or encoding of the final image failed.
    #[error("rendering failed: {0}")]
    Render(String),
    /// Final image cannot be written.
    #[error("cannot write output file {path:?}: {source}")]
    Output { path: PathBuf, source: io::Error },
}

impl CaptionError {
    /// Category of the error, as reported to clients.
    pub fn kind(&self) -> ErrorKind {
        match *self {
            CaptionError::NotFound(..) => ErrorKind::NotFound,
            CaptionError::Validation(..) => ErrorKind::Validation,
            CaptionError::Format(..) => ErrorKind::Format,
            CaptionError::Load{..} => ErrorKind::Load,
            CaptionError::FontResolution{..} => ErrorKind::FontResolution,
            CaptionError::Render(..) | CaptionError::Output{..} => ErrorKind::Render,
        }
    }

    #[inline]
    pub(crate) fn font(font: &str, error: FontError) -> Self {
        match error {
            FontError::Metrics{..} => CaptionError::Render(error.to_string()),
            FontError::Size(..) => CaptionError::Validation(error.to_string()),
            source => CaptionError::FontResolution{font: font.to_owned(), source},
        }
    }
}

impl From<RequestError> for CaptionError {
    fn from(error: RequestError) -> Self {
        CaptionError::Validation(error.to_string())
    }
}


/// Category of a `CaptionError`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    NotFound,
    Validation,
    Format,
    Load,
    FontResolution,
    Render,
}

impl ErrorKind {
    /// Name of the error kind, as used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match *self {
            ErrorKind::NotFound => "not-found",
            ErrorKind::Validation => "validation",
            ErrorKind::Format => "format",
            ErrorKind::Load => "load",
            ErrorKind::FontResolution => "font-resolution",
            ErrorKind::Render => "render",
        }
    }
}
