//! Data structures for command-line arguments.

use std::io;
use std::path::PathBuf;

use clap;
use memeforge::{HorizontalAnchor, RenderRequest};
use serde_json;
use thiserror::Error;


/// Structure to hold options received from the command line.
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    /// Verbosity of the logging output.
    ///
    /// Corresponds to the number of times the -v flag has been passed.
    /// If -q has been used instead, this will be negative.
    pub verbosity: isize,

    /// What the program should do.
    pub command: Command,

    /// JSON file with the registry of meme templates.
    pub registry: PathBuf,
    /// Directory that local template images are relative to.
    pub images: PathBuf,
    /// Directory with font files.
    pub fonts: PathBuf,
    /// Directory where rendered memes are written.
    pub output: PathBuf,

    /// Whether rendering should fail if no font can be found.
    pub strict_fonts: bool,
    /// Whether fonts installed in the system should be searched.
    pub system_fonts: bool,
    /// Point that lines of text are centered around.
    pub anchor: HorizontalAnchor,
}

/// Command to execute.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Render a meme.
    Render(RenderRequest),
    /// List the templates in the registry.
    List,
}


/// Error that can occur while parsing of command line arguments.
#[derive(Debug, Error)]
pub enum ArgsError {
    /// General error when parsing the arguments.
    #[error("invalid arguments: {0}")]
    Parse(#[from] clap::Error),
    /// Render request file cannot be read.
    #[error("cannot read render request: {0}")]
    Io(#[from] io::Error),
    /// Render request --json parsing error.
    #[error("render request JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
