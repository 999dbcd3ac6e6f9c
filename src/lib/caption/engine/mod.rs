//! Module which defines the captioning engine.

mod builder;
mod config;

pub use self::builder::{Builder, Error as BuildError, DEFAULT_OUTPUT_DIRECTORY};
pub use self::config::{Config, DEFAULT_JPEG_QUALITY};


use std::fmt;
use std::path::Path;
use std::sync::Arc;

use image::RgbaImage;

use crate::model::RenderRequest;
use crate::resources::{FontResolver, ImageLoader, LoadError, Loader, Registry, TemplateRegistry};
use super::error::CaptionError;
use super::output::{OutputDirectory, RenderedImage};
use super::task::CaptionTask;


/// Image captioning engine.
///
/// The engine is thread-safe (`Sync`), so a single instance
/// can serve render requests from many threads at once.
///
/// *Note*: `Engine` implements `Clone`
/// by merely cloning a shared reference to the underlying object.
pub struct Engine<R = Registry, Il = ImageLoader>
    where R: TemplateRegistry, Il: Loader<Item=RgbaImage, Err=LoadError>
{
    inner: Arc<Inner<R, Il>>,
}

/// Shared state of the engine that caption tasks have access to.
pub(super) struct Inner<R, Il>
    where R: TemplateRegistry, Il: Loader<Item=RgbaImage, Err=LoadError>
{
    pub config: Config,
    pub registry: R,
    pub images: Il,
    pub fonts: FontResolver,
    pub output: OutputDirectory,
}

impl<R, Il> Engine<R, Il>
    where R: TemplateRegistry, Il: Loader<Item=RgbaImage, Err=LoadError>
{
    #[inline]
    pub(super) fn from_inner(inner: Inner<R, Il>) -> Self {
        Engine{inner: Arc::new(inner)}
    }
}

impl<R, Il> Clone for Engine<R, Il>
    where R: TemplateRegistry, Il: Loader<Item=RgbaImage, Err=LoadError>
{
    fn clone(&self) -> Self {
        Engine{inner: self.inner.clone()}
    }
}

impl<R, Il> fmt::Debug for Engine<R, Il>
    where R: TemplateRegistry, Il: Loader<Item=RgbaImage, Err=LoadError>
{
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Engine")
            .field("config", &self.inner.config)
            .field("templates", &self.inner.registry.templates().len())
            .field("fonts", &self.inner.fonts)
            .field("output", &self.inner.output.path())
            .finish()
    }
}

// Constructors.
impl Engine<Registry, ImageLoader> {
    /// Create an Engine with templates from a JSON registry file,
    /// their images relative to given root, and output to given directory.
    ///
    /// For other ways of creating `Engine`, see the `EngineBuilder`.
    pub fn new<Pr, Di, Do>(registry_file: Pr,
                           image_root: Di,
                           output_directory: Do) -> Result<Self, BuildError>
        where Pr: AsRef<Path>, Di: AsRef<Path>, Do: AsRef<Path>
    {
        Builder::new()
            .registry_file(registry_file)
            .image_root(image_root)
            .output_directory(output_directory)
            .build()
    }
}

// Rendering.
impl<R, Il> Engine<R, Il>
    where R: TemplateRegistry, Il: Loader<Item=RgbaImage, Err=LoadError>
{
    /// Render a meme described by given request and write it to the output directory.
    ///
    /// Note that rendering is a CPU-intensive (and I/O bound) process.
    /// It is recommended to execute it in a separate thread.
    #[inline]
    pub fn render(&self, request: RenderRequest) -> Result<RenderedImage, CaptionError> {
        CaptionTask::new(request, self.inner.clone()).perform()
    }

    /// Render a template with a caption, using default styling.
    ///
    /// Caption segments for different boxes should be separated with `||`.
    pub fn caption(&self, template_id: &str, caption: &str) -> Result<RenderedImage, CaptionError> {
        let request = RenderRequest::builder()
            .template(template_id)
            .caption(caption)
            .build()?;
        self.render(request)
    }
}

// Accessors.
impl<R, Il> Engine<R, Il>
    where R: TemplateRegistry, Il: Loader<Item=RgbaImage, Err=LoadError>
{
    /// The `Engine`'s configuration.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Registry of the templates that the `Engine` can render.
    #[inline]
    pub fn registry(&self) -> &R {
        &self.inner.registry
    }

    /// Resolver of the fonts that the `Engine` renders with.
    #[inline]
    pub fn fonts(&self) -> &FontResolver {
        &self.inner.fonts
    }

    /// Directory where the rendered images are written.
    #[inline]
    pub fn output_directory(&self) -> &Path {
        self.inner.output.path()
    }
}
