//! Module implementing the builder for `Engine`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use image::RgbaImage;
use thiserror::Error;

use crate::model::HorizontalAnchor;
use crate::resources::{DirectoryFontProvider, FontProvider, FontResolver, ImageLoader,
                       LoadError, Loader, Registry, SystemFontProvider, TemplateRegistry};
use super::super::output::OutputDirectory;
use super::config::Config;
use super::{Engine, Inner};


/// Directory where rendered images are written, unless configured otherwise.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "generated_memes";


/// Builder for `Engine`.
#[derive(Debug)]
#[must_use = "unused builder which must be used"]
pub struct Builder<R = Registry, Il = ImageLoader> {
    errors: Vec<Error>,

    registry: Option<R>,
    images: Il,
    fonts: FontResolver,
    system_fonts: bool,
    output_directory: Option<PathBuf>,

    config: Config,
}

impl Builder<Registry, ImageLoader> {
    /// Create a new `Builder`.
    ///
    /// Template images are loaded relative to the current directory
    /// until `image_root` says otherwise.
    #[inline]
    pub fn new() -> Self {
        Builder::default()
    }
}
impl Default for Builder<Registry, ImageLoader> {
    fn default() -> Self {
        Builder{
            errors: vec![],
            registry: None,
            images: ImageLoader::new("."),
            fonts: FontResolver::new(),
            system_fonts: true,
            output_directory: None,
            config: Config::default(),
        }
    }
}

// Setters of the resources.
impl<Il> Builder<Registry, Il> {
    /// Load the template registry from a JSON file.
    pub fn registry_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref();
        match Registry::from_file(path) {
            Ok(registry) => { self.registry = Some(registry); self }
            Err(e) => {
                error!("Failed to load template registry from {}: {}", path.display(), e);
                self.err(Error::Registry(format!("{}: {}", path.display(), e)))
            }
        }
    }
}
impl<R> Builder<R, ImageLoader> {
    /// Set the directory that local template images are loaded from.
    #[inline]
    pub fn image_root<D: AsRef<Path>>(mut self, directory: D) -> Self {
        let timeout = self.images.timeout();
        self.images = ImageLoader::new(directory).with_timeout(timeout); self
    }

    /// Set the timeout for fetching remote template images.
    #[inline]
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.images = self.images.with_timeout(timeout); self
    }
}
impl<R, Il> Builder<R, Il> {
    /// Set a custom registry of templates.
    pub fn registry<R2: TemplateRegistry>(self, registry: R2) -> Builder<R2, Il> {
        Builder{
            errors: self.errors,
            registry: Some(registry),
            images: self.images,
            fonts: self.fonts,
            system_fonts: self.system_fonts,
            output_directory: self.output_directory,
            config: self.config,
        }
    }

    /// Set a custom loader of template images.
    pub fn image_loader<Il2>(self, loader: Il2) -> Builder<R, Il2>
        where Il2: Loader<Item=RgbaImage, Err=LoadError>
    {
        Builder{
            errors: self.errors,
            registry: self.registry,
            images: loader,
            fonts: self.fonts,
            system_fonts: self.system_fonts,
            output_directory: self.output_directory,
            config: self.config,
        }
    }

    /// Add a directory to look for fonts in.
    ///
    /// Directories are searched in the order they were added,
    /// before any other font providers.
    #[inline]
    pub fn font_directory<D: AsRef<Path>>(self, directory: D) -> Self {
        self.font_provider(DirectoryFontProvider::new(directory))
    }

    /// Add a custom font provider.
    #[inline]
    pub fn font_provider<P: FontProvider + 'static>(mut self, provider: P) -> Self {
        self.fonts.push(provider); self
    }

    /// Whether fonts installed in the system should be looked up
    /// after all the other providers. This is enabled by default.
    #[inline]
    pub fn system_fonts(mut self, enabled: bool) -> Self {
        self.system_fonts = enabled; self
    }

    /// Set the directory where the rendered images will be written.
    #[inline]
    pub fn output_directory<D: AsRef<Path>>(mut self, directory: D) -> Self {
        self.output_directory = Some(directory.as_ref().to_owned()); self
    }
}

// Setters of the configuration.
impl<R, Il> Builder<R, Il> {
    /// Set the quality percentage of JPEG images generated by the `Engine`.
    #[inline]
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        if quality == 0 || quality > 100 {
            return self.err(Error::JpegQuality(quality));
        }
        self.config.jpeg_quality = quality; self
    }

    /// Set the point of each box that the text is centered around.
    #[inline]
    pub fn horizontal_anchor(mut self, anchor: HorizontalAnchor) -> Self {
        self.config.horizontal_anchor = anchor; self
    }

    /// Set whether rendering should fail if no font can be loaded (the default),
    /// or fall back to a built-in font.
    #[inline]
    pub fn strict_fonts(mut self, strict: bool) -> Self {
        self.config.strict_fonts = strict; self
    }
}

// Validation & building.
impl<R, Il> Builder<R, Il>
    where R: TemplateRegistry, Il: Loader<Item=RgbaImage, Err=LoadError>
{
    /// Build the `Engine`.
    pub fn build(self) -> Result<Engine<R, Il>, Error> {
        self.check_errors()?;

        let registry = self.registry.ok_or(Error::NoRegistry)?;
        let mut fonts = self.fonts;
        if self.system_fonts {
            fonts.push(SystemFontProvider::default());
        }
        let output = OutputDirectory::new(self.output_directory
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIRECTORY)));

        debug!("Engine built with {} template(s), {} font provider(s), output to {}",
            registry.templates().len(), fonts.providers().len(), output.path().display());
        Ok(Engine::from_inner(Inner{
            config: self.config,
            registry,
            images: self.images,
            fonts,
            output,
        }))
    }
}
impl<R, Il> Builder<R, Il> {
    #[doc(hidden)]
    fn check_errors(&self) -> Result<(), Error> {
        match self.errors.first() {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    #[doc(hidden)]
    fn err(mut self, error: Error) -> Self {
        self.errors.push(error); self
    }
}


/// Error that resulted from misconfiguration of the `Engine` via its `Builder`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// No template registry set up.
    #[error("no template registry configured")]
    NoRegistry,
    /// Template registry could not be loaded.
    #[error("cannot load template registry {0}")]
    Registry(String),
    /// JPEG quality outside of the valid range.
    #[error("invalid JPEG quality: {0}% (must be within 1-100%)")]
    JpegQuality(u8),
}
