//! Module handling the resources used for captioning.

mod filesystem;
mod fonts;
mod images;
mod templates;


pub use self::fonts::{DirectoryFontProvider, Font, FontError, FontProvider, FontResolver,
                      LineMetrics, SizedFont, SystemFontProvider,
                      FALLBACK_FONT_SIZE, FONT_FILE_EXTENSIONS};
#[cfg(test)]
pub(crate) use self::fonts::{test_font, TEST_FONT};
pub use self::images::{ImageLoader, LoadError, DEFAULT_FETCH_TIMEOUT};
pub use self::templates::{Registry, RegistryError, TemplateRegistry};


/// Loader of resources from some external source.
pub trait Loader {
    /// Type of resources that this loader can load.
    type Item;
    /// Error that may occur while loading the resource.
    type Err;

    /// Load a resource of given name.
    fn load<'n>(&self, name: &'n str) -> Result<Self::Item, Self::Err>;
}
