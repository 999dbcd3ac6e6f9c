//! Module for resolving and loading fonts used to render captions.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use rusttype::{self, point, GlyphId, Scale};
use thiserror::Error;

use crate::model::DEFAULT_FONT;
use crate::text::{Clip, GlyphMask, TextMetrics};
use super::filesystem;


/// File extensions of scalable fonts that can be loaded.
pub const FONT_FILE_EXTENSIONS: &[&str] = &["ttf", "otf"];

/// Pixel size of the built-in fallback font.
/// It is fixed regardless of the size that was requested.
pub const FALLBACK_FONT_SIZE: f32 = 11.0;

/// String used to measure the vertical extent of a font's lines.
const PROBE_TEXT: &str = "Ag";

// Geometry of the fallback block typeface, in pixels.
const BLOCK_ADVANCE: u32 = 6;
const BLOCK_INK_WIDTH: u32 = 5;
const BLOCK_ASCENT: i32 = 8;
const BLOCK_DESCENT: i32 = 3;

const UNCLIPPED: Clip = Clip{
    left: i32::min_value() / 2, top: i32::min_value() / 2,
    right: i32::max_value() / 2, bottom: i32::max_value() / 2,
};


/// Font that can be used to render captions.
pub struct Font {
    name: String,
    face: Face,
}

enum Face {
    Scalable(rusttype::Font<'static>),
    /// Built-in fixed-cell typeface drawing every glyph as a filled block.
    Block,
}

impl Font {
    /// Load a font from a TrueType/OpenType file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, FontError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| FontError::Io{
            path: path.to_owned(), source: e,
        })?;
        let name = path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Font::from_bytes(name, bytes)
    }

    /// Create a font out of the raw bytes of a font file.
    pub fn from_bytes<N: Into<String>>(name: N, bytes: Vec<u8>) -> Result<Self, FontError> {
        let name = name.into();
        match rusttype::Font::try_from_vec(bytes) {
            Some(font) => Ok(Font{name, face: Face::Scalable(font)}),
            None => Err(FontError::Parse(name)),
        }
    }

    /// The built-in fallback font.
    pub fn fallback() -> Self {
        Font{name: "<fallback>".into(), face: Face::Block}
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_fallback(&self) -> bool {
        match self.face { Face::Block => true, _ => false }
    }

    /// Prepare the font for rendering at given pixel size.
    ///
    /// The fallback font ignores the size and always uses `FALLBACK_FONT_SIZE`.
    pub fn at_size(self, size: f32) -> Result<SizedFont, FontError> {
        if !(size.is_finite() && size > 0.0) {
            return Err(FontError::Size(size));
        }
        let size = if self.is_fallback() { FALLBACK_FONT_SIZE } else { size };

        let (top, bottom) = match self.face {
            Face::Scalable(ref font) => {
                let bounds = font.layout(PROBE_TEXT, Scale::uniform(size), point(0.0, 0.0))
                    .filter_map(|g| g.pixel_bounding_box())
                    .fold(None, |acc: Option<(i32, i32)>, bb| Some(match acc {
                        Some((top, bottom)) => (top.min(bb.min.y), bottom.max(bb.max.y)),
                        None => (bb.min.y, bb.max.y),
                    }));
                bounds.unwrap_or((0, 0))
            }
            Face::Block => (-BLOCK_ASCENT, BLOCK_DESCENT),
        };
        let line = LineMetrics{
            height: (bottom - top) as f32,
            baseline: -top as f32,
        };
        if line.height <= 0.0 {
            return Err(FontError::Metrics{font: self.name, size});
        }
        trace!("Font `{}` at {}px has {:?}", self.name, size, line);
        Ok(SizedFont{font: self, size, line})
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let kind = if self.is_fallback() { "block" } else { "scalable" };
        write!(fmt, "Font({:?}, {})", self.name, kind)
    }
}


/// Vertical metrics of a line of text, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineMetrics {
    /// Distance between the tops of consecutive lines.
    pub height: f32,
    /// Offset of the baseline from the top of the line.
    pub baseline: f32,
}


/// Font prepared for rendering at a particular pixel size.
#[derive(Debug)]
pub struct SizedFont {
    font: Font,
    size: f32,
    line: LineMetrics,
}

impl SizedFont {
    /// The fallback font at its only available size.
    pub fn fallback() -> Self {
        Font::fallback().at_size(FALLBACK_FONT_SIZE)
            .unwrap_or_else(|_| unreachable!("block font has fixed metrics"))
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.font.name()
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    #[inline]
    pub fn line_metrics(&self) -> LineMetrics {
        self.line
    }

    #[inline]
    pub fn is_fallback(&self) -> bool {
        self.font.is_fallback()
    }

    /// Whether text in this font can be drawn with an outline.
    #[inline]
    pub fn supports_stroke(&self) -> bool {
        !self.is_fallback()
    }

    /// Check if the font has all the glyphs for given text,
    /// logging a warning about any that are missing.
    pub fn check(&self, text: &str) {
        let font = match self.font.face {
            Face::Scalable(ref font) => font,
            Face::Block => return,
        };
        let missing: HashSet<_> = text.chars()
            .filter(|c| !c.is_whitespace())
            .filter(|&c| font.glyph(c).id() == GlyphId(0))
            .map(|c| c as u32)
            .collect();
        if !missing.is_empty() {
            let mut codepoints: Vec<_> = missing.into_iter().collect();
            codepoints.sort();
            warn!("Font `{}` is missing glyphs for {} codepoint(s): {}",
                self.name(), codepoints.len(),
                codepoints.iter().map(|c| format!("{:#x}", c)).collect::<Vec<_>>().join(", "));
        }
    }

    /// Compute the ink coverage of given single line of text,
    /// relative to the pen position at the start of its baseline.
    ///
    /// Only the part of the text within `clip` is rasterized, if it's given.
    pub(crate) fn coverage(&self, s: &str, clip: Option<Clip>) -> GlyphMask {
        let clip = clip.unwrap_or(UNCLIPPED);
        match self.font.face {
            Face::Scalable(ref font) => {
                let glyphs: Vec<_> = font
                    .layout(s, Scale::uniform(self.size), point(0.0, 0.0))
                    .filter_map(|g| g.pixel_bounding_box().map(|bb| (g, bb)))
                    .filter(|&(_, bb)| clip.overlaps(bb.min.x, bb.min.y, bb.max.x, bb.max.y))
                    .collect();
                if glyphs.is_empty() {
                    return GlyphMask::empty();
                }
                let left = glyphs.iter().map(|&(_, bb)| bb.min.x).min().unwrap_or(0);
                let top = glyphs.iter().map(|&(_, bb)| bb.min.y).min().unwrap_or(0);
                let right = glyphs.iter().map(|&(_, bb)| bb.max.x).max().unwrap_or(0);
                let bottom = glyphs.iter().map(|&(_, bb)| bb.max.y).max().unwrap_or(0);

                let mut mask = clip.mask(left, top, right, bottom);
                for (glyph, bb) in glyphs {
                    glyph.draw(|x, y, v| {
                        mask.add(bb.min.x + x as i32, bb.min.y + y as i32, v);
                    });
                }
                mask
            }
            Face::Block => {
                let cells = s.chars().count() as i32;
                if cells == 0 {
                    return GlyphMask::empty();
                }
                let advance = BLOCK_ADVANCE as i32;
                let mut mask = clip.mask(0, -BLOCK_ASCENT, cells * advance, BLOCK_DESCENT);
                for (i, c) in s.chars().enumerate() {
                    let x0 = i as i32 * advance;
                    let x1 = x0 + BLOCK_INK_WIDTH as i32;
                    if c.is_whitespace() || !clip.overlaps(x0, -BLOCK_ASCENT, x1, BLOCK_DESCENT) {
                        continue;
                    }
                    for x in x0..x1 {
                        for y in -BLOCK_ASCENT..BLOCK_DESCENT {
                            mask.add(x, y, 1.0);
                        }
                    }
                }
                mask
            }
        }
    }
}

impl TextMetrics for SizedFont {
    /// Width of the text as the final X position of the "caret"
    /// after laying out all the glyphs, starting from X=0.
    fn text_width(&self, s: &str) -> f32 {
        match self.font.face {
            Face::Scalable(ref font) => {
                let glyphs: Vec<_> = font
                    .layout(s, Scale::uniform(self.size), point(0.0, 0.0))
                    .collect();
                glyphs.last()
                    .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
                    .unwrap_or(0.0)
            }
            Face::Block => (s.chars().count() as u32 * BLOCK_ADVANCE) as f32,
        }
    }
}


/// Error that may occur while resolving or loading a font.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("cannot read font file {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("font file for `{0}` cannot be parsed")]
    Parse(String),
    #[error("invalid font size: {0}")]
    Size(f32),
    #[error("font `{font}` has degenerate line metrics at {size}px")]
    Metrics { font: String, size: f32 },
    #[error("none of {tried} font candidate(s) could be loaded")]
    NotFound { tried: usize },
}


/// Source of font files.
pub trait FontProvider: fmt::Debug + Send + Sync {
    /// Find font files with given file name, most preferred first.
    fn locate(&self, file_name: &str) -> Vec<PathBuf>;

    /// Font files to try when none of the requested names could be found.
    fn well_known(&self) -> Vec<PathBuf> {
        vec![]
    }
}


/// Provider of fonts stored directly in a single directory.
#[derive(Clone, Debug)]
pub struct DirectoryFontProvider {
    directory: PathBuf,
}

impl DirectoryFontProvider {
    #[inline]
    pub fn new<D: AsRef<Path>>(directory: D) -> Self {
        DirectoryFontProvider{directory: directory.as_ref().to_owned()}
    }

    #[inline]
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl FontProvider for DirectoryFontProvider {
    fn locate(&self, file_name: &str) -> Vec<PathBuf> {
        filesystem::find_in_directory(&self.directory, file_name)
    }
}


lazy_static! {
    /// Directories where the operating system keeps its fonts.
    static ref SYSTEM_FONT_DIRECTORIES: Vec<PathBuf> = [
        "C:\\Windows\\Fonts",
        "/usr/share/fonts",
        "/usr/local/share/fonts",
        "/Library/Fonts",
        "/System/Library/Fonts",
    ].iter().map(PathBuf::from).collect();

    /// Bold sans-serif fonts commonly found on various systems.
    static ref WELL_KNOWN_FONT_FILES: Vec<PathBuf> = [
        "C:\\Windows\\Fonts\\impact.ttf",
        "C:\\Windows\\Fonts\\arialbd.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
        "C:\\Windows\\Fonts\\calibrib.ttf",
        "C:\\Windows\\Fonts\\calibri.ttf",
        "/Library/Fonts/Impact.ttf",
        "/System/Library/Fonts/Supplemental/Impact.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
        "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans-Bold.ttf",
    ].iter().map(PathBuf::from).collect();
}

/// Provider of fonts installed in the operating system.
///
/// The font directories are listed once, on first lookup,
/// and subsequent lookups only search that listing.
#[derive(Debug)]
pub struct SystemFontProvider {
    directories: Vec<PathBuf>,
    well_known: Vec<PathBuf>,
    listing: OnceLock<Vec<PathBuf>>,
}

impl SystemFontProvider {
    /// Create a provider searching custom directories
    /// and falling back to custom font files.
    pub fn new<D, F>(directories: D, well_known: F) -> Self
        where D: IntoIterator<Item=PathBuf>, F: IntoIterator<Item=PathBuf>
    {
        SystemFontProvider{
            directories: directories.into_iter().collect(),
            well_known: well_known.into_iter().collect(),
            listing: OnceLock::new(),
        }
    }

    /// All font files within the provider's directories.
    pub fn font_files(&self) -> &[PathBuf] {
        self.listing.get_or_init(|| {
            let files: Vec<_> = self.directories.iter()
                .flat_map(|dir| filesystem::list_tree(dir))
                .filter(|p| p.to_str().map(has_font_extension).unwrap_or(false))
                .collect();
            debug!("Found {} font file(s) in {} system font directories",
                files.len(), self.directories.len());
            files
        })
    }
}

impl Default for SystemFontProvider {
    fn default() -> Self {
        SystemFontProvider::new(
            SYSTEM_FONT_DIRECTORIES.iter().cloned(),
            WELL_KNOWN_FONT_FILES.iter().cloned())
    }
}

impl FontProvider for SystemFontProvider {
    fn locate(&self, file_name: &str) -> Vec<PathBuf> {
        filesystem::filter_by_name(self.font_files().iter().cloned(), file_name)
    }

    fn well_known(&self) -> Vec<PathBuf> {
        self.well_known.clone()
    }
}


/// Resolves fonts through an ordered list of providers.
///
/// Resolution only reads the filesystem,
/// so a single resolver can be used from many threads at once.
#[derive(Debug, Default)]
pub struct FontResolver {
    providers: Vec<Box<dyn FontProvider>>,
}

impl FontResolver {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider to consult after all the existing ones.
    pub fn push<P: FontProvider + 'static>(&mut self, provider: P) {
        self.providers.push(Box::new(provider));
    }

    /// Add a boxed provider to consult after all the existing ones.
    pub fn push_boxed(&mut self, provider: Box<dyn FontProvider>) {
        self.providers.push(provider);
    }

    #[inline]
    pub fn providers(&self) -> &[Box<dyn FontProvider>] {
        &self.providers
    }

    /// Resolve a font for rendering at given pixel size.
    ///
    /// Candidates are the preferred font name, the default font name,
    /// and then every provider's well-known font files.
    /// The first one that loads at requested size is returned.
    ///
    /// If none does, a strict resolution fails,
    /// while a lenient one returns the fallback font.
    pub fn resolve(&self, preferred: Option<&str>, size: f32,
                   strict: bool) -> Result<SizedFont, FontError> {
        if !(size.is_finite() && size > 0.0) {
            return Err(FontError::Size(size));
        }

        let candidates = self.candidate_files(preferred);
        match load_first(candidates, |path| Font::from_file(path)?.at_size(size)) {
            Ok(font) => Ok(font),
            Err(e) if strict => {
                error!("No usable font for {:?}: {}", preferred, e);
                Err(e)
            }
            Err(e) => {
                warn!("No usable font for {:?} ({}), using the fallback font", preferred, e);
                Ok(SizedFont::fallback())
            }
        }
    }

    /// Font files to try, most preferred first.
    fn candidate_files(&self, preferred: Option<&str>) -> Vec<PathBuf> {
        let mut files = vec![];
        for name in candidate_names(preferred) {
            for provider in &self.providers {
                files.extend(provider.locate(&name));
            }
        }
        for provider in &self.providers {
            files.extend(provider.well_known().into_iter().filter(|p| p.is_file()));
        }
        files
    }
}


/// Load the first of the font files that can be loaded, skipping the others.
///
/// If none of them loads, the error is `FontError::Metrics` when some font
/// had unusable metrics, and `FontError::NotFound` otherwise.
fn load_first<I, F>(paths: I, load: F) -> Result<SizedFont, FontError>
    where I: IntoIterator<Item=PathBuf>, F: Fn(&Path) -> Result<SizedFont, FontError>
{
    let mut tried = 0;
    let mut degenerate = None;
    for path in paths {
        tried += 1;
        match load(&path) {
            Ok(font) => {
                debug!("Font `{}` loaded from {}", font.name(), path.display());
                return Ok(font);
            }
            Err(e @ FontError::Metrics{..}) => {
                warn!("Skipping font candidate {}: {}", path.display(), e);
                degenerate = Some(e);
            }
            Err(e) => warn!("Skipping font candidate {}: {}", path.display(), e),
        }
    }
    Err(degenerate.unwrap_or(FontError::NotFound{tried}))
}


/// Font file names to look for, in order of preference.
fn candidate_names(preferred: Option<&str>) -> Vec<String> {
    let mut names: Vec<String> = vec![];
    for name in preferred.into_iter().chain(Some(DEFAULT_FONT)) {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let file_name = if has_font_extension(name) {
            name.to_owned()
        } else {
            format!("{}.{}", name, FONT_FILE_EXTENSIONS[0])
        };
        if !names.iter().any(|n| n.eq_ignore_ascii_case(&file_name)) {
            names.push(file_name);
        }
    }
    names
}

fn has_font_extension(name: &str) -> bool {
    Path::new(name).extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| FONT_FILE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}


/// Bold monospace font bundled for tests (DejaVu Sans Mono Bold).
#[cfg(test)]
pub(crate) const TEST_FONT: &[u8] = include_bytes!("testdata/DejaVuSansMono-Bold.ttf");

#[cfg(test)]
pub(crate) fn test_font(size: f32) -> SizedFont {
    Font::from_bytes("DejaVuSansMono-Bold.ttf", TEST_FONT.to_vec())
        .and_then(|f| f.at_size(size))
        .unwrap()
}


#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use image::RgbaImage;
    use speculoos::prelude::*;
    use tempfile::tempdir;
    use crate::text::{wrap, Clip, TextMetrics};
    use super::{candidate_names, load_first, test_font, DirectoryFontProvider, FontError,
                FontProvider, FontResolver, SizedFont, SystemFontProvider,
                FALLBACK_FONT_SIZE, TEST_FONT};

    #[test]
    fn candidates_append_extension() {
        assert_eq!(vec!["arial.ttf", "impact.ttf"], candidate_names(Some("arial")));
        assert_eq!(vec!["Comic.OTF", "impact.ttf"], candidate_names(Some("Comic.OTF")));
        assert_eq!(vec!["impact.ttf"], candidate_names(None));
    }

    #[test]
    fn candidates_are_deduplicated() {
        assert_eq!(vec!["Impact.ttf"], candidate_names(Some("Impact")));
        assert_eq!(vec!["impact.ttf"], candidate_names(Some("  ")));
    }

    #[test]
    fn fallback_metrics() {
        let font = SizedFont::fallback();
        assert!(font.is_fallback());
        assert!(!font.supports_stroke());
        assert_eq!(FALLBACK_FONT_SIZE, font.size());
        assert_eq!(11.0, font.line_metrics().height);
        assert_eq!(8.0, font.line_metrics().baseline);
        assert_eq!(0.0, font.text_width(""));
        assert_eq!(18.0, font.text_width("a b"));
    }

    #[test]
    fn fallback_coverage() {
        let font = SizedFont::fallback();
        let mask = font.coverage("a b", None);
        assert_that!(mask.coverage_at(0, -8)).is_equal_to(1.0);
        assert_that!(mask.coverage_at(4, 2)).is_equal_to(1.0);
        assert_that!(mask.coverage_at(5, 0)).is_equal_to(0.0);  // gap between cells
        assert_that!(mask.coverage_at(8, 0)).is_equal_to(0.0);  // space
        assert_that!(mask.coverage_at(12, 0)).is_equal_to(1.0);
        assert_that!(mask.coverage_at(0, 3)).is_equal_to(0.0);  // below the descent
    }

    #[test]
    fn scalable_metrics() {
        let font = test_font(32.0);
        assert!(!font.is_fallback());
        assert!(font.supports_stroke());
        assert_eq!(32.0, font.size());

        let line = font.line_metrics();
        assert_that!(line.height).is_greater_than(20.0);
        assert_that!(line.baseline).is_greater_than(0.0);
        assert_that!(line.baseline).is_less_than(line.height);

        let one = font.text_width("W");
        assert_that!(one).is_greater_than(10.0);
        assert_that!(font.text_width("WW")).is_greater_than(one);
        // Monospace, so spaces are as wide as any other glyph.
        assert_that!((font.text_width("W W") - 3.0 * one).abs()).is_less_than(0.5);
        assert_eq!(0.0, font.text_width(""));
    }

    #[test]
    fn scalable_wrapping() {
        let font = test_font(32.0);
        let width = font.text_width("one two");
        assert_eq!(vec!["one two", "three"], wrap("one two three", &font, width));
        assert_eq!(vec!["one", "two", "three"], wrap("one two three", &font, width - 1.0));
    }

    #[test]
    fn scalable_coverage() {
        let font = test_font(32.0);
        let mask = font.coverage("I", None);
        assert!(!mask.is_empty());
        let baseline = font.line_metrics().baseline;
        assert_that!(mask.height() as f32).is_less_than_or_equal_to(font.line_metrics().height);
        // Ink of a capital letter lies above the baseline.
        let half = font.text_width("I") as i32 / 2;
        assert_that!(mask.coverage_at(half, -(baseline as i32) / 2)).is_greater_than(0.5);
        assert_that!(mask.coverage_at(half, 2)).is_equal_to(0.0);
    }

    #[test]
    fn clipped_coverage_of_long_line() {
        let font = test_font(40.0);
        let img = RgbaImage::new(100, 100);
        let text = "W".repeat(1000);
        let clip = Clip::around_image(&img, -5000, 50, 4);

        let mask = font.coverage(&text, Some(clip));
        assert!(!mask.is_empty());
        assert_that!(mask.width()).is_less_than_or_equal_to(108);
        assert_that!(mask.height()).is_less_than_or_equal_to(108);

        let beyond = Clip::around_image(&img, 100_000, 50, 4);
        assert!(font.coverage(&text, Some(beyond)).is_empty());
    }

    #[test]
    fn strict_resolution_without_fonts() {
        let resolver = FontResolver::new();
        match resolver.resolve(Some("impact"), 40.0, true) {
            Err(FontError::NotFound{tried}) => assert_eq!(0, tried),
            other => panic!("unexpected resolution result: {:?}", other),
        }
    }

    #[test]
    fn lenient_resolution_falls_back() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("impact.ttf"), b"definitely not a font").unwrap();

        let mut resolver = FontResolver::new();
        resolver.push(DirectoryFontProvider::new(dir.path()));
        let font = resolver.resolve(None, 40.0, false).unwrap();
        assert!(font.is_fallback());

        // Same broken candidate makes strict resolution fail.
        match resolver.resolve(None, 40.0, true) {
            Err(FontError::NotFound{tried}) => assert_eq!(1, tried),
            other => panic!("unexpected resolution result: {:?}", other),
        }
    }

    #[test]
    fn directory_resolution_ignores_case() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Impact.TTF"), b"definitely not a font").unwrap();
        fs::write(dir.path().join("DEJAVUSANSMONO-BOLD.TTF"), TEST_FONT).unwrap();

        let mut resolver = FontResolver::new();
        resolver.push(DirectoryFontProvider::new(dir.path()));
        let font = resolver.resolve(Some("DejaVuSansMono-Bold"), 24.0, true).unwrap();
        assert!(!font.is_fallback());
        assert_eq!("DEJAVUSANSMONO-BOLD.TTF", font.name());
        assert_eq!(24.0, font.size());
    }

    #[test]
    fn degenerate_candidates_are_skipped() {
        let degenerate = || FontError::Metrics{font: "empty.ttf".into(), size: 40.0};
        let paths = vec![PathBuf::from("empty.ttf"), PathBuf::from("good.ttf")];

        let font = load_first(paths.clone(), |path: &Path| {
            if path == Path::new("empty.ttf") { Err(degenerate()) } else { Ok(SizedFont::fallback()) }
        });
        assert!(font.is_ok());

        // With nothing else to load, the metrics problem is reported.
        match load_first(paths.clone(), |_: &Path| Err(degenerate())) {
            Err(FontError::Metrics{font, ..}) => assert_eq!("empty.ttf", font),
            other => panic!("unexpected loading result: {:?}", other),
        }
        match load_first(paths, |path: &Path| Err(FontError::Parse(path.display().to_string()))) {
            Err(FontError::NotFound{tried}) => assert_eq!(2, tried),
            other => panic!("unexpected loading result: {:?}", other),
        }
    }

    #[test]
    fn invalid_size() {
        let resolver = FontResolver::new();
        assert!(resolver.resolve(None, 0.0, false).is_err());
        assert!(resolver.resolve(None, -3.0, false).is_err());
    }

    #[test]
    fn system_provider_well_known() {
        let provider = SystemFontProvider::new(
            vec![], vec![PathBuf::from("/nonexistent/font.ttf")]);
        assert!(provider.locate("impact.ttf").is_empty());
        assert_eq!(vec![PathBuf::from("/nonexistent/font.ttf")], provider.well_known());
    }

    #[test]
    fn system_provider_lists_directories_once() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("truetype");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("Impact.ttf"), b"").unwrap();
        fs::write(nested.join("README"), b"").unwrap();

        let provider = SystemFontProvider::new(vec![dir.path().to_owned()], vec![]);
        assert_eq!(vec![nested.join("Impact.ttf")], provider.locate("IMPACT.TTF"));
        assert_eq!(1, provider.font_files().len());

        // Files added later aren't seen, as the listing is kept.
        fs::write(nested.join("Arial.ttf"), b"").unwrap();
        assert!(provider.locate("arial.ttf").is_empty());
        assert_eq!(vec![nested.join("Impact.ttf")], provider.locate("impact.ttf"));
    }
}
