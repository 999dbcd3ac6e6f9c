//! Defines the output of a captioning operation and where it is stored.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, ImageResult, RgbaImage};
use image::codecs::jpeg::JpegEncoder;
use mime::{self, Mime};
use rand;
use regex::Regex;
use tempfile::NamedTempFile;

use crate::text::BoxOutcome;
use super::error::CaptionError;


/// Image format of the output files with generated names.
pub const DEFAULT_OUTPUT_FORMAT: ImageFormat = ImageFormat::Png;

/// How many times to retry writing a file under a different generated name.
const MAX_NAME_ATTEMPTS: usize = 8;

lazy_static! {
    /// Map of output file extensions to supported image formats.
    pub static ref IMAGE_FORMAT_EXTENSIONS: HashMap<&'static str, ImageFormat> = hashmap!{
        "bmp" => ImageFormat::Bmp,
        "jpeg" => ImageFormat::Jpeg,
        "jpg" => ImageFormat::Jpeg,
        "png" => ImageFormat::Png,
    };

    static ref FILENAME_RE: Regex = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").unwrap();
}


/// Output of the captioning process.
#[derive(Clone, Debug)]
#[must_use = "unused caption output which must be used"]
pub struct RenderedImage {
    path: PathBuf,
    filename: String,
    format: ImageFormat,
    width: u32,
    height: u32,
    boxes: Vec<BoxOutcome>,
}

impl RenderedImage {
    #[inline]
    pub(super) fn new(path: PathBuf, filename: String, format: ImageFormat,
                      (width, height): (u32, u32), boxes: Vec<BoxOutcome>) -> Self {
        RenderedImage{path, filename, format, width, height, boxes}
    }
}

impl RenderedImage {
    /// Path of the written image file.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the written image file within the output directory.
    #[inline]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Image format of the output.
    #[inline]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// How the text of each rendered box turned out, in rendering order.
    #[inline]
    pub fn boxes(&self) -> &[BoxOutcome] {
        &self.boxes
    }

    /// The MIME type that matches output's format.
    pub fn mime_type(&self) -> Option<Mime> {
        match self.format {
            ImageFormat::Bmp => Some(mime::IMAGE_BMP),
            ImageFormat::Jpeg => Some(mime::IMAGE_JPEG),
            ImageFormat::Png => Some(mime::IMAGE_PNG),
            _ => None,
        }
    }
}


/// Directory where the rendered images are written.
///
/// Files are only ever added to it: an existing file is never overwritten.
#[derive(Clone, Debug)]
pub struct OutputDirectory {
    path: PathBuf,
}

impl OutputDirectory {
    #[inline]
    pub fn new<D: AsRef<Path>>(path: D) -> Self {
        OutputDirectory{path: path.as_ref().to_owned()}
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Encode the image and write it to the directory.
    ///
    /// If no file name is given, a unique one is generated.
    /// Returns the path of the file, its name, and the image format used.
    pub fn persist(&self, img: &RgbaImage, filename: Option<&str>,
                   jpeg_quality: u8) -> Result<(PathBuf, String, ImageFormat), CaptionError> {
        let format = match filename {
            Some(name) => format_for_filename(name)?,
            None => DEFAULT_OUTPUT_FORMAT,
        };
        let bytes = encode(img, format, jpeg_quality).map_err(|e| {
            error!("Failed to encode the final image as {:?}: {}", format, e);
            CaptionError::Render(format!("cannot encode image: {}", e))
        })?;
        trace!("Final image encoded as {:?} into {} byte(s)", format, bytes.len());

        fs::create_dir_all(&self.path).map_err(|e| CaptionError::Output{
            path: self.path.clone(), source: e,
        })?;

        if let Some(name) = filename {
            let path = self.write_new(name, &bytes)?.ok_or_else(|| {
                CaptionError::Validation(format!("output file `{}` already exists", name))
            })?;
            return Ok((path, name.to_owned(), format));
        }
        for _ in 0..MAX_NAME_ATTEMPTS {
            let name = generate_filename();
            if let Some(path) = self.write_new(&name, &bytes)? {
                return Ok((path, name, format));
            }
            debug!("Generated output file name `{}` is taken, trying another one", name);
        }
        Err(CaptionError::Output{
            path: self.path.clone(),
            source: io::Error::new(io::ErrorKind::AlreadyExists,
                                   "cannot generate a unique output file name"),
        })
    }

    /// Atomically write a file that doesn't exist yet.
    /// Returns `None` if the file already exists.
    fn write_new(&self, name: &str, bytes: &[u8]) -> Result<Option<PathBuf>, CaptionError> {
        let path = self.path.join(name);
        let io_error = |e: io::Error| CaptionError::Output{path: path.clone(), source: e};

        let mut file = NamedTempFile::new_in(&self.path).map_err(&io_error)?;
        file.write_all(bytes).map_err(&io_error)?;
        match file.persist_noclobber(&path) {
            Ok(_) => {
                debug!("Rendered image written to {}", path.display());
                Ok(Some(path))
            }
            Err(ref e) if e.error.kind() == io::ErrorKind::AlreadyExists => Ok(None),
            Err(e) => Err(io_error(e.error)),
        }
    }
}


/// Determine the output format from the file name,
/// rejecting names that could escape the output directory.
fn format_for_filename(name: &str) -> Result<ImageFormat, CaptionError> {
    if !FILENAME_RE.is_match(name) {
        return Err(CaptionError::Validation(format!("invalid output file name `{}`", name)));
    }
    let extension = Path::new(name).extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    extension.as_ref()
        .and_then(|ext| IMAGE_FORMAT_EXTENSIONS.get(ext.as_str()).copied())
        .ok_or_else(|| CaptionError::Validation(format!(
            "unsupported output file extension in `{}`", name)))
}

fn generate_filename() -> String {
    format!("meme_{:016x}.png", rand::random::<u64>())
}

fn encode(img: &RgbaImage, format: ImageFormat, jpeg_quality: u8) -> ImageResult<Vec<u8>> {
    let mut bytes = vec![];
    match format {
        ImageFormat::Jpeg => {
            // JPEG has no alpha channel.
            let rgb = DynamicImage::ImageRgba8(img.clone()).to_rgb8();
            JpegEncoder::new_with_quality(&mut bytes, jpeg_quality).encode_image(&rgb)?;
        }
        format => img.write_to(&mut Cursor::new(&mut bytes), format)?,
    }
    Ok(bytes)
}
