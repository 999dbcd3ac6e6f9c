//! Module for loading template images.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use image::{self, ImageError, RgbaImage};
use reqwest;
use thiserror::Error;

use super::Loader;


/// Default timeout for fetching remote template images.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);


/// Loader of template images, either from local files or remote URLs.
///
/// Local image references are resolved against the root directory;
/// `http://` and `https://` references are fetched over the network.
#[derive(Clone, Debug)]
pub struct ImageLoader {
    root: PathBuf,
    timeout: Duration,
}

impl ImageLoader {
    /// Create a loader resolving local images against given directory.
    #[inline]
    pub fn new<D: AsRef<Path>>(root: D) -> Self {
        ImageLoader{root: root.as_ref().to_owned(), timeout: DEFAULT_FETCH_TIMEOUT}
    }

    /// Set the timeout for fetching remote images.
    #[inline]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        ImageLoader{timeout, ..self}
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Loader for ImageLoader {
    type Item = RgbaImage;
    type Err = LoadError;

    fn load<'n>(&self, reference: &'n str) -> Result<RgbaImage, LoadError> {
        let bytes = if is_remote(reference) {
            self.fetch(reference)?
        } else {
            self.read(reference)?
        };
        let img = image::load_from_memory(&bytes)?;
        debug!("Template image `{}` loaded ({}x{})", reference, img.width(), img.height());
        Ok(img.to_rgba8())
    }
}

impl ImageLoader {
    fn read(&self, reference: &str) -> Result<Vec<u8>, LoadError> {
        let path = self.root.join(reference.trim_start_matches('/'));
        trace!("Reading template image from {}", path.display());
        fs::read(&path).map_err(|e| {
            warn!("Cannot read template image {}: {}", path.display(), e);
            LoadError::Io{path, source: e}
        })
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        debug!("Fetching template image from {} (timeout: {:?})", url, self.timeout);
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;
        let response = client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            warn!("Fetching {} failed with HTTP status {}", url, status);
            return Err(LoadError::Status(status.as_u16()));
        }
        let bytes = response.bytes()?;
        trace!("Fetched {} byte(s) from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}


/// Error that may occur while loading a template image.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("cannot decode image: {0}")]
    Decode(#[from] ImageError),
    #[error("cannot fetch image: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("server responded with HTTP status {0}")]
    Status(u16),
}


fn is_remote(reference: &str) -> bool {
    let reference = reference.trim_start();
    ["http://", "https://"].iter().any(|scheme| {
        reference.len() >= scheme.len() &&
            reference[..scheme.len()].eq_ignore_ascii_case(scheme)
    })
}


#[cfg(test)]
mod tests {
    use image::{ImageFormat, Rgba, RgbaImage};
    use tempfile::tempdir;
    use super::{is_remote, ImageLoader, LoadError};
    use crate::resources::Loader;

    #[test]
    fn remote_references() {
        assert!(is_remote("http://i.imgflip.com/1bij.jpg"));
        assert!(is_remote("HTTPS://i.imgflip.com/1bij.jpg"));
        assert!(!is_remote("images/1bij.jpg"));
        assert!(!is_remote("/images/http.jpg"));
        assert!(!is_remote("ftp://example.com/1bij.jpg"));
    }

    #[test]
    fn local_image() {
        let dir = tempdir().unwrap();
        let img = RgbaImage::from_pixel(8, 6, Rgba([10, 20, 30, 255]));
        img.save_with_format(dir.path().join("grumpy.png"), ImageFormat::Png).unwrap();

        let loader = ImageLoader::new(dir.path());
        for reference in &["grumpy.png", "/grumpy.png"] {
            let loaded = loader.load(reference).unwrap();
            assert_eq!((8, 6), loaded.dimensions());
            assert_eq!(&Rgba([10, 20, 30, 255]), loaded.get_pixel(3, 3));
        }
    }

    #[test]
    fn missing_image() {
        let dir = tempdir().unwrap();
        let loader = ImageLoader::new(dir.path());
        match loader.load("nope.png") {
            Err(LoadError::Io{..}) => {},
            other => panic!("unexpected result: {:?}", other.map(|i| i.dimensions())),
        }
    }

    #[test]
    fn undecodable_image() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("text.png"), b"this is not a PNG").unwrap();
        let loader = ImageLoader::new(dir.path());
        match loader.load("text.png") {
            Err(LoadError::Decode(_)) => {},
            other => panic!("unexpected result: {:?}", other.map(|i| i.dimensions())),
        }
    }
}
