use crate::model::ImageRef;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Shown whenever an entry has no usable image.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/100";

const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
const JPEG_MAGIC: &[u8] = &[0xff, 0xd8, 0xff];

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("uploaded bytes are not a PNG or JPEG image")]
    UnrecognizedFormat,
    #[error("cannot store uploaded image")]
    Io(#[from] io::Error),
}

/// A raw upload: the original file name plus the file's bytes.
#[derive(Clone, Debug)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn read(path: &Path) -> io::Result<Upload> {
        let file_name = path
            .file_name()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "not a file path"))?
            .to_string_lossy()
            .into_owned();
        Ok(Upload {
            file_name,
            bytes: fs::read(path)?,
        })
    }
}

/// Directory of uploaded images, addressed by the upload's original file
/// name. Last write wins on name collisions.
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> ImageStore {
        ImageStore { dir: dir.into() }
    }

    pub fn store(&self, upload: &Upload) -> Result<String, ImageError> {
        if !is_supported_image(&upload.bytes) {
            return Err(ImageError::UnrecognizedFormat);
        }
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&upload.file_name);
        fs::write(&path, &upload.bytes)?;
        debug!(path = %path.display(), "stored uploaded image");
        Ok(path.to_string_lossy().into_owned())
    }
}

/// Path to render for an entry's image. A stored path that no longer
/// exists degrades to the placeholder, never to an error.
pub fn display_path(image: &ImageRef) -> &str {
    match image {
        ImageRef::Stored(path) if Path::new(path).exists() => path,
        _ => PLACEHOLDER_IMAGE,
    }
}

fn is_supported_image(bytes: &[u8]) -> bool {
    bytes.starts_with(PNG_MAGIC) || bytes.starts_with(JPEG_MAGIC)
}
