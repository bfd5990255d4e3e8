//! OCR for card images.
//!
//! This module defines the [`OcrEngine`] seam and the checks applied to an
//! image before it is handed to an engine:
//!
//! - **Existence**: a missing file is reported as [`Error::ImageNotFound`].
//! - **Format sniffing**: the leading bytes must match a known raster format,
//!   otherwise [`Error::UnsupportedImage`] is returned.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use cardfile::ocr::{scan, TesseractEngine};
//!
//! let engine = TesseractEngine::default();
//! let extraction = scan(&engine, Path::new("card.jpg"), "不明")?;
//! println!("{}", extraction.fields.company);
//! # Ok::<(), cardfile::Error>(())
//! ```

mod tesseract;

use std::fmt;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::extract::Extraction;

pub use tesseract::{TesseractEngine, DEFAULT_LANGUAGES, DEFAULT_PROGRAM};

/// Something that turns an image file into text.
pub trait OcrEngine {
    /// The name of this engine (for logging).
    fn name(&self) -> &'static str;

    /// Recognize the text in the image at `image`.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot run or fails on the image.
    fn recognize(&self, image: &Path) -> Result<String>;
}

/// Raster formats accepted as card images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Portable Network Graphics.
    Png,
    /// JPEG / JFIF.
    Jpeg,
    /// Graphics Interchange Format.
    Gif,
    /// Windows bitmap.
    Bmp,
    /// Tagged Image File Format, either byte order.
    Tiff,
    /// `WebP` in a RIFF container.
    WebP,
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Png => write!(f, "png"),
            Self::Jpeg => write!(f, "jpeg"),
            Self::Gif => write!(f, "gif"),
            Self::Bmp => write!(f, "bmp"),
            Self::Tiff => write!(f, "tiff"),
            Self::WebP => write!(f, "webp"),
        }
    }
}

impl ImageFormat {
    /// Identify a format from the first bytes of a file.
    #[must_use]
    pub fn sniff(header: &[u8]) -> Option<Self> {
        if header.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(Self::Png)
        } else if header.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if header.starts_with(b"GIF87a") || header.starts_with(b"GIF89a") {
            Some(Self::Gif)
        } else if header.starts_with(b"BM") {
            Some(Self::Bmp)
        } else if header.starts_with(b"II*\0") || header.starts_with(b"MM\0*") {
            Some(Self::Tiff)
        } else if header.len() >= 12 && &header[0..4] == b"RIFF" && &header[8..12] == b"WEBP" {
            Some(Self::WebP)
        } else {
            None
        }
    }
}

/// Check that `path` is an existing file holding a recognised image.
///
/// # Errors
///
/// Returns [`Error::ImageNotFound`] or [`Error::UnsupportedImage`], or an
/// I/O error if the file cannot be read.
pub fn check_image(path: &Path) -> Result<ImageFormat> {
    if !path.is_file() {
        return Err(Error::ImageNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut header = Vec::with_capacity(12);
    std::fs::File::open(path)?
        .take(12)
        .read_to_end(&mut header)?;

    let format = ImageFormat::sniff(&header).ok_or_else(|| Error::UnsupportedImage {
        path: path.to_path_buf(),
    })?;
    debug!("{} looks like {format}", path.display());
    Ok(format)
}

/// Run `engine` over the image at `image` and extract card fields.
///
/// # Errors
///
/// Returns an error if the image check or the OCR run fails.
pub fn scan(engine: &dyn OcrEngine, image: &Path, placeholder: &str) -> Result<Extraction> {
    check_image(image)?;

    info!("Scanning {} with {}", image.display(), engine.name());
    let text = engine.recognize(image)?;
    debug!("OCR returned {} bytes", text.len());

    Ok(Extraction::from_text(text, placeholder))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[derive(Debug, Default)]
    struct FakeEngine {
        text: String,
        calls: Cell<usize>,
    }

    impl OcrEngine for FakeEngine {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn recognize(&self, _image: &Path) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.text.clone())
        }
    }

    #[test]
    fn test_sniff_known_formats() {
        assert_eq!(ImageFormat::sniff(PNG_HEADER), Some(ImageFormat::Png));
        assert_eq!(
            ImageFormat::sniff(&[0xFF, 0xD8, 0xFF, 0xE0]),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(ImageFormat::sniff(b"GIF89a.."), Some(ImageFormat::Gif));
        assert_eq!(ImageFormat::sniff(b"BM\0\0"), Some(ImageFormat::Bmp));
        assert_eq!(ImageFormat::sniff(b"II*\0...."), Some(ImageFormat::Tiff));
        assert_eq!(ImageFormat::sniff(b"MM\0*...."), Some(ImageFormat::Tiff));
        assert_eq!(
            ImageFormat::sniff(b"RIFF\x10\0\0\0WEBPVP8 "),
            Some(ImageFormat::WebP)
        );
    }

    #[test]
    fn test_sniff_rejects_text_and_short_input() {
        assert_eq!(ImageFormat::sniff(b"Acme Corp\nJane"), None);
        assert_eq!(ImageFormat::sniff(b""), None);
        assert_eq!(ImageFormat::sniff(b"RIFF"), None);
    }

    #[test]
    fn test_check_image_missing() {
        let result = check_image(Path::new("/nonexistent/card.png"));
        assert!(matches!(result, Err(Error::ImageNotFound { .. })));
    }

    #[test]
    fn test_check_image_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("card.jpg");
        std::fs::write(&path, "definitely not a jpeg").unwrap();

        let result = check_image(&path);
        assert!(matches!(result, Err(Error::UnsupportedImage { .. })));
    }

    #[test]
    fn test_scan_extracts_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("card.png");
        std::fs::write(&path, PNG_HEADER).unwrap();

        let engine = FakeEngine {
            text: "Acme Corp\nJane Doe\n".to_string(),
            ..FakeEngine::default()
        };
        let extraction = scan(&engine, &path, "不明").unwrap();

        assert_eq!(engine.calls.get(), 1);
        assert_eq!(extraction.fields.company, "Acme Corp");
        assert_eq!(extraction.fields.person_name, "Jane Doe");
        assert_eq!(extraction.raw_text, "Acme Corp\nJane Doe\n");
    }

    #[test]
    fn test_scan_does_not_call_engine_on_bad_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("card.png");
        std::fs::write(&path, "plain text").unwrap();

        let engine = FakeEngine::default();
        assert!(scan(&engine, &path, "不明").is_err());
        assert_eq!(engine.calls.get(), 0);
    }
}
