//! Choosing the starting fields for a card registration.
//!
//! A card is registered from an image (OCR), from text that was already
//! recognized, or from flags alone. Flag overrides apply on top of whichever
//! source supplied the defaults.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::card::{CardFields, Registration};
use crate::error::{Error, Result};
use crate::extract::Extraction;
use crate::ocr::{self, OcrEngine};

/// Where the default field values come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardSource {
    /// A photo of the card, run through OCR.
    Image(PathBuf),
    /// A file holding already-recognized card text.
    Text(PathBuf),
    /// No source; every field starts as the placeholder.
    Manual,
}

impl CardSource {
    /// Pick the source from the command-line inputs. An image wins over text.
    #[must_use]
    pub fn from_inputs(image: Option<PathBuf>, text: Option<PathBuf>) -> Self {
        match (image, text) {
            (Some(image), _) => Self::Image(image),
            (None, Some(text)) => Self::Text(text),
            (None, None) => Self::Manual,
        }
    }

    /// Produce the default fields from this source.
    ///
    /// `engine` is only used for [`CardSource::Image`].
    ///
    /// # Errors
    ///
    /// Returns an error if OCR fails or the text file cannot be read.
    pub fn default_fields(
        &self,
        engine: &dyn OcrEngine,
        placeholder: &str,
    ) -> Result<CardFields> {
        match self {
            Self::Image(image) => Ok(ocr::scan(engine, image, placeholder)?.fields),
            Self::Text(path) => {
                let raw = read_text(path)?;
                Ok(Extraction::from_text(raw, placeholder).fields)
            }
            Self::Manual => Ok(CardFields::placeholder(placeholder)),
        }
    }
}

fn read_text(path: &Path) -> Result<String> {
    debug!("Reading card text from {}", path.display());
    std::fs::read_to_string(path).map_err(|source| Error::ReadText {
        path: path.to_path_buf(),
        source,
    })
}

/// The line printed after a card is saved.
#[must_use]
pub fn registration_message(fields: &CardFields, registration: &Registration) -> String {
    let mut message = format!("Registered {} of {}.", fields.person_name, fields.company);
    if registration.company_created {
        message.push_str("\n(new company)");
    }
    message
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

    fn engine(text: &str) -> FakeEngine {
        FakeEngine {
            text: text.to_string(),
            ..FakeEngine::default()
        }
    }

    #[test]
    fn test_from_inputs_prefers_image() {
        let source = CardSource::from_inputs(
            Some(PathBuf::from("card.png")),
            Some(PathBuf::from("card.txt")),
        );
        assert_eq!(source, CardSource::Image(PathBuf::from("card.png")));

        let source = CardSource::from_inputs(None, Some(PathBuf::from("card.txt")));
        assert_eq!(source, CardSource::Text(PathBuf::from("card.txt")));

        assert_eq!(CardSource::from_inputs(None, None), CardSource::Manual);
    }

    #[test]
    fn test_image_defaults_come_from_ocr() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("card.png");
        std::fs::write(&path, PNG_HEADER).unwrap();

        let engine = engine("Acme\nJane Doe\n");
        let fields = CardSource::Image(path)
            .default_fields(&engine, "不明")
            .unwrap();

        assert_eq!(engine.calls.get(), 1);
        assert_eq!(fields.company, "Acme");
        assert_eq!(fields.person_name, "Jane Doe");
        assert_eq!(fields.role, "不明");
    }

    #[test]
    fn test_text_defaults_skip_ocr() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("card.txt");
        std::fs::write(&path, "\n株式会社サンプル\n佐藤 花子\n").unwrap();

        let engine = engine("ignored\nignored");
        let fields = CardSource::Text(path)
            .default_fields(&engine, "不明")
            .unwrap();

        assert_eq!(engine.calls.get(), 0);
        assert_eq!(fields.company, "株式会社サンプル");
        assert_eq!(fields.person_name, "佐藤 花子");
    }

    #[test]
    fn test_missing_text_file() {
        let result = CardSource::Text(PathBuf::from("/nonexistent/card.txt"))
            .default_fields(&engine(""), "不明");
        assert!(matches!(result, Err(Error::ReadText { .. })));
    }

    #[test]
    fn test_manual_defaults_are_placeholders() {
        let fields = CardSource::Manual
            .default_fields(&engine("Acme"), "?")
            .unwrap();
        assert_eq!(fields, CardFields::placeholder("?"));
    }

    #[test]
    fn test_overrides_apply_after_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("card.txt");
        std::fs::write(&path, "Acme\nJane Doe\n").unwrap();

        let fields = CardSource::Text(path)
            .default_fields(&engine(""), "不明")
            .unwrap()
            .with_overrides(None, Some("Jane Q. Doe".to_string()), Some("CTO".to_string()));

        assert_eq!(fields.company, "Acme");
        assert_eq!(fields.person_name, "Jane Q. Doe");
        assert_eq!(fields.role, "CTO");
    }

    #[test]
    fn test_registration_message() {
        let fields = CardFields {
            company: "Acme".to_string(),
            person_name: "Jane Doe".to_string(),
            role: "CTO".to_string(),
        };
        let mut registration = Registration {
            card_id: 1,
            company_id: 1,
            company_created: false,
        };
        assert_eq!(
            registration_message(&fields, &registration),
            "Registered Jane Doe of Acme."
        );

        registration.company_created = true;
        assert_eq!(
            registration_message(&fields, &registration),
            "Registered Jane Doe of Acme.\n(new company)"
        );
    }
}
