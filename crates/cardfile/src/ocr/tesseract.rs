//! Tesseract OCR via the `tesseract` command-line program.

use std::path::Path;
use std::process::Command;

use tracing::{debug, warn};

use super::OcrEngine;
use crate::config::OcrConfig;
use crate::error::{Error, Result};

/// Executable invoked when none is configured.
pub const DEFAULT_PROGRAM: &str = "tesseract";

/// Japanese plus English, for bilingual cards.
pub const DEFAULT_LANGUAGES: &str = "jpn+eng";

/// OCR engine that shells out to `tesseract <image> stdout -l <languages>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TesseractEngine {
    program: String,
    languages: String,
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM, DEFAULT_LANGUAGES)
    }
}

impl TesseractEngine {
    /// Create an engine running `program` with the given language spec.
    #[must_use]
    pub fn new(program: impl Into<String>, languages: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            languages: languages.into(),
        }
    }

    /// Create an engine from the `[ocr]` configuration section.
    #[must_use]
    pub fn from_config(config: &OcrConfig) -> Self {
        Self::new(&config.program, &config.languages)
    }

    /// The executable this engine runs.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The language spec passed to `-l`.
    #[must_use]
    pub fn languages(&self) -> &str {
        &self.languages
    }

    fn command(&self, image: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg(image).arg("stdout").arg("-l").arg(&self.languages);
        cmd
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn recognize(&self, image: &Path) -> Result<String> {
        debug!(
            "Running {} on {} (languages: {})",
            self.program,
            image.display(),
            self.languages
        );

        let output = self
            .command(image)
            .output()
            .map_err(|source| Error::OcrUnavailable {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!("{} exited with {}", self.program, output.status);
            return Err(Error::OcrFailed {
                status: output.status,
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
