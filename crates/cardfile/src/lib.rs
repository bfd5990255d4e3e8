//! `cardfile` - Business card capture and lookup by company
//!
//! This library provides OCR of card photos, naive extraction of the company
//! and person name from the recognized text, and `SQLite` storage of cards
//! grouped under their companies.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod card;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod filter;
pub mod form;
pub mod logging;
pub mod ocr;
pub mod register;
pub mod storage;

pub use card::{Card, CardFields, CardRow, Company, Registration};
pub use config::Config;
pub use error::{Error, Result};
pub use extract::{extract_fields, Extraction};
pub use filter::{company_choices, CompanyFilter};
pub use logging::init_logging;
pub use ocr::{OcrEngine, TesseractEngine};
pub use register::{registration_message, CardSource};
pub use storage::{Storage, StorageStats};
