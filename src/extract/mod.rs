//! Document text extraction bot.
//!
//! Independent of the rates feature: users send a photo or a PDF, the file
//! is pulled through the Telegram file API and handed to an external OCR
//! service, and the recognized text is sent back. Runs only when an
//! extraction token is configured.

pub mod bot;
pub mod ocr;

pub use bot::ExtractBot;
pub use ocr::OcrClient;
