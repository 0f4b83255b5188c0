use std::sync::Arc;
use teloxide::{
    net::Download,
    prelude::*,
    types::{FileMeta, PhotoSize},
};
use tracing::{error, info};

use crate::errors::{BotError, Result};

use super::ocr::OcrClient;

/// The extraction bot: photos and PDFs in, recognized text out.
pub struct ExtractBot {
    token: String,
    ocr: Arc<OcrClient>,
}

impl ExtractBot {
    pub fn new(token: String, ocr: Arc<OcrClient>) -> Self {
        Self { token, ocr }
    }

    pub async fn run(&self) -> Result<()> {
        let bot = Bot::new(&self.token);

        info!("📄 Starting extraction bot...");

        let handler = Update::filter_message().endpoint(Self::handle_message);

        Dispatcher::builder(bot, handler)
            .dependencies(dptree::deps![Arc::clone(&self.ocr)])
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }

    async fn handle_message(bot: Bot, msg: Message, ocr: Arc<OcrClient>) -> ResponseResult<()> {
        if let Some(text) = msg.text() {
            if text == "/start" {
                bot.send_message(
                    msg.chat.id,
                    "👋 Welcome! Send me a photo or PDF and I'll extract the text for you.",
                )
                .await?;
            } else {
                bot.send_message(msg.chat.id, format!("You said: {}", text))
                    .await?;
            }
            return Ok(());
        }

        if let Some(photos) = msg.photo() {
            Self::handle_photo(&bot, &msg, photos, &ocr).await?;
            return Ok(());
        }

        if msg.document().is_some() {
            Self::handle_document(&bot, &msg, &ocr).await?;
            return Ok(());
        }

        bot.send_message(
            msg.chat.id,
            "❓ I can only process text messages, photos, and PDF documents. \
             Please send one of those!",
        )
        .await?;
        Ok(())
    }

    async fn handle_photo(
        bot: &Bot,
        msg: &Message,
        photos: &[PhotoSize],
        ocr: &OcrClient,
    ) -> ResponseResult<()> {
        bot.send_message(
            msg.chat.id,
            "📸 Photo received! I'm processing it to extract text...",
        )
        .await?;

        // Telegram sends several sizes; the last is the largest.
        let Some(photo) = photos.last() else {
            return Ok(());
        };

        let reply = match Self::extract(bot, &photo.file, "photo.jpg", "image/jpeg", ocr).await {
            Ok(text) if !text.trim().is_empty() => format!("📝 Extracted text:\n\n{}", text),
            Ok(_) => "❌ No text found in the image. Please try with a clearer image \
                      or one with more text."
                .to_string(),
            Err(e) => {
                error!("Photo extraction failed: {}", e);
                "❌ Sorry, I couldn't process the photo. Please try again.".to_string()
            }
        };

        bot.send_message(msg.chat.id, reply).await?;
        Ok(())
    }

    async fn handle_document(bot: &Bot, msg: &Message, ocr: &OcrClient) -> ResponseResult<()> {
        let Some(document) = msg.document() else {
            return Ok(());
        };

        let is_pdf = document
            .mime_type
            .as_ref()
            .map(|m| m.essence_str() == "application/pdf")
            .unwrap_or(false);
        if !is_pdf {
            bot.send_message(
                msg.chat.id,
                "❌ I only support PDF documents. Please send a PDF file.",
            )
            .await?;
            return Ok(());
        }

        bot.send_message(
            msg.chat.id,
            "📄 PDF received! I'm processing it to extract text...",
        )
        .await?;

        let file_name = document.file_name.as_deref().unwrap_or("document.pdf");
        let reply =
            match Self::extract(bot, &document.file, file_name, "application/pdf", ocr).await {
                Ok(text) if !text.trim().is_empty() => format!("📝 Extracted text:\n\n{}", text),
                Ok(_) => {
                    "❌ No text found in the PDF. Please try with a different document.".to_string()
                }
                Err(e) => {
                    error!("Document extraction failed: {}", e);
                    "❌ Sorry, I couldn't process the document. Please try again.".to_string()
                }
            };

        bot.send_message(msg.chat.id, reply).await?;
        Ok(())
    }

    /// Download one Telegram file and run it through the OCR service.
    async fn extract(
        bot: &Bot,
        file_meta: &FileMeta,
        file_name: &str,
        content_type: &str,
        ocr: &OcrClient,
    ) -> Result<String> {
        let file = bot.get_file(file_meta.id.clone()).await?;

        let mut data: Vec<u8> = Vec::new();
        bot.download_file(&file.path, &mut data).await?;
        if data.is_empty() {
            return Err(BotError::ocr("Downloaded file is empty"));
        }

        ocr.extract_text(&data, file_name, content_type).await
    }
}
