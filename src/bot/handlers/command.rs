use reqwest::Client;
use teloxide::{prelude::*, types::ParseMode};
use tracing::info;

use crate::rates::{best_rates, fetch_all_rates, format_rates_table};

/// Handlers for the fixed command set.
pub struct CommandHandler;

impl CommandHandler {
    fn sender_name(msg: &Message) -> String {
        msg.from
            .as_ref()
            .map(|user| user.first_name.clone())
            .unwrap_or_else(|| "User".to_string())
    }

    /// Handle /start
    pub async fn handle_start(bot: Bot, msg: Message) -> ResponseResult<()> {
        let name = Self::sender_name(&msg);
        bot.send_message(
            msg.chat.id,
            format!(
                "👋 Hello {}! Welcome to the UZS exchange rates bot!\n\n\
                 I compare USD, EUR and RUB rates across Uzbek banks.\n\n\
                 Available commands:\n\
                 /rates - Compare rates across banks\n\
                 /best - Best buy/sell per currency\n\
                 /help - Show help message\n\
                 /hello - Get a greeting\n\
                 /info - Get bot information",
                name
            ),
        )
        .await?;
        Ok(())
    }

    /// Handle /help
    pub async fn handle_help(bot: Bot, msg: Message) -> ResponseResult<()> {
        bot.send_message(
            msg.chat.id,
            "📖 Help:\n\n\
             • /rates shows every bank's buy/sell quotes per currency\n\
             • /best picks the highest buy and lowest sell per currency\n\
             • All values are UZS per 100 units of foreign currency\n\n\
             Commands:\n\
             /start - Start the bot\n\
             /help - Show this help message\n\
             /hello - Get a greeting\n\
             /info - Get bot information\n\
             /rates - Compare exchange rates\n\
             /best - Best rates summary",
        )
        .await?;
        Ok(())
    }

    /// Handle /hello
    pub async fn handle_hello(bot: Bot, msg: Message) -> ResponseResult<()> {
        let name = Self::sender_name(&msg);
        bot.send_message(
            msg.chat.id,
            format!(
                "🎉 Hello {}! Nice to meet you!\n\n\
                 Try /rates to see today's exchange rates.",
                name
            ),
        )
        .await?;
        Ok(())
    }

    /// Handle /info
    pub async fn handle_info(bot: Bot, msg: Message) -> ResponseResult<()> {
        bot.send_message(
            msg.chat.id,
            format!(
                "🤖 Bot Information:\n\n\
                 • Name: Somkurs Bot\n\
                 • Version: {}\n\
                 • Platform: Telegram\n\
                 • Sources: Hamkorbank, Universal Bank, Tenge Bank\n\n\
                 💱 Rates are fetched live on every request.",
                env!("CARGO_PKG_VERSION")
            ),
        )
        .await?;
        Ok(())
    }

    /// Handle /rates: post a loading message, then edit it in place with
    /// the comparison table.
    pub async fn handle_rates(bot: Bot, msg: Message, client: Client) -> ResponseResult<()> {
        info!("Fetching rates for chat {}", msg.chat.id);

        let loading = bot
            .send_message(msg.chat.id, "⏳ Fetching latest exchange rates...")
            .await?;

        let rates = fetch_all_rates(&client).await;
        let table = format_rates_table(&rates);

        bot.edit_message_text(msg.chat.id, loading.id, table)
            .parse_mode(ParseMode::Markdown)
            .await?;
        Ok(())
    }

    /// Handle /best: same loading-then-edit flow with the summary.
    pub async fn handle_best(bot: Bot, msg: Message, client: Client) -> ResponseResult<()> {
        info!("Fetching best rates for chat {}", msg.chat.id);

        let loading = bot
            .send_message(msg.chat.id, "⏳ Finding the best rates...")
            .await?;

        let rates = fetch_all_rates(&client).await;
        let summary = best_rates(&rates);

        bot.edit_message_text(msg.chat.id, loading.id, summary)
            .parse_mode(ParseMode::Markdown)
            .await?;
        Ok(())
    }
}
