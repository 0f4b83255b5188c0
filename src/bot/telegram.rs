use reqwest::Client;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::info;

use crate::{errors::Result, utils::Config};

use super::{
    commands::Command,
    handlers::{CommandHandler, TextMessageHandler},
};

/// The rates bot: command dispatch over long polling.
pub struct RatesBot {
    config: Arc<Config>,
    client: Client,
}

impl RatesBot {
    /// The HTTP client is constructed once by the process entry point and
    /// shared with the rates API server.
    pub fn new(config: Arc<Config>, client: Client) -> Self {
        Self { config, client }
    }

    /// Run the bot dispatcher until shutdown.
    pub async fn run(&self) -> Result<()> {
        let bot = Bot::new(&self.config.telegram_bot_token);

        info!("🤖 Starting rates bot...");

        let handler = dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(Self::handle_command),
            )
            .branch(Update::filter_message().endpoint(TextMessageHandler::handle));

        Dispatcher::builder(bot, handler)
            .dependencies(dptree::deps![self.client.clone()])
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }

    async fn handle_command(
        bot: Bot,
        msg: Message,
        cmd: Command,
        client: Client,
    ) -> ResponseResult<()> {
        info!("Processing command {:?} from chat {}", cmd, msg.chat.id);

        match cmd {
            Command::Start => CommandHandler::handle_start(bot, msg).await?,
            Command::Help => CommandHandler::handle_help(bot, msg).await?,
            Command::Hello => CommandHandler::handle_hello(bot, msg).await?,
            Command::Info => CommandHandler::handle_info(bot, msg).await?,
            Command::Rates => CommandHandler::handle_rates(bot, msg, client).await?,
            Command::Best => CommandHandler::handle_best(bot, msg, client).await?,
        }

        Ok(())
    }
}
