use teloxide::prelude::*;

/// Fallback for plain messages that aren't commands.
pub struct TextMessageHandler;

impl TextMessageHandler {
    pub async fn handle(bot: Bot, msg: Message) -> ResponseResult<()> {
        let name = msg
            .from
            .as_ref()
            .map(|user| user.first_name.clone())
            .unwrap_or_else(|| "User".to_string());

        let reply = match msg.text() {
            Some(text) => format!(
                "Hi {}! You said: \"{}\"\n\n\
                 Try one of these commands:\n\
                 /rates - Compare exchange rates\n\
                 /best - Best rates summary\n\
                 /help - Get help",
                name, text
            ),
            None => format!(
                "Thanks for sharing, {}! 📎\n\n\
                 This bot only responds to text commands. \
                 Use /help to see what it can do.",
                name
            ),
        };

        bot.send_message(msg.chat.id, reply).await?;
        Ok(())
    }
}
