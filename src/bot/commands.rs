use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Start the bot")]
    Start,

    #[command(description = "Show help message")]
    Help,

    #[command(description = "Get a greeting")]
    Hello,

    #[command(description = "Get bot information")]
    Info,

    #[command(description = "Compare exchange rates across banks")]
    Rates,

    #[command(description = "Best buy/sell rate per currency")]
    Best,
}
