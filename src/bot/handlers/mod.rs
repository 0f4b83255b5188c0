pub mod command;
pub mod text;

pub use command::CommandHandler;
pub use text::TextMessageHandler;
