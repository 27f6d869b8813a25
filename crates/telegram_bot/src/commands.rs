//! Command structs

use teloxide::utils::command::BotCommands;

/// Commands understood by the bot. Also registered as the client menu.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "snake_case", description = "Bot commands:")]
pub enum Command {
    #[command(description = "start using the bot.")]
    Start,
    #[command(description = "show this message.")]
    Help,
    #[command(description = "add a new category.")]
    AddCategory,
    #[command(description = "show all categories.")]
    ShowCategories,
    #[command(description = "show statistics.")]
    Stats,
}
