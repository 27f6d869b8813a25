use thiserror::Error;

/// Errors that stop the handling of a single update.
///
/// Repository failures are not here: they are reported to the user and the
/// update is considered handled.
#[derive(Error, Debug)]
pub enum BotError {
    #[error(transparent)]
    Request(#[from] teloxide::RequestError),
    #[error("a repository is required to build the bot")]
    MissingRepository,
}
