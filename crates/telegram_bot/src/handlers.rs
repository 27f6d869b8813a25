use teloxide::{
    prelude::*,
    types::{CallbackQuery, Me, User},
    utils::command::BotCommands,
};

use crate::{
    ConfigParameters,
    commands::Command,
    transport::{MessageHandle, Sender, TelegramTransport, Update, UpdateKind},
};

pub(crate) async fn handle_message(
    bot: Bot,
    me: Me,
    msg: Message,
    cfg: ConfigParameters,
) -> ResponseResult<()> {
    if !is_allowed(&cfg, msg.from.as_ref()) {
        return Ok(());
    }
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let kind = match Command::parse(text, me.username()) {
        Ok(command) => UpdateKind::Command(command),
        Err(_) => UpdateKind::Text(text.to_string()),
    };
    let update = Update {
        chat_id: msg.chat.id.0,
        user_id: from.id.0,
        sender: sender(from),
        origin: None,
        kind,
    };

    dispatch(bot, &cfg, update).await;
    Ok(())
}

pub(crate) async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    cfg: ConfigParameters,
) -> ResponseResult<()> {
    if !is_allowed(&cfg, Some(&q.from)) {
        return Ok(());
    }

    // Stop the client spinner even if handling fails below.
    if let Err(err) = bot.answer_callback_query(q.id.clone()).await {
        tracing::debug!(user_id = q.from.id.0, "failed to answer callback query: {err}");
    }

    let Some(message) = q.message.as_ref() else {
        return Ok(());
    };
    let Some(data) = q.data.clone() else {
        return Ok(());
    };

    let chat_id = message.chat().id.0;
    let update = Update {
        chat_id,
        user_id: q.from.id.0,
        sender: sender(&q.from),
        origin: Some(MessageHandle {
            chat_id,
            message_id: message.id().0,
        }),
        kind: UpdateKind::Callback(data),
    };

    dispatch(bot, &cfg, update).await;
    Ok(())
}

/// Run the router and log failures so one update never stops the next.
async fn dispatch(bot: Bot, cfg: &ConfigParameters, update: Update) {
    let user_id = update.user_id;
    let transport = TelegramTransport::new(bot);
    if let Err(err) = cfg.router.handle(&transport, update).await {
        tracing::error!(user_id, "failed to handle update: {err}");
    }
}

fn sender(user: &User) -> Sender {
    Sender {
        username: user.username.clone(),
        language: user.language_code.clone(),
    }
}

fn is_allowed(cfg: &ConfigParameters, from: Option<&User>) -> bool {
    let Some(from) = from else {
        return false;
    };
    match &cfg.allowed_users {
        None => true,
        Some(ids) => ids.contains(&from.id),
    }
}
