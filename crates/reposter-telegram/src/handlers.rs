//! Update handlers: classify each inbound message and render dispatcher
//! outcomes back through the messenger.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::Message;

use reposter_core::{
    commands::{Command, Outcome, Reply},
    domain::{ChatId, MessageId, MessageRef},
    messaging::{reply_ephemeral, ACK_LIFETIME},
};

use crate::router::AppState;

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    // Strictly sequential: each update is fully processed before the next.
    let _guard = state.update_lock.lock().await;

    if let Err(err) = process(&msg, &state).await {
        state.reporter.report(&err).await;
    }
    Ok(())
}

async fn process(msg: &Message, state: &AppState) -> reposter_core::Result<()> {
    let chat = ChatId(msg.chat.id.0);
    let msg_ref = MessageRef {
        chat_id: chat,
        message_id: MessageId(msg.id.0),
    };

    // Being invited into a chat registers it in the advisory joined list.
    if added_to_chat(msg, state.bot_id) {
        return state.dispatcher.chat_joined(chat).await;
    }

    if let Some((cmd, args)) = msg.text().and_then(Command::parse) {
        let sender = msg.from().map(|u| ChatId(u.id.0 as i64)).unwrap_or(chat);
        let outcome = state.dispatcher.dispatch(chat, sender, cmd, &args).await?;
        return render(msg_ref, outcome, state).await;
    }

    // Everything else that carries content, including unrecognized
    // /commands, is a relay candidate.
    if is_relayable(msg) {
        return state.relay.relay(msg_ref).await;
    }

    Ok(())
}

async fn render(to: MessageRef, outcome: Outcome, state: &AppState) -> reposter_core::Result<()> {
    // Advisory notes are best-effort.
    for note in &outcome.notes {
        let _ = state.messenger.reply_text(to, note).await;
    }

    match outcome.reply {
        Some(Reply::Text(text)) => {
            state.messenger.reply_text(to, &text).await?;
        }
        Some(Reply::Ack) => {
            reply_ephemeral(state.messenger.clone(), to, "+", ACK_LIFETIME).await?;
        }
        None => {}
    }
    Ok(())
}

fn added_to_chat(msg: &Message, bot_id: i64) -> bool {
    msg.new_chat_members()
        .map(|users| users.iter().any(|u| u.id.0 as i64 == bot_id))
        .unwrap_or(false)
}

/// Text or media, mirroring what the bot is willing to forward.
fn is_relayable(msg: &Message) -> bool {
    msg.text().is_some()
        || msg.photo().is_some()
        || msg.video().is_some()
        || msg.document().is_some()
        || msg.animation().is_some()
        || msg.audio().is_some()
        || msg.voice().is_some()
        || msg.video_note().is_some()
        || msg.sticker().is_some()
}
