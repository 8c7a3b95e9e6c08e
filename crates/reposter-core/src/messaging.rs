use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::time::sleep;

use crate::{
    domain::{ChatId, MessageRef},
    Result,
};

/// How long a "+" acknowledgment stays visible before the detached cleanup
/// task deletes it.
pub const ACK_LIFETIME: Duration = Duration::from_secs(10);

/// Port over the messaging platform.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef>;
    /// Send `text` as a reply to an existing message.
    async fn reply_text(&self, to: MessageRef, text: &str) -> Result<MessageRef>;
    async fn delete_message(&self, msg: MessageRef) -> Result<()>;
    /// Re-send an existing message to another chat, payload unaltered.
    async fn forward_message(&self, msg: MessageRef, to: ChatId) -> Result<()>;
}

/// Reply with a short-lived message that a detached task deletes after
/// `lifetime`. The deletion is fire-and-forget; its failure is unobservable,
/// which is acceptable for a cosmetic cleanup.
pub async fn reply_ephemeral(
    messenger: Arc<dyn MessagingPort>,
    to: MessageRef,
    text: &str,
    lifetime: Duration,
) -> Result<()> {
    let sent = messenger.reply_text(to, text).await?;
    tokio::spawn(async move {
        sleep(lifetime).await;
        let _ = messenger.delete_message(sent).await;
    });
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicI32, Ordering};

    use tokio::sync::Mutex;
    use tokio::time::Instant;

    use super::*;
    use crate::domain::MessageId;
    use crate::errors::Error;

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub(crate) enum Call {
        Send { chat: ChatId, text: String },
        Reply { to: MessageRef, text: String },
        Delete(MessageRef),
        Forward { msg: MessageRef, to: ChatId },
    }

    /// Records every port call; selected targets can be made to fail.
    #[derive(Default)]
    pub(crate) struct RecordingMessenger {
        calls: Mutex<Vec<(Instant, Call)>>,
        pub fail_sends_to: Mutex<HashSet<i64>>,
        pub fail_forwards_to: Mutex<HashSet<i64>>,
        next_id: AtomicI32,
    }

    impl RecordingMessenger {
        async fn record(&self, call: Call) {
            self.calls.lock().await.push((Instant::now(), call));
        }

        fn next_ref(&self, chat: ChatId) -> MessageRef {
            MessageRef {
                chat_id: chat,
                message_id: MessageId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            }
        }

        pub(crate) async fn recorded(&self) -> Vec<Call> {
            self.calls.lock().await.iter().map(|(_, c)| c.clone()).collect()
        }

        pub(crate) async fn recorded_at(&self) -> Vec<(Instant, Call)> {
            self.calls.lock().await.clone()
        }
    }

    #[async_trait]
    impl MessagingPort for RecordingMessenger {
        async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef> {
            if self.fail_sends_to.lock().await.contains(&chat_id.0) {
                return Err(Error::Telegram(format!("send to {chat_id} refused")));
            }
            self.record(Call::Send {
                chat: chat_id,
                text: text.to_string(),
            })
            .await;
            Ok(self.next_ref(chat_id))
        }

        async fn reply_text(&self, to: MessageRef, text: &str) -> Result<MessageRef> {
            self.record(Call::Reply {
                to,
                text: text.to_string(),
            })
            .await;
            Ok(self.next_ref(to.chat_id))
        }

        async fn delete_message(&self, msg: MessageRef) -> Result<()> {
            self.record(Call::Delete(msg)).await;
            Ok(())
        }

        async fn forward_message(&self, msg: MessageRef, to: ChatId) -> Result<()> {
            if self.fail_forwards_to.lock().await.contains(&to.0) {
                return Err(Error::Telegram(format!("forward to {to} refused")));
            }
            self.record(Call::Forward { msg, to }).await;
            Ok(())
        }
    }
}
