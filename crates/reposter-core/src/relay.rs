use std::{sync::Arc, time::Duration};

use tokio::time::sleep;

use crate::{
    domain::MessageRef,
    messaging::MessagingPort,
    reporting::ErrorReporter,
    store::{ListKind, ListStore},
    Result,
};

/// Pause after every forward, regardless of its outcome.
pub const FORWARD_DELAY: Duration = Duration::from_millis(100);

/// Forwards eligible messages to every destination chat, one at a time.
pub struct RelayEngine {
    store: Arc<dyn ListStore>,
    messenger: Arc<dyn MessagingPort>,
    reporter: Arc<ErrorReporter>,
    delay: Duration,
}

impl RelayEngine {
    pub fn new(
        store: Arc<dyn ListStore>,
        messenger: Arc<dyn MessagingPort>,
        reporter: Arc<ErrorReporter>,
        delay: Duration,
    ) -> Self {
        Self {
            store,
            messenger,
            reporter,
            delay,
        }
    }

    /// Relay `msg` if its chat is a registered source; ignore it silently
    /// otherwise. Destinations are visited sequentially in the store's
    /// enumeration order; a failed forward is reported to the admins and
    /// does not stop the remaining destinations.
    pub async fn relay(&self, msg: MessageRef) -> Result<()> {
        if !self.store.contains(ListKind::Sources, msg.chat_id).await? {
            return Ok(());
        }

        let destinations = self.store.members(ListKind::Destinations).await?;
        for to in destinations {
            let res = self.messenger.forward_message(msg, to).await;
            sleep(self.delay).await;
            if let Err(err) = res {
                self.reporter.report(&err).await;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChatId, MessageId};
    use crate::messaging::testing::{Call, RecordingMessenger};
    use crate::store::testing::MemoryListStore;

    const SOURCE: ChatId = ChatId(10);

    fn message_from(chat: ChatId) -> MessageRef {
        MessageRef {
            chat_id: chat,
            message_id: MessageId(77),
        }
    }

    async fn harness(delay_ms: u64) -> (Arc<MemoryListStore>, Arc<RecordingMessenger>, RelayEngine) {
        let store = Arc::new(MemoryListStore::default());
        let messenger = Arc::new(RecordingMessenger::default());
        let reporter = Arc::new(ErrorReporter::new(store.clone(), messenger.clone()));
        let relay = RelayEngine::new(
            store.clone(),
            messenger.clone(),
            reporter,
            Duration::from_millis(delay_ms),
        );
        store.seed(ListKind::Sources, &[SOURCE.0]).await;
        (store, messenger, relay)
    }

    #[tokio::test]
    async fn forwards_to_every_destination_in_enumeration_order() {
        let (store, messenger, relay) = harness(1).await;
        store.seed(ListKind::Destinations, &[111, 222]).await;

        relay.relay(message_from(SOURCE)).await.unwrap();

        let forwards: Vec<i64> = messenger
            .recorded()
            .await
            .into_iter()
            .filter_map(|c| match c {
                Call::Forward { msg, to } => {
                    assert_eq!(msg, message_from(SOURCE));
                    Some(to.0)
                }
                _ => None,
            })
            .collect();
        assert_eq!(forwards, vec![111, 222]);
    }

    #[tokio::test]
    async fn spaces_forwards_by_the_configured_delay() {
        let (store, messenger, relay) = harness(30).await;
        store.seed(ListKind::Destinations, &[111, 222]).await;

        relay.relay(message_from(SOURCE)).await.unwrap();

        let calls = messenger.recorded_at().await;
        let stamps: Vec<_> = calls
            .iter()
            .filter(|(_, c)| matches!(c, Call::Forward { .. }))
            .map(|(at, _)| *at)
            .collect();
        assert_eq!(stamps.len(), 2);
        assert!(stamps[1].duration_since(stamps[0]) >= Duration::from_millis(30));
    }

    #[tokio::test]
    async fn a_failed_forward_is_reported_and_does_not_abort_the_batch() {
        let (store, messenger, relay) = harness(1).await;
        store.seed(ListKind::Destinations, &[111, 222]).await;
        store.seed(ListKind::Admins, &[1]).await;
        messenger.fail_forwards_to.lock().await.insert(111);

        relay.relay(message_from(SOURCE)).await.unwrap();

        let calls = messenger.recorded().await;
        // 222 still got the forward.
        assert!(calls
            .iter()
            .any(|c| matches!(c, Call::Forward { to, .. } if to.0 == 222)));
        // The admin was told about 111.
        assert!(calls.iter().any(
            |c| matches!(c, Call::Send { chat, text } if chat.0 == 1 && text.contains("111"))
        ));
    }

    #[tokio::test]
    async fn messages_from_unknown_chats_are_ignored() {
        let (store, messenger, relay) = harness(1).await;
        store.seed(ListKind::Destinations, &[111]).await;

        relay.relay(message_from(ChatId(404))).await.unwrap();

        assert!(messenger.recorded().await.is_empty());
    }
}
