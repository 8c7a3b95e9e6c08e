use std::sync::Arc;

use tracing::warn;

use crate::{
    errors::Error,
    messaging::MessagingPort,
    store::{ListKind, ListStore},
};

/// Process-wide error sink: every handler failure ends up here and is pushed
/// to the admin chats as plain text. Failures of the notification itself are
/// only logged, never retried.
pub struct ErrorReporter {
    store: Arc<dyn ListStore>,
    messenger: Arc<dyn MessagingPort>,
}

impl ErrorReporter {
    pub fn new(store: Arc<dyn ListStore>, messenger: Arc<dyn MessagingPort>) -> Self {
        Self { store, messenger }
    }

    pub async fn report(&self, err: &Error) {
        warn!("handler error: {err}");

        let admins = match self.store.members(ListKind::Admins).await {
            Ok(admins) => admins,
            Err(fetch_err) => {
                warn!("could not fetch admins to report an error: {fetch_err}");
                return;
            }
        };

        for admin in admins {
            if let Err(send_err) = self.messenger.send_text(admin, &err.to_string()).await {
                warn!("could not report an error to admin {admin}: {send_err}");
            }
        }
    }
}
