use async_trait::async_trait;

use crate::{domain::ChatId, Result};

/// The four persisted chat lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// Chats allowed to reconfigure the bot.
    Admins,
    /// Chats whose content is relayed.
    Sources,
    /// Chats that receive relayed content.
    Destinations,
    /// Chats the bot has been added to. Advisory only: used to warn admins
    /// when they register a chat the bot cannot actually see.
    Joined,
}

impl ListKind {
    pub const ALL: [ListKind; 4] = [
        ListKind::Admins,
        ListKind::Sources,
        ListKind::Destinations,
        ListKind::Joined,
    ];

    /// Key suffix under the deployment prefix.
    pub fn key_suffix(self) -> &'static str {
        match self {
            ListKind::Admins => "admins",
            ListKind::Sources => "src",
            ListKind::Destinations => "dst",
            ListKind::Joined => "allowed",
        }
    }
}

/// Port over the external set store.
///
/// Every method is a single round trip; store failures propagate unchanged
/// and are never retried. `members` parses the stored strings back into chat
/// ids, so one corrupted element fails the whole read.
#[async_trait]
pub trait ListStore: Send + Sync {
    async fn add(&self, list: ListKind, id: ChatId) -> Result<()>;
    async fn remove(&self, list: ListKind, id: ChatId) -> Result<()>;
    async fn contains(&self, list: ListKind, id: ChatId) -> Result<bool>;
    /// Members in the store's enumeration order (undefined but stable within
    /// one call).
    async fn members(&self, list: ListKind) -> Result<Vec<ChatId>>;
    /// Delete all four lists.
    async fn clear_all(&self) -> Result<()>;
}
