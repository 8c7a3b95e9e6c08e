use crate::{
    domain::ChatId,
    store::{ListKind, ListStore},
    Result,
};

/// Admin = member of the admin list.
pub async fn is_admin(store: &dyn ListStore, chat: ChatId) -> Result<bool> {
    store.contains(ListKind::Admins, chat).await
}

/// An empty admin list means the deployment is unconfigured: `/setup` may
/// bootstrap the first admin and `/start` shows help to anyone.
pub async fn is_configured(store: &dyn ListStore) -> Result<bool> {
    Ok(!store.members(ListKind::Admins).await?.is_empty())
}
