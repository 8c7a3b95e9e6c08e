use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};
use tokio::sync::Mutex;
use tracing::info;

use reposter_core::{
    commands,
    config::Config,
    messaging::MessagingPort,
    relay::{RelayEngine, FORWARD_DELAY},
    reporting::ErrorReporter,
    store::ListStore,
};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<commands::Dispatcher>,
    pub relay: Arc<RelayEngine>,
    pub messenger: Arc<dyn MessagingPort>,
    pub reporter: Arc<ErrorReporter>,
    /// The bot's own user id, for spotting "added to group" updates.
    pub bot_id: i64,
    /// Updates are handled strictly one at a time.
    pub update_lock: Arc<Mutex<()>>,
}

pub async fn run_polling(cfg: Arc<Config>, store: Arc<dyn ListStore>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.token.clone());

    let me = bot.get_me().await?;
    info!("reposter started: @{}", me.username());

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let reporter = Arc::new(ErrorReporter::new(store.clone(), messenger.clone()));
    let relay = Arc::new(RelayEngine::new(
        store.clone(),
        messenger.clone(),
        reporter.clone(),
        FORWARD_DELAY,
    ));

    let state = Arc::new(AppState {
        dispatcher: Arc::new(commands::Dispatcher::new(store)),
        relay,
        messenger,
        reporter,
        bot_id: me.user.id.0 as i64,
        update_lock: Arc::new(Mutex::new(())),
    });

    let handler = dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
