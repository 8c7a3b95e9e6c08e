use std::{path::PathBuf, sync::Arc};

use clap::Parser;

use reposter_core::{config::Config, logging, store::ListStore};
use reposter_redis::RedisListStore;

/// Forwards messages from source chats to destination chats.
#[derive(Parser)]
#[command(name = "reposter")]
struct Cli {
    /// Path to the JSON config file.
    #[arg(short, long)]
    config: PathBuf,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), reposter_core::Error> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let cfg = Arc::new(Config::load(&cli.config)?);
    let store: Arc<dyn ListStore> = Arc::new(RedisListStore::connect(&cfg).await?);

    reposter_telegram::router::run_polling(cfg, store)
        .await
        .map_err(|e| reposter_core::Error::Telegram(format!("bot failed: {e}")))?;

    Ok(())
}
