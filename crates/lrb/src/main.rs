use std::sync::Arc;

use lrb_core::config::Config;
use lrb_openai::OpenAiClient;
use lrb_store::SqliteUserStore;

#[tokio::main]
async fn main() -> Result<(), lrb_core::Error> {
    lrb_core::logging::init("lrb")?;

    let cfg = Arc::new(Config::load()?);

    let store = Arc::new(SqliteUserStore::connect(&cfg.database_url).await?);
    let completions = Arc::new(OpenAiClient::new(
        cfg.openai_api_key.clone(),
        cfg.openai_api_base.clone(),
        cfg.completion_timeout,
    ));

    lrb_telegram::router::run_polling(cfg, store, completions)
        .await
        .map_err(|e| lrb_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
