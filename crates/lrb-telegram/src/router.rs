use std::{collections::HashMap, sync::Arc};

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use tokio::sync::{Mutex, OwnedMutexGuard};

use lrb_core::{
    completion::CompletionClient, config::Config, messaging::port::MessagingPort, relay::Relay,
    store::UserStore,
};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
    pub user_locks: Arc<UserLocks>,
}

/// Serializes update handling per user id.
///
/// Distinct users may be processed concurrently; operations for one user
/// never interleave, which keeps the registration upsert free of concurrent
/// writers to the same row.
#[derive(Default)]
pub struct UserLocks {
    inner: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

impl UserLocks {
    pub async fn lock_user(&self, user_id: i64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().await;
            map.entry(user_id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

pub async fn run_polling(
    cfg: Arc<Config>,
    store: Arc<dyn UserStore>,
    completions: Arc<dyn CompletionClient>,
) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    if let Ok(me) = bot.get_me().await {
        tracing::info!("authenticated as @{}", me.username());
    }
    tracing::info!("Bot is running...");

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(
        bot.clone(),
        cfg.telegram_message_limit,
    ));
    let relay = Arc::new(Relay::new(store, completions, messenger));

    let state = Arc::new(AppState {
        relay,
        user_locks: Arc::new(UserLocks::default()),
    });

    let handler =
        dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn locks_for_distinct_users_are_independent() {
        let locks = UserLocks::default();
        let _a = locks.lock_user(1).await;
        // Would deadlock if user 2 shared user 1's lock.
        let _b = locks.lock_user(2).await;
    }

    #[tokio::test]
    async fn same_user_gets_the_same_lock() {
        let locks = Arc::new(UserLocks::default());
        let guard = locks.lock_user(1).await;

        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _g = locks.lock_user(1).await;
            })
        };

        tokio::task::yield_now().await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
    }
}
