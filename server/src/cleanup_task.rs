use std::time::Duration;

use common::{GameId, log};

use crate::session_store::SessionStore;

pub struct CleanupTask<S: SessionStore> {
    store: S,
    check_interval: Duration,
}

impl<S: SessionStore> CleanupTask<S> {
    pub fn new(store: S, check_interval: Duration) -> Self {
        Self {
            store,
            check_interval,
        }
    }

    pub async fn run(&self) {
        let mut interval = tokio::time::interval(self.check_interval);
        // First tick completes immediately.
        interval.tick().await;

        loop {
            interval.tick().await;
            self.cleanup_inactive().await;
        }
    }

    pub async fn cleanup_inactive(&self) -> Vec<GameId> {
        let evicted = self.store.evict_expired().await;

        for game_id in &evicted {
            log!("Cleaning up inactive game: {}", game_id);
        }
        if !evicted.is_empty() {
            log!(
                "Evicted {} inactive games, {} still active",
                evicted.len(),
                self.store.len().await
            );
        }

        evicted
    }
}
