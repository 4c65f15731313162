#![cfg(test)]

use std::sync::Arc;

use rstest::fixture;

use crate::config::Config;
use crate::seed::run_seed;
use crate::state::AppState;
use crate::store::memory::MemoryStore;

pub async fn seeded_memory_store() -> MemoryStore {
    let store = MemoryStore::new();
    run_seed(&store).await.expect("seed memory store");
    store
}

#[fixture]
pub fn empty_state() -> AppState {
    AppState {
        store: Arc::new(MemoryStore::new()),
        config: Config::in_memory(),
    }
}

#[fixture]
pub async fn seeded_state() -> AppState {
    AppState {
        store: Arc::new(seeded_memory_store().await),
        config: Config::in_memory(),
    }
}
