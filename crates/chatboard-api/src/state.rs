use std::sync::Arc;

use chatboard_store::MessageStore;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: MessageStore,
}

impl AppStateInner {
    pub fn new(store: MessageStore) -> AppState {
        Arc::new(Self { store })
    }
}
