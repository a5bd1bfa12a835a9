use std::sync::Arc;

use dashmap::DashMap;

use super::RecordStore;

/// Registry of mounted record stores, keyed by collection name.
///
/// Handles receive the registry at construction; nothing here is process
/// global. An unresolvable name is a normal answer, not an error, because
/// "not mounted yet" is an expected handle state.
#[derive(Default)]
pub struct StoreRegistry {
    stores: DashMap<String, Arc<dyn RecordStore>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a store under its collection name, replacing any previous
    /// registration of that name.
    pub fn mount(&self, name: impl Into<String>, store: Arc<dyn RecordStore>) {
        self.stores.insert(name.into(), store);
    }

    /// Drop a registration. Handles bound to the name fall back to the
    /// unmounted behavior on their next refresh.
    pub fn unmount(&self, name: &str) -> Option<Arc<dyn RecordStore>> {
        self.stores.remove(name).map(|(_, store)| store)
    }

    /// Look up a store by collection name.
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn RecordStore>> {
        self.stores.get(name).map(|entry| entry.value().clone())
    }
}
