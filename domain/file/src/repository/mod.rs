mod record_store;
mod registry;

#[rustfmt::skip]
pub use {
    record_store::RecordStore,
    registry::StoreRegistry,
};
