mod memory;
mod resolver;
mod staging;

#[rustfmt::skip]
pub use {
    memory::MemoryRecordStore,
    resolver::{HttpMetadataResolver, HttpResolverConfig},
    staging::LocalStagingTransport,
};
