mod metadata;
mod transport;

#[rustfmt::skip]
pub use {
    metadata::RemoteMetadataService,
    transport::UploadTransportService,
};
