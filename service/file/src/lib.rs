mod attachment;
mod handle;
mod synchronizer;

#[rustfmt::skip]
pub use {
    attachment::AttachmentResolver,
    handle::FileHandle,
    synchronizer::RecordSynchronizer,
};
