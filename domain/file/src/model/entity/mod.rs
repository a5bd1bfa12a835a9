mod copies;
mod record;

#[rustfmt::skip]
pub use {
    copies::{CopyInfo, CopyRegistry},
    record::FileRecord,
};
