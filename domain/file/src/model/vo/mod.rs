mod attach;
mod media;
mod record;
mod sync;

#[rustfmt::skip]
pub use {
    attach::*,
    media::*,
    record::*,
    sync::*,
};
