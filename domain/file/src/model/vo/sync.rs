/// Caller-declared synchronization context for a refresh.
///
/// The caller states whether an active reactive subscription is keeping
/// store-produced handles current, instead of the core probing some
/// ambient "inside a reactive computation" flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncContext {
    /// An active subscription guarantees currency; handles created by the
    /// store's read path may skip the pull.
    Reactive,
    /// No external guarantee; pull a fresh snapshot.
    #[default]
    Manual,
}

impl SyncContext {
    pub fn is_reactive(&self) -> bool {
        matches!(self, SyncContext::Reactive)
    }
}
