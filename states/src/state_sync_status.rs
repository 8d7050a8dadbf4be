/// Sync status of a registered compute.
///
/// `Dirty` means one of its dependencies changed since the last `run_computed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateSyncStatus {
    #[default]
    BeforeInit,
    Dirty,
    Clean,
}

impl StateSyncStatus {
    pub fn needs_compute(self) -> bool {
        matches!(self, Self::BeforeInit | Self::Dirty)
    }
}
