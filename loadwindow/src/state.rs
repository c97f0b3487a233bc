use crate::LoadStatus;

/// A lightweight snapshot of the loader's current counters and status.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
/// Useful for diagnostics and for consumers that render from a snapshot
/// rather than wiring individual callbacks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadState {
    pub page_size: u32,
    pub avail_height: u32,
    pub target_count: usize,
    pub loaded_count: usize,
    pub status: LoadStatus,
}
