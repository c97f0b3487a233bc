//! A headless incremental loading engine for paginated scrollable lists.
//!
//! For layout-level utilities (window/container sizing strategies, scroll-trigger
//! detection), see the `loadwindow-adapter` crate.
//!
//! This crate focuses on the core state machine needed to keep a scrollable list
//! filled from a paged data source: seeding a load target from the viewport's
//! page size, growing the target as the user scrolls, draining the gap between
//! loaded and targeted rows with sequential page fetches, and resetting the
//! window when filter/sort criteria change.
//!
//! It is UI-agnostic and performs no I/O of its own. A host/adapter layer is
//! expected to provide:
//! - the page size (how many rows fill one viewport)
//! - growth triggers (near-end scroll detection)
//! - the actual page fetches, by pumping [`Loader::begin_load`] /
//!   [`Loader::complete_page`] (or [`Loader::run_to_idle`] for synchronous
//!   sources)
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod loader;
mod options;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use loader::Loader;
pub use options::{
    AvailHeightCallback, ItemsCallback, LoaderOptions, LoadingCallback, PageSizeCallback,
    StatusCallback,
};
pub use state::LoadState;
pub use types::{FetchError, FetchOutcome, FetchRequest, LoadStatus, TerminationPolicy};

/// Default estimated row height.
///
/// The estimate must stay at or below the true minimum row height; a larger
/// value undercounts the rows a viewport holds and can stall target growth.
pub const DEFAULT_ESTIMATED_ROW_HEIGHT: u32 = 16;

/// Default quiet period for debounced resize recomputation, in milliseconds.
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 1000;
