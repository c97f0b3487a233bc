//! Layout strategies and host glue for the `loadwindow` crate.
//!
//! The `loadwindow` crate is UI-agnostic and focuses on the core loading state
//! machine. This crate provides the small, framework-neutral pieces a host
//! needs to drive it from real viewport geometry:
//!
//! - The two observed layout strategies behind one [`LayoutStrategy`] trait:
//!   whole-window scrolling ([`WindowLayout`]) and a bounded scrollable
//!   container with a sticky header ([`ContainerLayout`])
//! - [`FeedController`], which wires measurement, debounced resize
//!   recomputation, and near-end scroll detection into a
//!   [`loadwindow::Loader`]
//!
//! This crate is intentionally framework-agnostic (no DOM/ratatui/egui
//! bindings): the host measures its widgets into plain metrics structs and
//! pushes them in.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod controller;
mod layout;


pub use controller::FeedController;
pub use layout::{
    ContainerLayout, ContainerMetrics, DEFAULT_FIT_MARGIN, LayoutStrategy, WindowLayout,
    WindowMetrics,
};
