use alloc::sync::Arc;

use crate::{
    DEFAULT_ESTIMATED_ROW_HEIGHT, DEFAULT_RESIZE_DEBOUNCE_MS, LoadStatus, TerminationPolicy,
};

/// A callback fired when the computed page size changes.
pub type PageSizeCallback = Arc<dyn Fn(u32) + Send + Sync>;

/// A callback fired when the committed item window changes.
///
/// The argument is the full window, in source order. The window only ever
/// changes by whole loop outcomes (a commit) or a reset.
pub type ItemsCallback<T> = Arc<dyn Fn(&[T]) + Send + Sync>;

/// A callback fired when the derived loading flag flips.
pub type LoadingCallback = Arc<dyn Fn(bool) + Send + Sync>;

/// A callback fired on every status transition.
///
/// This is the uniform error surface: consumers render an error affordance by
/// observing [`LoadStatus::Error`] here (or via [`crate::Loader::status`]).
pub type StatusCallback = Arc<dyn Fn(LoadStatus) + Send + Sync>;

/// A callback fired when the available height (viewport minus header) changes.
///
/// Only the whole-window layout strategy reports this measurement.
pub type AvailHeightCallback = Arc<dyn Fn(u32) + Send + Sync>;

/// Configuration for [`crate::Loader`].
///
/// This type is designed to be cheap to clone: callbacks are stored in `Arc`s.
/// `F` and `S` are the host's filter and sort models; any change to either
/// (detected by `PartialEq`) resets the loaded window.
pub struct LoaderOptions<T, F = (), S = ()> {
    /// Estimated row height used by layout strategies to derive the page
    /// size. Must be positive and no larger than the true minimum row height,
    /// or target growth can stall.
    pub estimated_row_height: u32,

    /// Quiet period for debounced resize recomputation, in milliseconds.
    pub resize_debounce_ms: u64,

    /// End-of-data detection policy for the fetch loop.
    pub termination: TerminationPolicy,

    pub filter: Option<F>,
    pub sort: Option<S>,

    pub on_page_size_changed: Option<PageSizeCallback>,
    pub on_items_changed: Option<ItemsCallback<T>>,
    pub on_loading_changed: Option<LoadingCallback>,
    pub on_status_changed: Option<StatusCallback>,
    pub on_avail_height_changed: Option<AvailHeightCallback>,
}

impl<T, F, S> LoaderOptions<T, F, S> {
    pub fn new() -> Self {
        Self {
            estimated_row_height: DEFAULT_ESTIMATED_ROW_HEIGHT,
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            termination: TerminationPolicy::default(),
            filter: None,
            sort: None,
            on_page_size_changed: None,
            on_items_changed: None,
            on_loading_changed: None,
            on_status_changed: None,
            on_avail_height_changed: None,
        }
    }

    pub fn with_estimated_row_height(mut self, estimated_row_height: u32) -> Self {
        self.estimated_row_height = estimated_row_height;
        self
    }

    pub fn with_resize_debounce_ms(mut self, resize_debounce_ms: u64) -> Self {
        self.resize_debounce_ms = resize_debounce_ms;
        self
    }

    pub fn with_termination(mut self, termination: TerminationPolicy) -> Self {
        self.termination = termination;
        self
    }

    pub fn with_filter(mut self, filter: Option<F>) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_sort(mut self, sort: Option<S>) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_on_page_size_changed(
        mut self,
        f: Option<impl Fn(u32) + Send + Sync + 'static>,
    ) -> Self {
        self.on_page_size_changed = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_items_changed(
        mut self,
        f: Option<impl Fn(&[T]) + Send + Sync + 'static>,
    ) -> Self {
        self.on_items_changed = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_loading_changed(
        mut self,
        f: Option<impl Fn(bool) + Send + Sync + 'static>,
    ) -> Self {
        self.on_loading_changed = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_status_changed(
        mut self,
        f: Option<impl Fn(LoadStatus) + Send + Sync + 'static>,
    ) -> Self {
        self.on_status_changed = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_avail_height_changed(
        mut self,
        f: Option<impl Fn(u32) + Send + Sync + 'static>,
    ) -> Self {
        self.on_avail_height_changed = f.map(|f| Arc::new(f) as _);
        self
    }
}

impl<T, F, S> Default for LoaderOptions<T, F, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, F: Clone, S: Clone> Clone for LoaderOptions<T, F, S> {
    fn clone(&self) -> Self {
        Self {
            estimated_row_height: self.estimated_row_height,
            resize_debounce_ms: self.resize_debounce_ms,
            termination: self.termination,
            filter: self.filter.clone(),
            sort: self.sort.clone(),
            on_page_size_changed: self.on_page_size_changed.clone(),
            on_items_changed: self.on_items_changed.clone(),
            on_loading_changed: self.on_loading_changed.clone(),
            on_status_changed: self.on_status_changed.clone(),
            on_avail_height_changed: self.on_avail_height_changed.clone(),
        }
    }
}

impl<T, F, S> core::fmt::Debug for LoaderOptions<T, F, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoaderOptions")
            .field("estimated_row_height", &self.estimated_row_height)
            .field("resize_debounce_ms", &self.resize_debounce_ms)
            .field("termination", &self.termination)
            .field("filter", &self.filter.is_some())
            .field("sort", &self.sort.is_some())
            .finish_non_exhaustive()
    }
}
