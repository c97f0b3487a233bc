use loadwindow::{FetchOutcome, FetchRequest, LoadStatus, Loader, LoaderOptions};

use crate::LayoutStrategy;

/// A framework-neutral controller that wraps a [`loadwindow::Loader`] with a
/// layout strategy and provides the common host workflows: sizing, debounced
/// resize recomputation, and near-end growth.
///
/// This type does not hold any UI objects or timers. Hosts drive it by
/// calling:
/// - [`FeedController::apply_measure`] when geometry becomes known (e.g. the
///   header height is measured)
/// - [`FeedController::on_resize`] on resize events, plus
///   [`FeedController::tick`] on a frame/timer cadence to flush the debounced
///   recompute
/// - [`FeedController::on_scroll`] on scroll events
/// - the inner loader's pump (`begin_load`/`complete_page`, or
///   [`FeedController::run_to_idle`]) to perform the fetches
pub struct FeedController<T, F, S, L: LayoutStrategy> {
    loader: Loader<T, F, S>,
    layout: L,
    pending_resize: Option<PendingResize<L::Metrics>>,
}

struct PendingResize<M> {
    metrics: M,
    at_ms: u64,
}

impl<T, F, S, L: LayoutStrategy> FeedController<T, F, S, L> {
    /// Creates a controller from options and a layout strategy.
    ///
    /// The options' termination policy is used as-is; see
    /// [`FeedController::new_with_layout_termination`] to reproduce the
    /// strategy's observed deployment.
    pub fn new(options: LoaderOptions<T, F, S>, layout: L) -> Self {
        Self {
            loader: Loader::new(options),
            layout,
            pending_resize: None,
        }
    }

    /// Creates a controller whose termination policy is the strategy's
    /// observed default.
    pub fn new_with_layout_termination(mut options: LoaderOptions<T, F, S>, layout: L) -> Self {
        options.termination = layout.default_termination();
        Self::new(options, layout)
    }

    pub fn loader(&self) -> &Loader<T, F, S> {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut Loader<T, F, S> {
        &mut self.loader
    }

    pub fn into_loader(self) -> Loader<T, F, S> {
        self.loader
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut L {
        &mut self.layout
    }

    /// Recomputes the page size from `metrics` immediately.
    ///
    /// Call this when geometry first becomes known (header measured,
    /// container mounted). Resize events should go through
    /// [`FeedController::on_resize`] so bursts coalesce; hosts that already
    /// debounce resize externally can keep calling this directly.
    pub fn apply_measure(&mut self, metrics: &L::Metrics) {
        let estimated_row_height = self.loader.options().estimated_row_height;
        let page_size = self.layout.page_size(metrics, estimated_row_height);
        if let Some(height) = self.layout.avail_height(metrics) {
            self.loader.set_avail_height(height);
        }
        self.loader.set_page_size(page_size);
    }

    /// Records a resize event for debounced recomputation.
    ///
    /// While the page size is still unknown the recompute happens
    /// immediately; nothing can load before first sizing.
    pub fn on_resize(&mut self, metrics: L::Metrics, now_ms: u64) {
        if self.loader.page_size() == 0 {
            self.apply_measure(&metrics);
            self.pending_resize = None;
            return;
        }
        self.pending_resize = Some(PendingResize { metrics, at_ms: now_ms });
    }

    /// Advances the controller clock.
    ///
    /// Flushes a recorded resize once the quiet period
    /// (`resize_debounce_ms`) has elapsed since the last resize event.
    /// Returns whether a recompute ran.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let quiet = self.loader.options().resize_debounce_ms;
        match self.pending_resize.take() {
            Some(pending) if now_ms.saturating_sub(pending.at_ms) >= quiet => {
                self.apply_measure(&pending.metrics);
                true
            }
            pending => {
                self.pending_resize = pending;
                false
            }
        }
    }

    /// Runs a scroll-triggered growth check.
    ///
    /// Skipped entirely (scroll memory untouched) unless the loader is idle
    /// with a seeded target. Returns whether the target grew.
    pub fn on_scroll(&mut self, metrics: &L::Metrics) -> bool {
        if self.loader.target_count() == 0 || self.loader.status() != LoadStatus::Idle {
            return false;
        }
        if !self.layout.near_end(metrics) {
            return false;
        }
        let step = self.layout.growth_step(self.loader.page_size());
        let before = self.loader.target_count();
        self.loader.grow_target(step);
        self.loader.target_count() > before
    }

    /// The height the host should give the scroll container, where the
    /// strategy sizes it.
    pub fn fit_height(&self, metrics: &L::Metrics) -> Option<u32> {
        self.layout.fit_height(metrics)
    }
}

impl<T, F: PartialEq, S, L: LayoutStrategy> FeedController<T, F, S, L> {
    /// Replaces the filter model; an actual change resets the window and the
    /// strategy's scroll memory.
    pub fn set_filter(&mut self, filter: Option<F>) -> bool {
        let changed = self.loader.set_filter(filter);
        if changed {
            self.layout.clear_scroll_memory();
        }
        changed
    }
}

impl<T, F, S: PartialEq, L: LayoutStrategy> FeedController<T, F, S, L> {
    /// Replaces the sort model; an actual change resets the window and the
    /// strategy's scroll memory.
    pub fn set_sort(&mut self, sort: Option<S>) -> bool {
        let changed = self.loader.set_sort(sort);
        if changed {
            self.layout.clear_scroll_memory();
        }
        changed
    }
}

impl<T, F: PartialEq, S: PartialEq, L: LayoutStrategy> FeedController<T, F, S, L> {
    /// Replaces both models at once with a single reset.
    pub fn set_models(&mut self, filter: Option<F>, sort: Option<S>) -> bool {
        let changed = self.loader.set_models(filter, sort);
        if changed {
            self.layout.clear_scroll_memory();
        }
        changed
    }
}

impl<T, F: Clone, S: Clone, L: LayoutStrategy> FeedController<T, F, S, L> {
    /// Drives the loader's fetch loop to completion with a synchronous fetch
    /// closure. See [`Loader::run_to_idle`].
    pub fn run_to_idle(&mut self, fetch: impl FnMut(&FetchRequest<F, S>) -> FetchOutcome<T>) {
        self.loader.run_to_idle(fetch);
    }
}

impl<T, F, S, L: LayoutStrategy> core::fmt::Debug for FeedController<T, F, S, L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FeedController")
            .field("loader", &self.loader)
            .field("resize_pending", &self.pending_resize.is_some())
            .finish_non_exhaustive()
    }
}
