use alloc::vec::Vec;

use crate::{FetchOutcome, FetchRequest, LoadState, LoadStatus, LoaderOptions};

/// A headless windowed-loading engine.
///
/// This type is intentionally UI-agnostic and performs no I/O:
/// - It does not hold any UI objects or timers.
/// - Your adapter drives it by reporting page-size changes and growth
///   triggers, and by performing the page fetches it asks for.
/// - The committed window is exposed as a plain slice plus change
///   notifications.
///
/// The fetch loop is pump-driven: [`Loader::begin_load`] enters the loop and
/// hands out the first page request, [`Loader::complete_page`] consumes each
/// page outcome and hands out the next request until the loop exits. Between
/// the two calls the host may suspend however it likes (async I/O, threads,
/// test stubs); the loader guarantees at most one loop is ever in flight.
///
/// For viewport sizing and scroll-trigger strategies, see the
/// `loadwindow-adapter` crate.
pub struct Loader<T, F = (), S = ()> {
    options: LoaderOptions<T, F, S>,
    items: Vec<T>,
    page_size: u32,
    avail_height: u32,
    target_count: usize,
    status: LoadStatus,
    pending: Option<PendingLoop<T>>,
}

/// Bookkeeping for the single in-flight fetch loop.
struct PendingLoop<T> {
    /// Target and page size snapshotted at loop entry; mutations during the
    /// loop only take effect at the next entry.
    target: usize,
    page_size: u32,
    /// Rows gathered by this loop, committed only on a successful exit.
    fresh: Vec<T>,
    /// Set by a mid-loop reset; the next completion is discarded wholesale.
    stale: bool,
}

impl<T, F, S> Loader<T, F, S> {
    pub fn new(options: LoaderOptions<T, F, S>) -> Self {
        lwdebug!(termination = ?options.termination, "Loader::new");
        Self {
            options,
            items: Vec::new(),
            page_size: 0,
            avail_height: 0,
            target_count: 0,
            status: LoadStatus::Idle,
            pending: None,
        }
    }

    pub fn options(&self) -> &LoaderOptions<T, F, S> {
        &self.options
    }

    /// The committed item window, in source order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn loaded_count(&self) -> usize {
        self.items.len()
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn avail_height(&self) -> u32 {
        self.avail_height
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn is_exhausted(&self) -> bool {
        self.status == LoadStatus::Exhausted
    }

    /// Returns a lightweight snapshot of the current counters and status.
    pub fn load_state(&self) -> LoadState {
        LoadState {
            page_size: self.page_size,
            avail_height: self.avail_height,
            target_count: self.target_count,
            loaded_count: self.items.len(),
            status: self.status,
        }
    }

    /// Applies a recomputed page size.
    ///
    /// A page size of `0` means "not yet computed" and suppresses all
    /// fetching. The first positive page size seeds the load target with one
    /// page; a later recompute that rises above the current target (the
    /// viewport grew) extends the target to one row past the new page size so
    /// the next load fills the larger viewport.
    pub fn set_page_size(&mut self, page_size: u32) {
        if self.page_size == page_size {
            return;
        }
        lwdebug!(page_size, target = self.target_count, "set_page_size");
        self.page_size = page_size;
        if let Some(cb) = &self.options.on_page_size_changed {
            cb(page_size);
        }
        if page_size == 0 {
            return;
        }
        let page = page_size as usize;
        if self.target_count == 0 {
            self.target_count = page;
        } else if page > self.target_count {
            self.target_count = page + 1;
        }
    }

    /// Applies a remeasured available height (viewport minus header).
    pub fn set_avail_height(&mut self, avail_height: u32) {
        if self.avail_height == avail_height {
            return;
        }
        self.avail_height = avail_height;
        if let Some(cb) = &self.options.on_avail_height_changed {
            cb(avail_height);
        }
    }

    /// Grows the load target by `step` rows.
    ///
    /// Growth is monotonic accumulation and only applies while `Idle` with a
    /// seeded target: growth triggers that fire during `Loading` or after
    /// `Exhausted`/`Error` are dropped, and a missed trigger simply delays
    /// growth until the next qualifying event.
    pub fn grow_target(&mut self, step: u32) {
        if step == 0 || self.target_count == 0 || self.status != LoadStatus::Idle {
            return;
        }
        self.target_count += step as usize;
        lwtrace!(step, target = self.target_count, "grow_target");
    }

    /// Discards the loaded window and restarts from one page.
    ///
    /// Clears `Exhausted`/`Error` and reseeds the target from the current
    /// page size; a page size of `0` leaves loading dormant until sizing
    /// completes. If a fetch loop is in flight it is marked stale instead of
    /// cancelled: its next completion is discarded and none of its rows reach
    /// the new window.
    pub fn reset(&mut self) {
        lwdebug!(
            loaded = self.items.len(),
            page_size = self.page_size,
            "reset"
        );
        self.items.clear();
        self.target_count = self.page_size as usize;
        if let Some(pending) = &mut self.pending {
            pending.stale = true;
        } else {
            self.set_status(LoadStatus::Idle);
        }
        self.notify_items();
    }

    fn notify_items(&self) {
        if let Some(cb) = &self.options.on_items_changed {
            cb(&self.items);
        }
    }

    fn set_status(&mut self, status: LoadStatus) {
        if self.status == status {
            return;
        }
        let was_loading = self.status == LoadStatus::Loading;
        self.status = status;
        lwtrace!(status = ?status, "status");
        if let Some(cb) = &self.options.on_status_changed {
            cb(status);
        }
        let loading = status == LoadStatus::Loading;
        if loading != was_loading {
            if let Some(cb) = &self.options.on_loading_changed {
                cb(loading);
            }
        }
    }
}

impl<T, F: PartialEq, S> Loader<T, F, S> {
    /// Replaces the filter model, resetting the window on an actual change.
    ///
    /// Returns whether a reset happened.
    pub fn set_filter(&mut self, filter: Option<F>) -> bool {
        if self.options.filter == filter {
            return false;
        }
        self.options.filter = filter;
        self.reset();
        true
    }
}

impl<T, F, S: PartialEq> Loader<T, F, S> {
    /// Replaces the sort model, resetting the window on an actual change.
    ///
    /// Returns whether a reset happened.
    pub fn set_sort(&mut self, sort: Option<S>) -> bool {
        if self.options.sort == sort {
            return false;
        }
        self.options.sort = sort;
        self.reset();
        true
    }
}

impl<T, F: PartialEq, S: PartialEq> Loader<T, F, S> {
    /// Replaces both models at once with a single reset.
    ///
    /// Returns whether a reset happened.
    pub fn set_models(&mut self, filter: Option<F>, sort: Option<S>) -> bool {
        if self.options.filter == filter && self.options.sort == sort {
            return false;
        }
        self.options.filter = filter;
        self.options.sort = sort;
        self.reset();
        true
    }
}

impl<T, F: Clone, S: Clone> Loader<T, F, S> {
    /// Enters the fetch loop and returns its first page request.
    ///
    /// Returns `None` whenever nothing should load: a loop is already in
    /// flight, the status is terminal (`Exhausted`/`Error`), the page size is
    /// still unknown, or the target is already satisfied. Callers can invoke
    /// this opportunistically after any event; the guard makes re-entry a
    /// no-op.
    pub fn begin_load(&mut self) -> Option<FetchRequest<F, S>> {
        if self.pending.is_some() || self.status != LoadStatus::Idle {
            return None;
        }
        if self.page_size == 0 || self.items.len() >= self.target_count {
            return None;
        }
        self.pending = Some(PendingLoop {
            target: self.target_count,
            page_size: self.page_size,
            fresh: Vec::new(),
            stale: false,
        });
        self.set_status(LoadStatus::Loading);
        lwdebug!(
            offset = self.items.len(),
            target = self.target_count,
            "begin_load"
        );
        Some(self.request_at(self.page_size, self.items.len()))
    }

    /// Feeds one page outcome to the in-flight loop.
    ///
    /// Returns the next page request while the loop continues, `None` once it
    /// has exited (target satisfied, end-of-data, failure, or a mid-loop
    /// reset). A completion arriving with no loop in flight (a late result
    /// after teardown) is discarded.
    pub fn complete_page(&mut self, outcome: FetchOutcome<T>) -> Option<FetchRequest<F, S>> {
        let Some(mut pending) = self.pending.take() else {
            lwwarn!("complete_page without an in-flight loop; result discarded");
            return None;
        };

        if pending.stale {
            lwdebug!("mid-loop reset; loop rows discarded");
            self.set_status(LoadStatus::Idle);
            return None;
        }

        let rows = match outcome {
            Ok(rows) => rows,
            Err(_) => {
                lwdebug!(kept = self.items.len(), "fetch failed; loop rows discarded");
                self.set_status(LoadStatus::Error);
                return None;
            }
        };

        let fetched = rows.len();
        pending.fresh.extend(rows);
        let loaded = self.items.len() + pending.fresh.len();
        lwtrace!(fetched, loaded, target = pending.target, "page");

        if self.options.termination.ends_data(fetched, pending.page_size) {
            self.commit(pending.fresh, LoadStatus::Exhausted);
            return None;
        }
        if loaded >= pending.target {
            self.commit(pending.fresh, LoadStatus::Idle);
            return None;
        }

        let page_size = pending.page_size;
        self.pending = Some(pending);
        Some(self.request_at(page_size, loaded))
    }

    /// Drives the fetch loop to completion with a synchronous fetch closure.
    ///
    /// Pumps [`Loader::begin_load`]/[`Loader::complete_page`] until no
    /// further loop starts, which also picks up target growth accumulated
    /// while a loop was in flight.
    pub fn run_to_idle(&mut self, mut fetch: impl FnMut(&FetchRequest<F, S>) -> FetchOutcome<T>) {
        while let Some(mut request) = self.begin_load() {
            loop {
                let outcome = fetch(&request);
                match self.complete_page(outcome) {
                    Some(next) => request = next,
                    None => break,
                }
            }
        }
    }

    fn commit(&mut self, mut fresh: Vec<T>, status: LoadStatus) {
        self.items.append(&mut fresh);
        self.notify_items();
        self.set_status(status);
    }

    fn request_at(&self, page_size: u32, offset: usize) -> FetchRequest<F, S> {
        FetchRequest {
            page_size,
            offset,
            filter: self.options.filter.clone(),
            sort: self.options.sort.clone(),
        }
    }
}

impl<T, F, S> core::fmt::Debug for Loader<T, F, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Loader")
            .field("page_size", &self.page_size)
            .field("avail_height", &self.avail_height)
            .field("target_count", &self.target_count)
            .field("loaded_count", &self.items.len())
            .field("status", &self.status)
            .field("in_flight", &self.pending.is_some())
            .finish_non_exhaustive()
    }
}
