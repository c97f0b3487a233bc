use crate::*;

use alloc::string::String;
use alloc::string::ToString;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        debug_assert!(start < end_exclusive);
        let span = (end_exclusive - start) as u64;
        start + (self.next_u64() % span) as u32
    }
}

/// Sequential data source over `total` rows (ids `0..total`), recording every
/// request it sees and optionally failing at one offset.
struct StubSource {
    total: usize,
    fail_at_offset: Option<usize>,
    calls: Vec<(u32, usize)>,
}

impl StubSource {
    fn new(total: usize) -> Self {
        Self {
            total,
            fail_at_offset: None,
            calls: Vec::new(),
        }
    }

    fn failing_at(total: usize, offset: usize) -> Self {
        Self {
            fail_at_offset: Some(offset),
            ..Self::new(total)
        }
    }

    fn fetch<F, S>(&mut self, request: &FetchRequest<F, S>) -> FetchOutcome<usize> {
        self.calls.push((request.page_size, request.offset));
        if self.fail_at_offset == Some(request.offset) {
            return Err(FetchError);
        }
        let end = self.total.max(request.offset);
        let end = end.min(request.offset + request.page_size as usize);
        Ok((request.offset..end).collect())
    }
}

fn loader() -> Loader<usize> {
    Loader::new(LoaderOptions::new())
}

#[test]
fn seeds_target_when_page_size_becomes_known() {
    let mut l = loader();
    assert_eq!(l.begin_load(), None);

    l.set_page_size(10);
    assert_eq!(l.target_count(), 10);

    let mut src = StubSource::new(100);
    l.run_to_idle(|r| src.fetch(r));
    assert_eq!(l.items(), (0..10).collect::<Vec<_>>());
    assert_eq!(l.status(), LoadStatus::Idle);
    assert_eq!(src.calls, [(10, 0)]);
}

#[test]
fn page_size_zero_keeps_reset_window_dormant() {
    let mut l: Loader<usize, String> = Loader::new(LoaderOptions::new());
    assert!(l.set_filter(Some("abc".to_string())));
    assert_eq!(l.target_count(), 0);
    assert_eq!(l.begin_load(), None);

    // Sizing completes later; the normal seeding path takes over.
    l.set_page_size(5);
    assert_eq!(l.target_count(), 5);
    let mut src = StubSource::new(100);
    l.run_to_idle(|r| src.fetch(r));
    assert_eq!(l.loaded_count(), 5);
}

#[test]
fn resize_extension_grows_target_past_new_page_size() {
    let mut l = loader();
    l.set_page_size(10);
    let mut src = StubSource::new(100);
    l.run_to_idle(|r| src.fetch(r));
    assert_eq!(l.loaded_count(), 10);

    // The viewport grew: one more row than the new page size keeps the
    // larger viewport full.
    l.set_page_size(15);
    assert_eq!(l.target_count(), 16);
    l.run_to_idle(|r| src.fetch(r));
    assert_eq!(l.loaded_count(), 25);
    assert_eq!(l.status(), LoadStatus::Idle);
    assert_eq!(src.calls, [(10, 0), (15, 10)]);
}

#[test]
fn shrinking_page_size_leaves_target_alone() {
    let mut l = loader();
    l.set_page_size(10);
    l.set_page_size(7);
    assert_eq!(l.target_count(), 10);
}

#[test]
fn empty_page_policy_runs_one_extra_call_and_exhausts() {
    let mut l = loader();
    l.set_page_size(10);
    l.grow_target(20);
    assert_eq!(l.target_count(), 30);

    let mut src = StubSource::new(25);
    l.run_to_idle(|r| src.fetch(r));
    // The short third page is not conclusive under the empty-page policy;
    // a fourth call observes the empty page.
    assert_eq!(src.calls, [(10, 0), (10, 10), (10, 20), (10, 25)]);
    assert_eq!(l.items(), (0..25).collect::<Vec<_>>());
    assert_eq!(l.status(), LoadStatus::Exhausted);
}

#[test]
fn short_page_policy_exhausts_on_first_short_page() {
    let mut l: Loader<usize> =
        Loader::new(LoaderOptions::new().with_termination(TerminationPolicy::ShortPage));
    l.set_page_size(10);
    l.grow_target(20);

    let mut src = StubSource::new(25);
    l.run_to_idle(|r| src.fetch(r));
    assert_eq!(src.calls, [(10, 0), (10, 10), (10, 20)]);
    assert_eq!(l.items(), (0..25).collect::<Vec<_>>());
    assert_eq!(l.status(), LoadStatus::Exhausted);
}

#[test]
fn scroll_growth_fetches_exactly_enough_pages() {
    let mut l = loader();
    l.set_page_size(10);
    let mut src = StubSource::new(100);
    l.run_to_idle(|r| src.fetch(r));
    assert_eq!(l.loaded_count(), 10);
    assert_eq!(l.status(), LoadStatus::Idle);

    // One downward scroll in the whole-window strategy grows by a page + 1.
    l.grow_target(11);
    assert_eq!(l.target_count(), 21);
    l.run_to_idle(|r| src.fetch(r));
    assert_eq!(l.loaded_count(), 30);
    assert_eq!(l.status(), LoadStatus::Idle);
    // Two additional pages reach the target; a third is never issued.
    assert_eq!(src.calls, [(10, 0), (10, 10), (10, 20)]);
}

#[test]
fn error_discards_all_rows_gathered_by_the_failing_loop() {
    let mut l = loader();
    l.set_page_size(10);
    l.grow_target(20);

    let mut src = StubSource::failing_at(100, 20);
    l.run_to_idle(|r| src.fetch(r));
    // Two full pages were gathered in the same loop as the failure; none of
    // them are published.
    assert_eq!(src.calls, [(10, 0), (10, 10), (10, 20)]);
    assert!(l.items().is_empty());
    assert_eq!(l.status(), LoadStatus::Error);
    assert_eq!(l.begin_load(), None);
}

#[test]
fn failure_keeps_previously_committed_pages() {
    let mut l = loader();
    l.set_page_size(10);
    let mut src = StubSource::failing_at(100, 20);
    l.run_to_idle(|r| src.fetch(r));
    l.grow_target(10);
    l.run_to_idle(|r| src.fetch(r));
    assert_eq!(l.loaded_count(), 20);

    // The third page fails in its own loop entry; the first two commits
    // survive untouched.
    l.grow_target(10);
    l.run_to_idle(|r| src.fetch(r));
    assert_eq!(l.items(), (0..20).collect::<Vec<_>>());
    assert_eq!(l.status(), LoadStatus::Error);
}

#[test]
fn reset_restores_one_page_window_before_any_fetch() {
    let mut l: Loader<usize, String> = Loader::new(LoaderOptions::new());
    l.set_page_size(10);
    l.grow_target(20);
    let mut src = StubSource::new(25);
    l.run_to_idle(|r| src.fetch(r));
    assert_eq!(l.status(), LoadStatus::Exhausted);
    assert_eq!(l.loaded_count(), 25);
    let calls_before = src.calls.len();

    assert!(l.set_filter(Some("ab".to_string())));
    assert!(l.items().is_empty());
    assert_eq!(l.loaded_count(), 0);
    assert_eq!(l.status(), LoadStatus::Idle);
    assert_eq!(l.target_count(), 10);
    assert_eq!(src.calls.len(), calls_before);

    // The next loop carries the new criteria.
    let request = l.begin_load().unwrap();
    assert_eq!(request.offset, 0);
    assert_eq!(request.filter.as_deref(), Some("ab"));
}

#[test]
fn unchanged_models_do_not_reset() {
    let mut l: Loader<usize, String, bool> = Loader::new(LoaderOptions::new());
    l.set_page_size(10);
    let mut src = StubSource::new(30);
    l.run_to_idle(|r| src.fetch(r));

    assert!(l.set_models(Some("a".to_string()), Some(true)));
    assert!(!l.set_models(Some("a".to_string()), Some(true)));
    assert!(!l.set_filter(Some("a".to_string())));
    assert!(!l.set_sort(Some(true)));
    assert!(l.set_sort(Some(false)));
}

#[test]
fn exhausted_blocks_growth_until_reset() {
    let mut l = loader();
    l.set_page_size(10);
    l.grow_target(20);
    let mut src = StubSource::new(5);
    l.run_to_idle(|r| src.fetch(r));
    assert_eq!(l.status(), LoadStatus::Exhausted);

    l.grow_target(10);
    assert_eq!(l.target_count(), 30);
    assert_eq!(l.begin_load(), None);

    l.reset();
    assert_eq!(l.status(), LoadStatus::Idle);
    assert_eq!(l.target_count(), 10);
    l.run_to_idle(|r| src.fetch(r));
    assert_eq!(l.loaded_count(), 5);
}

#[test]
fn second_begin_load_while_loop_in_flight_is_a_noop() {
    let mut l = loader();
    l.set_page_size(10);
    let first = l.begin_load();
    assert!(first.is_some());
    assert!(l.is_loading());
    assert_eq!(l.begin_load(), None);

    let next = l.complete_page(Ok((0..10).collect()));
    assert_eq!(next, None);
    assert_eq!(l.status(), LoadStatus::Idle);
    assert_eq!(l.loaded_count(), 10);
}

#[test]
fn growth_during_loading_is_dropped() {
    let mut l = loader();
    l.set_page_size(10);
    let _request = l.begin_load().unwrap();

    l.grow_target(11);
    assert_eq!(l.target_count(), 10);

    l.complete_page(Ok((0..10).collect()));
    assert_eq!(l.status(), LoadStatus::Idle);
    assert_eq!(l.target_count(), 10);
}

#[test]
fn page_size_extension_during_loop_applies_to_next_entry() {
    let mut l = loader();
    l.set_page_size(10);
    let _request = l.begin_load().unwrap();

    // A resize recompute lands mid-loop; the in-flight loop keeps its
    // snapshot, the next entry sees the extended target.
    l.set_page_size(20);
    assert_eq!(l.target_count(), 21);

    assert_eq!(l.complete_page(Ok((0..10).collect())), None);
    assert_eq!(l.status(), LoadStatus::Idle);

    let request = l.begin_load().unwrap();
    assert_eq!(request.page_size, 20);
    assert_eq!(request.offset, 10);
}

#[test]
fn mid_loop_reset_discards_late_completion() {
    let mut l: Loader<usize, String> = Loader::new(LoaderOptions::new());
    l.set_page_size(10);
    let _request = l.begin_load().unwrap();

    assert!(l.set_filter(Some("new".to_string())));
    // The in-flight loop cannot be cancelled; it stays loading until its
    // result arrives and is discarded.
    assert!(l.is_loading());

    assert_eq!(l.complete_page(Ok((0..10).collect())), None);
    assert!(l.items().is_empty());
    assert_eq!(l.status(), LoadStatus::Idle);

    let request = l.begin_load().unwrap();
    assert_eq!(request.offset, 0);
    assert_eq!(request.filter.as_deref(), Some("new"));
}

#[test]
fn late_completion_without_loop_is_discarded() {
    let mut l = loader();
    l.set_page_size(10);
    assert_eq!(l.complete_page(Ok((0..10).collect())), None);
    assert!(l.items().is_empty());
    assert_eq!(l.status(), LoadStatus::Idle);
}

#[test]
fn unchanged_page_size_emits_no_notification() {
    let hits = Arc::new(AtomicUsize::new(0));
    let l_hits = Arc::clone(&hits);
    let mut l: Loader<usize> = Loader::new(LoaderOptions::new().with_on_page_size_changed(Some(
        move |_ps| {
            l_hits.fetch_add(1, Ordering::SeqCst);
        },
    )));

    l.set_page_size(10);
    l.set_page_size(10);
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    l.set_avail_height(160);
    l.set_avail_height(160);
}

#[test]
fn notification_sequence_for_a_successful_loop() {
    #[derive(Debug, PartialEq)]
    enum Event {
        Items(usize),
        Loading(bool),
        Status(LoadStatus),
    }
    let events = Arc::new(Mutex::new(Vec::new()));
    let (e1, e2, e3) = (Arc::clone(&events), Arc::clone(&events), Arc::clone(&events));
    let options = LoaderOptions::new()
        .with_on_items_changed(Some(move |items: &[usize]| {
            e1.lock().unwrap().push(Event::Items(items.len()));
        }))
        .with_on_loading_changed(Some(move |loading| {
            e2.lock().unwrap().push(Event::Loading(loading));
        }))
        .with_on_status_changed(Some(move |status| {
            e3.lock().unwrap().push(Event::Status(status));
        }));
    let mut l: Loader<usize> = Loader::new(options);
    l.set_page_size(10);
    let mut src = StubSource::new(100);
    l.run_to_idle(|r| src.fetch(r));

    let got = events.lock().unwrap();
    assert_eq!(
        *got,
        [
            Event::Status(LoadStatus::Loading),
            Event::Loading(true),
            // Items are published before the loading flag clears, so a
            // consumer never sees "not loading" with a stale window.
            Event::Items(10),
            Event::Status(LoadStatus::Idle),
            Event::Loading(false),
        ]
    );
}

#[test]
fn reset_notifies_with_an_empty_window() {
    let last_len = Arc::new(AtomicUsize::new(usize::MAX));
    let cb_len = Arc::clone(&last_len);
    let mut l: Loader<usize, String> = Loader::new(LoaderOptions::new().with_on_items_changed(
        Some(move |items: &[usize]| {
            cb_len.store(items.len(), Ordering::SeqCst);
        }),
    ));
    l.set_page_size(10);
    let mut src = StubSource::new(30);
    l.run_to_idle(|r| src.fetch(r));
    assert_eq!(last_len.load(Ordering::SeqCst), 10);

    l.set_filter(Some("x".to_string()));
    assert_eq!(last_len.load(Ordering::SeqCst), 0);
}

#[test]
fn load_state_snapshot_reflects_counters() {
    let mut l = loader();
    l.set_page_size(10);
    l.set_avail_height(160);
    let mut src = StubSource::new(100);
    l.run_to_idle(|r| src.fetch(r));

    let state = l.load_state();
    assert_eq!(
        state,
        LoadState {
            page_size: 10,
            avail_height: 160,
            target_count: 10,
            loaded_count: 10,
            status: LoadStatus::Idle,
        }
    );
}

#[test]
fn invariants_hold_under_random_event_stream() {
    let mut rng = Lcg::new(0x10adca5e);

    for _case in 0..50 {
        let mut l: Loader<u64, u64> = Loader::new(LoaderOptions::new());
        let mut page = 0u32;
        let mut expect_target = 0usize;
        let mut expect_loaded = 0usize;
        let mut expect_status = LoadStatus::Idle;
        let mut filter_id = 0u64;

        for _step in 0..60 {
            match rng.gen_range_u32(0, 5) {
                0 => {
                    // Resize recompute.
                    let ps = rng.gen_range_u32(4, 12);
                    l.set_page_size(ps);
                    if ps != page {
                        page = ps;
                        if expect_target == 0 {
                            expect_target = ps as usize;
                        } else if ps as usize > expect_target {
                            expect_target = ps as usize + 1;
                        }
                    }
                }
                1 => {
                    // Scroll growth.
                    let step = rng.gen_range_u32(1, 25);
                    l.grow_target(step);
                    if expect_target > 0 && expect_status == LoadStatus::Idle {
                        expect_target += step as usize;
                    }
                }
                2 => {
                    // Filter change: always a fresh value, always a reset.
                    filter_id += 1;
                    assert!(l.set_filter(Some(filter_id)));
                    expect_loaded = 0;
                    expect_target = page as usize;
                    expect_status = LoadStatus::Idle;
                }
                3 => {
                    // Drive the loop against an endless full-page source.
                    l.run_to_idle(|r| {
                        let start = r.offset as u64;
                        Ok((start..start + r.page_size as u64).collect())
                    });
                    if expect_status == LoadStatus::Idle
                        && page > 0
                        && expect_loaded < expect_target
                    {
                        let gap = expect_target - expect_loaded;
                        expect_loaded += gap.div_ceil(page as usize) * page as usize;
                    }
                }
                _ => {
                    // Drive the loop against a failing source.
                    l.run_to_idle(|_r| Err(FetchError));
                    if expect_status == LoadStatus::Idle
                        && page > 0
                        && expect_loaded < expect_target
                    {
                        expect_status = LoadStatus::Error;
                    }
                }
            }

            assert_eq!(l.loaded_count(), l.items().len());
            assert_eq!(l.target_count(), expect_target);
            assert_eq!(l.loaded_count(), expect_loaded);
            assert_eq!(l.status(), expect_status);
            assert_eq!(l.page_size(), page);
        }
    }
}
