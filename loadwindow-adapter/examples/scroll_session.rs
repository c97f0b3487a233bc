// Example: a simulated whole-window scroll session.
use loadwindow::{FetchOutcome, FetchRequest, LoaderOptions};
use loadwindow_adapter::{FeedController, WindowLayout, WindowMetrics};

fn page(rows: &[u64], request: &FetchRequest<(), ()>) -> FetchOutcome<u64> {
    let start = request.offset.min(rows.len());
    let end = (request.offset + request.page_size as usize).min(rows.len());
    Ok(rows[start..end].to_vec())
}

fn main() {
    let rows: Vec<u64> = (1..=45).collect();
    let mut feed = FeedController::new(LoaderOptions::<u64>::new(), WindowLayout);

    // Header measured: 160 units of viewport left for rows.
    feed.apply_measure(&WindowMetrics {
        window_height: 200,
        header_height: 40,
        scroll_y: 0,
        document_height: 0,
    });
    feed.run_to_idle(|r| page(&rows, r));
    println!(
        "page_size={} loaded={} status={:?}",
        feed.loader().page_size(),
        feed.loader().loaded_count(),
        feed.loader().status()
    );

    // The user scrolls near the bottom: less than one viewport remains.
    let near_bottom = WindowMetrics {
        window_height: 200,
        header_height: 40,
        scroll_y: 600,
        document_height: 750,
    };
    if feed.on_scroll(&near_bottom) {
        feed.run_to_idle(|r| page(&rows, r));
    }
    println!(
        "after scroll: target={} loaded={} status={:?}",
        feed.loader().target_count(),
        feed.loader().loaded_count(),
        feed.loader().status()
    );
}
