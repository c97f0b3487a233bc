// Example: pumping the fetch loop by hand against an in-memory source.
use loadwindow::{FetchOutcome, FetchRequest, Loader, LoaderOptions};

fn page(rows: &[u32], request: &FetchRequest<(), ()>) -> FetchOutcome<u32> {
    let start = request.offset.min(rows.len());
    let end = (request.offset + request.page_size as usize).min(rows.len());
    Ok(rows[start..end].to_vec())
}

fn main() {
    let rows: Vec<u32> = (0..57).collect();
    let mut loader: Loader<u32> = Loader::new(LoaderOptions::new());

    // Sizing completes: one page of 20 seeds the target.
    loader.set_page_size(20);
    let mut request = loader.begin_load();
    while let Some(r) = request {
        let outcome = page(&rows, &r);
        request = loader.complete_page(outcome);
    }
    println!(
        "after first page: loaded={} status={:?}",
        loader.loaded_count(),
        loader.status()
    );

    // The user scrolls: grow the target and drain the gap.
    loader.grow_target(21);
    loader.run_to_idle(|r| page(&rows, r));
    println!(
        "after growth: loaded={} status={:?}",
        loader.loaded_count(),
        loader.status()
    );

    // One more growth runs past the end of the data.
    loader.grow_target(21);
    loader.run_to_idle(|r| page(&rows, r));
    println!(
        "after exhaustion: loaded={} status={:?}",
        loader.loaded_count(),
        loader.status()
    );
}
