// Page-number pagination over list endpoints.
// Fetches consecutive pages until a short page signals the end of the listing.

use std::future::Future;

use tracing::{debug, warn};

use crate::error::Result;

/// Largest page size the GitHub list endpoints accept.
pub const MAX_PER_PAGE: u32 = 100;

/// Hard upper bound on pages fetched for a single listing.
pub const MAX_PAGES: u32 = 1000;

/// True when a page of `len` items is the final page for a `per_page` request.
pub fn is_last_page(len: usize, per_page: u32) -> bool {
    len < per_page as usize
}

/// Clamp a requested page size into the range the API serves.
pub fn clamp_per_page(per_page: u32) -> u32 {
    per_page.clamp(1, MAX_PER_PAGE)
}

/// Collect every item of a paginated listing.
///
/// `fetch_page` is called with 1-based page numbers. Iteration stops after
/// the first page holding fewer than `per_page` items (an empty page
/// included), so a short page never triggers a further request. Any page
/// error aborts the whole listing.
pub async fn collect_pages<T, F, Fut>(per_page: u32, mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let per_page = clamp_per_page(per_page);
    let mut items = Vec::new();

    for page in 1..=MAX_PAGES {
        let batch = fetch_page(page).await?;
        let len = batch.len();
        items.extend(batch);
        debug!(page, len, total = items.len(), "fetched page");

        if is_last_page(len, per_page) {
            return Ok(items);
        }
    }

    warn!(max_pages = MAX_PAGES, "pagination stopped at page limit");
    Ok(items)
}
