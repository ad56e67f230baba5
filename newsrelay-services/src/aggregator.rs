//! Per-keyword fan-out and order-preserving merge

use std::future::Future;

use tracing::debug;

use newsrelay_core::{KeywordTagged, RelayResult};

/// Cap on merged items returned from one aggregation
pub const MAX_TOTAL_RESULTS: usize = 50;

/// Fan a term list out across a provider and merge the results.
///
/// Terms are fetched one at a time and concatenated in term order, so the
/// merged list is deterministic. Each item is tagged with the term that
/// produced it; a URL surfacing under two terms appears once per term. The
/// first provider failure aborts the whole aggregation; there is no
/// partial-results mode.
pub async fn aggregate_terms<T, F, Fut>(terms: &[String], mut fetch: F) -> RelayResult<Vec<T>>
where
    T: KeywordTagged,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = RelayResult<Vec<T>>>,
{
    let mut merged: Vec<T> = Vec::new();
    for term in terms {
        let mut items = fetch(term.clone()).await?;
        for item in &mut items {
            item.tag_keyword(term);
        }
        debug!("Aggregated {} items for term '{}'", items.len(), term);
        merged.append(&mut items);
    }
    merged.truncate(MAX_TOTAL_RESULTS);
    Ok(merged)
}
