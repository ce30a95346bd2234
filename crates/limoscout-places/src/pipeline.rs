//! Two-stage collection run: discover place ids across many queries, then
//! enrich each unique id into an output row.

use limoscout_core::Query;

use crate::client::PlacesClient;
use crate::dedupe::PlaceIdSet;
use crate::details::DetailsPolicy;
use crate::normalize::PlaceRow;
use crate::search::SearchPolicy;

const SEARCH_PROGRESS_EVERY: usize = 10;
const DETAILS_PROGRESS_EVERY: usize = 25;

/// Counters from a discovery pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscoverySummary {
    pub queries_run: usize,
    /// Search hits seen, including duplicates and hits without an id.
    pub results_seen: usize,
    /// Ids added to the set by this pass.
    pub new_ids: usize,
}

/// Runs every query in order and records each returned `place_id` in `ids`.
///
/// Queries that fail are logged by the pager and contribute nothing; the
/// pass always runs to completion.
pub async fn discover_place_ids(
    client: &PlacesClient,
    queries: &[Query],
    policy: &SearchPolicy,
    ids: &mut PlaceIdSet,
) -> DiscoverySummary {
    let mut summary = DiscoverySummary::default();
    let total = queries.len();

    for (index, query) in queries.iter().enumerate() {
        let hits = client.text_search(&query.text, policy).collect_all().await;
        let added = hits
            .iter()
            .filter_map(|hit| hit.place_id.as_deref())
            .filter(|place_id| ids.insert(place_id))
            .count();
        summary.results_seen += hits.len();

        summary.queries_run += 1;
        summary.new_ids += added;
        tracing::info!(
            query = %query.text,
            lang = %query.lang,
            results = hits.len(),
            new_ids = added,
            "query complete"
        );

        let done = index + 1;
        if done % SEARCH_PROGRESS_EVERY == 0 || done == total {
            tracing::info!(done, total, unique_ids = ids.len(), "search progress");
        }
    }

    summary
}

/// Fetches details for each id in order and maps them to rows.
///
/// Lookups that fail or return nothing usable are skipped. Consecutive
/// lookups are separated by `policy.base_delay`.
pub async fn enrich_places(
    client: &PlacesClient,
    ids: &[String],
    policy: &DetailsPolicy,
) -> Vec<PlaceRow> {
    let total = ids.len();
    let mut rows = Vec::with_capacity(total);
    let mut skipped = 0usize;

    for (index, place_id) in ids.iter().enumerate() {
        if index > 0 && !policy.base_delay.is_zero() {
            tokio::time::sleep(policy.base_delay).await;
        }

        match client.fetch_details(place_id, policy).await {
            Some(details) => rows.push(PlaceRow::from_details(&details, place_id)),
            None => skipped += 1,
        }

        let done = index + 1;
        if done % DETAILS_PROGRESS_EVERY == 0 || done == total {
            tracing::info!(done, total, rows = rows.len(), skipped, "details progress");
        }
    }

    rows
}
