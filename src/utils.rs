use crate::types::UnfollowRecord;

/// Newest first; ties broken by name so output is stable.
pub fn sort_records_newest_first(records: &mut [UnfollowRecord]) {
    records.sort_by(|a, b| {
        b.unfollowed_at
            .cmp(&a.unfollowed_at)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
}

/// Keeps records whose artist name contains `search`, ignoring case.
pub fn filter_records_by_name(records: &mut Vec<UnfollowRecord>, search: &str) {
    let search_term = search.to_lowercase();
    records.retain(|r| r.name.to_lowercase().contains(&search_term));
}
