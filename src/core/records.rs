//! Helpers for shaping flat query results into pageable snapshots.

use std::collections::BTreeMap;

/// Splits `rows` into chunks of at most `per_page` rows, each chunk becoming
/// one page entry. `per_page` is clamped to a minimum of 1.
pub fn chunk_rows<T>(rows: Vec<T>, per_page: usize) -> Vec<Vec<T>> {
    let per_page = per_page.max(1);
    let mut chunks = Vec::with_capacity(rows.len().div_ceil(per_page));
    let mut current = Vec::with_capacity(per_page);
    for row in rows {
        current.push(row);
        if current.len() == per_page {
            chunks.push(std::mem::replace(&mut current, Vec::with_capacity(per_page)));
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Groups `rows` by a derived key, one page entry per key, ordered by key.
/// Row order within a group follows the input order.
pub fn group_rows<T, K, F>(rows: Vec<T>, key: F) -> Vec<(K, Vec<T>)>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut groups: BTreeMap<K, Vec<T>> = BTreeMap::new();
    for row in rows {
        groups.entry(key(&row)).or_default().push(row);
    }
    groups.into_iter().collect()
}
