// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Approximate matching for category search boxes.

use crate::utils::normalize_text;
use serde::Serialize;

/// Candidates scoring at or below this are hidden from search results.
pub const DEFAULT_THRESHOLD: f64 = 40.0;

/// Scores `candidate` against `query` in `0..=100`.
///
/// A substring hit, or an empty query, scores 100. Otherwise each query character
/// consumes one matching character of the candidate (so repeats cannot double count),
/// and the match rate is reduced by two points per character of length difference.
pub fn score(candidate: &str, query: &str) -> f64 {
    let cand = normalize_text(candidate);
    let query = normalize_text(query);
    if query.is_empty() || cand.contains(&query) {
        return 100.0;
    }

    let mut pool: Vec<char> = cand.chars().collect();
    let cand_len = pool.len();
    let query_len = query.chars().count();
    let mut matches = 0usize;
    for ch in query.chars() {
        if let Some(idx) = pool.iter().position(|&c| c == ch) {
            pool.swap_remove(idx);
            matches += 1;
        }
    }

    let similarity = matches as f64 / query_len as f64 * 100.0;
    let penalty = cand_len.abs_diff(query_len) as f64 * 2.0;
    (similarity - penalty).max(0.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked<T> {
    pub item: T,
    pub score: f64,
}

/// Keeps items whose key scores above `threshold` and orders them by descending
/// score. Ties keep their original relative order. An empty query keeps every item
/// in its original position.
pub fn rank<T, F>(
    items: impl IntoIterator<Item = T>,
    query: &str,
    threshold: f64,
    key: F,
) -> Vec<Ranked<T>>
where
    F: Fn(&T) -> &str,
{
    if query.trim().is_empty() {
        return items
            .into_iter()
            .map(|item| Ranked { item, score: 100.0 })
            .collect();
    }

    let mut out: Vec<Ranked<T>> = items
        .into_iter()
        .filter_map(|item| {
            let score = score(key(&item), query);
            (score > threshold).then_some(Ranked { item, score })
        })
        .collect();
    out.sort_by(|a, b| b.score.total_cmp(&a.score));
    out
}

/// Convenience over [`rank`] for plain name lists such as a category picker.
pub fn search<'a, S: AsRef<str>>(names: &'a [S], query: &str, threshold: f64) -> Vec<&'a str> {
    rank(names.iter().map(|s| s.as_ref()), query, threshold, |s| *s)
        .into_iter()
        .map(|r| r.item)
        .collect()
}
