//! Client-side search over the last fetched explorer snapshot.

use std::borrow::Cow;

use tweetsense_core::{LeaderboardEntry, SampleRow};

/// Rows that expose a fixed set of fields to free-text search.
pub trait Searchable {
    fn search_fields(&self) -> Vec<Cow<'_, str>>;
}

impl Searchable for SampleRow {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.text.as_str()),
            Cow::Borrowed(self.entity.as_str()),
            Cow::Borrowed(self.sentiment.as_str()),
            Cow::Owned(self.tweet_id.to_string()),
        ]
    }
}

impl Searchable for LeaderboardEntry {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(self.entity.as_str())]
    }
}

/// Rows where any search field contains `query`, case-insensitively.
///
/// A blank query keeps every row. The input slice is never modified.
#[must_use]
pub fn filter_rows<'a, T: Searchable>(rows: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows.iter().collect();
    }
    rows.iter()
        .filter(|row| {
            row.search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Sample rows matching on text, entity, sentiment, or tweet id.
#[must_use]
pub fn filter_samples<'a>(rows: &'a [SampleRow], query: &str) -> Vec<&'a SampleRow> {
    filter_rows(rows, query)
}

/// Leaderboard rows matching on entity.
#[must_use]
pub fn filter_leaderboard<'a>(
    rows: &'a [LeaderboardEntry],
    query: &str,
) -> Vec<&'a LeaderboardEntry> {
    filter_rows(rows, query)
}
