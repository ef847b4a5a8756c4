//! Derived metrics for one explorer result.
//!
//! Inputs are the server's distribution, mix, and leaderboard arrays; outputs
//! are per-class counts, per-entity scores, volume-bounded positive/negative
//! rankings, the overall sentiment index, and chart-ready series. Labels that
//! are not one of the three [`SentimentClass`] values contribute nothing, and
//! entity×class cells absent from `mix` count as zero.

use std::collections::HashMap;

use tweetsense_core::{DistributionEntry, LeaderboardEntry, MixEntry, SentimentClass};

/// Ranking pool: only the most-discussed entities are eligible for the
/// positive/negative lists.
pub const TOP_VOLUME_POOL: usize = 20;

/// Length of the positive and negative ranking lists.
pub const TOP_RANKED: usize = 8;

/// Number of leaderboard entities shown in the mentions chart.
pub const LEADERBOARD_CHART_N: usize = 10;

/// Counts per sentiment class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentCounts {
    pub negative: u64,
    pub neutral: u64,
    pub positive: u64,
}

impl SentimentCounts {
    #[must_use]
    pub fn get(&self, class: SentimentClass) -> u64 {
        match class {
            SentimentClass::Negative => self.negative,
            SentimentClass::Neutral => self.neutral,
            SentimentClass::Positive => self.positive,
        }
    }

    /// Adds `count` to the class named by `label`; unknown labels are ignored.
    pub fn add_label(&mut self, label: &str, count: u64) {
        let slot = match SentimentClass::from_label(label) {
            Some(SentimentClass::Negative) => &mut self.negative,
            Some(SentimentClass::Neutral) => &mut self.neutral,
            Some(SentimentClass::Positive) => &mut self.positive,
            None => return,
        };
        *slot = slot.saturating_add(count);
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.negative
            .saturating_add(self.neutral)
            .saturating_add(self.positive)
    }
}

/// Positivity of one entity, folded from its mix rows.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityScore {
    pub entity: String,
    pub pos: u64,
    pub neg: u64,
    pub neu: u64,
    /// `pos + neg + neu`, floored at 1.
    pub total: u64,
    /// `(pos - neg) / total`, always in `[-1, 1]`.
    pub score: f64,
}

impl EntityScore {
    fn from_counts(entity: String, counts: SentimentCounts) -> Self {
        let total = counts.total().max(1);
        Self {
            entity,
            pos: counts.positive,
            neg: counts.negative,
            neu: counts.neutral,
            total,
            score: balance(counts.positive, counts.negative, total),
        }
    }
}

/// Parallel label/value arrays for a single-series chart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Series {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

/// Per-entity negative/neutral/positive columns sharing one label axis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackedSeries {
    pub labels: Vec<String>,
    pub negative: Vec<u64>,
    pub neutral: Vec<u64>,
    pub positive: Vec<u64>,
}

/// Everything the explorer view derives from one query result.
#[derive(Debug, Clone, PartialEq)]
pub struct Analytics {
    pub counts: SentimentCounts,
    /// Sorted by `total` descending.
    pub entity_scores: Vec<EntityScore>,
    pub top_positive: Vec<EntityScore>,
    pub top_negative: Vec<EntityScore>,
    pub sentiment_index: f64,
    pub distribution_series: Series,
    pub leaderboard_series: Series,
    pub mix_series: StackedSeries,
}

impl Analytics {
    /// The sentiment index mapped to a 0–100 gauge.
    #[must_use]
    pub fn gauge_percent(&self) -> f64 {
        gauge_percent(self.sentiment_index)
    }
}

/// Derive every explorer metric from one query snapshot.
#[must_use]
pub fn aggregate(
    distribution: &[DistributionEntry],
    mix: &[MixEntry],
    leaderboard: &[LeaderboardEntry],
) -> Analytics {
    let counts = counts_by_class(distribution);
    let entity_scores = entity_scores(mix);
    let top_positive = top_positive(&entity_scores);
    let top_negative = top_negative(&entity_scores);

    Analytics {
        counts,
        sentiment_index: sentiment_index(&counts),
        distribution_series: distribution_series(&counts),
        leaderboard_series: leaderboard_series(leaderboard),
        mix_series: mix_series(mix),
        entity_scores,
        top_positive,
        top_negative,
    }
}

/// Per-class counts; classes missing from `distribution` are zero.
#[must_use]
pub fn counts_by_class(distribution: &[DistributionEntry]) -> SentimentCounts {
    let mut counts = SentimentCounts::default();
    for entry in distribution {
        counts.add_label(&entry.sentiment, entry.count);
    }
    counts
}

/// One score per distinct entity in `mix`, most-discussed first.
#[must_use]
pub fn entity_scores(mix: &[MixEntry]) -> Vec<EntityScore> {
    let mut scores: Vec<EntityScore> = fold_by_entity(mix)
        .into_iter()
        .map(|(entity, counts)| EntityScore::from_counts(entity, counts))
        .collect();
    scores.sort_by(|a, b| b.total.cmp(&a.total));
    scores
}

/// Most positive of the [`TOP_VOLUME_POOL`] most-discussed entities.
#[must_use]
pub fn top_positive(entity_scores: &[EntityScore]) -> Vec<EntityScore> {
    ranked(entity_scores, |a, b| b.score.total_cmp(&a.score))
}

/// Most negative of the [`TOP_VOLUME_POOL`] most-discussed entities.
#[must_use]
pub fn top_negative(entity_scores: &[EntityScore]) -> Vec<EntityScore> {
    ranked(entity_scores, |a, b| a.score.total_cmp(&b.score))
}

fn ranked<F>(entity_scores: &[EntityScore], order: F) -> Vec<EntityScore>
where
    F: FnMut(&EntityScore, &EntityScore) -> std::cmp::Ordering,
{
    let mut pool: Vec<EntityScore> = entity_scores
        .iter()
        .take(TOP_VOLUME_POOL)
        .cloned()
        .collect();
    pool.sort_by(order);
    pool.truncate(TOP_RANKED);
    pool
}

/// Overall `(positive - negative) / total`, denominator floored at 1.
#[must_use]
pub fn sentiment_index(counts: &SentimentCounts) -> f64 {
    balance(counts.positive, counts.negative, counts.total().max(1))
}

/// Maps an index in `[-1, 1]` onto `[0, 100]`.
#[must_use]
pub fn gauge_percent(index: f64) -> f64 {
    (index + 1.0) / 2.0 * 100.0
}

#[must_use]
pub fn distribution_series(counts: &SentimentCounts) -> Series {
    Series {
        labels: SentimentClass::ALL
            .iter()
            .map(|c| c.as_str().to_string())
            .collect(),
        values: SentimentClass::ALL.iter().map(|&c| counts.get(c)).collect(),
    }
}

/// Top [`LEADERBOARD_CHART_N`] entities by mentions.
#[must_use]
pub fn leaderboard_series(leaderboard: &[LeaderboardEntry]) -> Series {
    let mut entries: Vec<&LeaderboardEntry> = leaderboard.iter().collect();
    entries.sort_by(|a, b| b.mentions.cmp(&a.mentions));
    entries.truncate(LEADERBOARD_CHART_N);
    Series {
        labels: entries.iter().map(|e| e.entity.clone()).collect(),
        values: entries.iter().map(|e| e.mentions).collect(),
    }
}

/// Stacked per-entity counts, entities in first-appearance order of `mix`.
#[must_use]
pub fn mix_series(mix: &[MixEntry]) -> StackedSeries {
    let mut series = StackedSeries::default();
    for (entity, counts) in fold_by_entity(mix) {
        series.labels.push(entity);
        series.negative.push(counts.negative);
        series.neutral.push(counts.neutral);
        series.positive.push(counts.positive);
    }
    series
}

fn fold_by_entity(mix: &[MixEntry]) -> Vec<(String, SentimentCounts)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut folded: Vec<(String, SentimentCounts)> = Vec::new();
    for entry in mix {
        let slot = *index.entry(entry.entity.as_str()).or_insert_with(|| {
            folded.push((entry.entity.clone(), SentimentCounts::default()));
            folded.len() - 1
        });
        folded[slot].1.add_label(&entry.sentiment, entry.count);
    }
    folded
}

#[allow(clippy::cast_precision_loss)]
fn balance(pos: u64, neg: u64, total: u64) -> f64 {
    (pos as f64 - neg as f64) / total as f64
}
