//! Joins uploaded CSV rows with the labels returned by batch prediction.
//!
//! Alignment is positional: the i-th submitted text receives the i-th label.
//! Rows are filtered with [`submittable_rows`] before submission, and the same
//! filtered slice must be passed to [`merge`].

use crate::aggregate::SentimentCounts;
use crate::error::AnalyticsError;
use crate::record::{Record, ToRecord};

/// Column holding the text to classify.
pub const TEXT_COLUMN: &str = "text";

/// Column added to every merged row.
pub const PREDICTED_COLUMN: &str = "predicted_sentiment";

/// Synthetic identity column; never exported.
pub const ID_COLUMN: &str = "id";

/// An uploaded row enriched with its predicted label.
///
/// Known limitation: an uploaded column named `id` or `predicted_sentiment`
/// is replaced by the synthetic value in [`ToRecord::to_record`], and `id` is
/// then stripped on export, so the uploaded `id` values are lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRow {
    /// 1-based position in the merged set, for table identity only.
    pub id: usize,
    pub fields: Record,
    pub predicted_sentiment: String,
}

impl BatchRow {
    #[must_use]
    pub fn text(&self) -> &str {
        self.fields.get(TEXT_COLUMN).unwrap_or_default()
    }
}

impl ToRecord for BatchRow {
    /// Uploaded columns followed by `predicted_sentiment` and `id`. Existing
    /// columns of the same name are overwritten in place.
    fn to_record(&self) -> Record {
        let mut record = self.fields.clone();
        record.insert(PREDICTED_COLUMN, self.predicted_sentiment.clone());
        record.insert(ID_COLUMN, self.id.to_string());
        record
    }
}

/// Drops rows whose `text` is missing or blank.
///
/// Blank texts are also discarded server-side, so submitting them would shift
/// every following label by one.
#[must_use]
pub fn submittable_rows(rows: Vec<Record>) -> Vec<Record> {
    let uploaded = rows.len();
    let kept: Vec<Record> = rows
        .into_iter()
        .filter(|row| row.get(TEXT_COLUMN).is_some_and(|t| !t.trim().is_empty()))
        .collect();
    if kept.len() < uploaded {
        tracing::debug!(
            uploaded,
            kept = kept.len(),
            "dropped rows without a usable text column"
        );
    }
    kept
}

/// Texts to submit, in row order.
#[must_use]
pub fn texts(rows: &[Record]) -> Vec<String> {
    rows.iter()
        .map(|row| row.get(TEXT_COLUMN).unwrap_or_default().to_string())
        .collect()
}

/// Attaches `labels[i]` and `id = i + 1` to `rows[i]`.
///
/// # Errors
///
/// Returns [`AnalyticsError::LabelCountMismatch`] when the label count differs
/// from the row count; no partial merge is produced.
pub fn merge(rows: Vec<Record>, labels: Vec<String>) -> Result<Vec<BatchRow>, AnalyticsError> {
    if rows.len() != labels.len() {
        return Err(AnalyticsError::LabelCountMismatch {
            rows: rows.len(),
            labels: labels.len(),
        });
    }
    Ok(rows
        .into_iter()
        .zip(labels)
        .enumerate()
        .map(|(i, (fields, predicted_sentiment))| BatchRow {
            id: i + 1,
            fields,
            predicted_sentiment,
        })
        .collect())
}

/// Predicted label counts across a merged batch.
#[must_use]
pub fn label_counts(rows: &[BatchRow]) -> SentimentCounts {
    let mut counts = SentimentCounts::default();
    for row in rows {
        counts.add_label(&row.predicted_sentiment, 1);
    }
    counts
}
