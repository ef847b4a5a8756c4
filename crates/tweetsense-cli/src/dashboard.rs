//! Request orchestration for the three dashboard actions.
//!
//! Each controller owns one [`Flow`] and nothing else, so predict, explore,
//! and batch can be driven concurrently (`tokio::join!` over disjoint
//! controllers) without shared state. Derived views are rebuilt from each new
//! response; nothing survives from the previous snapshot.

use base64::{engine::general_purpose::STANDARD as Base64Engine, Engine as _};
use tweetsense_analytics::{
    aggregate, batch, filter_leaderboard, filter_samples, Analytics, BatchRow, Record,
    SentimentCounts,
};
use tweetsense_client::{ApiClient, ClientError, ExploreRequest, ExploreResponse, PredictResponse};
use tweetsense_core::{Flow, LeaderboardEntry, SampleRow, Ticket};

/// Explorer snapshot plus everything derived from it.
#[derive(Debug, Clone)]
pub struct ExplorerView {
    pub request: ExploreRequest,
    pub total_rows: u64,
    pub top_entity: Option<String>,
    pub share_neutral: f64,
    pub share_positive: f64,
    pub analytics: Analytics,
    pub samples: Vec<SampleRow>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub wordcloud_png: Option<Vec<u8>>,
}

/// Rows of an [`ExplorerView`] that match a client-side search.
#[derive(Debug)]
pub struct SearchView<'a> {
    pub query: &'a str,
    pub samples: Vec<&'a SampleRow>,
    pub leaderboard: Vec<&'a LeaderboardEntry>,
}

impl ExplorerView {
    #[must_use]
    pub fn from_response(request: ExploreRequest, response: ExploreResponse) -> Self {
        let analytics = aggregate(
            &response.distribution,
            &response.mix,
            &response.leaderboard,
        );
        let wordcloud_png = response
            .wordcloud_png_base64
            .as_deref()
            .and_then(|encoded| match Base64Engine.decode(encoded.trim()) {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    tracing::warn!(error = %e, "word cloud image is not valid base64; skipping");
                    None
                }
            });

        Self {
            request,
            total_rows: response.total_rows,
            top_entity: response.top_entity,
            share_neutral: response.share_neutral,
            share_positive: response.share_positive,
            analytics,
            samples: response.samples,
            leaderboard: response.leaderboard,
            wordcloud_png,
        }
    }

    /// Filters the fetched samples and leaderboard; never re-queries.
    #[must_use]
    pub fn search<'a>(&'a self, query: &'a str) -> SearchView<'a> {
        SearchView {
            query,
            samples: filter_samples(&self.samples, query),
            leaderboard: filter_leaderboard(&self.leaderboard, query),
        }
    }
}

/// Single-text prediction flow.
#[derive(Debug)]
pub struct PredictController {
    flow: Flow<PredictResponse>,
}

impl Default for PredictController {
    fn default() -> Self {
        Self {
            flow: Flow::new("predict"),
        }
    }
}

impl PredictController {
    #[must_use]
    pub fn flow(&self) -> &Flow<PredictResponse> {
        &self.flow
    }

    /// Classifies `text`. Blank text and submissions while a prediction is in
    /// flight are ignored.
    pub async fn run(&mut self, client: &ApiClient, text: &str) -> &Flow<PredictResponse> {
        let text = text.trim();
        if text.is_empty() {
            return &self.flow;
        }
        let Some(ticket) = self.flow.begin() else {
            return &self.flow;
        };
        let result = client.predict(text).await;
        self.flow.complete(ticket, result);
        &self.flow
    }
}

/// Explorer query flow. A new query supersedes one still in flight.
#[derive(Debug)]
pub struct ExplorerController {
    flow: Flow<ExplorerView>,
}

impl Default for ExplorerController {
    fn default() -> Self {
        Self {
            flow: Flow::new("explore"),
        }
    }
}

impl ExplorerController {
    #[must_use]
    pub fn flow(&self) -> &Flow<ExplorerView> {
        &self.flow
    }

    /// Marks a new query as the current one.
    pub fn begin(&mut self) -> Ticket {
        self.flow.supersede()
    }

    /// Applies a query result. Returns `false` if a newer query has started
    /// since `ticket` was issued.
    pub fn finish(
        &mut self,
        ticket: Ticket,
        request: ExploreRequest,
        result: Result<ExploreResponse, ClientError>,
    ) -> bool {
        let view = result.map(|response| {
            let view = ExplorerView::from_response(request, response);
            tracing::info!(
                total_rows = view.total_rows,
                entities = view.analytics.entity_scores.len(),
                samples = view.samples.len(),
                "explorer snapshot updated"
            );
            view
        });
        self.flow.complete(ticket, view)
    }

    pub async fn run(
        &mut self,
        client: &ApiClient,
        request: ExploreRequest,
    ) -> &Flow<ExplorerView> {
        let ticket = self.begin();
        let result = client.explore(&request).await;
        self.finish(ticket, request, result);
        &self.flow
    }
}

/// Merged batch upload.
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub rows: Vec<BatchRow>,
    /// Uploaded rows dropped for lacking a usable `text`.
    pub dropped: usize,
    pub counts: SentimentCounts,
    /// Probability of each row's label, aligned with `rows`.
    pub confidence: Vec<Option<f64>>,
}

/// Batch CSV prediction flow.
#[derive(Debug)]
pub struct BatchController {
    flow: Flow<BatchResult>,
}

impl Default for BatchController {
    fn default() -> Self {
        Self {
            flow: Flow::new("batch"),
        }
    }
}

impl BatchController {
    #[must_use]
    pub fn flow(&self) -> &Flow<BatchResult> {
        &self.flow
    }

    /// Submits an upload. Starting clears the previous batch; the merged set
    /// replaces it only once every label is attached.
    pub async fn run(&mut self, client: &ApiClient, uploaded: Vec<Record>) -> &Flow<BatchResult> {
        let Some(ticket) = self.flow.begin() else {
            return &self.flow;
        };
        let result = predict_batch(client, uploaded).await;
        self.flow.complete(ticket, result);
        &self.flow
    }
}

async fn predict_batch(client: &ApiClient, uploaded: Vec<Record>) -> anyhow::Result<BatchResult> {
    let uploaded_count = uploaded.len();
    let rows = batch::submittable_rows(uploaded);
    let dropped = uploaded_count - rows.len();

    if rows.is_empty() {
        return Ok(BatchResult {
            rows: Vec::new(),
            dropped,
            counts: SentimentCounts::default(),
            confidence: Vec::new(),
        });
    }

    let texts = batch::texts(&rows);
    let response = client.batch_predict(&texts).await?;
    let confidence = response.confidences();
    let merged = batch::merge(rows, response.sentiments)?;
    tracing::info!(rows = merged.len(), dropped, "batch prediction merged");

    Ok(BatchResult {
        counts: batch::label_counts(&merged),
        rows: merged,
        dropped,
        confidence,
    })
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
