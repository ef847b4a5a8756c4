//! Request and response bodies for the prediction service.
//!
//! Field names match the service's JSON exactly. Optional fields default so
//! older deployments that omit them still deserialize.

use serde::{Deserialize, Serialize};
use tweetsense_core::{DistributionEntry, LeaderboardEntry, MixEntry, SampleRow, SentimentClass};

/// `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// `GET /meta`: filter options offered by the explorer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MetaResponse {
    pub entities: Vec<String>,
    /// Includes the `"All"` pseudo-option first.
    pub sentiments: Vec<String>,
    pub has_probabilities: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct PredictRequest<'a> {
    pub text: &'a str,
}

/// `POST /predict`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictResponse {
    pub sentiment: String,
    #[serde(default)]
    pub classes: Option<Vec<String>>,
    #[serde(default)]
    pub probabilities: Option<Vec<f64>>,
}

impl PredictResponse {
    /// `(class, probability)` pairs, most likely first. Empty when the model
    /// does not expose probabilities or the arrays disagree in length.
    #[must_use]
    pub fn ranked_probabilities(&self) -> Vec<(&str, f64)> {
        let (Some(classes), Some(probs)) = (&self.classes, &self.probabilities) else {
            return Vec::new();
        };
        if classes.len() != probs.len() {
            return Vec::new();
        }
        let mut ranked: Vec<(&str, f64)> = classes
            .iter()
            .map(String::as_str)
            .zip(probs.iter().copied())
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

/// `POST /explore` filters. `"All"` disables the entity/sentiment filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExploreRequest {
    pub entity: String,
    pub keyword: String,
    pub sentiment: String,
    /// Which class's texts feed the word cloud.
    pub wc_sentiment: SentimentClass,
    pub top_entities_n: u32,
    pub leaderboard_n: u32,
    pub sample_n: u32,
}

impl Default for ExploreRequest {
    fn default() -> Self {
        Self {
            entity: "All".to_string(),
            keyword: String::new(),
            sentiment: "All".to_string(),
            wc_sentiment: SentimentClass::Neutral,
            top_entities_n: 10,
            leaderboard_n: 20,
            sample_n: 50,
        }
    }
}

/// `POST /explore` result snapshot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExploreResponse {
    pub total_rows: u64,
    #[serde(default)]
    pub top_entity: Option<String>,
    pub share_neutral: f64,
    pub share_positive: f64,
    pub distribution: Vec<DistributionEntry>,
    pub mix: Vec<MixEntry>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub samples: Vec<SampleRow>,
    /// Raw base64 PNG, no data-URI prefix.
    #[serde(default)]
    pub wordcloud_png_base64: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchPredictRequest<'a> {
    pub texts: &'a [String],
}

/// `POST /batch_predict`. `sentiments[i]` belongs to `texts[i]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BatchPredictResponse {
    pub sentiments: Vec<String>,
    #[serde(default)]
    pub classes: Option<Vec<String>>,
    #[serde(default)]
    pub probabilities: Option<Vec<Vec<f64>>>,
}

impl BatchPredictResponse {
    /// Probability the model assigned to each row's predicted label, aligned
    /// with `sentiments`. `None` for every row when the model does not expose
    /// probabilities, and for any row whose vector does not match `classes`.
    #[must_use]
    pub fn confidences(&self) -> Vec<Option<f64>> {
        let (Some(classes), Some(matrix)) = (&self.classes, &self.probabilities) else {
            return vec![None; self.sentiments.len()];
        };
        self.sentiments
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let row = matrix.get(i).filter(|row| row.len() == classes.len())?;
                let class = classes.iter().position(|c| c == label)?;
                row.get(class).copied()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explore_request_defaults_match_service_defaults() {
        let body = serde_json::to_value(ExploreRequest::default()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "entity": "All",
                "keyword": "",
                "sentiment": "All",
                "wc_sentiment": "Neutral",
                "top_entities_n": 10,
                "leaderboard_n": 20,
                "sample_n": 50
            })
        );
    }

    #[test]
    fn ranked_probabilities_sorts_descending() {
        let resp = PredictResponse {
            sentiment: "Positive".to_string(),
            classes: Some(vec!["Negative".into(), "Neutral".into(), "Positive".into()]),
            probabilities: Some(vec![0.1, 0.3, 0.6]),
        };
        let ranked = resp.ranked_probabilities();
        assert_eq!(ranked[0], ("Positive", 0.6));
        assert_eq!(ranked[2], ("Negative", 0.1));
    }

    #[test]
    fn ranked_probabilities_empty_without_classes() {
        let resp = PredictResponse {
            sentiment: "Neutral".to_string(),
            classes: None,
            probabilities: None,
        };
        assert!(resp.ranked_probabilities().is_empty());
    }

    #[test]
    fn explore_response_tolerates_null_optionals() {
        let resp: ExploreResponse = serde_json::from_value(serde_json::json!({
            "total_rows": 0,
            "top_entity": null,
            "share_neutral": 0.0,
            "share_positive": 0.0,
            "distribution": [],
            "mix": [],
            "leaderboard": [],
            "samples": [],
            "wordcloud_png_base64": null
        }))
        .unwrap();
        assert!(resp.top_entity.is_none());
        assert!(resp.wordcloud_png_base64.is_none());
    }

    #[test]
    fn batch_confidences_pick_predicted_class() {
        let resp = BatchPredictResponse {
            sentiments: vec!["Positive".into(), "Negative".into(), "Neutral".into()],
            classes: Some(vec!["Negative".into(), "Neutral".into(), "Positive".into()]),
            probabilities: Some(vec![vec![0.1, 0.2, 0.7], vec![0.9, 0.05, 0.05], vec![0.5]]),
        };
        assert_eq!(resp.confidences(), [Some(0.7), Some(0.9), None]);
    }

    #[test]
    fn batch_confidences_absent_without_probabilities() {
        let resp = BatchPredictResponse {
            sentiments: vec!["Positive".into(), "Negative".into()],
            classes: None,
            probabilities: None,
        };
        assert_eq!(resp.confidences(), [None, None]);
    }
}
