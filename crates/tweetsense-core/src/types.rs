//! Wire-level data model shared by the client, analytics, and CLI crates.
//!
//! Sentiment labels stay as raw strings on every wire type: the backend may
//! emit classes outside [`SentimentClass`] (the source corpus carries an
//! `Irrelevant` label), and those must survive deserialization and display.
//! Typed matching goes through [`SentimentClass::from_label`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three sentiment classes the dashboard aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SentimentClass {
    Negative,
    Neutral,
    Positive,
}

impl SentimentClass {
    /// Canonical display order.
    pub const ALL: [SentimentClass; 3] = [
        SentimentClass::Negative,
        SentimentClass::Neutral,
        SentimentClass::Positive,
    ];

    /// Case-sensitive match against a server label. `"positive"` is not `Positive`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Negative" => Some(Self::Negative),
            "Neutral" => Some(Self::Neutral),
            "Positive" => Some(Self::Positive),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
            Self::Positive => "Positive",
        }
    }
}

impl fmt::Display for SentimentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SentimentClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| {
            format!("unknown sentiment '{s}' (expected Negative, Neutral, or Positive)")
        })
    }
}

/// Row count for one sentiment class in the filtered dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionEntry {
    pub sentiment: String,
    pub count: u64,
}

/// One cell of the sparse entity × sentiment count matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixEntry {
    pub entity: String,
    pub sentiment: String,
    pub count: u64,
}

/// Total mentions for one entity; the authoritative ranking source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub entity: String,
    pub mentions: u64,
}

/// Opaque tweet identifier, accepted as any JSON scalar.
///
/// The backend normally sends an integer, but a float-typed id column
/// (`2401.0`), ids beyond `i64::MAX`, and `null` all occur in real exports.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TweetId {
    Number(i64),
    Unsigned(u64),
    Float(f64),
    Flag(bool),
    Text(String),
    #[default]
    Missing,
}

impl fmt::Display for TweetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Unsigned(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Flag(b) => write!(f, "{b}"),
            Self::Text(s) => f.write_str(s),
            Self::Missing => Ok(()),
        }
    }
}

/// A preview row from the filtered dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRow {
    #[serde(default)]
    pub tweet_id: TweetId,
    pub entity: String,
    pub sentiment: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_label_is_case_sensitive() {
        assert_eq!(
            SentimentClass::from_label("Positive"),
            Some(SentimentClass::Positive)
        );
        assert_eq!(SentimentClass::from_label("positive"), None);
        assert_eq!(SentimentClass::from_label("Irrelevant"), None);
    }

    #[test]
    fn from_str_reports_unknown_label() {
        let err = "Mixed".parse::<SentimentClass>().unwrap_err();
        assert!(err.contains("Mixed"), "unexpected message: {err}");
    }

    #[test]
    fn sentiment_class_serializes_as_label() {
        let json = serde_json::to_string(&SentimentClass::Neutral).unwrap();
        assert_eq!(json, "\"Neutral\"");
    }

    #[test]
    fn tweet_id_accepts_number_and_string() {
        let row: SampleRow = serde_json::from_value(serde_json::json!({
            "tweet_id": 2401,
            "entity": "Borderlands",
            "sentiment": "Positive",
            "text": "im getting on borderlands"
        }))
        .unwrap();
        assert_eq!(row.tweet_id, TweetId::Number(2401));
        assert_eq!(row.tweet_id.to_string(), "2401");

        let id: TweetId = serde_json::from_str("\"abc-7\"").unwrap();
        assert_eq!(id, TweetId::Text("abc-7".to_string()));
    }

    #[test]
    fn tweet_id_accepts_float_and_wide_integers() {
        let row: SampleRow = serde_json::from_str(
            r#"{"tweet_id":2401.0,"entity":"Borderlands","sentiment":"Positive","text":"gg"}"#,
        )
        .unwrap();
        assert_eq!(row.tweet_id, TweetId::Float(2401.0));
        assert_eq!(row.tweet_id.to_string(), "2401");

        let id: TweetId = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(id, TweetId::Unsigned(u64::MAX));
        assert_eq!(id.to_string(), "18446744073709551615");
    }

    #[test]
    fn null_or_absent_tweet_id_is_missing() {
        let row: SampleRow = serde_json::from_value(serde_json::json!({
            "tweet_id": null,
            "entity": "Nvidia",
            "sentiment": "Neutral",
            "text": "new drivers out"
        }))
        .unwrap();
        assert_eq!(row.tweet_id, TweetId::Missing);
        assert_eq!(row.tweet_id.to_string(), "");

        let row: SampleRow = serde_json::from_value(serde_json::json!({
            "entity": "Nvidia",
            "sentiment": "Neutral",
            "text": "new drivers out"
        }))
        .unwrap();
        assert_eq!(row.tweet_id, TweetId::Missing);
    }

    #[test]
    fn unknown_sentiment_label_survives_deserialization() {
        let entry: MixEntry = serde_json::from_value(serde_json::json!({
            "entity": "Nvidia",
            "sentiment": "Irrelevant",
            "count": 4
        }))
        .unwrap();
        assert_eq!(entry.sentiment, "Irrelevant");
        assert_eq!(SentimentClass::from_label(&entry.sentiment), None);
    }
}
