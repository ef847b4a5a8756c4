use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The predictor returned a label array that cannot be aligned with the
    /// submitted rows by position.
    #[error("prediction returned {labels} labels for {rows} submitted rows")]
    LabelCountMismatch { rows: usize, labels: usize },
}
