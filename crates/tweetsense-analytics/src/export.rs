//! Header-based CSV reading and writing for uploads and exports.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::batch::ID_COLUMN;
use crate::error::AnalyticsError;
use crate::record::Record;

/// Writes `rows` as CSV.
///
/// The header is the first row's columns minus `id`. Later rows are looked up
/// by those columns only: missing values become empty cells and extra columns
/// are dropped. An empty slice writes nothing.
///
/// # Errors
///
/// Returns [`AnalyticsError::Csv`] if writing fails.
pub fn write_csv<W: Write>(rows: &[Record], writer: W) -> Result<(), AnalyticsError> {
    let Some(first) = rows.first() else {
        return Ok(());
    };
    let header: Vec<&str> = first.keys().filter(|k| *k != ID_COLUMN).collect();
    if header.is_empty() {
        return Ok(());
    }

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&header)?;
    for row in rows {
        wtr.write_record(header.iter().map(|col| row.get(col).unwrap_or_default()))?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes `rows` to `path`, replacing any existing file. Returns the number of
/// data rows written.
///
/// # Errors
///
/// Returns [`AnalyticsError::Io`] if the file cannot be created, or
/// [`AnalyticsError::Csv`] if writing fails.
pub fn export_csv_file(rows: &[Record], path: &Path) -> Result<usize, AnalyticsError> {
    let file = File::create(path).map_err(|source| AnalyticsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(rows, file)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "exported CSV");
    Ok(rows.len())
}

/// Parses CSV with a header row into records. Short rows get empty values for
/// their missing columns; blank lines are skipped.
///
/// # Errors
///
/// Returns [`AnalyticsError::Csv`] on malformed input or invalid UTF-8.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Record>, AnalyticsError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut rows: Vec<Record> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(
            headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.as_str(), record.get(i).unwrap_or_default()))
                .collect(),
        );
    }
    Ok(rows)
}

/// Reads and parses a CSV file.
///
/// # Errors
///
/// Returns [`AnalyticsError::Io`] if the file cannot be opened, or
/// [`AnalyticsError::Csv`] on malformed input.
pub fn read_csv_file(path: &Path) -> Result<Vec<Record>, AnalyticsError> {
    let file = File::open(path).map_err(|source| AnalyticsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = read_csv(file)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "parsed CSV upload");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().copied().collect()
    }

    fn to_string(rows: &[Record]) -> String {
        let mut buf = Vec::new();
        write_csv(rows, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_comes_from_first_row_without_id() {
        let rows = vec![
            row(&[("id", "1"), ("text", "good"), ("predicted_sentiment", "Positive")]),
            row(&[("id", "2"), ("text", "bad"), ("predicted_sentiment", "Negative")]),
        ];
        assert_eq!(
            to_string(&rows),
            "text,predicted_sentiment\ngood,Positive\nbad,Negative\n"
        );
    }

    #[test]
    fn later_rows_are_not_rescanned_for_columns() {
        let rows = vec![
            row(&[("text", "a"), ("author", "x")]),
            row(&[("text", "b"), ("extra", "dropped")]),
            row(&[("other", "y")]),
        ];
        assert_eq!(to_string(&rows), "text,author\na,x\nb,\n,\n");
    }

    #[test]
    fn values_with_commas_and_quotes_are_escaped() {
        let rows = vec![row(&[("text", "hi, \"you\"")])];
        assert_eq!(to_string(&rows), "text\n\"hi, \"\"you\"\"\"\n");
    }

    #[test]
    fn empty_input_writes_nothing() {
        assert_eq!(to_string(&[]), "");
        assert_eq!(to_string(&[row(&[("id", "1")])]), "");
    }

    #[test]
    fn read_csv_pads_short_rows_and_strips_bom() {
        let input = "\u{feff}text,author\nhello,amy\nbye\n";
        let rows = read_csv(input.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("text"), Some("hello"));
        assert_eq!(rows[1].get("author"), Some(""));
    }

    #[test]
    fn read_csv_of_header_only_is_empty() {
        assert!(read_csv("text\n".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn read_missing_file_reports_path() {
        let err = read_csv_file(Path::new("/nonexistent/upload.csv")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/upload.csv"));
    }
}
