//! Upload → merge → export → re-upload round trips.

use tweetsense_analytics::{
    filter_samples, merge, read_csv, submittable_rows, texts, write_csv, Record, ToRecord,
};
use tweetsense_core::{SampleRow, TweetId};

const UPLOAD: &str = "\
text,author,lang
\"Loving the new patch, finally fixed\",amy,en
,bob,en
\"He said \"\"meh\"\"\",cy,en
servers down again,dee,en
";

fn export(rows: &[Record]) -> String {
    let mut buf = Vec::new();
    write_csv(rows, &mut buf).expect("export should succeed");
    String::from_utf8(buf).expect("export is UTF-8")
}

#[test]
fn batch_export_reparses_to_same_values_without_id() {
    let uploaded = read_csv(UPLOAD.as_bytes()).expect("upload parses");
    assert_eq!(uploaded.len(), 4);

    let rows = submittable_rows(uploaded);
    assert_eq!(
        texts(&rows),
        [
            "Loving the new patch, finally fixed",
            "He said \"meh\"",
            "servers down again"
        ]
    );

    let labels = vec![
        "Positive".to_string(),
        "Neutral".to_string(),
        "Negative".to_string(),
    ];
    let merged = merge(rows, labels.clone()).expect("labels align");
    for (i, row) in merged.iter().enumerate() {
        assert_eq!(row.id, i + 1);
        assert_eq!(row.predicted_sentiment, labels[i]);
    }

    let records: Vec<Record> = merged.iter().map(ToRecord::to_record).collect();
    let csv = export(&records);
    let reparsed = read_csv(csv.as_bytes()).expect("export parses");

    assert_eq!(reparsed.len(), merged.len());
    for (original, back) in merged.iter().zip(&reparsed) {
        assert!(back.get("id").is_none(), "id must never be exported");
        for (key, value) in original.to_record().iter().filter(|(k, _)| *k != "id") {
            assert_eq!(back.get(key), Some(value), "column {key}");
        }
    }

    // Re-uploading the export yields the same submission.
    let resubmitted = submittable_rows(reparsed);
    assert_eq!(texts(&resubmitted), texts(&submittable_rows(read_csv(UPLOAD.as_bytes()).unwrap())));
}

#[test]
fn filtered_sample_export_round_trips() {
    let samples = vec![
        SampleRow {
            tweet_id: TweetId::Number(2401),
            entity: "Borderlands".to_string(),
            sentiment: "Positive".to_string(),
            text: "im getting on borderlands and i will murder you all,".to_string(),
        },
        SampleRow {
            tweet_id: TweetId::Number(2402),
            entity: "Borderlands".to_string(),
            sentiment: "Negative".to_string(),
            text: "line one\nline two".to_string(),
        },
        SampleRow {
            tweet_id: TweetId::Text("x-9".to_string()),
            entity: "Amazon".to_string(),
            sentiment: "Neutral".to_string(),
            text: "package arrived".to_string(),
        },
    ];

    let visible: Vec<Record> = filter_samples(&samples, "borderlands")
        .into_iter()
        .map(ToRecord::to_record)
        .collect();
    assert_eq!(visible.len(), 2);

    let reparsed = read_csv(export(&visible).as_bytes()).unwrap();
    assert_eq!(reparsed, visible);
}
