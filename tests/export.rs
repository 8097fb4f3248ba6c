use word_freq::core::{
    export::{to_csv, to_json, ExportFormat},
    model::{AnalysisResult, WordCount},
};

fn result() -> AnalysisResult {
    AnalysisResult {
        word_count: 1000,
        unique_words: 3,
        frequencies: vec![
            WordCount::new("the", 120),
            WordCount::new("say \"hi\"", 45),
            WordCount::new("a,b", 7),
        ],
    }
}

#[test]
fn csv_reads_back_with_a_real_parser() {
    let text = to_csv(&result());
    assert!(text.contains("1,\"the\",120,12.00\n"));

    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), ["Rank", "Word", "Count", "Percentage"]);

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[1][1], "say \"hi\"");
    assert_eq!(&rows[1][3], "4.50");
    assert_eq!(&rows[2][0], "3");
    assert_eq!(&rows[2][1], "a,b");
    assert_eq!(&rows[2][3], "0.70");
}

#[test]
fn json_export_is_the_stored_result() {
    let text = to_json(&result());
    let back: AnalysisResult = serde_json::from_str(&text).unwrap();
    assert_eq!(back, result());

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["wordCount"], 1000);
    assert_eq!(value["frequencies"][0]["word"], "the");
}

#[test]
fn empty_result_exports_header_only() {
    let empty = AnalysisResult {
        word_count: 0,
        unique_words: 0,
        frequencies: Vec::new(),
    };
    assert_eq!(
        ExportFormat::Csv.render(&empty),
        b"Rank,Word,Count,Percentage\n".to_vec()
    );
}
