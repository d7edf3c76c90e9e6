mod common;

use std::fs;

use common::{Cell, Fixture, api_response, date_completed_rows, review_status_rows};
use nytimes_source::{ErrorKind, LoadError, LoaderConfig, NyTimesSource, load};
use serde_json::{Value, json};

#[test]
fn load_merges_reference_data_into_documents() {
    let fixture = Fixture::new();

    let dataset = load(&fixture.config).expect("dataset loaded");

    assert_eq!(dataset.len(), 3);
    assert_eq!(
        dataset.schema,
        vec![
            "abstract",
            "web_url",
            "keywords",
            "_id",
            "headline.main",
            "headline.kicker",
            "byline.original",
            "byline.person",
            "row",
            "article_id",
            "reference_id",
            "status",
            "date_completed",
            "reviewer",
        ]
    );

    let first = &dataset.records[0];
    assert_eq!(first["headline.main"], json!("Probe Lands on Comet"));
    assert_eq!(first["row"], json!(2));
    assert_eq!(first["reference_id"], json!("REF-2"));
    assert_eq!(first["status"], json!("rejected"));
    assert_eq!(first["date_completed"], json!("2021-08-03"));
    assert_eq!(first["reviewer"], json!("bo"));

    let second = &dataset.records[1];
    assert_eq!(second["status"], json!("pending"));
    assert_eq!(second["date_completed"], Value::Null);
    assert_eq!(second["reviewer"], Value::Null);

    let third = &dataset.records[2];
    assert_eq!(third["status"], json!("approved"));
    assert_eq!(third["date_completed"], json!("2021-08-04"));
}

#[test]
fn load_is_idempotent() {
    let fixture = Fixture::new();

    let first = load(&fixture.config).expect("first load");
    let second = load(&fixture.config).expect("second load");

    assert_eq!(first, second);
}

#[test]
fn header_row_may_start_the_sheet_range() {
    let mut review_status = review_status_rows();
    review_status[0] = vec![];
    let fixture = Fixture::with(&api_response(), &review_status, &date_completed_rows());

    let dataset = load(&fixture.config).expect("dataset loaded");

    assert_eq!(dataset.records[0]["status"], json!("rejected"));
}

#[test]
fn articles_without_reference_rows_are_kept() {
    let response = json!({
        "response": {"docs": [{"_id": "nyt://article/404", "headline": {"main": "Unknown"}}]}
    });
    let fixture = Fixture::with(&response, &review_status_rows(), &date_completed_rows());

    let dataset = load(&fixture.config).expect("dataset loaded");

    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.records[0]["status"], Value::Null);
    assert_eq!(dataset.records[0]["headline.main"], json!("Unknown"));
}

#[test]
fn missing_response_file_is_reported() {
    let fixture = Fixture::new();
    let config = LoaderConfig::new(
        fixture.path("absent.json"),
        fixture.config.reference_data_file.clone(),
    );

    let error = load(&config).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::FileNotFound);
    assert!(matches!(error, LoadError::MissingInput(path) if path.ends_with("absent.json")));
}

#[test]
fn missing_reference_file_is_reported() {
    let fixture = Fixture::new();
    let config = LoaderConfig::new(
        fixture.config.api_response_file.clone(),
        fixture.path("absent.xlsx"),
    );

    let error = load(&config).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::FileNotFound);
}

#[test]
fn malformed_json_is_a_parse_error() {
    let fixture = Fixture::new();
    fs::write(&fixture.config.api_response_file, "{\"response\": {\"docs\": [").unwrap();

    let error = load(&fixture.config).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Parse);
}

#[test]
fn response_without_documents_is_a_schema_error() {
    let response = json!({"status": "OK", "response": {"meta": {"hits": 0}}});
    let fixture = Fixture::with(&response, &review_status_rows(), &date_completed_rows());

    let error = load(&fixture.config).unwrap_err();

    assert!(matches!(error, LoadError::InvalidResponse(_)));
    assert_eq!(error.kind(), ErrorKind::Schema);
}

#[test]
fn missing_column_is_a_schema_error() {
    use Cell::*;
    let date_completed = vec![
        vec![Text("Reference Id"), Text("Reviewer")],
        vec![Text("REF-1"), Text("ann")],
    ];
    let fixture = Fixture::with(&api_response(), &review_status_rows(), &date_completed);

    let error = load(&fixture.config).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Schema);
    assert!(error.to_string().contains("Date Completed"));
}

#[test]
fn missing_sheet_is_a_schema_error() {
    let fixture = Fixture::new();
    common::write_workbook(
        &fixture.config.reference_data_file,
        &[("review_status", review_status_rows().as_slice())],
    );

    let error = load(&fixture.config).unwrap_err();

    assert!(matches!(&error, LoadError::InvalidWorkbook(message) if message.contains("date_completed")));
}

#[test]
fn swapped_inputs_fail() {
    let fixture = Fixture::new();
    let swapped = LoaderConfig::new(
        fixture.config.reference_data_file.clone(),
        fixture.config.api_response_file.clone(),
    );

    let error = load(&swapped).unwrap_err();

    assert!(matches!(error.kind(), ErrorKind::Parse | ErrorKind::Schema));
}

#[test]
fn source_yields_records_in_batches() {
    let fixture = Fixture::new();
    let mut source = NyTimesSource::new(fixture.config.clone());
    source.connect(Some("pub_date"), None);

    assert_eq!(source.schema().expect("schema").len(), 14);

    let batches: Vec<Vec<String>> = source
        .data_batches(2)
        .expect("batches")
        .map(|batch| {
            batch
                .iter()
                .map(|record| record["_id"].as_str().unwrap_or_default().to_string())
                .collect()
        })
        .collect();

    assert_eq!(
        batches,
        vec![
            vec!["nyt://article/1".to_string(), "nyt://article/2".to_string()],
            vec!["nyt://article/3".to_string()],
        ]
    );
    assert!(matches!(source.data_batches(0), Err(LoadError::InvalidBatchSize)));
    source.disconnect();
}

#[test]
fn source_loads_inputs_once() {
    let fixture = Fixture::new();
    let mut source = NyTimesSource::new(fixture.config.clone());
    let schema = source.schema().expect("schema").to_vec();

    fs::remove_file(&fixture.config.api_response_file).unwrap();

    assert_eq!(source.schema().expect("cached schema"), schema.as_slice());
    assert_eq!(source.data_batches(10).expect("cached batches").count(), 1);
}
