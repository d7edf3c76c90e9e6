#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use nytimes_source::LoaderConfig;
use rust_xlsxwriter::Workbook;
use serde_json::{Value, json};
use tempfile::TempDir;

pub enum Cell {
    Text(&'static str),
    Number(f64),
    Blank,
}

/// A temporary directory holding an API response and a reference workbook.
pub struct Fixture {
    pub dir: TempDir,
    pub config: LoaderConfig,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with(&api_response(), &review_status_rows(), &date_completed_rows())
    }

    pub fn with(response: &Value, review_status: &[Vec<Cell>], date_completed: &[Vec<Cell>]) -> Self {
        let dir = tempfile::tempdir().expect("temporary directory");
        let json_path = dir.path().join("api_response.json");
        fs::write(&json_path, serde_json::to_string_pretty(response).unwrap())
            .expect("API response written");

        let xlsx_path = dir.path().join("reference_data.xlsx");
        write_workbook(
            &xlsx_path,
            &[("review_status", review_status), ("date_completed", date_completed)],
        );

        Self {
            config: LoaderConfig::new(json_path, xlsx_path),
            dir,
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

pub fn write_workbook(path: &Path, sheets: &[(&str, &[Vec<Cell>])]) {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).expect("sheet named");
        for (row_idx, row) in rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                let (row, col) = (row_idx as u32, col_idx as u16);
                match cell {
                    Cell::Text(text) => {
                        worksheet.write_string(row, col, *text).expect("string cell");
                    }
                    Cell::Number(value) => {
                        worksheet.write_number(row, col, *value).expect("number cell");
                    }
                    Cell::Blank => {}
                }
            }
        }
    }
    workbook.save(path).expect("workbook saved");
}

pub fn api_response() -> Value {
    json!({
        "status": "OK",
        "copyright": "Copyright (c) 2021 The New York Times Company. All Rights Reserved.",
        "response": {
            "docs": [
                {
                    "abstract": "A probe lands on a comet.",
                    "web_url": "https://www.nytimes.com/2021/08/01/science/comet.html",
                    "headline": {"main": "Probe Lands on Comet", "kicker": null},
                    "keywords": [{"name": "subject", "value": "Space"}],
                    "byline": {"original": "By Ann Writer", "person": []},
                    "_id": "nyt://article/1"
                },
                {
                    "abstract": "Markets rally.",
                    "web_url": "https://www.nytimes.com/2021/08/02/business/markets.html",
                    "headline": {"main": "Markets Rally", "kicker": "Business"},
                    "keywords": [],
                    "byline": {"original": "By Bo Reporter", "person": []},
                    "_id": "nyt://article/2"
                },
                {
                    "abstract": "A quiet day.",
                    "web_url": "https://www.nytimes.com/2021/08/03/nyregion/quiet.html",
                    "headline": {"main": "A Quiet Day", "kicker": null},
                    "keywords": [],
                    "byline": {"original": "By Cy Columnist", "person": []},
                    "_id": "nyt://article/3"
                }
            ],
            "meta": {"hits": 3, "offset": 0, "time": 12}
        }
    })
}

/// Title on row 1, blank row 2, header on row 3, index in column A.
pub fn review_status_rows() -> Vec<Vec<Cell>> {
    use Cell::*;
    vec![
        vec![Text("Review status export")],
        vec![],
        vec![Blank, Text("Row"), Text("Article Id"), Text("Reference Id"), Text("Status")],
        vec![Number(0.0), Number(1.0), Text("nyt://article/1"), Text("REF-1"), Text(" approved ")],
        vec![Number(1.0), Number(2.0), Text("nyt://article/1"), Text("REF-2"), Text("rejected")],
        vec![Number(2.0), Number(3.0), Text("nyt://article/2"), Text("REF-3"), Text("pending")],
        vec![Number(3.0), Number(4.0), Text("nyt://article/3"), Text("REF-4"), Text("approved")],
    ]
}

pub fn date_completed_rows() -> Vec<Vec<Cell>> {
    use Cell::*;
    vec![
        vec![Text("Reference Id"), Text("Date Completed"), Text("Reviewer")],
        vec![Text("REF-1"), Text("2021-08-01"), Text("ann")],
        vec![Text(" REF-2 "), Text("2021-08-03"), Text("bo")],
        vec![Text("REF-4"), Text("2021-08-04"), Text("cy")],
        vec![Text("REF-9"), Text("2021-08-09"), Text("di")],
    ]
}
