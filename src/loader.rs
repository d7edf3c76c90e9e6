use tracing::{debug, info, instrument, warn};

use crate::config::LoaderConfig;
use crate::error::Result;
use crate::flatten::flatten_document;
use crate::io::excel_read::{self, SheetLayout};
use crate::io::json_read;
use crate::merge::{self, ARTICLE_ID_FIELD, JOIN_COLUMN};
use crate::model::LoadedDataset;

/// Reads both inputs named by `config` and merges the reference data into
/// one flat record per article document.
#[instrument(
    level = "info",
    skip_all,
    fields(
        api_response = %config.api_response_file.display(),
        reference_data = %config.reference_data_file.display()
    )
)]
pub fn load(config: &LoaderConfig) -> Result<LoadedDataset> {
    let documents = json_read::read_documents(&config.api_response_file)?;
    info!(document_count = documents.len(), "read documents from API response");

    let mut workbook = excel_read::open_reference_workbook(&config.reference_data_file)?;
    let review_status = excel_read::read_table(&mut workbook, &SheetLayout::review_status())?;
    let date_completed = excel_read::read_table(&mut workbook, &SheetLayout::date_completed())?;
    let reference = merge::outer_join(&review_status, &date_completed, JOIN_COLUMN)?;
    debug!(row_count = reference.rows.len(), "joined reference sheets");

    let mut records = Vec::with_capacity(documents.len());
    for document in &documents {
        let mut record = flatten_document(document);
        if !merge::match_article(&mut record, &reference)? {
            warn!(
                article = %record.get(ARTICLE_ID_FIELD).cloned().unwrap_or_default(),
                "no reference data for article"
            );
        }
        records.push(record);
    }

    let dataset = LoadedDataset::new(records);
    if dataset.is_empty() {
        warn!("API response contains no documents");
    }
    info!(
        record_count = dataset.len(),
        field_count = dataset.schema.len(),
        "merged dataset"
    );
    Ok(dataset)
}
