use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::model::LoadedDataset;

/// Writes the records as a pretty-printed JSON array.
pub fn write_dataset(path: &Path, dataset: &LoadedDataset) -> Result<()> {
    let json_string = serde_json::to_string_pretty(&dataset.records)?;
    fs::write(path, json_string)?;
    Ok(())
}
