use serde_json::Value;
use tracing::debug;

use crate::config::LoaderConfig;
use crate::error::Result;
use crate::loader::load;
use crate::model::{Batches, LoadedDataset};

/// Data source over the NY Times article search response and its editorial
/// reference workbook. The inputs are loaded on first use and kept for the
/// lifetime of the source.
#[derive(Debug, Clone)]
pub struct NyTimesSource {
    config: LoaderConfig,
    dataset: Option<LoadedDataset>,
}

impl NyTimesSource {
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            dataset: None,
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Incremental loading is not supported; the arguments are only logged.
    pub fn connect(&mut self, inc_column: Option<&str>, max_inc_value: Option<&Value>) {
        debug!(?inc_column, "incremental column");
        debug!(?max_inc_value, "incremental last value");
    }

    pub fn disconnect(&mut self) {}

    /// Field names of the first merged record.
    pub fn schema(&mut self) -> Result<&[String]> {
        Ok(self.dataset()?.schema.as_slice())
    }

    /// Merged records in consecutive batches of at most `batch_size`.
    pub fn data_batches(&mut self, batch_size: usize) -> Result<Batches<'_>> {
        self.dataset()?.batches(batch_size)
    }

    /// The merged dataset, loading it on first access.
    pub fn dataset(&mut self) -> Result<&LoadedDataset> {
        let dataset = match self.dataset.take() {
            Some(dataset) => dataset,
            None => load(&self.config)?,
        };
        Ok(self.dataset.insert(dataset))
    }
}
