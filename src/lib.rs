//! Core library for the nytimes-source command line application.
//!
//! The library loads a captured NY Times article search response together
//! with the editorial reference workbook and merges them into flat records.
//! IO adapters live under [`io`], data representations inside [`model`], the
//! document flattening in [`flatten`], the reference join in [`merge`], and
//! the orchestration in [`loader`] and [`source`].

pub mod config;
pub mod error;
pub mod flatten;
pub mod io;
pub mod loader;
pub mod merge;
pub mod model;
pub mod source;

pub use config::LoaderConfig;
pub use error::{ErrorKind, LoadError, Result};
pub use loader::load;
pub use model::{LoadedDataset, Record};
pub use source::NyTimesSource;
