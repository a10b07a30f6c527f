// src/dataset/write.rs

use anyhow::{Context, Result};
use arrow::csv::WriterBuilder as CsvWriterBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::{info, warn};

use super::Dataset;

/// On-disk table format, picked from the output file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Parquet,
    Csv,
}

impl OutputFormat {
    /// `.csv` → CSV, anything else → Parquet.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("csv") => OutputFormat::Csv,
            _ => OutputFormat::Parquet,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written {
        path: PathBuf,
        rows: usize,
        columns: usize,
    },
    /// The run collected nothing; no file was created.
    NothingCollected,
}

/// Persist `dataset` to `path` in one write.
///
/// The file is written to a temporary sibling and renamed into place, so a
/// failed write never leaves a partial table behind. An empty dataset
/// produces no file at all.
pub fn write_dataset(dataset: &Dataset, path: &Path) -> Result<WriteOutcome> {
    if dataset.is_empty() {
        warn!("no data collected; skipping write");
        return Ok(WriteOutcome::NothingCollected);
    }

    let batch = dataset.to_record_batch()?;
    let format = OutputFormat::from_path(path);

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).with_context(|| format!("creating output directory {:?}", dir))?;

    let mut tmp = NamedTempFile::new_in(&dir)
        .with_context(|| format!("creating temp file in {:?}", dir))?;

    match format {
        OutputFormat::Parquet => {
            let props = WriterProperties::builder()
                .set_compression(Compression::SNAPPY)
                .build();
            let mut writer = ArrowWriter::try_new(tmp.as_file_mut(), batch.schema(), Some(props))
                .context("creating Parquet writer")?;
            writer.write(&batch).context("writing Parquet batch")?;
            writer.close().context("closing Parquet writer")?;
        }
        OutputFormat::Csv => {
            let mut writer = CsvWriterBuilder::new()
                .with_header(true)
                .build(tmp.as_file_mut());
            writer.write(&batch).context("writing CSV batch")?;
        }
    }

    tmp.persist(path)
        .with_context(|| format!("moving dataset into place at {:?}", path))?;

    info!(
        path = %path.display(),
        rows = batch.num_rows(),
        columns = batch.num_columns(),
        ?format,
        "dataset written"
    );

    Ok(WriteOutcome::Written {
        path: path.to_path_buf(),
        rows: batch.num_rows(),
        columns: batch.num_columns(),
    })
}
