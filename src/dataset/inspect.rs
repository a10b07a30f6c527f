// src/dataset/inspect.rs

use anyhow::{anyhow, Context, Result};
use arrow::{
    array::{Float64Array, StringArray},
    record_batch::RecordBatch,
};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::{collections::BTreeMap, fs::File, path::Path};

/// Aggregate view of a written dataset.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DatasetStats {
    pub rows: usize,
    pub columns: Vec<String>,
    pub by_commodity: BTreeMap<String, usize>,
    pub by_date: BTreeMap<String, usize>,
    /// Rows whose coordinates are the (0, 0) sentinel.
    pub unresolved: usize,
}

/// Read every batch of a Parquet dataset.
pub fn read_parquet(path: &Path) -> Result<Vec<RecordBatch>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)
        .with_context(|| format!("reading Parquet metadata of {}", path.display()))?
        .build()?;
    reader
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("decoding {}", path.display()))
}

fn text_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<StringArray>())
        .ok_or_else(|| anyhow!("missing text column {}", name))
}

fn float_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Float64Array> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<Float64Array>())
        .ok_or_else(|| anyhow!("missing float column {}", name))
}

pub fn summarize(batches: &[RecordBatch]) -> Result<DatasetStats> {
    let mut stats = DatasetStats::default();
    if let Some(first) = batches.first() {
        stats.columns = first
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect();
    }

    for batch in batches {
        let dates = text_column(batch, "Date")?;
        let commodities = text_column(batch, "Commodity")?;
        let lat = float_column(batch, "Latitude")?;
        let lon = float_column(batch, "Longitude")?;

        for i in 0..batch.num_rows() {
            *stats
                .by_commodity
                .entry(commodities.value(i).to_string())
                .or_default() += 1;
            *stats.by_date.entry(dates.value(i).to_string()).or_default() += 1;
            if lat.value(i) == 0.0 && lon.value(i) == 0.0 {
                stats.unresolved += 1;
            }
        }
        stats.rows += batch.num_rows();
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{write_dataset, Dataset};
    use crate::geo::CoordinatePair;
    use crate::record::PriceRecord;
    use tempfile::tempdir;

    fn rec(date: &str, commodity: &str, coords: CoordinatePair) -> PriceRecord {
        PriceRecord {
            date: date.into(),
            commodity: commodity.into(),
            location: "X".into(),
            price: "Rp 1".into(),
            percent_change: "0%".into(),
            coordinates: coords,
            extra: vec![],
        }
    }

    #[test]
    fn counts_written_rows() -> Result<()> {
        let tmp = tempdir()?;
        let path = tmp.path().join("d.parquet");
        let aceh = CoordinatePair::new(-4.6951, 96.7494);
        let ds = Dataset::from(vec![
            rec("2025-01-02", "Beras SPHP", aceh),
            rec("2025-01-02", "Garam Konsumsi", CoordinatePair::UNRESOLVED),
            rec("2025-01-01", "Beras SPHP", aceh),
        ]);
        write_dataset(&ds, &path)?;

        let stats = summarize(&read_parquet(&path)?)?;
        assert_eq!(stats.rows, 3);
        assert_eq!(stats.columns.len(), 7);
        assert_eq!(stats.by_commodity["Beras SPHP"], 2);
        assert_eq!(stats.by_date["2025-01-01"], 1);
        assert_eq!(stats.unresolved, 1);
        Ok(())
    }
}
