// src/dataset/mod.rs

pub mod inspect;
pub mod write;

use anyhow::{Context, Result};
use arrow::{
    array::{ArrayRef, Float64Array, StringArray},
    datatypes::{DataType, Field, Schema as ArrowSchema},
    record_batch::RecordBatch,
};
use std::sync::Arc;

use crate::record::PriceRecord;

pub use write::{write_dataset, OutputFormat, WriteOutcome};

/// Canonical leading columns, in order.
pub const CANONICAL_COLUMNS: [&str; 7] = [
    "Date",
    "Commodity",
    "Location",
    "Price",
    "PercentChange",
    "Latitude",
    "Longitude",
];

/// Everything collected in one run, in collection order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<PriceRecord>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = PriceRecord>) {
        self.records.extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    /// Widest overflow seen across all records.
    pub fn overflow_width(&self) -> usize {
        self.records.iter().map(|r| r.extra.len()).max().unwrap_or(0)
    }

    /// Canonical names followed by `Info_0`, `Info_1`, … for overflow cells.
    pub fn column_names(&self) -> Vec<String> {
        column_names(self.overflow_width())
    }

    /// Arrow schema: text columns except `Latitude`/`Longitude`.
    pub fn schema(&self) -> ArrowSchema {
        let fields = self
            .column_names()
            .into_iter()
            .map(|name| {
                let dt = match name.as_str() {
                    "Latitude" | "Longitude" => DataType::Float64,
                    _ => DataType::Utf8,
                };
                Field::new(name, dt, false)
            })
            .collect::<Vec<_>>();
        ArrowSchema::new(fields)
    }

    /// One batch holding every record. Records with fewer overflow cells
    /// than the widest get empty strings in the missing positions.
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let width = self.overflow_width();
        let text = |f: fn(&PriceRecord) -> &str| -> ArrayRef {
            Arc::new(StringArray::from_iter_values(self.records.iter().map(f)))
        };

        let mut columns: Vec<ArrayRef> = vec![
            text(|r| r.date.as_str()),
            text(|r| r.commodity.as_str()),
            text(|r| r.location.as_str()),
            text(|r| r.price.as_str()),
            text(|r| r.percent_change.as_str()),
            Arc::new(Float64Array::from_iter_values(
                self.records.iter().map(PriceRecord::latitude),
            )),
            Arc::new(Float64Array::from_iter_values(
                self.records.iter().map(PriceRecord::longitude),
            )),
        ];
        for i in 0..width {
            columns.push(Arc::new(StringArray::from_iter_values(
                self.records
                    .iter()
                    .map(|r| r.extra.get(i).map(String::as_str).unwrap_or("")),
            )));
        }

        RecordBatch::try_new(Arc::new(self.schema()), columns)
            .context("building dataset record batch")
    }
}

impl From<Vec<PriceRecord>> for Dataset {
    fn from(records: Vec<PriceRecord>) -> Self {
        Self { records }
    }
}

pub fn column_names(overflow: usize) -> Vec<String> {
    CANONICAL_COLUMNS
        .iter()
        .map(|s| s.to_string())
        .chain((0..overflow).map(|i| format!("Info_{}", i)))
        .collect()
}
