//! JSON interchange for feature records.
//!
//! Accepts `left`/`right` (or `fl`/`fr`) as `N x D` nested arrays and
//! `folds`/`labels` (or `fold`/`flag`) as flat arrays.

use std::io::Read;

use serde::{Deserialize, Serialize};

use super::error::{StorageError, StorageResult};
use super::record::FeatureRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonFeatureRecord {
    #[serde(alias = "fl")]
    pub left: Vec<Vec<f32>>,
    #[serde(alias = "fr")]
    pub right: Vec<Vec<f32>>,
    #[serde(alias = "fold")]
    pub folds: Vec<u32>,
    #[serde(alias = "flag")]
    pub labels: Vec<i32>,
}

impl JsonFeatureRecord {
    pub fn from_reader<R: Read>(reader: R) -> StorageResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_str(json: &str) -> StorageResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Flattens the matrices and seals the result.
    ///
    /// Row counts and label values are checked later by
    /// [`FeatureRecord::into_pair_set`]; only row widths are checked here.
    pub fn into_record(self) -> StorageResult<FeatureRecord> {
        let dim = self.left.first().map_or(0, Vec::len);
        let left = flatten("left", self.left, dim)?;
        let right = flatten("right", self.right, dim)?;

        let dim = u32::try_from(dim)
            .map_err(|_| StorageError::OutOfRange(format!("dimension {dim}")))?;
        let labels = self
            .labels
            .iter()
            .map(|&l| {
                i8::try_from(l).map_err(|_| StorageError::OutOfRange(format!("label {l}")))
            })
            .collect::<StorageResult<Vec<_>>>()?;

        Ok(FeatureRecord::new(dim, left, right, self.folds, labels))
    }
}

impl From<&FeatureRecord> for JsonFeatureRecord {
    fn from(record: &FeatureRecord) -> Self {
        let dim = (record.dim as usize).max(1);
        let rows = |m: &[f32]| m.chunks(dim).map(<[f32]>::to_vec).collect();
        Self {
            left: rows(&record.left),
            right: rows(&record.right),
            folds: record.folds.clone(),
            labels: record.labels.iter().map(|&l| i32::from(l)).collect(),
        }
    }
}

fn flatten(field: &'static str, rows: Vec<Vec<f32>>, dim: usize) -> StorageResult<Vec<f32>> {
    let mut flat = Vec::with_capacity(rows.len() * dim);
    for (row, values) in rows.into_iter().enumerate() {
        if values.len() != dim {
            return Err(StorageError::RaggedRows {
                field,
                row,
                expected: dim,
                actual: values.len(),
            });
        }
        flat.extend(values);
    }
    Ok(flat)
}
