use std::collections::HashMap;
use std::path::Path;

use super::{basename, model_name, DatasetError};

/// Square matrix of Spearman correlations between embedding models.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    /// Row labels, the embedding paths as given.
    labels: Vec<String>,
    /// Model names: basenames without extension.
    names: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// `values` must be `labels.len()` rows of `labels.len()` columns.
    pub fn new(labels: Vec<String>, values: Vec<Vec<f64>>) -> Self {
        debug_assert!(values.len() == labels.len() && values.iter().all(|row| row.len() == labels.len()));
        let names = labels.iter().map(|label| model_name(label)).collect();
        Self {
            labels,
            names,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row)?.get(col).copied()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|candidate| candidate == name)
    }

    /// Model name to row/column index.
    pub fn name_index(&self) -> HashMap<String, usize> {
        self.names
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect()
    }

    /// Correlation between two models looked up by name.
    pub fn between(&self, a: &str, b: &str) -> Result<f64, DatasetError> {
        let i = self
            .index_of(a)
            .ok_or_else(|| DatasetError::UnknownModel(a.to_string()))?;
        let j = self
            .index_of(b)
            .ok_or_else(|| DatasetError::UnknownModel(b.to_string()))?;
        Ok(self.values[i][j])
    }

    /// Header `Embeddings,<basename>...`, then one row per model.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), DatasetError> {
        let path = path.as_ref();
        let mut writer = csv::Writer::from_path(path).map_err(|e| DatasetError::csv(path, e))?;

        let mut header = vec!["Embeddings".to_string()];
        header.extend(self.labels.iter().map(|label| basename(label)));
        writer
            .write_record(&header)
            .map_err(|e| DatasetError::csv(path, e))?;

        for (label, row) in self.labels.iter().zip(&self.values) {
            let mut record = vec![label.clone()];
            record.extend(row.iter().map(f64::to_string));
            writer
                .write_record(&record)
                .map_err(|e| DatasetError::csv(path, e))?;
        }

        writer.flush().map_err(|e| DatasetError::io(path, e))
    }

    /// Reads a matrix written by [`write_csv`](Self::write_csv). Model names
    /// come from the header; row labels from the first column.
    pub fn read_csv(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|e| DatasetError::csv(path, e))?;

        let header = reader
            .headers()
            .map_err(|e| DatasetError::csv(path, e))?
            .clone();
        let names: Vec<String> = header.iter().skip(1).map(model_name).collect();

        let mut labels = Vec::with_capacity(names.len());
        let mut values = Vec::with_capacity(names.len());
        for row in reader.records() {
            let row = row.map_err(|e| DatasetError::csv(path, e))?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);

            let parsed = row
                .iter()
                .skip(1)
                .map(|cell| cell.trim().parse::<f64>())
                .collect::<Result<Vec<f64>, _>>()
                .map_err(|e| DatasetError::malformed(path, line, format!("invalid coefficient: {e}")))?;
            if parsed.len() != names.len() {
                return Err(DatasetError::malformed(
                    path,
                    line,
                    format!("expected {} coefficients, found {}", names.len(), parsed.len()),
                ));
            }

            labels.push(row.get(0).unwrap_or_default().to_string());
            values.push(parsed);
        }

        if values.len() != names.len() {
            return Err(DatasetError::malformed(
                path,
                1,
                format!("expected {} rows, found {}", names.len(), values.len()),
            ));
        }

        Ok(Self {
            labels,
            names,
            values,
        })
    }
}
