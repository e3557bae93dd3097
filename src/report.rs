//! Result tables: pretty printing for the terminal and CSV dumps.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::datasets::DatasetError;
use crate::evaluation::Evaluation;
use crate::stats::SignificanceVerdict;

#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct EvaluationRow {
    #[serde(rename = "Embeddings")]
    #[tabled(rename = "Embeddings")]
    pub name: String,
    #[serde(rename = "rho")]
    #[tabled(rename = "rho")]
    pub rho: f64,
    #[serde(rename = "rho p-value")]
    #[tabled(rename = "rho p-value")]
    pub rho_p: f64,
    #[serde(rename = "tau")]
    #[tabled(rename = "tau")]
    pub tau: f64,
    #[serde(rename = "tau p-value")]
    #[tabled(rename = "tau p-value")]
    pub tau_p: f64,
    #[serde(rename = "Found")]
    #[tabled(rename = "Found")]
    pub found: usize,
    #[serde(rename = "Not Found")]
    #[tabled(rename = "Not Found")]
    pub not_found: usize,
}

impl EvaluationRow {
    pub fn new(name: impl Into<String>, evaluation: &Evaluation) -> Self {
        Self {
            name: name.into(),
            rho: evaluation.spearman.coefficient,
            rho_p: evaluation.spearman.p_value,
            tau: evaluation.kendall.coefficient,
            tau_p: evaluation.kendall.p_value,
            found: evaluation.found,
            not_found: evaluation.not_found,
        }
    }
}

pub fn render_evaluation_table(rows: &[EvaluationRow]) -> String {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

pub fn write_evaluation_csv(path: impl AsRef<Path>, rows: &[EvaluationRow]) -> Result<(), DatasetError> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path).map_err(|e| DatasetError::csv(path, e))?;
    for row in rows {
        writer.serialize(row).map_err(|e| DatasetError::csv(path, e))?;
    }
    writer.flush().map_err(|e| DatasetError::io(path, e))
}

/// Two rows: `["", models...]` and `[reference, verdicts...]`.
pub fn write_significance_results<W: Write>(
    writer: W,
    reference: &str,
    results: &[(String, SignificanceVerdict)],
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);

    let mut header = vec![String::new()];
    header.extend(results.iter().map(|(name, _)| name.clone()));
    writer.write_record(&header)?;

    let mut row = vec![reference.to_string()];
    row.extend(results.iter().map(|(_, verdict)| verdict.to_string()));
    writer.write_record(&row)?;

    writer.flush()?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetCorrelationRow {
    pub dataset: String,
    pub rho: f64,
    pub n_common: usize,
}

pub fn write_dataset_correlations<W: Write>(writer: W, rows: &[DatasetCorrelationRow]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
