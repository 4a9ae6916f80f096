use anyhow::Result;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::model::{ParameterRow, WorkItemId};

use super::RowReport;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonOutput {
    pub work_item: WorkItemId,
    pub total_rows: usize,
    pub rows: Vec<RowReport>,
}

pub struct OutputFormatter;

impl OutputFormatter {
    pub fn format(
        work_item: WorkItemId,
        rows: &[ParameterRow],
        method: &str,
        format: OutputFormat,
    ) -> Result<String> {
        match format {
            OutputFormat::Json => {
                let output = Self::build_output(work_item, rows, method);
                Ok(serde_json::to_string_pretty(&output)?)
            }
            OutputFormat::Text => Ok(Self::format_text(rows, method)),
        }
    }

    pub fn build_output(work_item: WorkItemId, rows: &[ParameterRow], method: &str) -> JsonOutput {
        let rows: Vec<RowReport> = rows
            .iter()
            .map(|row| RowReport::from_row(row, method))
            .collect();

        JsonOutput {
            work_item,
            total_rows: rows.len(),
            rows,
        }
    }

    /// One display label per line.
    pub fn format_text(rows: &[ParameterRow], method: &str) -> String {
        rows.iter()
            .map(|row| row.display_name(method))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
