use tracing::{debug, trace, warn};

use crate::error::ResolveError;
use crate::model::{ParameterRow, SharedDataSet, SharedReference, TestCaseRecord, WorkItemId};
use crate::parser::{dataset, inline, reference};
use crate::sniffer::{self, PayloadFormat};
use crate::source::WorkItemSource;

/// Turns a test case work item into the parameter rows a data-driven test iterates.
///
/// Inline tables are read straight off the test case. Shared references cost one
/// more fetch: the first referenced data set is loaded and its rows are projected
/// through the reference's column mapping. Additional data set ids are ignored.
pub struct ParameterResolver<S> {
    source: S,
}

impl<S: WorkItemSource> ParameterResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches the test case and resolves it.
    pub fn resolve(&self, id: WorkItemId) -> Result<Vec<ParameterRow>, ResolveError> {
        trace!(id, "fetching test case");
        let record = self
            .source
            .fetch(id)
            .map_err(|e| ResolveError::fetch(id, id, e))?;
        self.resolve_record(&record)
    }

    pub fn resolve_record(
        &self,
        record: &TestCaseRecord,
    ) -> Result<Vec<ParameterRow>, ResolveError> {
        if !record.is_test_case() {
            return Err(ResolveError::not_a_test_case(
                record.id,
                &record.work_item_type,
            ));
        }
        if !record.has_parameter_data() {
            return Err(ResolveError::missing_parameter_data(record.id));
        }

        let format = sniffer::classify(&record.test_data_source);
        debug!(id = record.id, format = format.as_str(), "classified parameter data");

        let rows = match format {
            PayloadFormat::Inline => {
                inline::parse(&record.test_data_source, record.id, &record.title)
                    .map_err(|e| ResolveError::from_payload(record.id, e))?
            }
            PayloadFormat::SharedReference => self.resolve_shared(record)?,
            PayloadFormat::Unknown => return Err(ResolveError::unrecognized_format(record.id)),
        };

        debug!(id = record.id, rows = rows.len(), "resolved parameter rows");
        Ok(rows)
    }

    fn resolve_shared(&self, record: &TestCaseRecord) -> Result<Vec<ParameterRow>, ResolveError> {
        let reference = reference::parse(&record.test_data_source)
            .map_err(|e| ResolveError::from_payload(record.id, e))?;
        let data_set_id = reference
            .primary_data_set()
            .ok_or_else(|| ResolveError::missing_parameter_data(record.id))?;

        trace!(id = record.id, data_set_id, "fetching shared parameter data set");
        let shared = self
            .source
            .fetch(data_set_id)
            .map_err(|e| ResolveError::fetch(record.id, data_set_id, e))?;

        if shared.test_parameters.trim().is_empty() {
            warn!(
                id = record.id,
                data_set_id, "shared parameter work item has no parameter data"
            );
            return Ok(Vec::new());
        }

        let data_set = dataset::parse(&shared.test_parameters)
            .map_err(|e| ResolveError::from_data_set(record.id, data_set_id, e))?;

        project(record, data_set_id, &reference, &data_set)
    }
}

/// Builds one row per data set row, renaming shared columns to their local names.
fn project(
    record: &TestCaseRecord,
    data_set_id: WorkItemId,
    reference: &SharedReference,
    data_set: &SharedDataSet,
) -> Result<Vec<ParameterRow>, ResolveError> {
    data_set
        .rows
        .iter()
        .map(|data_row| -> Result<ParameterRow, ResolveError> {
            trace!(row = ?data_row.id, "projecting shared parameter row");
            let mut row = ParameterRow::new(record.id, &record.title);
            for mapping in &reference.parameter_map {
                let value = data_row
                    .lookup(&mapping.shared_parameter_name)
                    .ok_or_else(|| {
                        ResolveError::column_not_found(
                            record.id,
                            data_set_id,
                            &mapping.shared_parameter_name,
                        )
                    })?;
                row.insert(&mapping.local_param_name, value);
            }
            Ok(row)
        })
        .collect()
}
