use indexmap::IndexMap;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, trace};

use super::local_name;
use crate::error::PayloadError;
use crate::model::{ParameterRow, WorkItemId};

const ROOT_DEPTH: usize = 1;
const ROW_DEPTH: usize = 2;
const CELL_DEPTH: usize = 3;

/// Parses a record-set table (`<NewDataSet><Table1><a>1</a></Table1>..</NewDataSet>`)
/// into one row per table element, each binding every column of the table.
pub fn parse(
    raw: &str,
    id: WorkItemId,
    title: &str,
) -> Result<Vec<ParameterRow>, PayloadError> {
    let table = read_table(raw)?;
    debug!(
        id,
        table = table.name.as_str(),
        rows = table.rows.len(),
        columns = table.columns.len(),
        "parsed inline table"
    );

    let rows = table
        .rows
        .into_iter()
        .map(|mut cells| {
            let mut row = ParameterRow::new(id, title);
            for column in &table.columns {
                let value = cells.shift_remove(column).unwrap_or_default();
                row.insert(column.clone(), value);
            }
            row
        })
        .collect();

    Ok(rows)
}

#[derive(Debug)]
struct Table {
    name: String,
    columns: Vec<String>,
    rows: Vec<IndexMap<String, String>>,
}

fn read_table(raw: &str) -> Result<Table, PayloadError> {
    let mut reader = Reader::from_str(raw.trim());
    let mut builder = TableBuilder::default();
    let mut depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                depth += 1;
                let name = local_name(&e).map_err(malformed)?;
                builder.open(&name, depth)?;
            }
            Ok(Event::Empty(e)) => {
                let name = local_name(&e).map_err(malformed)?;
                builder.open(&name, depth + 1)?;
                builder.close(depth + 1)?;
            }
            Ok(Event::End(_)) => {
                builder.close(depth)?;
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(malformed)?;
                builder.text(&text);
            }
            Ok(Event::CData(e)) => {
                builder.text(&String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(PayloadError::malformed_table(format!("XML parse error: {e}"))),
            _ => {}
        }
    }

    if depth != 0 {
        return Err(PayloadError::malformed_table(
            "document ended inside an open element",
        ));
    }

    builder.finish()
}

fn malformed(err: impl std::fmt::Display) -> PayloadError {
    PayloadError::malformed_table(err.to_string())
}

/// A child of the root: a row when it holds cells, or a single cell of the
/// root itself when the document has no record-set wrapper.
#[derive(Debug)]
struct Element {
    name: String,
    text: String,
    cells: IndexMap<String, String>,
    nested: bool,
}

impl Element {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            text: String::new(),
            cells: IndexMap::new(),
            nested: false,
        }
    }
}

#[derive(Debug, Default)]
struct TableBuilder {
    root: Option<String>,
    elements: Vec<Element>,
    current: Option<Element>,
    cell: Option<(String, String)>,
    // Depth of an element whose whole subtree is ignored.
    skip: Option<usize>,
}

impl TableBuilder {
    fn open(&mut self, name: &str, depth: usize) -> Result<(), PayloadError> {
        if self.skip.is_some() {
            return Ok(());
        }

        match depth {
            ROOT_DEPTH => {
                if self.root.is_some() {
                    return Err(PayloadError::malformed_table(format!(
                        "unexpected second root element <{name}>"
                    )));
                }
                self.root = Some(name.to_string());
            }
            ROW_DEPTH => {
                // Record sets may embed their own xs:schema ahead of the rows.
                if name == "schema" {
                    self.skip = Some(depth);
                    return Ok(());
                }
                self.current = Some(Element::new(name));
            }
            CELL_DEPTH => {
                if let Some(element) = self.current.as_mut() {
                    element.nested = true;
                }
                self.cell = Some((name.to_string(), String::new()));
            }
            _ => {
                return Err(PayloadError::malformed_table(format!(
                    "element <{name}> is nested inside a cell"
                )));
            }
        }
        Ok(())
    }

    fn close(&mut self, depth: usize) -> Result<(), PayloadError> {
        if let Some(skip) = self.skip {
            if depth == skip {
                self.skip = None;
            }
            return Ok(());
        }

        match depth {
            ROW_DEPTH => {
                if let Some(element) = self.current.take() {
                    self.elements.push(element);
                }
            }
            CELL_DEPTH => {
                if let (Some((column, value)), Some(element)) =
                    (self.cell.take(), self.current.as_mut())
                {
                    if element.cells.contains_key(&column) {
                        return Err(repeated_column(&column));
                    }
                    element.cells.insert(column, value);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn text(&mut self, text: &str) {
        if self.skip.is_some() {
            return;
        }
        if let Some((_, value)) = self.cell.as_mut() {
            value.push_str(text);
        } else if let Some(element) = self.current.as_mut() {
            element.text.push_str(text);
        }
    }

    fn finish(self) -> Result<Table, PayloadError> {
        let root = self
            .root
            .ok_or_else(|| PayloadError::malformed_table("document has no root element"))?;
        if self.elements.is_empty() {
            return Err(PayloadError::malformed_table("table has no rows"));
        }

        let text_only = self.elements.iter().all(|e| !e.nested);
        if text_only && self.elements.iter().any(|e| !e.text.trim().is_empty()) {
            return root_as_row(root, self.elements);
        }

        // The first element holding cells names the table; other elements are ignored.
        let name = self
            .elements
            .iter()
            .find(|e| e.nested)
            .unwrap_or(&self.elements[0])
            .name
            .clone();

        let mut columns: Vec<String> = Vec::new();
        let mut rows = Vec::new();
        for element in self.elements {
            if element.name != name {
                trace!(element = element.name.as_str(), "skipping element outside the first table");
                continue;
            }
            for column in element.cells.keys() {
                if !columns.contains(column) {
                    columns.push(column.clone());
                }
            }
            rows.push(element.cells);
        }

        if columns.is_empty() {
            return Err(PayloadError::malformed_table(format!(
                "table <{name}> has no columns"
            )));
        }
        Ok(Table {
            name,
            columns,
            rows,
        })
    }
}

/// `<Table1><a>1</a><b>2</b></Table1>`: the root is the only row.
fn root_as_row(root: String, elements: Vec<Element>) -> Result<Table, PayloadError> {
    let mut cells = IndexMap::new();
    for element in elements {
        if cells.contains_key(&element.name) {
            return Err(repeated_column(&element.name));
        }
        cells.insert(element.name, element.text);
    }
    Ok(Table {
        name: root,
        columns: cells.keys().cloned().collect(),
        rows: vec![cells],
    })
}

fn repeated_column(column: &str) -> PayloadError {
    PayloadError::malformed_table(format!("column <{column}> repeated in a row"))
}
