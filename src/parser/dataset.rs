use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use super::local_name;
use crate::error::PayloadError;
use crate::model::{DataRow, Kvp, SharedDataSet};

/// Parses the `<parameterSet>` document stored on a shared parameter work item.
///
/// ```xml
/// <parameterSet>
///   <paramNames><param>User</param></paramNames>
///   <paramData lastId="1">
///     <dataRow id="1"><kvp key="User" value="alice" /></dataRow>
///   </paramData>
/// </parameterSet>
/// ```
///
/// `kvp` keys and values are HTML-escaped before being written as XML attributes,
/// so they go through both XML unescaping and HTML entity decoding.
pub fn parse(raw: &str) -> Result<SharedDataSet, PayloadError> {
    let mut reader = Reader::from_str(raw.trim());
    let mut builder = DataSetBuilder::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => builder.open(&e)?,
            Ok(Event::Empty(e)) => {
                builder.open(&e)?;
                builder.close();
            }
            Ok(Event::End(_)) => builder.close(),
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(malformed)?;
                builder.text(&text);
            }
            Ok(Event::CData(e)) => builder.text(&String::from_utf8_lossy(e.as_ref())),
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(PayloadError::malformed_data_set(format!(
                    "XML parse error: {e}"
                )))
            }
            _ => {}
        }
    }

    let data_set = builder.finish()?;
    debug!(
        params = data_set.param_names.len(),
        rows = data_set.rows.len(),
        "parsed shared parameter data set"
    );
    Ok(data_set)
}

fn malformed(err: impl std::fmt::Display) -> PayloadError {
    PayloadError::malformed_data_set(err.to_string())
}

#[derive(Debug, Default)]
struct DataSetBuilder {
    path: Vec<String>,
    seen_root: bool,
    data_set: SharedDataSet,
    param: Option<String>,
    row: Option<DataRow>,
}

impl DataSetBuilder {
    fn open(&mut self, e: &BytesStart<'_>) -> Result<(), PayloadError> {
        let name = local_name(e).map_err(malformed)?;
        let parent = self.path.last().map(String::as_str);

        match (parent, name.as_str()) {
            (None, "parameterSet") if !self.seen_root => self.seen_root = true,
            (None, other) => {
                return Err(PayloadError::malformed_data_set(format!(
                    "expected a single <parameterSet> root, found <{other}>"
                )))
            }
            (Some("paramNames"), "param") => self.param = Some(String::new()),
            (Some("parameterSet"), "paramData") => {
                self.data_set.last_id = attribute(e, "lastId")?;
            }
            (Some("paramData"), "dataRow") => {
                self.row = Some(DataRow {
                    id: attribute(e, "id")?,
                    values: Vec::new(),
                });
            }
            (Some("dataRow"), "kvp") => {
                let key = attribute(e, "key")?.ok_or_else(|| {
                    PayloadError::malformed_data_set("<kvp> is missing its key attribute")
                })?;
                let value = attribute(e, "value")?.unwrap_or_default();
                if let Some(row) = self.row.as_mut() {
                    row.values.push(Kvp::new(decode(&key), decode(&value)));
                }
            }
            (_, "kvp") => {
                return Err(PayloadError::malformed_data_set(
                    "<kvp> found outside of a <dataRow>",
                ))
            }
            _ => {}
        }

        self.path.push(name);
        Ok(())
    }

    fn close(&mut self) {
        match self.path.pop().as_deref() {
            Some("param") => {
                if let Some(param) = self.param.take() {
                    self.data_set.param_names.push(param);
                }
            }
            Some("dataRow") => {
                if let Some(row) = self.row.take() {
                    self.data_set.rows.push(row);
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(param) = self.param.as_mut() {
            param.push_str(text);
        }
    }

    fn finish(self) -> Result<SharedDataSet, PayloadError> {
        if !self.seen_root {
            return Err(PayloadError::malformed_data_set(
                "document has no <parameterSet> root",
            ));
        }
        if let Some(open) = self.path.last() {
            return Err(PayloadError::malformed_data_set(format!(
                "document ended inside <{open}>"
            )));
        }
        Ok(self.data_set)
    }
}

fn attribute(e: &BytesStart<'_>, key: &str) -> Result<Option<String>, PayloadError> {
    for attr in e.attributes() {
        let attr = attr.map_err(malformed)?;
        if attr.key.local_name().as_ref() == key.as_bytes() {
            let value = attr.unescape_value().map_err(malformed)?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn decode(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}
