use std::collections::HashSet;

use tracing::debug;

use crate::error::PayloadError;
use crate::model::SharedReference;

/// Deserializes the JSON a test case stores when its parameters live on a
/// shared parameter work item.
pub fn parse(raw: &str) -> Result<SharedReference, PayloadError> {
    let reference: SharedReference = serde_json::from_str(raw.trim())
        .map_err(|e| PayloadError::malformed_reference(e.to_string()))?;

    if reference.parameter_map.is_empty() {
        return Err(PayloadError::MissingParameterMap);
    }

    // Projected rows are keyed by the local name, so each may appear once.
    let mut seen = HashSet::new();
    for mapping in &reference.parameter_map {
        if !seen.insert(mapping.local_param_name.as_str()) {
            return Err(PayloadError::malformed_reference(format!(
                "duplicate local parameter name '{}'",
                mapping.local_param_name
            )));
        }
    }

    debug!(
        mappings = reference.parameter_map.len(),
        data_sets = reference.shared_parameter_data_set_ids.len(),
        "parsed shared parameter reference"
    );
    Ok(reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParameterMapping;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_reference() {
        let raw = r#"{
            "parameterMap": [
                {"localParamName": "user", "sharedParameterName": "User", "sharedParameterDataSetId": 99},
                {"localParamName": "pass", "sharedParameterName": "Password", "sharedParameterDataSetId": 99}
            ],
            "sharedParameterDataSetIds": [99],
            "rowMappingType": 1
        }"#;
        let reference = parse(raw).unwrap();

        assert_eq!(
            reference.parameter_map,
            vec![
                ParameterMapping {
                    local_param_name: "user".into(),
                    shared_parameter_name: "User".into(),
                    shared_parameter_data_set_id: 99,
                },
                ParameterMapping {
                    local_param_name: "pass".into(),
                    shared_parameter_name: "Password".into(),
                    shared_parameter_data_set_id: 99,
                },
            ]
        );
        assert_eq!(reference.primary_data_set(), Some(99));
        assert_eq!(reference.row_mapping_type, 1);
    }

    #[test]
    fn test_parse_optional_fields_default() {
        let raw = r#"{"parameterMap":[{"localParamName":"x","sharedParameterName":"X"}],"sharedParameterDataSetIds":[99]}"#;
        let reference = parse(raw).unwrap();

        assert_eq!(reference.parameter_map[0].shared_parameter_data_set_id, 0);
        assert_eq!(reference.row_mapping_type, 0);
    }

    #[test]
    fn test_only_first_data_set_is_primary() {
        let raw = r#"{"parameterMap":[{"localParamName":"x","sharedParameterName":"X"}],"sharedParameterDataSetIds":[5, 6, 7]}"#;
        assert_eq!(parse(raw).unwrap().primary_data_set(), Some(5));
    }

    #[test]
    fn test_parse_empty_map_is_missing_data() {
        let raw = r#"{"parameterMap":[],"sharedParameterDataSetIds":[99]}"#;
        assert_eq!(parse(raw).unwrap_err(), PayloadError::MissingParameterMap);
    }

    #[test]
    fn test_parse_absent_map_is_missing_data() {
        assert_eq!(parse("{}").unwrap_err(), PayloadError::MissingParameterMap);
    }

    #[test]
    fn test_parse_rejects_duplicate_local_name() {
        let raw = r#"{"parameterMap":[
            {"localParamName":"x","sharedParameterName":"A"},
            {"localParamName":"x","sharedParameterName":"B"}
        ],"sharedParameterDataSetIds":[99]}"#;
        assert_eq!(
            parse(raw).unwrap_err(),
            PayloadError::malformed_reference("duplicate local parameter name 'x'")
        );
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse("{not json}").unwrap_err();
        assert!(matches!(err, PayloadError::MalformedReference { .. }));
    }

    #[test]
    fn test_parse_wrong_field_type() {
        let err = parse(r#"{"parameterMap": "x"}"#).unwrap_err();
        assert!(matches!(err, PayloadError::MalformedReference { .. }));
    }
}
