// ATV e2e - OpenAPI schema document assertions
//! Structure and value assertions over a decoded OpenAPI document.
//!
//! Lookups use dotted paths (`info.title`), walking nested objects one
//! segment at a time. Only the handful of keys the check cares about are
//! validated; the rest of the document is ignored.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::Expectations;
use crate::error::{json_type_name, CheckError, CheckResult};

/// Keys that must be present, in the order they are checked.
pub const REQUIRED_PROPERTIES: [&str; 5] = ["openapi", "info", "info.title", "info.version", "paths"];

/// Resolve a dotted path against a JSON value.
pub fn property<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(doc, |node, key| node.as_object()?.get(key))
}

/// Validated view of the schema document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaSummary {
    pub openapi: String,
    pub title: String,
    /// `info.version` rendered as text; any JSON type is accepted.
    pub version: String,
    pub path_count: usize,
}

/// Reject a `null` body before any structural checks.
pub fn ensure_not_null(doc: &Value) -> CheckResult<()> {
    if doc.is_null() {
        return Err(CheckError::NullDocument);
    }
    Ok(())
}

/// Every required key exists; `openapi`/`info.title` are strings and `paths` is an object.
pub fn assert_structure(doc: &Value) -> CheckResult<()> {
    for path in REQUIRED_PROPERTIES {
        if property(doc, path).is_none() {
            return Err(CheckError::MissingField(path.to_string()));
        }
    }
    require_str(doc, "openapi")?;
    require_str(doc, "info.title")?;
    require_object(doc, "paths")?;
    Ok(())
}

/// Compare `openapi` and `info.title` against the expectations, verbatim.
pub fn assert_values(doc: &Value, expected: &Expectations) -> CheckResult<()> {
    assert_str_eq(doc, "openapi", &expected.openapi_version)?;
    assert_str_eq(doc, "info.title", &expected.title)?;
    Ok(())
}

/// Run structure then value assertions and summarize the document.
pub fn validate(doc: &Value, expected: &Expectations) -> CheckResult<SchemaSummary> {
    ensure_not_null(doc)?;
    assert_structure(doc)?;
    assert_values(doc, expected)?;

    let version = match property(doc, "info.version") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => return Err(CheckError::MissingField("info.version".to_string())),
    };

    Ok(SchemaSummary {
        openapi: require_str(doc, "openapi")?.to_string(),
        title: require_str(doc, "info.title")?.to_string(),
        version,
        path_count: require_object(doc, "paths")?.len(),
    })
}

fn require_str<'a>(doc: &'a Value, path: &str) -> CheckResult<&'a str> {
    let value = property(doc, path).ok_or_else(|| CheckError::MissingField(path.to_string()))?;
    value.as_str().ok_or_else(|| CheckError::WrongType {
        path: path.to_string(),
        expected: "a string",
        actual: json_type_name(value),
    })
}

fn require_object<'a>(doc: &'a Value, path: &str) -> CheckResult<&'a Map<String, Value>> {
    let value = property(doc, path).ok_or_else(|| CheckError::MissingField(path.to_string()))?;
    value.as_object().ok_or_else(|| CheckError::WrongType {
        path: path.to_string(),
        expected: "an object",
        actual: json_type_name(value),
    })
}

fn assert_str_eq(doc: &Value, path: &str, expected: &str) -> CheckResult<()> {
    let actual = require_str(doc, path)?;
    if actual != expected {
        return Err(CheckError::ValueMismatch {
            path: path.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn atv_schema() -> Value {
        json!({
            "openapi": "3.0.3",
            "info": {
                "title": " Asiointitietovaranto ",
                "version": "0.1.0",
                "description": "Asiointitietovaranto REST API"
            },
            "paths": {
                "/v1/documents/": { "get": {} },
                "/v1/statistics/": { "get": {} }
            }
        })
    }

    #[test]
    fn property_walks_nested_objects() {
        let doc = atv_schema();
        assert_eq!(property(&doc, "openapi"), Some(&json!("3.0.3")));
        assert_eq!(property(&doc, "info.version"), Some(&json!("0.1.0")));
        assert_eq!(property(&doc, "info.license"), None);
        assert_eq!(property(&doc, "openapi.major"), None);
    }

    #[test]
    fn valid_schema_produces_summary() {
        let summary = validate(&atv_schema(), &Expectations::default()).unwrap();
        assert_eq!(
            summary,
            SchemaSummary {
                openapi: "3.0.3".to_string(),
                title: " Asiointitietovaranto ".to_string(),
                version: "0.1.0".to_string(),
                path_count: 2,
            }
        );
    }

    #[test]
    fn null_document_is_rejected() {
        let err = validate(&Value::Null, &Expectations::default()).unwrap_err();
        assert!(matches!(err, CheckError::NullDocument));
    }

    #[test]
    fn first_missing_property_is_reported() {
        let mut doc = atv_schema();
        doc["info"].as_object_mut().unwrap().remove("version");
        doc.as_object_mut().unwrap().remove("paths");
        match assert_structure(&doc).unwrap_err() {
            CheckError::MissingField(path) => assert_eq!(path, "info.version"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_info_is_reported_before_nested_keys() {
        let doc = json!({ "openapi": "3.0.3", "paths": {} });
        match assert_structure(&doc).unwrap_err() {
            CheckError::MissingField(path) => assert_eq!(path, "info"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_object_fails_on_openapi() {
        match validate(&json!({}), &Expectations::default()).unwrap_err() {
            CheckError::MissingField(path) => assert_eq!(path, "openapi"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn paths_must_be_an_object() {
        let mut doc = atv_schema();
        doc["paths"] = json!(["/v1/documents/"]);
        match assert_structure(&doc).unwrap_err() {
            CheckError::WrongType { path, expected, actual } => {
                assert_eq!(path, "paths");
                assert_eq!(expected, "an object");
                assert_eq!(actual, "an array");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_paths_are_accepted() {
        let mut doc = atv_schema();
        doc["paths"] = json!({});
        assert_eq!(validate(&doc, &Expectations::default()).unwrap().path_count, 0);
    }

    #[test]
    fn trimmed_title_is_a_mismatch() {
        let mut doc = atv_schema();
        doc["info"]["title"] = json!("Asiointitietovaranto");
        match assert_values(&doc, &Expectations::default()).unwrap_err() {
            CheckError::ValueMismatch { path, expected, actual } => {
                assert_eq!(path, "info.title");
                assert_eq!(expected, " Asiointitietovaranto ");
                assert_eq!(actual, "Asiointitietovaranto");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn openapi_version_is_compared_first() {
        let mut doc = atv_schema();
        doc["openapi"] = json!("3.1.0");
        doc["info"]["title"] = json!("Other");
        match assert_values(&doc, &Expectations::default()).unwrap_err() {
            CheckError::ValueMismatch { path, .. } => assert_eq!(path, "openapi"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn numeric_openapi_is_a_type_error() {
        let mut doc = atv_schema();
        doc["openapi"] = json!(3);
        assert!(matches!(
            assert_structure(&doc).unwrap_err(),
            CheckError::WrongType { .. }
        ));
    }

    #[test]
    fn non_string_version_is_rendered_as_json() {
        let mut doc = atv_schema();
        doc["info"]["version"] = json!(2);
        assert_eq!(validate(&doc, &Expectations::default()).unwrap().version, "2");
    }
}
