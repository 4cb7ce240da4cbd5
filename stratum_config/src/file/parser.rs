//! Format-specific parsing of fragment files.

use camino::Utf8Path;
use serde_json::Value;

use crate::StratumResult;

use super::error::{file_error, invalid_input};

/// Parse fragment data according to the file extension.
///
/// Both formats keep the key order of the document. `.toml` files require
/// the `toml` feature.
pub(super) fn parse_fragment_by_format(path: &Utf8Path, data: &str) -> StratumResult<Value> {
    let ext = path.extension().map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("json") => serde_json::from_str(data).map_err(|e| file_error(path, e)),
        Some("toml") => parse_toml(path, data),
        _ => Err(invalid_input(
            path,
            "unsupported fragment format: expected a .json or .toml file",
        )),
    }
}

#[cfg(feature = "toml")]
fn parse_toml(path: &Utf8Path, data: &str) -> StratumResult<Value> {
    toml::from_str::<Value>(data).map_err(|e| file_error(path, e))
}

#[cfg(not(feature = "toml"))]
fn parse_toml(path: &Utf8Path, _data: &str) -> StratumResult<Value> {
    Err(invalid_input(
        path,
        "toml feature disabled: enable the 'toml' feature to load this fragment",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StratumError;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::json("dev.json", r#"{"name": "svc", "tags": ["a"]}"#)]
    #[case::upper_case_extension("dev.JSON", r#"{"name": "svc", "tags": ["a"]}"#)]
    #[case::toml("dev.toml", "name = \"svc\"\ntags = [\"a\"]\n")]
    fn parses_supported_formats(#[case] file: &str, #[case] data: &str) {
        let value = parse_fragment_by_format(Utf8Path::new(file), data)
            .unwrap_or_else(|err| panic!("{file} should parse: {err}"));
        assert_eq!(value, json!({"name": "svc", "tags": ["a"]}));
    }

    #[rstest]
    #[case::json("a.json", r#"{"z": 1, "a": 2, "m": {"y": 1, "b": 2}}"#)]
    #[case::toml("a.toml", "z = 1\na = 2\n\n[m]\ny = 1\nb = 2\n")]
    fn preserves_document_key_order(#[case] file: &str, #[case] data: &str) {
        let value = parse_fragment_by_format(Utf8Path::new(file), data)
            .unwrap_or_else(|err| panic!("{file} should parse: {err}"));
        let keys: Vec<&String> = value.as_object().map(|m| m.keys().collect()).unwrap_or_default();
        assert_eq!(keys, ["z", "a", "m"]);
        let nested: Vec<&String> = value
            .get("m")
            .and_then(Value::as_object)
            .map(|m| m.keys().collect())
            .unwrap_or_default();
        assert_eq!(nested, ["y", "b"]);
    }

    #[rstest]
    #[case::unsupported("dev.yaml", "name: svc")]
    #[case::malformed_json("dev.json", "{")]
    #[case::malformed_toml("dev.toml", "name = ")]
    fn reports_file_errors(#[case] file: &str, #[case] data: &str) {
        let err = parse_fragment_by_format(Utf8Path::new(file), data).expect_err("should fail");
        match &*err {
            StratumError::File { path, .. } => assert_eq!(path.as_str(), file),
            other => panic!("expected File error, got {other:?}"),
        }
    }
}
