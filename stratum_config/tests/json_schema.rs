//! Integration tests for resolvers built from JSON Schema documents.

use anyhow::{Result, anyhow, ensure};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use stratum_config::{ConfigResolver, StratumError, is_validation_failure};

#[fixture]
fn document() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": {"type": "string"},
            "replicas": {"type": "integer", "default": 1},
            "tier": {"enum": ["gold", "silver"], "default": "silver"},
            "endpoint": {"type": ["string", "null"]}
        },
        "required": ["name"],
        "additionalProperties": false
    })
}

#[rstest]
fn defaults_from_document_are_applied(document: Value) -> Result<()> {
    let mut resolver: ConfigResolver =
        ConfigResolver::from_json_schema(&document).map_err(|e| anyhow!(e.to_string()))?;
    resolver.set("dev", json!({"name": "svc", "endpoint": null}));

    let value = resolver.get("dev/staging").map_err(|e| anyhow!(e.to_string()))?;
    ensure!(
        value == json!({"name": "svc", "replicas": 1, "tier": "silver", "endpoint": null}),
        "unexpected value {value}"
    );
    Ok(())
}

#[rstest]
#[case::unknown_field(json!({"name": "svc", "colour": "red"}))]
#[case::bad_enum(json!({"name": "svc", "tier": "bronze"}))]
#[case::null_name(json!({"name": null}))]
fn invalid_overrides_are_rejected(document: Value, #[case] fragment: Value) -> Result<()> {
    let mut resolver: ConfigResolver =
        ConfigResolver::from_json_schema(&document).map_err(|e| anyhow!(e.to_string()))?;
    resolver.set("dev", fragment);
    let Err(err) = resolver.get("dev") else {
        anyhow::bail!("resolution should fail");
    };
    ensure!(is_validation_failure(&err), "unexpected error {err:?}");
    Ok(())
}

#[rstest]
fn non_object_document_is_rejected() -> Result<()> {
    let Err(err) = ConfigResolver::<Value>::from_json_schema(&json!({"type": "string"})) else {
        anyhow::bail!("a string schema cannot describe a configuration");
    };
    ensure!(
        matches!(&*err, StratumError::InvalidSchema { .. }),
        "unexpected error {err:?}"
    );
    Ok(())
}
