//! Example resolving per-environment service configuration.
//!
//! Overrides are registered for `dev` and `dev/staging`; a runtime step
//! derives the fully qualified service name from the resolved name and the
//! path key. Each environment's resolved configuration is printed as JSON.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::{self, Write};
use stratum_config::schema::{Field, Schema, SchemaType};
use stratum_config::{ConfigResolver, StratumResult};

/// Resolved configuration for one service deployment.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServiceConfig {
    name: String,
    full_name: String,
    replicas: u32,
    tags: Vec<String>,
}

fn service_schema() -> Schema {
    Schema::new()
        .field("name", Field::string())
        .field("full_name", Field::string())
        .field("replicas", Field::integer().with_default(1))
        .field("tags", Field::array(SchemaType::String).with_default(json!([])))
}

fn build_resolver() -> StratumResult<ConfigResolver<ServiceConfig>> {
    let mut resolver: ConfigResolver<ServiceConfig> = ConfigResolver::new(service_schema())?;
    resolver
        .set_default(json!({"tags": ["managed"]}))
        .set("dev", json!({"name": "billing"}))
        .set("dev/staging", json!({"replicas": 3, "tags": ["managed", "canary"]}))
        .add_runtime(|ctx, resolved| {
            let name = resolved["name"].as_str().unwrap_or_default();
            let suffix = ctx.path_key().replace('/', "-");
            json!({"full_name": format!("{name}-{suffix}")})
        });
    Ok(resolver)
}

fn main() -> Result<(), String> {
    let resolver = build_resolver().map_err(|e| e.to_string())?;
    let mut stdout = io::stdout().lock();
    for env in ["dev", "dev/staging", "dev/production"] {
        let config = resolver.get(env).map_err(|e| e.to_string())?;
        let rendered = serde_json::to_string(&config).map_err(|e| e.to_string())?;
        writeln!(stdout, "{env}: {rendered}").map_err(|e| e.to_string())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow, ensure};

    #[test]
    fn staging_inherits_name_and_overrides_replicas() -> Result<()> {
        let resolver = build_resolver().map_err(|e| anyhow!(e.to_string()))?;
        let staging = resolver.get("dev/staging").map_err(|e| anyhow!(e.to_string()))?;
        ensure!(
            staging
                == ServiceConfig {
                    name: "billing".into(),
                    full_name: "billing-dev-staging".into(),
                    replicas: 3,
                    tags: vec!["managed".into(), "canary".into()],
                },
            "unexpected staging configuration {staging:?}"
        );
        Ok(())
    }

    #[test]
    fn production_falls_back_to_defaults() -> Result<()> {
        let resolver = build_resolver().map_err(|e| anyhow!(e.to_string()))?;
        let production = resolver
            .get("dev/production")
            .map_err(|e| anyhow!(e.to_string()))?;
        ensure!(production.replicas == 1, "expected default replicas");
        ensure!(production.tags == ["managed"], "expected default tags");
        Ok(())
    }
}
