//! Integration tests for resolving configuration through a scope tree.

mod common;

use anyhow::{Result, ensure};
use common::{service_resolver, to_anyhow};
use rstest::rstest;
use serde_json::json;
use stratum_config::scope::ScopeTree;
use stratum_config::{LiteralPathKey, StratumError};

#[rstest]
fn nested_scopes_inherit_the_stage_path_key() -> Result<()> {
    let mut tree = ScopeTree::new();
    let app = tree.root("app");
    let staging = to_anyhow(tree.child(app, "staging"))?;
    let api = to_anyhow(tree.child(staging, "api"))?;
    to_anyhow(tree.set_path_key(staging, "dev/staging"))?;

    let mut resolver = service_resolver()?;
    resolver
        .set("dev", json!({"name": "svc"}))
        .set("dev/staging", json!({"replicas": 3}));

    let service = to_anyhow(resolver.get_in(&tree, &api))?;
    ensure!(service.replicas == 3, "unexpected replicas {}", service.replicas);

    let literal = to_anyhow(resolver.get_in(&LiteralPathKey, "dev/staging"))?;
    ensure!(literal == service, "literal lookup disagrees with scope lookup");
    Ok(())
}

#[rstest]
fn scope_without_path_key_fails_lookup() -> Result<()> {
    let mut tree = ScopeTree::new();
    let app = tree.root("app");
    let orphan = to_anyhow(tree.child(app, "orphan"))?;

    let mut resolver = service_resolver()?;
    resolver.set_default(json!({"name": "svc"}));

    let Err(err) = resolver.get_in(&tree, &orphan) else {
        anyhow::bail!("lookup should fail without a path key");
    };
    ensure!(
        matches!(&*err, StratumError::Lookup { .. }),
        "lookup errors must propagate unchanged, got {err:?}"
    );
    ensure!(err.to_string().contains("app/orphan"), "error should name the scope: {err}");
    Ok(())
}
