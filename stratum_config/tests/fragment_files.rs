//! Integration tests for loading override fragments from disk.

mod common;

use anyhow::{Result, ensure};
use camino::Utf8PathBuf;
use common::{service_resolver, to_anyhow};
use rstest::{fixture, rstest};
use serde_json::json;
use stratum_config::{StratumError, load_fragment};
use tempfile::TempDir;

struct FragmentDir {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl FragmentDir {
    fn write(&self, name: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.root.join(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}

#[fixture]
fn fragments() -> FragmentDir {
    let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
        .unwrap_or_else(|path| panic!("non UTF-8 temp path: {}", path.display()));
    FragmentDir { _dir: dir, root }
}

#[rstest]
fn json_fragment_is_loaded(fragments: FragmentDir) -> Result<()> {
    let path = fragments.write("dev.json", r#"{"name": "svc", "tags": ["a"]}"#)?;
    let fragment = to_anyhow(load_fragment(&path))?;
    ensure!(
        fragment == json!({"name": "svc", "tags": ["a"]}),
        "unexpected fragment {fragment}"
    );
    Ok(())
}

#[cfg(feature = "toml")]
#[rstest]
fn toml_fragment_is_loaded(fragments: FragmentDir) -> Result<()> {
    let path = fragments.write("staging.toml", "replicas = 3\n\n[limits]\ncpu = \"2\"\n")?;
    let fragment = to_anyhow(load_fragment(&path))?;
    ensure!(
        fragment == json!({"replicas": 3, "limits": {"cpu": "2"}}),
        "unexpected fragment {fragment}"
    );
    Ok(())
}

#[cfg(feature = "toml")]
#[rstest]
fn toml_keys_keep_document_order_through_merges(fragments: FragmentDir) -> Result<()> {
    let path = fragments.write("order.toml", "zeta = 1\nalpha = 2\n")?;
    let fragment = to_anyhow(load_fragment(&path))?;
    let keys: Vec<&str> = fragment
        .as_object()
        .map(|map| map.keys().map(String::as_str).collect())
        .unwrap_or_default();
    ensure!(keys == ["zeta", "alpha"], "unexpected key order {keys:?}");

    let merged = stratum_config::deep_merge(&json!({"mid": 0}), &fragment);
    let merged_keys: Vec<&str> = merged
        .as_object()
        .map(|map| map.keys().map(String::as_str).collect())
        .unwrap_or_default();
    ensure!(
        merged_keys == ["mid", "zeta", "alpha"],
        "unexpected merged key order {merged_keys:?}"
    );
    Ok(())
}

#[rstest]
fn files_merge_with_set_semantics(fragments: FragmentDir) -> Result<()> {
    let first = fragments.write("dev-a.json", r#"{"name": "svc"}"#)?;
    let second = fragments.write("dev-b.json", r#"{"replicas": 5}"#)?;

    let mut resolver = service_resolver()?;
    to_anyhow(resolver.set_from_file("dev", &first))?;
    to_anyhow(resolver.set_from_file("dev", &second))?;

    ensure!(
        resolver.override_for("dev") == Some(&json!({"name": "svc", "replicas": 5})),
        "second file should merge into the first"
    );
    let service = to_anyhow(resolver.get("dev/staging"))?;
    ensure!(service.replicas == 5, "unexpected replicas {}", service.replicas);
    Ok(())
}

#[rstest]
#[case::unsupported_extension("dev.yaml", "name: svc\n")]
#[case::malformed_json("dev.json", "{\"name\": ")]
fn unreadable_fragments_leave_resolver_untouched(
    fragments: FragmentDir,
    #[case] name: &str,
    #[case] contents: &str,
) -> Result<()> {
    let path = fragments.write(name, contents)?;
    let mut resolver = service_resolver()?;
    let Err(err) = resolver.set_from_file("dev", &path) else {
        anyhow::bail!("loading {name} should fail");
    };
    ensure!(
        matches!(&*err, StratumError::File { .. }),
        "expected a file error, got {err:?}"
    );
    ensure!(resolver.override_for("dev").is_none(), "override registered on failure");
    Ok(())
}

#[rstest]
fn missing_file_reports_its_path(fragments: FragmentDir) -> Result<()> {
    let path = fragments.root.join("absent.json");
    let Err(err) = load_fragment(&path) else {
        anyhow::bail!("missing file should fail");
    };
    ensure!(
        err.to_string().contains("absent.json"),
        "error should name the file: {err}"
    );
    Ok(())
}
