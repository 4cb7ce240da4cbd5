//! A scope tree whose nodes inherit path keys from their ancestors.
//!
//! Infrastructure definitions are usually organised as a tree (an app holds
//! stacks, a stack holds services). Assigning a path key to a scope makes
//! every descendant resolve configuration for that key unless it sets its
//! own. [`ScopeTree`] implements [`PathKeyLookup`] so a resolver can be
//! queried with a [`ScopeId`] instead of a literal key.
//!
//! # Example
//!
//! ```rust
//! use stratum_config::scope::ScopeTree;
//! use stratum_config::PathKeyLookup;
//!
//! let mut tree = ScopeTree::new();
//! let app = tree.root("app");
//! let staging = tree.child(app, "staging")?;
//! let api = tree.child(staging, "api")?;
//! tree.set_path_key(staging, "dev/staging")?;
//!
//! assert_eq!(tree.resolve(&api)?, "dev/staging");
//! assert_eq!(tree.qualified_name(api).as_deref(), Some("app/staging/api"));
//! # Ok::<_, std::sync::Arc<stratum_config::StratumError>>(())
//! ```

use crate::resolver::PathKeyLookup;
use crate::{StratumError, StratumResult};

/// Handle to a scope inside a [`ScopeTree`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ScopeId(usize);

#[derive(Debug)]
struct ScopeNode {
    name: String,
    parent: Option<ScopeId>,
    path_key: Option<String>,
}

/// Arena of named scopes with optional, inherited path keys.
#[derive(Debug, Default)]
pub struct ScopeTree {
    nodes: Vec<ScopeNode>,
}

impl ScopeTree {
    /// An empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    fn node(&self, scope: ScopeId) -> StratumResult<&ScopeNode> {
        self.nodes
            .get(scope.0)
            .ok_or_else(|| StratumError::lookup(format!("scope #{}", scope.0), "unknown scope"))
    }

    fn push(&mut self, name: String, parent: Option<ScopeId>) -> ScopeId {
        let id = ScopeId(self.nodes.len());
        self.nodes.push(ScopeNode {
            name,
            parent,
            path_key: None,
        });
        id
    }

    /// Add a scope without a parent.
    pub fn root(&mut self, name: impl Into<String>) -> ScopeId {
        self.push(name.into(), None)
    }

    /// Add a scope under `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::Lookup`] when `parent` does not belong to this
    /// tree.
    pub fn child(&mut self, parent: ScopeId, name: impl Into<String>) -> StratumResult<ScopeId> {
        self.node(parent)?;
        Ok(self.push(name.into(), Some(parent)))
    }

    /// Assign `path_key` to `scope`, replacing any earlier assignment.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::Lookup`] when `scope` does not belong to this
    /// tree.
    pub fn set_path_key(
        &mut self,
        scope: ScopeId,
        path_key: impl Into<String>,
    ) -> StratumResult<&mut Self> {
        let node = self.nodes.get_mut(scope.0).ok_or_else(|| {
            StratumError::lookup(format!("scope #{}", scope.0), "unknown scope")
        })?;
        node.path_key = Some(path_key.into());
        Ok(self)
    }

    /// The parent of `scope`, if any.
    #[must_use]
    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.nodes.get(scope.0).and_then(|node| node.parent)
    }

    /// The path key assigned directly to `scope`, ignoring ancestors.
    #[must_use]
    pub fn own_path_key(&self, scope: ScopeId) -> Option<&str> {
        self.nodes
            .get(scope.0)
            .and_then(|node| node.path_key.as_deref())
    }

    /// The path key of the nearest scope, starting at `scope` itself, that
    /// has one.
    #[must_use]
    pub fn effective_path_key(&self, scope: ScopeId) -> Option<&str> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let node = self.nodes.get(id.0)?;
            if let Some(key) = node.path_key.as_deref() {
                return Some(key);
            }
            current = node.parent;
        }
        None
    }

    /// The `/`-joined names from the outermost ancestor down to `scope`.
    #[must_use]
    pub fn qualified_name(&self, scope: ScopeId) -> Option<String> {
        let mut names = Vec::new();
        let mut current = Some(scope);
        while let Some(id) = current {
            let node = self.nodes.get(id.0)?;
            names.push(node.name.as_str());
            current = node.parent;
        }
        names.reverse();
        Some(names.join("/"))
    }
}

impl PathKeyLookup<ScopeId> for ScopeTree {
    fn resolve(&self, context: &ScopeId) -> StratumResult<String> {
        self.node(*context)?;
        self.effective_path_key(*context)
            .map(str::to_owned)
            .ok_or_else(|| {
                let name = self.qualified_name(*context).unwrap_or_default();
                StratumError::lookup(
                    format!("scope '{name}'"),
                    "no path key is set on the scope or any of its ancestors",
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    struct Tree {
        tree: ScopeTree,
        app: ScopeId,
        staging: ScopeId,
        api: ScopeId,
        worker: ScopeId,
    }

    #[fixture]
    fn tree() -> Tree {
        let mut tree = ScopeTree::new();
        let app = tree.root("app");
        let staging = tree.child(app, "staging").expect("app exists");
        let api = tree.child(staging, "api").expect("staging exists");
        let worker = tree.child(staging, "worker").expect("staging exists");
        Tree {
            tree,
            app,
            staging,
            api,
            worker,
        }
    }

    #[rstest]
    fn descendants_inherit_the_nearest_key(tree: Tree) {
        let mut t = tree;
        t.tree
            .set_path_key(t.app, "dev")
            .and_then(|tree| tree.set_path_key(t.worker, "dev/staging/worker"))
            .expect("scopes exist");

        assert_eq!(t.tree.resolve(&t.api).ok().as_deref(), Some("dev"));
        assert_eq!(
            t.tree.resolve(&t.worker).ok().as_deref(),
            Some("dev/staging/worker")
        );
        assert_eq!(t.tree.own_path_key(t.staging), None);
        assert_eq!(t.tree.parent(t.api), Some(t.staging));
    }

    #[rstest]
    fn unassigned_scope_is_a_lookup_error(tree: Tree) {
        let err = tree.tree.resolve(&tree.api).expect_err("no key anywhere");
        match &*err {
            StratumError::Lookup { context, .. } => assert_eq!(context, "scope 'app/staging/api'"),
            other => panic!("expected Lookup, got {other:?}"),
        }
    }

    #[test]
    fn foreign_scope_ids_are_rejected() {
        let mut other = ScopeTree::new();
        other.root("a");
        let b = other.root("b");
        let foreign = other.child(b, "c").expect("b exists");

        let mut tree = ScopeTree::new();
        tree.root("only");
        assert!(tree.resolve(&foreign).is_err());
        assert!(tree.child(foreign, "x").is_err());
        assert!(tree.set_path_key(foreign, "dev").is_err());
        assert_eq!(tree.qualified_name(foreign), None);
    }
}
