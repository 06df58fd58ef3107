//! Package and project containers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::compat::engine::{check_package, check_project};
use crate::model::node::Node;

/// All exported declarations of one package, aggregated across its files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    #[serde(default)]
    pub nodes: BTreeMap<String, Node>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: BTreeMap::new(),
        }
    }

    /// Insert a named declaration under its own name.
    ///
    /// Returns the node it replaced, if any (last write wins). Nodes without
    /// a declared name are not insertable and are handed back as `Err`.
    pub fn insert(&mut self, node: Node) -> Result<Option<Node>, Node> {
        match node.declared_name() {
            Some(name) => {
                let key = name.to_string();
                Ok(self.nodes.insert(key, node))
            }
            None => Err(node),
        }
    }

    /// Builder-style [`Package::insert`].
    ///
    /// `node` must be a declaration (`TypeDef`, `Func` or `Var`); anything
    /// else trips a debug assertion and is not recorded.
    pub fn with_node(mut self, node: impl Into<Node>) -> Self {
        let inserted = self.insert(node.into());
        debug_assert!(
            inserted.is_ok(),
            "Package::with_node called with an unnamed node"
        );
        self
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if `newer` keeps every declaration of `self` compatible.
    pub fn compare(&self, newer: &Package) -> bool {
        check_package(self, newer).is_ok()
    }
}

/// Root snapshot: every package of the project by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub packages: BTreeMap<String, Package>,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    /// Package by name, created empty on first sight.
    pub fn package_mut(&mut self, name: &str) -> &mut Package {
        self.packages
            .entry(name.to_string())
            .or_insert_with(|| Package::new(name))
    }

    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    /// Builder-style package insert, keyed by the package's own name.
    pub fn with_package(mut self, package: Package) -> Self {
        self.packages.insert(package.name.clone(), package);
        self
    }

    /// Total number of declarations across all packages.
    pub fn symbol_count(&self) -> usize {
        self.packages.values().map(Package::len).sum()
    }

    /// Fold a separately extracted project into this one.
    ///
    /// Packages are unioned; within a package, nodes from `other` overwrite
    /// same-named nodes already present.
    pub fn merge(&mut self, other: Project) {
        for (name, package) in other.packages {
            let target = self.package_mut(&name);
            target.nodes.extend(package.nodes);
        }
    }

    /// Returns true if `newer` is a compatible evolution of `self`.
    pub fn compare(&self, newer: &Project) -> bool {
        check_project(self, newer).is_ok()
    }
}
