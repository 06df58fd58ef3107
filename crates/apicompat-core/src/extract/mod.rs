//! Extractor: folds declaration descriptors into an interface model.
//!
//! Extraction never fails: a declaration whose shape cannot be expressed is
//! omitted and the rest of the file is still recorded. Only names passing the configured visibility predicate
//! reach the package map.
//!
//! # Example
//!
//! ```
//! use apicompat_core::decl::{Declaration, SourceFile, TypeExpr, TypeSpec};
//! use apicompat_core::extract::ExtractorConfig;
//! use apicompat_core::model::{Node, Project};
//!
//! let file = SourceFile::new(vec![
//!     Declaration::package("p"),
//!     Declaration::Type(TypeSpec { name: "MyInt".into(), ty: TypeExpr::ident("int") }),
//!     Declaration::Type(TypeSpec { name: "hidden".into(), ty: TypeExpr::ident("int") }),
//! ]);
//!
//! let mut project = Project::new();
//! project.extract_file(&file, &ExtractorConfig::default());
//!
//! let package = project.package("p").unwrap();
//! assert_eq!(package.len(), 1);
//! assert!(package.get("MyInt").is_some());
//! ```

mod config;
mod shape;

use std::time::Instant;

pub use config::{is_exported, ExtractorConfig, MemberVisibility, Visibility};

use crate::decl::{Declaration, FuncDecl, SourceFile, TypeSpec, ValueSpec};
use crate::model::{Func, Node, Project, TypeDef, Var};
use crate::{log_op_end, log_op_start};
use shape::{receiver_base, Shaper};

/// Counters for one extraction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Declarations seen, including package clauses
    pub declarations: usize,
    /// Nodes written into the project
    pub recorded: usize,
    /// Nodes that overwrote a same-named node
    pub replaced: usize,
    /// Names rejected by the visibility predicate
    pub private: usize,
    /// Names dropped because their shape could not be expressed
    pub degraded: usize,
    /// Declarations seen before any package clause
    pub orphaned: usize,
}

/// Walks declarations and records exported ones into a [`Project`].
pub struct Extractor<'p> {
    project: &'p mut Project,
    config: ExtractorConfig,
    package: Option<String>,
    stats: ExtractStats,
}

impl<'p> Extractor<'p> {
    pub fn new(project: &'p mut Project, config: ExtractorConfig) -> Self {
        Self {
            project,
            config,
            package: None,
            stats: ExtractStats::default(),
        }
    }

    /// Counters accumulated over every file extracted so far.
    pub fn stats(&self) -> ExtractStats {
        self.stats
    }

    /// Record every exported declaration of `file`.
    ///
    /// The package binding is per file: declarations before the file's
    /// package clause are skipped.
    pub fn extract_file(&mut self, file: &SourceFile) -> ExtractStats {
        let start = Instant::now();
        let source_path = file.path.as_deref().unwrap_or("<memory>");
        log_op_start!(
            "extract_file",
            source_path = source_path,
            declaration_count = file.declarations.len()
        );

        let before = self.stats;
        self.package = None;
        for declaration in &file.declarations {
            self.declaration(declaration);
        }
        self.package = None;

        let delta = ExtractStats {
            declarations: self.stats.declarations - before.declarations,
            recorded: self.stats.recorded - before.recorded,
            replaced: self.stats.replaced - before.replaced,
            private: self.stats.private - before.private,
            degraded: self.stats.degraded - before.degraded,
            orphaned: self.stats.orphaned - before.orphaned,
        };
        log_op_end!(
            "extract_file",
            duration_ms = start.elapsed().as_millis() as u64,
            source_path = source_path,
            symbol_count = delta.recorded
        );
        delta
    }

    fn declaration(&mut self, declaration: &Declaration) {
        self.stats.declarations += 1;
        if let Declaration::Package { name } = declaration {
            self.project.package_mut(name);
            self.package = Some(name.clone());
            return;
        }
        if self.package.is_none() {
            self.stats.orphaned += 1;
            tracing::warn!(
                declaration = ?declaration,
                "declaration before package clause; skipped"
            );
            return;
        }

        match declaration {
            Declaration::Package { .. } => {}
            Declaration::Type(spec) => self.type_spec(spec),
            Declaration::Func(decl) => self.func_decl(decl),
            Declaration::Value(spec) => self.value_spec(spec),
            Declaration::Unrecognized => {
                self.stats.degraded += 1;
                tracing::debug!(
                    package = self.package.as_deref().unwrap_or(""),
                    "unrecognized declaration; skipped"
                );
            }
        }
    }

    fn type_spec(&mut self, spec: &TypeSpec) {
        if !self.is_public(&spec.name) {
            return;
        }
        let shape = Shaper::new(&self.config).shape(&spec.ty);
        match shape {
            Some(shape) => self.record(TypeDef::new(spec.name.as_str(), shape).into()),
            None => self.degraded(&spec.name),
        }
    }

    fn func_decl(&mut self, decl: &FuncDecl) {
        if !self.is_public(&decl.name) {
            return;
        }
        // Methods live under `Receiver.Name` so that same-named methods on
        // different types stay distinct.
        let name = match decl.receiver.as_deref() {
            None => decl.name.clone(),
            Some(groups) => match receiver_base(groups) {
                Some(base) => method_key(base, &decl.name),
                None => return self.degraded(&decl.name),
            },
        };
        let shaper = Shaper::new(&self.config);
        let (params, results) = shaper.signature(&decl.signature);
        let receivers = decl.receiver.as_deref().map(|groups| shaper.receivers(groups));
        self.record(
            Func {
                name,
                receivers,
                params,
                results,
            }
            .into(),
        );
    }

    fn value_spec(&mut self, spec: &ValueSpec) {
        for (index, name) in spec.names.iter().enumerate() {
            if !self.is_public(name) {
                continue;
            }
            let shaper = Shaper::new(&self.config);
            let ty = match &spec.ty {
                Some(ty) => shaper.shape(ty),
                None => spec.values.get(index).and_then(|value| shaper.infer(value)),
            };
            match ty {
                Some(ty) => self.record(Var::new(name.as_str(), ty).into()),
                None => self.degraded(name),
            }
        }
    }

    fn is_public(&mut self, name: &str) -> bool {
        let public = self.config.records_declaration(name);
        if !public {
            self.stats.private += 1;
        }
        public
    }

    fn degraded(&mut self, name: &str) {
        self.stats.degraded += 1;
        tracing::debug!(
            package = self.package.as_deref().unwrap_or(""),
            symbol = name,
            "shape not representable; declaration omitted"
        );
    }

    fn record(&mut self, node: Node) {
        let Some(package) = self.package.as_deref() else {
            return;
        };
        match self.project.package_mut(package).insert(node) {
            Ok(None) => self.stats.recorded += 1,
            Ok(Some(previous)) => {
                self.stats.recorded += 1;
                self.stats.replaced += 1;
                tracing::debug!(
                    package = package,
                    symbol = previous.declared_name().unwrap_or(""),
                    "duplicate declaration; last one wins"
                );
            }
            Err(node) => {
                tracing::warn!(package = package, node = ?node.kind(), "unnamed node not recorded");
            }
        }
    }
}

/// Package-map key of method `method` declared on `receiver`: `Stack.Len`
/// for both `func (s Stack) Len()` and `func (s *Stack) Len()`.
pub fn method_key(receiver: &str, method: &str) -> String {
    format!("{receiver}.{method}")
}

impl Project {
    /// Extract one file into this project with `config`.
    pub fn extract_file(&mut self, file: &SourceFile, config: &ExtractorConfig) -> ExtractStats {
        Extractor::new(self, *config).extract_file(file)
    }
}

/// Extract a set of files into a fresh project.
pub fn extract_project<'a>(
    files: impl IntoIterator<Item = &'a SourceFile>,
    config: &ExtractorConfig,
) -> Project {
    let mut project = Project::new();
    let mut extractor = Extractor::new(&mut project, *config);
    for file in files {
        extractor.extract_file(file);
    }
    project
}
