//! Compatibility comparison engine.
//!
//! Walks an older and a newer model top-down (project, package, node) and
//! stops at the first violation. Every map is a `BTreeMap`, so the violation
//! reported for a given pair of projects is always the same one.
//!
//! Rules are asymmetric: anything present in the older model must survive in
//! the newer one, while additions (packages, declarations, struct fields,
//! interface methods) are free. Ordered clauses must keep their exact length.

use std::time::Instant;

use crate::compat::violation::{Clause, CompatReport, Mismatch, MismatchReason, Violation};
use crate::model::{Func, Node, Package, Project, VARIADIC_PREFIX};
use crate::{log_op_end, log_op_start};

/// Name equality with variadic widening.
///
/// `T` may become `...T`: every call site written against the fixed
/// parameter still type-checks. The reverse is a narrowing and fails.
pub fn names_match(older: &str, newer: &str) -> bool {
    older == newer
        || newer
            .strip_prefix(VARIADIC_PREFIX)
            .is_some_and(|base| base == older)
}

/// Compare two projects and report the first violation found.
pub fn check_compat(older: &Project, newer: &Project) -> CompatReport {
    let start = Instant::now();
    log_op_start!(
        "check_compat",
        package_count = older.packages.len(),
        symbol_count = older.symbol_count()
    );

    let mut tally = Tally::default();
    let result = tally.project(older, newer);
    let report = CompatReport {
        compatible: result.is_ok(),
        violation: result.err(),
        packages_checked: tally.packages,
        symbols_checked: tally.symbols,
    };

    if let Some(violation) = &report.violation {
        tracing::debug!(
            kind = violation.kind.code(),
            package = %violation.package,
            symbol = violation.symbol.as_deref().unwrap_or(""),
            "compatibility violation: {}",
            violation
        );
    }
    log_op_end!(
        "check_compat",
        duration_ms = start.elapsed().as_millis() as u64,
        compatible = report.compatible
    );
    report
}

pub(crate) fn check_project(older: &Project, newer: &Project) -> Result<(), Violation> {
    Tally::default().project(older, newer)
}

pub(crate) fn check_package(older: &Package, newer: &Package) -> Result<(), Violation> {
    Tally::default().package(older, newer)
}

/// Node-level rule dispatch.
///
/// # Errors
///
/// Returns the first [`Mismatch`] found, with the member path leading to it.
pub fn check_node(older: &Node, newer: &Node) -> Result<(), Mismatch> {
    NodeWalk::default().node(older, newer)
}

/// Counts what was visited before the verdict.
#[derive(Default)]
struct Tally {
    packages: usize,
    symbols: usize,
}

impl Tally {
    fn project(&mut self, older: &Project, newer: &Project) -> Result<(), Violation> {
        for (name, older_pkg) in &older.packages {
            let newer_pkg = newer
                .packages
                .get(name)
                .ok_or_else(|| Violation::package_missing(name))?;
            if older_pkg.name != newer_pkg.name {
                return Err(Violation::package_corrupted(
                    name,
                    &older_pkg.name,
                    &newer_pkg.name,
                ));
            }
            self.package(older_pkg, newer_pkg)?;
        }
        Ok(())
    }

    fn package(&mut self, older: &Package, newer: &Package) -> Result<(), Violation> {
        self.packages += 1;
        for (name, older_node) in &older.nodes {
            self.symbols += 1;
            let newer_node = newer
                .nodes
                .get(name)
                .ok_or_else(|| Violation::definition_missing(&older.name, name))?;
            check_node(older_node, newer_node)
                .map_err(|mismatch| Violation::corrupted_symbol(&older.name, name, mismatch))?;
        }
        Ok(())
    }
}

/// Recursive walk that remembers the member path for diagnostics.
#[derive(Default)]
struct NodeWalk {
    path: Vec<String>,
}

impl NodeWalk {
    fn fail(&self, reason: MismatchReason) -> Mismatch {
        Mismatch {
            path: self.path.clone(),
            reason,
        }
    }

    fn name(&self, older: &str, newer: &str) -> Result<(), Mismatch> {
        if names_match(older, newer) {
            Ok(())
        } else {
            Err(self.fail(MismatchReason::NameMismatch {
                older: older.to_string(),
                newer: newer.to_string(),
            }))
        }
    }

    fn nested(
        &mut self,
        segment: String,
        older: &Node,
        newer: &Node,
    ) -> Result<(), Mismatch> {
        self.path.push(segment);
        let result = self.node(older, newer);
        self.path.pop();
        result
    }

    fn node(&mut self, older: &Node, newer: &Node) -> Result<(), Mismatch> {
        match (older, newer) {
            (Node::SimpleType(o), Node::SimpleType(n)) => self.name(&o.name, &n.name),
            (Node::Field(o), Node::Field(n)) => {
                self.name(&o.name, &n.name)?;
                self.node(&o.ty, &n.ty)
            }
            (Node::TypeDef(o), Node::TypeDef(n)) => {
                self.name(&o.name, &n.name)?;
                self.node(&o.ty, &n.ty)
            }
            (Node::Var(o), Node::Var(n)) => {
                self.name(&o.name, &n.name)?;
                self.node(&o.ty, &n.ty)
            }
            (Node::Struct(o), Node::Struct(n)) => {
                for (name, older_field) in &o.fields {
                    let newer_field = n.fields.get(name).ok_or_else(|| {
                        self.fail(MismatchReason::MemberMissing {
                            member: name.clone(),
                        })
                    })?;
                    self.path.push(format!("field {}", name));
                    let result = self
                        .name(&older_field.name, &newer_field.name)
                        .and_then(|()| self.node(&older_field.ty, &newer_field.ty));
                    self.path.pop();
                    result?;
                }
                Ok(())
            }
            (Node::Interface(o), Node::Interface(n)) => {
                for (name, older_method) in &o.methods {
                    let newer_method = n.methods.get(name).ok_or_else(|| {
                        self.fail(MismatchReason::MemberMissing {
                            member: name.clone(),
                        })
                    })?;
                    self.path.push(format!("method {}", name));
                    let result = self.func(older_method, newer_method);
                    self.path.pop();
                    result?;
                }
                Ok(())
            }
            (Node::Params(o), Node::Params(n)) => self.list(Clause::Params, &o.types, &n.types),
            (Node::Results(o), Node::Results(n)) => {
                self.list(Clause::Results, &o.types, &n.types)
            }
            (Node::Receivers(o), Node::Receivers(n)) => {
                self.list(Clause::Receivers, &o.types, &n.types)
            }
            (Node::Func(o), Node::Func(n)) => self.func(o, n),
            (o, n) => Err(self.fail(MismatchReason::KindMismatch {
                older: o.kind(),
                newer: n.kind(),
            })),
        }
    }

    fn func(&mut self, older: &Func, newer: &Func) -> Result<(), Mismatch> {
        self.name(&older.name, &newer.name)?;
        self.clause(
            Clause::Receivers,
            older.receivers.as_ref().map(|r| r.types.as_slice()),
            newer.receivers.as_ref().map(|r| r.types.as_slice()),
        )?;
        self.clause(
            Clause::Params,
            older.params.as_ref().map(|p| p.types.as_slice()),
            newer.params.as_ref().map(|p| p.types.as_slice()),
        )?;
        self.clause(
            Clause::Results,
            older.results.as_ref().map(|r| r.types.as_slice()),
            newer.results.as_ref().map(|r| r.types.as_slice()),
        )
    }

    fn clause(
        &mut self,
        clause: Clause,
        older: Option<&[Node]>,
        newer: Option<&[Node]>,
    ) -> Result<(), Mismatch> {
        match (older, newer) {
            (None, None) => Ok(()),
            (Some(o), Some(n)) => self.list(clause, o, n),
            (o, n) => Err(self.fail(MismatchReason::ClauseMismatch {
                clause,
                older_present: o.is_some(),
                newer_present: n.is_some(),
            })),
        }
    }

    fn list(&mut self, clause: Clause, older: &[Node], newer: &[Node]) -> Result<(), Mismatch> {
        if older.len() != newer.len() {
            return Err(self.fail(MismatchReason::ArityMismatch {
                clause,
                older: older.len(),
                newer: newer.len(),
            }));
        }
        for (index, (o, n)) in older.iter().zip(newer).enumerate() {
            self.nested(format!("{}[{}]", clause.label(), index), o, n)?;
        }
        Ok(())
    }
}
