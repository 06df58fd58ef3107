//! Compatibility verdict types.
//!
//! All types are serializable so surrounding tooling can emit the verdict as
//! JSON next to its exit code.

use serde::{Deserialize, Serialize};

use crate::model::NodeKind;

/// Ordered signature clause of a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Clause {
    Receivers,
    Params,
    Results,
}

impl Clause {
    pub fn label(&self) -> &'static str {
        match self {
            Clause::Receivers => "receivers",
            Clause::Params => "params",
            Clause::Results => "results",
        }
    }
}

/// Why two nodes under the same name are not compatible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum MismatchReason {
    /// Different node variants (e.g. a type became a variable)
    KindMismatch { older: NodeKind, newer: NodeKind },
    /// Names differ beyond the variadic widening allowance
    NameMismatch { older: String, newer: String },
    /// A struct field or interface method present before is gone
    MemberMissing { member: String },
    /// An ordered clause changed length
    ArityMismatch {
        clause: Clause,
        older: usize,
        newer: usize,
    },
    /// A clause appeared or disappeared
    ClauseMismatch {
        clause: Clause,
        older_present: bool,
        newer_present: bool,
    },
}

impl std::fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MismatchReason::KindMismatch { older, newer } => {
                write!(f, "{} became {}", older, newer)
            }
            MismatchReason::NameMismatch { older, newer } => {
                write!(f, "'{}' changed to '{}'", older, newer)
            }
            MismatchReason::MemberMissing { member } => write!(f, "member {} is missing", member),
            MismatchReason::ArityMismatch {
                clause,
                older,
                newer,
            } => write!(
                f,
                "{} count changed from {} to {}",
                clause.label(),
                older,
                newer
            ),
            MismatchReason::ClauseMismatch {
                clause,
                older_present,
                newer_present,
            } => {
                let state = |present: bool| if present { "present" } else { "absent" };
                write!(
                    f,
                    "{} clause was {}, now {}",
                    clause.label(),
                    state(*older_present),
                    state(*newer_present)
                )
            }
        }
    }
}

/// A node-level incompatibility with the member path that leads to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub path: Vec<String>,
    pub reason: MismatchReason,
}

/// Classification of the first violation found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    PackageMissing,
    PackageCorrupted,
    DefinitionMissing,
    CorruptedSymbol,
}

impl ViolationKind {
    /// Stable code for machine consumers
    pub fn code(&self) -> &'static str {
        match self {
            ViolationKind::PackageMissing => "PACKAGE_MISSING",
            ViolationKind::PackageCorrupted => "PACKAGE_CORRUPTED",
            ViolationKind::DefinitionMissing => "DEFINITION_MISSING",
            ViolationKind::CorruptedSymbol => "CORRUPTED_SYMBOL",
        }
    }
}

/// First incompatibility found between two projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub package: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<MismatchReason>,
}

impl Violation {
    pub fn package_missing(package: &str) -> Self {
        Self {
            kind: ViolationKind::PackageMissing,
            package: package.to_string(),
            symbol: None,
            path: Vec::new(),
            reason: None,
        }
    }

    pub fn package_corrupted(package: &str, older: &str, newer: &str) -> Self {
        Self {
            kind: ViolationKind::PackageCorrupted,
            package: package.to_string(),
            symbol: None,
            path: Vec::new(),
            reason: Some(MismatchReason::NameMismatch {
                older: older.to_string(),
                newer: newer.to_string(),
            }),
        }
    }

    pub fn definition_missing(package: &str, symbol: &str) -> Self {
        Self {
            kind: ViolationKind::DefinitionMissing,
            package: package.to_string(),
            symbol: Some(symbol.to_string()),
            path: Vec::new(),
            reason: None,
        }
    }

    pub fn corrupted_symbol(package: &str, symbol: &str, mismatch: Mismatch) -> Self {
        Self {
            kind: ViolationKind::CorruptedSymbol,
            package: package.to_string(),
            symbol: Some(symbol.to_string()),
            path: mismatch.path,
            reason: Some(mismatch.reason),
        }
    }

    /// `package.Symbol`, or just the package when no symbol is involved.
    pub fn qualified_symbol(&self) -> String {
        match &self.symbol {
            Some(symbol) => format!("{}.{}", self.package, symbol),
            None => self.package.clone(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ViolationKind::PackageMissing => write!(f, "package {} is missing", self.package)?,
            ViolationKind::PackageCorrupted => {
                write!(f, "package {} is corrupted", self.package)?
            }
            ViolationKind::DefinitionMissing => {
                write!(f, "definition of {} is missing", self.qualified_symbol())?
            }
            ViolationKind::CorruptedSymbol => {
                write!(f, "corrupted symbol {}", self.qualified_symbol())?;
                if !self.path.is_empty() {
                    write!(f, " at {}", self.path.join(" > "))?;
                }
            }
        }
        if let Some(reason) = &self.reason {
            write!(f, ": {}", reason)?;
        }
        Ok(())
    }
}

/// Result of comparing an older project against a newer one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatReport {
    pub compatible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violation: Option<Violation>,
    /// Packages of the older project visited before the verdict
    pub packages_checked: usize,
    /// Declarations of the older project visited before the verdict
    pub symbols_checked: usize,
}

impl CompatReport {
    /// One-line diagnostic of the first violation, if any.
    pub fn diagnostic(&self) -> Option<String> {
        self.violation.as_ref().map(ToString::to_string)
    }
}
