//! Snapshot workflow: compare the fresh project against the last accepted
//! one and decide whether to persist it.
//!
//! [`decide`] is the pure decision; [`run_check`] wires it to a
//! [`SnapshotStore`]. Mapping the outcome to an exit code or console text is
//! left to the embedding tool ([`CheckOutcome::is_success`]).

use std::time::Instant;

use apicompat_core_types::RunId;

use crate::compat::{check_compat, Violation};
use crate::errors::{ExError, Result};
use crate::model::Project;
use crate::snapshot::{decode_snapshot, encode_snapshot, SnapshotStore};
use crate::{log_op_end, log_op_error, log_op_start};

/// What to do with an unreadable or corrupt stored snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Treat it as absent and carry on; the outcome records why
    #[default]
    Conservative,
    /// Fail the run
    Strict,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Persist the current project even when it is incompatible
    pub force: bool,
    pub load_policy: LoadPolicy,
}

impl CheckOptions {
    pub fn forced() -> Self {
        Self {
            force: true,
            ..Self::default()
        }
    }

    pub fn strict() -> Self {
        Self {
            load_policy: LoadPolicy::Strict,
            ..Self::default()
        }
    }
}

/// Verdict of one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub compatible: bool,
    pub violation: Option<Violation>,
    /// Whether the current project should replace the stored snapshot
    pub persist: bool,
}

impl Decision {
    pub fn diagnostic(&self) -> Option<String> {
        self.violation.as_ref().map(ToString::to_string)
    }
}

/// Decide the verdict for `current` given the previously accepted project.
///
/// Without a previous project the current one is accepted unconditionally.
/// An incompatible project is persisted only when `force` is set.
///
/// # Example
///
/// ```
/// use apicompat_core::model::{Func, Package, Project};
/// use apicompat_core::workflow::decide;
///
/// let older = Project::new().with_package(Package::new("p").with_node(Func::new("Run")));
/// let newer = Project::new().with_package(Package::new("p"));
///
/// assert!(decide(None, &newer, false).persist);
///
/// let rejected = decide(Some(&older), &newer, false);
/// assert!(!rejected.compatible);
/// assert!(!rejected.persist);
/// assert!(decide(Some(&older), &newer, true).persist);
/// ```
pub fn decide(previous: Option<&Project>, current: &Project, force: bool) -> Decision {
    let Some(previous) = previous else {
        return Decision {
            compatible: true,
            violation: None,
            persist: true,
        };
    };
    let report = check_compat(previous, current);
    Decision {
        compatible: report.compatible,
        persist: report.compatible || force,
        violation: report.violation,
    }
}

/// How the stored snapshot was found at the start of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviousSnapshot {
    Absent,
    Loaded,
    /// Stored bytes could not be loaded or decoded; the reason is kept
    Unreadable(String),
}

/// Result of [`run_check`].
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub run_id: RunId,
    pub decision: Decision,
    pub previous: PreviousSnapshot,
    /// True when the store now holds `project`
    pub persisted: bool,
    pub project: Project,
}

impl CheckOutcome {
    /// Compatible runs succeed; incompatible ones fail even when forced.
    pub fn is_success(&self) -> bool {
        self.decision.compatible
    }
}

/// Load the previous snapshot, decide, and persist when the decision says so.
///
/// # Errors
///
/// Store failures while saving are always errors. Load and decode failures
/// are errors only under [`LoadPolicy::Strict`]. Every error carries the
/// run id.
pub fn run_check(
    store: &mut dyn SnapshotStore,
    current: Project,
    options: &CheckOptions,
) -> Result<CheckOutcome> {
    let start = Instant::now();
    let run_id = RunId::new();
    log_op_start!(
        "run_check",
        run_id = %run_id,
        package_count = current.packages.len(),
        symbol_count = current.symbol_count(),
        force = options.force
    );

    let fail = |err: ExError| {
        let err = err.with_run_id(run_id.clone());
        log_op_error!(
            "run_check",
            err.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            run_id = %run_id
        );
        err
    };

    let (previous, status) = match load_previous(store) {
        Ok(Some(project)) => (Some(project), PreviousSnapshot::Loaded),
        Ok(None) => (None, PreviousSnapshot::Absent),
        Err(err) if options.load_policy == LoadPolicy::Conservative => {
            tracing::warn!(
                run_id = %run_id,
                err_code = err.code(),
                "stored snapshot unreadable; treating as absent: {}",
                err
            );
            (None, PreviousSnapshot::Unreadable(err.to_string()))
        }
        Err(err) => return Err(fail(err)),
    };

    let decision = decide(previous.as_ref(), &current, options.force);
    if let Some(diagnostic) = decision.diagnostic() {
        tracing::info!(run_id = %run_id, forced = decision.persist, "{}", diagnostic);
    }

    let persisted = if decision.persist {
        encode_snapshot(&current)
            .and_then(|bytes| store.save(&bytes))
            .map_err(&fail)?;
        true
    } else {
        false
    };

    log_op_end!(
        "run_check",
        duration_ms = start.elapsed().as_millis() as u64,
        run_id = %run_id,
        compatible = decision.compatible,
        persisted = persisted
    );
    Ok(CheckOutcome {
        run_id,
        decision,
        previous: status,
        persisted,
        project: current,
    })
}

fn load_previous(store: &dyn SnapshotStore) -> Result<Option<Project>> {
    match store.load()? {
        Some(bytes) => decode_snapshot(&bytes).map(Some),
        None => Ok(None),
    }
}
