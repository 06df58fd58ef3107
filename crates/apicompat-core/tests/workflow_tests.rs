#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use apicompat_core::decl::TypeExpr;
use apicompat_core::errors::{ApiCompatError, ExErrorKind, Result};
use apicompat_core::model::Project;
use apicompat_core::snapshot::{
    decode_snapshot, encode_snapshot, MemorySnapshotStore, SnapshotStore,
};
use apicompat_core::workflow::{run_check, CheckOptions, PreviousSnapshot};
use common::{func_decl, ident, param, project_of, type_decl};

fn v1() -> Project {
    project_of(vec![func_decl("Something", Some(vec![param("a", ident("int"))]), None)])
}

fn v2_compatible() -> Project {
    project_of(vec![
        func_decl(
            "Something",
            Some(vec![param("a", TypeExpr::ellipsis(ident("int")))]),
            None,
        ),
        type_decl("MyInt", ident("int")),
    ])
}

fn v2_breaking() -> Project {
    project_of(vec![func_decl("Something", Some(vec![param("a", ident("string"))]), None)])
}

fn stored(store: &MemorySnapshotStore) -> Project {
    decode_snapshot(store.bytes().expect("snapshot stored")).unwrap()
}

#[test]
fn test_first_run_persists_unconditionally() {
    let mut store = MemorySnapshotStore::new();
    let outcome = run_check(&mut store, v1(), &CheckOptions::default()).unwrap();
    assert!(outcome.is_success());
    assert!(outcome.persisted);
    assert_eq!(outcome.previous, PreviousSnapshot::Absent);
    assert_eq!(stored(&store), v1());
}

#[test]
fn test_compatible_run_replaces_snapshot() {
    let mut store = MemorySnapshotStore::with_bytes(encode_snapshot(&v1()).unwrap());
    let outcome = run_check(&mut store, v2_compatible(), &CheckOptions::default()).unwrap();
    assert!(outcome.is_success());
    assert_eq!(outcome.previous, PreviousSnapshot::Loaded);
    assert_eq!(store.save_count(), 1);
    assert_eq!(stored(&store), v2_compatible());
}

#[test]
fn test_breaking_run_keeps_previous_snapshot() {
    let mut store = MemorySnapshotStore::with_bytes(encode_snapshot(&v1()).unwrap());
    let outcome = run_check(&mut store, v2_breaking(), &CheckOptions::default()).unwrap();
    assert!(!outcome.is_success());
    assert!(!outcome.persisted);
    assert!(outcome
        .decision
        .diagnostic()
        .unwrap()
        .contains("p.Something"));
    assert_eq!(store.save_count(), 0);
    assert_eq!(stored(&store), v1());
}

#[test]
fn test_forced_breaking_run_persists_but_fails() {
    let mut store = MemorySnapshotStore::with_bytes(encode_snapshot(&v1()).unwrap());
    let outcome = run_check(&mut store, v2_breaking(), &CheckOptions::forced()).unwrap();
    assert!(!outcome.is_success());
    assert!(outcome.persisted);
    assert_eq!(stored(&store), v2_breaking());
}

#[test]
fn test_corrupt_snapshot_conservative_treated_as_absent() {
    let mut store = MemorySnapshotStore::with_bytes(b"garbage".to_vec());
    let outcome = run_check(&mut store, v2_breaking(), &CheckOptions::default()).unwrap();
    assert!(outcome.is_success());
    assert!(matches!(
        outcome.previous,
        PreviousSnapshot::Unreadable(ref reason) if reason.contains("ERR_INVALID_SNAPSHOT")
    ));
    assert_eq!(stored(&store), v2_breaking());
}

#[test]
fn test_corrupt_snapshot_strict_is_error() {
    let mut store = MemorySnapshotStore::with_bytes(b"garbage".to_vec());
    let err = run_check(&mut store, v1(), &CheckOptions::strict()).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidSnapshot);
    assert!(err.run_id().is_some());
    assert_eq!(store.save_count(), 0);
}

/// Store whose writes always fail
struct ReadOnlyStore;

impl SnapshotStore for ReadOnlyStore {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    fn save(&mut self, _bytes: &[u8]) -> Result<()> {
        Err(ApiCompatError::Store {
            operation: "save".to_string(),
            message: "read-only store".to_string(),
        }
        .into())
    }
}

#[test]
fn test_save_failure_is_error_with_run_id() {
    let mut store = ReadOnlyStore;
    let err = run_check(&mut store, v1(), &CheckOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Persistence);
    assert!(err.run_id().is_some());
}

#[test]
fn test_each_run_has_fresh_run_id() {
    let mut store = MemorySnapshotStore::new();
    let first = run_check(&mut store, v1(), &CheckOptions::default()).unwrap();
    let second = run_check(&mut store, v1(), &CheckOptions::default()).unwrap();
    assert_ne!(first.run_id, second.run_id);
}
