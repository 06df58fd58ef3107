#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Old/new interface pairs run through extraction and comparison.

mod common;

use apicompat_core::compat::{check_compat, Clause, MismatchReason, ViolationKind};
use apicompat_core::decl::{Declaration, FieldGroup, TypeExpr};
use apicompat_core::model::{Func, Node, NodeKind, Package, Project};
use common::{
    func_decl, ident, int_var, method_decl, param, project_of, struct_decl, type_decl,
};

fn assert_compatible(older: Vec<Declaration>, newer: Vec<Declaration>) {
    let report = check_compat(&project_of(older), &project_of(newer));
    assert!(
        report.compatible,
        "expected compatible, got: {:?}",
        report.diagnostic()
    );
}

fn assert_incompatible(older: Vec<Declaration>, newer: Vec<Declaration>) -> ViolationKind {
    let report = check_compat(&project_of(older), &project_of(newer));
    assert!(!report.compatible, "expected a violation");
    report.violation.expect("violation present").kind
}

#[test]
fn test_adding_a_typedef_is_compatible() {
    assert_compatible(
        vec![type_decl("MyInt", ident("int"))],
        vec![
            type_decl("MyInt", ident("int")),
            type_decl("MyFloat", ident("float64")),
        ],
    );
}

#[test]
fn test_removing_a_typedef_breaks() {
    let kind = assert_incompatible(
        vec![
            type_decl("MyInt", ident("int")),
            type_decl("MyFloat", ident("float64")),
        ],
        vec![type_decl("MyInt", ident("int"))],
    );
    assert_eq!(kind, ViolationKind::DefinitionMissing);
}

#[test]
fn test_changing_typedef_base_breaks() {
    let kind = assert_incompatible(
        vec![type_decl("MyInt", ident("int"))],
        vec![type_decl("MyInt", ident("int64"))],
    );
    assert_eq!(kind, ViolationKind::CorruptedSymbol);
}

#[test]
fn test_variadic_widening_is_compatible() {
    assert_compatible(
        vec![func_decl("Something", Some(vec![param("a", ident("int"))]), None)],
        vec![func_decl(
            "Something",
            Some(vec![param("a", TypeExpr::ellipsis(ident("int")))]),
            None,
        )],
    );
}

#[test]
fn test_variadic_narrowing_breaks() {
    let kind = assert_incompatible(
        vec![func_decl(
            "Something",
            Some(vec![param("a", TypeExpr::ellipsis(ident("int")))]),
            None,
        )],
        vec![func_decl("Something", Some(vec![param("a", ident("int"))]), None)],
    );
    assert_eq!(kind, ViolationKind::CorruptedSymbol);
}

#[test]
fn test_param_retype_reports_corrupted_symbol() {
    let report = check_compat(
        &project_of(vec![func_decl(
            "Something",
            Some(vec![param("a", ident("int"))]),
            None,
        )]),
        &project_of(vec![func_decl(
            "Something",
            Some(vec![param("a", ident("string"))]),
            None,
        )]),
    );
    let violation = report.violation.clone().unwrap();
    assert_eq!(violation.kind, ViolationKind::CorruptedSymbol);
    assert_eq!(violation.symbol.as_deref(), Some("Something"));
    assert_eq!(violation.path, vec!["params[0]".to_string()]);
    assert!(report
        .diagnostic()
        .unwrap()
        .starts_with("corrupted symbol p.Something"));
}

#[test]
fn test_added_parameter_breaks() {
    let kind = assert_incompatible(
        vec![func_decl("F", Some(vec![param("a", ident("int"))]), None)],
        vec![func_decl(
            "F",
            Some(vec![param("a", ident("int")), param("b", ident("int"))]),
            None,
        )],
    );
    assert_eq!(kind, ViolationKind::CorruptedSymbol);
}

#[test]
fn test_reordered_parameters_break() {
    assert_incompatible(
        vec![func_decl(
            "F",
            Some(vec![param("a", ident("int")), param("b", ident("string"))]),
            None,
        )],
        vec![func_decl(
            "F",
            Some(vec![param("b", ident("string")), param("a", ident("int"))]),
            None,
        )],
    );
}

#[test]
fn test_results_moved_to_params_breaks() {
    let report = check_compat(
        &project_of(vec![func_decl(
            "A",
            None,
            Some(vec![
                FieldGroup::unnamed(ident("string")),
                FieldGroup::unnamed(ident("int")),
            ]),
        )]),
        &project_of(vec![func_decl(
            "A",
            Some(vec![param("a", ident("string")), param("b", ident("int"))]),
            None,
        )]),
    );
    let violation = report.violation.unwrap();
    assert!(matches!(
        violation.reason,
        Some(MismatchReason::ClauseMismatch { .. })
    ));
}

#[test]
fn test_struct_member_addition_is_compatible() {
    assert_compatible(
        vec![struct_decl("S", &[("A", ident("int"))])],
        vec![struct_decl("S", &[("A", ident("int")), ("B", ident("string"))])],
    );
}

#[test]
fn test_struct_member_removal_breaks() {
    let report = check_compat(
        &project_of(vec![struct_decl(
            "S",
            &[("A", ident("int")), ("B", ident("string"))],
        )]),
        &project_of(vec![struct_decl("S", &[("A", ident("int"))])]),
    );
    assert_eq!(
        report.violation.unwrap().reason,
        Some(MismatchReason::MemberMissing {
            member: "B".to_string()
        })
    );
}

#[test]
fn test_struct_member_retype_breaks() {
    assert_incompatible(
        vec![struct_decl("S", &[("A", ident("int"))])],
        vec![struct_decl("S", &[("A", TypeExpr::pointer(ident("int")))])],
    );
}

#[test]
fn test_typedef_becoming_var_is_kind_mismatch() {
    let report = check_compat(
        &project_of(vec![type_decl("A", ident("int"))]),
        &project_of(vec![int_var("A")]),
    );
    let violation = report.violation.unwrap();
    assert_eq!(violation.kind, ViolationKind::CorruptedSymbol);
    assert_eq!(
        violation.reason,
        Some(MismatchReason::KindMismatch {
            older: NodeKind::TypeDef,
            newer: NodeKind::Var,
        })
    );
}

#[test]
fn test_missing_package_breaks() {
    let older = project_of(vec![type_decl("A", ident("int"))]);
    let report = check_compat(&older, &Project::new());
    assert_eq!(
        report.violation.map(|v| v.kind),
        Some(ViolationKind::PackageMissing)
    );
}

#[test]
fn test_added_package_is_compatible() {
    let older = project_of(vec![type_decl("A", ident("int"))]);
    let newer = older.clone().with_package(Package::new("q"));
    assert!(check_compat(&older, &newer).compatible);
}

#[test]
fn test_private_declarations_are_invisible_to_comparison() {
    assert_compatible(
        vec![
            type_decl("A", ident("int")),
            type_decl("internalOnly", ident("int")),
        ],
        vec![type_decl("A", ident("int"))],
    );
}

#[test]
fn test_first_violation_is_deterministic() {
    let older = project_of(vec![
        type_decl("B", ident("int")),
        type_decl("A", ident("int")),
    ]);
    let newer = project_of(vec![]);
    let first = check_compat(&older, &newer);
    let second = check_compat(&older, &newer);
    assert_eq!(first, second);
    assert_eq!(first.violation.unwrap().symbol.as_deref(), Some("A"));
}

#[test]
fn test_removing_method_from_one_receiver_breaks() {
    let report = check_compat(
        &project_of(vec![
            method_decl(TypeExpr::pointer(ident("A")), "Close"),
            method_decl(TypeExpr::pointer(ident("B")), "Close"),
        ]),
        &project_of(vec![method_decl(TypeExpr::pointer(ident("B")), "Close")]),
    );
    let violation = report.violation.unwrap();
    assert_eq!(violation.kind, ViolationKind::DefinitionMissing);
    assert_eq!(violation.symbol.as_deref(), Some("A.Close"));
}

#[test]
fn test_pointer_receiver_becoming_value_receiver_breaks() {
    let report = check_compat(
        &project_of(vec![method_decl(TypeExpr::pointer(ident("T")), "Reset")]),
        &project_of(vec![method_decl(ident("T"), "Reset")]),
    );
    let violation = report.violation.unwrap();
    assert_eq!(violation.kind, ViolationKind::CorruptedSymbol);
    assert_eq!(violation.symbol.as_deref(), Some("T.Reset"));
    assert_eq!(violation.path, vec!["receivers[0]".to_string()]);
    assert_eq!(
        violation.reason,
        Some(MismatchReason::NameMismatch {
            older: "*T".to_string(),
            newer: "T".to_string(),
        })
    );
}

#[test]
fn test_method_becoming_function_breaks() {
    let kind = assert_incompatible(
        vec![method_decl(ident("T"), "Reset")],
        vec![func_decl("Reset", None, None)],
    );
    assert_eq!(kind, ViolationKind::DefinitionMissing);
}

#[test]
fn test_dropped_receivers_clause_is_clause_mismatch() {
    let older = Project::new().with_package(
        Package::new("p").with_node(Func::new("Reset").with_receivers(vec![Node::simple("*T")])),
    );
    let newer = Project::new().with_package(Package::new("p").with_node(Func::new("Reset")));
    let violation = check_compat(&older, &newer).violation.unwrap();
    assert_eq!(violation.kind, ViolationKind::CorruptedSymbol);
    assert_eq!(
        violation.reason,
        Some(MismatchReason::ClauseMismatch {
            clause: Clause::Receivers,
            older_present: true,
            newer_present: false,
        })
    );
}

#[test]
fn test_gaining_results_clause_breaks() {
    let report = check_compat(
        &project_of(vec![func_decl("Flush", None, None)]),
        &project_of(vec![func_decl(
            "Flush",
            None,
            Some(vec![FieldGroup::unnamed(ident("error"))]),
        )]),
    );
    assert_eq!(
        report.violation.unwrap().reason,
        Some(MismatchReason::ClauseMismatch {
            clause: Clause::Results,
            older_present: false,
            newer_present: true,
        })
    );
}
