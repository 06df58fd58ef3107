//! Key invariants of a finalized project.
//!
//! Every map in the model is keyed by the name of the entry it holds:
//! packages by package name, package nodes by declared name, struct fields
//! by field name, interface methods by method name. Snapshots read back
//! from storage are checked against these before they are compared.

use crate::errors::ApiCompatError;
use crate::model::node::{Func, Node};
use crate::model::package::{Package, Project};

/// Check every key invariant of `project`, stopping at the first breach.
///
/// # Errors
///
/// Returns `ApiCompatError::KeyMismatch` naming the offending key.
pub fn validate_project(project: &Project) -> Result<(), ApiCompatError> {
    for (key, package) in &project.packages {
        if key != &package.name {
            return Err(ApiCompatError::KeyMismatch {
                package: None,
                key: key.clone(),
                name: package.name.clone(),
            });
        }
        validate_package(package)?;
    }
    Ok(())
}

/// Check the key invariants of one package.
///
/// # Errors
///
/// Returns `ApiCompatError::KeyMismatch` naming the offending key.
pub fn validate_package(package: &Package) -> Result<(), ApiCompatError> {
    let mismatch = |key: &str, name: &str| ApiCompatError::KeyMismatch {
        package: Some(package.name.clone()),
        key: key.to_string(),
        name: name.to_string(),
    };

    for (key, node) in &package.nodes {
        let name = node.declared_name().unwrap_or_default();
        if key != name {
            return Err(mismatch(key, name));
        }
        if let Some((key, name)) = first_nested_mismatch(node) {
            return Err(mismatch(&key, &name));
        }
    }
    Ok(())
}

fn first_nested_mismatch(node: &Node) -> Option<(String, String)> {
    match node {
        Node::SimpleType(_) => None,
        Node::Field(f) => first_nested_mismatch(&f.ty),
        Node::TypeDef(t) => first_nested_mismatch(&t.ty),
        Node::Var(v) => first_nested_mismatch(&v.ty),
        Node::Struct(s) => s.fields.iter().find_map(|(key, field)| {
            if key != &field.name {
                Some((key.clone(), field.name.clone()))
            } else {
                first_nested_mismatch(&field.ty)
            }
        }),
        Node::Interface(i) => i.methods.iter().find_map(|(key, method)| {
            if key != &method.name {
                Some((key.clone(), method.name.clone()))
            } else {
                func_mismatch(method)
            }
        }),
        Node::Func(f) => func_mismatch(f),
        Node::Params(p) => p.types.iter().find_map(first_nested_mismatch),
        Node::Results(r) => r.types.iter().find_map(first_nested_mismatch),
        Node::Receivers(r) => r.types.iter().find_map(first_nested_mismatch),
    }
}

fn func_mismatch(func: &Func) -> Option<(String, String)> {
    let receivers = func.receivers.iter().flat_map(|r| r.types.iter());
    let params = func.params.iter().flat_map(|p| p.types.iter());
    let results = func.results.iter().flat_map(|r| r.types.iter());
    receivers
        .chain(params)
        .chain(results)
        .find_map(first_nested_mismatch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::node::{Field, Struct, TypeDef};

    fn nested_struct_project(key: &str, field_name: &str) -> Project {
        let mut shape = Struct::new();
        shape
            .fields
            .insert(key.to_string(), Field::new(field_name, Node::simple("int")));
        Project::new().with_package(Package::new("p").with_node(TypeDef::new("S", shape.into())))
    }

    #[test]
    fn test_well_formed_project_passes() {
        assert!(validate_project(&nested_struct_project("A", "A")).is_ok());
    }

    #[test]
    fn test_package_key_mismatch() {
        let mut project = Project::new();
        project
            .packages
            .insert("p".to_string(), Package::new("q"));
        assert_eq!(
            validate_project(&project),
            Err(ApiCompatError::KeyMismatch {
                package: None,
                key: "p".to_string(),
                name: "q".to_string(),
            })
        );
    }

    #[test]
    fn test_unnamed_node_at_package_level_is_rejected() {
        let mut package = Package::new("p");
        package
            .nodes
            .insert("X".to_string(), Node::simple("int"));
        assert!(validate_package(&package).is_err());
    }

    #[test]
    fn test_nested_field_key_mismatch() {
        let err = validate_project(&nested_struct_project("A", "B")).unwrap_err();
        assert_eq!(
            err,
            ApiCompatError::KeyMismatch {
                package: Some("p".to_string()),
                key: "A".to_string(),
                name: "B".to_string(),
            }
        );
    }
}
