//! Project digest.
//!
//! The digest is the hex SHA-256 of the compact JSON of a project. Every map
//! in the model is a `BTreeMap`, so equal projects always serialize to the
//! same bytes and hash to the same digest.

use crate::errors::{ApiCompatError, Result};
use crate::model::Project;
use sha2::{Digest, Sha256};

/// Compute the content digest of `project`.
///
/// ## Errors
///
/// Returns `ExErrorKind::Serialization` if JSON serialization fails.
///
/// ## Example
///
/// ```
/// use apicompat_core::model::Project;
/// use apicompat_core::snapshot::compute_project_digest;
///
/// let digest = compute_project_digest(&Project::new()).unwrap();
/// assert_eq!(digest.len(), 64);
/// ```
pub fn compute_project_digest(project: &Project) -> Result<String> {
    let canonical = serde_json::to_string(project).map_err(ApiCompatError::from)?;
    Ok(hash_string(&canonical))
}

fn hash_string(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Func, Node, Package, TypeDef};

    fn sample() -> Project {
        Project::new().with_package(
            Package::new("p")
                .with_node(TypeDef::new("MyInt", Node::simple("int")))
                .with_node(Func::new("Run").with_params(vec![Node::simple("string")])),
        )
    }

    #[test]
    fn test_digest_is_stable() {
        assert_eq!(
            compute_project_digest(&sample()).unwrap(),
            compute_project_digest(&sample()).unwrap()
        );
    }

    #[test]
    fn test_digest_independent_of_insertion_order() {
        let reordered = Project::new().with_package(
            Package::new("p")
                .with_node(Func::new("Run").with_params(vec![Node::simple("string")]))
                .with_node(TypeDef::new("MyInt", Node::simple("int"))),
        );
        assert_eq!(
            compute_project_digest(&sample()).unwrap(),
            compute_project_digest(&reordered).unwrap()
        );
    }

    #[test]
    fn test_digest_changes_with_content() {
        let changed = Project::new().with_package(
            Package::new("p").with_node(TypeDef::new("MyInt", Node::simple("int64"))),
        );
        assert_ne!(
            compute_project_digest(&sample()).unwrap(),
            compute_project_digest(&changed).unwrap()
        );
    }
}
