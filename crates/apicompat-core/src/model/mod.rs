//! Interface model: a tagged tree of declaration nodes.
//!
//! A [`Project`] maps package names to [`Package`]s; each package maps the
//! exported names it declares to a [`Node`]. Pointer and variadic markers
//! live in [`SimpleType`] names (`*T`, `...T`), so a pointer change is a
//! name change.

pub mod invariants;
pub mod node;
pub mod package;

pub use node::{
    Field, Func, Interface, Node, NodeKind, Params, Receivers, Results, SimpleType, Struct,
    TypeDef, Var, POINTER_PREFIX, VARIADIC_PREFIX,
};
pub use package::{Package, Project};
