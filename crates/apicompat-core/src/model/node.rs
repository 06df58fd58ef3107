//! Declaration node variants.
//!
//! `Node` is a closed sum type. Comparison between two nodes dispatches on
//! both variants; mismatched variants never compare equal. The rules
//! themselves live in [`crate::compat::engine`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::compat::engine::check_node;

/// Name prefix marking a variadic parameter type.
pub const VARIADIC_PREFIX: &str = "...";

/// Name prefix marking a pointer type.
pub const POINTER_PREFIX: &str = "*";

/// A node of the interface model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    SimpleType(SimpleType),
    Field(Field),
    Struct(Struct),
    Interface(Interface),
    Params(Params),
    Results(Results),
    Receivers(Receivers),
    Func(Func),
    TypeDef(TypeDef),
    Var(Var),
}

/// Variant discriminant, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    SimpleType,
    Field,
    Struct,
    Interface,
    Params,
    Results,
    Receivers,
    Func,
    TypeDef,
    Var,
}

impl NodeKind {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::SimpleType => "simple type",
            NodeKind::Field => "field",
            NodeKind::Struct => "struct",
            NodeKind::Interface => "interface",
            NodeKind::Params => "params",
            NodeKind::Results => "results",
            NodeKind::Receivers => "receivers",
            NodeKind::Func => "function",
            NodeKind::TypeDef => "type definition",
            NodeKind::Var => "variable",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Node {
    /// Atomic type node.
    pub fn simple(name: impl Into<String>) -> Self {
        Node::SimpleType(SimpleType::new(name))
    }

    /// Variant discriminant.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::SimpleType(_) => NodeKind::SimpleType,
            Node::Field(_) => NodeKind::Field,
            Node::Struct(_) => NodeKind::Struct,
            Node::Interface(_) => NodeKind::Interface,
            Node::Params(_) => NodeKind::Params,
            Node::Results(_) => NodeKind::Results,
            Node::Receivers(_) => NodeKind::Receivers,
            Node::Func(_) => NodeKind::Func,
            Node::TypeDef(_) => NodeKind::TypeDef,
            Node::Var(_) => NodeKind::Var,
        }
    }

    /// Name under which this node is keyed in its parent map.
    ///
    /// Only named declarations (type definitions, variables, functions and
    /// fields) have one.
    pub fn declared_name(&self) -> Option<&str> {
        match self {
            Node::Field(f) => Some(&f.name),
            Node::Func(f) => Some(&f.name),
            Node::TypeDef(t) => Some(&t.name),
            Node::Var(v) => Some(&v.name),
            _ => None,
        }
    }

    /// Returns true if `newer` is a compatible evolution of `self`.
    ///
    /// Nodes of different variants never compare equal.
    pub fn compare(&self, newer: &Node) -> bool {
        check_node(self, newer).is_ok()
    }
}

/// Atomic type name, possibly carrying `*` / `...` prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimpleType {
    pub name: String,
}

impl SimpleType {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn is_variadic(&self) -> bool {
        self.name.starts_with(VARIADIC_PREFIX)
    }

    pub fn is_pointer(&self) -> bool {
        self.name.starts_with(POINTER_PREFIX)
    }
}

/// Struct member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Box<Node>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: Node) -> Self {
        Self {
            name: name.into(),
            ty: Box::new(ty),
        }
    }
}

/// Struct shape; fields are keyed by name, not position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Struct {
    pub fields: BTreeMap<String, Field>,
}

impl Struct {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; a later field with the same name replaces the earlier one.
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }
}

/// Interface shape; methods are keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub methods: BTreeMap<String, Func>,
}

impl Interface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method(mut self, method: Func) -> Self {
        self.methods.insert(method.name.clone(), method);
        self
    }
}

/// Ordered parameter types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    pub types: Vec<Node>,
}

/// Ordered result types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Results {
    pub types: Vec<Node>,
}

/// Ordered receiver types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receivers {
    pub types: Vec<Node>,
}

macro_rules! impl_type_list {
    ($($list:ident),*) => {
        $(
            impl $list {
                pub fn new(types: Vec<Node>) -> Self {
                    Self { types }
                }

                pub fn len(&self) -> usize {
                    self.types.len()
                }

                pub fn is_empty(&self) -> bool {
                    self.types.is_empty()
                }
            }
        )*
    };
}

impl_type_list!(Params, Results, Receivers);

/// Function or method signature.
///
/// `None` clauses mean "no clause"; `Some` with an empty list means the
/// clause is present but empty. The two never compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Func {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receivers: Option<Receivers>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Results>,
}

impl Func {
    /// A function with no receiver, params or results clause.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            receivers: None,
            params: None,
            results: None,
        }
    }

    pub fn with_receivers(mut self, types: Vec<Node>) -> Self {
        self.receivers = Some(Receivers::new(types));
        self
    }

    pub fn with_params(mut self, types: Vec<Node>) -> Self {
        self.params = Some(Params::new(types));
        self
    }

    pub fn with_results(mut self, types: Vec<Node>) -> Self {
        self.results = Some(Results::new(types));
        self
    }

    /// True when the declaration is bound to a receiver.
    pub fn is_method(&self) -> bool {
        self.receivers.is_some()
    }
}

/// Named type definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Box<Node>,
}

impl TypeDef {
    pub fn new(name: impl Into<String>, ty: Node) -> Self {
        Self {
            name: name.into(),
            ty: Box::new(ty),
        }
    }
}

/// Variable or constant declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Var {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Box<Node>,
}

impl Var {
    pub fn new(name: impl Into<String>, ty: Node) -> Self {
        Self {
            name: name.into(),
            ty: Box::new(ty),
        }
    }
}

macro_rules! impl_into_node {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Node {
                fn from(value: $variant) -> Self {
                    Node::$variant(value)
                }
            }
        )*
    };
}

impl_into_node!(
    SimpleType, Field, Struct, Interface, Params, Results, Receivers, Func, TypeDef, Var
);
