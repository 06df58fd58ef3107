//! Type-expression normalizer.
//!
//! Turns descriptor type expressions into model nodes. A shape the
//! normalizer cannot express yields `None` (an empty node list): callers
//! drop the member or parameter that carried it and carry on.

use crate::decl::{ChanDir, Expr, FieldGroup, LitKind, MethodSpec, Signature, TypeExpr};
use crate::extract::config::ExtractorConfig;
use crate::model::{
    Field, Func, Interface, Node, Params, Receivers, Results, SimpleType, Struct, POINTER_PREFIX,
    VARIADIC_PREFIX,
};

pub(crate) struct Shaper<'c> {
    config: &'c ExtractorConfig,
}

impl<'c> Shaper<'c> {
    pub(crate) fn new(config: &'c ExtractorConfig) -> Self {
        Self { config }
    }

    /// Shape of a type expression.
    pub(crate) fn shape(&self, ty: &TypeExpr) -> Option<Node> {
        match ty {
            TypeExpr::Ident { name } => Some(Node::simple(name.as_str())),
            TypeExpr::Qualified { package, name } => Some(Node::simple(format!("{package}.{name}"))),
            TypeExpr::Pointer { elem } => self.shape(elem).map(|n| prefixed(POINTER_PREFIX, n)),
            TypeExpr::Ellipsis { elem } => self.shape(elem).map(|n| prefixed(VARIADIC_PREFIX, n)),
            TypeExpr::Slice { elem } => self.composite(|| Some(format!("[]{}", self.name_of(elem)?))),
            TypeExpr::Array { len, elem } => {
                self.composite(|| Some(format!("[{}]{}", len, self.name_of(elem)?)))
            }
            TypeExpr::Map { key, value } => self.composite(|| {
                Some(format!("map[{}]{}", self.name_of(key)?, self.name_of(value)?))
            }),
            TypeExpr::Chan { dir, elem } => self.composite(|| {
                let elem = self.name_of(elem)?;
                Some(match dir {
                    ChanDir::Both => format!("chan {elem}"),
                    ChanDir::Send => format!("chan<- {elem}"),
                    ChanDir::Recv => format!("<-chan {elem}"),
                })
            }),
            TypeExpr::Struct { fields } => Some(self.structure(fields).into()),
            TypeExpr::Interface { methods } => Some(self.interface(methods).into()),
            TypeExpr::Func { signature } => {
                let (params, results) = self.signature(signature);
                Some(
                    Func {
                        name: String::new(),
                        receivers: None,
                        params,
                        results,
                    }
                    .into(),
                )
            }
            TypeExpr::Unrecognized => None,
        }
    }

    fn composite(&self, render: impl FnOnce() -> Option<String>) -> Option<Node> {
        render().map(Node::simple)
    }

    /// Canonical name of a type that renders as a single simple type.
    fn name_of(&self, ty: &TypeExpr) -> Option<String> {
        match self.shape(ty)? {
            Node::SimpleType(SimpleType { name }) => Some(name),
            _ => None,
        }
    }

    pub(crate) fn structure(&self, groups: &[FieldGroup]) -> Struct {
        let mut shape = Struct::new();
        for group in groups {
            let Some(ty) = self.shape(&group.ty) else {
                tracing::debug!(names = ?group.names, "struct member has unrecognized type; skipped");
                continue;
            };
            if group.names.is_empty() {
                match base_type_name(&group.ty) {
                    Some(name) if self.config.records_member(name) => {
                        shape.fields.insert(name.to_string(), Field::new(name, ty));
                    }
                    Some(_) => {}
                    None => tracing::debug!("embedded member without a type name; skipped"),
                }
                continue;
            }
            for name in &group.names {
                if self.config.records_member(name) {
                    shape
                        .fields
                        .insert(name.clone(), Field::new(name.as_str(), ty.clone()));
                }
            }
        }
        shape
    }

    pub(crate) fn interface(&self, methods: &[MethodSpec]) -> Interface {
        let mut shape = Interface::new();
        for method in methods {
            match method {
                MethodSpec::Method { name, signature } => {
                    if !self.config.records_member(name) {
                        continue;
                    }
                    let (params, results) = self.signature(signature);
                    shape.methods.insert(
                        name.clone(),
                        Func {
                            name: name.clone(),
                            receivers: None,
                            params,
                            results,
                        },
                    );
                }
                MethodSpec::Embedded { ty } => {
                    tracing::debug!(embedded = ?ty, "embedded interface not representable; skipped");
                }
                MethodSpec::Unrecognized => {
                    tracing::debug!("unrecognized interface element; skipped");
                }
            }
        }
        shape
    }

    pub(crate) fn signature(&self, signature: &Signature) -> (Option<Params>, Option<Results>) {
        let params = signature
            .params
            .as_deref()
            .map(|groups| Params::new(self.group_types(groups)));
        let results = signature
            .results
            .as_deref()
            .map(|groups| Results::new(self.group_types(groups)));
        (params, results)
    }

    pub(crate) fn receivers(&self, groups: &[FieldGroup]) -> Receivers {
        Receivers::new(self.group_types(groups))
    }

    /// One node per declared identifier; an unnamed group counts once.
    fn group_types(&self, groups: &[FieldGroup]) -> Vec<Node> {
        let mut types = Vec::new();
        for group in groups {
            let Some(ty) = self.shape(&group.ty) else {
                tracing::debug!(names = ?group.names, "parameter has unrecognized type; dropped");
                continue;
            };
            let count = group.names.len().max(1);
            types.extend(std::iter::repeat(ty).take(count));
        }
        types
    }

    /// Type of a value declared without an explicit type clause.
    pub(crate) fn infer(&self, value: &Expr) -> Option<Node> {
        match value {
            Expr::BasicLit { lit } => Some(Node::simple(default_literal_type(*lit))),
            Expr::Ident { name } => match name.as_str() {
                "true" | "false" => Some(Node::simple("bool")),
                "iota" => Some(Node::simple("int")),
                "nil" => None,
                _ => Some(Node::simple(name.as_str())),
            },
            Expr::Composite { ty } => self.shape(ty),
            Expr::AddressOf { operand } => match operand.as_ref() {
                Expr::Composite { ty } => self.shape(ty).map(|n| prefixed(POINTER_PREFIX, n)),
                _ => None,
            },
            Expr::Unrecognized => None,
        }
    }
}

/// Prefix a terminal simple-type name; other shapes pass through unchanged.
fn prefixed(prefix: &str, node: Node) -> Node {
    match node {
        Node::SimpleType(SimpleType { name }) => Node::simple(format!("{prefix}{name}")),
        other => other,
    }
}

fn default_literal_type(lit: LitKind) -> &'static str {
    match lit {
        LitKind::Int => "int",
        LitKind::Float => "float64",
        LitKind::Imag => "complex128",
        LitKind::Char => "rune",
        LitKind::String => "string",
    }
}

/// Terminal type name: `T`, `*T` and `pkg.T` all yield `T`.
///
/// Names an embedded member, and the receiver type a method is keyed under.
fn base_type_name(ty: &TypeExpr) -> Option<&str> {
    match ty {
        TypeExpr::Ident { name } | TypeExpr::Qualified { name, .. } => Some(name.as_str()),
        TypeExpr::Pointer { elem } => base_type_name(elem),
        _ => None,
    }
}

/// Base type of a method receiver list, with any pointer stripped.
pub(crate) fn receiver_base(groups: &[FieldGroup]) -> Option<&str> {
    groups.first().and_then(|group| base_type_name(&group.ty))
}
