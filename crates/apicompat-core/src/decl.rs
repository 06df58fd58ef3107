//! Declaration descriptors produced by a language front end.
//!
//! These are the extractor's input: one [`SourceFile`] per parsed file,
//! carrying its top-level declarations in source order. The types are plain
//! serde data (internally tagged by `kind`), so a front end in any process
//! can hand them over as JSON.
//!
//! Shapes the front end cannot classify should be sent as
//! `{"kind": "unrecognized"}`; unknown tags decode to the same variant.

use serde::{Deserialize, Serialize};

/// Top-level declarations of one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

impl SourceFile {
    pub fn new(declarations: Vec<Declaration>) -> Self {
        Self {
            path: None,
            declarations,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// One top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    /// `package name`; binds the rest of the file to that package
    Package { name: String },
    Type(TypeSpec),
    Func(FuncDecl),
    Value(ValueSpec),
    /// Imports, generic declarations and anything else the extractor skips
    #[serde(other)]
    Unrecognized,
}

impl Declaration {
    pub fn package(name: impl Into<String>) -> Self {
        Declaration::Package { name: name.into() }
    }
}

/// `type Name <ty>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
}

/// `func (receiver) Name(params) results`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncDecl {
    pub name: String,
    /// Receiver list; `None` for plain functions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<Vec<FieldGroup>>,
    #[serde(default)]
    pub signature: Signature,
}

/// `var`/`const` spec: `A, B T = x, y`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueSpec {
    pub names: Vec<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeExpr>,
    #[serde(default)]
    pub values: Vec<Expr>,
    #[serde(default)]
    pub constant: bool,
}

/// Params and results of a function or function type.
///
/// `None` means the clause is absent; `Some(vec![])` means it is present
/// and empty. The extractor preserves the distinction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<FieldGroup>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<FieldGroup>>,
}

/// Identifiers sharing one type: `a, b int`.
///
/// An empty `names` list is an unnamed parameter or an embedded member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldGroup {
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
}

impl FieldGroup {
    pub fn named<I, S>(names: I, ty: TypeExpr) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            ty,
        }
    }

    pub fn unnamed(ty: TypeExpr) -> Self {
        Self {
            names: Vec::new(),
            ty,
        }
    }
}

/// Interface method specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MethodSpec {
    Method {
        name: String,
        #[serde(default)]
        signature: Signature,
    },
    /// Embedded interface, e.g. `io.Reader`
    Embedded {
        #[serde(rename = "type")]
        ty: TypeExpr,
    },
    #[serde(other)]
    Unrecognized,
}

/// Channel direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanDir {
    #[default]
    Both,
    Send,
    Recv,
}

/// Type expression as written in source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeExpr {
    Ident {
        name: String,
    },
    /// `package.Name`
    Qualified {
        package: String,
        name: String,
    },
    /// `*elem`
    Pointer {
        elem: Box<TypeExpr>,
    },
    /// `...elem` (final parameter only)
    Ellipsis {
        elem: Box<TypeExpr>,
    },
    /// `[]elem`
    Slice {
        elem: Box<TypeExpr>,
    },
    /// `[len]elem`
    Array {
        len: String,
        elem: Box<TypeExpr>,
    },
    /// `map[key]value`
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    /// `chan elem`, `chan<- elem`, `<-chan elem`
    Chan {
        #[serde(default)]
        dir: ChanDir,
        elem: Box<TypeExpr>,
    },
    Struct {
        #[serde(default)]
        fields: Vec<FieldGroup>,
    },
    Interface {
        #[serde(default)]
        methods: Vec<MethodSpec>,
    },
    Func {
        #[serde(default)]
        signature: Signature,
    },
    #[serde(other)]
    Unrecognized,
}

impl TypeExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        TypeExpr::Ident { name: name.into() }
    }

    pub fn pointer(elem: TypeExpr) -> Self {
        TypeExpr::Pointer {
            elem: Box::new(elem),
        }
    }

    pub fn ellipsis(elem: TypeExpr) -> Self {
        TypeExpr::Ellipsis {
            elem: Box::new(elem),
        }
    }

    pub fn slice(elem: TypeExpr) -> Self {
        TypeExpr::Slice {
            elem: Box::new(elem),
        }
    }
}

/// Basic literal kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LitKind {
    Int,
    Float,
    Imag,
    Char,
    String,
}

/// Initializer expression of a value declaration.
///
/// Only the forms whose type can be read off syntactically are modelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    BasicLit {
        lit: LitKind,
    },
    Ident {
        name: String,
    },
    /// `T{...}`
    Composite {
        #[serde(rename = "type")]
        ty: TypeExpr,
    },
    /// `&operand`
    AddressOf {
        operand: Box<Expr>,
    },
    #[serde(other)]
    Unrecognized,
}
