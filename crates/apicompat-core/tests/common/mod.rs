use apicompat_core::decl::{
    Declaration, Expr, FieldGroup, FuncDecl, LitKind, Signature, SourceFile, TypeExpr, TypeSpec,
    ValueSpec,
};
use apicompat_core::extract::ExtractorConfig;
use apicompat_core::model::Project;

/// Extract a single in-memory file declaring package `p`
#[allow(dead_code)]
pub fn project_of(declarations: Vec<Declaration>) -> Project {
    let mut all = vec![Declaration::package("p")];
    all.extend(declarations);
    let mut project = Project::new();
    project.extract_file(&SourceFile::new(all), &ExtractorConfig::default());
    project
}

#[allow(dead_code)]
pub fn ident(name: &str) -> TypeExpr {
    TypeExpr::ident(name)
}

/// `type Name <ty>`
#[allow(dead_code)]
pub fn type_decl(name: &str, ty: TypeExpr) -> Declaration {
    Declaration::Type(TypeSpec {
        name: name.to_string(),
        ty,
    })
}

/// `type Name struct { F1 T1; F2 T2; ... }`
#[allow(dead_code)]
pub fn struct_decl(name: &str, fields: &[(&str, TypeExpr)]) -> Declaration {
    type_decl(
        name,
        TypeExpr::Struct {
            fields: fields
                .iter()
                .map(|(field, ty)| FieldGroup::named([*field], ty.clone()))
                .collect(),
        },
    )
}

/// Named parameter group
#[allow(dead_code)]
pub fn param(name: &str, ty: TypeExpr) -> FieldGroup {
    FieldGroup::named([name], ty)
}

/// `func Name(params) (results)`; `None` omits the clause
#[allow(dead_code)]
pub fn func_decl(
    name: &str,
    params: Option<Vec<FieldGroup>>,
    results: Option<Vec<FieldGroup>>,
) -> Declaration {
    Declaration::Func(FuncDecl {
        name: name.to_string(),
        receiver: None,
        signature: Signature { params, results },
    })
}

/// `var Name = <int literal>`
#[allow(dead_code)]
pub fn int_var(name: &str) -> Declaration {
    Declaration::Value(ValueSpec {
        names: vec![name.to_string()],
        ty: None,
        values: vec![Expr::BasicLit { lit: LitKind::Int }],
        constant: false,
    })
}

/// `func (r Receiver) Name()`
#[allow(dead_code)]
pub fn method_decl(receiver: TypeExpr, name: &str) -> Declaration {
    Declaration::Func(FuncDecl {
        name: name.to_string(),
        receiver: Some(vec![FieldGroup::named(["r"], receiver)]),
        signature: Signature::default(),
    })
}
