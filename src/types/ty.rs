use std::fmt;

use crate::interner::Name;

/// Flow-annotation variable attached to a type position.
pub type AnnVar = Name;

/// Built-in primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicKind {
    Integer,
    Char,
    Double,
}

impl BasicKind {
    pub const ALL: [BasicKind; 3] = [BasicKind::Integer, BasicKind::Char, BasicKind::Double];

    pub fn name(self) -> &'static str {
        match self {
            BasicKind::Integer => "Integer",
            BasicKind::Char => "Char",
            BasicKind::Double => "Double",
        }
    }

    pub fn from_name(name: &str) -> Option<BasicKind> {
        BasicKind::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for BasicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Types as seen by the flow analysis.
///
/// Every variant but `TyVar` has a slot for an annotation variable. On an
/// arrow the slot annotates the arrow itself; the `bool` is an opaque
/// flag carried for the consumer. Equality compares annotation slots too.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Basic(Option<AnnVar>, BasicKind),
    Data(Option<AnnVar>, Name),
    List(Option<AnnVar>, Box<Type>),
    Tuple(Option<AnnVar>, Vec<Type>),
    Arrow(Option<AnnVar>, bool, Box<Type>, Box<Type>),
    TyVar(Name),
}

impl Type {
    pub fn basic(kind: BasicKind) -> Type {
        Type::Basic(None, kind)
    }

    pub fn data(name: Name) -> Type {
        Type::Data(None, name)
    }

    pub fn list(elem: Type) -> Type {
        Type::List(None, Box::new(elem))
    }

    pub fn tuple(items: Vec<Type>) -> Type {
        Type::Tuple(None, items)
    }

    pub fn arrow(from: Type, to: Type) -> Type {
        Type::Arrow(None, false, Box::new(from), Box::new(to))
    }

    pub fn annotation(&self) -> Option<AnnVar> {
        match self {
            Type::Basic(ann, _)
            | Type::Data(ann, _)
            | Type::List(ann, _)
            | Type::Tuple(ann, _)
            | Type::Arrow(ann, _, _, _) => *ann,
            Type::TyVar(_) => None,
        }
    }

    /// The same type with its own slot set to `ann`. A `TyVar` is returned
    /// unchanged since it has no slot.
    pub fn with_annotation(self, ann: Option<AnnVar>) -> Type {
        match self {
            Type::Basic(_, kind) => Type::Basic(ann, kind),
            Type::Data(_, name) => Type::Data(ann, name),
            Type::List(_, elem) => Type::List(ann, elem),
            Type::Tuple(_, items) => Type::Tuple(ann, items),
            Type::Arrow(_, flag, from, to) => Type::Arrow(ann, flag, from, to),
            Type::TyVar(name) => Type::TyVar(name),
        }
    }
}

/// Built-in kind names map to `Basic`; anything else is taken to name a
/// data type. No lookup is done.
pub fn type_from_name(name: &str) -> Type {
    match BasicKind::from_name(name) {
        Some(kind) => Type::basic(kind),
        None => Type::data(Name::new(name)),
    }
}

fn write_annotation(f: &mut fmt::Formatter<'_>, ann: &Option<AnnVar>, annotated: bool) -> fmt::Result {
    match ann {
        Some(var) if annotated => write!(f, "^{}", var),
        _ => Ok(()),
    }
}

/// Arrows associate to the right: only an arrow in domain position gets
/// parentheses. `annotated` is the `{:#}` form.
fn write_type(ty: &Type, f: &mut fmt::Formatter<'_>, annotated: bool) -> fmt::Result {
    match ty {
        Type::Basic(ann, kind) => {
            write!(f, "{}", kind)?;
            write_annotation(f, ann, annotated)
        }
        Type::Data(ann, name) => {
            write!(f, "{}", name)?;
            write_annotation(f, ann, annotated)
        }
        Type::List(ann, elem) => {
            f.write_str("[")?;
            write_type(elem, f, annotated)?;
            f.write_str("]")?;
            write_annotation(f, ann, annotated)
        }
        Type::Tuple(ann, items) => {
            f.write_str("(")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_type(item, f, annotated)?;
            }
            f.write_str(")")?;
            write_annotation(f, ann, annotated)
        }
        Type::Arrow(ann, _, from, to) => {
            if matches!(**from, Type::Arrow(..)) {
                f.write_str("(")?;
                write_type(from, f, annotated)?;
                f.write_str(")")?;
            } else {
                write_type(from, f, annotated)?;
            }
            f.write_str(" ->")?;
            write_annotation(f, ann, annotated)?;
            f.write_str(" ")?;
            write_type(to, f, annotated)
        }
        Type::TyVar(name) => write!(f, "{}", name),
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let annotated = f.alternate();
        write_type(self, f, annotated)
    }
}
