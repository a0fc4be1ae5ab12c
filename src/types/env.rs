use std::collections::HashMap;

use crate::interner::Name;
use crate::types::ty::BasicKind::{self, Char, Double, Integer};
use crate::types::ty::Type;

/// Signature of a built-in primitive: argument kinds followed by the
/// result kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinSignature {
    pub name: &'static str,
    pub kinds: &'static [BasicKind],
}

impl BuiltinSignature {
    /// The curried arrow type, or `None` for an empty kind list.
    pub fn to_type(&self) -> Option<Type> {
        let (result, params) = self.kinds.split_last()?;
        Some(
            params
                .iter()
                .rev()
                .fold(Type::basic(*result), |acc, kind| Type::arrow(Type::basic(*kind), acc)),
        )
    }
}

const fn sig(name: &'static str, kinds: &'static [BasicKind]) -> BuiltinSignature {
    BuiltinSignature { name, kinds }
}

/// Primitive operations every program starts with.
pub const BUILTIN_SIGNATURES: &[BuiltinSignature] = &[
    sig("negate", &[Integer, Integer]),
    sig("+", &[Integer, Integer, Integer]),
    sig("-", &[Integer, Integer, Integer]),
    sig("*", &[Integer, Integer, Integer]),
    sig("div", &[Integer, Integer, Integer]),
    sig("ord", &[Char, Integer]),
    sig("chr", &[Integer, Char]),
    sig("round", &[Double, Integer]),
    sig("fromIntegral", &[Integer, Double]),
    sig("/", &[Double, Double, Double]),
];

/// Type environment: maps variable names to their types.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TyEnv {
    bindings: HashMap<Name, Type>,
}

impl TyEnv {
    pub fn new() -> Self {
        TyEnv {
            bindings: HashMap::new(),
        }
    }

    /// Environment seeded with [`BUILTIN_SIGNATURES`]. Build it once and
    /// pass it along; the seed table itself never changes.
    pub fn builtin() -> Self {
        let mut env = TyEnv::new();
        for signature in BUILTIN_SIGNATURES {
            if let Some(ty) = signature.to_type() {
                env.insert(Name::new(signature.name), ty);
            }
        }
        env
    }

    pub fn lookup(&self, name: Name) -> Option<&Type> {
        self.bindings.get(&name)
    }

    pub fn insert(&mut self, name: Name, ty: Type) {
        self.bindings.insert(name, ty);
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Type)> {
        self.bindings.iter()
    }
}
