use std::fmt;

use crate::interner::Name;
use crate::ir::Term;

/// Which let-bound name a piece of code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameAdornment {
    /// Directly inside the right-hand side of the named binding.
    Shallow(Name),
    /// Nested further inside it.
    Deep(Name),
    /// No enclosing named scope (program root).
    Unscoped,
}

impl NameAdornment {
    /// Idempotent on `Deep` and `Unscoped`.
    pub fn deepen(self) -> Self {
        match self {
            NameAdornment::Shallow(name) => NameAdornment::Deep(name),
            other => other,
        }
    }

    pub fn scope_name(self) -> Option<Name> {
        match self {
            NameAdornment::Shallow(name) | NameAdornment::Deep(name) => Some(name),
            NameAdornment::Unscoped => None,
        }
    }
}

impl fmt::Display for NameAdornment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameAdornment::Shallow(name) => write!(f, "Shallow({})", name),
            NameAdornment::Deep(name) => write!(f, "Deep({})", name),
            NameAdornment::Unscoped => f.write_str("Unscoped"),
        }
    }
}

/// Pair every annotation with the let-binding it lexically belongs to.
///
/// A let's right-hand side starts a fresh `Shallow` scope named after the
/// binding; every other child (lambda bodies, let continuations, case and
/// application operands, fix bodies) sees the deepened enclosing scope.
pub fn adorn_names<A>(term: Term<A>) -> Term<(NameAdornment, A)> {
    adorn(term, NameAdornment::Unscoped)
}

fn adorn<A>(term: Term<A>, scope: NameAdornment) -> Term<(NameAdornment, A)> {
    let inner = scope.deepen();
    match term {
        Term::Literal { ann, lit } => Term::Literal {
            ann: (scope, ann),
            lit,
        },
        Term::Variable { ann, marked, name } => Term::Variable {
            ann: (scope, ann),
            marked,
            name,
        },
        Term::Hardwired { ann, value } => Term::Hardwired {
            ann: (scope, ann),
            value,
        },
        Term::Application { ann, func, arg } => {
            let func = adorn(*func, inner);
            let arg = adorn(*arg, inner);
            Term::app((scope, ann), func, arg)
        }
        Term::Abstraction { ann, param, body } => {
            Term::abs((scope, ann), param, adorn(*body, inner))
        }
        Term::LetIn {
            ann,
            name,
            bound,
            body,
        } => {
            let bound = adorn(*bound, NameAdornment::Shallow(name));
            let body = adorn(*body, inner);
            Term::let_in((scope, ann), name, bound, body)
        }
        Term::Case {
            ann,
            scrutinee,
            alts,
        } => {
            let scrutinee = adorn(*scrutinee, inner);
            let alts = alts
                .into_iter()
                .map(|(pat, term)| (pat, adorn(term, inner)))
                .collect();
            Term::case((scope, ann), scrutinee, alts)
        }
        Term::Fix { ann, body } => Term::fix((scope, ann), adorn(*body, inner)),
    }
}
