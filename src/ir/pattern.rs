use std::fmt;

use crate::interner::Name;

/// Left-hand side of a case alternative.
///
/// Constructor arity is not checked here; that belongs to whoever consumes
/// the term together with a `DataEnv`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Binds the whole scrutinee.
    Variable(Name),
    /// Matches one data constructor and binds its fields positionally.
    Constructor(Name, Vec<Name>),
}

impl Pattern {
    pub fn bound_names(&self) -> &[Name] {
        match self {
            Pattern::Variable(name) => std::slice::from_ref(name),
            Pattern::Constructor(_, args) => args,
        }
    }

    pub fn binds(&self, name: Name) -> bool {
        self.bound_names().contains(&name)
    }

    /// Rename a bound variable. Constructor names are left alone.
    pub fn rename_binder(self, old: Name, new: Name) -> Pattern {
        let swap = |n: Name| if n == old { new } else { n };
        match self {
            Pattern::Variable(name) => Pattern::Variable(swap(name)),
            Pattern::Constructor(con, args) => {
                Pattern::Constructor(con, args.into_iter().map(swap).collect())
            }
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Variable(name) => write!(f, "{}", name),
            Pattern::Constructor(con, args) => {
                write!(f, "{}", con)?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_names() {
        let x = Name::new("x");
        assert_eq!(Pattern::Variable(x).bound_names(), &[x]);

        let cons = Pattern::Constructor(Name::new("Cons"), vec![Name::new("h"), Name::new("t")]);
        assert!(cons.binds(Name::new("t")));
        assert!(!cons.binds(Name::new("Cons")));
    }

    #[test]
    fn test_rename_binder_skips_constructor() {
        let pat = Pattern::Constructor(Name::new("Pair"), vec![Name::new("a"), Name::new("b")]);
        let renamed = pat.rename_binder(Name::new("a"), Name::new("a'1"));
        assert_eq!(renamed.to_string(), "Pair a'1 b");
        assert_eq!(
            Pattern::Constructor(Name::new("Nil"), vec![]).to_string(),
            "Nil"
        );
    }
}
