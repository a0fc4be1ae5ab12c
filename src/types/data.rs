use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::interner::Name;
use crate::types::error::DataEnvError;
use crate::types::ty::Type;

/// A data constructor and its field types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataCon {
    pub name: Name,
    pub members: Vec<Type>,
}

/// A non-parametric algebraic data type. It may mention itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDef {
    pub name: Name,
    pub constructors: Vec<DataCon>,
}

impl DataCon {
    pub fn new(name: Name, members: Vec<Type>) -> Self {
        DataCon { name, members }
    }
}

impl DataDef {
    pub fn new(name: Name, constructors: Vec<DataCon>) -> Self {
        DataDef { name, constructors }
    }

    pub fn constructor(&self, name: Name) -> Option<&DataCon> {
        self.constructors.iter().find(|con| con.name == name)
    }
}

impl fmt::Display for DataCon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for member in &self.members {
            if matches!(member, Type::Arrow(..)) {
                write!(f, " ({})", member)?;
            } else {
                write!(f, " {}", member)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for DataDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data {}", self.name)?;
        for (i, con) in self.constructors.iter().enumerate() {
            let sep = if i == 0 { " = " } else { " | " };
            write!(f, "{}{}", sep, con)?;
        }
        Ok(())
    }
}

/// Registered data types plus a constructor -> owning type index.
///
/// Constructor names are expected to be unique across the environment.
/// `add_data_def` does not check this; the last registration wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataEnv {
    defs: HashMap<Name, DataDef>,
    constructors: HashMap<Name, Name>,
}

impl DataEnv {
    pub fn new() -> Self {
        DataEnv {
            defs: HashMap::new(),
            constructors: HashMap::new(),
        }
    }

    /// Environment holding `data Bool = True | False`.
    pub fn prelude() -> Self {
        let mut env = DataEnv::new();
        env.add_data_def(DataDef::new(
            Name::new("Bool"),
            vec![
                DataCon::new(Name::new("True"), vec![]),
                DataCon::new(Name::new("False"), vec![]),
            ],
        ));
        env
    }

    pub fn lookup_data_def(&self, name: Name) -> Option<&DataDef> {
        self.defs.get(&name)
    }

    pub fn owning_type(&self, constructor: Name) -> Option<Name> {
        self.constructors.get(&constructor).copied()
    }

    /// The nominal type a constructor builds, and its field types.
    pub fn lookup_constructor_types(&self, constructor: Name) -> Option<(Type, &[Type])> {
        let owner = self.owning_type(constructor)?;
        let con = self.defs.get(&owner)?.constructor(constructor)?;
        Some((Type::data(owner), con.members.as_slice()))
    }

    /// Insert or replace a definition and index its constructors,
    /// overwriting any previous owner of the same constructor name.
    pub fn add_data_def(&mut self, def: DataDef) {
        if let Some(previous) = self.defs.remove(&def.name) {
            log::debug!("replacing data type {}", def.name);
            for con in &previous.constructors {
                if self.constructors.get(&con.name) == Some(&def.name) {
                    self.constructors.remove(&con.name);
                }
            }
        }
        for con in &def.constructors {
            if let Some(owner) = self.constructors.insert(con.name, def.name) {
                if owner != def.name {
                    log::debug!(
                        "constructor {} moves from {} to {}",
                        con.name,
                        owner,
                        def.name
                    );
                }
            }
        }
        self.defs.insert(def.name, def);
    }

    /// Like [`DataEnv::add_data_def`], but refuses a definition whose
    /// constructors clash with another type's or with each other. On error
    /// the environment is left untouched.
    pub fn try_add_data_def(&mut self, def: DataDef) -> Result<(), DataEnvError> {
        let mut seen = HashSet::new();
        for con in &def.constructors {
            if !seen.insert(con.name) {
                return Err(DataEnvError::DuplicateConstructor {
                    constructor: con.name,
                    data_type: def.name,
                });
            }
            match self.owning_type(con.name) {
                Some(existing) if existing != def.name => {
                    return Err(DataEnvError::ConstructorCollision {
                        constructor: con.name,
                        existing,
                        incoming: def.name,
                    });
                }
                _ => {}
            }
        }
        self.add_data_def(def);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn data_defs(&self) -> impl Iterator<Item = &DataDef> {
        self.defs.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ty::BasicKind;

    fn n(name: &str) -> Name {
        Name::new(name)
    }

    fn int_list() -> DataDef {
        DataDef::new(
            n("IntList"),
            vec![
                DataCon::new(n("Nil"), vec![]),
                DataCon::new(
                    n("Cons"),
                    vec![Type::basic(BasicKind::Integer), Type::data(n("IntList"))],
                ),
            ],
        )
    }

    #[test]
    fn test_prelude_bool() {
        let env = DataEnv::prelude();
        let (owner, members) = env.lookup_constructor_types(n("True")).unwrap();
        assert_eq!(owner, Type::Data(None, n("Bool")));
        assert!(members.is_empty());
        assert_eq!(env.lookup_constructor_types(n("Nonexistent")), None);
        assert_eq!(
            env.lookup_data_def(n("Bool")).map(|d| d.to_string()),
            Some("data Bool = True | False".to_string())
        );
    }

    #[test]
    fn test_recursive_type_members() {
        let mut env = DataEnv::prelude();
        env.add_data_def(int_list());
        let (owner, members) = env.lookup_constructor_types(n("Cons")).unwrap();
        assert_eq!(owner.to_string(), "IntList");
        assert_eq!(members, &[Type::basic(BasicKind::Integer), Type::data(n("IntList"))]);
        assert_eq!(env.len(), 2);
    }

    #[test]
    fn test_add_overwrites_constructor_owner() {
        let mut env = DataEnv::prelude();
        env.add_data_def(DataDef::new(n("Answer"), vec![DataCon::new(n("True"), vec![])]));
        assert_eq!(env.owning_type(n("True")), Some(n("Answer")));
        assert_eq!(env.owning_type(n("False")), Some(n("Bool")));
    }

    #[test]
    fn test_replacing_definition_drops_stale_constructors() {
        let mut env = DataEnv::new();
        env.add_data_def(int_list());
        env.add_data_def(DataDef::new(n("IntList"), vec![DataCon::new(n("Empty"), vec![])]));
        assert_eq!(env.owning_type(n("Cons")), None);
        assert_eq!(env.owning_type(n("Empty")), Some(n("IntList")));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_try_add_rejects_collision() {
        let mut env = DataEnv::prelude();
        let before = env.clone();
        let err = env
            .try_add_data_def(DataDef::new(n("Answer"), vec![DataCon::new(n("False"), vec![])]))
            .unwrap_err();
        assert_eq!(err.code(), "ConstructorCollision");
        assert_eq!(
            err.to_string(),
            "constructor 'False' of 'Answer' is already defined by data type 'Bool'"
        );
        assert_eq!(env, before);
    }

    #[test]
    fn test_try_add_rejects_duplicate_within_def() {
        let mut env = DataEnv::new();
        let def = DataDef::new(
            n("Twice"),
            vec![DataCon::new(n("A"), vec![]), DataCon::new(n("A"), vec![])],
        );
        let err = env.try_add_data_def(def).unwrap_err();
        assert_eq!(err.code(), "DuplicateConstructor");
        assert!(env.is_empty());
    }

    #[test]
    fn test_try_add_allows_redefinition_of_same_type() {
        let mut env = DataEnv::new();
        env.try_add_data_def(int_list()).unwrap();
        env.try_add_data_def(int_list()).unwrap();
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_render_constructor_members() {
        let con = DataCon::new(
            n("Fn"),
            vec![
                Type::arrow(Type::basic(BasicKind::Integer), Type::basic(BasicKind::Integer)),
                Type::list(Type::basic(BasicKind::Char)),
            ],
        );
        assert_eq!(con.to_string(), "Fn (Integer -> Integer) [Char]");
    }
}
