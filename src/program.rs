//! The unit handed to an inference engine: one linearized term and the
//! data types it may mention.

use crate::interner::Name;
use crate::ir::Term;
use crate::recursion::let_group;
use crate::types::{DataDef, DataEnv, DataEnvError};

/// What to do when a data definition reuses another type's constructor name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Last definition wins, silently.
    #[default]
    Overwrite,
    /// Fail with [`DataEnvError`].
    Reject,
}

/// Configuration options for program assembly.
#[derive(Debug, Clone, Default)]
pub struct ProgramOptions {
    /// How constructor-name clashes between data definitions are handled.
    pub constructor_collisions: CollisionPolicy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program<A> {
    pub term: Term<A>,
    pub data_env: DataEnv,
}

impl<A: Clone> Program<A> {
    /// Register `data_defs` on top of the prelude and linearize the
    /// top-level binding group around `body`.
    pub fn assemble(
        bindings: Vec<(Name, Term<A>)>,
        body: Term<A>,
        data_defs: impl IntoIterator<Item = DataDef>,
        options: &ProgramOptions,
    ) -> Result<Self, DataEnvError> {
        let mut data_env = DataEnv::prelude();
        for def in data_defs {
            match options.constructor_collisions {
                CollisionPolicy::Overwrite => data_env.add_data_def(def),
                CollisionPolicy::Reject => data_env.try_add_data_def(def)?,
            }
        }
        log::debug!(
            "assembling program: {} bindings, {} data types",
            bindings.len(),
            data_env.len()
        );
        Ok(Program {
            term: let_group(bindings, body),
            data_env,
        })
    }
}
