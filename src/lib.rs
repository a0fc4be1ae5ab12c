//! Intermediate representation for a flow analyzer of a small lazy
//! functional language.
//!
//! The crate provides:
//! 1. An annotation-generic lambda calculus ([`ir::Term`]) with pre-order
//!    map/fold, scope adornment and shadow-aware substitution
//! 2. Recursion removal: binding groups are split into strongly connected
//!    components and every recursive component is rewritten into explicit
//!    `Fix` terms, so consumers can handle bindings in one ordered pass
//! 3. A type model with flow-annotation slots, the builtin primitive
//!    signatures, and an environment of user data types

pub mod interner;
pub mod ir;
pub mod program;
pub mod recursion;
pub mod types;

// Re-export main types
pub use interner::Name;
pub use ir::{adorn_names, Hardwired, Literal, NameAdornment, Pattern, Term};
pub use program::{CollisionPolicy, Program, ProgramOptions};
pub use recursion::{build_graph, fix_recursion, let_group, CallGraph};
pub use types::{type_from_name, BasicKind, DataCon, DataDef, DataEnv, DataEnvError, TyEnv, Type};
