pub mod data;
pub mod env;
pub mod error;
pub mod ty;

pub use data::{DataCon, DataDef, DataEnv};
pub use env::{TyEnv, BUILTIN_SIGNATURES};
pub use error::DataEnvError;
pub use ty::{type_from_name, AnnVar, BasicKind, Type};
