use thiserror::Error;

use crate::uniform::UniformKind;

/// Failure to read or write a uniform slot.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UniformError {
    #[error("program declares no uniform named `{name}`")]
    Unknown { name: String },

    #[error("uniform `{name}` is declared as {declared}, cannot write a {written}")]
    KindMismatch {
        name: String,
        declared: UniformKind,
        written: UniformKind,
    },
}

/// Failure to register a program's live inputs with a window.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegisterError {
    #[error("program bindings are already registered")]
    AlreadyRegistered,

    #[error("uniform `{name}` must be declared as {expected}, found {found}")]
    KindMismatch {
        name: &'static str,
        expected: UniformKind,
        found: UniformKind,
    },
}
