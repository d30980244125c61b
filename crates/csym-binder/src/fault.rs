//! Structural faults raised while building the symbol tables.

use csym_common::Span;
use thiserror::Error;

/// The tree violates a shape the builder relies on.
///
/// Entries committed before the fault stay in the tables; the entity being
/// built when the fault occurred may be incomplete.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StructuralFault {
    #[error("function definition at {span} has no name-bearing declarator")]
    MissingFunctionDeclarator { span: Span },
    #[error("typedef '{name}' at {span} has no resolvable aliased type")]
    UnresolvableTypedef { name: String, span: Span },
    #[error("declaration at {span} has no type chain")]
    MissingTypeChain { span: Span },
    #[error("expected {expected} at {span}, found {found}")]
    UnexpectedNode {
        expected: &'static str,
        found: &'static str,
        span: Span,
    },
    #[error("scope exit with an empty cursor path")]
    ScopeUnderflow,
    #[error("cursor path {path:?} does not address a scope")]
    MissingScope { path: Vec<String> },
    #[error("scope nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },
}
