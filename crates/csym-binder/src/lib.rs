//! Symbol table builder for C declarations.
//!
//! Walks a `csym_parser` tree once and produces two hierarchical tables: one
//! for ordinary identifiers (variables, functions, parameters) and one for
//! type identifiers (typedefs, struct tags).
//!
//! - `ContextStack` - active traversal contexts (typedef target, parameter list)
//! - `SymbolStore` - a scope tree addressed through a cursor path
//! - `SymbolTableBuilder` - the dispatching visitor that fills both stores

pub mod context;
pub use context::{ContextStack, ContextTag};

pub mod fault;
pub use fault::StructuralFault;

pub mod scope;
pub use scope::{
    PARAMETER_SCOPE, Qualifiers, RETURN_KEY, ScopeMode, ScopeNode, SymbolEntry, SymbolStore,
};

pub mod builder;
pub use builder::{Lookahead, SymbolTableBuilder, SymbolTables, TableKind, build_tables};

#[cfg(test)]
#[path = "tests/context_tests.rs"]
mod context_tests;
#[cfg(test)]
#[path = "tests/scope_tests.rs"]
mod scope_tests;
