//! csymtab: scope-aware symbol tables for C declarations.
//!
//! The pipeline is split across workspace crates:
//!
//! - `csym_scanner` - tokenizer for the declaration subset of C
//! - `csym_parser` - recursive-descent parser producing an arena-backed tree
//! - `csym_binder` - single-pass builder for the value and type tables
//!
//! `build_from_source` runs all three on one source text:
//!
//! ```
//! let output = csymtab::build_from_source("demo.c", "int q[100];").unwrap();
//! assert!(output.tables.value("q").is_some());
//! ```

pub use csym_binder::{
    ScopeMode, ScopeNode, StructuralFault, SymbolEntry, SymbolTableBuilder, SymbolTables,
    build_tables,
};
pub use csym_common::{Span, limits};
pub use csym_parser::{NodeArena, NodeIndex, ParseError, ParserState};
pub use csym_scanner::ScanError;

use thiserror::Error;

// Tracing configuration (text / tree / JSON output for debugging)
pub mod tracing_config;

// Native CLI
#[cfg(feature = "cli")]
pub mod cli;

#[derive(Debug, Error)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("malformed syntax tree: {0}")]
    Structure(#[from] StructuralFault),
}

impl Error {
    /// Byte span of the offending source, when the error carries one.
    pub fn span(&self) -> Option<Span> {
        match self {
            Error::Parse(err) => Some(err.span()),
            Error::Structure(
                StructuralFault::MissingFunctionDeclarator { span }
                | StructuralFault::UnresolvableTypedef { span, .. }
                | StructuralFault::MissingTypeChain { span }
                | StructuralFault::UnexpectedNode { span, .. },
            ) => Some(*span),
            Error::Structure(_) => None,
        }
    }
}

/// Parsed tree and finished tables for one source text.
#[derive(Debug)]
pub struct BuildOutput {
    pub file_name: String,
    pub arena: NodeArena,
    pub root: NodeIndex,
    pub tables: SymbolTables,
}

impl BuildOutput {
    /// Indented dump of the syntax tree.
    pub fn tree(&self) -> String {
        self.arena.show(self.root)
    }
}

/// Parse `source` and build its symbol tables.
#[tracing::instrument(level = "debug", skip(source), fields(bytes = source.len()))]
pub fn build_from_source(file_name: &str, source: &str) -> Result<BuildOutput, Error> {
    let mut parser = ParserState::new(file_name.to_string(), source.to_string());
    let root = parser.parse_translation_unit()?;
    let arena = parser.into_arena();
    let tables = build_tables(&arena, root)?;
    tracing::debug!(
        values = tables.values.len(),
        types = tables.types.len(),
        "built symbol tables"
    );
    Ok(BuildOutput {
        file_name: file_name.to_string(),
        arena,
        root,
        tables,
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod lib_tests;
