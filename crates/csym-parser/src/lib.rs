//! Declaration-level C parser for csymtab.
//!
//! `ParserState` turns source text into a read-only tree stored in a
//! `NodeArena`. Consumers walk the tree by `NodeIndex`:
//!
//! ```
//! use csym_parser::ParserState;
//!
//! let mut parser = ParserState::new("demo.c".to_string(), "int q[100];".to_string());
//! let root = parser.parse_translation_unit().unwrap();
//! assert!(parser.get_arena().get(root).is_some());
//! ```

pub mod node;
pub use node::{
    AggregateKind, ArrayDeclaratorData, CompoundData, ConstantData, DeclarationData,
    ExpressionData, FunctionDeclaratorData, FunctionDefinitionData, IdentifierData,
    NamedTypeData, Node, NodeArena, NodeData, NodeIndex, ParamListData, PointerDeclaratorData,
    StructDeclarationData, TranslationUnitData, TypeDeclData, TypedefData,
};

pub mod state;
pub use state::{ParseError, ParserState};

mod show;

#[cfg(test)]
#[path = "tests/node_tests.rs"]
mod node_tests;
