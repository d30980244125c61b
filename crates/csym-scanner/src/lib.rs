//! C scanner/tokenizer for csymtab.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine
//! - `ScanError` - Lexical errors with their source span

pub mod syntax_kind;
pub use syntax_kind::*;

pub mod scanner_impl;
pub use scanner_impl::{ScanError, ScannerState, Token};

#[cfg(test)]
#[path = "tests/syntax_kind_tests.rs"]
mod syntax_kind_tests;
