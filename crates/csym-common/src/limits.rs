//! Centralized limits for the parser and the symbol table builder.
//!
//! Both walk the syntax tree recursively, so each recursion has a depth cap
//! that turns a pathological input into an error instead of a stack overflow.

/// Maximum nesting of declarators (`*`, `[]`, `()` and parenthesized
/// declarators) the parser accepts for a single declaration.
///
/// ```c
/// int **********************************************************p;
/// ```
pub const MAX_DECLARATOR_DEPTH: u32 = 256;

/// Maximum nesting of struct bodies inside one declaration.
pub const MAX_STRUCT_NESTING: u32 = 64;

/// Maximum length of the builder's cursor path.
///
/// Function bodies, parameter lists, struct bodies and typedef targets each
/// push one level; exceeding this is reported as a structural fault.
pub const MAX_SCOPE_DEPTH: usize = 128;

/// Initial capacity of the parser's node arena, per byte of source.
///
/// Declaration-heavy C averages roughly one node per eight bytes.
pub const NODES_PER_SOURCE_BYTE_DIVISOR: usize = 8;
