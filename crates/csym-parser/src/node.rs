//! Syntax tree node types and the arena that owns them.
//!
//! The tree mirrors the shape of classic C front ends: a declaration carries a
//! name and a *type chain*. The chain is a sequence of declarator wrappers
//! (`PointerDeclarator`, `ArrayDeclarator`, `FunctionDeclarator`) ending in a
//! `TypeDecl`, which wraps the type specifier (`NamedType` or
//! `StructDeclaration`).
//!
//! ```text
//! struct foobar * fb;
//!
//! Declaration fb
//!   PointerDeclarator
//!     TypeDecl fb
//!       StructDeclaration struct foobar
//! ```

use csym_common::Span;
use serde::Serialize;

/// Index of a node in its `NodeArena`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    pub const fn is_some(self) -> bool {
        !self.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AggregateKind {
    Struct,
    Union,
}

impl AggregateKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            AggregateKind::Struct => "struct",
            AggregateKind::Union => "union",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TranslationUnitData {
    pub file_name: String,
    pub declarations: Vec<NodeIndex>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FunctionDefinitionData {
    /// The `Declaration` naming the function; its type chain starts with a
    /// `FunctionDeclarator`.
    pub declaration: NodeIndex,
    /// The `Compound` body.
    pub body: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DeclarationData {
    /// `None` for declarations that only introduce a tag (`struct s { ... };`).
    pub name: Option<String>,
    pub storage: Vec<String>,
    pub qualifiers: Vec<String>,
    pub type_node: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TypedefData {
    pub name: String,
    pub qualifiers: Vec<String>,
    pub type_node: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TypeDeclData {
    pub declname: Option<String>,
    pub qualifiers: Vec<String>,
    /// A `NamedType` or a `StructDeclaration`.
    pub type_node: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArrayDeclaratorData {
    /// `Constant`, `Identifier` or `Expression`; `NONE` for `[]`.
    pub dimension: NodeIndex,
    pub type_node: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PointerDeclaratorData {
    /// Qualifiers written after the `*` (`int * const p`).
    pub qualifiers: Vec<String>,
    pub type_node: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FunctionDeclaratorData {
    /// `ParamList`, or `NONE` for an old-style `f()` declarator.
    pub params: NodeIndex,
    pub type_node: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParamListData {
    pub params: Vec<NodeIndex>,
    pub variadic: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NamedTypeData {
    pub names: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StructDeclarationData {
    pub kind: AggregateKind,
    pub tag: Option<String>,
    /// `None` for a reference to a tag (`struct foobar *`), `Some` when the
    /// node carries a member list.
    pub members: Option<Vec<NodeIndex>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompoundData {
    pub items: Vec<NodeIndex>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConstantData {
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IdentifierData {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExpressionData {
    /// Raw source text of an expression the parser does not model.
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum NodeData {
    TranslationUnit(TranslationUnitData),
    FunctionDefinition(FunctionDefinitionData),
    Declaration(DeclarationData),
    TypedefDeclaration(TypedefData),
    TypeDecl(TypeDeclData),
    ArrayDeclarator(ArrayDeclaratorData),
    PointerDeclarator(PointerDeclaratorData),
    FunctionDeclarator(FunctionDeclaratorData),
    ParamList(ParamListData),
    NamedType(NamedTypeData),
    StructDeclaration(StructDeclarationData),
    Compound(CompoundData),
    Constant(ConstantData),
    Identifier(IdentifierData),
    Expression(ExpressionData),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Node {
    pub span: Span,
    pub data: NodeData,
}

impl Node {
    pub fn new(span: Span, data: NodeData) -> Self {
        Node { span, data }
    }

    pub fn kind_name(&self) -> &'static str {
        match &self.data {
            NodeData::TranslationUnit(_) => "TranslationUnit",
            NodeData::FunctionDefinition(_) => "FunctionDefinition",
            NodeData::Declaration(_) => "Declaration",
            NodeData::TypedefDeclaration(_) => "TypedefDeclaration",
            NodeData::TypeDecl(_) => "TypeDecl",
            NodeData::ArrayDeclarator(_) => "ArrayDeclarator",
            NodeData::PointerDeclarator(_) => "PointerDeclarator",
            NodeData::FunctionDeclarator(_) => "FunctionDeclarator",
            NodeData::ParamList(_) => "ParamList",
            NodeData::NamedType(_) => "NamedType",
            NodeData::StructDeclaration(_) => "StructDeclaration",
            NodeData::Compound(_) => "Compound",
            NodeData::Constant(_) => "Constant",
            NodeData::Identifier(_) => "Identifier",
            NodeData::Expression(_) => "Expression",
        }
    }

    /// Child nodes in source order.
    pub fn children(&self) -> Vec<NodeIndex> {
        let children = match &self.data {
            NodeData::TranslationUnit(unit) => unit.declarations.clone(),
            NodeData::FunctionDefinition(func) => vec![func.declaration, func.body],
            NodeData::Declaration(decl) => vec![decl.type_node],
            NodeData::TypedefDeclaration(typedef) => vec![typedef.type_node],
            NodeData::TypeDecl(type_decl) => vec![type_decl.type_node],
            NodeData::ArrayDeclarator(array) => vec![array.type_node, array.dimension],
            NodeData::PointerDeclarator(ptr) => vec![ptr.type_node],
            NodeData::FunctionDeclarator(func) => vec![func.params, func.type_node],
            NodeData::ParamList(list) => list.params.clone(),
            NodeData::StructDeclaration(aggregate) => {
                aggregate.members.clone().unwrap_or_default()
            }
            NodeData::Compound(block) => block.items.clone(),
            NodeData::NamedType(_)
            | NodeData::Constant(_)
            | NodeData::Identifier(_)
            | NodeData::Expression(_) => Vec::new(),
        };
        children.into_iter().filter(|idx| idx.is_some()).collect()
    }
}

/// Arena-based storage for syntax tree nodes.
/// Nodes are stored contiguously and referenced by index.
#[derive(Debug, Default, Serialize)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena { nodes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Add a node to the arena and return its index
    pub fn add(&mut self, span: Span, data: NodeData) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(Node::new(span, data));
        NodeIndex(index)
    }

    /// Get a node by index
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get_declaration(&self, index: NodeIndex) -> Option<&DeclarationData> {
        match &self.get(index)?.data {
            NodeData::Declaration(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn get_function_declarator(&self, index: NodeIndex) -> Option<&FunctionDeclaratorData> {
        match &self.get(index)?.data {
            NodeData::FunctionDeclarator(func) => Some(func),
            _ => None,
        }
    }

    pub fn get_struct(&self, index: NodeIndex) -> Option<&StructDeclarationData> {
        match &self.get(index)?.data {
            NodeData::StructDeclaration(aggregate) => Some(aggregate),
            _ => None,
        }
    }

    pub fn get_named_type(&self, index: NodeIndex) -> Option<&NamedTypeData> {
        match &self.get(index)?.data {
            NodeData::NamedType(named) => Some(named),
            _ => None,
        }
    }

    /// Literal text of an array dimension expression.
    pub fn get_literal_text(&self, index: NodeIndex) -> Option<&str> {
        match &self.get(index)?.data {
            NodeData::Constant(constant) => Some(&constant.value),
            NodeData::Identifier(ident) => Some(&ident.name),
            NodeData::Expression(expr) => Some(&expr.text),
            _ => None,
        }
    }
}
