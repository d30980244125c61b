//! Single-pass symbol table builder.
//!
//! `SymbolTableBuilder` dispatches on node kind. Function definitions open a
//! scope named after the function, with a list-mode `"..."` scope for the
//! parameters and a `"return"` entry. Struct bodies open a list-mode scope
//! `"struct <tag>"` that is mirrored into the type table root. Typedefs of
//! anything but a plain named type open a scope named after the alias in the
//! type table.

use crate::context::{ContextStack, ContextTag};
use crate::fault::StructuralFault;
use crate::scope::{
    PARAMETER_SCOPE, Qualifiers, RETURN_KEY, ScopeMode, ScopeNode, SymbolEntry, SymbolStore,
};
use csym_common::Span;
use csym_parser::{
    DeclarationData, FunctionDefinitionData, NodeArena, NodeData, NodeIndex,
    StructDeclarationData, TypeDeclData, TypedefData,
};
use serde::Serialize;
use tracing::debug;

const ANONYMOUS_TAG: &str = "<anonymous>";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TableKind {
    Values,
    Types,
}

/// Whether the next declaration names a new function scope.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Lookahead {
    #[default]
    Idle,
    ExpectingScopeName,
}

/// The finished value and type tables.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SymbolTables {
    pub values: ScopeNode,
    pub types: ScopeNode,
}

impl SymbolTables {
    pub fn value(&self, name: &str) -> Option<&SymbolEntry> {
        self.values.get(name)
    }

    pub fn type_entry(&self, name: &str) -> Option<&SymbolEntry> {
        self.types.get(name)
    }
}

#[derive(Debug, Default)]
pub struct SymbolTableBuilder {
    values: SymbolStore,
    types: SymbolStore,
    context: ContextStack,
    lookahead: Lookahead,
}

/// Build both tables for the tree rooted at `root`.
pub fn build_tables(arena: &NodeArena, root: NodeIndex) -> Result<SymbolTables, StructuralFault> {
    let mut builder = SymbolTableBuilder::new();
    builder.bind_translation_unit(arena, root)?;
    Ok(builder.finish())
}

impl SymbolTableBuilder {
    pub fn new() -> Self {
        SymbolTableBuilder::default()
    }

    pub fn values(&self) -> &SymbolStore {
        &self.values
    }

    pub fn types(&self) -> &SymbolStore {
        &self.types
    }

    pub fn context(&self) -> &ContextStack {
        &self.context
    }

    pub fn lookahead(&self) -> Lookahead {
        self.lookahead
    }

    /// Consume the builder and hand out the tables.
    pub fn finish(self) -> SymbolTables {
        SymbolTables {
            values: self.values.into_root(),
            types: self.types.into_root(),
        }
    }

    /// Walk the tree rooted at `root`. On a fault, entries committed so far
    /// stay in the tables and both cursor paths are back at their starting
    /// depth.
    #[tracing::instrument(level = "debug", skip(self, arena), fields(root = root.0, nodes = arena.len()))]
    pub fn bind_translation_unit(
        &mut self,
        arena: &NodeArena,
        root: NodeIndex,
    ) -> Result<(), StructuralFault> {
        let value_depth = self.values.depth();
        let type_depth = self.types.depth();
        let result = self.visit(arena, root);
        if result.is_err() {
            self.values.unwind_to(value_depth);
            self.types.unwind_to(type_depth);
            self.lookahead = Lookahead::Idle;
        }
        result
    }

    fn visit(&mut self, arena: &NodeArena, idx: NodeIndex) -> Result<(), StructuralFault> {
        let Some(node) = arena.get(idx) else {
            return Ok(());
        };
        match &node.data {
            NodeData::FunctionDefinition(func) => self.visit_function_definition(arena, func, node.span),
            NodeData::Declaration(decl) => self.visit_declaration(arena, decl, node.span),
            NodeData::StructDeclaration(aggregate) if aggregate.members.is_some() => {
                self.visit_struct(arena, aggregate)
            }
            NodeData::TypedefDeclaration(typedef) => self.visit_typedef(arena, typedef, node.span),
            _ => self.visit_children(arena, idx),
        }
    }

    fn visit_children(&mut self, arena: &NodeArena, idx: NodeIndex) -> Result<(), StructuralFault> {
        let Some(node) = arena.get(idx) else {
            return Ok(());
        };
        for child in node.children() {
            self.visit(arena, child)?;
        }
        Ok(())
    }

    // =========================================================================
    // Functions
    // =========================================================================

    fn visit_function_definition(
        &mut self,
        arena: &NodeArena,
        func: &FunctionDefinitionData,
        span: Span,
    ) -> Result<(), StructuralFault> {
        let table = self.target_table();
        let depth = self.store(table).depth();
        self.lookahead = Lookahead::ExpectingScopeName;

        let result = self.visit(arena, func.declaration).and_then(|()| {
            if self.lookahead == Lookahead::ExpectingScopeName {
                return Err(StructuralFault::MissingFunctionDeclarator { span });
            }
            self.visit(arena, func.body)
        });

        self.lookahead = Lookahead::Idle;
        match result {
            Ok(()) => self.store_mut(table).exit_scope(),
            Err(err) => {
                self.store_mut(table).unwind_to(depth);
                Err(err)
            }
        }
    }

    /// Opens the function scope; `visit_function_definition` closes it after
    /// the body.
    fn open_function_scope(
        &mut self,
        arena: &NodeArena,
        decl: &DeclarationData,
        span: Span,
    ) -> Result<(), StructuralFault> {
        self.lookahead = Lookahead::Idle;
        let name = decl
            .name
            .as_deref()
            .ok_or(StructuralFault::MissingFunctionDeclarator { span })?;
        let (declarator, declarator_span) = match arena.get(decl.type_node) {
            Some(node) => match &node.data {
                NodeData::FunctionDeclarator(declarator) => (declarator, node.span),
                _ => {
                    return Err(StructuralFault::UnexpectedNode {
                        expected: "FunctionDeclarator",
                        found: node.kind_name(),
                        span: node.span,
                    });
                }
            },
            None => return Err(StructuralFault::MissingTypeChain { span }),
        };

        let table = self.target_table();
        debug!(function = name, ?table, "function scope");
        self.store_mut(table).enter_scope(name, ScopeMode::Mapping)?;
        self.with_scope(table, PARAMETER_SCOPE, ScopeMode::List, |builder| {
            builder.with_context(ContextTag::InsideParameterList, |builder| {
                builder.visit(arena, declarator.params)
            })
        })?;
        let returns = return_qualifiers(arena, declarator.type_node, declarator_span)?;
        self.store_mut(table)
            .insert(RETURN_KEY, SymbolEntry::ReturnType(returns))
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn visit_declaration(
        &mut self,
        arena: &NodeArena,
        decl: &DeclarationData,
        span: Span,
    ) -> Result<(), StructuralFault> {
        if self.lookahead == Lookahead::ExpectingScopeName {
            return self.open_function_scope(arena, decl, span);
        }

        if self.context.active(ContextTag::InsideParameterList) {
            let Some(name) = decl.name.as_deref() else {
                return Ok(());
            };
            let qualifiers = base_qualifiers(arena, decl.type_node, span)?;
            let table = self.target_table();
            return self
                .store_mut(table)
                .insert(name, SymbolEntry::NamedType(qualifiers));
        }

        if let Some(aggregate) = struct_body(arena, decl.type_node) {
            self.visit_struct(arena, aggregate)?;
        }
        let Some(name) = decl.name.as_deref() else {
            return Ok(());
        };
        let entry = resolve_entry(arena, decl.type_node, span)?;
        let table = self.target_table();
        self.store_mut(table).insert(name, entry)
    }

    fn visit_struct(
        &mut self,
        arena: &NodeArena,
        aggregate: &StructDeclarationData,
    ) -> Result<(), StructuralFault> {
        let key = aggregate_name(aggregate);
        let members = aggregate.members.as_deref().unwrap_or_default();
        let table = self.target_table();

        self.with_scope(table, &key, ScopeMode::List, |builder| {
            members
                .iter()
                .try_for_each(|&member| builder.visit(arena, member))
        })?;

        // Mirror the finished member list into the type table root.
        let finished = self.store(table).current_node()?.get(&key).cloned();
        if let Some(entry) = finished {
            self.types.insert_at_root(&key, entry);
        }
        Ok(())
    }

    fn visit_typedef(
        &mut self,
        arena: &NodeArena,
        typedef: &TypedefData,
        span: Span,
    ) -> Result<(), StructuralFault> {
        let unresolvable = || StructuralFault::UnresolvableTypedef {
            name: typedef.name.clone(),
            span,
        };
        let target = arena.get(typedef.type_node).ok_or_else(unresolvable)?;

        if let NodeData::TypeDecl(type_decl) = &target.data {
            let aliased = arena.get(type_decl.type_node).ok_or_else(unresolvable)?;
            if let NodeData::NamedType(named) = &aliased.data {
                return self.types.insert(
                    &typedef.name,
                    SymbolEntry::named(named.names.iter().cloned()),
                );
            }
        }

        self.with_scope(TableKind::Types, &typedef.name, ScopeMode::Mapping, |builder| {
            builder.with_context(ContextTag::InsideTypedefTarget, |builder| {
                builder.visit(arena, typedef.type_node)
            })
        })
    }

    // =========================================================================
    // Scoped helpers
    // =========================================================================

    /// Run `f` with `tag` active; the tag is released on every exit path.
    fn with_context<F>(&mut self, tag: ContextTag, f: F) -> Result<(), StructuralFault>
    where
        F: FnOnce(&mut Self) -> Result<(), StructuralFault>,
    {
        self.context.enter(tag);
        let result = f(self);
        self.context.release(tag);
        result
    }

    /// Run `f` inside the scope `name` of `table`. On error the cursor path is
    /// restored to its depth before the call.
    fn with_scope<F>(
        &mut self,
        table: TableKind,
        name: &str,
        mode: ScopeMode,
        f: F,
    ) -> Result<(), StructuralFault>
    where
        F: FnOnce(&mut Self) -> Result<(), StructuralFault>,
    {
        let depth = self.store(table).depth();
        self.store_mut(table).enter_scope(name, mode)?;
        match f(self) {
            Ok(()) => self.store_mut(table).exit_scope(),
            Err(err) => {
                self.store_mut(table).unwind_to(depth);
                Err(err)
            }
        }
    }

    fn target_table(&self) -> TableKind {
        if self.context.active(ContextTag::InsideTypedefTarget) {
            TableKind::Types
        } else {
            TableKind::Values
        }
    }

    fn store(&self, table: TableKind) -> &SymbolStore {
        match table {
            TableKind::Values => &self.values,
            TableKind::Types => &self.types,
        }
    }

    fn store_mut(&mut self, table: TableKind) -> &mut SymbolStore {
        match table {
            TableKind::Values => &mut self.values,
            TableKind::Types => &mut self.types,
        }
    }
}

// =============================================================================
// Declarator resolution
// =============================================================================

fn aggregate_name(aggregate: &StructDeclarationData) -> String {
    let tag = aggregate.tag.as_deref().unwrap_or(ANONYMOUS_TAG);
    format!("{} {tag}", aggregate.kind.keyword())
}

/// Follow pointer, array and function wrappers down to the `TypeDecl`.
fn innermost_type_decl(arena: &NodeArena, mut idx: NodeIndex) -> Option<&TypeDeclData> {
    loop {
        idx = match &arena.get(idx)?.data {
            NodeData::TypeDecl(type_decl) => return Some(type_decl),
            NodeData::PointerDeclarator(ptr) => ptr.type_node,
            NodeData::ArrayDeclarator(array) => array.type_node,
            NodeData::FunctionDeclarator(func) => func.type_node,
            _ => return None,
        };
    }
}

/// The struct carrying a member list at the base of a declarator chain. A
/// tag-only declaration points at the struct directly.
fn struct_body(arena: &NodeArena, idx: NodeIndex) -> Option<&StructDeclarationData> {
    let aggregate = match arena.get_struct(idx) {
        Some(aggregate) => aggregate,
        None => arena.get_struct(innermost_type_decl(arena, idx)?.type_node)?,
    };
    aggregate.members.is_some().then_some(aggregate)
}

/// Type-name tokens of the innermost named type of a chain.
fn base_qualifiers(
    arena: &NodeArena,
    idx: NodeIndex,
    span: Span,
) -> Result<Qualifiers, StructuralFault> {
    let type_decl =
        innermost_type_decl(arena, idx).ok_or(StructuralFault::MissingTypeChain { span })?;
    specifier_qualifiers(arena, type_decl.type_node, span)
}

fn specifier_qualifiers(
    arena: &NodeArena,
    idx: NodeIndex,
    span: Span,
) -> Result<Qualifiers, StructuralFault> {
    let node = arena
        .get(idx)
        .ok_or(StructuralFault::MissingTypeChain { span })?;
    match &node.data {
        NodeData::NamedType(named) => Ok(named.names.iter().cloned().collect()),
        NodeData::StructDeclaration(aggregate) => {
            let tag = aggregate.tag.as_deref().unwrap_or(ANONYMOUS_TAG);
            Ok([aggregate.kind.keyword().to_string(), tag.to_string()]
                .into_iter()
                .collect())
        }
        _ => Err(StructuralFault::UnexpectedNode {
            expected: "NamedType or StructDeclaration",
            found: node.kind_name(),
            span: node.span,
        }),
    }
}

/// Entry for an ordinary declaration, by the shape of the outermost declarator.
fn resolve_entry(
    arena: &NodeArena,
    idx: NodeIndex,
    span: Span,
) -> Result<SymbolEntry, StructuralFault> {
    let node = arena
        .get(idx)
        .ok_or(StructuralFault::MissingTypeChain { span })?;
    match &node.data {
        NodeData::TypeDecl(type_decl) => Ok(SymbolEntry::NamedType(specifier_qualifiers(
            arena,
            type_decl.type_node,
            node.span,
        )?)),
        NodeData::ArrayDeclarator(array) => Ok(SymbolEntry::ArrayType {
            dimension: arena
                .get_literal_text(array.dimension)
                .unwrap_or_default()
                .to_string(),
            element: base_qualifiers(arena, array.type_node, node.span)?,
        }),
        NodeData::PointerDeclarator(ptr) => resolve_pointee(arena, ptr.type_node, node.span),
        NodeData::FunctionDeclarator(func) => Ok(SymbolEntry::ReturnType(return_qualifiers(
            arena,
            func.type_node,
            node.span,
        )?)),
        _ => Err(StructuralFault::UnexpectedNode {
            expected: "declarator",
            found: node.kind_name(),
            span: node.span,
        }),
    }
}

fn resolve_pointee(
    arena: &NodeArena,
    idx: NodeIndex,
    span: Span,
) -> Result<SymbolEntry, StructuralFault> {
    let type_decl =
        innermost_type_decl(arena, idx).ok_or(StructuralFault::MissingTypeChain { span })?;
    if let Some(aggregate) = arena.get_struct(type_decl.type_node) {
        return Ok(SymbolEntry::pointer(aggregate_name(aggregate), true));
    }
    let names = specifier_qualifiers(arena, type_decl.type_node, span)?;
    Ok(SymbolEntry::pointer(names.join(" "), false))
}

/// Return-type tokens: a direct type gives its names, a pointer its own
/// qualifiers, an array nothing. The chain is not followed further.
fn return_qualifiers(
    arena: &NodeArena,
    idx: NodeIndex,
    span: Span,
) -> Result<Qualifiers, StructuralFault> {
    let node = arena
        .get(idx)
        .ok_or(StructuralFault::MissingTypeChain { span })?;
    match &node.data {
        NodeData::TypeDecl(type_decl) => specifier_qualifiers(arena, type_decl.type_node, node.span),
        NodeData::PointerDeclarator(ptr) => Ok(ptr.qualifiers.iter().cloned().collect()),
        NodeData::ArrayDeclarator(_) => Ok(Qualifiers::new()),
        _ => Err(StructuralFault::UnexpectedNode {
            expected: "return type",
            found: node.kind_name(),
            span: node.span,
        }),
    }
}
