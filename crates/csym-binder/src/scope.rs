//! Hierarchical symbol store.
//!
//! A `SymbolStore` owns a tree of `ScopeNode`s and a cursor path naming the
//! scope that receives inserts. Each scope is either keyed by name
//! (`Mapping`) or an ordered list of `(name, entry)` pairs (`List`); the mode
//! is fixed when the scope is created.

use crate::fault::StructuralFault;
use csym_common::limits::MAX_SCOPE_DEPTH;
use indexmap::IndexMap;
use serde::Serialize;
use smallvec::SmallVec;
use tracing::debug;

/// Key of the parameter list inside a function scope.
pub const PARAMETER_SCOPE: &str = "...";
/// Key of the return type inside a function scope.
pub const RETURN_KEY: &str = "return";

/// Type-name tokens, e.g. `["unsigned", "int"]` or `["struct", "foobar"]`.
pub type Qualifiers = SmallVec<[String; 2]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ScopeMode {
    Mapping,
    List,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SymbolEntry {
    NamedType(Qualifiers),
    ArrayType {
        dimension: String,
        element: Qualifiers,
    },
    PointerType {
        pointee: String,
        struct_qualified: bool,
    },
    ReturnType(Qualifiers),
    /// A function body, struct member list, parameter list or typedef target.
    NestedScope(ScopeNode),
}

impl SymbolEntry {
    pub fn named<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SymbolEntry::NamedType(names.into_iter().map(Into::into).collect())
    }

    pub fn array<I, S>(dimension: impl Into<String>, element: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SymbolEntry::ArrayType {
            dimension: dimension.into(),
            element: element.into_iter().map(Into::into).collect(),
        }
    }

    pub fn pointer(pointee: impl Into<String>, struct_qualified: bool) -> Self {
        SymbolEntry::PointerType {
            pointee: pointee.into(),
            struct_qualified,
        }
    }

    pub fn returns<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SymbolEntry::ReturnType(names.into_iter().map(Into::into).collect())
    }

    pub fn as_scope(&self) -> Option<&ScopeNode> {
        match self {
            SymbolEntry::NestedScope(scope) => Some(scope),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScopeNode {
    Mapping(IndexMap<String, SymbolEntry>),
    List(Vec<(String, SymbolEntry)>),
}

impl ScopeNode {
    pub fn new(mode: ScopeMode) -> Self {
        match mode {
            ScopeMode::Mapping => ScopeNode::Mapping(IndexMap::new()),
            ScopeMode::List => ScopeNode::List(Vec::new()),
        }
    }

    pub fn mapping<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, SymbolEntry)>,
        S: Into<String>,
    {
        ScopeNode::Mapping(
            entries
                .into_iter()
                .map(|(name, entry)| (name.into(), entry))
                .collect(),
        )
    }

    pub fn list<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, SymbolEntry)>,
        S: Into<String>,
    {
        ScopeNode::List(
            entries
                .into_iter()
                .map(|(name, entry)| (name.into(), entry))
                .collect(),
        )
    }

    pub fn mode(&self) -> ScopeMode {
        match self {
            ScopeNode::Mapping(_) => ScopeMode::Mapping,
            ScopeNode::List(_) => ScopeMode::List,
        }
    }

    /// Look up `name`; in a list the last pair with that name wins.
    pub fn get(&self, name: &str) -> Option<&SymbolEntry> {
        match self {
            ScopeNode::Mapping(map) => map.get(name),
            ScopeNode::List(pairs) => pairs
                .iter()
                .rev()
                .find(|(key, _)| key == name)
                .map(|(_, entry)| entry),
        }
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut SymbolEntry> {
        match self {
            ScopeNode::Mapping(map) => map.get_mut(name),
            ScopeNode::List(pairs) => pairs
                .iter_mut()
                .rev()
                .find(|(key, _)| key == name)
                .map(|(_, entry)| entry),
        }
    }

    /// Append in a list; set (silently overwriting) in a mapping.
    pub fn insert(&mut self, name: impl Into<String>, entry: SymbolEntry) {
        match self {
            ScopeNode::Mapping(map) => {
                map.insert(name.into(), entry);
            }
            ScopeNode::List(pairs) => pairs.push((name.into(), entry)),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ScopeNode::Mapping(map) => map.len(),
            ScopeNode::List(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names in insertion order; lists may repeat a name.
    pub fn names(&self) -> Vec<&str> {
        match self {
            ScopeNode::Mapping(map) => map.keys().map(String::as_str).collect(),
            ScopeNode::List(pairs) => pairs.iter().map(|(name, _)| name.as_str()).collect(),
        }
    }
}

/// A scope tree plus the cursor path addressing the current scope.
#[derive(Clone, Debug)]
pub struct SymbolStore {
    root: ScopeNode,
    path: Vec<String>,
}

impl Default for SymbolStore {
    fn default() -> Self {
        SymbolStore::new()
    }
}

impl SymbolStore {
    pub fn new() -> Self {
        SymbolStore {
            root: ScopeNode::new(ScopeMode::Mapping),
            path: Vec::new(),
        }
    }

    pub fn root(&self) -> &ScopeNode {
        &self.root
    }

    pub fn into_root(self) -> ScopeNode {
        self.root
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn current_node(&self) -> Result<&ScopeNode, StructuralFault> {
        let mut node = &self.root;
        for elem in &self.path {
            node = match node.get(elem) {
                Some(SymbolEntry::NestedScope(child)) => child,
                _ => return Err(self.missing_scope()),
            };
        }
        Ok(node)
    }

    fn current_node_mut(&mut self) -> Result<&mut ScopeNode, StructuralFault> {
        let SymbolStore { root, path } = self;
        let mut node = root;
        for elem in path.iter() {
            node = match node.get_mut(elem) {
                Some(SymbolEntry::NestedScope(child)) => child,
                _ => {
                    return Err(StructuralFault::MissingScope { path: path.clone() });
                }
            };
        }
        Ok(node)
    }

    fn missing_scope(&self) -> StructuralFault {
        StructuralFault::MissingScope {
            path: self.path.clone(),
        }
    }

    /// Install a fresh, empty scope of `mode` as `name` under the current scope
    /// and move the cursor into it. A mapping parent overwrites any earlier
    /// entry of that name; a list parent appends a new pair, which is the one
    /// the cursor then addresses.
    pub fn enter_scope(&mut self, name: &str, mode: ScopeMode) -> Result<(), StructuralFault> {
        if self.path.len() >= MAX_SCOPE_DEPTH {
            return Err(StructuralFault::NestingTooDeep {
                limit: MAX_SCOPE_DEPTH,
            });
        }
        self.current_node_mut()?
            .insert(name, SymbolEntry::NestedScope(ScopeNode::new(mode)));
        self.path.push(name.to_string());
        debug!(scope = name, ?mode, path = ?self.path, "enter scope");
        Ok(())
    }

    pub fn exit_scope(&mut self) -> Result<(), StructuralFault> {
        let name = self.path.pop().ok_or(StructuralFault::ScopeUnderflow)?;
        debug!(scope = %name, path = ?self.path, "exit scope");
        Ok(())
    }

    /// Pop the cursor back to `depth` levels. Used to restore balance after a
    /// fault interrupted a subtree visit.
    pub fn unwind_to(&mut self, depth: usize) {
        if self.path.len() > depth {
            debug!(from = self.path.len(), to = depth, "unwind scopes");
            self.path.truncate(depth);
        }
    }

    pub fn insert(&mut self, name: &str, entry: SymbolEntry) -> Result<(), StructuralFault> {
        debug!(name, path = ?self.path, "insert symbol");
        self.current_node_mut()?.insert(name, entry);
        Ok(())
    }

    /// Set `name` directly on the root scope, ignoring the cursor.
    pub fn insert_at_root(&mut self, name: &str, entry: SymbolEntry) {
        self.root.insert(name, entry);
    }

    /// Look up `name` on the root scope.
    pub fn get(&self, name: &str) -> Option<&SymbolEntry> {
        self.root.get(name)
    }
}
