//! Traversal contexts active while the builder descends a subtree.

use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContextTag {
    /// Inside the aliased type of a typedef; declarations go to the type table.
    InsideTypedefTarget,
    /// Inside a function's parameter list; declarations become parameters.
    InsideParameterList,
}

/// A small stack of active context tags.
///
/// Tags are acquired and released in strict nesting order by
/// `SymbolTableBuilder::with_context`; the same tag may be active more than
/// once (a typedef nested in a typedef target).
#[derive(Clone, Debug, Default)]
pub struct ContextStack {
    tags: SmallVec<[ContextTag; 4]>,
}

impl ContextStack {
    pub fn new() -> Self {
        ContextStack::default()
    }

    pub fn active(&self, tag: ContextTag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn depth(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub(crate) fn enter(&mut self, tag: ContextTag) {
        self.tags.push(tag);
    }

    /// Remove the most recent occurrence of `tag`.
    pub(crate) fn release(&mut self, tag: ContextTag) {
        if let Some(pos) = self.tags.iter().rposition(|&t| t == tag) {
            self.tags.remove(pos);
        }
    }
}
