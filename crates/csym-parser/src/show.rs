//! Indented dump of a syntax tree, one node per line.

use crate::node::{NodeArena, NodeData, NodeIndex};
use std::fmt::Write;

impl NodeArena {
    /// Render the subtree rooted at `root`.
    ///
    /// ```text
    /// TranslationUnit: <stdin>
    ///   Declaration: q
    ///     ArrayDeclarator
    ///       TypeDecl: q
    ///         NamedType: int
    ///       Constant: 100
    /// ```
    pub fn show(&self, root: NodeIndex) -> String {
        let mut out = String::new();
        self.show_node(root, 0, &mut out);
        out
    }

    fn show_node(&self, idx: NodeIndex, depth: usize, out: &mut String) {
        let Some(node) = self.get(idx) else {
            return;
        };
        let _ = write!(out, "{:indent$}{}", "", node.kind_name(), indent = depth * 2);
        let detail = match &node.data {
            NodeData::TranslationUnit(unit) => Some(unit.file_name.clone()),
            NodeData::Declaration(decl) => {
                let mut parts = vec![decl.name.clone().unwrap_or_else(|| "<unnamed>".into())];
                parts.extend(decl.storage.iter().cloned());
                parts.extend(decl.qualifiers.iter().cloned());
                Some(parts.join(", "))
            }
            NodeData::TypedefDeclaration(typedef) => Some(typedef.name.clone()),
            NodeData::TypeDecl(type_decl) => type_decl.declname.clone(),
            NodeData::PointerDeclarator(ptr) if !ptr.qualifiers.is_empty() => {
                Some(ptr.qualifiers.join(" "))
            }
            NodeData::ParamList(list) if list.variadic => Some("...".into()),
            NodeData::NamedType(named) => Some(named.names.join(" ")),
            NodeData::StructDeclaration(aggregate) => Some(format!(
                "{} {}",
                aggregate.kind.keyword(),
                aggregate.tag.as_deref().unwrap_or("<anonymous>")
            )),
            NodeData::Constant(constant) => Some(constant.value.clone()),
            NodeData::Identifier(ident) => Some(ident.name.clone()),
            NodeData::Expression(expr) => Some(expr.text.clone()),
            _ => None,
        };
        if let Some(detail) = detail {
            let _ = write!(out, ": {detail}");
        }
        out.push('\n');

        for child in node.children() {
            self.show_node(child, depth + 1, out);
        }
    }
}
