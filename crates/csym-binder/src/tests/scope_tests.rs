use super::fault::StructuralFault;
use super::scope::{ScopeMode, ScopeNode, SymbolEntry, SymbolStore};
use csym_common::limits::MAX_SCOPE_DEPTH;

#[test]
fn test_mapping_insert_overwrites_in_place() {
    let mut store = SymbolStore::new();
    store.insert("a", SymbolEntry::named(["int"])).unwrap();
    store.insert("b", SymbolEntry::named(["char"])).unwrap();
    store.insert("a", SymbolEntry::named(["long"])).unwrap();

    assert_eq!(store.root().names(), vec!["a", "b"]);
    assert_eq!(store.get("a"), Some(&SymbolEntry::named(["long"])));
}

#[test]
fn test_list_insert_appends() {
    let mut store = SymbolStore::new();
    store.enter_scope("...", ScopeMode::List).unwrap();
    store.insert("a", SymbolEntry::named(["int"])).unwrap();
    store.insert("a", SymbolEntry::named(["char"])).unwrap();
    let current = store.current_node().unwrap();
    assert_eq!(current.mode(), ScopeMode::List);
    assert_eq!(current.names(), vec!["a", "a"]);
    assert_eq!(current.get("a"), Some(&SymbolEntry::named(["char"])));
    store.exit_scope().unwrap();
    assert!(store.path().is_empty());
}

#[test]
fn test_enter_scope_starts_fresh_in_mapping() {
    let mut store = SymbolStore::new();
    store.enter_scope("f", ScopeMode::Mapping).unwrap();
    store.insert("x", SymbolEntry::named(["int"])).unwrap();
    store.exit_scope().unwrap();
    store.insert("g", SymbolEntry::named(["int"])).unwrap();

    store.enter_scope("f", ScopeMode::Mapping).unwrap();
    store.insert("y", SymbolEntry::named(["int"])).unwrap();
    store.exit_scope().unwrap();

    let scope = store.get("f").and_then(SymbolEntry::as_scope).unwrap();
    assert_eq!(scope.names(), vec!["y"]);
    assert_eq!(store.root().names(), vec!["f", "g"]);
}

#[test]
fn test_enter_scope_appends_fresh_pair_in_list() {
    let mut store = SymbolStore::new();
    store.enter_scope("struct outer", ScopeMode::List).unwrap();
    for member in ["a", "b"] {
        store.enter_scope("struct <anonymous>", ScopeMode::List).unwrap();
        store.insert(member, SymbolEntry::named(["int"])).unwrap();
        store.exit_scope().unwrap();
    }
    store.exit_scope().unwrap();

    let outer = store.get("struct outer").and_then(SymbolEntry::as_scope).unwrap();
    assert_eq!(outer, &ScopeNode::list([
        (
            "struct <anonymous>",
            SymbolEntry::NestedScope(ScopeNode::list([("a", SymbolEntry::named(["int"]))])),
        ),
        (
            "struct <anonymous>",
            SymbolEntry::NestedScope(ScopeNode::list([("b", SymbolEntry::named(["int"]))])),
        ),
    ]));
}

#[test]
fn test_enter_scope_replaces_other_values() {
    let mut store = SymbolStore::new();
    store.insert("s", SymbolEntry::named(["int"])).unwrap();
    store.enter_scope("s", ScopeMode::List).unwrap();
    store.exit_scope().unwrap();
    assert_eq!(
        store.get("s"),
        Some(&SymbolEntry::NestedScope(ScopeNode::new(ScopeMode::List)))
    );

    store.enter_scope("s", ScopeMode::Mapping).unwrap();
    store.exit_scope().unwrap();
    assert_eq!(
        store.get("s").and_then(SymbolEntry::as_scope).map(ScopeNode::mode),
        Some(ScopeMode::Mapping)
    );
}

#[test]
fn test_nested_scope_inside_list_is_addressed_by_last_pair() {
    let mut store = SymbolStore::new();
    store.enter_scope("struct outer", ScopeMode::List).unwrap();
    store.insert("a", SymbolEntry::named(["int"])).unwrap();
    store.enter_scope("struct inner", ScopeMode::List).unwrap();
    store.insert("x", SymbolEntry::named(["char"])).unwrap();
    assert_eq!(store.path(), ["struct outer", "struct inner"]);
    store.exit_scope().unwrap();
    store.exit_scope().unwrap();

    let outer = store.get("struct outer").and_then(SymbolEntry::as_scope).unwrap();
    assert_eq!(outer.names(), vec!["a", "struct inner"]);
    assert_eq!(
        outer.get("struct inner"),
        Some(&SymbolEntry::NestedScope(ScopeNode::list([(
            "x",
            SymbolEntry::named(["char"])
        )])))
    );
}

#[test]
fn test_exit_scope_on_empty_path_is_a_fault() {
    let mut store = SymbolStore::new();
    assert_eq!(store.exit_scope(), Err(StructuralFault::ScopeUnderflow));
}

#[test]
fn test_unwind_to_restores_depth() {
    let mut store = SymbolStore::new();
    store.enter_scope("a", ScopeMode::Mapping).unwrap();
    store.enter_scope("b", ScopeMode::Mapping).unwrap();
    store.enter_scope("c", ScopeMode::List).unwrap();
    store.unwind_to(1);
    assert_eq!(store.path(), ["a"]);
    store.unwind_to(5);
    assert_eq!(store.depth(), 1);
}

#[test]
fn test_insert_at_root_ignores_cursor() {
    let mut store = SymbolStore::new();
    store.enter_scope("f", ScopeMode::Mapping).unwrap();
    store.insert_at_root("g", SymbolEntry::named(["int"]));
    assert!(store.current_node().unwrap().is_empty());
    assert_eq!(store.get("g"), Some(&SymbolEntry::named(["int"])));
}

#[test]
fn test_scope_depth_limit() {
    let mut store = SymbolStore::new();
    for depth in 0..MAX_SCOPE_DEPTH {
        store.enter_scope(&format!("s{depth}"), ScopeMode::Mapping).unwrap();
    }
    assert_eq!(
        store.enter_scope("deeper", ScopeMode::Mapping),
        Err(StructuralFault::NestingTooDeep {
            limit: MAX_SCOPE_DEPTH
        })
    );
    assert_eq!(store.depth(), MAX_SCOPE_DEPTH);
}

#[test]
fn test_mapping_equality_ignores_order() {
    let left = ScopeNode::mapping([
        ("a", SymbolEntry::named(["int"])),
        ("b", SymbolEntry::named(["char"])),
    ]);
    let right = ScopeNode::mapping([
        ("b", SymbolEntry::named(["char"])),
        ("a", SymbolEntry::named(["int"])),
    ]);
    assert_eq!(left, right);
}
