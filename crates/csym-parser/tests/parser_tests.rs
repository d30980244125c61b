use csym_parser::{NodeArena, NodeData, NodeIndex, ParseError, ParserState};

fn parse(source: &str) -> (NodeArena, Vec<NodeIndex>) {
    let mut parser = ParserState::new("test.c".to_string(), source.to_string());
    let root = parser.parse_translation_unit().expect("parse should succeed");
    let arena = parser.into_arena();
    let declarations = match &arena.get(root).unwrap().data {
        NodeData::TranslationUnit(unit) => unit.declarations.clone(),
        other => panic!("root is not a translation unit: {other:?}"),
    };
    (arena, declarations)
}

fn parse_err(source: &str) -> ParseError {
    let mut parser = ParserState::new("test.c".to_string(), source.to_string());
    parser
        .parse_translation_unit()
        .expect_err("parse should fail")
}

/// Kind names along the type chain of a declaration, outermost first.
fn chain(arena: &NodeArena, decl: NodeIndex) -> Vec<&'static str> {
    let mut kinds = Vec::new();
    let mut current = match &arena.get(decl).unwrap().data {
        NodeData::Declaration(d) => d.type_node,
        NodeData::TypedefDeclaration(t) => t.type_node,
        other => panic!("not a declaration: {other:?}"),
    };
    while let Some(node) = arena.get(current) {
        kinds.push(node.kind_name());
        current = match &node.data {
            NodeData::PointerDeclarator(p) => p.type_node,
            NodeData::ArrayDeclarator(a) => a.type_node,
            NodeData::FunctionDeclarator(f) => f.type_node,
            NodeData::TypeDecl(t) => t.type_node,
            _ => NodeIndex::NONE,
        };
    }
    kinds
}

#[test]
fn test_parse_multiple_declarators() {
    let (arena, decls) = parse("int a, *b, c[3];");
    assert_eq!(decls.len(), 3);
    assert_eq!(chain(&arena, decls[0]), vec!["TypeDecl", "NamedType"]);
    assert_eq!(
        chain(&arena, decls[1]),
        vec!["PointerDeclarator", "TypeDecl", "NamedType"]
    );
    assert_eq!(
        chain(&arena, decls[2]),
        vec!["ArrayDeclarator", "TypeDecl", "NamedType"]
    );
}

#[test]
fn test_array_of_pointers_and_pointer_to_array() {
    let (arena, decls) = parse("int *a[3]; int (*b)[3];");
    assert_eq!(
        chain(&arena, decls[0]),
        vec!["ArrayDeclarator", "PointerDeclarator", "TypeDecl", "NamedType"]
    );
    assert_eq!(
        chain(&arena, decls[1]),
        vec!["PointerDeclarator", "ArrayDeclarator", "TypeDecl", "NamedType"]
    );
}

#[test]
fn test_function_pointer_declarator() {
    let (arena, decls) = parse("int (*handler)(int code, char *msg);");
    assert_eq!(
        chain(&arena, decls[0]),
        vec!["PointerDeclarator", "FunctionDeclarator", "TypeDecl", "NamedType"]
    );
}

#[test]
fn test_function_definition_shape() {
    let (arena, decls) = parse("int foo(int a, int b) { int x; int y; return (x+y); }");
    assert_eq!(decls.len(), 1);
    let NodeData::FunctionDefinition(func) = &arena.get(decls[0]).unwrap().data else {
        panic!("expected a function definition");
    };
    let decl = arena.get_declaration(func.declaration).unwrap();
    assert_eq!(decl.name.as_deref(), Some("foo"));
    let declarator = arena.get_function_declarator(decl.type_node).unwrap();
    let NodeData::ParamList(params) = &arena.get(declarator.params).unwrap().data else {
        panic!("expected a parameter list");
    };
    assert_eq!(params.params.len(), 2);

    let NodeData::Compound(body) = &arena.get(func.body).unwrap().data else {
        panic!("expected a compound body");
    };
    let names: Vec<_> = body
        .items
        .iter()
        .filter_map(|&item| arena.get_declaration(item)?.name.clone())
        .collect();
    assert_eq!(names, vec!["x", "y"]);
}

#[test]
fn test_implicit_int_and_empty_params() {
    let (arena, decls) = parse("test() {};");
    let NodeData::FunctionDefinition(func) = &arena.get(decls[0]).unwrap().data else {
        panic!("expected a function definition");
    };
    let decl = arena.get_declaration(func.declaration).unwrap();
    let declarator = arena.get_function_declarator(decl.type_node).unwrap();
    assert!(declarator.params.is_none());
    assert_eq!(
        chain(&arena, func.declaration),
        vec!["FunctionDeclarator", "TypeDecl", "NamedType"]
    );
}

#[test]
fn test_void_parameter_list_is_empty() {
    let (arena, decls) = parse("int main(void);");
    let decl = arena.get_declaration(decls[0]).unwrap();
    let declarator = arena.get_function_declarator(decl.type_node).unwrap();
    let NodeData::ParamList(params) = &arena.get(declarator.params).unwrap().data else {
        panic!("expected a parameter list");
    };
    assert!(params.params.is_empty());
    assert!(!params.variadic);
}

#[test]
fn test_variadic_and_unnamed_parameters() {
    let (arena, decls) = parse("int printf(const char *fmt, ...); void g(int, char *);");
    let decl = arena.get_declaration(decls[0]).unwrap();
    let declarator = arena.get_function_declarator(decl.type_node).unwrap();
    let NodeData::ParamList(params) = &arena.get(declarator.params).unwrap().data else {
        panic!("expected a parameter list");
    };
    assert!(params.variadic);
    assert_eq!(params.params.len(), 1);

    let decl = arena.get_declaration(decls[1]).unwrap();
    let declarator = arena.get_function_declarator(decl.type_node).unwrap();
    let NodeData::ParamList(params) = &arena.get(declarator.params).unwrap().data else {
        panic!("expected a parameter list");
    };
    assert!(params.params.is_empty());
}

#[test]
fn test_typedef_names_are_tracked() {
    let source = "typedef int strange_unit; strange_unit bob; typedef strange_unit *unit_ptr;";
    let mut parser = ParserState::new("test.c".to_string(), source.to_string());
    parser.parse_translation_unit().unwrap();
    let mut names: Vec<_> = parser.typedef_names().collect();
    names.sort_unstable();
    assert_eq!(names, vec!["strange_unit", "unit_ptr"]);
}

#[test]
fn test_struct_body_belongs_to_first_declarator_only() {
    let (arena, decls) = parse("struct pair { int a; int b; } p, q;");
    let member_lists: Vec<bool> = decls
        .iter()
        .map(|&decl| {
            let decl = arena.get_declaration(decl).unwrap();
            let NodeData::TypeDecl(type_decl) = &arena.get(decl.type_node).unwrap().data else {
                panic!("expected a type decl");
            };
            arena.get_struct(type_decl.type_node).unwrap().members.is_some()
        })
        .collect();
    assert_eq!(member_lists, vec![true, false]);
}

#[test]
fn test_array_dimension_forms() {
    let (arena, decls) = parse("int a[10]; int b[N]; int c[N + 1]; int d[];");
    let dims: Vec<Option<String>> = decls
        .iter()
        .map(|&decl| {
            let decl = arena.get_declaration(decl).unwrap();
            let NodeData::ArrayDeclarator(array) = &arena.get(decl.type_node).unwrap().data else {
                panic!("expected an array declarator");
            };
            arena.get_literal_text(array.dimension).map(str::to_string)
        })
        .collect();
    assert_eq!(
        dims,
        vec![
            Some("10".to_string()),
            Some("N".to_string()),
            Some("N + 1".to_string()),
            None
        ]
    );
}

#[test]
fn test_statements_are_skipped_but_nested_blocks_kept() {
    let source = "
int f(int n) {
    int total = 0;
    for (n = 0; n < 10; n++) { int step; total += step; }
    if (n) { char c; } else { long l; }
    return total;
}";
    let (arena, decls) = parse(source);
    let NodeData::FunctionDefinition(func) = &arena.get(decls[0]).unwrap().data else {
        panic!("expected a function definition");
    };
    let shown = arena.show(func.body);
    for name in ["total", "step", "c", "l"] {
        assert!(
            shown.contains(&format!("Declaration: {name}")),
            "missing {name} in\n{shown}"
        );
    }
}

#[test]
fn test_enum_is_a_named_type() {
    let (arena, decls) = parse("enum color { RED, GREEN = 2 } paint;");
    let decl = arena.get_declaration(decls[0]).unwrap();
    let NodeData::TypeDecl(type_decl) = &arena.get(decl.type_node).unwrap().data else {
        panic!("expected a type decl");
    };
    assert_eq!(
        arena.get_named_type(type_decl.type_node).unwrap().names,
        vec!["enum", "color"]
    );
}

#[test]
fn test_initializers_and_bitfields_are_skipped() {
    let (_, decls) = parse("int a = {1, 2}, b = (3 + 4); struct flags { unsigned ready : 1; } f;");
    assert_eq!(decls.len(), 3);
}

#[test]
fn test_missing_semicolon_is_a_parse_error() {
    let err = parse_err("int x");
    assert!(matches!(err, ParseError::Expected { expected: "';'", .. }));
}

#[test]
fn test_unbalanced_body_is_a_parse_error() {
    let err = parse_err("int f() { int x;");
    assert!(matches!(err, ParseError::Expected { expected: "'}'", .. }));
}

#[test]
fn test_scan_errors_propagate() {
    assert!(matches!(parse_err("int @x;"), ParseError::Scan(_)));
}

#[test]
fn test_typedef_without_name_is_an_error() {
    assert!(matches!(
        parse_err("typedef int *;"),
        ParseError::TypedefWithoutName { .. }
    ));
}

#[test]
fn test_declarator_depth_limit() {
    let source = format!("int {}p;", "*".repeat(1000));
    assert!(matches!(
        parse_err(&source),
        ParseError::DeclaratorTooDeep { .. }
    ));
}

#[test]
fn test_single_token_expression_dimension() {
    let (arena, decls) = parse("char a[\"x\"];");
    let decl = arena.get_declaration(decls[0]).unwrap();
    let NodeData::ArrayDeclarator(array) = &arena.get(decl.type_node).unwrap().data else {
        panic!("expected an array declarator");
    };
    let NodeData::Expression(expr) = &arena.get(array.dimension).unwrap().data else {
        panic!("expected an expression dimension");
    };
    assert_eq!(expr.text, "\"x\"");
}
