//! Recursive-descent parser for the declaration level of C.
//!
//! Only declarations reach the tree. Statements inside function bodies are
//! skipped token by token, but nested blocks are still descended into so the
//! declarations they contain are kept.

use crate::node::{
    AggregateKind, ArrayDeclaratorData, CompoundData, ConstantData, DeclarationData,
    ExpressionData, FunctionDeclaratorData, FunctionDefinitionData, IdentifierData,
    NamedTypeData, NodeArena, NodeData, NodeIndex, ParamListData, PointerDeclaratorData,
    StructDeclarationData, TranslationUnitData, TypeDeclData, TypedefData,
};
use csym_common::Span;
use csym_common::limits::{MAX_DECLARATOR_DEPTH, MAX_STRUCT_NESTING, NODES_PER_SOURCE_BYTE_DIVISOR};
use csym_scanner::{
    ScanError, ScannerState, SyntaxKind, Token, token_is_aggregate_keyword, token_is_primitive_type,
    token_is_storage_class, token_is_type_qualifier, token_starts_declaration,
};
use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::debug;

/// A syntax error in the source text.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("expected {expected}, found {found} at {span}")]
    Expected {
        expected: &'static str,
        found: String,
        span: Span,
    },
    #[error("typedef declaration without a name at {span}")]
    TypedefWithoutName { span: Span },
    #[error("declarator nesting exceeds {limit} levels at {span}")]
    DeclaratorTooDeep { limit: u32, span: Span },
    #[error("struct nesting exceeds {limit} levels at {span}")]
    StructTooDeep { limit: u32, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Scan(err) => err.span(),
            ParseError::Expected { span, .. }
            | ParseError::TypedefWithoutName { span }
            | ParseError::DeclaratorTooDeep { span, .. }
            | ParseError::StructTooDeep { span, .. } => *span,
        }
    }
}

type ParseResult<T> = Result<T, ParseError>;

#[derive(Clone, Debug)]
enum TypeSpec {
    Missing,
    Names(Vec<String>),
    Aggregate(NodeIndex),
}

#[derive(Clone, Debug)]
struct Specifiers {
    storage: Vec<String>,
    qualifiers: Vec<String>,
    type_spec: TypeSpec,
    span: Span,
}

impl Specifiers {
    fn is_typedef(&self) -> bool {
        self.storage.iter().any(|s| s == "typedef")
    }
}

#[derive(Clone, Debug)]
enum DeclaratorOp {
    Pointer(Vec<String>),
    Array(NodeIndex),
    Function(NodeIndex),
}

/// A parsed declarator before it is attached to its base type.
///
/// `ops` are ordered from the wrapper applied to the base type first to the
/// one closest to the declared name.
#[derive(Clone, Debug)]
struct Declarator {
    name: Option<String>,
    span: Span,
    ops: Vec<(DeclaratorOp, Span)>,
}

impl Declarator {
    fn is_function(&self) -> bool {
        matches!(self.ops.last(), Some((DeclaratorOp::Function(_), _)))
    }
}

pub struct ParserState {
    file_name: String,
    source: String,
    tokens: Vec<Token>,
    pos: usize,
    arena: NodeArena,
    typedef_names: FxHashSet<String>,
    struct_depth: u32,
}

impl ParserState {
    pub fn new(file_name: String, source: String) -> Self {
        let capacity = source.len() / NODES_PER_SOURCE_BYTE_DIVISOR;
        ParserState {
            file_name,
            source,
            tokens: Vec::new(),
            pos: 0,
            arena: NodeArena::with_capacity(capacity),
            typedef_names: FxHashSet::default(),
            struct_depth: 0,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn source_text(&self) -> &str {
        &self.source
    }

    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    /// Typedef names seen so far, in no particular order.
    pub fn typedef_names(&self) -> impl Iterator<Item = &str> {
        self.typedef_names.iter().map(String::as_str)
    }

    #[tracing::instrument(level = "debug", skip(self), fields(file = %self.file_name))]
    pub fn parse_translation_unit(&mut self) -> ParseResult<NodeIndex> {
        self.tokens = ScannerState::new(&self.source).scan_all()?;
        self.pos = 0;

        let mut declarations = Vec::new();
        while self.kind() != SyntaxKind::EndOfFileToken {
            if self.eat(SyntaxKind::SemicolonToken) {
                continue;
            }
            self.parse_external_declaration(&mut declarations)?;
        }
        debug!(count = declarations.len(), "parsed external declarations");

        let unit = TranslationUnitData {
            file_name: self.file_name.clone(),
            declarations,
        };
        Ok(self.arena.add(
            Span::new(0, self.source.len() as u32),
            NodeData::TranslationUnit(unit),
        ))
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    fn peek(&self, n: usize) -> Token {
        self.tokens
            .get(self.pos + n)
            .or_else(|| self.tokens.last())
            .copied()
            .unwrap_or(Token {
                kind: SyntaxKind::EndOfFileToken,
                span: Span::at(self.source.len() as u32),
            })
    }

    fn kind(&self) -> SyntaxKind {
        self.peek(0).kind
    }

    fn bump(&mut self) -> Token {
        let token = self.peek(0);
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.kind() == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind, expected: &'static str) -> ParseResult<Token> {
        if self.kind() == kind {
            Ok(self.bump())
        } else {
            Err(self.error_expected(expected))
        }
    }

    fn error_expected(&self, expected: &'static str) -> ParseError {
        let token = self.peek(0);
        let found = if token.kind == SyntaxKind::EndOfFileToken {
            "end of file".to_string()
        } else {
            format!("'{}'", token.text(&self.source))
        };
        ParseError::Expected {
            expected,
            found,
            span: token.span,
        }
    }

    fn token_text(&self, token: Token) -> String {
        token.text(&self.source).to_string()
    }

    fn is_typedef_name(&self, token: Token) -> bool {
        token.kind == SyntaxKind::Identifier && self.typedef_names.contains(token.text(&self.source))
    }

    fn is_declaration_start(&self) -> bool {
        let token = self.peek(0);
        token_starts_declaration(token.kind)
            || (self.is_typedef_name(token)
                && matches!(
                    self.peek(1).kind,
                    SyntaxKind::Identifier | SyntaxKind::AsteriskToken
                ))
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn parse_external_declaration(&mut self, out: &mut Vec<NodeIndex>) -> ParseResult<()> {
        let specs = self.parse_specifiers()?;
        if self.kind() == SyntaxKind::SemicolonToken {
            return self.finish_tag_only_declaration(&specs, out);
        }

        let declarator = self.parse_declarator(0)?;
        if declarator.is_function()
            && !specs.is_typedef()
            && self.kind() == SyntaxKind::OpenBraceToken
        {
            let start = specs.span.start.min(declarator.span.start);
            let declaration = self.make_declaration(&specs, declarator, true)?;
            let body = self.parse_compound()?;
            let end = self.arena.get(body).map_or(start, |n| n.span.end);
            out.push(self.arena.add(
                Span::new(start, end),
                NodeData::FunctionDefinition(FunctionDefinitionData { declaration, body }),
            ));
            return Ok(());
        }

        if matches!(specs.type_spec, TypeSpec::Missing) {
            return Err(ParseError::Expected {
                expected: "declaration specifiers",
                found: declarator.name.unwrap_or_default(),
                span: declarator.span,
            });
        }
        self.finish_declaration(&specs, declarator, false, out)
    }

    fn parse_local_declaration(&mut self, out: &mut Vec<NodeIndex>) -> ParseResult<()> {
        let specs = self.parse_specifiers()?;
        if matches!(specs.type_spec, TypeSpec::Missing) {
            return Err(self.error_expected("type specifier"));
        }
        if self.kind() == SyntaxKind::SemicolonToken {
            return self.finish_tag_only_declaration(&specs, out);
        }
        let declarator = self.parse_declarator(0)?;
        self.finish_declaration(&specs, declarator, false, out)
    }

    fn parse_member_declaration(&mut self, out: &mut Vec<NodeIndex>) -> ParseResult<()> {
        let specs = self.parse_specifiers()?;
        if matches!(specs.type_spec, TypeSpec::Missing) {
            return Err(self.error_expected("member type"));
        }
        if self.kind() == SyntaxKind::SemicolonToken {
            return self.finish_tag_only_declaration(&specs, out);
        }
        let declarator = self.parse_declarator(0)?;
        self.finish_declaration(&specs, declarator, true, out)
    }

    // `struct s { ... };` and friends: nothing is declared but the tag.
    fn finish_tag_only_declaration(
        &mut self,
        specs: &Specifiers,
        out: &mut Vec<NodeIndex>,
    ) -> ParseResult<()> {
        let semicolon = self.expect(SyntaxKind::SemicolonToken, "';'")?;
        match specs.type_spec {
            TypeSpec::Aggregate(aggregate) => {
                let decl = DeclarationData {
                    name: None,
                    storage: specs.storage.clone(),
                    qualifiers: specs.qualifiers.clone(),
                    type_node: aggregate,
                };
                out.push(self.arena.add(
                    specs.span.merge(semicolon.span),
                    NodeData::Declaration(decl),
                ));
                Ok(())
            }
            TypeSpec::Names(_) => Ok(()),
            TypeSpec::Missing => Err(ParseError::Expected {
                expected: "declaration",
                found: "';'".to_string(),
                span: semicolon.span,
            }),
        }
    }

    fn finish_declaration(
        &mut self,
        specs: &Specifiers,
        first: Declarator,
        allow_bitfield: bool,
        out: &mut Vec<NodeIndex>,
    ) -> ParseResult<()> {
        let mut declarator = first;
        let mut first_use = true;
        loop {
            if allow_bitfield && self.eat(SyntaxKind::ColonToken) {
                self.skip_expression()?;
            }
            if self.eat(SyntaxKind::EqualsToken) {
                self.skip_expression()?;
            }
            out.push(self.make_declaration(specs, declarator, first_use)?);
            first_use = false;

            if self.eat(SyntaxKind::CommaToken) {
                declarator = self.parse_declarator(0)?;
                continue;
            }
            self.expect(SyntaxKind::SemicolonToken, "';'")?;
            return Ok(());
        }
    }

    fn make_declaration(
        &mut self,
        specs: &Specifiers,
        declarator: Declarator,
        first_use: bool,
    ) -> ParseResult<NodeIndex> {
        let span = specs.span.merge(declarator.span);
        let base = self.base_type_node(specs, first_use);
        let name = declarator.name.clone();
        let type_node = self.build_type_chain(base, &specs.qualifiers, declarator);

        if specs.is_typedef() {
            let Some(name) = name else {
                return Err(ParseError::TypedefWithoutName { span });
            };
            debug!(typedef = %name, "registered typedef name");
            self.typedef_names.insert(name.clone());
            let typedef = TypedefData {
                name,
                qualifiers: specs.qualifiers.clone(),
                type_node,
            };
            return Ok(self.arena.add(span, NodeData::TypedefDeclaration(typedef)));
        }

        let decl = DeclarationData {
            name,
            storage: specs.storage.clone(),
            qualifiers: specs.qualifiers.clone(),
            type_node,
        };
        Ok(self.arena.add(span, NodeData::Declaration(decl)))
    }

    // A struct body belongs to the first declarator only; later declarators in
    // the same declaration refer to the tag.
    fn base_type_node(&mut self, specs: &Specifiers, first_use: bool) -> NodeIndex {
        match &specs.type_spec {
            TypeSpec::Missing => self.arena.add(
                specs.span,
                NodeData::NamedType(NamedTypeData {
                    names: vec!["int".to_string()],
                }),
            ),
            TypeSpec::Names(names) => self.arena.add(
                specs.span,
                NodeData::NamedType(NamedTypeData {
                    names: names.clone(),
                }),
            ),
            TypeSpec::Aggregate(aggregate) if first_use => *aggregate,
            TypeSpec::Aggregate(aggregate) => {
                let reference = match self.arena.get_struct(*aggregate) {
                    Some(data) => StructDeclarationData {
                        kind: data.kind,
                        tag: data.tag.clone(),
                        members: None,
                    },
                    None => return *aggregate,
                };
                self.arena
                    .add(specs.span, NodeData::StructDeclaration(reference))
            }
        }
    }

    fn build_type_chain(
        &mut self,
        base: NodeIndex,
        qualifiers: &[String],
        declarator: Declarator,
    ) -> NodeIndex {
        let type_decl = TypeDeclData {
            declname: declarator.name,
            qualifiers: qualifiers.to_vec(),
            type_node: base,
        };
        let mut current = self.arena.add(declarator.span, NodeData::TypeDecl(type_decl));
        for (op, span) in declarator.ops {
            let data = match op {
                DeclaratorOp::Pointer(qualifiers) => {
                    NodeData::PointerDeclarator(PointerDeclaratorData {
                        qualifiers,
                        type_node: current,
                    })
                }
                DeclaratorOp::Array(dimension) => NodeData::ArrayDeclarator(ArrayDeclaratorData {
                    dimension,
                    type_node: current,
                }),
                DeclaratorOp::Function(params) => {
                    NodeData::FunctionDeclarator(FunctionDeclaratorData {
                        params,
                        type_node: current,
                    })
                }
            };
            current = self.arena.add(span, data);
        }
        current
    }

    // =========================================================================
    // Specifiers
    // =========================================================================

    fn parse_specifiers(&mut self) -> ParseResult<Specifiers> {
        let start = self.peek(0).span;
        let mut specs = Specifiers {
            storage: Vec::new(),
            qualifiers: Vec::new(),
            type_spec: TypeSpec::Missing,
            span: start,
        };

        loop {
            let token = self.peek(0);
            let kind = token.kind;
            if token_is_storage_class(kind) {
                specs.storage.push(self.token_text(token));
            } else if token_is_type_qualifier(kind) {
                specs.qualifiers.push(self.token_text(token));
            } else if token_is_primitive_type(kind) {
                let text = self.token_text(token);
                match specs.type_spec {
                    TypeSpec::Missing => specs.type_spec = TypeSpec::Names(vec![text]),
                    TypeSpec::Names(ref mut names) => names.push(text),
                    TypeSpec::Aggregate(_) => return Err(self.error_expected("declarator")),
                }
            } else if token_is_aggregate_keyword(kind) {
                if !matches!(specs.type_spec, TypeSpec::Missing) {
                    return Err(self.error_expected("declarator"));
                }
                let last = self.pos;
                specs.type_spec = if kind == SyntaxKind::EnumKeyword {
                    TypeSpec::Names(self.parse_enum()?)
                } else {
                    TypeSpec::Aggregate(self.parse_aggregate()?)
                };
                if let Some(end) = self.pos.checked_sub(1).filter(|&end| end >= last) {
                    specs.span = specs.span.merge(self.tokens[end].span);
                }
                continue;
            } else if matches!(specs.type_spec, TypeSpec::Missing) && self.is_typedef_name(token) {
                specs.type_spec = TypeSpec::Names(vec![self.token_text(token)]);
            } else {
                break;
            }
            self.bump();
            specs.span = specs.span.merge(token.span);
        }
        Ok(specs)
    }

    fn parse_aggregate(&mut self) -> ParseResult<NodeIndex> {
        let keyword = self.bump();
        let kind = if keyword.kind == SyntaxKind::UnionKeyword {
            AggregateKind::Union
        } else {
            AggregateKind::Struct
        };
        let tag = if self.kind() == SyntaxKind::Identifier {
            let token = self.bump();
            Some(self.token_text(token))
        } else {
            None
        };

        if self.kind() != SyntaxKind::OpenBraceToken {
            if tag.is_none() {
                return Err(self.error_expected("tag name or '{'"));
            }
            let span = keyword.span.merge(self.peek(0).span);
            let data = StructDeclarationData {
                kind,
                tag,
                members: None,
            };
            return Ok(self.arena.add(span, NodeData::StructDeclaration(data)));
        }

        let open = self.bump();
        if self.struct_depth >= MAX_STRUCT_NESTING {
            return Err(ParseError::StructTooDeep {
                limit: MAX_STRUCT_NESTING,
                span: open.span,
            });
        }
        self.struct_depth += 1;
        let mut members = Vec::new();
        let result = loop {
            match self.kind() {
                SyntaxKind::CloseBraceToken => break Ok(self.bump()),
                SyntaxKind::SemicolonToken => {
                    self.bump();
                }
                SyntaxKind::EndOfFileToken => break Err(self.error_expected("'}'")),
                _ => {
                    if let Err(err) = self.parse_member_declaration(&mut members) {
                        break Err(err);
                    }
                }
            }
        };
        self.struct_depth -= 1;
        let close = result?;

        let data = StructDeclarationData {
            kind,
            tag,
            members: Some(members),
        };
        Ok(self.arena.add(
            keyword.span.merge(close.span),
            NodeData::StructDeclaration(data),
        ))
    }

    // Enums are recorded as the named type `enum <tag>`; enumerators are skipped.
    fn parse_enum(&mut self) -> ParseResult<Vec<String>> {
        self.bump();
        let tag = if self.kind() == SyntaxKind::Identifier {
            let token = self.bump();
            self.token_text(token)
        } else {
            "<anonymous>".to_string()
        };
        if self.kind() == SyntaxKind::OpenBraceToken {
            self.skip_balanced(SyntaxKind::OpenBraceToken, SyntaxKind::CloseBraceToken)?;
        }
        Ok(vec!["enum".to_string(), tag])
    }

    // =========================================================================
    // Declarators
    // =========================================================================

    fn parse_declarator(&mut self, depth: u32) -> ParseResult<Declarator> {
        let start = self.peek(0).span;
        if depth >= MAX_DECLARATOR_DEPTH {
            return Err(ParseError::DeclaratorTooDeep {
                limit: MAX_DECLARATOR_DEPTH,
                span: start,
            });
        }

        let mut pointers = Vec::new();
        while self.kind() == SyntaxKind::AsteriskToken {
            let star = self.bump();
            let mut qualifiers = Vec::new();
            while token_is_type_qualifier(self.kind()) {
                let token = self.bump();
                qualifiers.push(self.token_text(token));
            }
            pointers.push((DeclaratorOp::Pointer(qualifiers), star.span));
            if pointers.len() as u32 + depth >= MAX_DECLARATOR_DEPTH {
                return Err(ParseError::DeclaratorTooDeep {
                    limit: MAX_DECLARATOR_DEPTH,
                    span: star.span,
                });
            }
        }

        let mut name = None;
        let mut span = start;
        let mut inner_ops = Vec::new();
        let token = self.peek(0);
        if token.kind == SyntaxKind::Identifier {
            self.bump();
            name = Some(self.token_text(token));
            span = span.merge(token.span);
        } else if token.kind == SyntaxKind::OpenParenToken && self.is_nested_declarator() {
            self.bump();
            let inner = self.parse_declarator(depth + 1)?;
            let close = self.expect(SyntaxKind::CloseParenToken, "')'")?;
            name = inner.name;
            inner_ops = inner.ops;
            span = span.merge(close.span);
        }

        let mut suffixes = Vec::new();
        loop {
            match self.kind() {
                SyntaxKind::OpenBracketToken => {
                    let (dimension, dim_span) = self.parse_array_dimension()?;
                    suffixes.push((DeclaratorOp::Array(dimension), dim_span));
                    span = span.merge(dim_span);
                }
                SyntaxKind::OpenParenToken => {
                    let (params, params_span) = self.parse_params(depth)?;
                    suffixes.push((DeclaratorOp::Function(params), params_span));
                    span = span.merge(params_span);
                }
                _ => break,
            }
        }

        let mut ops = pointers;
        ops.extend(suffixes.into_iter().rev());
        ops.extend(inner_ops);
        Ok(Declarator { name, span, ops })
    }

    // `(` opens a nested declarator when followed by something that can only
    // continue a declarator; otherwise it opens a parameter list.
    fn is_nested_declarator(&self) -> bool {
        let next = self.peek(1);
        match next.kind {
            SyntaxKind::AsteriskToken | SyntaxKind::OpenParenToken | SyntaxKind::OpenBracketToken => {
                true
            }
            SyntaxKind::Identifier => !self.is_typedef_name(next),
            _ => false,
        }
    }

    fn parse_array_dimension(&mut self) -> ParseResult<(NodeIndex, Span)> {
        let open = self.bump();
        let first = self.pos;
        let mut depth = 0u32;
        loop {
            match self.kind() {
                SyntaxKind::CloseBracketToken if depth == 0 => break,
                SyntaxKind::OpenBracketToken => depth += 1,
                SyntaxKind::CloseBracketToken => depth -= 1,
                SyntaxKind::EndOfFileToken | SyntaxKind::SemicolonToken => {
                    return Err(self.error_expected("']'"));
                }
                _ => {}
            }
            self.bump();
        }
        let expr_tokens: Vec<Token> = self.tokens[first..self.pos].to_vec();
        let close = self.bump();
        let span = open.span.merge(close.span);

        let dimension = match expr_tokens.as_slice() {
            [] => NodeIndex::NONE,
            [token]
                if matches!(
                    token.kind,
                    SyntaxKind::NumericLiteral | SyntaxKind::CharacterLiteral
                ) =>
            {
                let value = self.token_text(*token);
                self.arena
                    .add(token.span, NodeData::Constant(ConstantData { value }))
            }
            [token] if token.kind == SyntaxKind::Identifier => {
                let name = self.token_text(*token);
                self.arena
                    .add(token.span, NodeData::Identifier(IdentifierData { name }))
            }
            [head, rest @ ..] => {
                let tail = rest.last().unwrap_or(head);
                let expr_span = head.span.merge(tail.span);
                let text = expr_span.slice(&self.source).unwrap_or("").to_string();
                self.arena
                    .add(expr_span, NodeData::Expression(ExpressionData { text }))
            }
        };
        Ok((dimension, span))
    }

    fn parse_params(&mut self, depth: u32) -> ParseResult<(NodeIndex, Span)> {
        let open = self.bump();
        if self.kind() == SyntaxKind::CloseParenToken {
            let close = self.bump();
            return Ok((NodeIndex::NONE, open.span.merge(close.span)));
        }

        let mut params = Vec::new();
        let mut variadic = false;
        if self.kind() == SyntaxKind::VoidKeyword
            && self.peek(1).kind == SyntaxKind::CloseParenToken
        {
            self.bump();
        } else {
            loop {
                if self.eat(SyntaxKind::DotDotDotToken) {
                    variadic = true;
                } else {
                    let specs = self.parse_specifiers()?;
                    if matches!(specs.type_spec, TypeSpec::Missing) {
                        return Err(self.error_expected("parameter type"));
                    }
                    let declarator = self.parse_declarator(depth + 1)?;
                    // Unnamed parameters declare nothing.
                    if declarator.name.is_some() {
                        params.push(self.make_declaration(&specs, declarator, true)?);
                    }
                }
                if !self.eat(SyntaxKind::CommaToken) {
                    break;
                }
            }
        }
        let close = self.expect(SyntaxKind::CloseParenToken, "')'")?;
        let span = open.span.merge(close.span);
        let list = self
            .arena
            .add(span, NodeData::ParamList(ParamListData { params, variadic }));
        Ok((list, span))
    }

    // =========================================================================
    // Function bodies
    // =========================================================================

    fn parse_compound(&mut self) -> ParseResult<NodeIndex> {
        let open = self.expect(SyntaxKind::OpenBraceToken, "'{'")?;
        let mut items = Vec::new();
        let close = loop {
            match self.kind() {
                SyntaxKind::CloseBraceToken => break self.bump(),
                SyntaxKind::EndOfFileToken => return Err(self.error_expected("'}'")),
                SyntaxKind::OpenBraceToken => items.push(self.parse_compound()?),
                SyntaxKind::SemicolonToken => {
                    self.bump();
                }
                _ if self.is_declaration_start() => self.parse_local_declaration(&mut items)?,
                _ => self.skip_statement(&mut items)?,
            }
        };
        Ok(self.arena.add(
            open.span.merge(close.span),
            NodeData::Compound(CompoundData { items }),
        ))
    }

    // Skips one statement. A block reached outside parentheses is parsed as a
    // nested compound so its declarations are kept.
    fn skip_statement(&mut self, items: &mut Vec<NodeIndex>) -> ParseResult<()> {
        let mut depth = 0u32;
        loop {
            match self.kind() {
                SyntaxKind::EndOfFileToken => return Err(self.error_expected("'}'")),
                SyntaxKind::OpenBraceToken if depth == 0 => {
                    items.push(self.parse_compound()?);
                    return Ok(());
                }
                SyntaxKind::CloseBraceToken if depth == 0 => return Ok(()),
                SyntaxKind::SemicolonToken if depth == 0 => {
                    self.bump();
                    return Ok(());
                }
                SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken => depth += 1,
                SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::CloseBraceToken => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.bump();
        }
    }

    // Skips an initializer or bit-field width up to the next `,` or `;` at
    // nesting depth zero.
    fn skip_expression(&mut self) -> ParseResult<()> {
        let mut depth = 0u32;
        loop {
            match self.kind() {
                SyntaxKind::CommaToken | SyntaxKind::SemicolonToken if depth == 0 => return Ok(()),
                SyntaxKind::EndOfFileToken => return Err(self.error_expected("';'")),
                SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken => depth += 1,
                SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::CloseBraceToken => {
                    if depth == 0 {
                        return Err(self.error_expected("';'"));
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.bump();
        }
    }

    fn skip_balanced(&mut self, open: SyntaxKind, close: SyntaxKind) -> ParseResult<()> {
        let mut depth = 0u32;
        loop {
            let kind = self.kind();
            if kind == SyntaxKind::EndOfFileToken {
                return Err(self.error_expected("closing delimiter"));
            }
            self.bump();
            if kind == open {
                depth += 1;
            } else if kind == close {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
        }
    }
}
