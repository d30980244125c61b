//! Scanner implementation.
//!
//! `ScannerState` walks the source bytes and produces one `Token` per call to
//! `scan`. Trivia (whitespace, comments, preprocessor lines) is skipped; the
//! token text is recovered from the source by span.

use crate::syntax_kind::{SyntaxKind, text_to_keyword};
use csym_common::Span;
use memchr::{memchr, memmem};
use thiserror::Error;

/// A lexical error.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    #[error("unterminated block comment starting at {span}")]
    UnterminatedComment { span: Span },
    #[error("unterminated {what} literal starting at {span}")]
    UnterminatedLiteral { what: &'static str, span: Span },
    #[error("unexpected character {ch:?} at {span}")]
    UnexpectedCharacter { ch: char, span: Span },
}

impl ScanError {
    pub fn span(&self) -> Span {
        match self {
            ScanError::UnterminatedComment { span }
            | ScanError::UnterminatedLiteral { span, .. }
            | ScanError::UnexpectedCharacter { span, .. } => *span,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: Span,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.slice(source).unwrap_or("")
    }
}

// Longest punctuators first so that `>>=` wins over `>>` and `>`.
const PUNCTUATORS: &[(&str, SyntaxKind)] = &[
    ("...", SyntaxKind::DotDotDotToken),
    ("<<=", SyntaxKind::LessThanLessThanEqualsToken),
    (">>=", SyntaxKind::GreaterThanGreaterThanEqualsToken),
    ("->", SyntaxKind::MinusGreaterThanToken),
    ("++", SyntaxKind::PlusPlusToken),
    ("--", SyntaxKind::MinusMinusToken),
    ("&&", SyntaxKind::AmpersandAmpersandToken),
    ("||", SyntaxKind::BarBarToken),
    ("<=", SyntaxKind::LessThanEqualsToken),
    (">=", SyntaxKind::GreaterThanEqualsToken),
    ("==", SyntaxKind::EqualsEqualsToken),
    ("!=", SyntaxKind::ExclamationEqualsToken),
    ("<<", SyntaxKind::LessThanLessThanToken),
    (">>", SyntaxKind::GreaterThanGreaterThanToken),
    ("+=", SyntaxKind::PlusEqualsToken),
    ("-=", SyntaxKind::MinusEqualsToken),
    ("*=", SyntaxKind::AsteriskEqualsToken),
    ("/=", SyntaxKind::SlashEqualsToken),
    ("%=", SyntaxKind::PercentEqualsToken),
    ("&=", SyntaxKind::AmpersandEqualsToken),
    ("|=", SyntaxKind::BarEqualsToken),
    ("^=", SyntaxKind::CaretEqualsToken),
    ("{", SyntaxKind::OpenBraceToken),
    ("}", SyntaxKind::CloseBraceToken),
    ("(", SyntaxKind::OpenParenToken),
    (")", SyntaxKind::CloseParenToken),
    ("[", SyntaxKind::OpenBracketToken),
    ("]", SyntaxKind::CloseBracketToken),
    (";", SyntaxKind::SemicolonToken),
    (",", SyntaxKind::CommaToken),
    (":", SyntaxKind::ColonToken),
    ("?", SyntaxKind::QuestionToken),
    (".", SyntaxKind::DotToken),
    ("*", SyntaxKind::AsteriskToken),
    ("+", SyntaxKind::PlusToken),
    ("-", SyntaxKind::MinusToken),
    ("/", SyntaxKind::SlashToken),
    ("%", SyntaxKind::PercentToken),
    ("&", SyntaxKind::AmpersandToken),
    ("|", SyntaxKind::BarToken),
    ("^", SyntaxKind::CaretToken),
    ("~", SyntaxKind::TildeToken),
    ("!", SyntaxKind::ExclamationToken),
    ("<", SyntaxKind::LessThanToken),
    (">", SyntaxKind::GreaterThanToken),
    ("=", SyntaxKind::EqualsToken),
];

/// Tokenizer over a borrowed source string.
pub struct ScannerState<'a> {
    text: &'a str,
    pos: usize,
    at_line_start: bool,
}

impl<'a> ScannerState<'a> {
    pub fn new(text: &'a str) -> Self {
        ScannerState {
            text,
            pos: 0,
            at_line_start: true,
        }
    }

    pub fn source_text(&self) -> &'a str {
        self.text
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Scan every remaining token, ending with `EndOfFileToken`.
    pub fn scan_all(&mut self) -> Result<Vec<Token>, ScanError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.scan()?;
            tokens.push(token);
            if token.kind == SyntaxKind::EndOfFileToken {
                return Ok(tokens);
            }
        }
    }

    pub fn scan(&mut self) -> Result<Token, ScanError> {
        self.skip_trivia()?;
        let start = self.pos;
        let bytes = self.text.as_bytes();
        let Some(&first) = bytes.get(start) else {
            return Ok(Token {
                kind: SyntaxKind::EndOfFileToken,
                span: Span::at(start as u32),
            });
        };

        let kind = if first.is_ascii_alphabetic() || first == b'_' {
            self.pos = self.scan_while(start, |b| b.is_ascii_alphanumeric() || b == b'_');
            text_to_keyword(&self.text[start..self.pos]).unwrap_or(SyntaxKind::Identifier)
        } else if first.is_ascii_digit()
            || (first == b'.' && bytes.get(start + 1).is_some_and(u8::is_ascii_digit))
        {
            self.pos = self.scan_number(start);
            SyntaxKind::NumericLiteral
        } else if first == b'\'' {
            self.pos = self.scan_quoted(start, b'\'', "character")?;
            SyntaxKind::CharacterLiteral
        } else if first == b'"' {
            self.pos = self.scan_quoted(start, b'"', "string")?;
            SyntaxKind::StringLiteral
        } else if let Some(&(punct, kind)) = PUNCTUATORS
            .iter()
            .find(|(punct, _)| self.text[start..].starts_with(punct))
        {
            self.pos = start + punct.len();
            kind
        } else {
            let ch = self.text[start..].chars().next().unwrap_or('\0');
            return Err(ScanError::UnexpectedCharacter {
                ch,
                span: Span::new(start as u32, (start + ch.len_utf8()) as u32),
            });
        };

        self.at_line_start = false;
        Ok(Token {
            kind,
            span: Span::new(start as u32, self.pos as u32),
        })
    }

    fn skip_trivia(&mut self) -> Result<(), ScanError> {
        let bytes = self.text.as_bytes();
        while let Some(&b) = bytes.get(self.pos) {
            match b {
                b'\n' => {
                    self.pos += 1;
                    self.at_line_start = true;
                }
                b' ' | b'\t' | b'\r' | 0x0b | 0x0c => self.pos += 1,
                b'#' if self.at_line_start => self.skip_line(),
                b'/' if bytes.get(self.pos + 1) == Some(&b'/') => self.skip_line(),
                b'/' if bytes.get(self.pos + 1) == Some(&b'*') => {
                    let body = &bytes[self.pos + 2..];
                    match memmem::find(body, b"*/") {
                        Some(end) => self.pos += 2 + end + 2,
                        None => {
                            return Err(ScanError::UnterminatedComment {
                                span: Span::new(self.pos as u32, self.text.len() as u32),
                            });
                        }
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    // Skips to the newline (not past it), honouring backslash continuations.
    fn skip_line(&mut self) {
        let bytes = self.text.as_bytes();
        loop {
            match memchr(b'\n', &bytes[self.pos..]) {
                Some(offset) => {
                    let newline = self.pos + offset;
                    self.pos = newline;
                    if newline > 0 && bytes[newline - 1] == b'\\' {
                        self.pos += 1;
                        continue;
                    }
                    return;
                }
                None => {
                    self.pos = bytes.len();
                    return;
                }
            }
        }
    }

    fn scan_while(&self, start: usize, pred: impl Fn(u8) -> bool) -> usize {
        let bytes = self.text.as_bytes();
        let mut end = start;
        while end < bytes.len() && pred(bytes[end]) {
            end += 1;
        }
        end
    }

    // Integer and floating literals, including hex prefixes, exponents and suffixes.
    fn scan_number(&self, start: usize) -> usize {
        let bytes = self.text.as_bytes();
        let is_hex = self.text[start..].starts_with("0x") || self.text[start..].starts_with("0X");
        let mut end = start;
        while end < bytes.len() {
            let b = bytes[end];
            let exponent_sign = (b == b'+' || b == b'-')
                && end > start
                && if is_hex {
                    matches!(bytes[end - 1], b'p' | b'P')
                } else {
                    matches!(bytes[end - 1], b'e' | b'E')
                };
            if b.is_ascii_alphanumeric() || b == b'.' || b == b'_' || exponent_sign {
                end += 1;
            } else {
                break;
            }
        }
        end
    }

    fn scan_quoted(&self, start: usize, quote: u8, what: &'static str) -> Result<usize, ScanError> {
        let bytes = self.text.as_bytes();
        let mut end = start + 1;
        while end < bytes.len() {
            match bytes[end] {
                b'\\' => end += 2,
                b'\n' => break,
                b if b == quote => return Ok(end + 1),
                _ => end += 1,
            }
        }
        Err(ScanError::UnterminatedLiteral {
            what,
            span: Span::new(start as u32, end.min(bytes.len()) as u32),
        })
    }
}
