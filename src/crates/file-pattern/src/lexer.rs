//! Tokenizer for file patterns
//!
//! A pattern is literal text interleaved with blocks written `<...>`. A block
//! runs from `<` to the first following `>` on the same line and holds at least
//! one character, which may itself be `<` or `>`. Anything that does not have
//! that shape, such as a `<` that is never closed or an empty `<>`, is not an
//! error: it is kept as literal text. Callers that want to reject such input
//! should inspect the literals returned by [`tokenize`].

use crate::span::Span;
use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A complete `<...>` block, delimiters included
    #[regex(r"<[^\n][^>\n]*>")]
    Block,

    /// A run of text without any `<`
    #[regex(r"[^<]+")]
    Text,

    /// A `<` that does not open a block
    #[token("<")]
    Open,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Block => write!(f, "block"),
            Token::Text => write!(f, "text"),
            Token::Open => write!(f, "<"),
        }
    }
}

/// Lexer wrapper with position tracking
pub struct Lexer<'source> {
    inner: logos::Lexer<'source, Token>,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Self {
        Lexer {
            inner: Token::lexer(source),
        }
    }

    pub fn next_token(&mut self) -> Option<(Token, Span)> {
        let token = self.inner.next()?;
        let span = Span::from(self.inner.span());
        // Unrecognised input is literal text
        Some((token.unwrap_or(Token::Text), span))
    }

    pub fn source(&self) -> &'source str {
        self.inner.source()
    }

    pub fn slice(&self, span: Span) -> &'source str {
        &self.source()[span.to_range()]
    }
}

/// A pattern split into literal segments and block interiors.
///
/// There is always exactly one more literal than there are blocks, so the
/// source text is `literals[0] + <blocks[0]> + literals[1] + ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenized<'source> {
    pub literals: Vec<&'source str>,
    pub blocks: Vec<&'source str>,
    /// Spans of each block, delimiters included
    pub block_spans: Vec<Span>,
}

impl<'source> Tokenized<'source> {
    /// Rebuild the source text by interleaving literals and blocks
    pub fn reassemble(&self) -> String {
        let mut out = String::new();
        for (i, literal) in self.literals.iter().enumerate() {
            out.push_str(literal);
            if let Some(block) = self.blocks.get(i) {
                out.push('<');
                out.push_str(block);
                out.push('>');
            }
        }
        out
    }
}

/// Split a pattern into its literal segments and block interiors
pub fn tokenize(source: &str) -> Tokenized<'_> {
    let mut lexer = Lexer::new(source);
    let mut literals = Vec::new();
    let mut blocks = Vec::new();
    let mut block_spans = Vec::new();
    let mut literal = Span::new(0, 0);

    while let Some((token, span)) = lexer.next_token() {
        match token {
            Token::Block => {
                literals.push(lexer.slice(literal));
                blocks.push(lexer.slice(span.interior()));
                block_spans.push(span);
                literal = Span::new(span.end, span.end);
            }
            Token::Text | Token::Open => literal = literal.merge(span),
        }
    }
    literals.push(lexer.slice(literal));

    Tokenized {
        literals,
        blocks,
        block_spans,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();
        while let Some((token, _)) = lexer.next_token() {
            tokens.push(token);
        }
        tokens
    }

    #[test]
    fn test_lex_blocks() {
        assert_eq!(
            lex("img_<1-3>.tif"),
            vec![Token::Text, Token::Block, Token::Text]
        );
    }

    #[test]
    fn test_lexer_slice() {
        let input = "a<0-9>";
        let mut lexer = Lexer::new(input);

        let (token, span) = lexer.next_token().unwrap();
        assert_eq!(token, Token::Text);
        assert_eq!(lexer.slice(span), "a");

        let (token, span) = lexer.next_token().unwrap();
        assert_eq!(token, Token::Block);
        assert_eq!(lexer.slice(span), "<0-9>");
    }

    #[test]
    fn test_tokenize_alternates() {
        let tokens = tokenize("<A-C>_s<1-2>_w<1,3>.tif");
        assert_eq!(tokens.literals, vec!["", "_s", "_w", ".tif"]);
        assert_eq!(tokens.blocks, vec!["A-C", "1-2", "1,3"]);
        assert_eq!(tokens.block_spans[0], Span::new(0, 5));
    }

    #[test]
    fn test_tokenize_without_blocks() {
        let tokens = tokenize("plain.tif");
        assert_eq!(tokens.literals, vec!["plain.tif"]);
        assert!(tokens.blocks.is_empty());

        let tokens = tokenize("");
        assert_eq!(tokens.literals, vec![""]);
    }

    #[test]
    fn test_unclosed_bracket_is_literal() {
        let tokens = tokenize("a<b_<1-2>");
        assert_eq!(tokens.literals, vec!["a", ""]);
        assert_eq!(tokens.blocks, vec!["b_<1-2"]);

        let tokens = tokenize("x<y.tif");
        assert_eq!(tokens.literals, vec!["x<y.tif"]);
        assert!(tokens.blocks.is_empty());
    }

    #[test]
    fn test_empty_brackets_are_literal() {
        let tokens = tokenize("a<>b");
        assert_eq!(tokens.literals, vec!["a<>b"]);
        assert!(tokens.blocks.is_empty());
    }

    #[test]
    fn test_reassemble() {
        for input in ["<1-2>", "a<b", "x_<01-10:3>_<a,b>.tif", "t<>"] {
            assert_eq!(tokenize(input).reassemble(), input);
        }
    }
}
