//! Tokenizer for expression text.
//!
//! The lexer recognizes a deliberately wide vocabulary (names, strings,
//! keywords, bitwise and comparison operators) so that anything a caller might
//! try to smuggle in becomes a well-formed syntax node which the validator can
//! then name and reject. Only characters outside that vocabulary are syntax
//! errors at this stage.

use std::iter::Peekable;
use std::str::CharIndices;

use super::error::{CalcError, CalcResult};

/// Reserved words with a dedicated syntax node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    And,
    Or,
    Not,
    In,
    Is,
    If,
    Else,
    Lambda,
    Import,
    From,
    True,
    False,
    None,
}

impl Keyword {
    fn from_word(word: &str) -> Option<Self> {
        let keyword = match word {
            "and" => Self::And,
            "or" => Self::Or,
            "not" => Self::Not,
            "in" => Self::In,
            "is" => Self::Is,
            "if" => Self::If,
            "else" => Self::Else,
            "lambda" => Self::Lambda,
            "import" => Self::Import,
            "from" => Self::From,
            "True" => Self::True,
            "False" => Self::False,
            "None" => Self::None,
            _ => return None,
        };
        Some(keyword)
    }
}

/// Kinds of tokens produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Str(String),
    Name(String),
    Keyword(Keyword),

    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    DoubleSlash,
    Percent,
    Caret,
    At,
    Amp,
    Pipe,
    Tilde,
    LShift,
    RShift,

    Lt,
    Le,
    Gt,
    Ge,
    EqEq,
    NotEq,

    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Colon,

    Eof,
}

impl TokenKind {
    /// Short human-readable rendering used in syntax error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Number(n) => format!("number {}", n),
            Self::Str(_) => "string literal".to_string(),
            Self::Name(name) => format!("name '{}'", name),
            Self::Keyword(kw) => format!("keyword {:?}", kw).to_lowercase(),
            Self::Eof => "end of expression".to_string(),
            other => format!("'{}'", other.symbol()),
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::DoubleStar => "**",
            Self::Slash => "/",
            Self::DoubleSlash => "//",
            Self::Percent => "%",
            Self::Caret => "^",
            Self::At => "@",
            Self::Amp => "&",
            Self::Pipe => "|",
            Self::Tilde => "~",
            Self::LShift => "<<",
            Self::RShift => ">>",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::EqEq => "==",
            Self::NotEq => "!=",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Colon => ":",
            _ => "?",
        }
    }
}

/// Maximum number of tokens in one expression, not counting [`TokenKind::Eof`].
///
/// Enforced while lexing, so memory stays bounded for any input size. It also
/// bounds the height of the parsed tree, and with it the recursion depth of
/// validation, reduction and drop.
pub const MAX_TOKENS: usize = 2048;

/// A token with the character column where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub column: usize,
}

/// Tokenize the whole expression, appending a trailing [`TokenKind::Eof`].
pub fn tokenize(source: &str) -> CalcResult<Vec<Token>> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            column: 0,
        }
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        let next = self.chars.next();
        if next.is_some() {
            self.column += 1;
        }
        next
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn run(mut self) -> CalcResult<Vec<Token>> {
        let mut tokens = Vec::with_capacity(MAX_TOKENS.min(self.source.len()) + 1);

        while let Some(&(offset, c)) = self.chars.peek() {
            let column = self.column;

            if c.is_whitespace() {
                self.bump();
                continue;
            }

            let kind = if c.is_ascii_digit()
                || (c == '.' && self.source[offset + 1..].starts_with(|n: char| n.is_ascii_digit()))
            {
                self.number(offset)?
            } else if c == '_' || c.is_alphabetic() {
                self.word(offset)
            } else if c == '\'' || c == '"' {
                self.string(column)?
            } else {
                self.bump();
                self.operator(c, column)?
            };

            if tokens.len() == MAX_TOKENS {
                return Err(CalcError::syntax(format!(
                    "expression too long (more than {} tokens, stopped at column {})",
                    MAX_TOKENS, column
                )));
            }
            tokens.push(Token { kind, column });
        }

        tokens.push(Token {
            kind: TokenKind::Eof,
            column: self.column,
        });
        Ok(tokens)
    }

    fn number(&mut self, start: usize) -> CalcResult<TokenKind> {
        let mut text = String::new();
        let mut seen_dot = false;
        let mut seen_exp = false;

        while let Some(&(offset, c)) = self.chars.peek() {
            match c {
                '0'..='9' => text.push(c),
                '_' if text.ends_with(|p: char| p.is_ascii_digit())
                    && self.source[offset + 1..].starts_with(|n: char| n.is_ascii_digit()) => {}
                '.' if !seen_dot && !seen_exp => {
                    seen_dot = true;
                    text.push(c);
                }
                'e' | 'E' if !seen_exp && !text.is_empty() => {
                    seen_exp = true;
                    text.push('e');
                    self.bump();
                    if let Some(sign @ ('+' | '-')) = self.peek_char() {
                        text.push(sign);
                        self.bump();
                    }
                    continue;
                }
                _ => break,
            }
            self.bump();
        }

        if text.ends_with(['e', '+', '-']) {
            let end = self.chars.peek().map_or(self.source.len(), |&(i, _)| i);
            return Err(CalcError::syntax(format!(
                "malformed number '{}'",
                &self.source[start..end]
            )));
        }

        text.parse::<f64>()
            .map(TokenKind::Number)
            .map_err(|_| CalcError::syntax(format!("malformed number '{}'", text)))
    }

    fn word(&mut self, start: usize) -> TokenKind {
        let mut end = start;
        while let Some(&(offset, c)) = self.chars.peek() {
            if c == '_' || c.is_alphanumeric() {
                end = offset + c.len_utf8();
                self.bump();
            } else {
                break;
            }
        }

        let word = &self.source[start..end];
        match Keyword::from_word(word) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Name(word.to_string()),
        }
    }

    fn string(&mut self, column: usize) -> CalcResult<TokenKind> {
        let quote = self.bump().map(|(_, c)| c).unwrap_or('"');
        let mut value = String::new();

        loop {
            match self.bump() {
                Some((_, c)) if c == quote => return Ok(TokenKind::Str(value)),
                Some((_, '\\')) => match self.bump() {
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, 't')) => value.push('\t'),
                    Some((_, escaped)) => value.push(escaped),
                    None => break,
                },
                Some((_, c)) => value.push(c),
                None => break,
            }
        }

        Err(CalcError::syntax(format!(
            "unterminated string starting at column {}",
            column
        )))
    }

    fn operator(&mut self, c: char, column: usize) -> CalcResult<TokenKind> {
        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' if self.eat('*') => TokenKind::DoubleStar,
            '*' => TokenKind::Star,
            '/' if self.eat('/') => TokenKind::DoubleSlash,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Caret,
            '@' => TokenKind::At,
            '&' => TokenKind::Amp,
            '|' => TokenKind::Pipe,
            '~' => TokenKind::Tilde,
            '<' if self.eat('<') => TokenKind::LShift,
            '<' if self.eat('=') => TokenKind::Le,
            '<' => TokenKind::Lt,
            '>' if self.eat('>') => TokenKind::RShift,
            '>' if self.eat('=') => TokenKind::Ge,
            '>' => TokenKind::Gt,
            '=' if self.eat('=') => TokenKind::EqEq,
            '!' if self.eat('=') => TokenKind::NotEq,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            ':' => TokenKind::Colon,
            other => {
                return Err(CalcError::syntax(format!(
                    "unexpected character '{}' at column {}",
                    other, column
                )));
            }
        };
        Ok(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_token_limit_stops_early() {
        let at_limit = format!("{}1", "1+".repeat(MAX_TOKENS / 2 - 1));
        assert_eq!(tokenize(&at_limit).unwrap().len(), MAX_TOKENS);

        let over = format!("{}1", "1+".repeat(MAX_TOKENS / 2));
        assert!(matches!(tokenize(&over), Err(CalcError::Syntax(msg)) if msg.contains("too long")));
    }

    #[test]
    fn test_huge_input_rejected_without_lexing_it_all() {
        // 16 MB of input; only the first MAX_TOKENS tokens are ever stored.
        let huge = format!("{}1", "1+".repeat(8 * 1024 * 1024));
        match tokenize(&huge) {
            Err(CalcError::Syntax(msg)) => {
                assert!(msg.contains("too long"));
                assert!(msg.contains(&format!("column {}", MAX_TOKENS)));
            }
            other => panic!("expected syntax error, got {:?}", other.map(|t| t.len())),
        }
    }

    #[test]
    fn test_arithmetic_tokens() {
        assert_eq!(
            kinds("2 + 3.5*4"),
            vec![
                TokenKind::Number(2.0),
                TokenKind::Plus,
                TokenKind::Number(3.5),
                TokenKind::Star,
                TokenKind::Number(4.0),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(kinds(".5")[0], TokenKind::Number(0.5));
        assert_eq!(kinds("1.")[0], TokenKind::Number(1.0));
        assert_eq!(kinds("1e3")[0], TokenKind::Number(1000.0));
        assert_eq!(kinds("2.5E-1")[0], TokenKind::Number(0.25));
        assert_eq!(kinds("1_000")[0], TokenKind::Number(1000.0));
    }

    #[test]
    fn test_malformed_numbers() {
        assert!(matches!(tokenize("1e"), Err(CalcError::Syntax(_))));
        assert!(matches!(tokenize("2e+"), Err(CalcError::Syntax(_))));
    }

    #[test]
    fn test_two_char_operators() {
        assert_eq!(
            kinds("** // << >> <= >= == !="),
            vec![
                TokenKind::DoubleStar,
                TokenKind::DoubleSlash,
                TokenKind::LShift,
                TokenKind::RShift,
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_names_keywords_and_strings() {
        assert_eq!(
            kinds("__import__('os')"),
            vec![
                TokenKind::Name("__import__".to_string()),
                TokenKind::LParen,
                TokenKind::Str("os".to_string()),
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
        assert_eq!(kinds("import")[0], TokenKind::Keyword(Keyword::Import));
        assert_eq!(kinds("True")[0], TokenKind::Keyword(Keyword::True));
    }

    #[test]
    fn test_unknown_character() {
        let err = tokenize("2 $ 3").unwrap_err();
        assert_eq!(
            err,
            CalcError::syntax("unexpected character '$' at column 2")
        );
        assert!(tokenize("a = 1").is_err());
        assert!(tokenize("1; 2").is_err());
    }

    #[test]
    fn test_unterminated_string() {
        assert!(matches!(tokenize("'abc"), Err(CalcError::Syntax(_))));
    }

    #[test]
    fn test_columns_count_characters() {
        let tokens = tokenize("π + 1").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Name("π".to_string()));
        assert_eq!(tokens[1].column, 2);
        assert_eq!(tokens[2].column, 4);
    }
}
