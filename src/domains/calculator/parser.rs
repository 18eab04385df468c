//! Recursive-descent parser from tokens to the general [`Syntax`] tree.
//!
//! Precedence, lowest first: `lambda` / conditional expression, `or`, `and`,
//! `not`, comparisons, `|`, `&`, shifts, `+ -`, `* / // % @`, unary
//! `- + ~`, exponentiation (`^` or `**`), then calls, subscripts and
//! attribute access. Exponentiation is right-associative and binds tighter
//! than a unary operator on its left, so `-2 ^ 2` is `-(2 ^ 2)` and
//! `2 ^ 3 ^ 2` is `2 ^ (3 ^ 2)`.

use tracing::debug;

use super::error::{CalcError, CalcResult};
use super::lexer::{Keyword, Token, TokenKind, tokenize};
use super::syntax::{BinOp, BoolOp, CmpOp, Syntax, UnaryOp};

pub use super::lexer::MAX_TOKENS;

/// Maximum nesting of sub-expressions, prefix operators and exponents.
pub const MAX_DEPTH: usize = 100;

/// Parse expression text into a syntax tree.
pub fn parse(source: &str) -> CalcResult<Syntax> {
    let tokens = tokenize(source)?;

    // The lexer always appends Eof.
    if tokens.len() == 1 {
        return Err(CalcError::syntax("empty expression"));
    }

    debug!(tokens = tokens.len() - 1, "Parsing expression");

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let tree = parser.statement()?;
    parser.expect_end()?;
    Ok(tree)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    // ------------------------------------------------------------------
    // Token cursor
    // ------------------------------------------------------------------

    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> &TokenKind {
        &self.current().kind
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek() == kind
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn unexpected(&self) -> CalcError {
        let token = self.current();
        match token.kind {
            TokenKind::Eof => CalcError::syntax("unexpected end of expression"),
            TokenKind::RParen | TokenKind::RBracket => CalcError::syntax(format!(
                "unmatched {} at column {}",
                token.kind.describe(),
                token.column
            )),
            _ => CalcError::syntax(format!(
                "unexpected {} at column {}",
                token.kind.describe(),
                token.column
            )),
        }
    }

    fn expect(&mut self, kind: TokenKind, opened_at: usize) -> CalcResult<()> {
        if self.eat(&kind) {
            return Ok(());
        }
        if self.check(&TokenKind::Eof) {
            let opener = match kind {
                TokenKind::RParen => "'('",
                TokenKind::RBracket => "'['",
                _ => return Err(self.unexpected()),
            };
            return Err(CalcError::syntax(format!(
                "{} at column {} was never closed",
                opener, opened_at
            )));
        }
        Err(self.unexpected())
    }

    fn expect_end(&self) -> CalcResult<()> {
        if self.check(&TokenKind::Eof) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> CalcResult<T>) -> CalcResult<T> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(CalcError::syntax(format!(
                "expression nested too deeply (limit {})",
                MAX_DEPTH
            )));
        }
        let result = parse(self);
        self.depth -= 1;
        result
    }

    // ------------------------------------------------------------------
    // Grammar
    // ------------------------------------------------------------------

    fn statement(&mut self) -> CalcResult<Syntax> {
        match self.peek() {
            TokenKind::Keyword(Keyword::Import) => {
                self.advance();
                Ok(Syntax::Import(self.dotted_names()?))
            }
            TokenKind::Keyword(Keyword::From) => {
                self.advance();
                let module = self.dotted_name()?;
                if !self.eat(&TokenKind::Keyword(Keyword::Import)) {
                    return Err(self.unexpected());
                }
                let names = self
                    .dotted_names()?
                    .into_iter()
                    .map(|name| format!("{}.{}", module, name))
                    .collect();
                Ok(Syntax::Import(names))
            }
            _ => self.tuple_or_expression(),
        }
    }

    fn dotted_names(&mut self) -> CalcResult<Vec<String>> {
        let mut names = vec![self.dotted_name()?];
        while self.eat(&TokenKind::Comma) {
            names.push(self.dotted_name()?);
        }
        Ok(names)
    }

    fn dotted_name(&mut self) -> CalcResult<String> {
        let mut name = self.name()?;
        while self.eat(&TokenKind::Dot) {
            name.push('.');
            name.push_str(&self.name()?);
        }
        Ok(name)
    }

    fn name(&mut self) -> CalcResult<String> {
        match self.peek() {
            TokenKind::Name(_) | TokenKind::Star => match self.advance().kind {
                TokenKind::Name(name) => Ok(name),
                _ => Ok("*".to_string()),
            },
            _ => Err(self.unexpected()),
        }
    }

    fn tuple_or_expression(&mut self) -> CalcResult<Syntax> {
        let first = self.expression()?;
        if !self.check(&TokenKind::Comma) {
            return Ok(first);
        }

        let mut items = vec![first];
        while self.eat(&TokenKind::Comma) {
            if matches!(
                self.peek(),
                TokenKind::Eof | TokenKind::RParen | TokenKind::RBracket
            ) {
                break;
            }
            items.push(self.expression()?);
        }
        Ok(Syntax::Tuple(items))
    }

    fn expression(&mut self) -> CalcResult<Syntax> {
        self.nested(|p| {
            if p.eat(&TokenKind::Keyword(Keyword::Lambda)) {
                return p.lambda();
            }

            let body = p.or_expression()?;
            if !p.eat(&TokenKind::Keyword(Keyword::If)) {
                return Ok(body);
            }
            let test = p.or_expression()?;
            if !p.eat(&TokenKind::Keyword(Keyword::Else)) {
                return Err(p.unexpected());
            }
            let orelse = p.expression()?;
            Ok(Syntax::IfExp {
                test: Box::new(test),
                body: Box::new(body),
                orelse: Box::new(orelse),
            })
        })
    }

    fn lambda(&mut self) -> CalcResult<Syntax> {
        let mut params = Vec::new();
        while !self.check(&TokenKind::Colon) {
            params.push(self.name()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        if !self.eat(&TokenKind::Colon) {
            return Err(self.unexpected());
        }
        let body = self.expression()?;
        Ok(Syntax::Lambda {
            params,
            body: Box::new(body),
        })
    }

    fn or_expression(&mut self) -> CalcResult<Syntax> {
        self.bool_level(BoolOp::Or, Keyword::Or, Self::and_expression)
    }

    fn and_expression(&mut self) -> CalcResult<Syntax> {
        self.bool_level(BoolOp::And, Keyword::And, Self::not_expression)
    }

    fn bool_level(
        &mut self,
        op: BoolOp,
        keyword: Keyword,
        next: fn(&mut Self) -> CalcResult<Syntax>,
    ) -> CalcResult<Syntax> {
        let first = next(self)?;
        if !self.check(&TokenKind::Keyword(keyword)) {
            return Ok(first);
        }
        let mut values = vec![first];
        while self.eat(&TokenKind::Keyword(keyword)) {
            values.push(next(self)?);
        }
        Ok(Syntax::BoolOp { op, values })
    }

    fn not_expression(&mut self) -> CalcResult<Syntax> {
        if self.eat(&TokenKind::Keyword(Keyword::Not)) {
            let operand = self.nested(Self::not_expression)?;
            return Ok(Syntax::Unary {
                op: UnaryOp::Not,
                operand: Box::new(operand),
            });
        }
        self.comparison()
    }

    fn comparison_operator(&mut self) -> CalcResult<Option<CmpOp>> {
        let op = match self.peek() {
            TokenKind::Lt => CmpOp::Lt,
            TokenKind::Le => CmpOp::Le,
            TokenKind::Gt => CmpOp::Gt,
            TokenKind::Ge => CmpOp::Ge,
            TokenKind::EqEq => CmpOp::Eq,
            TokenKind::NotEq => CmpOp::NotEq,
            TokenKind::Keyword(Keyword::In) => CmpOp::In,
            TokenKind::Keyword(Keyword::Is) => {
                self.advance();
                if self.eat(&TokenKind::Keyword(Keyword::Not)) {
                    return Ok(Some(CmpOp::IsNot));
                }
                return Ok(Some(CmpOp::Is));
            }
            TokenKind::Keyword(Keyword::Not) => {
                self.advance();
                if self.eat(&TokenKind::Keyword(Keyword::In)) {
                    return Ok(Some(CmpOp::NotIn));
                }
                return Err(self.unexpected());
            }
            _ => return Ok(None),
        };
        self.advance();
        Ok(Some(op))
    }

    fn comparison(&mut self) -> CalcResult<Syntax> {
        let left = self.bit_or()?;
        let mut rest = Vec::new();
        while let Some(op) = self.comparison_operator()? {
            rest.push((op, self.bit_or()?));
        }
        if rest.is_empty() {
            Ok(left)
        } else {
            Ok(Syntax::Compare {
                left: Box::new(left),
                rest,
            })
        }
    }

    fn binary_level(
        &mut self,
        next: fn(&mut Self) -> CalcResult<Syntax>,
        operator: fn(&TokenKind) -> Option<BinOp>,
    ) -> CalcResult<Syntax> {
        let mut left = next(self)?;
        while let Some(op) = operator(self.peek()) {
            self.advance();
            let right = next(self)?;
            left = Syntax::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn bit_or(&mut self) -> CalcResult<Syntax> {
        self.binary_level(Self::bit_and, |kind| match kind {
            TokenKind::Pipe => Some(BinOp::BitOr),
            _ => None,
        })
    }

    fn bit_and(&mut self) -> CalcResult<Syntax> {
        self.binary_level(Self::shift, |kind| match kind {
            TokenKind::Amp => Some(BinOp::BitAnd),
            _ => None,
        })
    }

    fn shift(&mut self) -> CalcResult<Syntax> {
        self.binary_level(Self::arithmetic, |kind| match kind {
            TokenKind::LShift => Some(BinOp::LShift),
            TokenKind::RShift => Some(BinOp::RShift),
            _ => None,
        })
    }

    fn arithmetic(&mut self) -> CalcResult<Syntax> {
        self.binary_level(Self::term, |kind| match kind {
            TokenKind::Plus => Some(BinOp::Add),
            TokenKind::Minus => Some(BinOp::Sub),
            _ => None,
        })
    }

    fn term(&mut self) -> CalcResult<Syntax> {
        self.binary_level(Self::factor, |kind| match kind {
            TokenKind::Star => Some(BinOp::Mul),
            TokenKind::Slash => Some(BinOp::Div),
            TokenKind::DoubleSlash => Some(BinOp::FloorDiv),
            TokenKind::Percent => Some(BinOp::Mod),
            TokenKind::At => Some(BinOp::MatMult),
            _ => None,
        })
    }

    fn factor(&mut self) -> CalcResult<Syntax> {
        let op = match self.peek() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Plus => UnaryOp::Pos,
            TokenKind::Tilde => UnaryOp::Invert,
            _ => return self.power(),
        };
        self.advance();
        let operand = self.nested(Self::factor)?;
        Ok(Syntax::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn power(&mut self) -> CalcResult<Syntax> {
        let base = self.postfix()?;
        if !matches!(self.peek(), TokenKind::Caret | TokenKind::DoubleStar) {
            return Ok(base);
        }
        self.advance();
        let exponent = self.nested(Self::factor)?;
        Ok(Syntax::Binary {
            op: BinOp::Pow,
            left: Box::new(base),
            right: Box::new(exponent),
        })
    }

    fn postfix(&mut self) -> CalcResult<Syntax> {
        let mut node = self.atom()?;
        loop {
            let column = self.current().column;
            match self.peek() {
                TokenKind::LParen => {
                    self.advance();
                    let args = self.sequence(TokenKind::RParen, column)?;
                    node = Syntax::Call {
                        func: Box::new(node),
                        args,
                    };
                }
                TokenKind::LBracket => {
                    self.advance();
                    let index = self.tuple_or_expression()?;
                    self.expect(TokenKind::RBracket, column)?;
                    node = Syntax::Subscript {
                        value: Box::new(node),
                        index: Box::new(index),
                    };
                }
                TokenKind::Dot => {
                    self.advance();
                    let attr = self.name()?;
                    node = Syntax::Attribute {
                        value: Box::new(node),
                        attr,
                    };
                }
                _ => return Ok(node),
            }
        }
    }

    /// Comma-separated expressions up to (and consuming) `close`.
    fn sequence(&mut self, close: TokenKind, opened_at: usize) -> CalcResult<Vec<Syntax>> {
        let mut items = Vec::new();
        while !self.check(&close) {
            items.push(self.expression()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(close, opened_at)?;
        Ok(items)
    }

    fn atom(&mut self) -> CalcResult<Syntax> {
        let column = self.current().column;
        let node = match self.peek() {
            TokenKind::Number(_) | TokenKind::Str(_) | TokenKind::Name(_) => {
                match self.advance().kind {
                    TokenKind::Number(value) => Syntax::Number(value),
                    TokenKind::Str(value) => Syntax::Str(value),
                    TokenKind::Name(name) => Syntax::Name(name),
                    _ => return Err(self.unexpected()),
                }
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance();
                Syntax::Bool(true)
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance();
                Syntax::Bool(false)
            }
            TokenKind::Keyword(Keyword::None) => {
                self.advance();
                Syntax::NoneLiteral
            }
            TokenKind::LParen => {
                self.advance();
                if self.eat(&TokenKind::RParen) {
                    return Ok(Syntax::Tuple(Vec::new()));
                }
                let inner = self.tuple_or_expression()?;
                self.expect(TokenKind::RParen, column)?;
                inner
            }
            TokenKind::LBracket => {
                self.advance();
                Syntax::List(self.sequence(TokenKind::RBracket, column)?)
            }
            _ => return Err(self.unexpected()),
        };
        Ok(node)
    }
}
