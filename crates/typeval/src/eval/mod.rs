//! Statement parsing and expression evaluation
//!
//! The grammar is parsed by precedence with one statement parsed and
//! evaluated at a time, so the side effects of earlier statements in a
//! `;`-separated sequence survive a lexical or syntax error in a later
//! one. Within a statement a small expression tree is built and then
//! walked against the environment.

pub mod binary;
pub mod unary;

use crate::environment::Environment;
use crate::error::{EvalError, Result};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::value::Value;

pub use binary::unify;

// ═══════════════════════════════════════════════════════════════════════
// Expression Tree
// ═══════════════════════════════════════════════════════════════════════

/// Expression tree for a single statement.
#[derive(Debug, Clone)]
pub(crate) enum Expr {
    Literal(Value),
    Ident(String),
    List(Vec<Expr>),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnaryOp {
    Not,
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    And,
    Or,
    In,
    Subset,
}

impl BinaryOp {
    /// The operator symbol for error messages.
    pub(crate) fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::In => "in",
            BinaryOp::Subset => "subset",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Parser
// ═══════════════════════════════════════════════════════════════════════

/// Recursive-descent parser over the lazy token stream.
///
/// Tokens are pulled on demand; at most two tokens of lookahead are
/// buffered, which keeps the statement-at-a-time evaluation order of
/// the grammar observable to the caller.
struct Parser<'a> {
    lexer: Lexer<'a>,
    buffer: Vec<Token>,
    expr: &'a str,
}

impl<'a> Parser<'a> {
    fn new(expr: &'a str) -> Self {
        Self {
            lexer: Lexer::new(expr),
            buffer: Vec::new(),
            expr,
        }
    }

    fn fill(&mut self, n: usize) -> Result<()> {
        while self.buffer.len() < n {
            match self.lexer.next() {
                Some(Ok(token)) => self.buffer.push(token),
                Some(Err(e)) => return Err(e),
                None => break,
            }
        }
        Ok(())
    }

    fn peek_kind(&mut self, i: usize) -> Result<Option<&TokenKind>> {
        self.fill(i + 1)?;
        Ok(self.buffer.get(i).map(|t| &t.kind))
    }

    fn advance(&mut self) -> Result<Option<Token>> {
        self.fill(1)?;
        if self.buffer.is_empty() {
            Ok(None)
        } else {
            Ok(Some(self.buffer.remove(0)))
        }
    }

    /// Syntax error at a token, or at end of input.
    fn unexpected(&self, token: Option<&Token>) -> EvalError {
        match token {
            Some(t) => EvalError::SyntaxError {
                token: t.kind.to_string(),
                pos: t.pos,
                expr: self.expr.to_string(),
            },
            None => EvalError::SyntaxError {
                token: "<end of expression>".to_string(),
                pos: self.expr.len(),
                expr: self.expr.to_string(),
            },
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<()> {
        let token = self.advance()?;
        match token {
            Some(ref t) if t.kind == *kind => Ok(()),
            other => Err(self.unexpected(other.as_ref())),
        }
    }

    /// Does the next token start a binary operator at this level?
    fn eat_op(&mut self, ops: &[(TokenKind, BinaryOp)]) -> Result<Option<BinaryOp>> {
        if let Some(kind) = self.peek_kind(0)? {
            for (token_kind, op) in ops {
                if kind == token_kind {
                    let op = *op;
                    self.advance()?;
                    return Ok(Some(op));
                }
            }
        }
        Ok(None)
    }

    fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr> {
        let mut left = self.parse_and()?;
        while self.eat_op(&[(TokenKind::Or, BinaryOp::Or)])?.is_some() {
            let right = self.parse_and()?;
            left = Expr::Binary {
                op: BinaryOp::Or,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr> {
        let mut left = self.parse_equality()?;
        while self.eat_op(&[(TokenKind::And, BinaryOp::And)])?.is_some() {
            let right = self.parse_equality()?;
            left = Expr::Binary {
                op: BinaryOp::And,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<Expr> {
        let mut left = self.parse_relational()?;
        while let Some(op) = self.eat_op(&[
            (TokenKind::Eq, BinaryOp::Eq),
            (TokenKind::Ne, BinaryOp::Ne),
        ])? {
            let right = self.parse_relational()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_relational(&mut self) -> Result<Expr> {
        let mut left = self.parse_additive()?;
        while let Some(op) = self.eat_op(&[
            (TokenKind::Lt, BinaryOp::Lt),
            (TokenKind::Le, BinaryOp::Le),
            (TokenKind::Gt, BinaryOp::Gt),
            (TokenKind::Ge, BinaryOp::Ge),
            (TokenKind::In, BinaryOp::In),
            (TokenKind::Subset, BinaryOp::Subset),
        ])? {
            let right = self.parse_additive()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr> {
        let mut left = self.parse_multiplicative()?;
        while let Some(op) = self.eat_op(&[
            (TokenKind::Plus, BinaryOp::Add),
            (TokenKind::Minus, BinaryOp::Sub),
        ])? {
            let right = self.parse_multiplicative()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr> {
        let mut left = self.parse_unary()?;
        while let Some(op) = self.eat_op(&[
            (TokenKind::Star, BinaryOp::Mul),
            (TokenKind::Slash, BinaryOp::Div),
        ])? {
            let right = self.parse_unary()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        match self.peek_kind(0)? {
            Some(TokenKind::Not) => {
                self.advance()?;
                Ok(Expr::Unary {
                    op: UnaryOp::Not,
                    operand: Box::new(self.parse_unary()?),
                })
            }
            Some(TokenKind::Minus) => {
                self.advance()?;
                Ok(Expr::Unary {
                    op: UnaryOp::Neg,
                    operand: Box::new(self.parse_unary()?),
                })
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        let token = self.advance()?;
        match token {
            Some(Token {
                kind: TokenKind::Num(n),
                ..
            }) => Ok(Expr::Literal(Value::Num(n))),
            Some(Token {
                kind: TokenKind::Str(s),
                ..
            }) => Ok(Expr::Literal(Value::string(s))),
            Some(Token {
                kind: TokenKind::Bool(b),
                ..
            }) => Ok(Expr::Literal(Value::Bool(b))),
            Some(Token {
                kind: TokenKind::Ident(name),
                ..
            }) => Ok(Expr::Ident(name)),
            Some(Token {
                kind: TokenKind::LParen,
                ..
            }) => {
                let inner = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            Some(Token {
                kind: TokenKind::LBracket,
                ..
            }) => self.parse_list(),
            other => Err(self.unexpected(other.as_ref())),
        }
    }

    /// List literal; the opening bracket is already consumed.
    fn parse_list(&mut self) -> Result<Expr> {
        if matches!(self.peek_kind(0)?, Some(TokenKind::RBracket)) {
            self.advance()?;
            return Ok(Expr::List(Vec::new()));
        }
        let mut items = vec![self.parse_expr()?];
        while matches!(self.peek_kind(0)?, Some(TokenKind::Comma)) {
            self.advance()?;
            items.push(self.parse_expr()?);
        }
        self.expect(&TokenKind::RBracket)?;
        Ok(Expr::List(items))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Evaluation
// ═══════════════════════════════════════════════════════════════════════

/// Trait for evaluating expression nodes to values.
pub(crate) trait Evaluate {
    /// Evaluate this node in the given environment.
    fn eval(&self, env: &mut Environment, autodefine: bool) -> Result<Value>;
}

impl Evaluate for Expr {
    fn eval(&self, env: &mut Environment, autodefine: bool) -> Result<Value> {
        match self {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Ident(name) => resolve(name, env, autodefine),
            Expr::List(items) => {
                let values = items
                    .iter()
                    .map(|item| item.eval(env, autodefine))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Value::list(values))
            }
            Expr::Unary { op, operand } => {
                let value = operand.eval(env, autodefine)?;
                match op {
                    UnaryOp::Not => unary::eval_not(value),
                    UnaryOp::Neg => unary::eval_neg(value),
                }
            }
            Expr::Binary { op, left, right } => {
                binary::eval_binary(*op, left, right, env, autodefine)
            }
        }
    }
}

/// Resolve an identifier against the environment.
///
/// In autodefine mode an unbound identifier is created as `Unknown` and
/// becomes eligible for unification at the first operator applied to it;
/// in strict mode the lookup fails.
fn resolve(name: &str, env: &mut Environment, autodefine: bool) -> Result<Value> {
    if let Some(value) = env.get(name) {
        return Ok(value.clone());
    }
    if autodefine {
        env.set(name, Value::Unknown);
        Ok(Value::Unknown)
    } else {
        Err(EvalError::UndefinedVariable {
            name: name.to_string(),
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Statement Sequences
// ═══════════════════════════════════════════════════════════════════════

/// Tokenize and evaluate a `;`-separated statement sequence against an
/// environment.
///
/// An `identifier = expression` statement binds the value and yields no
/// standalone result; the returned value is that of the last expression
/// statement, or `Unknown` when the sequence contains none. Statements
/// are evaluated as they are parsed, so bindings made before a later
/// error are kept (non-transactional by design).
///
/// # Example
///
/// ```
/// use typeval::{evaluate, Environment, Value};
///
/// let mut env = Environment::new();
/// let result = evaluate("a=4;a+1", &mut env, true).unwrap();
/// assert_eq!(result, Value::int(5));
/// assert_eq!(env.get("a"), Some(&Value::int(4)));
/// ```
pub fn evaluate(expr: &str, env: &mut Environment, autodefine: bool) -> Result<Value> {
    let mut parser = Parser::new(expr);
    let mut last = Value::Unknown;

    loop {
        while matches!(parser.peek_kind(0)?, Some(TokenKind::Semi)) {
            parser.advance()?;
        }
        if parser.peek_kind(0)?.is_none() {
            break;
        }

        let is_assignment = matches!(parser.peek_kind(0)?, Some(TokenKind::Ident(_)))
            && matches!(parser.peek_kind(1)?, Some(TokenKind::Assign));

        if is_assignment {
            let name = match parser.advance()? {
                Some(Token {
                    kind: TokenKind::Ident(name),
                    ..
                }) => name,
                _ => unreachable!("lookahead guaranteed an identifier"),
            };
            parser.advance()?; // the '='
            let value = parser.parse_expr()?.eval(env, autodefine)?;
            env.set(name, value);
        } else {
            last = parser.parse_expr()?.eval(env, autodefine)?;
        }

        match parser.advance()? {
            None => break,
            Some(Token {
                kind: TokenKind::Semi,
                ..
            }) => continue,
            Some(token) => return Err(parser.unexpected(Some(&token))),
        }
    }

    Ok(last)
}
