// Arithmetic-only evaluator: tokenizer -> recursive-descent parser -> tree walk.
// Only numeric literals, + - * / and parentheses are understood.

use crate::estimate::error::EstimateError;

/// Limits keep parsing, evaluation and drop of the tree within a small stack
const MAX_DEPTH: usize = 256;
const MAX_TOKENS: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Neg(Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

fn is_safe_char(c: char) -> bool {
    c.is_ascii_digit()
        || c.is_whitespace()
        || matches!(c, '.' | '+' | '-' | '*' | '/' | '(' | ')' | 'e' | 'E')
}

/// Validate, parse and evaluate an arithmetic string
pub fn safe_eval(math: &str) -> Result<f64, EstimateError> {
    let cleaned = math.trim();
    if cleaned.is_empty() {
        return Err(EstimateError::Validation("empty expression".to_string()));
    }
    if !cleaned.chars().all(is_safe_char) {
        return Err(EstimateError::Validation(format!(
            "invalid characters in expression: {}",
            cleaned
        )));
    }

    let tokens = tokenize(cleaned)?;
    if tokens.len() > MAX_TOKENS {
        return Err(EstimateError::Validation(format!(
            "expression too long ({} tokens, at most {})",
            tokens.len(),
            MAX_TOKENS
        )));
    }
    log::trace!("tokens for {:?}: {:?}", cleaned, tokens);
    let expr = parse(&tokens).map_err(|e| match e {
        EstimateError::Validation(msg) => {
            EstimateError::Validation(format!("{} in expression: {}", msg, cleaned))
        }
        other => other,
    })?;
    let value = expr.eval()?;
    if !value.is_finite() {
        return Err(EstimateError::Arithmetic(format!(
            "result is not a finite number: {}",
            cleaned
        )));
    }
    Ok(value)
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, EstimateError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let token = match c {
            c if c.is_whitespace() => {
                i += 1;
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            c if c.is_ascii_digit() || c == '.' => {
                let (value, end) = lex_number(&chars, i)?;
                tokens.push(Token::Number(value));
                i = end;
                continue;
            }
            other => {
                return Err(EstimateError::Validation(format!(
                    "unexpected character '{}' at position {}",
                    other, i
                )))
            }
        };
        tokens.push(token);
        i += 1;
    }

    Ok(tokens)
}

/// Lex a decimal literal with optional exponent starting at `start`.
/// Returns the value and the index just past the literal.
fn lex_number(chars: &[char], start: usize) -> Result<(f64, usize), EstimateError> {
    let mut i = start;
    let mut digits = 0;

    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
        digits += 1;
    }
    if i < chars.len() && chars[i] == '.' {
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return Err(EstimateError::Validation(format!(
            "malformed number at position {}",
            start
        )));
    }

    if i < chars.len() && matches!(chars[i], 'e' | 'E') {
        let mut j = i + 1;
        if j < chars.len() && matches!(chars[j], '+' | '-') {
            j += 1;
        }
        let exp_start = j;
        while j < chars.len() && chars[j].is_ascii_digit() {
            j += 1;
        }
        if j == exp_start {
            return Err(EstimateError::Validation(format!(
                "malformed exponent at position {}",
                i
            )));
        }
        i = j;
    }

    let text: String = chars[start..i].iter().collect();
    let value = text.parse::<f64>().map_err(|e| {
        EstimateError::Validation(format!("malformed number '{}': {}", text, e))
    })?;
    Ok((value, i))
}

pub fn parse(tokens: &[Token]) -> Result<Expr, EstimateError> {
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.expr(0)?;
    match parser.peek() {
        None => Ok(expr),
        Some(Token::RParen) => Err(EstimateError::Arithmetic(
            "unbalanced parentheses: unexpected ')'".to_string(),
        )),
        Some(token) => Err(EstimateError::Validation(format!(
            "unexpected {:?}",
            token
        ))),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    // expr := term (('+' | '-') term)*
    fn expr(&mut self, depth: usize) -> Result<Expr, EstimateError> {
        let mut lhs = self.term(depth)?;
        while let Some(op) = match self.peek() {
            Some(Token::Plus) => Some(BinaryOp::Add),
            Some(Token::Minus) => Some(BinaryOp::Sub),
            _ => None,
        } {
            self.pos += 1;
            let rhs = self.term(depth)?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    // term := unary (('*' | '/') unary)*
    fn term(&mut self, depth: usize) -> Result<Expr, EstimateError> {
        let mut lhs = self.unary(depth)?;
        while let Some(op) = match self.peek() {
            Some(Token::Star) => Some(BinaryOp::Mul),
            Some(Token::Slash) => Some(BinaryOp::Div),
            _ => None,
        } {
            self.pos += 1;
            let rhs = self.unary(depth)?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    // unary := ('+' | '-') unary | primary
    fn unary(&mut self, depth: usize) -> Result<Expr, EstimateError> {
        if depth > MAX_DEPTH {
            return Err(EstimateError::Validation(
                "expression nested too deeply".to_string(),
            ));
        }
        match self.peek() {
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary(depth + 1)
            }
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(Expr::Neg(Box::new(self.unary(depth + 1)?)))
            }
            _ => self.primary(depth),
        }
    }

    // primary := NUMBER | '(' expr ')'
    fn primary(&mut self, depth: usize) -> Result<Expr, EstimateError> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(Expr::Number(value)),
            Some(Token::LParen) => {
                let inner = self.expr(depth + 1)?;
                match self.advance() {
                    Some(Token::RParen) => Ok(inner),
                    None => Err(EstimateError::Arithmetic(
                        "unbalanced parentheses: missing ')'".to_string(),
                    )),
                    Some(token) => Err(EstimateError::Validation(format!(
                        "expected ')' but found {:?}",
                        token
                    ))),
                }
            }
            Some(token) => Err(EstimateError::Validation(format!(
                "expected a number but found {:?}",
                token
            ))),
            None => Err(EstimateError::Validation(
                "unexpected end of input".to_string(),
            )),
        }
    }
}

impl Expr {
    pub fn eval(&self) -> Result<f64, EstimateError> {
        match self {
            Expr::Number(value) => Ok(*value),
            Expr::Neg(inner) => Ok(-inner.eval()?),
            Expr::Binary(op, lhs, rhs) => {
                let lhs = lhs.eval()?;
                let rhs = rhs.eval()?;
                match op {
                    BinaryOp::Add => Ok(lhs + rhs),
                    BinaryOp::Sub => Ok(lhs - rhs),
                    BinaryOp::Mul => Ok(lhs * rhs),
                    BinaryOp::Div if rhs == 0.0 => {
                        Err(EstimateError::Arithmetic("division by zero".to_string()))
                    }
                    BinaryOp::Div => Ok(lhs / rhs),
                }
            }
        }
    }
}
