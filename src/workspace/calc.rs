//! Constrained arithmetic evaluator for the draft-text calculator.
//!
//! Accepts decimal numbers, `+ - * / ( )`, and whitespace; anything else is
//! an error. Deliberately not a general expression evaluator: the draft
//! text is user input.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),

    #[error("unexpected token '{0}'")]
    UnexpectedToken(Token),

    #[error("expression ended unexpectedly")]
    UnexpectedEnd,

    #[error("unexpected trailing input '{0}'")]
    TrailingInput(Token),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Open,
    Close,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Open => write!(f, "("),
            Token::Close => write!(f, ")"),
        }
    }
}

fn number_pattern() -> &'static Regex {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    NUMBER.get_or_init(|| Regex::new(r"^(?:\d+(?:\.\d*)?|\.\d+)").unwrap())
}

fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut rest = input;

    while let Some(ch) = rest.chars().next() {
        let token = match ch {
            ' ' | '\t' | '\n' | '\r' => {
                rest = &rest[ch.len_utf8()..];
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::Open,
            ')' => Token::Close,
            _ => {
                let Some(m) = number_pattern().find(rest) else {
                    return Err(EvalError::UnexpectedChar(ch));
                };
                let literal = m.as_str();
                rest = &rest[literal.len()..];
                // the pattern only admits digits and one dot, huge
                // literals saturate to infinity like any f64
                tokens.push(Token::Number(literal.parse().unwrap()));
                continue;
            }
        };

        tokens.push(token);
        rest = &rest[1..];
    }

    Ok(tokens)
}

/// Evaluates `input` as an arithmetic expression.
///
/// Grammar:
/// ```text
/// expr   := term (('+' | '-') term)*
/// term   := factor (('*' | '/') factor)*
/// factor := '-' factor | '(' expr ')' | number
/// ```
///
/// Division follows IEEE f64 semantics; there is no special case for
/// dividing by zero.
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }

    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expr()?;

    match parser.peek() {
        Some(token) => Err(EvalError::TrailingInput(token)),
        None => Ok(value),
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;

        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = match op {
                Token::Plus => value + rhs,
                _ => value - rhs,
            };
        }

        Ok(value)
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.factor()?;

        while let Some(op @ (Token::Star | Token::Slash)) = self.peek() {
            self.pos += 1;
            let rhs = self.factor()?;
            value = match op {
                Token::Star => value * rhs,
                _ => value / rhs,
            };
        }

        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, EvalError> {
        match self.bump() {
            Some(Token::Minus) => Ok(-self.factor()?),
            Some(Token::Open) => {
                let value = self.expr()?;
                match self.bump() {
                    Some(Token::Close) => Ok(value),
                    Some(token) => Err(EvalError::UnexpectedToken(token)),
                    None => Err(EvalError::UnexpectedEnd),
                }
            }
            Some(Token::Number(n)) => Ok(n),
            Some(token) => Err(EvalError::UnexpectedToken(token)),
            None => Err(EvalError::UnexpectedEnd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_two_and_two() {
        assert_eq!(evaluate("2+2"), Ok(4.0));
    }

    #[test]
    fn empty_and_blank_input_are_errors() {
        assert_eq!(evaluate(""), Err(EvalError::Empty));
        assert_eq!(evaluate("   "), Err(EvalError::Empty));
    }

    #[test]
    fn dangling_operator_is_an_error() {
        assert_eq!(evaluate("2+"), Err(EvalError::UnexpectedEnd));
        assert_eq!(evaluate("(2+3)*"), Err(EvalError::UnexpectedEnd));
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(evaluate("2+3*4"), Ok(14.0));
        assert_eq!(evaluate("2*3+4"), Ok(10.0));
    }

    #[test]
    fn parentheses_override_precedence() {
        assert_eq!(evaluate("(2+3)*4"), Ok(20.0));
        assert_eq!(evaluate("2*(3+4)"), Ok(14.0));
    }

    #[test]
    fn unary_minus_applies_to_factors() {
        assert_eq!(evaluate("-3+5"), Ok(2.0));
        assert_eq!(evaluate("2*-3"), Ok(-6.0));
    }

    #[test]
    fn decimal_literals_parse() {
        assert_eq!(evaluate("0.5*4"), Ok(2.0));
        assert_eq!(evaluate(".5+1"), Ok(1.5));
        assert_eq!(evaluate("7/2"), Ok(3.5));
    }

    #[test]
    fn whitespace_is_ignored() {
        assert_eq!(evaluate(" 2 + 2 "), Ok(4.0));
    }

    #[test]
    fn foreign_characters_are_rejected() {
        assert_eq!(evaluate("π+1"), Err(EvalError::UnexpectedChar('π')));
        assert_eq!(evaluate("2+x"), Err(EvalError::UnexpectedChar('x')));
    }

    #[test]
    fn adjacent_values_are_trailing_input() {
        assert!(matches!(
            evaluate("2 3"),
            Err(EvalError::TrailingInput(Token::Number(_)))
        ));
        assert!(evaluate("1.2.3").is_err());
    }

    #[test]
    fn unclosed_parenthesis_is_an_error() {
        assert_eq!(evaluate("2*(3+4"), Err(EvalError::UnexpectedEnd));
    }

    #[test]
    fn division_by_zero_follows_ieee_semantics() {
        assert_eq!(evaluate("1/0"), Ok(f64::INFINITY));
    }
}
