//! Four-operator arithmetic for amount entry fields.
//!
//! Multiplication and division bind tighter than addition and subtraction;
//! operators of equal precedence apply left to right. Parentheses are not
//! supported.
//!
//! `.` and `,` are both decimal separators and a number may carry at most one.
//! Thousands grouping is not supported: `1,000` reads as `1.0`, and
//! `1,000.50` is rejected.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculatorError {
    #[error("expression is empty")]
    Empty,
    #[error("unexpected character `{0}`")]
    UnexpectedChar(char),
    #[error("invalid number `{0}`")]
    InvalidNumber(String),
    #[error("expression is malformed")]
    Malformed,
    #[error("division by zero")]
    DivisionByZero,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Op::Add),
            '-' | '−' => Some(Op::Sub),
            '*' | '×' | 'x' => Some(Op::Mul),
            '/' | '÷' => Some(Op::Div),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Op(Op),
}

/// Evaluates `expression`, e.g. `12.5 + 3 × 2` = `18.5`.
pub fn evaluate(expression: &str) -> Result<f64, CalculatorError> {
    let tokens = tokenize(expression)?;
    let (numbers, ops) = split_operands(&tokens)?;

    // First pass folds * and / into their left operand.
    let mut terms = vec![numbers[0]];
    let mut additive = Vec::new();
    for (op, &rhs) in ops.iter().zip(numbers.iter().skip(1)) {
        match op {
            Op::Mul | Op::Div => {
                let lhs = terms.last_mut().ok_or(CalculatorError::Malformed)?;
                *lhs = apply(*lhs, *op, rhs)?;
            }
            Op::Add | Op::Sub => {
                additive.push(*op);
                terms.push(rhs);
            }
        }
    }

    // Second pass applies + and - left to right.
    let mut result = terms[0];
    for (op, &term) in additive.iter().zip(terms.iter().skip(1)) {
        result = apply(result, *op, term)?;
    }
    Ok(result)
}

fn apply(lhs: f64, op: Op, rhs: f64) -> Result<f64, CalculatorError> {
    match op {
        Op::Add => Ok(lhs + rhs),
        Op::Sub => Ok(lhs - rhs),
        Op::Mul => Ok(lhs * rhs),
        Op::Div if rhs == 0.0 => Err(CalculatorError::DivisionByZero),
        Op::Div => Ok(lhs / rhs),
    }
}

fn tokenize(expression: &str) -> Result<Vec<Token>, CalculatorError> {
    let mut tokens = Vec::new();
    let mut number = String::new();

    for ch in expression.chars() {
        if ch.is_ascii_digit() {
            number.push(ch);
            continue;
        }
        if ch == '.' || ch == ',' {
            if number.contains('.') {
                return Err(CalculatorError::InvalidNumber(format!("{number}{ch}")));
            }
            number.push('.');
            continue;
        }
        if ch.is_whitespace() {
            continue;
        }
        let op = Op::from_char(ch).ok_or(CalculatorError::UnexpectedChar(ch))?;
        flush_number(&mut number, &mut tokens)?;
        tokens.push(Token::Op(op));
    }
    flush_number(&mut number, &mut tokens)?;

    if tokens.is_empty() {
        return Err(CalculatorError::Empty);
    }
    Ok(tokens)
}

fn flush_number(buffer: &mut String, tokens: &mut Vec<Token>) -> Result<(), CalculatorError> {
    if buffer.is_empty() {
        return Ok(());
    }
    let value = buffer
        .parse::<f64>()
        .map_err(|_| CalculatorError::InvalidNumber(buffer.clone()))?;
    tokens.push(Token::Number(value));
    buffer.clear();
    Ok(())
}

/// Splits tokens into alternating operands and operators. A leading `-`
/// negates the first operand.
fn split_operands(tokens: &[Token]) -> Result<(Vec<f64>, Vec<Op>), CalculatorError> {
    let mut iter = tokens.iter().peekable();
    let mut negate = false;
    if let Some(Token::Op(Op::Sub)) = iter.peek() {
        negate = true;
        iter.next();
    }

    let mut numbers = Vec::new();
    let mut ops = Vec::new();
    let mut expect_number = true;
    for token in iter {
        match (token, expect_number) {
            (Token::Number(value), true) => {
                numbers.push(*value);
                expect_number = false;
            }
            (Token::Op(op), false) => {
                ops.push(*op);
                expect_number = true;
            }
            _ => return Err(CalculatorError::Malformed),
        }
    }
    if expect_number || numbers.is_empty() {
        return Err(CalculatorError::Malformed);
    }
    if negate {
        numbers[0] = -numbers[0];
    }
    Ok((numbers, ops))
}
