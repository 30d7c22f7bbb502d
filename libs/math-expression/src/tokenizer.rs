//! Tokenizer: turns raw learner text into a flat token list.
//!
//! Letter runs are resolved here rather than in the parser: a run is a function name
//! if it matches one, otherwise it is split into variable names (longest allowed
//! multi-letter names first, single letters otherwise).

use crate::error::{MathParsingError, Result};

/// Every function name the tokenizer recognises. Only `sqrt` is evaluable.
pub(crate) const KNOWN_FUNCTIONS: &[&str] = &["sqrt", "exp", "log", "ln", "sin", "cos", "tan"];

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Number { value: f64, text: String },
    Variable(String),
    Function(String),
    IncompleteFunction,
    Plus,
    Minus,
    Multiply,
    Divide,
    Exponentiate,
    Equals,
    LeftParen,
    RightParen,
    SquareRoot,
}

impl Token {
    /// The operator symbol for binary-capable tokens.
    pub(crate) fn operator_symbol(&self) -> Option<char> {
        match self {
            Token::Plus => Some('+'),
            Token::Minus => Some('-'),
            Token::Multiply => Some('*'),
            Token::Divide => Some('/'),
            Token::Exponentiate => Some('^'),
            Token::Equals => Some('='),
            _ => None,
        }
    }
}

/// How letter runs are resolved.
#[derive(Debug, Clone, Copy)]
pub(crate) enum LetterMode<'a> {
    /// Numeric expressions: letters are only meaningful as function names.
    Numeric,
    /// Algebraic expressions with the author's allowed variable names.
    Algebraic(&'a [String]),
}

pub(crate) struct Tokenizer<'input, 'vars> {
    input: &'input str,
    pos: usize,
    mode: LetterMode<'vars>,
}

impl<'input, 'vars> Tokenizer<'input, 'vars> {
    pub(crate) fn new(input: &'input str, mode: LetterMode<'vars>) -> Self {
        Tokenizer {
            input,
            pos: 0,
            mode,
        }
    }

    pub(crate) fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(c) = self.peek() {
            if matches!(c, ' ' | '\t' | '\r' | '\n') {
                self.pos += c.len_utf8();
                continue;
            }
            if c.is_ascii_digit() {
                tokens.push(self.take_number()?);
                continue;
            }
            if c.is_alphabetic() {
                let run = self.take_letters();
                self.resolve_letters(&run, &mut tokens);
                continue;
            }
            self.pos += c.len_utf8();
            let token = match c {
                '+' => Token::Plus,
                '-' | '−' => Token::Minus,
                '*' | '×' => Token::Multiply,
                '/' | '÷' => Token::Divide,
                '^' => Token::Exponentiate,
                '=' => Token::Equals,
                '(' => Token::LeftParen,
                ')' => Token::RightParen,
                '√' => Token::SquareRoot,
                other => return Err(MathParsingError::UnnecessarySymbol(other.to_string())),
            };
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn take_number(&mut self) -> Result<Token> {
        let rest = &self.input[self.pos..];
        let bytes = rest.as_bytes();
        let mut end = 0;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end < bytes.len() && bytes[end] == b'.' {
            end += 1;
            let fraction_start = end;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            // "3." has no fractional digits.
            if end == fraction_start {
                return Err(MathParsingError::GenericError);
            }
        }
        let text = &rest[..end];
        self.pos += end;
        let value = text
            .parse::<f64>()
            .map_err(|_| MathParsingError::GenericError)?;
        Ok(Token::Number {
            value,
            text: text.to_string(),
        })
    }

    fn take_letters(&mut self) -> String {
        let rest = &self.input[self.pos..];
        let end = rest
            .char_indices()
            .find(|(_, c)| !c.is_alphabetic())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        self.pos += end;
        rest[..end].to_string()
    }

    fn resolve_letters(&self, run: &str, tokens: &mut Vec<Token>) {
        if KNOWN_FUNCTIONS.contains(&run) {
            tokens.push(Token::Function(run.to_string()));
            return;
        }
        match self.mode {
            LetterMode::Numeric => {
                if is_function_prefix(run) {
                    tokens.push(Token::IncompleteFunction);
                } else {
                    tokens.extend(run.chars().map(|c| Token::Variable(c.to_string())));
                }
            }
            LetterMode::Algebraic(allowed) => {
                if is_function_prefix(run) && !is_covered_by(run, allowed) {
                    tokens.push(Token::IncompleteFunction);
                } else {
                    split_variables(run, allowed, tokens);
                }
            }
        }
    }
}

/// Whether `run` is a proper prefix (at least two letters) of a known function name.
fn is_function_prefix(run: &str) -> bool {
    run.chars().count() >= 2
        && KNOWN_FUNCTIONS
            .iter()
            .any(|name| name.len() > run.len() && name.starts_with(run))
}

/// Whether `run` can be written entirely with allowed variable names.
fn is_covered_by(run: &str, allowed: &[String]) -> bool {
    let mut pieces = Vec::new();
    split_variables(run, allowed, &mut pieces);
    pieces.iter().all(|piece| match piece {
        Token::Variable(name) => allowed.iter().any(|a| a == name),
        _ => true,
    })
}

fn split_variables(run: &str, allowed: &[String], tokens: &mut Vec<Token>) {
    let mut rest = run;
    while !rest.is_empty() {
        if let Some(function) = KNOWN_FUNCTIONS.iter().find(|name| rest.starts_with(*name)) {
            tokens.push(Token::Function(function.to_string()));
            rest = &rest[function.len()..];
            continue;
        }
        let longest = allowed
            .iter()
            .filter(|name| name.chars().count() > 1 && rest.starts_with(name.as_str()))
            .max_by_key(|name| name.len());
        let piece_len = match longest {
            Some(name) => name.len(),
            None => rest.chars().next().map(char::len_utf8).unwrap_or(rest.len()),
        };
        tokens.push(Token::Variable(rest[..piece_len].to_string()));
        rest = &rest[piece_len..];
    }
}
