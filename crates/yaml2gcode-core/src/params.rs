//! Parameter string tokenizer
//!
//! Instruction parameters are written as whitespace separated
//! `<letter><number>` tokens, e.g. `R10 A45 S-30`. Letters are
//! case-sensitive. Callers pick the letters they understand and ignore the
//! rest; only the numbers of recognised letters are ever parsed.

use crate::error::ParameterError;

/// One `<letter><number>` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamToken<'a> {
    pub letter: char,
    pub value: &'a str,
    pub raw: &'a str,
}

impl<'a> ParamToken<'a> {
    /// Parse the numeric part of the token. `inf` and `NaN` are rejected.
    pub fn number(&self) -> Result<f64, ParameterError> {
        match self.value.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(ParameterError::InvalidNumber {
                token: self.raw.to_string(),
            }),
        }
    }
}

/// Split a line into non-empty whitespace separated fields.
pub fn split_fields(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Iterate over the tokens of a parameter string.
pub fn tokens(params: &str) -> impl Iterator<Item = ParamToken<'_>> {
    params.split_whitespace().filter_map(|raw| {
        let letter = raw.chars().next()?;
        Some(ParamToken {
            letter,
            value: &raw[letter.len_utf8()..],
            raw,
        })
    })
}
