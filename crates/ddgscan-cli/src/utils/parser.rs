use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),

    #[error("No mutation types given in '{0}'. Expected one-letter codes (e.g., 'A' or 'A,G').")]
    EmptyTargets(String),

    #[error("Invalid mutation type '{token}' in '{input}'. Expected one-letter codes.")]
    InvalidTarget { token: String, input: String },
}

/// Splits `KEY=VALUE` at the first `=`.
pub fn split_key_value(input: &str) -> Result<(&str, &str), ParseError> {
    match input.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => Err(ParseError::InvalidKeyValue(input.to_string())),
    }
}

/// Parses scan targets given as comma or whitespace separated one-letter codes.
///
/// A run of letters without separators is read as one code per letter, so `AG`
/// is the same as `A,G`. Repeated codes are kept once.
pub fn parse_targets(input: &str) -> Result<Vec<char>, ParseError> {
    let mut targets = Vec::new();
    for token in input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        if !token.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ParseError::InvalidTarget {
                token: token.to_string(),
                input: input.to_string(),
            });
        }
        for code in token.chars() {
            if !targets.contains(&code) {
                targets.push(code);
            }
        }
    }
    if targets.is_empty() {
        return Err(ParseError::EmptyTargets(input.to_string()));
    }
    Ok(targets)
}
