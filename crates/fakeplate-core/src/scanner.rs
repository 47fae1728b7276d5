//! Token discovery.
//!
//! A token is `%%`, optional whitespace, an expression path, optional
//! whitespace, `%%`. Paths are built from letters, digits and `_ $ ^ ( ) -`,
//! with `.` separating segments:
//!
//! ```text
//! Hello %%name.firstName%%, your id is %% number.randomNumber %%.
//! ```
//!
//! Anything that does not match (a lone `%%`, a path with spaces inside) is
//! left in the text verbatim.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

/// A token occurrence found in template text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// The exact matched text, delimiters and inner whitespace included.
    pub literal: String,
    /// The trimmed expression path, e.g. `name.fullName`.
    pub path: String,
}

/// Find the distinct tokens in `text`, in order of first appearance.
///
/// A literal that occurs several times is reported once.
pub fn scan(text: &str) -> Vec<Token> {
    let mut seen = HashSet::new();
    let tokens: Vec<Token> = token_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let literal = caps.get(0)?.as_str();
            let path = caps.get(1)?.as_str();
            seen.insert(literal).then(|| Token {
                literal: literal.to_string(),
                path: path.to_string(),
            })
        })
        .collect();
    tracing::debug!("scanned {} distinct token(s)", tokens.len());
    tokens
}

/// The token pattern, compiled once.
pub(crate) fn token_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"%%\s*([A-Za-z0-9_$^().\-]+)\s*%%").expect("token pattern is valid")
    })
}
