use itertools::Itertools;
use thiserror::Error;

use crate::MAX_TOKENS;

/// Problems with the token definitions supplied by the user. Lines are
/// numbered from one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("Line {line}: invalid token name '{name}' in \"{text}\"")]
    InvalidTokenName { name: String, line: usize, text: String },

    #[error("Line {line}: duplicate token name '{name}' in \"{text}\"")]
    DuplicateTokenName { name: String, line: usize, text: String },

    #[error("Line {line}: token '{name}' accepts the empty string in \"{text}\"")]
    AcceptsEmptyString { name: String, line: usize, text: String },

    #[error("Line {line}: reference to undefined name '{name}' in \"{text}\"")]
    UnresolvedReference { name: String, line: usize, text: String },

    #[error("Line {line}: too many tokens, at most {} can be defined, in \"{text}\"", MAX_TOKENS)]
    TooManyTokens { line: usize, text: String },

    #[error("No tokens were defined")]
    NoTokens,

    #[error("Tokens that are never recognized: {}", .0.iter().format(", "))]
    RedundantTokens(Vec<String>),
}
