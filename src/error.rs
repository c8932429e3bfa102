use thiserror::Error;

/// Reasons a pattern string fails to compile.
///
/// Positions are byte offsets into the original pattern string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The pattern body ends with a `\` that has nothing to escape.
    #[error("trailing escape at {pos}: nothing follows '\\'")]
    TrailingEscape { pos: usize },

    /// A quantifier appears where an atom was expected.
    #[error("quantifier '{quantifier}' at {pos} has nothing to repeat")]
    DanglingQuantifier { pos: usize, quantifier: char },

    /// `^` or `$` was given without anything for it to anchor.
    #[error("anchor '{anchor}' at {pos} has nothing to anchor")]
    EmptyAnchor { pos: usize, anchor: char },
}

pub type Result<T> = std::result::Result<T, Error>;
