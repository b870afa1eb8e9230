use thiserror::Error;

/// Descriptor text that does not follow the project grammar or structure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected end of input at {line}:{column}, expected {expected}")]
    UnexpectedEof {
        line: usize,
        column: usize,
        expected: &'static str,
    },

    #[error("unexpected character {found:?} at {line}:{column}, expected {expected}")]
    UnexpectedChar {
        found: char,
        line: usize,
        column: usize,
        expected: &'static str,
    },

    #[error("unterminated comment starting at {line}:{column}")]
    UnterminatedComment { line: usize, column: usize },

    #[error("unterminated string starting at {line}:{column}")]
    UnterminatedString { line: usize, column: usize },

    #[error("unexpected content after the root object at {line}:{column}")]
    TrailingContent { line: usize, column: usize },

    #[error("values nested too deeply at {line}:{column}")]
    TooDeep { line: usize, column: usize },

    #[error("invalid project structure: {0}")]
    Structure(String),
}

/// An edit that cannot be applied to an otherwise well-formed descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("project has no native target to attach a build phase to")]
    NoMutationTarget,

    #[error("invalid project structure: {0}")]
    Structure(String),
}
