use thiserror::Error;

/// Source location span for error reporting
/// Represents a range of bytes in the input string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start position (0-indexed byte offset)
    pub start: usize,
    /// End position (exclusive, 0-indexed byte offset)
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Create a span for a single position
    pub fn at(pos: usize) -> Self {
        Span {
            start: pos,
            end: pos + 1,
        }
    }

    /// Check if this span has valid location info
    pub fn is_valid(&self) -> bool {
        self.end > self.start
    }

    /// Format the span for display (1-indexed for users)
    pub fn display(&self) -> String {
        if !self.is_valid() {
            String::new()
        } else if self.end - self.start == 1 {
            format!(" at position {}", self.start + 1)
        } else {
            format!(" at positions {}-{}", self.start + 1, self.end)
        }
    }
}

fn span_suffix(span: &Option<Span>) -> String {
    span.map_or(String::new(), |s| s.display())
}

/// Plain error category, independent of the payload carried by [`SymError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Runtime,
    DivideByZero,
    NotImplemented,
    Domain,
    Parse,
    Unknown,
}

/// Errors raised by construction, parsing and rewrite operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SymError {
    /// Unexpected failure inside the engine, or a malformed call
    #[error("runtime error: {0}")]
    Runtime(String),

    /// Exact division by zero
    #[error("division by zero")]
    DivideByZero,

    /// Operation undefined for this construct
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// Argument outside the valid domain of an operation
    #[error("domain error: {0}")]
    Domain(String),

    /// Malformed input string
    #[error("parse error: {msg}{}", span_suffix(.span))]
    Parse { msg: String, span: Option<Span> },

    /// Fallback for anything not covered above
    #[error("unknown error: {0}")]
    Unknown(String),
}

impl SymError {
    /// Create a parse error without location info
    pub fn parse(msg: impl Into<String>) -> Self {
        SymError::Parse {
            msg: msg.into(),
            span: None,
        }
    }

    /// Create a parse error pointing at `span`
    pub fn parse_at(msg: impl Into<String>, span: Span) -> Self {
        SymError::Parse {
            msg: msg.into(),
            span: Some(span),
        }
    }

    pub fn runtime(msg: impl Into<String>) -> Self {
        SymError::Runtime(msg.into())
    }

    pub fn domain(msg: impl Into<String>) -> Self {
        SymError::Domain(msg.into())
    }

    pub fn not_implemented(msg: impl Into<String>) -> Self {
        SymError::NotImplemented(msg.into())
    }

    /// The category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SymError::Runtime(_) => ErrorKind::Runtime,
            SymError::DivideByZero => ErrorKind::DivideByZero,
            SymError::NotImplemented(_) => ErrorKind::NotImplemented,
            SymError::Domain(_) => ErrorKind::Domain,
            SymError::Parse { .. } => ErrorKind::Parse,
            SymError::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// Location of a parse error, if known
    pub fn span(&self) -> Option<Span> {
        match self {
            SymError::Parse { span, .. } => *span,
            _ => None,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SymError>;
