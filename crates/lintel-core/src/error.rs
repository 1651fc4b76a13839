//! Error types and handling for lintel operations

use thiserror::Error;

/// Main error type for lintel operations
#[derive(Debug, Error)]
pub enum LintelError {
    /// Malformed selector DSL text
    #[error("Invalid selector '{selector}': {message} (at token {position})")]
    SelectorSyntax {
        selector: String,
        position: usize,
        message: String,
    },

    /// The JSON handed in as an AST is not a tree of `type`-tagged objects
    #[error("Invalid AST: {message}")]
    InvalidAst { message: String },

    /// Configuration validation errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Rule lookup or rule option errors
    #[error("Rule error in '{rule_id}': {message}")]
    RuleError { rule_id: String, message: String },

    /// A lint pass over one file failed
    #[error("Failed to lint '{file}': {source}")]
    LintFailure {
        file: String,
        #[source]
        source: Box<LintelError>,
    },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    Selector,
    Ast,
    Config,
    Rule,
    Lint,
    Internal,
}

impl LintelError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LintelError::SelectorSyntax { .. } => ErrorKind::Selector,
            LintelError::InvalidAst { .. } => ErrorKind::Ast,
            LintelError::ConfigError { .. } => ErrorKind::Config,
            LintelError::RuleError { .. } => ErrorKind::Rule,
            LintelError::LintFailure { .. } => ErrorKind::Lint,
            LintelError::InternalError { .. } => ErrorKind::Internal,
        }
    }

    /// Check if this error is recoverable (can continue processing other files)
    ///
    /// A failed file is recoverable unless the failure was internal.
    pub fn is_recoverable(&self) -> bool {
        match self {
            LintelError::LintFailure { source, .. } => source.kind() != ErrorKind::Internal,
            other => other.kind() == ErrorKind::Ast,
        }
    }

    /// Create a selector syntax error
    pub fn selector_error(
        selector: impl Into<String>,
        position: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::SelectorSyntax {
            selector: selector.into(),
            position,
            message: message.into(),
        }
    }

    /// Create an AST error
    pub fn ast_error(message: impl Into<String>) -> Self {
        Self::InvalidAst {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a rule error
    pub fn rule_error(rule_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RuleError {
            rule_id: rule_id.into(),
            message: message.into(),
        }
    }

    /// Wrap a failure raised while linting `file`
    pub fn lint_failure(file: impl Into<String>, source: LintelError) -> Self {
        Self::LintFailure {
            file: file.into(),
            source: Box::new(source),
        }
    }

    /// Create an internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}
