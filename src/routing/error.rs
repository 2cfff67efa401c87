//! Registration errors.
//!
//! Both kinds are caller configuration errors: they surface synchronously
//! from `register` and are never recovered by the router itself. A request
//! that resolves to nothing is not an error, it is a `None` from `search`.

use thiserror::Error;

/// Why a pattern was rejected as syntactically invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("a capture segment needs a name after its sigil")]
    MissingCaptureName,

    #[error("at most one wildcard segment is allowed per pattern")]
    MultipleWildcards,

    #[error("the wildcard segment must be the last segment of the pattern")]
    WildcardNotFinal,

    #[error("a wildcard cannot share its position with literal segments or an endpoint")]
    WildcardConflict,

    #[error("a different parameter name is already registered at this position")]
    ParamNameConflict,
}

/// Error returned when a route cannot be registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The pattern breaks the wildcard or disambiguation rules.
    #[error("invalid route syntax in `{pattern}`: {reason}")]
    InvalidSyntax {
        pattern: String,
        #[source]
        reason: SyntaxError,
    },

    /// The pattern already owns a handler for this method.
    #[error("route `{method} {pattern}` is already registered")]
    DuplicateRoute { method: String, pattern: String },
}

impl RouteError {
    pub fn is_syntax(&self) -> bool {
        matches!(self, RouteError::InvalidSyntax { .. })
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, RouteError::DuplicateRoute { .. })
    }
}
