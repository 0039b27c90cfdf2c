//! # Query Compilation Errors
//!
//! Every failure here is raised while compiling, before a single entity is
//! evaluated. A filter map never degrades into "no constraint": an unknown key
//! or an unparseable value aborts the whole compilation.
//!
//! Callers translate these into their own reporting convention, typically a
//! 400-class response:
//!
//! ```rust,ignore
//! let query = compiler.compile(&filters, order_by).map_err(|err| {
//!     ApiError::bad_request(err.to_string())
//! })?;
//! ```

/// Errors raised by path resolution, value coercion and input limits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// A filter or sort key names a field that does not exist on the type
    /// being searched at that point of the path.
    #[error("unknown property '{segment}' on {entity}")]
    UnknownProperty {
        /// The first path segment that could not be matched
        segment: String,
        /// The entity (or leaf kind) that was searched
        entity: String,
    },

    /// A textual value cannot be converted to the resolved field's type.
    #[error("cannot convert '{value}' to {target}")]
    TypeConversion {
        /// The offending raw value (wildcards already stripped)
        value: String,
        /// Human-readable target type, e.g. `decimal` or `enum SaleStatus`
        target: String,
    },

    /// The path crosses a collection where that is not supported, or ends on
    /// a relation instead of a value.
    #[error("unsupported path '{path}': {reason}")]
    UnsupportedPath { path: String, reason: String },

    /// An input exceeded one of the configured [`QueryLimits`](crate::QueryLimits).
    #[error("{what} exceeds the limit of {limit}")]
    LimitExceeded { what: &'static str, limit: usize },

    /// A reserved pagination parameter was malformed.
    #[error("invalid value '{value}' for pagination parameter '{parameter}'")]
    InvalidPagination {
        parameter: &'static str,
        value: String,
    },
}

impl QueryError {
    pub fn unknown_property(segment: impl Into<String>, entity: impl Into<String>) -> Self {
        Self::UnknownProperty {
            segment: segment.into(),
            entity: entity.into(),
        }
    }

    pub fn type_conversion(value: impl Into<String>, target: impl Into<String>) -> Self {
        Self::TypeConversion {
            value: value.into(),
            target: target.into(),
        }
    }

    pub fn unsupported_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;
