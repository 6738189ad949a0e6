use thiserror::Error;

/// Rejection raised while turning query parameters into criteria
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Unknown filter field: {0}")]
    UnknownField(String),

    #[error("Filter key must have the form <field>.<operation>: {0}")]
    MalformedKey(String),

    #[error("Operation '{operation}' is not supported by {filter}")]
    UnsupportedOperation {
        operation: String,
        filter: &'static str,
    },

    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidOperand {
        key: String,
        value: String,
        reason: String,
    },

    #[error("At most {0} filter parameters are allowed")]
    TooManyFilters(usize),

    #[error("At most {max} values are allowed for {key}")]
    TooManyValues { key: String, max: usize },
}

impl FilterError {
    pub fn invalid(key: &str, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidOperand {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn unsupported(operation: &str, filter: &'static str) -> Self {
        Self::UnsupportedOperation {
            operation: operation.to_string(),
            filter,
        }
    }

    /// Qualify an operand error with the field it was raised for
    pub fn for_field(self, field: &str) -> Self {
        match self {
            Self::InvalidOperand { key, value, reason } => Self::InvalidOperand {
                key: format!("{}.{}", field, key),
                value,
                reason,
            },
            Self::TooManyValues { key, max } => Self::TooManyValues {
                key: format!("{}.{}", field, key),
                max,
            },
            other => other,
        }
    }

    /// Stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownField(_) => "UNKNOWN_FILTER_FIELD",
            Self::MalformedKey(_) => "INVALID_FILTER_KEY",
            Self::UnsupportedOperation { .. } => "UNSUPPORTED_FILTER_OPERATION",
            Self::InvalidOperand { .. } => "INVALID_FILTER_VALUE",
            Self::TooManyFilters(_) => "TOO_MANY_FILTERS",
            Self::TooManyValues { .. } => "TOO_MANY_FILTER_VALUES",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_field_prefixes_operand_key() {
        let err = FilterError::invalid("greaterThan", "x", "invalid digit").for_field("age");
        assert_eq!(
            err.to_string(),
            "Invalid value 'x' for age.greaterThan: invalid digit"
        );
        assert_eq!(err.code(), "INVALID_FILTER_VALUE");
    }

    #[test]
    fn for_field_leaves_other_errors() {
        let err = FilterError::unsupported("contains", "LongFilter").for_field("age");
        assert_eq!(
            err.to_string(),
            "Operation 'contains' is not supported by LongFilter"
        );
    }
}
