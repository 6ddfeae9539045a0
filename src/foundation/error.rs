pub type TransformResult<T> = Result<T, TransformError>;

#[derive(thiserror::Error, Debug)]
pub enum TransformError {
    #[error("range error: option '{option}' value {value} is outside [{min}, {max}]")]
    OutOfRange {
        option: String,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("invalid name '{0}': expected a snake_case wire token")]
    InvalidOptionName(String),

    #[error("unknown option '{option}' for operation '{kind}'")]
    UnknownOption { kind: String, option: String },

    #[error("unknown operation kind '{0}'")]
    UnknownKind(String),

    #[error("type error: option '{option}' expects {expected}")]
    TypeMismatch {
        option: String,
        expected: &'static str,
    },

    #[error("invalid value for option '{option}': {reason}")]
    InvalidValue { option: String, reason: String },

    #[error("pipeline document step {step}: {source}")]
    Document {
        step: usize,
        #[source]
        source: Box<TransformError>,
    },

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TransformError {
    pub fn out_of_range(option: impl Into<String>, value: i64, min: i64, max: i64) -> Self {
        Self::OutOfRange {
            option: option.into(),
            value,
            min,
            max,
        }
    }

    pub fn unknown_option(kind: impl Into<String>, option: impl Into<String>) -> Self {
        Self::UnknownOption {
            kind: kind.into(),
            option: option.into(),
        }
    }

    pub fn type_mismatch(option: impl Into<String>, expected: &'static str) -> Self {
        Self::TypeMismatch {
            option: option.into(),
            expected,
        }
    }

    pub fn invalid_value(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            option: option.into(),
            reason: reason.into(),
        }
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    pub(crate) fn in_step(self, step: usize) -> Self {
        Self::Document {
            step,
            source: Box::new(self),
        }
    }

    /// The bound an [`TransformError::OutOfRange`] value crossed: `max` when the value is above
    /// the range, `min` when below. `None` for every other variant.
    pub fn violated_bound(&self) -> Option<i64> {
        match self {
            Self::OutOfRange {
                value, min, max, ..
            } => Some(if value > max { *max } else { *min }),
            Self::Document { source, .. } => source.violated_bound(),
            _ => None,
        }
    }

    /// Name of the option the error refers to, when there is one.
    pub fn option(&self) -> Option<&str> {
        match self {
            Self::OutOfRange { option, .. }
            | Self::UnknownOption { option, .. }
            | Self::TypeMismatch { option, .. }
            | Self::InvalidValue { option, .. } => Some(option.as_str()),
            Self::Document { source, .. } => source.option(),
            _ => None,
        }
    }
}
