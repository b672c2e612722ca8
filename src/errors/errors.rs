use std::fmt::Display;

use thiserror::Error;

#[derive(Debug)]
pub struct Error {
    internal_error: ErrorImpl,
}

impl Error {
    pub fn new(error_impl: ErrorImpl) -> Self {
        Error {
            internal_error: error_impl,
        }
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::InvalidPattern { .. } => "InvalidPattern",
            ErrorImpl::GroupMismatch { .. } => "GroupMismatch",
            ErrorImpl::Io(_) => "IoError",
            ErrorImpl::Json(_) => "JsonError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::InvalidPattern { rule, .. } => ErrorTip::Suggestion(format!(
                "The pattern of rule `{}` is not a valid regular expression",
                rule
            )),
            ErrorImpl::GroupMismatch { rule, groups, kinds } => ErrorTip::Suggestion(format!(
                "Rule `{}` captures {} groups but classifies {}",
                rule, groups, kinds
            )),
            ErrorImpl::Io(_) => ErrorTip::None,
            ErrorImpl::Json(_) => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.internal_error)
    }
}

impl From<ErrorImpl> for Error {
    fn from(error_impl: ErrorImpl) -> Self {
        Error::new(error_impl)
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::new(ErrorImpl::Io(error))
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::new(ErrorImpl::Json(error))
    }
}

#[derive(Debug)]
pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug)]
pub enum ErrorImpl {
    #[error("invalid pattern for rule {rule:?}")]
    InvalidPattern {
        rule: &'static str,
        #[source]
        source: regex::Error,
    },
    #[error("rule {rule:?} captures {groups} groups but classifies {kinds}")]
    GroupMismatch {
        rule: &'static str,
        groups: usize,
        kinds: usize,
    },
    #[error("io error: {0}")]
    Io(#[source] std::io::Error),
    #[error("json error: {0}")]
    Json(#[source] serde_json::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("renderer failed: {message}")]
    Engine { message: String },
    #[error("gave up after {attempts} attempts: {last}")]
    Exhausted { attempts: usize, last: String },
    #[error("render of this source was abandoned before it finished")]
    Abandoned,
}

impl RenderError {
    pub fn engine(message: impl Into<String>) -> Self {
        RenderError::Engine {
            message: message.into(),
        }
    }
}
