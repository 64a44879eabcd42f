#![warn(missing_docs)]
//! Fibertrace specific error structures
use std::{error::Error, fmt::Display};

/// Fibertrace application specific Result type
pub type FtrResult<T> = std::result::Result<T, FibertraceError>;

/// Errors that can be returned by various fibertrace functions.
#[derive(Debug, PartialEq, Eq)]
pub enum FibertraceError {
    /// invalid fiber configuration (e.g. taper angle outside the asin domain, non-positive radius or length)
    Geometry(String),
    /// runtime errors occuring while tracing a single ray (e.g. degenerate boundary intersection)
    Trace(String),
    /// errors not falling in one of the categories above
    Other(String),
}

impl Display for FibertraceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Geometry(m) => {
                write!(f, "Geometry:{m}")
            }
            Self::Trace(m) => {
                write!(f, "Trace:{m}")
            }
            Self::Other(m) => write!(f, "Fibertrace Error:Other:{m}"),
        }
    }
}
impl Error for FibertraceError {}

impl std::convert::From<String> for FibertraceError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}
#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn from() {
        let error = FibertraceError::from("test".to_string());
        assert_eq!(error, FibertraceError::Other("test".to_string()));
    }
    #[test]
    fn display() {
        assert_eq!(
            format!("{}", FibertraceError::Geometry("test".to_string())),
            "Geometry:test"
        );
        assert_eq!(
            format!("{}", FibertraceError::Trace("test".to_string())),
            "Trace:test"
        );
        assert_eq!(
            format!("{}", FibertraceError::Other("test".to_string())),
            "Fibertrace Error:Other:test"
        );
    }
    #[test]
    fn debug() {
        assert_eq!(
            format!("{:?}", FibertraceError::Geometry("test".to_string())),
            "Geometry(\"test\")"
        );
    }
}
