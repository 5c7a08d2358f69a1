use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LabelError {
    #[error("label '{0}' is not fully qualified (expected '//package:name')")]
    NotQualified(String),

    #[error("label '{0}' contains more than one ':' separator")]
    AmbiguousSeparator(String),
}

pub type Result<T> = std::result::Result<T, LabelError>;
