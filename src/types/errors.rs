use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount error: value is blank")]
    Blank,
    #[error("Amount error: placeholder value '{0}'")]
    Placeholder(String),
    #[error("Amount error: '{0}' is not numeric")]
    NotNumeric(String)
}
