use thiserror::Error;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    // Input
    #[error("empty data")]
    EmptyData,
    #[error("data too long")]
    DataTooLong,
    #[error("unsupported encoding mode")]
    UnsupportedMode,
    #[error("invalid character")]
    InvalidChar,
    #[error("invalid version")]
    InvalidVersion,
    #[error("invalid masking pattern")]
    InvalidMaskingPattern,
    #[error("codeword count does not match the version")]
    CodewordCountMismatch,

    // Galois field arithmetic
    #[error("division by zero in galois field")]
    DivideByZero,
    #[error("value is not an element of the galois field")]
    InvalidFieldElement,
}

pub type QRResult<T> = Result<T, QRError>;
