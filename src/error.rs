//! Error types

use crate::pem::PemError;
use nom::error::{ErrorKind, FromExternalError, ParseError};
use nom::IResult;
use thiserror::Error;

/// Holds the result of parsing functions
///
/// `'a` is the lifetime of the input slice.
pub type BerResult<'a, O> = IResult<&'a [u8], O, BerError>;

/// Error raised while decoding (or inspecting) a BER/DER object
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BerError {
    /// Object does not have the expected type
    #[error("unexpected object type")]
    BerTypeError,

    /// The input ended in the middle of a header or a value
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid tag")]
    InvalidTag,
    #[error("invalid class")]
    InvalidClass,
    #[error("invalid length")]
    InvalidLength,
    /// Long-form length uses more than 6 octets (48-bit ceiling)
    #[error("length over 48 bits not supported")]
    LengthTooBig,
    /// Declared length is larger than the bytes left in the input (strict mode)
    #[error("declared length exceeds the remaining input")]
    LengthExceedsBuffer,
    /// A child value does not fit in the declared length of its container
    #[error("content length mismatch: declared {declared}, available {actual}")]
    LengthMismatch { declared: usize, actual: usize },
    /// Bytes were left after the top-level object
    #[error("{0} trailing bytes after top-level object")]
    TrailingData(usize),
    /// Indefinite length on a primitive value (strict mode)
    #[error("indefinite length on a primitive value")]
    IndefiniteLengthUnexpected,
    /// BIT STRING header octet is missing or malformed
    #[error("malformed BIT STRING encapsulation")]
    InvalidEncapsulation,
    /// BMPString content is not valid UTF-16BE
    #[error("invalid string content")]
    InvalidString,

    #[error("primitive object expected")]
    ConstructUnexpected,

    /// Integer is too large to fit in a native type. Use `as_biguint()`
    #[error("integer too large")]
    IntegerTooLarge,
    #[error("integer is negative")]
    IntegerNegative,

    /// Nesting is deeper than the configured limit
    #[error("maximum nesting depth exceeded")]
    MaxDepth,

    #[error("parser error: {0:?}")]
    NomError(ErrorKind),
}

impl<I> ParseError<I> for BerError {
    fn from_error_kind(_input: I, kind: ErrorKind) -> Self {
        BerError::NomError(kind)
    }
    fn append(_input: I, kind: ErrorKind, _other: Self) -> Self {
        BerError::NomError(kind)
    }
}

impl<I, E> FromExternalError<I, E> for BerError {
    fn from_external_error(_input: I, kind: ErrorKind, _e: E) -> BerError {
        BerError::NomError(kind)
    }
}

impl From<nom::Err<BerError>> for BerError {
    fn from(e: nom::Err<BerError>) -> Self {
        match e {
            nom::Err::Incomplete(_) => BerError::UnexpectedEof,
            nom::Err::Error(e) | nom::Err::Failure(e) => e,
        }
    }
}

/// Error raised when a tree cannot be serialized
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("invalid object: {0}")]
    BerError(#[from] BerError),
    #[error("serialization failed: {0:?}")]
    GenError(cookie_factory::GenError),
}

impl From<cookie_factory::GenError> for SerializeError {
    fn from(e: cookie_factory::GenError) -> Self {
        SerializeError::GenError(e)
    }
}

/// Serialization result
pub type SerializeResult<T> = Result<T, SerializeError>;

/// Error raised when a tree does not match a schema
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One message per violated expectation
    #[error("schema mismatch: {}", .0.join("; "))]
    Mismatch(Vec<String>),
    /// The matched value cannot be captured in the requested form
    #[error("unsupported capture: {0}")]
    Unsupported(String),
}

/// Stage of the PEM to key pipeline that failed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Framing,
    Decode,
    Schema,
    Consistency,
}

/// Error raised while loading or storing an RSA key
#[derive(Debug, PartialEq, Error)]
pub enum KeyError {
    #[error("PEM framing: {0}")]
    Pem(#[from] PemError),
    #[error("DER decoding: {0}")]
    Decode(#[from] BerError),
    #[error("{0}")]
    Schema(#[from] ValidationError),
    #[error("unknown key algorithm {0}")]
    UnknownAlgorithm(String),
    #[error("unsupported RSAPrivateKey version {0}")]
    UnsupportedVersion(u64),
    #[error("unexpected PEM label {0:?}")]
    UnexpectedLabel(String),
    /// An RSA parameter cross-check failed
    #[error("key consistency check failed: {0}")]
    KeyConsistencyFailure(&'static str),
    /// Input to the raw RSA primitive is not below the modulus
    #[error("value out of range for the modulus")]
    OutOfRange,
}

impl From<nom::Err<BerError>> for KeyError {
    fn from(e: nom::Err<BerError>) -> Self {
        KeyError::Decode(e.into())
    }
}

impl KeyError {
    /// Pipeline stage that produced this error
    pub fn stage(&self) -> Stage {
        match self {
            KeyError::Pem(_) | KeyError::UnexpectedLabel(_) => Stage::Framing,
            KeyError::Decode(_) => Stage::Decode,
            KeyError::Schema(_) | KeyError::UnknownAlgorithm(_) | KeyError::UnsupportedVersion(_) => {
                Stage::Schema
            }
            KeyError::KeyConsistencyFailure(_) | KeyError::OutOfRange => Stage::Consistency,
        }
    }

    /// Accumulated schema diagnostics, if the schema stage failed
    pub fn diagnostics(&self) -> &[String] {
        match self {
            KeyError::Schema(ValidationError::Mismatch(v)) => v,
            _ => &[],
        }
    }
}
