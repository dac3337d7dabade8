//! Error types for the ICL codec.
//!
//! Three kinds of failure are distinguished so callers can react to each:
//!
//! - [`FieldError`]: one field of one record failed a character-class,
//!   value-set or inclusion check.
//! - [`BundleError`]: a cross-record rule inside a bundle failed (addendum
//!   caps, addendum counts, control totals).
//! - [`FileError`]: the record stream is structurally wrong (unexpected
//!   record type for the current state, short records, framing problems)
//!   or a cash letter / file control total does not match.

use thiserror::Error;

// Field messages.
pub const MSG_FIELD_INCLUSION: &str = "is a mandatory field and has a default value";
pub const MSG_NUMERIC: &str = "has non-numeric characters";
pub const MSG_ALPHANUMERIC: &str = "has non alphanumeric characters";
pub const MSG_ALPHANUMERIC_SPECIAL: &str = "has characters that are not alphanumeric or special";
pub const MSG_NBSM: &str = "has characters that are not valid MICR characters";
pub const MSG_INVALID: &str = "is not a valid value";
pub const MSG_ZERO_ROUTING: &str = "must not be all zeros";
pub const MSG_TOO_LARGE: &str = "exceeds the field width";
pub const MSG_RESERVED_FORMAT: &str = "format type 001 is reserved for the payee endorsement record";

// Bundle messages.
pub const MSG_BUNDLE_MIXED: &str = "bundle contains both checks and returns";
pub const MSG_ADDENDUM_CAP: &str = "exceeds the maximum number of addenda";
pub const MSG_ADDENDUM_COUNT: &str = "does not match the number of addenda present";
pub const MSG_CONTROL_MISMATCH: &str = "does not match the computed value";

// File / structure messages.
pub const MSG_FILE_HEADER: &str = "none or more than one file header exists";
pub const MSG_FILE_CONTROL: &str = "none or more than one file control exists";
pub const MSG_FILE_CASH_LETTER_INSIDE: &str = "inside of current cash letter";
pub const MSG_FILE_CASH_LETTER_OUTSIDE: &str = "outside of a cash letter";
pub const MSG_FILE_BUNDLE_INSIDE: &str = "inside of current bundle";
pub const MSG_FILE_BUNDLE_OUTSIDE: &str = "outside of current bundle";
pub const MSG_FILE_ITEM_OUTSIDE: &str = "outside of a check or return item";
pub const MSG_FILE_ORDER: &str = "out of order within its container";
pub const MSG_RECORD_TYPE: &str = "unexpected record type";
pub const MSG_RECORD_LENGTH: &str = "record is shorter than its required length";
pub const MSG_NOT_CANONICAL: &str = "does not encode back to the bytes read";
pub const MSG_LINE_TOO_LONG: &str = "line too long";
pub const MSG_UNEXPECTED_EOF: &str = "unexpected end of file inside a record";
pub const MSG_PAYLOAD_TOO_LARGE: &str = "declared payload length exceeds the configured maximum";
pub const MSG_RECORD_TYPE_INDICATOR_N: &str = "cash letter with record type indicator N must not contain bundles";
pub const MSG_ROUTING_SUMMARY_RETURNS: &str = "routing number summary is not allowed for return collection types";

/// A single field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field_name} {value:?} {msg}")]
pub struct FieldError {
    pub field_name: String,
    pub value: String,
    pub msg: String,
}

impl FieldError {
    pub fn new(field_name: &str, value: impl Into<String>, msg: &str) -> Self {
        Self {
            field_name: field_name.to_string(),
            value: value.into(),
            msg: msg.to_string(),
        }
    }
}

/// A cross-record rule inside one bundle failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("bundle {bundle_sequence_number:?}: {field_name} {msg}")]
pub struct BundleError {
    pub bundle_sequence_number: String,
    pub field_name: String,
    pub msg: String,
}

impl BundleError {
    pub fn new(bundle_sequence_number: &str, field_name: &str, msg: impl Into<String>) -> Self {
        Self {
            bundle_sequence_number: bundle_sequence_number.to_string(),
            field_name: field_name.to_string(),
            msg: msg.into(),
        }
    }
}

/// The record stream or a file-level total is wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field_name}: {msg}")]
pub struct FileError {
    pub field_name: String,
    pub msg: String,
}

impl FileError {
    pub fn new(field_name: &str, msg: impl Into<String>) -> Self {
        Self {
            field_name: field_name.to_string(),
            msg: msg.into(),
        }
    }
}

/// Crate-wide error.
#[derive(Debug, Error)]
pub enum IclError {
    #[error("field error: {0}")]
    Field(#[from] FieldError),

    #[error("bundle error: {0}")]
    Bundle(#[from] BundleError),

    #[error("file error: {0}")]
    File(#[from] FileError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IclError {
    pub fn as_field(&self) -> Option<&FieldError> {
        match self {
            IclError::Field(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_bundle(&self) -> Option<&BundleError> {
        match self {
            IclError::Bundle(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileError> {
        match self {
            IclError::File(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, IclError>;
