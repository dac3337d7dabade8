//! Reader, writer and validator configuration.
//!
//! An [`Options`] value is built once (usually at the program edge with
//! [`Options::from_env`]) and passed by reference to the reader, the
//! writer and every `validate` call. Validators never consult the
//! environment themselves.

use serde::{Deserialize, Serialize};

use crate::ebcdic::Translator;

/// Environment variable that enables the FRB compatibility relaxations.
pub const FRB_COMPATIBILITY_MODE: &str = "FRB_COMPATIBILITY_MODE";

/// Default line buffer size (64 KiB).
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Default cap on any declared variable payload length (16 MiB).
pub const DEFAULT_MAX_PAYLOAD_LENGTH: usize = 16 * 1024 * 1024;

/// Format dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Format {
    /// ANSI X9.100-187.
    #[default]
    X9,
    /// DSTU X9.37-2003.
    Dstu,
}

/// Character encoding of record text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Encoding {
    #[default]
    Ascii,
    /// IBM-1047.
    Ebcdic,
}

/// How record boundaries are found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Framing {
    /// Records back-to-back, length known from the record type.
    #[default]
    Fixed,
    /// Each record preceded by a big-endian `u32` byte length.
    VariableLength,
}

/// Codec configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub format: Format,
    pub encoding: Encoding,
    pub framing: Framing,
    /// Relax the enumerated FRB compatibility checks.
    pub frb_compatibility: bool,
    /// Largest record the reader accepts.
    pub buffer_size: usize,
    /// Largest declared image, signature or user-data length.
    pub max_payload_length: usize,
    /// Under fixed framing, terminate each written record with a newline.
    pub line_terminator: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            format: Format::default(),
            encoding: Encoding::default(),
            framing: Framing::default(),
            frb_compatibility: false,
            buffer_size: DEFAULT_BUFFER_SIZE,
            max_payload_length: DEFAULT_MAX_PAYLOAD_LENGTH,
            line_terminator: true,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults plus `FRB_COMPATIBILITY_MODE` from the environment.
    pub fn from_env() -> Self {
        let frb = std::env::var(FRB_COMPATIBILITY_MODE)
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        Self::default().with_frb_compatibility(frb)
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_framing(mut self, framing: Framing) -> Self {
        self.framing = framing;
        self
    }

    pub fn with_frb_compatibility(mut self, enabled: bool) -> Self {
        self.frb_compatibility = enabled;
        self
    }

    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    pub fn with_max_payload_length(mut self, max: usize) -> Self {
        self.max_payload_length = max;
        self
    }

    pub fn with_line_terminator(mut self, enabled: bool) -> Self {
        self.line_terminator = enabled;
        self
    }

    pub fn ebcdic(self) -> Self {
        self.with_encoding(Encoding::Ebcdic)
    }

    pub fn variable_line_length(self) -> Self {
        self.with_framing(Framing::VariableLength)
    }

    pub fn is_dstu(&self) -> bool {
        self.format == Format::Dstu
    }

    pub fn translator(&self) -> Translator {
        Translator::new(self.encoding, self.frb_compatibility)
    }
}

/// Any non-empty value enables the flag unless it spells out "off".
fn parse_flag(value: &str) -> bool {
    let value = value.trim().to_ascii_lowercase();
    !value.is_empty() && !matches!(value.as_str(), "0" | "false" | "no" | "off")
}
