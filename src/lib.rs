//! # icl-rs
//!
//! Reader, writer and validator for X9.100-187 Image Cash Letter files
//! and their DSTU X9.37 predecessor.
//!
//! ## Overview
//!
//! An ICL file is a sequence of typed records. Every record starts with a
//! two-character type code; most are 80 bytes, while image data (52),
//! credit items (62) and user records (68) carry a declared length.
//! Records nest into a tree:
//!
//! - **File**: header (01), cash letters, control (99)
//! - **Cash letter**: header (10), credits, bundles, routing summaries,
//!   control (90)
//! - **Bundle**: header (20), checks (25) or returns (31), control (70)
//! - **Item**: addenda, image views (50/52/54) and user records (68)
//!
//! Text can be ASCII or EBCDIC, and records can be written back-to-back or
//! behind a four-byte length prefix.
//!
//! ## Example
//!
//! ```
//! use chrono::{NaiveDate, NaiveTime};
//! use icl_rs::{Bundle, CashLetter, File, Options, Reader, Writer};
//! use icl_rs::field::{IclDate, IclTime};
//! use icl_rs::records::{BundleHeader, CashLetterHeader, CheckDetail, FileHeader, RecordCodec};
//!
//! let date = || IclDate::from(NaiveDate::from_ymd_opt(2018, 10, 30));
//! let time = || IclTime::from(NaiveTime::from_hms_opt(15, 23, 0));
//! let header = FileHeader {
//!     standard_level: "35".into(),
//!     test_file_indicator: "T".into(),
//!     immediate_destination: "231380104".into(),
//!     immediate_origin: "121042882".into(),
//!     file_creation_date: date(),
//!     file_creation_time: time(),
//!     resend_indicator: "N".into(),
//!     ..Default::default()
//! };
//! let cash_letter_header = CashLetterHeader {
//!     collection_type_indicator: "01".into(),
//!     destination_routing_number: "231380104".into(),
//!     ece_institution_routing_number: "121042882".into(),
//!     cash_letter_business_date: date(),
//!     cash_letter_creation_date: date(),
//!     cash_letter_creation_time: time(),
//!     record_type_indicator: "I".into(),
//!     documentation_type_indicator: "G".into(),
//!     cash_letter_id: "A1".into(),
//!     ..Default::default()
//! };
//! let bundle_header = BundleHeader {
//!     collection_type_indicator: "01".into(),
//!     destination_routing_number: "231380104".into(),
//!     ece_institution_routing_number: "121042882".into(),
//!     bundle_business_date: date(),
//!     bundle_creation_date: date(),
//!     bundle_sequence_number: "1".into(),
//!     ..Default::default()
//! };
//! let check = CheckDetail::parse_str(
//!     "25      123456789 031300012             555888100001000001              GD1Y000B",
//! )?;
//!
//! let mut bundle = Bundle::new(bundle_header);
//! bundle.add_check_detail(check);
//! let mut cash_letter = CashLetter::new(cash_letter_header);
//! cash_letter.add_bundle(bundle);
//! let mut file = File::new(header);
//! file.add_cash_letter(cash_letter);
//!
//! let opts = Options::default();
//! file.create(&opts)?;
//! assert_eq!(file.file_control.total_record_count, 7);
//!
//! let mut writer = Writer::new(Vec::new(), opts.clone());
//! writer.write(&file)?;
//! let bytes = writer.into_inner();
//!
//! let read = Reader::new(bytes.as_slice(), opts).read()?;
//! assert_eq!(read, file);
//! # Ok::<(), icl_rs::IclError>(())
//! ```

pub mod bundle;
pub mod cash_letter;
pub mod ebcdic;
pub mod error;
pub mod field;
pub mod file;
pub mod framing;
pub mod json;
pub mod options;
pub mod reader;
pub mod records;
pub mod validators;
pub mod writer;

pub use bundle::{Bundle, BundleTotals};
pub use cash_letter::{CashLetter, CashLetterTotals};
pub use ebcdic::Translator;
pub use error::{BundleError, FieldError, FileError, IclError, Result};
pub use file::{File, FileTotals};
pub use framing::{RecordReader, RecordWriter};
pub use json::{from_json, to_json};
pub use options::{Encoding, Format, Framing, Options};
pub use reader::{Reader, read};
pub use records::{IclRecord, RecordCodec};
pub use writer::{Writer, write};
