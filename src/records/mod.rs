//! Per-record codecs.
//!
//! Every record type implements [`RecordCodec`]: a fixed column layout, a
//! `parse` from a [`Line`], a `write` into a [`LineBuilder`] and a
//! `validate` that reports the first failing field in column order. The
//! two-character type code is a property of the Rust type and is never
//! stored on the record value.

pub mod addenda;
pub mod bundle_control;
pub mod bundle_header;
pub mod cash_letter_control;
pub mod cash_letter_header;
pub mod check_detail;
pub mod credit;
pub mod credit_item;
pub mod file_control;
pub mod file_header;
pub mod image_view;
pub mod return_detail;
pub mod routing_number_summary;
pub mod user;

pub use addenda::{
    CheckDetailAddendumA, CheckDetailAddendumB, CheckDetailAddendumC, ReturnDetailAddendumA,
    ReturnDetailAddendumB, ReturnDetailAddendumC, ReturnDetailAddendumD,
};
pub use bundle_control::BundleControl;
pub use bundle_header::BundleHeader;
pub use cash_letter_control::CashLetterControl;
pub use cash_letter_header::CashLetterHeader;
pub use check_detail::CheckDetail;
pub use credit::Credit;
pub use credit_item::CreditItem;
pub use file_control::FileControl;
pub use file_header::FileHeader;
pub use image_view::{ImageViewAnalysis, ImageViewData, ImageViewDetail};
pub use return_detail::ReturnDetail;
pub use routing_number_summary::RoutingNumberSummary;
pub use user::{UserGeneral, UserPayeeEndorsement, UserRecord};

use crate::ebcdic::Translator;
use crate::error::{FieldError, FileError, MSG_RECORD_TYPE};
use crate::field::{Line, LineBuilder};
use crate::options::Options;

/// Standard record width.
pub const RECORD_LENGTH: usize = 80;

/// Codec for one record type.
pub trait RecordCodec: Sized {
    /// Two-character record type code written in columns 1-2.
    const RECORD_TYPE: &'static str;
    /// Name used in error messages.
    const NAME: &'static str;
    /// Shortest line `parse` accepts.
    const MIN_LENGTH: usize;

    /// Decode one record. Lines shorter than the layout are a [`FileError`].
    fn parse(line: &Line) -> Result<Self, FileError>;

    /// Append the encoded record, type code first.
    fn write(&self, out: &mut LineBuilder);

    /// First failing field in column order, after the inclusion checks.
    fn validate(&self, opts: &Options) -> Result<(), FieldError>;

    /// Parse an ASCII rendering (one `char` per byte).
    fn parse_str(s: &str) -> Result<Self, FileError> {
        let bytes = Translator::ascii().encode(s);
        Self::parse(&Line::ascii(&bytes))
    }

    fn encode(&self, translator: Translator) -> Vec<u8> {
        let mut out = LineBuilder::new(translator);
        self.write(&mut out);
        out.finish()
    }

    /// ASCII rendering of the encoded record.
    fn format(&self) -> String {
        let translator = Translator::ascii();
        translator.decode(&self.encode(translator))
    }
}

/// Object-safe view used when walking a file in emission order.
pub trait AnyRecord {
    fn record_type(&self) -> &'static str;
    fn record_name(&self) -> &'static str;
    fn write_to(&self, out: &mut LineBuilder);
}

impl<T: RecordCodec> AnyRecord for T {
    fn record_type(&self) -> &'static str {
        T::RECORD_TYPE
    }

    fn record_name(&self) -> &'static str {
        T::NAME
    }

    fn write_to(&self, out: &mut LineBuilder) {
        self.write(out)
    }
}

/// Check that a line starts with the expected type code.
pub(crate) fn expect_type(line: &Line, record_type: &str, name: &str) -> Result<(), FileError> {
    let found = line.record_type();
    if found != record_type {
        return Err(FileError::new(
            name,
            format!("{MSG_RECORD_TYPE} {found:?}, expected {record_type:?}"),
        ));
    }
    Ok(())
}

macro_rules! icl_records {
    ($($variant:ident),+ $(,)?) => {
        /// Any single record, as dispatched by the reader.
        #[derive(Debug, Clone, PartialEq)]
        pub enum IclRecord {
            $($variant($variant),)+
            User(UserRecord),
        }

        impl IclRecord {
            /// Dispatch on the record type prefix.
            pub fn parse(line: &Line) -> Result<Self, FileError> {
                let record_type = line.record_type();
                $(
                    if record_type == $variant::RECORD_TYPE {
                        return Ok(IclRecord::$variant($variant::parse(line)?));
                    }
                )+
                if record_type == UserRecord::RECORD_TYPE {
                    return Ok(IclRecord::User(UserRecord::parse(line)?));
                }
                Err(FileError::new(
                    "RecordType",
                    format!("{MSG_RECORD_TYPE} {record_type:?}"),
                ))
            }

            pub fn validate(&self, opts: &Options) -> Result<(), FieldError> {
                match self {
                    $(IclRecord::$variant(r) => r.validate(opts),)+
                    IclRecord::User(r) => r.validate(opts),
                }
            }

            pub fn as_record(&self) -> &dyn AnyRecord {
                match self {
                    $(IclRecord::$variant(r) => r,)+
                    IclRecord::User(r) => r,
                }
            }

            pub fn record_type(&self) -> &'static str {
                self.as_record().record_type()
            }

            pub fn name(&self) -> &'static str {
                self.as_record().record_name()
            }
        }
    };
}

icl_records!(
    FileHeader,
    CashLetterHeader,
    BundleHeader,
    CheckDetail,
    CheckDetailAddendumA,
    CheckDetailAddendumB,
    CheckDetailAddendumC,
    ReturnDetail,
    ReturnDetailAddendumA,
    ReturnDetailAddendumB,
    ReturnDetailAddendumC,
    ReturnDetailAddendumD,
    ImageViewDetail,
    ImageViewData,
    ImageViewAnalysis,
    Credit,
    CreditItem,
    BundleControl,
    RoutingNumberSummary,
    CashLetterControl,
    FileControl,
);

impl IclRecord {
    pub fn parse_str(s: &str) -> Result<Self, FileError> {
        let bytes = Translator::ascii().encode(s);
        Self::parse(&Line::ascii(&bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_by_type_prefix() {
        let control = FileControl {
            cash_letter_count: 1,
            total_record_count: 12,
            ..Default::default()
        };
        let line = control.format();
        let record = IclRecord::parse_str(&line).unwrap();
        assert_eq!(record.record_type(), "99");
        assert_eq!(record.name(), "FileControl");
        assert_eq!(record, IclRecord::FileControl(control));
    }

    #[test]
    fn test_unknown_record_type() {
        let line = format!("{:<80}", "42");
        let err = IclRecord::parse_str(&line).unwrap_err();
        assert!(err.msg.contains("unexpected record type"));
    }

    #[test]
    fn test_wrong_type_for_codec() {
        let line = FileControl::default().format();
        let err = FileHeader::parse_str(&line).unwrap_err();
        assert_eq!(err.field_name, "FileHeader");
    }
}
