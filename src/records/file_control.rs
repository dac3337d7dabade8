//! File Control Record (type 99).

use serde::{Deserialize, Serialize};

use super::{RECORD_LENGTH, RecordCodec, expect_type};
use crate::error::{FieldError, FileError};
use crate::field::{Line, LineBuilder};
use crate::options::Options;
use crate::validators::*;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileControl {
    pub cash_letter_count: u32,
    /// Every record in the file, headers and controls included.
    pub total_record_count: u32,
    pub total_item_count: u32,
    pub file_total_amount: u64,
    pub immediate_origin_contact_name: String,
    pub immediate_origin_contact_phone_number: String,
    pub credit_total_indicator: String,
}

impl FileControl {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordCodec for FileControl {
    const RECORD_TYPE: &'static str = "99";
    const NAME: &'static str = "FileControl";
    const MIN_LENGTH: usize = RECORD_LENGTH;

    fn parse(line: &Line) -> Result<Self, FileError> {
        line.require(Self::NAME, Self::MIN_LENGTH)?;
        expect_type(line, Self::RECORD_TYPE, Self::NAME)?;
        Ok(Self {
            cash_letter_count: line.num(2, 6) as u32,
            total_record_count: line.num(8, 8) as u32,
            total_item_count: line.num(16, 8) as u32,
            file_total_amount: line.num(24, 16),
            immediate_origin_contact_name: line.alpha(40, 14),
            immediate_origin_contact_phone_number: line.alpha(54, 10),
            credit_total_indicator: line.alpha(64, 1),
        })
    }

    fn write(&self, out: &mut LineBuilder) {
        out.text(Self::RECORD_TYPE)
            .numeric(u64::from(self.cash_letter_count), 6)
            .numeric(u64::from(self.total_record_count), 8)
            .numeric(u64::from(self.total_item_count), 8)
            .numeric(self.file_total_amount, 16)
            .alpha(&self.immediate_origin_contact_name, 14)
            .alpha(&self.immediate_origin_contact_phone_number, 10)
            .alpha(&self.credit_total_indicator, 1)
            .blank(15);
    }

    fn validate(&self, _opts: &Options) -> Result<(), FieldError> {
        fits("CashLetterCount", u64::from(self.cash_letter_count), 6)?;
        fits("TotalRecordCount", u64::from(self.total_record_count), 8)?;
        fits("TotalItemCount", u64::from(self.total_item_count), 8)?;
        fits("FileTotalAmount", self.file_total_amount, 16)?;
        check(
            "ImmediateOriginContactName",
            &self.immediate_origin_contact_name,
            is_alphanumeric_special(&self.immediate_origin_contact_name),
        )?;
        check(
            "ImmediateOriginContactPhoneNumber",
            &self.immediate_origin_contact_phone_number,
            is_numeric(&self.immediate_origin_contact_phone_number),
        )?;
        check(
            "CreditTotalIndicator",
            &self.credit_total_indicator,
            is_credit_total_indicator(&self.credit_total_indicator),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format_round_trip() {
        let control = FileControl {
            cash_letter_count: 1,
            total_record_count: 15,
            total_item_count: 1,
            file_total_amount: 100000,
            immediate_origin_contact_name: "Contact Name".to_string(),
            immediate_origin_contact_phone_number: "5558675552".to_string(),
            credit_total_indicator: "0".to_string(),
        };
        let line = control.format();
        assert_eq!(line.len(), 80);
        assert_eq!(&line[..24], "990000010000001500000001");
        assert_eq!(&line[24..40], "0000000000100000");
        assert_eq!(&line[64..65], "0");
        assert_eq!(FileControl::parse_str(&line).unwrap(), control);
    }

    #[test]
    fn test_validate_phone() {
        let control = FileControl {
            immediate_origin_contact_phone_number: "555 867".to_string(),
            ..Default::default()
        };
        let err = control.validate(&Options::default()).unwrap_err();
        assert_eq!(err.field_name, "ImmediateOriginContactPhoneNumber");
    }
}
