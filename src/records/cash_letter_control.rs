//! Cash Letter Control Record (type 90).

use serde::{Deserialize, Serialize};

use super::{RECORD_LENGTH, RecordCodec, expect_type};
use crate::error::{FieldError, FileError};
use crate::field::{IclDate, Line, LineBuilder};
use crate::options::Options;
use crate::validators::*;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CashLetterControl {
    pub cash_letter_bundle_count: u32,
    pub cash_letter_items_count: u32,
    pub cash_letter_total_amount: u64,
    pub cash_letter_images_count: u32,
    pub ece_institution_name: String,
    pub settlement_date: IclDate,
    /// "1" when the cash letter's credits are counted in the totals.
    pub credit_total_indicator: String,
}

impl CashLetterControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn includes_credits(&self) -> bool {
        self.credit_total_indicator == "1"
    }
}

impl RecordCodec for CashLetterControl {
    const RECORD_TYPE: &'static str = "90";
    const NAME: &'static str = "CashLetterControl";
    const MIN_LENGTH: usize = RECORD_LENGTH;

    fn parse(line: &Line) -> Result<Self, FileError> {
        line.require(Self::NAME, Self::MIN_LENGTH)?;
        expect_type(line, Self::RECORD_TYPE, Self::NAME)?;
        Ok(Self {
            cash_letter_bundle_count: line.num(2, 6) as u32,
            cash_letter_items_count: line.num(8, 8) as u32,
            cash_letter_total_amount: line.num(16, 14),
            cash_letter_images_count: line.num(30, 9) as u32,
            ece_institution_name: line.alpha(39, 18),
            settlement_date: line.date(57),
            credit_total_indicator: line.alpha(65, 1),
        })
    }

    fn write(&self, out: &mut LineBuilder) {
        out.text(Self::RECORD_TYPE)
            .numeric(u64::from(self.cash_letter_bundle_count), 6)
            .numeric(u64::from(self.cash_letter_items_count), 8)
            .numeric(self.cash_letter_total_amount, 14)
            .numeric(u64::from(self.cash_letter_images_count), 9)
            .alpha(&self.ece_institution_name, 18)
            .date(&self.settlement_date)
            .alpha(&self.credit_total_indicator, 1)
            .blank(14);
    }

    fn validate(&self, _opts: &Options) -> Result<(), FieldError> {
        fits("CashLetterBundleCount", u64::from(self.cash_letter_bundle_count), 6)?;
        fits("CashLetterItemsCount", u64::from(self.cash_letter_items_count), 8)?;
        fits("CashLetterTotalAmount", self.cash_letter_total_amount, 14)?;
        fits("CashLetterImagesCount", u64::from(self.cash_letter_images_count), 9)?;
        check(
            "ECEInstitutionName",
            &self.ece_institution_name,
            is_alphanumeric_special(&self.ece_institution_name),
        )?;
        valid_date("SettlementDate", &self.settlement_date)?;
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
    use chrono::NaiveDate;

    #[test]
    fn test_parse_format_round_trip() {
        let control = CashLetterControl {
            cash_letter_bundle_count: 1,
            cash_letter_items_count: 7,
            cash_letter_total_amount: 100000,
            cash_letter_images_count: 1,
            ece_institution_name: "Wells Fargo".to_string(),
            settlement_date: NaiveDate::from_ymd_opt(2018, 10, 30).into(),
            ..Default::default()
        };
        let line = control.format();
        assert_eq!(line.len(), 80);
        assert_eq!(&line[..16], "9000000100000007");
        assert_eq!(&line[57..65], "20181030");
        assert_eq!(CashLetterControl::parse_str(&line).unwrap(), control);
    }

    #[test]
    fn test_validate() {
        let mut control = CashLetterControl::new();
        assert!(control.validate(&Options::default()).is_ok());
        control.credit_total_indicator = "2".to_string();
        let err = control.validate(&Options::default()).unwrap_err();
        assert_eq!(err.field_name, "CreditTotalIndicator");
    }

    #[test]
    fn test_settlement_date_column_round_trips() {
        let line = CashLetterControl::new().format();
        for column in ["        ", "00000000", "20181030"] {
            let wire = format!("{}{column}{}", &line[..57], &line[65..]);
            let parsed = CashLetterControl::parse_str(&wire).unwrap();
            assert_eq!(parsed.format(), wire);
        }
        let zeroed = format!("{}00000000{}", &line[..57], &line[65..]);
        let err = CashLetterControl::parse_str(&zeroed)
            .unwrap()
            .validate(&Options::default())
            .unwrap_err();
        assert_eq!(err.field_name, "SettlementDate");
    }
}
