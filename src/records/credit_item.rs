//! Credit Item Record (type 62), the one 100-byte fixed record.

use serde::{Deserialize, Serialize};

use super::{RecordCodec, expect_type};
use crate::error::{FieldError, FileError};
use crate::field::{Line, LineBuilder};
use crate::options::Options;
use crate::validators::*;

pub const CREDIT_ITEM_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreditItem {
    pub auxiliary_on_us: String,
    pub external_processing_code: String,
    pub posting_bank_routing_number: String,
    pub on_us: String,
    pub item_amount: u64,
    pub credit_item_sequence_number: String,
    pub documentation_type_indicator: String,
    pub account_type_code: String,
    pub source_work_code: String,
    pub user_field: String,
}

impl CreditItem {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordCodec for CreditItem {
    const RECORD_TYPE: &'static str = "62";
    const NAME: &'static str = "CreditItem";
    const MIN_LENGTH: usize = CREDIT_ITEM_LENGTH;

    fn parse(line: &Line) -> Result<Self, FileError> {
        line.require(Self::NAME, Self::MIN_LENGTH)?;
        expect_type(line, Self::RECORD_TYPE, Self::NAME)?;
        Ok(Self {
            auxiliary_on_us: line.nbsm(2, 15),
            external_processing_code: line.alpha(17, 1),
            posting_bank_routing_number: line.string(18, 9),
            on_us: line.nbsm(27, 20),
            item_amount: line.num(47, 14),
            credit_item_sequence_number: line.alpha(61, 15),
            documentation_type_indicator: line.alpha(76, 1),
            account_type_code: line.alpha(77, 1),
            source_work_code: line.alpha(78, 2),
            user_field: line.alpha(80, 16),
        })
    }

    fn write(&self, out: &mut LineBuilder) {
        out.text(Self::RECORD_TYPE)
            .nbsm(&self.auxiliary_on_us, 15)
            .alpha(&self.external_processing_code, 1)
            .string(&self.posting_bank_routing_number, 9)
            .nbsm(&self.on_us, 20)
            .numeric(self.item_amount, 14)
            .alpha(&self.credit_item_sequence_number, 15)
            .alpha(&self.documentation_type_indicator, 1)
            .alpha(&self.account_type_code, 1)
            .alpha(&self.source_work_code, 2)
            .alpha(&self.user_field, 16)
            .blank(4);
    }

    fn validate(&self, _opts: &Options) -> Result<(), FieldError> {
        mandatory_routing(
            "PostingBankRoutingNumber",
            &self.posting_bank_routing_number,
            false,
        )?;
        mandatory("CreditItemSequenceNumber", &self.credit_item_sequence_number)?;

        check("AuxiliaryOnUs", &self.auxiliary_on_us, is_nbsm(&self.auxiliary_on_us))?;
        check(
            "ExternalProcessingCode",
            &self.external_processing_code,
            is_alphanumeric_special(&self.external_processing_code),
        )?;
        check(
            "PostingBankRoutingNumber",
            &self.posting_bank_routing_number,
            is_numeric(&self.posting_bank_routing_number),
        )?;
        check("OnUs", &self.on_us, is_nbsm(&self.on_us))?;
        fits("ItemAmount", self.item_amount, 14)?;
        check(
            "CreditItemSequenceNumber",
            &self.credit_item_sequence_number,
            is_alphanumeric_special(&self.credit_item_sequence_number),
        )?;
        check(
            "DocumentationTypeIndicator",
            &self.documentation_type_indicator,
            is_documentation_type_indicator(&self.documentation_type_indicator),
        )?;
        check(
            "AccountTypeCode",
            &self.account_type_code,
            is_account_type_code(&self.account_type_code),
        )?;
        check(
            "SourceWorkCode",
            &self.source_work_code,
            is_source_work_code(&self.source_work_code),
        )?;
        check("UserField", &self.user_field, is_alphanumeric_special(&self.user_field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hundred_byte_round_trip() {
        let item = CreditItem {
            posting_bank_routing_number: "031300012".to_string(),
            on_us: "5558881".to_string(),
            item_amount: 12_345_678_901_234,
            credit_item_sequence_number: "7".to_string(),
            user_field: "CREDIT".to_string(),
            ..Default::default()
        };
        let line = item.format();
        assert_eq!(line.len(), 100);
        assert_eq!(&line[47..61], "12345678901234");
        assert_eq!(&line[80..96], "CREDIT          ");
        let parsed = CreditItem::parse_str(&line).unwrap();
        assert_eq!(parsed, item);
        assert!(parsed.validate(&Options::default()).is_ok());
    }

    #[test]
    fn test_eighty_bytes_is_short() {
        let line = format!("62{:78}", "");
        let err = CreditItem::parse_str(&line).unwrap_err();
        assert_eq!(err.field_name, "CreditItem");
    }
}
