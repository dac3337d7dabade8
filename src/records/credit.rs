//! Credit Record (type 61).

use serde::{Deserialize, Serialize};

use super::{RECORD_LENGTH, RecordCodec, expect_type};
use crate::error::{FieldError, FileError};
use crate::field::{Line, LineBuilder};
use crate::options::Options;
use crate::validators::*;

/// A deposit credit carried at cash letter level.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Credit {
    pub auxiliary_on_us: String,
    pub external_processing_code: String,
    pub payor_bank_routing_number: String,
    pub credit_account_number_on_us: String,
    pub item_amount: u64,
    pub ece_institution_item_sequence_number: String,
    pub documentation_type_indicator: String,
    pub account_type_code: String,
    pub source_work_code: String,
    pub work_type: String,
    pub debit_credit_indicator: String,
}

impl Credit {
    pub fn new() -> Self {
        Self::default()
    }

    fn field_inclusion(&self) -> Result<(), FieldError> {
        mandatory_routing("PayorBankRoutingNumber", &self.payor_bank_routing_number, false)?;
        mandatory("CreditAccountNumberOnUs", &self.credit_account_number_on_us)?;
        mandatory(
            "EceInstitutionItemSequenceNumber",
            &self.ece_institution_item_sequence_number,
        )?;
        Ok(())
    }
}

impl RecordCodec for Credit {
    const RECORD_TYPE: &'static str = "61";
    const NAME: &'static str = "Credit";
    const MIN_LENGTH: usize = RECORD_LENGTH;

    fn parse(line: &Line) -> Result<Self, FileError> {
        line.require(Self::NAME, Self::MIN_LENGTH)?;
        expect_type(line, Self::RECORD_TYPE, Self::NAME)?;
        Ok(Self {
            auxiliary_on_us: line.nbsm(2, 15),
            external_processing_code: line.alpha(17, 1),
            payor_bank_routing_number: line.string(18, 9),
            credit_account_number_on_us: line.nbsm(27, 20),
            item_amount: line.num(47, 10),
            ece_institution_item_sequence_number: line.alpha(57, 15),
            documentation_type_indicator: line.alpha(72, 1),
            account_type_code: line.alpha(73, 1),
            source_work_code: line.alpha(74, 2),
            work_type: line.alpha(76, 1),
            debit_credit_indicator: line.alpha(77, 1),
        })
    }

    fn write(&self, out: &mut LineBuilder) {
        out.text(Self::RECORD_TYPE)
            .nbsm(&self.auxiliary_on_us, 15)
            .alpha(&self.external_processing_code, 1)
            .string(&self.payor_bank_routing_number, 9)
            .nbsm(&self.credit_account_number_on_us, 20)
            .numeric(self.item_amount, 10)
            .alpha(&self.ece_institution_item_sequence_number, 15)
            .alpha(&self.documentation_type_indicator, 1)
            .alpha(&self.account_type_code, 1)
            .alpha(&self.source_work_code, 2)
            .alpha(&self.work_type, 1)
            .alpha(&self.debit_credit_indicator, 1)
            .blank(2);
    }

    fn validate(&self, _opts: &Options) -> Result<(), FieldError> {
        self.field_inclusion()?;
        check("AuxiliaryOnUs", &self.auxiliary_on_us, is_nbsm(&self.auxiliary_on_us))?;
        check(
            "ExternalProcessingCode",
            &self.external_processing_code,
            is_alphanumeric_special(&self.external_processing_code),
        )?;
        check(
            "PayorBankRoutingNumber",
            &self.payor_bank_routing_number,
            is_numeric(&self.payor_bank_routing_number),
        )?;
        check(
            "CreditAccountNumberOnUs",
            &self.credit_account_number_on_us,
            is_nbsm(&self.credit_account_number_on_us),
        )?;
        fits("ItemAmount", self.item_amount, 10)?;
        check(
            "EceInstitutionItemSequenceNumber",
            &self.ece_institution_item_sequence_number,
            is_alphanumeric_special(&self.ece_institution_item_sequence_number),
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
        check("WorkType", &self.work_type, is_alphanumeric(&self.work_type))?;
        check(
            "DebitCreditIndicator",
            &self.debit_credit_indicator,
            is_alphanumeric(&self.debit_credit_indicator),
        )
    }
}
