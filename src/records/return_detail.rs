//! Return Record (type 31) and the records it owns.

use serde::{Deserialize, Serialize};

use super::{
    ImageViewAnalysis, ImageViewData, ImageViewDetail, RECORD_LENGTH, RecordCodec,
    ReturnDetailAddendumA, ReturnDetailAddendumB, ReturnDetailAddendumC, ReturnDetailAddendumD,
    UserRecord, expect_type,
};
use crate::error::{FieldError, FileError};
use crate::field::{IclDate, Line, LineBuilder};
use crate::options::Options;
use crate::validators::*;

pub const RETURN_ADDENDUM_A_CAP: usize = 9;
pub const RETURN_ADDENDUM_B_CAP: usize = 1;
pub const RETURN_ADDENDUM_C_CAP: usize = 1;
pub const RETURN_ADDENDUM_D_CAP: usize = 99;

/// A returned item.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReturnDetail {
    pub payor_bank_routing_number: String,
    pub payor_bank_check_digit: String,
    pub on_us: String,
    pub item_amount: u64,
    pub return_reason: String,
    pub addendum_count: u32,
    pub documentation_type_indicator: String,
    pub forward_bundle_date: IclDate,
    pub ece_institution_item_sequence_number: String,
    pub external_processing_code: String,
    pub return_notification_indicator: String,
    pub archive_type_indicator: String,
    pub times_returned: String,

    pub return_detail_addendum_a: Vec<ReturnDetailAddendumA>,
    pub return_detail_addendum_b: Vec<ReturnDetailAddendumB>,
    pub return_detail_addendum_c: Vec<ReturnDetailAddendumC>,
    pub return_detail_addendum_d: Vec<ReturnDetailAddendumD>,
    pub image_view_detail: Vec<ImageViewDetail>,
    pub image_view_data: Vec<ImageViewData>,
    pub image_view_analysis: Vec<ImageViewAnalysis>,
    pub user_records: Vec<UserRecord>,
}

impl ReturnDetail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn addenda_present(&self) -> u32 {
        (self.return_detail_addendum_a.len()
            + self.return_detail_addendum_b.len()
            + self.return_detail_addendum_c.len()
            + self.return_detail_addendum_d.len()) as u32
    }

    pub fn recount_addenda(&mut self) {
        self.addendum_count = self.addenda_present();
    }

    fn field_inclusion(&self) -> Result<(), FieldError> {
        mandatory_routing("PayorBankRoutingNumber", &self.payor_bank_routing_number, false)?;
        mandatory("PayorBankCheckDigit", &self.payor_bank_check_digit)?;
        mandatory("ReturnReason", &self.return_reason)?;
        mandatory(
            "EceInstitutionItemSequenceNumber",
            &self.ece_institution_item_sequence_number,
        )?;
        Ok(())
    }
}

impl RecordCodec for ReturnDetail {
    const RECORD_TYPE: &'static str = "31";
    const NAME: &'static str = "ReturnDetail";
    const MIN_LENGTH: usize = RECORD_LENGTH;

    fn parse(line: &Line) -> Result<Self, FileError> {
        line.require(Self::NAME, Self::MIN_LENGTH)?;
        expect_type(line, Self::RECORD_TYPE, Self::NAME)?;
        Ok(Self {
            payor_bank_routing_number: line.string(2, 8),
            payor_bank_check_digit: line.alpha(10, 1),
            on_us: line.nbsm(11, 20),
            item_amount: line.num(31, 10),
            return_reason: line.alpha(41, 1),
            addendum_count: line.num(42, 2) as u32,
            documentation_type_indicator: line.alpha(44, 1),
            forward_bundle_date: line.date(45),
            ece_institution_item_sequence_number: line.alpha(53, 15),
            external_processing_code: line.alpha(68, 1),
            return_notification_indicator: line.alpha(69, 1),
            archive_type_indicator: line.alpha(70, 1),
            times_returned: line.alpha(71, 1),
            ..Default::default()
        })
    }

    fn write(&self, out: &mut LineBuilder) {
        out.text(Self::RECORD_TYPE)
            .string(&self.payor_bank_routing_number, 8)
            .alpha(&self.payor_bank_check_digit, 1)
            .nbsm(&self.on_us, 20)
            .numeric(self.item_amount, 10)
            .alpha(&self.return_reason, 1)
            .numeric(u64::from(self.addendum_count), 2)
            .alpha(&self.documentation_type_indicator, 1)
            .date(&self.forward_bundle_date)
            .alpha(&self.ece_institution_item_sequence_number, 15)
            .alpha(&self.external_processing_code, 1)
            .alpha(&self.return_notification_indicator, 1)
            .alpha(&self.archive_type_indicator, 1)
            .alpha(&self.times_returned, 1)
            .blank(8);
    }

    fn validate(&self, _opts: &Options) -> Result<(), FieldError> {
        self.field_inclusion()?;
        check(
            "PayorBankRoutingNumber",
            &self.payor_bank_routing_number,
            is_numeric(&self.payor_bank_routing_number),
        )?;
        check(
            "PayorBankCheckDigit",
            &self.payor_bank_check_digit,
            is_numeric(&self.payor_bank_check_digit),
        )?;
        check("OnUs", &self.on_us, is_nbsm(&self.on_us))?;
        fits("ItemAmount", self.item_amount, 10)?;
        check("ReturnReason", &self.return_reason, is_alphanumeric(&self.return_reason))?;
        fits("AddendumCount", u64::from(self.addendum_count), 2)?;
        check(
            "DocumentationTypeIndicator",
            &self.documentation_type_indicator,
            is_documentation_type_indicator(&self.documentation_type_indicator),
        )?;
        valid_date("ForwardBundleDate", &self.forward_bundle_date)?;
        check(
            "EceInstitutionItemSequenceNumber",
            &self.ece_institution_item_sequence_number,
            is_alphanumeric_special(&self.ece_institution_item_sequence_number),
        )?;
        check(
            "ExternalProcessingCode",
            &self.external_processing_code,
            is_alphanumeric_special(&self.external_processing_code),
        )?;
        check(
            "ReturnNotificationIndicator",
            &self.return_notification_indicator,
            is_return_notification_indicator(&self.return_notification_indicator),
        )?;
        check(
            "ArchiveTypeIndicator",
            &self.archive_type_indicator,
            is_archive_type_indicator(&self.archive_type_indicator),
        )?;
        check("TimesReturned", &self.times_returned, is_times_returned(&self.times_returned))
    }
}
