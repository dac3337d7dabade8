//! Check Detail Record (type 25) and the records it owns.

use serde::{Deserialize, Serialize};

use super::{
    CheckDetailAddendumA, CheckDetailAddendumB, CheckDetailAddendumC, ImageViewAnalysis,
    ImageViewData, ImageViewDetail, RECORD_LENGTH, RecordCodec, UserRecord, expect_type,
};
use crate::error::{FieldError, FileError};
use crate::field::{Line, LineBuilder};
use crate::options::Options;
use crate::validators::*;

/// Most addenda of each kind one check may carry.
pub const CHECK_ADDENDUM_A_CAP: usize = 9;
pub const CHECK_ADDENDUM_B_CAP: usize = 1;
pub const CHECK_ADDENDUM_C_CAP: usize = 99;

/// A forward-presentment item.
///
/// The 80-byte record itself holds the MICR line and the item flags. The
/// addenda, image views and item-level user records that follow it in the
/// stream are owned here, in the order the writer emits them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckDetail {
    pub auxiliary_on_us: String,
    pub external_processing_code: String,
    /// First eight digits of the paying bank routing number.
    pub payor_bank_routing_number: String,
    pub payor_bank_check_digit: String,
    pub on_us: String,
    pub item_amount: u64,
    pub ece_institution_item_sequence_number: String,
    pub documentation_type_indicator: String,
    pub return_acceptance_indicator: String,
    pub micr_valid_indicator: String,
    pub bofd_indicator: String,
    pub addendum_count: u32,
    pub correction_indicator: String,
    pub archive_type_indicator: String,

    pub check_detail_addendum_a: Vec<CheckDetailAddendumA>,
    pub check_detail_addendum_b: Vec<CheckDetailAddendumB>,
    pub check_detail_addendum_c: Vec<CheckDetailAddendumC>,
    pub image_view_detail: Vec<ImageViewDetail>,
    pub image_view_data: Vec<ImageViewData>,
    pub image_view_analysis: Vec<ImageViewAnalysis>,
    pub user_records: Vec<UserRecord>,
}

impl CheckDetail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Addenda actually attached to this item.
    pub fn addenda_present(&self) -> u32 {
        (self.check_detail_addendum_a.len()
            + self.check_detail_addendum_b.len()
            + self.check_detail_addendum_c.len()) as u32
    }

    /// Sets `addendum_count` from the attached addenda.
    pub fn recount_addenda(&mut self) {
        self.addendum_count = self.addenda_present();
    }

    /// MICR valid indicator "1": all characters read.
    pub fn is_micr_valid(&self) -> bool {
        self.micr_valid_indicator == "1"
    }

    fn field_inclusion(&self) -> Result<(), FieldError> {
        mandatory_routing("PayorBankRoutingNumber", &self.payor_bank_routing_number, false)?;
        mandatory("PayorBankCheckDigit", &self.payor_bank_check_digit)?;
        mandatory(
            "EceInstitutionItemSequenceNumber",
            &self.ece_institution_item_sequence_number,
        )?;
        mandatory("BOFDIndicator", &self.bofd_indicator)?;
        Ok(())
    }
}

impl RecordCodec for CheckDetail {
    const RECORD_TYPE: &'static str = "25";
    const NAME: &'static str = "CheckDetail";
    const MIN_LENGTH: usize = RECORD_LENGTH;

    fn parse(line: &Line) -> Result<Self, FileError> {
        line.require(Self::NAME, Self::MIN_LENGTH)?;
        expect_type(line, Self::RECORD_TYPE, Self::NAME)?;
        Ok(Self {
            auxiliary_on_us: line.nbsm(2, 15),
            external_processing_code: line.alpha(17, 1),
            payor_bank_routing_number: line.string(18, 8),
            payor_bank_check_digit: line.alpha(26, 1),
            on_us: line.nbsm(27, 20),
            item_amount: line.num(47, 10),
            ece_institution_item_sequence_number: line.alpha(57, 15),
            documentation_type_indicator: line.alpha(72, 1),
            return_acceptance_indicator: line.alpha(73, 1),
            micr_valid_indicator: line.alpha(74, 1),
            bofd_indicator: line.alpha(75, 1),
            addendum_count: line.num(76, 2) as u32,
            correction_indicator: line.alpha(78, 1),
            archive_type_indicator: line.alpha(79, 1),
            ..Default::default()
        })
    }

    fn write(&self, out: &mut LineBuilder) {
        out.text(Self::RECORD_TYPE)
            .nbsm(&self.auxiliary_on_us, 15)
            .alpha(&self.external_processing_code, 1)
            .string(&self.payor_bank_routing_number, 8)
            .alpha(&self.payor_bank_check_digit, 1)
            .nbsm(&self.on_us, 20)
            .numeric(self.item_amount, 10)
            .alpha(&self.ece_institution_item_sequence_number, 15)
            .alpha(&self.documentation_type_indicator, 1)
            .alpha(&self.return_acceptance_indicator, 1)
            .alpha(&self.micr_valid_indicator, 1)
            .alpha(&self.bofd_indicator, 1)
            .numeric(u64::from(self.addendum_count), 2)
            .alpha(&self.correction_indicator, 1)
            .alpha(&self.archive_type_indicator, 1);
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
            "PayorBankCheckDigit",
            &self.payor_bank_check_digit,
            is_numeric(&self.payor_bank_check_digit),
        )?;
        check("OnUs", &self.on_us, is_nbsm(&self.on_us))?;
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
            "ReturnAcceptanceIndicator",
            &self.return_acceptance_indicator,
            is_return_acceptance_indicator(&self.return_acceptance_indicator),
        )?;
        check(
            "MICRValidIndicator",
            &self.micr_valid_indicator,
            is_micr_valid_indicator(&self.micr_valid_indicator),
        )?;
        check("BOFDIndicator", &self.bofd_indicator, is_bofd_indicator(&self.bofd_indicator))?;
        fits("AddendumCount", u64::from(self.addendum_count), 2)?;
        check(
            "CorrectionIndicator",
            &self.correction_indicator,
            is_correction_indicator(&self.correction_indicator),
        )?;
        check(
            "ArchiveTypeIndicator",
            &self.archive_type_indicator,
            is_archive_type_indicator(&self.archive_type_indicator),
        )
    }
}
