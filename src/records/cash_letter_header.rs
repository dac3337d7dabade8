//! Cash Letter Header Record (type 10).

use serde::{Deserialize, Serialize};

use super::{RECORD_LENGTH, RecordCodec, expect_type};
use crate::error::{FieldError, FileError};
use crate::field::{IclDate, IclTime, Line, LineBuilder};
use crate::options::Options;
use crate::validators::*;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CashLetterHeader {
    pub collection_type_indicator: String,
    pub destination_routing_number: String,
    pub ece_institution_routing_number: String,
    pub cash_letter_business_date: IclDate,
    pub cash_letter_creation_date: IclDate,
    pub cash_letter_creation_time: IclTime,
    /// N (no electronic or image records), E, I or F.
    pub record_type_indicator: String,
    pub documentation_type_indicator: String,
    #[serde(rename = "cashLetterID")]
    pub cash_letter_id: String,
    pub originator_contact_name: String,
    pub originator_contact_phone_number: String,
    pub fed_work_type: String,
    pub returns_indicator: String,
    pub user_field: String,
}

impl CashLetterHeader {
    pub fn new() -> Self {
        Self::default()
    }

    fn field_inclusion(&self) -> Result<(), FieldError> {
        mandatory("CollectionTypeIndicator", &self.collection_type_indicator)?;
        mandatory_routing("DestinationRoutingNumber", &self.destination_routing_number, false)?;
        mandatory_routing(
            "ECEInstitutionRoutingNumber",
            &self.ece_institution_routing_number,
            false,
        )?;
        mandatory_date("CashLetterBusinessDate", &self.cash_letter_business_date)?;
        mandatory_date("CashLetterCreationDate", &self.cash_letter_creation_date)?;
        mandatory_time("CashLetterCreationTime", &self.cash_letter_creation_time)?;
        mandatory("RecordTypeIndicator", &self.record_type_indicator)?;
        mandatory("CashLetterID", &self.cash_letter_id)?;
        Ok(())
    }
}

impl RecordCodec for CashLetterHeader {
    const RECORD_TYPE: &'static str = "10";
    const NAME: &'static str = "CashLetterHeader";
    const MIN_LENGTH: usize = RECORD_LENGTH;

    fn parse(line: &Line) -> Result<Self, FileError> {
        line.require(Self::NAME, Self::MIN_LENGTH)?;
        expect_type(line, Self::RECORD_TYPE, Self::NAME)?;
        Ok(Self {
            collection_type_indicator: line.alpha(2, 2),
            destination_routing_number: line.string(4, 9),
            ece_institution_routing_number: line.string(13, 9),
            cash_letter_business_date: line.date(22),
            cash_letter_creation_date: line.date(30),
            cash_letter_creation_time: line.time(38),
            record_type_indicator: line.alpha(42, 1),
            documentation_type_indicator: line.alpha(43, 1),
            cash_letter_id: line.alpha(44, 8),
            originator_contact_name: line.alpha(52, 14),
            originator_contact_phone_number: line.alpha(66, 10),
            fed_work_type: line.alpha(76, 1),
            returns_indicator: line.alpha(77, 1),
            user_field: line.alpha(78, 1),
        })
    }

    fn write(&self, out: &mut LineBuilder) {
        out.text(Self::RECORD_TYPE)
            .alpha(&self.collection_type_indicator, 2)
            .string(&self.destination_routing_number, 9)
            .string(&self.ece_institution_routing_number, 9)
            .date(&self.cash_letter_business_date)
            .date(&self.cash_letter_creation_date)
            .time(&self.cash_letter_creation_time)
            .alpha(&self.record_type_indicator, 1)
            .alpha(&self.documentation_type_indicator, 1)
            .alpha(&self.cash_letter_id, 8)
            .alpha(&self.originator_contact_name, 14)
            .alpha(&self.originator_contact_phone_number, 10)
            .alpha(&self.fed_work_type, 1)
            .alpha(&self.returns_indicator, 1)
            .alpha(&self.user_field, 1)
            .blank(1);
    }

    fn validate(&self, _opts: &Options) -> Result<(), FieldError> {
        self.field_inclusion()?;
        check(
            "CollectionTypeIndicator",
            &self.collection_type_indicator,
            is_collection_type_indicator(&self.collection_type_indicator),
        )?;
        check(
            "DestinationRoutingNumber",
            &self.destination_routing_number,
            is_numeric(&self.destination_routing_number),
        )?;
        check(
            "ECEInstitutionRoutingNumber",
            &self.ece_institution_routing_number,
            is_numeric(&self.ece_institution_routing_number),
        )?;
        check(
            "RecordTypeIndicator",
            &self.record_type_indicator,
            is_record_type_indicator(&self.record_type_indicator),
        )?;
        check(
            "DocumentationTypeIndicator",
            &self.documentation_type_indicator,
            is_documentation_type_indicator(&self.documentation_type_indicator),
        )?;
        check("CashLetterID", &self.cash_letter_id, is_alphanumeric(&self.cash_letter_id))?;
        check(
            "OriginatorContactName",
            &self.originator_contact_name,
            is_alphanumeric_special(&self.originator_contact_name),
        )?;
        check(
            "OriginatorContactPhoneNumber",
            &self.originator_contact_phone_number,
            is_numeric(&self.originator_contact_phone_number),
        )?;
        check("FedWorkType", &self.fed_work_type, is_alphanumeric(&self.fed_work_type))?;
        check(
            "ReturnsIndicator",
            &self.returns_indicator,
            is_returns_indicator(&self.returns_indicator),
        )?;
        check("UserField", &self.user_field, is_alphanumeric_special(&self.user_field))
    }
}
