//! Bundle Header Record (type 20).

use serde::{Deserialize, Serialize};

use super::{RECORD_LENGTH, RecordCodec, expect_type};
use crate::error::{FieldError, FileError, MSG_ZERO_ROUTING};
use crate::field::{IclDate, Line, LineBuilder, parse_string_field};
use crate::options::Options;
use crate::validators::*;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BundleHeader {
    pub collection_type_indicator: String,
    pub destination_routing_number: String,
    pub ece_institution_routing_number: String,
    pub bundle_business_date: IclDate,
    pub bundle_creation_date: IclDate,
    #[serde(rename = "bundleID")]
    pub bundle_id: String,
    /// Written zero-padded to four digits; leading zeros are dropped on parse
    /// when the column is all digits.
    pub bundle_sequence_number: String,
    pub cycle_number: String,
    pub return_location_routing_number: String,
    pub user_field: String,
}

/// Leading zeros dropped, keeping at least one digit. Anything but digits is
/// kept verbatim for the validator to reject.
fn parse_sequence(raw: &str) -> String {
    let raw = parse_string_field(raw);
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw;
    }
    match raw.trim_start_matches('0') {
        "" => "0".to_string(),
        rest => rest.to_string(),
    }
}

impl BundleHeader {
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
        mandatory_date("BundleBusinessDate", &self.bundle_business_date)?;
        mandatory_date("BundleCreationDate", &self.bundle_creation_date)?;
        mandatory("BundleSequenceNumber", &self.bundle_sequence_number)?;
        Ok(())
    }
}

impl RecordCodec for BundleHeader {
    const RECORD_TYPE: &'static str = "20";
    const NAME: &'static str = "BundleHeader";
    const MIN_LENGTH: usize = RECORD_LENGTH;

    fn parse(line: &Line) -> Result<Self, FileError> {
        line.require(Self::NAME, Self::MIN_LENGTH)?;
        expect_type(line, Self::RECORD_TYPE, Self::NAME)?;
        Ok(Self {
            collection_type_indicator: line.alpha(2, 2),
            destination_routing_number: line.string(4, 9),
            ece_institution_routing_number: line.string(13, 9),
            bundle_business_date: line.date(22),
            bundle_creation_date: line.date(30),
            bundle_id: line.alpha(38, 10),
            bundle_sequence_number: parse_sequence(&line.text(48, 4)),
            cycle_number: line.alpha(52, 2),
            return_location_routing_number: line.string(54, 9),
            user_field: line.alpha(63, 5),
        })
    }

    fn write(&self, out: &mut LineBuilder) {
        out.text(Self::RECORD_TYPE)
            .alpha(&self.collection_type_indicator, 2)
            .string(&self.destination_routing_number, 9)
            .string(&self.ece_institution_routing_number, 9)
            .date(&self.bundle_business_date)
            .date(&self.bundle_creation_date)
            .alpha(&self.bundle_id, 10)
            .string(&self.bundle_sequence_number, 4)
            .alpha(&self.cycle_number, 2)
            .string(&self.return_location_routing_number, 9)
            .alpha(&self.user_field, 5)
            .blank(12);
    }

    fn validate(&self, opts: &Options) -> Result<(), FieldError> {
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
        check("BundleID", &self.bundle_id, is_alphanumeric(&self.bundle_id))?;
        check(
            "BundleSequenceNumber",
            &self.bundle_sequence_number,
            is_numeric(&self.bundle_sequence_number),
        )?;
        fits_text("BundleSequenceNumber", &self.bundle_sequence_number, 4)?;
        check("CycleNumber", &self.cycle_number, is_alphanumeric(&self.cycle_number))?;
        check(
            "ReturnLocationRoutingNumber",
            &self.return_location_routing_number,
            is_numeric(&self.return_location_routing_number),
        )?;
        // The 2003 standard fills an unused return location with zeros.
        if !opts.is_dstu()
            && !self.return_location_routing_number.is_empty()
            && self.return_location_routing_number.bytes().all(|b| b == b'0')
        {
            return Err(FieldError::new(
                "ReturnLocationRoutingNumber",
                self.return_location_routing_number.as_str(),
                MSG_ZERO_ROUTING,
            ));
        }
        check("UserField", &self.user_field, is_alphanumeric_special(&self.user_field))
    }
}
