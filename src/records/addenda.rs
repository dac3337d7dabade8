//! Check and return addendum records (types 26, 27, 28, 32, 33, 34, 35).
//!
//! The check addenda and their return counterparts share a column layout:
//! 26/32 carry the BOFD endorsement, 27/34 the microfilm and image
//! reference key, 28/35 a subsequent endorsement. The shared shapes are
//! generated once per pair; 33 is unique to returns.

use serde::{Deserialize, Serialize};

use super::{RECORD_LENGTH, RecordCodec, expect_type};
use crate::error::{FieldError, FileError, MSG_FIELD_INCLUSION, MSG_TOO_LARGE};
use crate::field::{IclDate, Line, LineBuilder};
use crate::options::Options;
use crate::validators::*;

/// Width of the image reference key slot in 27/34.
pub const IMAGE_REFERENCE_KEY_WIDTH: usize = 34;

fn mandatory_record_number(value: u32) -> Result<(), FieldError> {
    if value == 0 {
        return Err(FieldError::new("RecordNumber", "0", MSG_FIELD_INCLUSION));
    }
    Ok(())
}

macro_rules! bofd_addendum {
    ($(#[$meta:meta])* $name:ident, $record_type:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
        #[serde(default, rename_all = "camelCase")]
        pub struct $name {
            /// Position of this addendum among the item's A addenda (1-9).
            pub record_number: u32,
            pub return_location_routing_number: String,
            pub bofd_endorsement_date: IclDate,
            pub bofd_item_sequence_number: String,
            pub bofd_account_number: String,
            pub bofd_branch_code: String,
            pub payee_name: String,
            pub truncation_indicator: String,
            pub bofd_conversion_indicator: String,
            pub bofd_correction_indicator: String,
            pub user_field: String,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            fn field_inclusion(&self, opts: &Options) -> Result<(), FieldError> {
                mandatory_record_number(self.record_number)?;
                mandatory_routing(
                    "ReturnLocationRoutingNumber",
                    &self.return_location_routing_number,
                    opts.frb_compatibility || opts.is_dstu(),
                )?;
                mandatory_date("BOFDEndorsementDate", &self.bofd_endorsement_date)?;
                mandatory("BOFDItemSequenceNumber", &self.bofd_item_sequence_number)?;
                if !opts.frb_compatibility {
                    mandatory("TruncationIndicator", &self.truncation_indicator)?;
                }
                Ok(())
            }
        }

        impl RecordCodec for $name {
            const RECORD_TYPE: &'static str = $record_type;
            const NAME: &'static str = stringify!($name);
            const MIN_LENGTH: usize = RECORD_LENGTH;

            fn parse(line: &Line) -> Result<Self, FileError> {
                line.require(Self::NAME, Self::MIN_LENGTH)?;
                expect_type(line, Self::RECORD_TYPE, Self::NAME)?;
                Ok(Self {
                    record_number: line.num(2, 1) as u32,
                    return_location_routing_number: line.string(3, 9),
                    bofd_endorsement_date: line.date(12),
                    bofd_item_sequence_number: line.alpha(20, 15),
                    bofd_account_number: line.alpha(35, 18),
                    bofd_branch_code: line.alpha(53, 5),
                    payee_name: line.alpha(58, 15),
                    truncation_indicator: line.alpha(73, 1),
                    bofd_conversion_indicator: line.alpha(74, 1),
                    bofd_correction_indicator: line.alpha(75, 1),
                    user_field: line.alpha(76, 1),
                })
            }

            fn write(&self, out: &mut LineBuilder) {
                out.text(Self::RECORD_TYPE)
                    .numeric(u64::from(self.record_number), 1)
                    .string(&self.return_location_routing_number, 9)
                    .date(&self.bofd_endorsement_date)
                    .alpha(&self.bofd_item_sequence_number, 15)
                    .alpha(&self.bofd_account_number, 18)
                    .alpha(&self.bofd_branch_code, 5)
                    .alpha(&self.payee_name, 15)
                    .alpha(&self.truncation_indicator, 1)
                    .alpha(&self.bofd_conversion_indicator, 1)
                    .alpha(&self.bofd_correction_indicator, 1)
                    .alpha(&self.user_field, 1)
                    .blank(3);
            }

            fn validate(&self, opts: &Options) -> Result<(), FieldError> {
                self.field_inclusion(opts)?;
                fits("RecordNumber", u64::from(self.record_number), 1)?;
                check(
                    "ReturnLocationRoutingNumber",
                    &self.return_location_routing_number,
                    is_numeric(&self.return_location_routing_number),
                )?;
                check(
                    "BOFDItemSequenceNumber",
                    &self.bofd_item_sequence_number,
                    is_alphanumeric_special(&self.bofd_item_sequence_number),
                )?;
                check(
                    "BOFDAccountNumber",
                    &self.bofd_account_number,
                    is_alphanumeric_special(&self.bofd_account_number),
                )?;
                check(
                    "BOFDBranchCode",
                    &self.bofd_branch_code,
                    is_alphanumeric_special(&self.bofd_branch_code),
                )?;
                check("PayeeName", &self.payee_name, is_alphanumeric_special(&self.payee_name))?;
                check(
                    "TruncationIndicator",
                    &self.truncation_indicator,
                    is_truncation_indicator(&self.truncation_indicator, opts.frb_compatibility),
                )?;
                check(
                    "BOFDConversionIndicator",
                    &self.bofd_conversion_indicator,
                    is_conversion_indicator(&self.bofd_conversion_indicator),
                )?;
                check(
                    "BOFDCorrectionIndicator",
                    &self.bofd_correction_indicator,
                    is_correction_indicator(&self.bofd_correction_indicator),
                )?;
                check("UserField", &self.user_field, is_alphanumeric_special(&self.user_field))
            }
        }
    };
}

macro_rules! image_reference_addendum {
    ($(#[$meta:meta])* $name:ident, $record_type:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
        #[serde(default, rename_all = "camelCase")]
        pub struct $name {
            pub image_reference_key_indicator: String,
            pub microfilm_archive_sequence_number: String,
            /// Declared key length; at most [`IMAGE_REFERENCE_KEY_WIDTH`].
            pub length_image_reference_key: u32,
            pub image_reference_key: String,
            pub description: String,
            pub user_field: String,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }
        }

        impl RecordCodec for $name {
            const RECORD_TYPE: &'static str = $record_type;
            const NAME: &'static str = stringify!($name);
            const MIN_LENGTH: usize = RECORD_LENGTH;

            fn parse(line: &Line) -> Result<Self, FileError> {
                line.require(Self::NAME, Self::MIN_LENGTH)?;
                expect_type(line, Self::RECORD_TYPE, Self::NAME)?;
                Ok(Self {
                    image_reference_key_indicator: line.alpha(2, 1),
                    microfilm_archive_sequence_number: line.alpha(3, 15),
                    length_image_reference_key: line.num(18, 4) as u32,
                    image_reference_key: line.alpha(22, IMAGE_REFERENCE_KEY_WIDTH),
                    description: line.alpha(56, 15),
                    user_field: line.alpha(71, 4),
                })
            }

            fn write(&self, out: &mut LineBuilder) {
                out.text(Self::RECORD_TYPE)
                    .alpha(&self.image_reference_key_indicator, 1)
                    .alpha(&self.microfilm_archive_sequence_number, 15)
                    .numeric(u64::from(self.length_image_reference_key), 4)
                    .alpha(&self.image_reference_key, IMAGE_REFERENCE_KEY_WIDTH)
                    .alpha(&self.description, 15)
                    .alpha(&self.user_field, 4)
                    .blank(5);
            }

            fn validate(&self, _opts: &Options) -> Result<(), FieldError> {
                mandatory(
                    "MicrofilmArchiveSequenceNumber",
                    &self.microfilm_archive_sequence_number,
                )?;
                check(
                    "ImageReferenceKeyIndicator",
                    &self.image_reference_key_indicator,
                    is_image_reference_key_indicator(&self.image_reference_key_indicator),
                )?;
                check(
                    "MicrofilmArchiveSequenceNumber",
                    &self.microfilm_archive_sequence_number,
                    is_alphanumeric_special(&self.microfilm_archive_sequence_number),
                )?;
                if self.length_image_reference_key as usize > IMAGE_REFERENCE_KEY_WIDTH {
                    return Err(FieldError::new(
                        "LengthImageReferenceKey",
                        self.length_image_reference_key.to_string(),
                        MSG_TOO_LARGE,
                    ));
                }
                check(
                    "ImageReferenceKey",
                    &self.image_reference_key,
                    is_alphanumeric_special(&self.image_reference_key),
                )?;
                fits_text(
                    "ImageReferenceKey",
                    &self.image_reference_key,
                    IMAGE_REFERENCE_KEY_WIDTH,
                )?;
                check("Description", &self.description, is_alphanumeric_special(&self.description))?;
                check("UserField", &self.user_field, is_alphanumeric_special(&self.user_field))
            }
        }
    };
}

macro_rules! endorsement_addendum {
    ($(#[$meta:meta])* $name:ident, $record_type:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
        #[serde(default, rename_all = "camelCase")]
        pub struct $name {
            /// Position among the item's endorsement addenda (1-99).
            pub record_number: u32,
            pub endorsing_bank_routing_number: String,
            pub bofd_endorsement_business_date: IclDate,
            pub endorsing_bank_item_sequence_number: String,
            pub truncation_indicator: String,
            pub endorsing_bank_conversion_indicator: String,
            pub endorsing_bank_correction_indicator: String,
            pub return_reason: String,
            pub user_field: String,
            pub endorsing_bank_identifier: String,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            fn field_inclusion(&self, opts: &Options) -> Result<(), FieldError> {
                mandatory_record_number(self.record_number)?;
                mandatory_routing(
                    "EndorsingBankRoutingNumber",
                    &self.endorsing_bank_routing_number,
                    opts.frb_compatibility,
                )?;
                mandatory_date(
                    "BOFDEndorsementBusinessDate",
                    &self.bofd_endorsement_business_date,
                )?;
                mandatory(
                    "EndorsingBankItemSequenceNumber",
                    &self.endorsing_bank_item_sequence_number,
                )?;
                if !opts.frb_compatibility {
                    mandatory("TruncationIndicator", &self.truncation_indicator)?;
                }
                Ok(())
            }
        }

        impl RecordCodec for $name {
            const RECORD_TYPE: &'static str = $record_type;
            const NAME: &'static str = stringify!($name);
            const MIN_LENGTH: usize = RECORD_LENGTH;

            fn parse(line: &Line) -> Result<Self, FileError> {
                line.require(Self::NAME, Self::MIN_LENGTH)?;
                expect_type(line, Self::RECORD_TYPE, Self::NAME)?;
                Ok(Self {
                    record_number: line.num(2, 2) as u32,
                    endorsing_bank_routing_number: line.string(4, 9),
                    bofd_endorsement_business_date: line.date(13),
                    endorsing_bank_item_sequence_number: line.alpha(21, 15),
                    truncation_indicator: line.alpha(36, 1),
                    endorsing_bank_conversion_indicator: line.alpha(37, 1),
                    endorsing_bank_correction_indicator: line.alpha(38, 1),
                    return_reason: line.alpha(39, 1),
                    user_field: line.alpha(40, 15),
                    endorsing_bank_identifier: line.alpha(55, 1),
                })
            }

            fn write(&self, out: &mut LineBuilder) {
                out.text(Self::RECORD_TYPE)
                    .numeric(u64::from(self.record_number), 2)
                    .string(&self.endorsing_bank_routing_number, 9)
                    .date(&self.bofd_endorsement_business_date)
                    .alpha(&self.endorsing_bank_item_sequence_number, 15)
                    .alpha(&self.truncation_indicator, 1)
                    .alpha(&self.endorsing_bank_conversion_indicator, 1)
                    .alpha(&self.endorsing_bank_correction_indicator, 1)
                    .alpha(&self.return_reason, 1)
                    .alpha(&self.user_field, 15)
                    .alpha(&self.endorsing_bank_identifier, 1)
                    .blank(24);
            }

            fn validate(&self, opts: &Options) -> Result<(), FieldError> {
                self.field_inclusion(opts)?;
                fits("RecordNumber", u64::from(self.record_number), 2)?;
                check(
                    "EndorsingBankRoutingNumber",
                    &self.endorsing_bank_routing_number,
                    is_numeric(&self.endorsing_bank_routing_number),
                )?;
                check(
                    "EndorsingBankItemSequenceNumber",
                    &self.endorsing_bank_item_sequence_number,
                    is_alphanumeric_special(&self.endorsing_bank_item_sequence_number),
                )?;
                check(
                    "TruncationIndicator",
                    &self.truncation_indicator,
                    is_truncation_indicator(&self.truncation_indicator, opts.frb_compatibility),
                )?;
                check(
                    "EndorsingBankConversionIndicator",
                    &self.endorsing_bank_conversion_indicator,
                    is_conversion_indicator(&self.endorsing_bank_conversion_indicator),
                )?;
                check(
                    "EndorsingBankCorrectionIndicator",
                    &self.endorsing_bank_correction_indicator,
                    is_correction_indicator(&self.endorsing_bank_correction_indicator),
                )?;
                check("ReturnReason", &self.return_reason, is_alphanumeric(&self.return_reason))?;
                check("UserField", &self.user_field, is_alphanumeric_special(&self.user_field))?;
                check(
                    "EndorsingBankIdentifier",
                    &self.endorsing_bank_identifier,
                    is_endorsing_bank_identifier(&self.endorsing_bank_identifier),
                )
            }
        }
    };
}

bofd_addendum!(
    /// Check Detail Addendum A (type 26): bank of first deposit endorsement.
    CheckDetailAddendumA,
    "26"
);

bofd_addendum!(
    /// Return Detail Addendum A (type 32).
    ReturnDetailAddendumA,
    "32"
);

image_reference_addendum!(
    /// Check Detail Addendum B (type 27): microfilm and image archive reference.
    CheckDetailAddendumB,
    "27"
);

image_reference_addendum!(
    /// Return Detail Addendum C (type 34).
    ReturnDetailAddendumC,
    "34"
);

endorsement_addendum!(
    /// Check Detail Addendum C (type 28): subsequent endorsement.
    CheckDetailAddendumC,
    "28"
);

endorsement_addendum!(
    /// Return Detail Addendum D (type 35).
    ReturnDetailAddendumD,
    "35"
);

/// Return Detail Addendum B (type 33): paying bank identification.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReturnDetailAddendumB {
    pub payor_bank_name: String,
    pub auxiliary_on_us: String,
    pub payor_bank_sequence_number: String,
    pub payor_bank_business_date: IclDate,
    pub payor_account_name: String,
}

impl ReturnDetailAddendumB {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordCodec for ReturnDetailAddendumB {
    const RECORD_TYPE: &'static str = "33";
    const NAME: &'static str = "ReturnDetailAddendumB";
    const MIN_LENGTH: usize = RECORD_LENGTH;

    fn parse(line: &Line) -> Result<Self, FileError> {
        line.require(Self::NAME, Self::MIN_LENGTH)?;
        expect_type(line, Self::RECORD_TYPE, Self::NAME)?;
        Ok(Self {
            payor_bank_name: line.alpha(2, 18),
            auxiliary_on_us: line.nbsm(20, 15),
            payor_bank_sequence_number: line.alpha(35, 15),
            payor_bank_business_date: line.date(50),
            payor_account_name: line.alpha(58, 22),
        })
    }

    fn write(&self, out: &mut LineBuilder) {
        out.text(Self::RECORD_TYPE)
            .alpha(&self.payor_bank_name, 18)
            .nbsm(&self.auxiliary_on_us, 15)
            .alpha(&self.payor_bank_sequence_number, 15)
            .date(&self.payor_bank_business_date)
            .alpha(&self.payor_account_name, 22);
    }

    fn validate(&self, _opts: &Options) -> Result<(), FieldError> {
        mandatory_date("PayorBankBusinessDate", &self.payor_bank_business_date)?;
        check(
            "PayorBankName",
            &self.payor_bank_name,
            is_alphanumeric_special(&self.payor_bank_name),
        )?;
        check("AuxiliaryOnUs", &self.auxiliary_on_us, is_nbsm(&self.auxiliary_on_us))?;
        check(
            "PayorBankSequenceNumber",
            &self.payor_bank_sequence_number,
            is_alphanumeric_special(&self.payor_bank_sequence_number),
        )?;
        check(
            "PayorAccountName",
            &self.payor_account_name,
            is_alphanumeric_special(&self.payor_account_name),
        )
    }
}
