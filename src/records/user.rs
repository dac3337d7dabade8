//! User records (type 68).
//!
//! Both shapes share a 45-byte prefix ending in a seven digit
//! `LengthUserData`. `UserRecordFormatType` (columns 33-35) picks the
//! shape: "001" is the payee endorsement layout, anything else is carried
//! as opaque user data.

use serde::{Deserialize, Serialize};

use super::{RecordCodec, expect_type};
use crate::error::{FieldError, FileError, MSG_INVALID, MSG_RESERVED_FORMAT, MSG_TOO_LARGE};
use crate::field::{IclDate, IclTime, Line, LineBuilder};
use crate::options::Options;
use crate::validators::*;

/// Columns 1-45, through `LengthUserData`.
pub const USER_PREFIX_LENGTH: usize = 45;
/// Width of the `LengthUserData` field.
pub const USER_DATA_LENGTH_WIDTH: usize = 7;
/// Format type reserved for [`UserPayeeEndorsement`].
pub const PAYEE_ENDORSEMENT_FORMAT: &str = "001";
/// Bytes of user data the payee endorsement fields occupy.
pub const PAYEE_ENDORSEMENT_DATA_LENGTH: usize = 262;

const FORMAT_TYPE_POS: usize = 32;
const USER_DATA_LENGTH_POS: usize = 38;

/// Declared `LengthUserData` of a 68 record prefix.
pub fn declared_user_data_length(prefix: &Line) -> usize {
    prefix.num(USER_DATA_LENGTH_POS, USER_DATA_LENGTH_WIDTH) as usize
}

fn validate_owner(indicator: &str, identifier: &str, modifier: &str) -> Result<(), FieldError> {
    check(
        "OwnerIdentifierIndicator",
        indicator,
        is_owner_identifier_indicator(indicator),
    )?;
    check("OwnerIdentifier", identifier, is_alphanumeric_special(identifier))?;
    check("OwnerIdentifierModifier", modifier, is_alphanumeric_special(modifier))
}

/// User General Record: the owner prefix plus opaque user data.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserGeneral {
    pub owner_identifier_indicator: String,
    pub owner_identifier: String,
    pub owner_identifier_modifier: String,
    pub user_record_format_type: String,
    pub format_type_version_level: String,
    #[serde(with = "crate::json::bytes")]
    pub user_data: Vec<u8>,
}

impl UserGeneral {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn length_user_data(&self) -> usize {
        self.user_data.len()
    }
}

impl RecordCodec for UserGeneral {
    const RECORD_TYPE: &'static str = "68";
    const NAME: &'static str = "UserGeneral";
    const MIN_LENGTH: usize = USER_PREFIX_LENGTH;

    fn parse(line: &Line) -> Result<Self, FileError> {
        line.require(Self::NAME, Self::MIN_LENGTH)?;
        expect_type(line, Self::RECORD_TYPE, Self::NAME)?;
        let len = declared_user_data_length(line);
        line.require(Self::NAME, USER_PREFIX_LENGTH + len)?;
        Ok(Self {
            owner_identifier_indicator: line.alpha(2, 1),
            owner_identifier: line.alpha(3, 9),
            owner_identifier_modifier: line.alpha(12, 20),
            user_record_format_type: line.alpha(FORMAT_TYPE_POS, 3),
            format_type_version_level: line.string(35, 3),
            user_data: line.bytes(USER_PREFIX_LENGTH, len).to_vec(),
        })
    }

    fn write(&self, out: &mut LineBuilder) {
        out.text(Self::RECORD_TYPE)
            .alpha(&self.owner_identifier_indicator, 1)
            .alpha(&self.owner_identifier, 9)
            .alpha(&self.owner_identifier_modifier, 20)
            .alpha(&self.user_record_format_type, 3)
            .string(&self.format_type_version_level, 3)
            .numeric(self.length_user_data() as u64, USER_DATA_LENGTH_WIDTH)
            .raw(&self.user_data);
    }

    fn validate(&self, opts: &Options) -> Result<(), FieldError> {
        mandatory("UserRecordFormatType", &self.user_record_format_type)?;
        if self.user_record_format_type == PAYEE_ENDORSEMENT_FORMAT {
            return Err(FieldError::new(
                "UserRecordFormatType",
                &self.user_record_format_type,
                MSG_RESERVED_FORMAT,
            ));
        }
        validate_owner(
            &self.owner_identifier_indicator,
            &self.owner_identifier,
            &self.owner_identifier_modifier,
        )?;
        check(
            "UserRecordFormatType",
            &self.user_record_format_type,
            is_alphanumeric_special(&self.user_record_format_type),
        )?;
        check(
            "FormatTypeVersionLevel",
            &self.format_type_version_level,
            is_numeric(&self.format_type_version_level),
        )?;
        let len = self.length_user_data();
        fits("LengthUserData", len as u64, USER_DATA_LENGTH_WIDTH)?;
        if len > opts.max_payload_length {
            return Err(FieldError::new("LengthUserData", len.to_string(), MSG_TOO_LARGE));
        }
        Ok(())
    }
}

/// User Record Payee Endorsement (format type "001").
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserPayeeEndorsement {
    pub owner_identifier_indicator: String,
    pub owner_identifier: String,
    pub owner_identifier_modifier: String,
    pub format_type_version_level: String,
    /// Declared user data length; written as at least 262.
    pub length_user_data: u32,
    pub payee_name: String,
    pub endorsement_date: IclDate,
    pub bank_routing_number: String,
    pub bank_account_number: String,
    pub customer_identifier: String,
    pub customer_contact_information: String,
    pub store_merchant_processing_site_number: String,
    pub internal_control_sequence_number: String,
    pub time: IclTime,
    pub operator_name: String,
    pub operator_number: String,
    pub manager_name: String,
    pub manager_number: String,
    pub equipment_number: String,
    pub endorsement_indicator: String,
    pub user_field: String,
}

impl UserPayeeEndorsement {
    pub fn new() -> Self {
        Self {
            length_user_data: PAYEE_ENDORSEMENT_DATA_LENGTH as u32,
            ..Default::default()
        }
    }

    /// Length actually written: the declared length, never below 262.
    pub fn effective_length(&self) -> usize {
        (self.length_user_data as usize).max(PAYEE_ENDORSEMENT_DATA_LENGTH)
    }

    fn field_inclusion(&self) -> Result<(), FieldError> {
        mandatory("PayeeName", &self.payee_name)?;
        mandatory_date("EndorsementDate", &self.endorsement_date)?;
        mandatory_routing("BankRoutingNumber", &self.bank_routing_number, false)?;
        mandatory("BankAccountNumber", &self.bank_account_number)?;
        mandatory("EndorsementIndicator", &self.endorsement_indicator)?;
        Ok(())
    }
}

impl RecordCodec for UserPayeeEndorsement {
    const RECORD_TYPE: &'static str = "68";
    const NAME: &'static str = "UserPayeeEndorsement";
    const MIN_LENGTH: usize = USER_PREFIX_LENGTH + PAYEE_ENDORSEMENT_DATA_LENGTH;

    fn parse(line: &Line) -> Result<Self, FileError> {
        line.require(Self::NAME, USER_PREFIX_LENGTH)?;
        expect_type(line, Self::RECORD_TYPE, Self::NAME)?;
        let len = declared_user_data_length(line);
        line.require(Self::NAME, Self::MIN_LENGTH.max(USER_PREFIX_LENGTH + len))?;
        Ok(Self {
            owner_identifier_indicator: line.alpha(2, 1),
            owner_identifier: line.alpha(3, 9),
            owner_identifier_modifier: line.alpha(12, 20),
            format_type_version_level: line.string(35, 3),
            length_user_data: len as u32,
            payee_name: line.alpha(45, 40),
            endorsement_date: line.date(85),
            bank_routing_number: line.string(93, 9),
            bank_account_number: line.alpha(102, 20),
            customer_identifier: line.alpha(122, 15),
            customer_contact_information: line.alpha(137, 40),
            store_merchant_processing_site_number: line.alpha(177, 5),
            internal_control_sequence_number: line.alpha(182, 15),
            time: line.time(197),
            operator_name: line.alpha(201, 30),
            operator_number: line.alpha(231, 10),
            manager_name: line.alpha(241, 30),
            manager_number: line.alpha(271, 10),
            equipment_number: line.alpha(281, 15),
            endorsement_indicator: line.alpha(296, 1),
            user_field: line.alpha(297, 10),
        })
    }

    fn write(&self, out: &mut LineBuilder) {
        let len = self.effective_length();
        out.text(Self::RECORD_TYPE)
            .alpha(&self.owner_identifier_indicator, 1)
            .alpha(&self.owner_identifier, 9)
            .alpha(&self.owner_identifier_modifier, 20)
            .text(PAYEE_ENDORSEMENT_FORMAT)
            .string(&self.format_type_version_level, 3)
            .numeric(len as u64, USER_DATA_LENGTH_WIDTH)
            .alpha(&self.payee_name, 40)
            .date(&self.endorsement_date)
            .string(&self.bank_routing_number, 9)
            .alpha(&self.bank_account_number, 20)
            .alpha(&self.customer_identifier, 15)
            .alpha(&self.customer_contact_information, 40)
            .alpha(&self.store_merchant_processing_site_number, 5)
            .alpha(&self.internal_control_sequence_number, 15)
            .time(&self.time)
            .alpha(&self.operator_name, 30)
            .alpha(&self.operator_number, 10)
            .alpha(&self.manager_name, 30)
            .alpha(&self.manager_number, 10)
            .alpha(&self.equipment_number, 15)
            .alpha(&self.endorsement_indicator, 1)
            .alpha(&self.user_field, 10)
            .blank(len - PAYEE_ENDORSEMENT_DATA_LENGTH);
    }

    fn validate(&self, _opts: &Options) -> Result<(), FieldError> {
        self.field_inclusion()?;
        validate_owner(
            &self.owner_identifier_indicator,
            &self.owner_identifier,
            &self.owner_identifier_modifier,
        )?;
        check(
            "FormatTypeVersionLevel",
            &self.format_type_version_level,
            is_numeric(&self.format_type_version_level),
        )?;
        fits("LengthUserData", u64::from(self.length_user_data), USER_DATA_LENGTH_WIDTH)?;
        if self.length_user_data != 0
            && (self.length_user_data as usize) < PAYEE_ENDORSEMENT_DATA_LENGTH
        {
            return Err(FieldError::new(
                "LengthUserData",
                self.length_user_data.to_string(),
                MSG_INVALID,
            ));
        }
        check("PayeeName", &self.payee_name, is_alphanumeric_special(&self.payee_name))?;
        check(
            "BankRoutingNumber",
            &self.bank_routing_number,
            is_numeric(&self.bank_routing_number),
        )?;
        for (name, value) in [
            ("BankAccountNumber", &self.bank_account_number),
            ("CustomerIdentifier", &self.customer_identifier),
            ("CustomerContactInformation", &self.customer_contact_information),
            (
                "StoreMerchantProcessingSiteNumber",
                &self.store_merchant_processing_site_number,
            ),
            ("InternalControlSequenceNumber", &self.internal_control_sequence_number),
        ] {
            check(name, value, is_alphanumeric_special(value))?;
        }
        valid_time("Time", &self.time)?;
        for (name, value) in [
            ("OperatorName", &self.operator_name),
            ("OperatorNumber", &self.operator_number),
            ("ManagerName", &self.manager_name),
            ("ManagerNumber", &self.manager_number),
            ("EquipmentNumber", &self.equipment_number),
        ] {
            check(name, value, is_alphanumeric_special(value))?;
        }
        check(
            "EndorsementIndicator",
            &self.endorsement_indicator,
            is_endorsement_indicator(&self.endorsement_indicator),
        )?;
        check("UserField", &self.user_field, is_alphanumeric_special(&self.user_field))
    }
}

/// Either 68 shape, as it sits in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserRecord {
    General(UserGeneral),
    PayeeEndorsement(UserPayeeEndorsement),
}

impl Default for UserRecord {
    fn default() -> Self {
        UserRecord::General(UserGeneral::default())
    }
}

impl From<UserGeneral> for UserRecord {
    fn from(record: UserGeneral) -> Self {
        UserRecord::General(record)
    }
}

impl From<UserPayeeEndorsement> for UserRecord {
    fn from(record: UserPayeeEndorsement) -> Self {
        UserRecord::PayeeEndorsement(record)
    }
}

impl RecordCodec for UserRecord {
    const RECORD_TYPE: &'static str = "68";
    const NAME: &'static str = "UserRecord";
    const MIN_LENGTH: usize = USER_PREFIX_LENGTH;

    /// Reads the prefix, then re-parses into the shape the format type names.
    fn parse(line: &Line) -> Result<Self, FileError> {
        line.require(Self::NAME, Self::MIN_LENGTH)?;
        expect_type(line, Self::RECORD_TYPE, Self::NAME)?;
        if line.alpha(FORMAT_TYPE_POS, 3) == PAYEE_ENDORSEMENT_FORMAT {
            UserPayeeEndorsement::parse(line).map(UserRecord::PayeeEndorsement)
        } else {
            UserGeneral::parse(line).map(UserRecord::General)
        }
    }

    fn write(&self, out: &mut LineBuilder) {
        match self {
            UserRecord::General(r) => r.write(out),
            UserRecord::PayeeEndorsement(r) => r.write(out),
        }
    }

    fn validate(&self, opts: &Options) -> Result<(), FieldError> {
        match self {
            UserRecord::General(r) => r.validate(opts),
            UserRecord::PayeeEndorsement(r) => r.validate(opts),
        }
    }
}
