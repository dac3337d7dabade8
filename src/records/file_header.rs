//! File Header Record (type 01).

use serde::{Deserialize, Serialize};

use super::{RECORD_LENGTH, RecordCodec, expect_type};
use crate::error::{FieldError, FileError};
use crate::field::{IclDate, IclTime, Line, LineBuilder};
use crate::options::Options;
use crate::validators::*;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileHeader {
    /// 03 (DSTU X9.37-2003), 30 (X9.100-187-2008) or 35 (X9.100-187-2013+).
    pub standard_level: String,
    /// T (test) or P (production).
    pub test_file_indicator: String,
    pub immediate_destination: String,
    pub immediate_origin: String,
    pub file_creation_date: IclDate,
    pub file_creation_time: IclTime,
    pub resend_indicator: String,
    pub immediate_destination_name: String,
    pub immediate_origin_name: String,
    pub file_id_modifier: String,
    pub country_code: String,
    pub user_field: String,
    pub companion_document_indicator: String,
}

impl FileHeader {
    pub fn new() -> Self {
        Self::default()
    }

    fn field_inclusion(&self) -> Result<(), FieldError> {
        mandatory("StandardLevel", &self.standard_level)?;
        mandatory("TestFileIndicator", &self.test_file_indicator)?;
        mandatory_routing("ImmediateDestination", &self.immediate_destination, false)?;
        mandatory_routing("ImmediateOrigin", &self.immediate_origin, false)?;
        mandatory_date("FileCreationDate", &self.file_creation_date)?;
        mandatory_time("FileCreationTime", &self.file_creation_time)?;
        mandatory("ResendIndicator", &self.resend_indicator)?;
        Ok(())
    }
}

impl RecordCodec for FileHeader {
    const RECORD_TYPE: &'static str = "01";
    const NAME: &'static str = "FileHeader";
    const MIN_LENGTH: usize = RECORD_LENGTH;

    fn parse(line: &Line) -> Result<Self, FileError> {
        line.require(Self::NAME, Self::MIN_LENGTH)?;
        expect_type(line, Self::RECORD_TYPE, Self::NAME)?;
        Ok(Self {
            standard_level: line.alpha(2, 2),
            test_file_indicator: line.alpha(4, 1),
            immediate_destination: line.string(5, 9),
            immediate_origin: line.string(14, 9),
            file_creation_date: line.date(23),
            file_creation_time: line.time(31),
            resend_indicator: line.alpha(35, 1),
            immediate_destination_name: line.alpha(36, 18),
            immediate_origin_name: line.alpha(54, 18),
            file_id_modifier: line.alpha(72, 1),
            country_code: line.alpha(73, 2),
            user_field: line.alpha(75, 4),
            companion_document_indicator: line.alpha(79, 1),
        })
    }

    fn write(&self, out: &mut LineBuilder) {
        out.text(Self::RECORD_TYPE)
            .alpha(&self.standard_level, 2)
            .alpha(&self.test_file_indicator, 1)
            .string(&self.immediate_destination, 9)
            .string(&self.immediate_origin, 9)
            .date(&self.file_creation_date)
            .time(&self.file_creation_time)
            .alpha(&self.resend_indicator, 1)
            .alpha(&self.immediate_destination_name, 18)
            .alpha(&self.immediate_origin_name, 18)
            .alpha(&self.file_id_modifier, 1)
            .alpha(&self.country_code, 2)
            .alpha(&self.user_field, 4)
            .alpha(&self.companion_document_indicator, 1);
    }

    fn validate(&self, _opts: &Options) -> Result<(), FieldError> {
        self.field_inclusion()?;
        check("StandardLevel", &self.standard_level, is_standard_level(&self.standard_level))?;
        check(
            "TestFileIndicator",
            &self.test_file_indicator,
            is_test_file_indicator(&self.test_file_indicator),
        )?;
        check(
            "ImmediateDestination",
            &self.immediate_destination,
            is_numeric(&self.immediate_destination),
        )?;
        check("ImmediateOrigin", &self.immediate_origin, is_numeric(&self.immediate_origin))?;
        check(
            "ResendIndicator",
            &self.resend_indicator,
            is_resend_indicator(&self.resend_indicator),
        )?;
        check(
            "ImmediateDestinationName",
            &self.immediate_destination_name,
            is_alphanumeric_special(&self.immediate_destination_name),
        )?;
        check(
            "ImmediateOriginName",
            &self.immediate_origin_name,
            is_alphanumeric_special(&self.immediate_origin_name),
        )?;
        check("FileIDModifier", &self.file_id_modifier, is_alphanumeric(&self.file_id_modifier))?;
        check("CountryCode", &self.country_code, is_alphanumeric(&self.country_code))?;
        check("UserField", &self.user_field, is_alphanumeric_special(&self.user_field))?;
        let companion = if self.country_code == "CA" {
            is_companion_document_indicator_ca(&self.companion_document_indicator)
        } else {
            is_companion_document_indicator_us(&self.companion_document_indicator)
        };
        check("CompanionDocumentIndicator", &self.companion_document_indicator, companion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use crate::error::{MSG_FIELD_INCLUSION, MSG_INVALID, MSG_ZERO_ROUTING};

    fn sample() -> FileHeader {
        FileHeader {
            standard_level: "35".to_string(),
            test_file_indicator: "T".to_string(),
            immediate_destination: "231380104".to_string(),
            immediate_origin: "121042882".to_string(),
            file_creation_date: NaiveDate::from_ymd_opt(2018, 10, 30).into(),
            file_creation_time: NaiveTime::from_hms_opt(15, 23, 0).into(),
            resend_indicator: "N".to_string(),
            immediate_destination_name: "Citadel".to_string(),
            immediate_origin_name: "Wells Fargo".to_string(),
            country_code: "US".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_format_layout() {
        let line = sample().format();
        assert_eq!(line.len(), 80);
        assert_eq!(&line[..14], "0135T231380104");
        assert_eq!(&line[14..35], "121042882201810301523");
        assert_eq!(&line[35..37], "NC");
        assert_eq!(&line[73..75], "US");
    }

    #[test]
    fn test_parse_format_round_trip() {
        let header = sample();
        let parsed = FileHeader::parse_str(&header.format()).unwrap();
        assert_eq!(parsed, header);
        assert_eq!(parsed.format(), header.format());
        assert!(parsed.validate(&Options::default()).is_ok());
    }

    #[test]
    fn test_short_line_is_file_error() {
        let line = sample().format();
        let err = FileHeader::parse_str(&line[..40]).unwrap_err();
        assert!(err.msg.contains("shorter"));
    }

    #[test]
    fn test_validate_inclusion_first() {
        let mut header = sample();
        header.standard_level = "99".to_string();
        header.file_creation_date = IclDate::Blank;
        let err = header.validate(&Options::default()).unwrap_err();
        assert_eq!(err.field_name, "FileCreationDate");
        assert_eq!(err.msg, MSG_FIELD_INCLUSION);
    }

    #[test]
    fn test_validate_first_error_in_column_order() {
        let mut header = sample();
        header.standard_level = "99".to_string();
        header.resend_indicator = "X".to_string();
        let err = header.validate(&Options::default()).unwrap_err();
        assert_eq!(err.field_name, "StandardLevel");
        assert_eq!(err.msg, MSG_INVALID);
    }

    #[test]
    fn test_zero_destination_rejected() {
        let mut header = sample();
        header.immediate_destination = "000000000".to_string();
        let err = header.validate(&Options::default()).unwrap_err();
        assert_eq!(err.field_name, "ImmediateDestination");
        assert_eq!(err.msg, MSG_ZERO_ROUTING);
    }

    #[test]
    fn test_companion_document_follows_country() {
        let mut header = sample();
        header.companion_document_indicator = "A".to_string();
        assert!(header.validate(&Options::default()).is_err());
        header.country_code = "CA".to_string();
        assert!(header.validate(&Options::default()).is_ok());
    }
}
