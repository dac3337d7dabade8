//! Character-class and closed value-set checks.
//!
//! Every check returns `Err(msg)` with one of the `MSG_*` constants from
//! [`crate::error`]; the record codecs wrap that message into a
//! [`FieldError`] naming the field with [`check`].

use crate::error::{
    FieldError, MSG_ALPHANUMERIC, MSG_ALPHANUMERIC_SPECIAL, MSG_FIELD_INCLUSION, MSG_INVALID,
    MSG_NBSM, MSG_NUMERIC, MSG_TOO_LARGE, MSG_ZERO_ROUTING,
};
use crate::field::{IclDate, IclTime, Stamp};

pub type Check = Result<(), &'static str>;

fn one_of(value: &str, set: &[&str]) -> Check {
    if set.contains(&value) { Ok(()) } else { Err(MSG_INVALID) }
}

/// `[0-9]*`
pub fn is_numeric(s: &str) -> Check {
    if s.bytes().all(|b| b.is_ascii_digit()) { Ok(()) } else { Err(MSG_NUMERIC) }
}

/// `[A-Za-z0-9 ]*`
pub fn is_alphanumeric(s: &str) -> Check {
    if s.chars().all(|c| c.is_ascii_alphanumeric() || c == ' ') {
        Ok(())
    } else {
        Err(MSG_ALPHANUMERIC)
    }
}

/// Printable ASCII, `0x20..=0x7E`.
pub fn is_alphanumeric_special(s: &str) -> Check {
    if s.chars().all(|c| (' '..='~').contains(&c)) {
        Ok(())
    } else {
        Err(MSG_ALPHANUMERIC_SPECIAL)
    }
}

/// MICR glyphs: digits, blank, `*`, `-` and `/`.
pub fn is_nbsm(s: &str) -> Check {
    if s.chars().all(|c| c.is_ascii_digit() || matches!(c, ' ' | '*' | '-' | '/')) {
        Ok(())
    } else {
        Err(MSG_NBSM)
    }
}

pub fn is_standard_level(s: &str) -> Check {
    one_of(s, &["03", "30", "35"])
}

pub fn is_test_file_indicator(s: &str) -> Check {
    one_of(s, &["T", "P"])
}

pub fn is_resend_indicator(s: &str) -> Check {
    one_of(s, &["Y", "N"])
}

const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

pub fn is_companion_document_indicator_us(s: &str) -> Check {
    if s.is_empty() { Ok(()) } else { one_of(s, &DIGITS) }
}

pub fn is_companion_document_indicator_ca(s: &str) -> Check {
    if s.is_empty() || DIGITS.contains(&s) {
        return Ok(());
    }
    one_of(s, &["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"])
}

pub fn is_collection_type_indicator(s: &str) -> Check {
    one_of(s, &["00", "01", "02", "03", "04", "05", "06", "20", "99"])
}

/// Return collection types; these cash letters carry no routing number summary.
pub fn is_return_collection_type(s: &str) -> bool {
    matches!(s, "03" | "04" | "05" | "06")
}

pub fn is_record_type_indicator(s: &str) -> Check {
    one_of(s, &["N", "E", "I", "F"])
}

pub fn is_documentation_type_indicator(s: &str) -> Check {
    one_of(
        s,
        &["", "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "Z"],
    )
}

pub fn is_returns_indicator(s: &str) -> Check {
    one_of(s, &["", "E", "R", "J", "N"])
}

pub fn is_credit_total_indicator(s: &str) -> Check {
    one_of(s, &["", "0", "1"])
}

pub fn is_account_type_code(s: &str) -> Check {
    one_of(s, &["", "0", "1", "2", "3", "4", "5"])
}

pub fn is_source_work_code(s: &str) -> Check {
    one_of(
        s,
        &["", "00", "01", "02", "03", "04", "05", "06", "07", "08", "09"],
    )
}

pub fn is_owner_identifier_indicator(s: &str) -> Check {
    one_of(s, &["", "0", "1", "2", "3", "4", "5"])
}

pub fn is_endorsement_indicator(s: &str) -> Check {
    one_of(s, &["0", "1", "2", "3", "4", "5"])
}

pub fn is_bofd_indicator(s: &str) -> Check {
    one_of(s, &["Y", "N", "U"])
}

pub fn is_micr_valid_indicator(s: &str) -> Check {
    one_of(s, &["", "0", "1", "2", "3", "4"])
}

pub fn is_return_acceptance_indicator(s: &str) -> Check {
    if s.is_empty() || DIGITS.contains(&s) {
        return Ok(());
    }
    one_of(s, &["A", "B", "C", "D", "E", "F"])
}

pub fn is_correction_indicator(s: &str) -> Check {
    one_of(s, &["", "0", "1", "2", "3", "4"])
}

pub fn is_archive_type_indicator(s: &str) -> Check {
    one_of(
        s,
        &["", "A", "B", "C", "D", "E", "F", "G", "H", "I", "J"],
    )
}

/// `frb` also accepts an empty indicator.
pub fn is_truncation_indicator(s: &str, frb: bool) -> Check {
    if frb && s.is_empty() {
        return Ok(());
    }
    one_of(s, &["Y", "N"])
}

pub fn is_conversion_indicator(s: &str) -> Check {
    if s.is_empty() || DIGITS.contains(&s) {
        return Ok(());
    }
    one_of(s, &["A", "B"])
}

pub fn is_return_notification_indicator(s: &str) -> Check {
    one_of(s, &["", "1", "2"])
}

pub fn is_times_returned(s: &str) -> Check {
    one_of(s, &["", "0", "1", "2", "3"])
}

pub fn is_endorsing_bank_identifier(s: &str) -> Check {
    one_of(s, &["", "0", "1", "2", "3"])
}

pub fn is_image_reference_key_indicator(s: &str) -> Check {
    one_of(s, &["", "0", "1"])
}

pub fn is_image_indicator(s: &str) -> Check {
    one_of(s, &["0", "1", "2"])
}

pub fn is_image_view_format_indicator(s: &str) -> Check {
    one_of(s, &["", "00", "01", "20", "21", "22", "23", "24"])
}

pub fn is_image_view_compression_algorithm(s: &str) -> Check {
    one_of(s, &["", "00", "01", "02", "21", "22", "23"])
}

pub fn is_view_side_indicator(s: &str) -> Check {
    one_of(s, &["0", "1"])
}

pub fn is_view_descriptor(s: &str) -> Check {
    one_of(
        s,
        &[
            "00", "01", "02", "03", "04", "05", "06", "07", "08", "09", "10", "11", "12", "13",
            "14",
        ],
    )
}

pub fn is_digital_signature_indicator(s: &str) -> Check {
    one_of(s, &["", "0", "1"])
}

/// `frb` also accepts a single `"0"`.
pub fn is_digital_signature_method(s: &str, frb: bool) -> Check {
    if frb && s == "0" {
        return Ok(());
    }
    one_of(s, &["", "00", "01", "02", "03", "04", "05"])
}

pub fn is_image_recreate_indicator(s: &str) -> Check {
    one_of(s, &["", "0", "1"])
}

pub fn is_override_indicator(s: &str) -> Check {
    if s.is_empty() || s == "0" {
        return Ok(());
    }
    if s.len() == 1 && s.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(MSG_INVALID)
    }
}

pub fn is_clipping_origin(s: &str) -> Check {
    one_of(s, &["", "0", "1", "2", "3", "4"])
}

/// Image quality and usability codes: 0 not tested, 1 present, 2 absent.
pub fn is_image_test_code(value: u8) -> Check {
    if value <= 2 { Ok(()) } else { Err(MSG_INVALID) }
}

/// Imaging bank specific test also allows 3 (test performed, bank defined).
pub fn is_bank_specific_test_code(value: u8) -> Check {
    if value <= 3 { Ok(()) } else { Err(MSG_INVALID) }
}

/// Wrap a check result into a [`FieldError`] naming the field.
pub fn check(field_name: &str, value: &str, result: Check) -> Result<(), FieldError> {
    result.map_err(|msg| FieldError::new(field_name, value, msg))
}

/// Fails when a mandatory text field is blank.
pub fn mandatory(field_name: &str, value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::new(field_name, value, MSG_FIELD_INCLUSION));
    }
    Ok(())
}

/// Mandatory routing number. `allow_zero` admits `"000000000"`.
pub fn mandatory_routing(field_name: &str, value: &str, allow_zero: bool) -> Result<(), FieldError> {
    mandatory(field_name, value)?;
    if !allow_zero && value.bytes().all(|b| b == b'0') {
        return Err(FieldError::new(field_name, value, MSG_ZERO_ROUTING));
    }
    Ok(())
}

pub fn mandatory_date(field_name: &str, value: &IclDate) -> Result<(), FieldError> {
    if value.is_blank() {
        return Err(FieldError::new(field_name, "", MSG_FIELD_INCLUSION));
    }
    valid_date(field_name, value)
}

pub fn mandatory_time(field_name: &str, value: &IclTime) -> Result<(), FieldError> {
    if value.is_blank() {
        return Err(FieldError::new(field_name, "", MSG_FIELD_INCLUSION));
    }
    valid_time(field_name, value)
}

/// Blank or a real `YYYYMMDD` date.
pub fn valid_date(field_name: &str, value: &IclDate) -> Result<(), FieldError> {
    match value {
        Stamp::Raw(raw) => Err(FieldError::new(field_name, raw.as_str(), MSG_INVALID)),
        _ => Ok(()),
    }
}

/// Blank or a real `HHMM` time.
pub fn valid_time(field_name: &str, value: &IclTime) -> Result<(), FieldError> {
    match value {
        Stamp::Raw(raw) => Err(FieldError::new(field_name, raw.as_str(), MSG_INVALID)),
        _ => Ok(()),
    }
}

/// Numeric value must fit in `width` digits.
pub fn fits(field_name: &str, value: u64, width: usize) -> Result<(), FieldError> {
    let digits = value.to_string();
    if digits.len() > width {
        return Err(FieldError::new(field_name, digits, MSG_TOO_LARGE));
    }
    Ok(())
}

/// Text value must fit in `width` characters.
pub fn fits_text(field_name: &str, value: &str, width: usize) -> Result<(), FieldError> {
    if value.chars().count() > width {
        return Err(FieldError::new(field_name, value, MSG_TOO_LARGE));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_classes() {
        assert!(is_numeric("0123456789").is_ok());
        assert!(is_numeric("").is_ok());
        assert_eq!(is_numeric("12 4"), Err(MSG_NUMERIC));

        assert!(is_alphanumeric("ABC 123 xyz").is_ok());
        assert_eq!(is_alphanumeric("A-1"), Err(MSG_ALPHANUMERIC));

        assert!(is_alphanumeric_special("Bank & Trust, Inc.").is_ok());
        assert_eq!(is_alphanumeric_special("caf\u{e9}"), Err(MSG_ALPHANUMERIC_SPECIAL));
        assert_eq!(is_alphanumeric_special("tab\there"), Err(MSG_ALPHANUMERIC_SPECIAL));

        assert!(is_nbsm("12/34-56*").is_ok());
        assert_eq!(is_nbsm("12A"), Err(MSG_NBSM));
    }

    #[test]
    fn test_header_value_sets() {
        for ok in ["03", "30", "35"] {
            assert!(is_standard_level(ok).is_ok());
        }
        assert!(is_standard_level("99").is_err());
        assert!(is_collection_type_indicator("20").is_ok());
        assert!(is_collection_type_indicator("07").is_err());
        assert!(is_record_type_indicator("I").is_ok());
        assert!(is_record_type_indicator("X").is_err());
        assert!(is_returns_indicator("").is_ok());
        assert!(is_returns_indicator("Q").is_err());
        assert!(is_documentation_type_indicator("Z").is_ok());
        assert!(is_documentation_type_indicator("N").is_err());
    }

    #[test]
    fn test_companion_document_indicator() {
        assert!(is_companion_document_indicator_us("").is_ok());
        assert!(is_companion_document_indicator_us("7").is_ok());
        assert!(is_companion_document_indicator_us("A").is_err());
        assert!(is_companion_document_indicator_ca("A").is_ok());
        assert!(is_companion_document_indicator_ca("K").is_err());
    }

    #[test]
    fn test_frb_relaxations() {
        assert!(is_truncation_indicator("", false).is_err());
        assert!(is_truncation_indicator("", true).is_ok());
        assert!(is_digital_signature_method("0", false).is_err());
        assert!(is_digital_signature_method("0", true).is_ok());
        assert!(is_digital_signature_method("05", false).is_ok());
    }

    #[test]
    fn test_mandatory_routing() {
        assert!(mandatory_routing("Routing", "231380104", false).is_ok());
        let err = mandatory_routing("Routing", "000000000", false).unwrap_err();
        assert_eq!(err.msg, MSG_ZERO_ROUTING);
        assert!(mandatory_routing("Routing", "000000000", true).is_ok());
        let err = mandatory_routing("Routing", "", true).unwrap_err();
        assert_eq!(err.msg, MSG_FIELD_INCLUSION);
    }

    #[test]
    fn test_date_and_time_columns() {
        let date = IclDate::from(chrono::NaiveDate::from_ymd_opt(2018, 10, 30));
        assert!(mandatory_date("BundleBusinessDate", &date).is_ok());
        let err = mandatory_date("BundleBusinessDate", &IclDate::Blank).unwrap_err();
        assert_eq!(err.msg, MSG_FIELD_INCLUSION);
        let err = mandatory_date("BundleBusinessDate", &IclDate::parse("00000000")).unwrap_err();
        assert_eq!((err.value.as_str(), err.msg.as_str()), ("00000000", MSG_INVALID));
        assert!(valid_date("SettlementDate", &IclDate::Blank).is_ok());
        assert!(valid_date("SettlementDate", &IclDate::parse("2018133X")).is_err());
        assert!(valid_time("Time", &IclTime::parse("2460")).is_err());
        assert!(mandatory_time("FileCreationTime", &IclTime::parse("0000")).is_ok());
    }

    #[test]
    fn test_fits() {
        assert!(fits("ItemAmount", 9_999_999_999, 10).is_ok());
        let err = fits("ItemAmount", 10_000_000_000, 10).unwrap_err();
        assert_eq!(err.msg, MSG_TOO_LARGE);
        assert!(fits_text("CashLetterID", "ABCDEFGHI", 8).is_err());
    }

    #[test]
    fn test_image_codes() {
        assert!(is_image_test_code(2).is_ok());
        assert!(is_image_test_code(3).is_err());
        assert!(is_bank_specific_test_code(3).is_ok());
        assert!(is_view_descriptor("14").is_ok());
        assert!(is_view_descriptor("15").is_err());
        assert!(is_override_indicator("J").is_ok());
        assert!(is_override_indicator("j").is_err());
    }
}
