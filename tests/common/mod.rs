#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use icl_rs::field::IclDate;
use icl_rs::records::{
    BundleHeader, CashLetterHeader, CheckDetail, CheckDetailAddendumA, CheckDetailAddendumB,
    CheckDetailAddendumC, FileHeader, ImageViewAnalysis, ImageViewData, ImageViewDetail,
    RecordCodec,
};
use icl_rs::{Bundle, CashLetter, File, Options};

pub const GOLDEN_CHECK: &str =
    "25      123456789 031300012             555888100001000001              GD1Y030B";

pub fn date() -> IclDate {
    NaiveDate::from_ymd_opt(2018, 10, 30).into()
}

pub fn file_header() -> FileHeader {
    FileHeader {
        standard_level: "35".to_string(),
        test_file_indicator: "T".to_string(),
        immediate_destination: "231380104".to_string(),
        immediate_origin: "121042882".to_string(),
        file_creation_date: date(),
        file_creation_time: NaiveTime::from_hms_opt(15, 23, 0).into(),
        resend_indicator: "N".to_string(),
        immediate_destination_name: "Citadel".to_string(),
        immediate_origin_name: "Wells Fargo".to_string(),
        country_code: "US".to_string(),
        ..Default::default()
    }
}

pub fn cash_letter_header() -> CashLetterHeader {
    CashLetterHeader {
        collection_type_indicator: "01".to_string(),
        destination_routing_number: "231380104".to_string(),
        ece_institution_routing_number: "121042882".to_string(),
        cash_letter_business_date: date(),
        cash_letter_creation_date: date(),
        cash_letter_creation_time: NaiveTime::from_hms_opt(15, 23, 0).into(),
        record_type_indicator: "I".to_string(),
        documentation_type_indicator: "G".to_string(),
        cash_letter_id: "A1".to_string(),
        originator_contact_name: "Contact Name".to_string(),
        originator_contact_phone_number: "5558675552".to_string(),
        ..Default::default()
    }
}

pub fn bundle_header() -> BundleHeader {
    BundleHeader {
        collection_type_indicator: "01".to_string(),
        destination_routing_number: "231380104".to_string(),
        ece_institution_routing_number: "121042882".to_string(),
        bundle_business_date: date(),
        bundle_creation_date: date(),
        bundle_id: "9999".to_string(),
        bundle_sequence_number: "1".to_string(),
        cycle_number: "01".to_string(),
        return_location_routing_number: "121042882".to_string(),
        ..Default::default()
    }
}

pub fn addendum_a() -> CheckDetailAddendumA {
    CheckDetailAddendumA {
        record_number: 1,
        return_location_routing_number: "121042882".to_string(),
        bofd_endorsement_date: date(),
        bofd_item_sequence_number: "1".to_string(),
        bofd_account_number: "938383".to_string(),
        bofd_branch_code: "01".to_string(),
        payee_name: "Test Payee".to_string(),
        truncation_indicator: "Y".to_string(),
        bofd_conversion_indicator: "1".to_string(),
        bofd_correction_indicator: "0".to_string(),
        ..Default::default()
    }
}

pub fn addendum_b() -> CheckDetailAddendumB {
    CheckDetailAddendumB {
        image_reference_key_indicator: "1".to_string(),
        microfilm_archive_sequence_number: "1A".to_string(),
        length_image_reference_key: 4,
        image_reference_key: "0".to_string(),
        description: "CD Addendum B".to_string(),
        ..Default::default()
    }
}

pub fn addendum_c() -> CheckDetailAddendumC {
    CheckDetailAddendumC {
        record_number: 1,
        endorsing_bank_routing_number: "121042882".to_string(),
        bofd_endorsement_business_date: date(),
        endorsing_bank_item_sequence_number: "1".to_string(),
        truncation_indicator: "Y".to_string(),
        endorsing_bank_conversion_indicator: "1".to_string(),
        endorsing_bank_correction_indicator: "0".to_string(),
        return_reason: "A".to_string(),
        endorsing_bank_identifier: "0".to_string(),
        ..Default::default()
    }
}

pub fn image_detail() -> ImageViewDetail {
    ImageViewDetail {
        image_indicator: "1".to_string(),
        image_creator_routing_number: "031300012".to_string(),
        image_creator_date: date(),
        image_view_format_indicator: "00".to_string(),
        image_view_compression_algorithm: "00".to_string(),
        image_view_data_size: "0000000".to_string(),
        view_side_indicator: "0".to_string(),
        view_descriptor: "00".to_string(),
        digital_signature_indicator: "0".to_string(),
        digital_signature_method: "00".to_string(),
        security_key_size: "00000".to_string(),
        protected_data_start: "0000000".to_string(),
        protected_data_length: "0000000".to_string(),
        image_recreate_indicator: "0".to_string(),
        override_indicator: "0".to_string(),
        ..Default::default()
    }
}

pub fn image_data(image: Vec<u8>) -> ImageViewData {
    ImageViewData {
        ece_institution_routing_number: "121042882".to_string(),
        bundle_business_date: date(),
        cycle_number: "1".to_string(),
        ece_institution_item_sequence_number: "1".to_string(),
        security_originator_name: "Sec Orig Name".to_string(),
        security_authenticator_name: "Sec Auth Name".to_string(),
        security_key_name: "SECURE".to_string(),
        clipping_origin: "0".to_string(),
        image_reference_key: "REFKEY".to_string(),
        image_data: image,
        ..Default::default()
    }
}

pub fn image_analysis() -> ImageViewAnalysis {
    ImageViewAnalysis {
        global_image_quality: 2,
        global_image_usability: 2,
        imaging_bank_specific_test: 0,
        user_field: "Analysis".to_string(),
        ..Default::default()
    }
}

/// A check with one addendum of each kind and one image view.
pub fn check(image: Vec<u8>) -> CheckDetail {
    let mut cd = CheckDetail::parse_str(GOLDEN_CHECK).unwrap();
    cd.check_detail_addendum_a.push(addendum_a());
    cd.check_detail_addendum_b.push(addendum_b());
    cd.check_detail_addendum_c.push(addendum_c());
    cd.image_view_detail.push(image_detail());
    cd.image_view_data.push(image_data(image));
    cd.image_view_analysis.push(image_analysis());
    cd
}

/// One cash letter, one bundle, one check; not yet built.
pub fn unbuilt_file(image: Vec<u8>) -> File {
    let mut bundle = Bundle::new(bundle_header());
    bundle.add_check_detail(check(image));
    let mut cash_letter = CashLetter::new(cash_letter_header());
    cash_letter.add_bundle(bundle);
    let mut file = File::new(file_header());
    file.add_cash_letter(cash_letter);
    file
}

pub fn minimal_file() -> File {
    let mut file = unbuilt_file(Vec::new());
    file.create(&Options::default()).unwrap();
    file
}
