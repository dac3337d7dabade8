//! Image view records: detail (50), data (52) and analysis (54).

use serde::{Deserialize, Serialize};

use super::{RECORD_LENGTH, RecordCodec, expect_type};
use crate::error::{FieldError, FileError, MSG_TOO_LARGE};
use crate::field::{IclDate, Line, LineBuilder};
use crate::options::Options;
use crate::validators::*;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageViewDetail {
    /// 0 no image, 1 image present, 2 image present but not usable.
    pub image_indicator: String,
    pub image_creator_routing_number: String,
    pub image_creator_date: IclDate,
    pub image_view_format_indicator: String,
    pub image_view_compression_algorithm: String,
    pub image_view_data_size: String,
    pub view_side_indicator: String,
    pub view_descriptor: String,
    pub digital_signature_indicator: String,
    pub digital_signature_method: String,
    pub security_key_size: String,
    pub protected_data_start: String,
    pub protected_data_length: String,
    pub image_recreate_indicator: String,
    pub user_field: String,
    pub override_indicator: String,
}

impl ImageViewDetail {
    pub fn new() -> Self {
        Self::default()
    }

    fn field_inclusion(&self, opts: &Options) -> Result<(), FieldError> {
        mandatory("ImageIndicator", &self.image_indicator)?;
        mandatory_routing(
            "ImageCreatorRoutingNumber",
            &self.image_creator_routing_number,
            opts.frb_compatibility,
        )?;
        if !opts.frb_compatibility {
            mandatory_date("ImageCreatorDate", &self.image_creator_date)?;
        } else if !self.image_creator_date.is_zeros() {
            valid_date("ImageCreatorDate", &self.image_creator_date)?;
        }
        mandatory("ViewSideIndicator", &self.view_side_indicator)?;
        mandatory("ViewDescriptor", &self.view_descriptor)?;
        Ok(())
    }
}

impl RecordCodec for ImageViewDetail {
    const RECORD_TYPE: &'static str = "50";
    const NAME: &'static str = "ImageViewDetail";
    const MIN_LENGTH: usize = RECORD_LENGTH;

    fn parse(line: &Line) -> Result<Self, FileError> {
        line.require(Self::NAME, Self::MIN_LENGTH)?;
        expect_type(line, Self::RECORD_TYPE, Self::NAME)?;
        Ok(Self {
            image_indicator: line.alpha(2, 1),
            image_creator_routing_number: line.string(3, 9),
            image_creator_date: line.date(12),
            image_view_format_indicator: line.alpha(20, 2),
            image_view_compression_algorithm: line.alpha(22, 2),
            image_view_data_size: line.string(24, 7),
            view_side_indicator: line.alpha(31, 1),
            view_descriptor: line.alpha(32, 2),
            digital_signature_indicator: line.alpha(34, 1),
            digital_signature_method: line.alpha(35, 2),
            security_key_size: line.string(37, 5),
            protected_data_start: line.string(42, 7),
            protected_data_length: line.string(49, 7),
            image_recreate_indicator: line.alpha(56, 1),
            user_field: line.alpha(57, 8),
            override_indicator: line.alpha(66, 1),
        })
    }

    fn write(&self, out: &mut LineBuilder) {
        out.text(Self::RECORD_TYPE)
            .alpha(&self.image_indicator, 1)
            .string(&self.image_creator_routing_number, 9)
            .date(&self.image_creator_date)
            .alpha(&self.image_view_format_indicator, 2)
            .alpha(&self.image_view_compression_algorithm, 2)
            .string(&self.image_view_data_size, 7)
            .alpha(&self.view_side_indicator, 1)
            .alpha(&self.view_descriptor, 2)
            .alpha(&self.digital_signature_indicator, 1)
            .alpha(&self.digital_signature_method, 2)
            .string(&self.security_key_size, 5)
            .string(&self.protected_data_start, 7)
            .string(&self.protected_data_length, 7)
            .alpha(&self.image_recreate_indicator, 1)
            .alpha(&self.user_field, 8)
            .blank(1)
            .alpha(&self.override_indicator, 1)
            .blank(13);
    }

    fn validate(&self, opts: &Options) -> Result<(), FieldError> {
        self.field_inclusion(opts)?;
        check(
            "ImageIndicator",
            &self.image_indicator,
            is_image_indicator(&self.image_indicator),
        )?;
        check(
            "ImageCreatorRoutingNumber",
            &self.image_creator_routing_number,
            is_numeric(&self.image_creator_routing_number),
        )?;
        check(
            "ImageViewFormatIndicator",
            &self.image_view_format_indicator,
            is_image_view_format_indicator(&self.image_view_format_indicator),
        )?;
        check(
            "ImageViewCompressionAlgorithm",
            &self.image_view_compression_algorithm,
            is_image_view_compression_algorithm(&self.image_view_compression_algorithm),
        )?;
        check(
            "ImageViewDataSize",
            &self.image_view_data_size,
            is_numeric(&self.image_view_data_size),
        )?;
        check(
            "ViewSideIndicator",
            &self.view_side_indicator,
            is_view_side_indicator(&self.view_side_indicator),
        )?;
        check("ViewDescriptor", &self.view_descriptor, is_view_descriptor(&self.view_descriptor))?;
        check(
            "DigitalSignatureIndicator",
            &self.digital_signature_indicator,
            is_digital_signature_indicator(&self.digital_signature_indicator),
        )?;
        check(
            "DigitalSignatureMethod",
            &self.digital_signature_method,
            is_digital_signature_method(&self.digital_signature_method, opts.frb_compatibility),
        )?;
        check("SecurityKeySize", &self.security_key_size, is_numeric(&self.security_key_size))?;
        check(
            "ProtectedDataStart",
            &self.protected_data_start,
            is_numeric(&self.protected_data_start),
        )?;
        check(
            "ProtectedDataLength",
            &self.protected_data_length,
            is_numeric(&self.protected_data_length),
        )?;
        check(
            "ImageRecreateIndicator",
            &self.image_recreate_indicator,
            is_image_recreate_indicator(&self.image_recreate_indicator),
        )?;
        check("UserField", &self.user_field, is_alphanumeric_special(&self.user_field))?;
        check(
            "OverrideIndicator",
            &self.override_indicator,
            is_override_indicator(&self.override_indicator),
        )
    }
}

/// Columns 1-105 of an image view data record, up to and including the
/// image reference key length.
pub const IMAGE_VIEW_DATA_PREFIX: usize = 105;
/// Width of the digital signature length field.
pub const SIGNATURE_LENGTH_WIDTH: usize = 5;
/// Width of the image data length field.
pub const IMAGE_LENGTH_WIDTH: usize = 7;

/// Image View Data Record (type 52).
///
/// Three length-prefixed segments follow the fixed columns: the image
/// reference key (text), the digital signature and the image itself
/// (both opaque). Lengths are written from the payloads, so a record
/// always describes exactly the bytes it carries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageViewData {
    pub ece_institution_routing_number: String,
    pub bundle_business_date: IclDate,
    pub cycle_number: String,
    pub ece_institution_item_sequence_number: String,
    pub security_originator_name: String,
    pub security_authenticator_name: String,
    pub security_key_name: String,
    pub clipping_origin: String,
    pub clipping_coordinate_h1: String,
    pub clipping_coordinate_h2: String,
    pub clipping_coordinate_v1: String,
    pub clipping_coordinate_v2: String,
    pub image_reference_key: String,
    #[serde(with = "crate::json::bytes")]
    pub digital_signature: Vec<u8>,
    #[serde(with = "crate::json::bytes")]
    pub image_data: Vec<u8>,
}

impl ImageViewData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn length_image_reference_key(&self) -> usize {
        self.image_reference_key.chars().count()
    }

    pub fn length_digital_signature(&self) -> usize {
        self.digital_signature.len()
    }

    pub fn length_image_data(&self) -> usize {
        self.image_data.len()
    }

    /// Encoded record length.
    pub fn record_length(&self) -> usize {
        IMAGE_VIEW_DATA_PREFIX
            + self.length_image_reference_key()
            + SIGNATURE_LENGTH_WIDTH
            + self.length_digital_signature()
            + IMAGE_LENGTH_WIDTH
            + self.length_image_data()
    }

    fn field_inclusion(&self) -> Result<(), FieldError> {
        mandatory_routing(
            "EceInstitutionRoutingNumber",
            &self.ece_institution_routing_number,
            false,
        )?;
        mandatory_date("BundleBusinessDate", &self.bundle_business_date)?;
        mandatory(
            "EceInstitutionItemSequenceNumber",
            &self.ece_institution_item_sequence_number,
        )?;
        Ok(())
    }
}

fn payload_fits(field_name: &str, len: usize, width: usize, max: usize) -> Result<(), FieldError> {
    fits(field_name, len as u64, width)?;
    if len > max {
        return Err(FieldError::new(field_name, len.to_string(), MSG_TOO_LARGE));
    }
    Ok(())
}

impl RecordCodec for ImageViewData {
    const RECORD_TYPE: &'static str = "52";
    const NAME: &'static str = "ImageViewData";
    const MIN_LENGTH: usize = IMAGE_VIEW_DATA_PREFIX + SIGNATURE_LENGTH_WIDTH + IMAGE_LENGTH_WIDTH;

    fn parse(line: &Line) -> Result<Self, FileError> {
        line.require(Self::NAME, Self::MIN_LENGTH)?;
        expect_type(line, Self::RECORD_TYPE, Self::NAME)?;

        let key_len = line.num(101, 4) as usize;
        let mut pos = IMAGE_VIEW_DATA_PREFIX;
        line.require(Self::NAME, pos + key_len + SIGNATURE_LENGTH_WIDTH)?;
        let image_reference_key = line.text(pos, key_len);
        pos += key_len;

        let signature_len = line.num(pos, SIGNATURE_LENGTH_WIDTH) as usize;
        pos += SIGNATURE_LENGTH_WIDTH;
        line.require(Self::NAME, pos + signature_len + IMAGE_LENGTH_WIDTH)?;
        let digital_signature = line.bytes(pos, signature_len).to_vec();
        pos += signature_len;

        let image_len = line.num(pos, IMAGE_LENGTH_WIDTH) as usize;
        pos += IMAGE_LENGTH_WIDTH;
        line.require(Self::NAME, pos + image_len)?;
        let image_data = line.bytes(pos, image_len).to_vec();

        Ok(Self {
            ece_institution_routing_number: line.string(2, 9),
            bundle_business_date: line.date(11),
            cycle_number: line.alpha(19, 2),
            ece_institution_item_sequence_number: line.alpha(21, 15),
            security_originator_name: line.alpha(36, 16),
            security_authenticator_name: line.alpha(52, 16),
            security_key_name: line.alpha(68, 16),
            clipping_origin: line.alpha(84, 1),
            clipping_coordinate_h1: line.string(85, 4),
            clipping_coordinate_h2: line.string(89, 4),
            clipping_coordinate_v1: line.string(93, 4),
            clipping_coordinate_v2: line.string(97, 4),
            image_reference_key,
            digital_signature,
            image_data,
        })
    }

    fn write(&self, out: &mut LineBuilder) {
        out.text(Self::RECORD_TYPE)
            .string(&self.ece_institution_routing_number, 9)
            .date(&self.bundle_business_date)
            .alpha(&self.cycle_number, 2)
            .alpha(&self.ece_institution_item_sequence_number, 15)
            .alpha(&self.security_originator_name, 16)
            .alpha(&self.security_authenticator_name, 16)
            .alpha(&self.security_key_name, 16)
            .alpha(&self.clipping_origin, 1)
            .string(&self.clipping_coordinate_h1, 4)
            .string(&self.clipping_coordinate_h2, 4)
            .string(&self.clipping_coordinate_v1, 4)
            .string(&self.clipping_coordinate_v2, 4)
            .numeric(self.length_image_reference_key() as u64, 4)
            .text(&self.image_reference_key)
            .numeric(self.length_digital_signature() as u64, SIGNATURE_LENGTH_WIDTH)
            .raw(&self.digital_signature)
            .numeric(self.length_image_data() as u64, IMAGE_LENGTH_WIDTH)
            .raw(&self.image_data);
    }

    fn validate(&self, opts: &Options) -> Result<(), FieldError> {
        self.field_inclusion()?;
        check(
            "EceInstitutionRoutingNumber",
            &self.ece_institution_routing_number,
            is_numeric(&self.ece_institution_routing_number),
        )?;
        check("CycleNumber", &self.cycle_number, is_alphanumeric(&self.cycle_number))?;
        check(
            "EceInstitutionItemSequenceNumber",
            &self.ece_institution_item_sequence_number,
            is_alphanumeric_special(&self.ece_institution_item_sequence_number),
        )?;
        check(
            "SecurityOriginatorName",
            &self.security_originator_name,
            is_alphanumeric_special(&self.security_originator_name),
        )?;
        check(
            "SecurityAuthenticatorName",
            &self.security_authenticator_name,
            is_alphanumeric_special(&self.security_authenticator_name),
        )?;
        check(
            "SecurityKeyName",
            &self.security_key_name,
            is_alphanumeric_special(&self.security_key_name),
        )?;
        check("ClippingOrigin", &self.clipping_origin, is_clipping_origin(&self.clipping_origin))?;
        for (name, value) in [
            ("ClippingCoordinateH1", &self.clipping_coordinate_h1),
            ("ClippingCoordinateH2", &self.clipping_coordinate_h2),
            ("ClippingCoordinateV1", &self.clipping_coordinate_v1),
            ("ClippingCoordinateV2", &self.clipping_coordinate_v2),
        ] {
            check(name, value, is_numeric(value))?;
        }
        payload_fits(
            "LengthImageReferenceKey",
            self.length_image_reference_key(),
            4,
            opts.max_payload_length,
        )?;
        check(
            "ImageReferenceKey",
            &self.image_reference_key,
            is_alphanumeric_special(&self.image_reference_key),
        )?;
        payload_fits(
            "LengthDigitalSignature",
            self.length_digital_signature(),
            SIGNATURE_LENGTH_WIDTH,
            opts.max_payload_length,
        )?;
        payload_fits(
            "LengthImageData",
            self.length_image_data(),
            IMAGE_LENGTH_WIDTH,
            opts.max_payload_length,
        )
    }
}

/// Image View Analysis Record (type 54).
///
/// Each code is 0 (test not done), 1 (condition present) or 2 (condition
/// not present); the imaging bank specific test also allows 3.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageViewAnalysis {
    pub global_image_quality: u8,
    pub global_image_usability: u8,
    pub imaging_bank_specific_test: u8,
    pub partial_image: u8,
    pub excessive_image_skew: u8,
    pub piggyback_image: u8,
    pub too_light_or_too_dark: u8,
    pub streaks_and_or_bands: u8,
    pub below_minimum_image_size: u8,
    pub exceeds_maximum_image_size: u8,
    #[serde(rename = "imageEnabledPOD")]
    pub image_enabled_pod: u8,
    pub source_document_bad: u8,
    pub date_usability: u8,
    pub payee_usability: u8,
    pub convenience_amount_usability: u8,
    pub amount_in_words_usability: u8,
    pub signature_usability: u8,
    pub payor_name_address_usability: u8,
    pub micr_line_usability: u8,
    pub memo_line_usability: u8,
    pub payor_bank_name_address_usability: u8,
    pub payee_endorsement_usability: u8,
    pub bofd_endorsement_usability: u8,
    pub transit_endorsement_usability: u8,
    pub user_field: String,
}

impl ImageViewAnalysis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Codes in columns 3-12.
    fn quality_codes(&self) -> [(&'static str, u8); 10] {
        [
            ("GlobalImageQuality", self.global_image_quality),
            ("GlobalImageUsability", self.global_image_usability),
            ("ImagingBankSpecificTest", self.imaging_bank_specific_test),
            ("PartialImage", self.partial_image),
            ("ExcessiveImageSkew", self.excessive_image_skew),
            ("PiggybackImage", self.piggyback_image),
            ("TooLightOrTooDark", self.too_light_or_too_dark),
            ("StreaksAndOrBands", self.streaks_and_or_bands),
            ("BelowMinimumImageSize", self.below_minimum_image_size),
            ("ExceedsMaximumImageSize", self.exceeds_maximum_image_size),
        ]
    }

    /// Codes in columns 26-39.
    fn usability_codes(&self) -> [(&'static str, u8); 14] {
        [
            ("ImageEnabledPOD", self.image_enabled_pod),
            ("SourceDocumentBad", self.source_document_bad),
            ("DateUsability", self.date_usability),
            ("PayeeUsability", self.payee_usability),
            ("ConvenienceAmountUsability", self.convenience_amount_usability),
            ("AmountInWordsUsability", self.amount_in_words_usability),
            ("SignatureUsability", self.signature_usability),
            ("PayorNameAddressUsability", self.payor_name_address_usability),
            ("MICRLineUsability", self.micr_line_usability),
            ("MemoLineUsability", self.memo_line_usability),
            ("PayorBankNameAddressUsability", self.payor_bank_name_address_usability),
            ("PayeeEndorsementUsability", self.payee_endorsement_usability),
            ("BOFDEndorsementUsability", self.bofd_endorsement_usability),
            ("TransitEndorsementUsability", self.transit_endorsement_usability),
        ]
    }
}

impl RecordCodec for ImageViewAnalysis {
    const RECORD_TYPE: &'static str = "54";
    const NAME: &'static str = "ImageViewAnalysis";
    const MIN_LENGTH: usize = RECORD_LENGTH;

    fn parse(line: &Line) -> Result<Self, FileError> {
        line.require(Self::NAME, Self::MIN_LENGTH)?;
        expect_type(line, Self::RECORD_TYPE, Self::NAME)?;
        let code = |pos: usize| line.num(pos, 1) as u8;
        Ok(Self {
            global_image_quality: code(2),
            global_image_usability: code(3),
            imaging_bank_specific_test: code(4),
            partial_image: code(5),
            excessive_image_skew: code(6),
            piggyback_image: code(7),
            too_light_or_too_dark: code(8),
            streaks_and_or_bands: code(9),
            below_minimum_image_size: code(10),
            exceeds_maximum_image_size: code(11),
            image_enabled_pod: code(25),
            source_document_bad: code(26),
            date_usability: code(27),
            payee_usability: code(28),
            convenience_amount_usability: code(29),
            amount_in_words_usability: code(30),
            signature_usability: code(31),
            payor_name_address_usability: code(32),
            micr_line_usability: code(33),
            memo_line_usability: code(34),
            payor_bank_name_address_usability: code(35),
            payee_endorsement_usability: code(36),
            bofd_endorsement_usability: code(37),
            transit_endorsement_usability: code(38),
            user_field: line.alpha(45, 20),
        })
    }

    fn write(&self, out: &mut LineBuilder) {
        out.text(Self::RECORD_TYPE);
        for (_, value) in self.quality_codes() {
            out.numeric(u64::from(value), 1);
        }
        out.blank(13);
        for (_, value) in self.usability_codes() {
            out.numeric(u64::from(value), 1);
        }
        out.blank(6).alpha(&self.user_field, 20).blank(15);
    }

    fn validate(&self, _opts: &Options) -> Result<(), FieldError> {
        for (name, value) in self.quality_codes() {
            let result = if name == "ImagingBankSpecificTest" {
                is_bank_specific_test_code(value)
            } else {
                is_image_test_code(value)
            };
            check(name, &value.to_string(), result)?;
        }
        for (name, value) in self.usability_codes() {
            check(name, &value.to_string(), is_image_test_code(value))?;
        }
        check("UserField", &self.user_field, is_alphanumeric_special(&self.user_field))
    }
}
