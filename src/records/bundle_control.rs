//! Bundle Control Record (type 70).

use serde::{Deserialize, Serialize};

use super::{RECORD_LENGTH, RecordCodec, expect_type};
use crate::error::{FieldError, FileError};
use crate::field::{Line, LineBuilder};
use crate::options::Options;
use crate::validators::*;

/// Totals over one bundle, recomputed by `Bundle::build`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BundleControl {
    pub bundle_items_count: u32,
    pub bundle_total_amount: u64,
    pub micr_valid_total_amount: u64,
    pub bundle_images_count: u32,
    pub user_field: String,
    pub credit_total_indicator: String,
}

impl BundleControl {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordCodec for BundleControl {
    const RECORD_TYPE: &'static str = "70";
    const NAME: &'static str = "BundleControl";
    const MIN_LENGTH: usize = RECORD_LENGTH;

    fn parse(line: &Line) -> Result<Self, FileError> {
        line.require(Self::NAME, Self::MIN_LENGTH)?;
        expect_type(line, Self::RECORD_TYPE, Self::NAME)?;
        Ok(Self {
            bundle_items_count: line.num(2, 4) as u32,
            bundle_total_amount: line.num(6, 12),
            micr_valid_total_amount: line.num(18, 12),
            bundle_images_count: line.num(30, 5) as u32,
            user_field: line.alpha(35, 20),
            credit_total_indicator: line.alpha(55, 1),
        })
    }

    fn write(&self, out: &mut LineBuilder) {
        out.text(Self::RECORD_TYPE)
            .numeric(u64::from(self.bundle_items_count), 4)
            .numeric(self.bundle_total_amount, 12)
            .numeric(self.micr_valid_total_amount, 12)
            .numeric(u64::from(self.bundle_images_count), 5)
            .alpha(&self.user_field, 20)
            .alpha(&self.credit_total_indicator, 1)
            .blank(24);
    }

    fn validate(&self, _opts: &Options) -> Result<(), FieldError> {
        fits("BundleItemsCount", u64::from(self.bundle_items_count), 4)?;
        fits("BundleTotalAmount", self.bundle_total_amount, 12)?;
        fits("MICRValidTotalAmount", self.micr_valid_total_amount, 12)?;
        fits("BundleImagesCount", u64::from(self.bundle_images_count), 5)?;
        check("UserField", &self.user_field, is_alphanumeric_special(&self.user_field))?;
        check(
            "CreditTotalIndicator",
            &self.credit_total_indicator,
            is_credit_total_indicator(&self.credit_total_indicator),
        )
    }
}
