//! Bundles: a header, the items between it and its control, and the
//! cross-record rules that tie them together.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{
    BundleError, MSG_ADDENDUM_CAP, MSG_ADDENDUM_COUNT, MSG_BUNDLE_MIXED, MSG_CONTROL_MISMATCH,
    Result,
};
use crate::options::Options;
use crate::records::check_detail::{
    CHECK_ADDENDUM_A_CAP, CHECK_ADDENDUM_B_CAP, CHECK_ADDENDUM_C_CAP,
};
use crate::records::return_detail::{
    RETURN_ADDENDUM_A_CAP, RETURN_ADDENDUM_B_CAP, RETURN_ADDENDUM_C_CAP, RETURN_ADDENDUM_D_CAP,
};
use crate::records::{
    AnyRecord, BundleControl, BundleHeader, CheckDetail, ImageViewAnalysis, ImageViewData,
    ImageViewDetail, RecordCodec, ReturnDetail, UserRecord,
};

/// Totals a [`BundleControl`] must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BundleTotals {
    pub items: u32,
    pub amount: u64,
    pub micr_valid_amount: u64,
    pub images: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Bundle {
    pub bundle_header: BundleHeader,
    pub user_records: Vec<UserRecord>,
    pub checks: Vec<CheckDetail>,
    pub returns: Vec<ReturnDetail>,
    pub bundle_control: BundleControl,
}

type Rule = std::result::Result<(), BundleError>;

fn cap(seq: &str, field_name: &str, present: usize, max: usize) -> Rule {
    if present > max {
        return Err(BundleError::new(
            seq,
            field_name,
            format!("{MSG_ADDENDUM_CAP} ({present} > {max})"),
        ));
    }
    Ok(())
}

fn addendum_count(seq: &str, declared: u32, present: u32) -> Rule {
    if declared != present {
        return Err(BundleError::new(
            seq,
            "AddendumCount",
            format!("{MSG_ADDENDUM_COUNT} ({declared} != {present})"),
        ));
    }
    Ok(())
}

fn control(seq: &str, field_name: &str, declared: u64, computed: u64) -> Rule {
    if declared != computed {
        return Err(BundleError::new(
            seq,
            field_name,
            format!("{MSG_CONTROL_MISMATCH} ({declared} != {computed})"),
        ));
    }
    Ok(())
}

/// Field checks for the image views and user records an item owns.
fn validate_views(
    details: &[ImageViewDetail],
    data: &[ImageViewData],
    analysis: &[ImageViewAnalysis],
    user_records: &[UserRecord],
    opts: &Options,
) -> Result<()> {
    for d in details {
        d.validate(opts)?;
    }
    for d in data {
        d.validate(opts)?;
    }
    for a in analysis {
        a.validate(opts)?;
    }
    for u in user_records {
        u.validate(opts)?;
    }
    Ok(())
}

/// Image views of one item in emission order: 50, 52, 54 per view index.
fn push_views<'a>(
    out: &mut Vec<&'a dyn AnyRecord>,
    details: &'a [ImageViewDetail],
    data: &'a [ImageViewData],
    analysis: &'a [ImageViewAnalysis],
) {
    let views = details.len().max(data.len()).max(analysis.len());
    for i in 0..views {
        if let Some(d) = details.get(i) {
            out.push(d);
        }
        if let Some(d) = data.get(i) {
            out.push(d);
        }
        if let Some(a) = analysis.get(i) {
            out.push(a);
        }
    }
}

impl Bundle {
    pub fn new(bundle_header: BundleHeader) -> Self {
        Self {
            bundle_header,
            ..Default::default()
        }
    }

    pub fn sequence_number(&self) -> &str {
        &self.bundle_header.bundle_sequence_number
    }

    pub fn add_check_detail(&mut self, check: CheckDetail) {
        self.checks.push(check);
    }

    pub fn add_return_detail(&mut self, ret: ReturnDetail) {
        self.returns.push(ret);
    }

    pub fn add_user_record(&mut self, record: impl Into<UserRecord>) {
        self.user_records.push(record.into());
    }

    pub fn item_count(&self) -> usize {
        self.checks.len() + self.returns.len()
    }

    /// Totals recomputed from the items.
    pub fn totals(&self) -> BundleTotals {
        let mut totals = BundleTotals::default();
        for check in &self.checks {
            totals.items += 1;
            totals.amount += check.item_amount;
            totals.images += check.image_view_detail.len() as u32;
            if check.is_micr_valid() {
                totals.micr_valid_amount += check.item_amount;
            }
        }
        for ret in &self.returns {
            totals.items += 1;
            totals.amount += ret.item_amount;
            totals.images += ret.image_view_detail.len() as u32;
        }
        totals
    }

    /// Everything except the control totals: the header, the single-kind
    /// rule, addendum caps and counts, then every owned record.
    fn validate_contents(&self, opts: &Options) -> Result<()> {
        let seq = self.sequence_number();
        if !self.checks.is_empty() && !self.returns.is_empty() {
            return Err(BundleError::new(seq, "Checks", MSG_BUNDLE_MIXED).into());
        }
        self.bundle_header.validate(opts)?;
        for u in &self.user_records {
            u.validate(opts)?;
        }

        for check in &self.checks {
            for (name, present, max) in [
                ("CheckDetailAddendumA", check.check_detail_addendum_a.len(), CHECK_ADDENDUM_A_CAP),
                ("CheckDetailAddendumB", check.check_detail_addendum_b.len(), CHECK_ADDENDUM_B_CAP),
                ("CheckDetailAddendumC", check.check_detail_addendum_c.len(), CHECK_ADDENDUM_C_CAP),
            ] {
                cap(seq, name, present, max)?;
            }
            addendum_count(seq, check.addendum_count, check.addenda_present())?;

            check.validate(opts)?;
            for a in &check.check_detail_addendum_a {
                a.validate(opts)?;
            }
            for b in &check.check_detail_addendum_b {
                b.validate(opts)?;
            }
            for c in &check.check_detail_addendum_c {
                c.validate(opts)?;
            }
            validate_views(
                &check.image_view_detail,
                &check.image_view_data,
                &check.image_view_analysis,
                &check.user_records,
                opts,
            )?;
        }

        for ret in &self.returns {
            for (name, present, max) in [
                ("ReturnDetailAddendumA", ret.return_detail_addendum_a.len(), RETURN_ADDENDUM_A_CAP),
                ("ReturnDetailAddendumB", ret.return_detail_addendum_b.len(), RETURN_ADDENDUM_B_CAP),
                ("ReturnDetailAddendumC", ret.return_detail_addendum_c.len(), RETURN_ADDENDUM_C_CAP),
                ("ReturnDetailAddendumD", ret.return_detail_addendum_d.len(), RETURN_ADDENDUM_D_CAP),
            ] {
                cap(seq, name, present, max)?;
            }
            addendum_count(seq, ret.addendum_count, ret.addenda_present())?;

            ret.validate(opts)?;
            for a in &ret.return_detail_addendum_a {
                a.validate(opts)?;
            }
            for b in &ret.return_detail_addendum_b {
                b.validate(opts)?;
            }
            for c in &ret.return_detail_addendum_c {
                c.validate(opts)?;
            }
            for d in &ret.return_detail_addendum_d {
                d.validate(opts)?;
            }
            validate_views(
                &ret.image_view_detail,
                &ret.image_view_data,
                &ret.image_view_analysis,
                &ret.user_records,
                opts,
            )?;
        }
        Ok(())
    }

    fn validate_control(&self, opts: &Options) -> Result<()> {
        self.bundle_control.validate(opts)?;
        let seq = self.sequence_number();
        let totals = self.totals();
        let bc = &self.bundle_control;
        control(seq, "BundleItemsCount", bc.bundle_items_count.into(), totals.items.into())?;
        control(seq, "BundleTotalAmount", bc.bundle_total_amount, totals.amount)?;
        control(
            seq,
            "MICRValidTotalAmount",
            bc.micr_valid_total_amount,
            totals.micr_valid_amount,
        )?;
        control(seq, "BundleImagesCount", bc.bundle_images_count.into(), totals.images.into())?;
        Ok(())
    }

    /// Full check of a bundle as read or as built.
    pub fn validate(&self, opts: &Options) -> Result<()> {
        self.validate_contents(opts)?;
        self.validate_control(opts)
    }

    /// Validate the contents, then rewrite the control totals from them.
    pub fn build(&mut self, opts: &Options) -> Result<()> {
        self.validate_contents(opts)?;
        let totals = self.totals();
        let bc = &mut self.bundle_control;
        bc.bundle_items_count = totals.items;
        bc.bundle_total_amount = totals.amount;
        bc.micr_valid_total_amount = totals.micr_valid_amount;
        bc.bundle_images_count = totals.images;
        debug!(
            bundle = %self.bundle_header.bundle_sequence_number,
            items = totals.items,
            amount = totals.amount,
            images = totals.images,
            "bundle built"
        );
        self.validate_control(opts)
    }

    /// Records in emission order, header through control.
    pub fn records(&self) -> Vec<&dyn AnyRecord> {
        let mut out: Vec<&dyn AnyRecord> = vec![&self.bundle_header];
        for u in &self.user_records {
            out.push(u);
        }
        for check in &self.checks {
            out.push(check);
            for a in &check.check_detail_addendum_a {
                out.push(a);
            }
            for b in &check.check_detail_addendum_b {
                out.push(b);
            }
            for c in &check.check_detail_addendum_c {
                out.push(c);
            }
            push_views(
                &mut out,
                &check.image_view_detail,
                &check.image_view_data,
                &check.image_view_analysis,
            );
            for u in &check.user_records {
                out.push(u);
            }
        }
        for ret in &self.returns {
            out.push(ret);
            for a in &ret.return_detail_addendum_a {
                out.push(a);
            }
            for b in &ret.return_detail_addendum_b {
                out.push(b);
            }
            for c in &ret.return_detail_addendum_c {
                out.push(c);
            }
            for d in &ret.return_detail_addendum_d {
                out.push(d);
            }
            push_views(
                &mut out,
                &ret.image_view_detail,
                &ret.image_view_data,
                &ret.image_view_analysis,
            );
            for u in &ret.user_records {
                out.push(u);
            }
        }
        out.push(&self.bundle_control);
        out
    }
}
