//! Cash letters: header, cash-letter level records, bundles and control.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bundle::Bundle;
use crate::error::{
    FileError, MSG_CONTROL_MISMATCH, MSG_RECORD_TYPE, MSG_RECORD_TYPE_INDICATOR_N,
    MSG_ROUTING_SUMMARY_RETURNS, Result,
};
use crate::options::Options;
use crate::records::{
    AnyRecord, CashLetterControl, CashLetterHeader, Credit, CreditItem, RecordCodec,
    RoutingNumberSummary, UserRecord,
};
use crate::validators::is_return_collection_type;

/// Totals a [`CashLetterControl`] must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CashLetterTotals {
    pub bundles: u32,
    pub items: u32,
    pub amount: u64,
    pub images: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CashLetter {
    pub cash_letter_header: CashLetterHeader,
    pub user_records: Vec<UserRecord>,
    pub credits: Vec<Credit>,
    pub credit_items: Vec<CreditItem>,
    pub bundles: Vec<Bundle>,
    pub routing_number_summary: Vec<RoutingNumberSummary>,
    pub cash_letter_control: CashLetterControl,
}

impl CashLetter {
    pub fn new(cash_letter_header: CashLetterHeader) -> Self {
        Self {
            cash_letter_header,
            ..Default::default()
        }
    }

    pub fn id(&self) -> &str {
        &self.cash_letter_header.cash_letter_id
    }

    pub fn add_bundle(&mut self, bundle: Bundle) {
        self.bundles.push(bundle);
    }

    pub fn add_credit(&mut self, credit: Credit) {
        self.credits.push(credit);
    }

    pub fn add_credit_item(&mut self, item: CreditItem) {
        self.credit_items.push(item);
    }

    pub fn add_routing_number_summary(&mut self, summary: RoutingNumberSummary) {
        self.routing_number_summary.push(summary);
    }

    pub fn add_user_record(&mut self, record: impl Into<UserRecord>) {
        self.user_records.push(record.into());
    }

    /// Totals from the bundle controls, plus the credits when the control
    /// says they are counted.
    pub fn totals(&self) -> CashLetterTotals {
        let mut totals = CashLetterTotals {
            bundles: self.bundles.len() as u32,
            ..Default::default()
        };
        for bundle in &self.bundles {
            let bc = &bundle.bundle_control;
            totals.items += bc.bundle_items_count;
            totals.amount += bc.bundle_total_amount;
            totals.images += bc.bundle_images_count;
        }
        if self.cash_letter_control.includes_credits() {
            totals.items += (self.credits.len() + self.credit_items.len()) as u32;
            totals.amount += self.credits.iter().map(|c| c.item_amount).sum::<u64>();
            totals.amount += self.credit_items.iter().map(|c| c.item_amount).sum::<u64>();
        }
        totals
    }

    /// Rules that span the cash letter's own records.
    fn validate_structure(&self, opts: &Options) -> Result<()> {
        let header = &self.cash_letter_header;
        if header.record_type_indicator == "N" && !self.bundles.is_empty() {
            return Err(FileError::new("RecordTypeIndicator", MSG_RECORD_TYPE_INDICATOR_N).into());
        }
        if is_return_collection_type(&header.collection_type_indicator)
            && !self.routing_number_summary.is_empty()
        {
            return Err(FileError::new("RoutingNumberSummary", MSG_ROUTING_SUMMARY_RETURNS).into());
        }
        if opts.is_dstu() && !self.credit_items.is_empty() {
            return Err(FileError::new(
                "CreditItem",
                format!("{MSG_RECORD_TYPE} \"62\" in DSTU X9.37"),
            )
            .into());
        }
        Ok(())
    }

    fn validate_records(&self, opts: &Options) -> Result<()> {
        self.cash_letter_header.validate(opts)?;
        self.validate_structure(opts)?;
        for u in &self.user_records {
            u.validate(opts)?;
        }
        for c in &self.credits {
            c.validate(opts)?;
        }
        for c in &self.credit_items {
            c.validate(opts)?;
        }
        for s in &self.routing_number_summary {
            s.validate(opts)?;
        }
        Ok(())
    }

    fn validate_control(&self, opts: &Options) -> Result<()> {
        let control = &self.cash_letter_control;
        control.validate(opts)?;
        let totals = self.totals();
        for (name, declared, computed) in [
            (
                "CashLetterBundleCount",
                u64::from(control.cash_letter_bundle_count),
                u64::from(totals.bundles),
            ),
            (
                "CashLetterItemsCount",
                u64::from(control.cash_letter_items_count),
                u64::from(totals.items),
            ),
            (
                "CashLetterTotalAmount",
                control.cash_letter_total_amount,
                totals.amount,
            ),
            (
                "CashLetterImagesCount",
                u64::from(control.cash_letter_images_count),
                u64::from(totals.images),
            ),
        ] {
            if declared != computed {
                return Err(FileError::new(
                    name,
                    format!(
                        "cash letter {:?}: {MSG_CONTROL_MISMATCH} ({declared} != {computed})",
                        self.id()
                    ),
                )
                .into());
            }
        }
        Ok(())
    }

    /// Checks the cash letter's own records and its control totals. The
    /// reader validates each bundle as it closes, so bundles are not
    /// revisited here; [`CashLetter::validate_all`] includes them.
    pub fn validate(&self, opts: &Options) -> Result<()> {
        self.validate_records(opts)?;
        self.validate_control(opts)
    }

    /// [`CashLetter::validate`] plus every bundle.
    pub fn validate_all(&self, opts: &Options) -> Result<()> {
        self.validate_records(opts)?;
        for bundle in &self.bundles {
            bundle.validate(opts)?;
        }
        self.validate_control(opts)
    }

    /// Build every bundle, then rewrite the control totals.
    pub fn build(&mut self, opts: &Options) -> Result<()> {
        self.validate_records(opts)?;
        for bundle in &mut self.bundles {
            bundle.build(opts)?;
        }
        let totals = self.totals();
        let control = &mut self.cash_letter_control;
        control.cash_letter_bundle_count = totals.bundles;
        control.cash_letter_items_count = totals.items;
        control.cash_letter_total_amount = totals.amount;
        control.cash_letter_images_count = totals.images;
        debug!(
            cash_letter = %self.cash_letter_header.cash_letter_id,
            bundles = totals.bundles,
            items = totals.items,
            amount = totals.amount,
            "cash letter built"
        );
        self.validate_control(opts)
    }

    /// Records in emission order, header through control.
    pub fn records(&self) -> Vec<&dyn AnyRecord> {
        let mut out: Vec<&dyn AnyRecord> = vec![&self.cash_letter_header];
        for u in &self.user_records {
            out.push(u);
        }
        for c in &self.credits {
            out.push(c);
        }
        for c in &self.credit_items {
            out.push(c);
        }
        for bundle in &self.bundles {
            out.extend(bundle.records());
        }
        for s in &self.routing_number_summary {
            out.push(s);
        }
        out.push(&self.cash_letter_control);
        out
    }
}
