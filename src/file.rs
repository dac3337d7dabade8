//! The file tree: header, cash letters, control.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cash_letter::CashLetter;
use crate::error::{FileError, MSG_CONTROL_MISMATCH, MSG_FILE_CASH_LETTER_OUTSIDE, Result};
use crate::options::Options;
use crate::records::{AnyRecord, FileControl, FileHeader, RecordCodec};

/// Totals a [`FileControl`] must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileTotals {
    pub cash_letters: u32,
    pub records: u32,
    pub items: u32,
    pub amount: u64,
}

/// An Image Cash Letter file.
///
/// ```
/// use icl_rs::{File, Options};
/// use icl_rs::records::FileHeader;
///
/// let file = File::new(FileHeader::new());
/// assert!(file.cash_letters.is_empty());
/// // The header and control always count.
/// assert_eq!(file.totals().records, 2);
/// assert!(file.validate(&Options::default()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct File {
    pub file_header: FileHeader,
    pub cash_letters: Vec<CashLetter>,
    pub file_control: FileControl,
}

impl File {
    pub fn new(file_header: FileHeader) -> Self {
        Self {
            file_header,
            ..Default::default()
        }
    }

    pub fn add_cash_letter(&mut self, cash_letter: CashLetter) {
        self.cash_letters.push(cash_letter);
    }

    /// Every record in emission order.
    pub fn records(&self) -> Vec<&dyn AnyRecord> {
        let mut out: Vec<&dyn AnyRecord> = vec![&self.file_header];
        for cl in &self.cash_letters {
            out.extend(cl.records());
        }
        out.push(&self.file_control);
        out
    }

    pub fn totals(&self) -> FileTotals {
        let mut totals = FileTotals {
            cash_letters: self.cash_letters.len() as u32,
            records: self.records().len() as u32,
            ..Default::default()
        };
        for cl in &self.cash_letters {
            totals.items += cl.cash_letter_control.cash_letter_items_count;
            totals.amount += cl.cash_letter_control.cash_letter_total_amount;
        }
        totals
    }

    fn validate_control(&self, opts: &Options) -> Result<()> {
        let control = &self.file_control;
        control.validate(opts)?;
        let totals = self.totals();
        for (name, declared, computed) in [
            (
                "CashLetterCount",
                u64::from(control.cash_letter_count),
                u64::from(totals.cash_letters),
            ),
            (
                "TotalRecordCount",
                u64::from(control.total_record_count),
                u64::from(totals.records),
            ),
            (
                "TotalItemCount",
                u64::from(control.total_item_count),
                u64::from(totals.items),
            ),
            ("FileTotalAmount", control.file_total_amount, totals.amount),
        ] {
            if declared != computed {
                return Err(FileError::new(
                    name,
                    format!("{MSG_CONTROL_MISMATCH} ({declared} != {computed})"),
                )
                .into());
            }
        }
        Ok(())
    }

    /// Checks the control record against the cash letters already read.
    /// Used by the reader once the last record arrives.
    pub(crate) fn validate_file_control(&self, opts: &Options) -> Result<()> {
        if self.cash_letters.is_empty() {
            return Err(FileError::new("CashLetter", MSG_FILE_CASH_LETTER_OUTSIDE).into());
        }
        self.validate_control(opts)
    }

    /// Full check of the tree: every record, every cross-record rule, and
    /// every control total. Nothing is recomputed.
    pub fn validate(&self, opts: &Options) -> Result<()> {
        self.file_header.validate(opts)?;
        for cl in &self.cash_letters {
            cl.validate_all(opts)?;
        }
        self.validate_file_control(opts)
    }

    /// Recompute every control record from the tree, innermost first, and
    /// validate the result. After this the writer treats the tree as
    /// read-only.
    pub fn create(&mut self, opts: &Options) -> Result<()> {
        self.file_header.validate(opts)?;
        if self.cash_letters.is_empty() {
            return Err(FileError::new("CashLetter", MSG_FILE_CASH_LETTER_OUTSIDE).into());
        }
        for cl in &mut self.cash_letters {
            cl.build(opts)?;
        }
        let totals = self.totals();
        let control = &mut self.file_control;
        control.cash_letter_count = totals.cash_letters;
        control.total_record_count = totals.records;
        control.total_item_count = totals.items;
        control.file_total_amount = totals.amount;
        info!(
            cash_letters = totals.cash_letters,
            records = totals.records,
            items = totals.items,
            amount = totals.amount,
            "file created"
        );
        self.validate_control(opts)?;
        debug!("file control validated");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::*;
    use crate::bundle::Bundle;
    use crate::bundle::tests::{check, header};
    use crate::cash_letter::tests::cash_letter_header;

    pub(crate) fn file_header() -> FileHeader {
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

    fn small_file() -> File {
        let mut bundle = Bundle::new(header());
        bundle.add_check_detail(check());
        let mut cl = CashLetter::new(cash_letter_header());
        cl.add_bundle(bundle);
        let mut file = File::new(file_header());
        file.add_cash_letter(cl);
        file
    }

    #[test]
    fn test_create_fills_file_control() {
        let mut file = small_file();
        file.create(&Options::default()).unwrap();
        let fc = &file.file_control;
        assert_eq!(fc.cash_letter_count, 1);
        // 01 10 20 25 70 90 99
        assert_eq!(fc.total_record_count, 7);
        assert_eq!(fc.total_item_count, 1);
        assert_eq!(fc.file_total_amount, 100000);
        assert!(file.validate(&Options::default()).is_ok());
    }

    #[test]
    fn test_create_requires_cash_letter() {
        let mut file = File::new(file_header());
        let err = file.create(&Options::default()).unwrap_err();
        assert!(err.as_file().is_some());
    }

    #[test]
    fn test_total_record_count_mismatch() {
        let mut file = small_file();
        file.create(&Options::default()).unwrap();
        file.file_control.total_record_count = 8;
        let err = file.validate(&Options::default()).unwrap_err();
        assert_eq!(err.as_file().unwrap().field_name, "TotalRecordCount");
    }

    #[test]
    fn test_canonical_order() {
        let mut file = small_file();
        file.create(&Options::default()).unwrap();
        let types: Vec<&str> = file.records().iter().map(|r| r.record_type()).collect();
        assert_eq!(types, ["01", "10", "20", "25", "70", "90", "99"]);
    }
}
