//! Stream to tree.
//!
//! The reader pulls one record at a time from the framing layer,
//! dispatches on the type code, validates the record and then applies the
//! structural transition for it. Open containers are tracked as indices
//! into the tree being grown.
//!
//! Records are accepted only in the order [`crate::writer`] emits them, and
//! only when their columns encode back to the bytes read, so writing a tree
//! that was read reproduces the input.

use std::io::Read;

use tracing::{debug, info, trace};

use crate::bundle::Bundle;
use crate::cash_letter::CashLetter;
use crate::error::{
    FileError, IclError, MSG_FILE_BUNDLE_INSIDE, MSG_FILE_BUNDLE_OUTSIDE, MSG_FILE_CASH_LETTER_INSIDE,
    MSG_FILE_CASH_LETTER_OUTSIDE, MSG_FILE_CONTROL, MSG_FILE_HEADER, MSG_FILE_ITEM_OUTSIDE,
    MSG_FILE_ORDER, MSG_NOT_CANONICAL, MSG_RECORD_TYPE, Result,
};
use crate::field::{Line, LineBuilder};
use crate::file::File;
use crate::framing::RecordReader;
use crate::options::Options;
use crate::records::{CheckDetail, IclRecord, ReturnDetail, UserRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Item {
    Check(usize),
    Return(usize),
}

/// Body sections of a cash letter, in emission order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
enum Section {
    #[default]
    Header,
    UserRecords,
    Credits,
    CreditItems,
    Bundles,
    RoutingSummaries,
}

/// Parts of a check or return, in emission order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
enum Part {
    #[default]
    Detail,
    AddendumA,
    AddendumB,
    AddendumC,
    AddendumD,
    Views,
    UserRecords,
}

/// Image views are written as detail, data, analysis for view 0, then
/// view 1 and so on; a view record's slot is its index and kind.
const VIEW_DETAIL: usize = 0;
const VIEW_DATA: usize = 1;
const VIEW_ANALYSIS: usize = 2;

#[derive(Debug, Clone, Copy, Default)]
struct Cursor {
    cash_letter: Option<usize>,
    bundle: Option<usize>,
    item: Option<Item>,
    section: Section,
    /// Part, view index, view kind.
    part: (Part, usize, usize),
    views: [usize; 3],
}

impl Cursor {
    fn open_item(&mut self, item: Item) {
        self.item = Some(item);
        self.part = Default::default();
        self.views = [0; 3];
    }
}

fn structural(record_name: &str, msg: &str) -> IclError {
    FileError::new(record_name, msg).into()
}

/// Moves `at` forward to `next`; going back is an ordering error.
fn advance<K: Ord + Copy>(at: &mut K, next: K, record_name: &str) -> Result<()> {
    if next < *at {
        return Err(structural(record_name, MSG_FILE_ORDER));
    }
    *at = next;
    Ok(())
}

/// Appends a record to the open check or return.
macro_rules! push_to_item {
    ($reader:expr, $name:expr, $field:ident, $record:expr) => {
        match $reader.cursor.item {
            Some(Item::Check(_)) => $reader.check($name)?.$field.push($record),
            Some(Item::Return(_)) => $reader.return_detail($name)?.$field.push($record),
            None => return Err(structural($name, MSG_FILE_ITEM_OUTSIDE)),
        }
    };
}

/// Reads an ICL stream into a [`File`].
pub struct Reader<R: Read> {
    records: RecordReader<R>,
    opts: Options,
    file: File,
    cursor: Cursor,
    header_seen: bool,
    control_seen: bool,
}

impl<R: Read> Reader<R> {
    pub fn new(inner: R, opts: Options) -> Self {
        Self {
            records: RecordReader::new(inner, &opts),
            opts,
            file: File::default(),
            cursor: Cursor::default(),
            header_seen: false,
            control_seen: false,
        }
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// The tree as far as it was read. After an error this is what came
    /// before the failing record; it is not a valid file.
    pub fn partial(&self) -> &File {
        &self.file
    }

    /// Number of records taken from the stream so far.
    pub fn records_read(&self) -> usize {
        self.records.records_read()
    }

    /// Read to the end of the stream. Stops at the first error, leaving
    /// the tree read so far in [`Reader::partial`].
    pub fn read(&mut self) -> Result<File> {
        let translator = self.opts.translator();
        while let Some(bytes) = self.records.next_record()? {
            let record = IclRecord::parse(&Line::new(&bytes, translator))?;
            trace!(
                record = self.records.records_read(),
                record_type = record.record_type(),
                len = bytes.len(),
                "record"
            );
            self.apply(record, &bytes)?;
        }
        if !self.control_seen {
            return Err(structural("FileControl", MSG_FILE_CONTROL));
        }
        info!(
            records = self.records.records_read(),
            cash_letters = self.file.cash_letters.len(),
            "file read"
        );
        Ok(std::mem::take(&mut self.file))
    }

    fn apply(&mut self, record: IclRecord, bytes: &[u8]) -> Result<()> {
        let name = record.name();
        if self.control_seen {
            return Err(match record {
                IclRecord::FileHeader(_) => structural(name, MSG_FILE_HEADER),
                _ => structural(name, MSG_FILE_CONTROL),
            });
        }
        if !self.header_seen && !matches!(record, IclRecord::FileHeader(_)) {
            return Err(structural(name, MSG_FILE_HEADER));
        }
        if self.opts.is_dstu() && matches!(record, IclRecord::CreditItem(_)) {
            return Err(structural(name, &format!("{MSG_RECORD_TYPE} \"62\" in DSTU X9.37")));
        }
        record.validate(&self.opts)?;
        self.check_canonical(&record, bytes)?;

        match record {
            IclRecord::FileHeader(h) => {
                if self.header_seen {
                    return Err(structural(name, MSG_FILE_HEADER));
                }
                self.file.file_header = h;
                self.header_seen = true;
            }
            IclRecord::CashLetterHeader(h) => {
                if self.cursor.cash_letter.is_some() {
                    return Err(structural(name, MSG_FILE_CASH_LETTER_INSIDE));
                }
                debug!(cash_letter = %h.cash_letter_id, "cash letter opened");
                self.file.cash_letters.push(CashLetter::new(h));
                self.cursor = Cursor {
                    cash_letter: Some(self.file.cash_letters.len() - 1),
                    ..Default::default()
                };
            }
            IclRecord::BundleHeader(h) => {
                if self.cursor.bundle.is_some() {
                    return Err(structural(name, MSG_FILE_BUNDLE_INSIDE));
                }
                advance(&mut self.cursor.section, Section::Bundles, name)?;
                debug!(bundle = %h.bundle_sequence_number, "bundle opened");
                let cl = self.cash_letter(name)?;
                cl.bundles.push(Bundle::new(h));
                let idx = cl.bundles.len() - 1;
                self.cursor.bundle = Some(idx);
                self.cursor.item = None;
            }
            IclRecord::CheckDetail(cd) => {
                let bundle = self.bundle(name)?;
                bundle.checks.push(cd);
                let idx = bundle.checks.len() - 1;
                self.cursor.open_item(Item::Check(idx));
            }
            IclRecord::CheckDetailAddendumA(a) => {
                self.item_part(Part::AddendumA, name)?;
                self.check(name)?.check_detail_addendum_a.push(a)
            }
            IclRecord::CheckDetailAddendumB(b) => {
                self.item_part(Part::AddendumB, name)?;
                self.check(name)?.check_detail_addendum_b.push(b)
            }
            IclRecord::CheckDetailAddendumC(c) => {
                self.item_part(Part::AddendumC, name)?;
                self.check(name)?.check_detail_addendum_c.push(c)
            }
            IclRecord::ReturnDetail(rd) => {
                let bundle = self.bundle(name)?;
                bundle.returns.push(rd);
                let idx = bundle.returns.len() - 1;
                self.cursor.open_item(Item::Return(idx));
            }
            IclRecord::ReturnDetailAddendumA(a) => {
                self.item_part(Part::AddendumA, name)?;
                self.return_detail(name)?.return_detail_addendum_a.push(a)
            }
            IclRecord::ReturnDetailAddendumB(b) => {
                self.item_part(Part::AddendumB, name)?;
                self.return_detail(name)?.return_detail_addendum_b.push(b)
            }
            IclRecord::ReturnDetailAddendumC(c) => {
                self.item_part(Part::AddendumC, name)?;
                self.return_detail(name)?.return_detail_addendum_c.push(c)
            }
            IclRecord::ReturnDetailAddendumD(d) => {
                self.item_part(Part::AddendumD, name)?;
                self.return_detail(name)?.return_detail_addendum_d.push(d)
            }
            IclRecord::ImageViewDetail(r) => {
                self.view_slot(VIEW_DETAIL, name)?;
                push_to_item!(self, name, image_view_detail, r)
            }
            IclRecord::ImageViewData(r) => {
                self.view_slot(VIEW_DATA, name)?;
                push_to_item!(self, name, image_view_data, r)
            }
            IclRecord::ImageViewAnalysis(r) => {
                self.view_slot(VIEW_ANALYSIS, name)?;
                push_to_item!(self, name, image_view_analysis, r)
            }
            IclRecord::Credit(c) => {
                if self.cursor.bundle.is_some() {
                    return Err(structural(name, MSG_FILE_BUNDLE_INSIDE));
                }
                advance(&mut self.cursor.section, Section::Credits, name)?;
                self.cash_letter(name)?.credits.push(c);
            }
            IclRecord::CreditItem(c) => {
                if self.cursor.bundle.is_some() {
                    return Err(structural(name, MSG_FILE_BUNDLE_INSIDE));
                }
                advance(&mut self.cursor.section, Section::CreditItems, name)?;
                self.cash_letter(name)?.credit_items.push(c);
            }
            IclRecord::User(u) => self.attach_user_record(name, u)?,
            IclRecord::BundleControl(bc) => {
                let opts = self.opts.clone();
                let bundle = self.bundle(name)?;
                bundle.bundle_control = bc;
                bundle.validate(&opts)?;
                debug!(
                    bundle = %bundle.bundle_header.bundle_sequence_number,
                    items = bundle.item_count(),
                    "bundle closed"
                );
                self.cursor.bundle = None;
                self.cursor.item = None;
            }
            IclRecord::RoutingNumberSummary(s) => {
                if self.cursor.bundle.is_some() {
                    return Err(structural(name, MSG_FILE_BUNDLE_INSIDE));
                }
                advance(&mut self.cursor.section, Section::RoutingSummaries, name)?;
                self.cash_letter(name)?.routing_number_summary.push(s);
            }
            IclRecord::CashLetterControl(c) => {
                if self.cursor.bundle.is_some() {
                    return Err(structural(name, MSG_FILE_BUNDLE_INSIDE));
                }
                let opts = self.opts.clone();
                let cl = self.cash_letter(name)?;
                cl.cash_letter_control = c;
                cl.validate(&opts)?;
                debug!(
                    cash_letter = %cl.cash_letter_header.cash_letter_id,
                    bundles = cl.bundles.len(),
                    "cash letter closed"
                );
                self.cursor = Cursor::default();
            }
            IclRecord::FileControl(c) => {
                if self.cursor.cash_letter.is_some() {
                    return Err(structural(name, MSG_FILE_CASH_LETTER_INSIDE));
                }
                self.file.file_control = c;
                self.control_seen = true;
                self.file.validate_file_control(&self.opts)?;
            }
        }
        Ok(())
    }

    /// A 68 record belongs to the innermost open container.
    fn attach_user_record(&mut self, name: &str, record: UserRecord) -> Result<()> {
        if self.cursor.item.is_some() {
            self.item_part(Part::UserRecords, name)?;
            push_to_item!(self, name, user_records, record);
        } else if self.cursor.bundle.is_some() {
            self.bundle(name)?.user_records.push(record);
        } else {
            advance(&mut self.cursor.section, Section::UserRecords, name)?;
            self.cash_letter(name)?.user_records.push(record);
        }
        Ok(())
    }

    fn item_part(&mut self, part: Part, name: &str) -> Result<()> {
        advance(&mut self.cursor.part, (part, 0, 0), name)
    }

    fn view_slot(&mut self, kind: usize, name: &str) -> Result<()> {
        let index = self.cursor.views[kind];
        advance(&mut self.cursor.part, (Part::Views, index, kind), name)?;
        self.cursor.views[kind] += 1;
        Ok(())
    }

    /// The record must encode back to the bytes it was read from. Under FRB
    /// compatibility the comparison is on decoded text, since NUL and EO
    /// fill bytes decode as spaces.
    fn check_canonical(&self, record: &IclRecord, bytes: &[u8]) -> Result<()> {
        let translator = self.opts.translator();
        let mut out = LineBuilder::new(translator);
        record.as_record().write_to(&mut out);
        let encoded = out.finish();
        let same = if self.opts.frb_compatibility {
            translator.decode(&encoded) == translator.decode(bytes)
        } else {
            encoded == bytes
        };
        if !same {
            return Err(structural(record.name(), MSG_NOT_CANONICAL));
        }
        Ok(())
    }

    fn cash_letter(&mut self, name: &str) -> Result<&mut CashLetter> {
        let Some(idx) = self.cursor.cash_letter else {
            return Err(structural(name, MSG_FILE_CASH_LETTER_OUTSIDE));
        };
        self.file
            .cash_letters
            .get_mut(idx)
            .ok_or_else(|| structural(name, MSG_FILE_CASH_LETTER_OUTSIDE))
    }

    fn bundle(&mut self, name: &str) -> Result<&mut Bundle> {
        let Some(idx) = self.cursor.bundle else {
            return Err(structural(name, MSG_FILE_BUNDLE_OUTSIDE));
        };
        self.cash_letter(name)?
            .bundles
            .get_mut(idx)
            .ok_or_else(|| structural(name, MSG_FILE_BUNDLE_OUTSIDE))
    }

    fn check(&mut self, name: &str) -> Result<&mut CheckDetail> {
        let Some(Item::Check(idx)) = self.cursor.item else {
            return Err(structural(name, MSG_FILE_ITEM_OUTSIDE));
        };
        self.bundle(name)?
            .checks
            .get_mut(idx)
            .ok_or_else(|| structural(name, MSG_FILE_ITEM_OUTSIDE))
    }

    fn return_detail(&mut self, name: &str) -> Result<&mut ReturnDetail> {
        let Some(Item::Return(idx)) = self.cursor.item else {
            return Err(structural(name, MSG_FILE_ITEM_OUTSIDE));
        };
        self.bundle(name)?
            .returns
            .get_mut(idx)
            .ok_or_else(|| structural(name, MSG_FILE_ITEM_OUTSIDE))
    }
}

/// Read a whole stream with the given options.
pub fn read<R: Read>(inner: R, opts: &Options) -> Result<File> {
    Reader::new(inner, opts.clone()).read()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::bundle::tests::{addendum_a, check, header, image_detail};
    use crate::cash_letter::tests::cash_letter_header;
    use crate::file::tests::file_header;
    use crate::ebcdic::Translator;
    use crate::records::{
        BundleControl, CheckDetailAddendumB, Credit, CreditItem, ImageViewData, RecordCodec,
        RoutingNumberSummary, UserGeneral,
    };

    fn lines(records: &[String]) -> Vec<u8> {
        let mut out = String::new();
        for r in records {
            out.push_str(r);
            out.push('\n');
        }
        out.into_bytes()
    }

    fn built() -> File {
        let mut bundle = Bundle::new(header());
        bundle.add_check_detail(check());
        let mut cl = CashLetter::new(cash_letter_header());
        cl.add_bundle(bundle);
        let mut file = File::new(file_header());
        file.add_cash_letter(cl);
        file.create(&Options::default()).unwrap();
        file
    }

    /// 01 10 20 25 70 90 99, one line each.
    fn minimal() -> Vec<String> {
        let translator = Translator::ascii();
        built()
            .records()
            .iter()
            .map(|r| {
                let mut out = LineBuilder::new(translator);
                r.write_to(&mut out);
                translator.decode(&out.finish())
            })
            .collect()
    }

    #[test]
    fn test_reads_minimal_stream() {
        let file = read(lines(&minimal()).as_slice(), &Options::default()).unwrap();
        assert_eq!(file.cash_letters.len(), 1);
        let bundle = &file.cash_letters[0].bundles[0];
        assert_eq!(bundle.checks.len(), 1);
        assert_eq!(bundle.checks[0].item_amount, 100000);
        assert_eq!(file.file_control.total_record_count, 7);
    }

    #[test]
    fn test_addendum_outside_item() {
        let mut records = minimal();
        records.insert(3, crate::bundle::tests::addendum_a().format());
        let data = lines(&records);
        let mut reader = Reader::new(data.as_slice(), Options::default());
        let err = reader.read().unwrap_err();
        assert_eq!(err.as_file().unwrap().msg, MSG_FILE_ITEM_OUTSIDE);
        assert_eq!(reader.partial().cash_letters[0].bundles.len(), 1);
    }

    #[test]
    fn test_nested_cash_letter_header() {
        let mut records = minimal();
        records.insert(2, cash_letter_header().format());
        let err = read(lines(&records).as_slice(), &Options::default()).unwrap_err();
        assert_eq!(err.as_file().unwrap().msg, MSG_FILE_CASH_LETTER_INSIDE);
    }

    #[test]
    fn test_check_outside_bundle() {
        let mut records = minimal();
        records.remove(2);
        let err = read(lines(&records).as_slice(), &Options::default()).unwrap_err();
        assert_eq!(err.as_file().unwrap().msg, MSG_FILE_BUNDLE_OUTSIDE);
    }

    #[test]
    fn test_missing_file_control() {
        let mut records = minimal();
        records.pop();
        let err = read(lines(&records).as_slice(), &Options::default()).unwrap_err();
        assert_eq!(err.as_file().unwrap().msg, MSG_FILE_CONTROL);
    }

    #[test]
    fn test_second_header_after_control() {
        let mut records = minimal();
        records.push(file_header().format());
        let err = read(lines(&records).as_slice(), &Options::default()).unwrap_err();
        assert_eq!(err.as_file().unwrap().msg, MSG_FILE_HEADER);
    }

    #[test]
    fn test_bundle_totals_checked_on_close() {
        let mut records = minimal();
        let mut bc: BundleControl = built().cash_letters[0].bundles[0].bundle_control.clone();
        bc.bundle_items_count = 2;
        records[4] = bc.format();
        let err = read(lines(&records).as_slice(), &Options::default()).unwrap_err();
        assert_eq!(err.as_bundle().unwrap().field_name, "BundleItemsCount");
    }

    #[test]
    fn test_field_error_stops_read() {
        let mut records = minimal();
        let mut cd = check();
        cd.bofd_indicator = "X".to_string();
        records[3] = cd.format();
        let err = read(lines(&records).as_slice(), &Options::default()).unwrap_err();
        assert_eq!(err.as_field().unwrap().field_name, "BOFDIndicator");
    }

    #[test]
    fn test_user_record_attaches_to_innermost() {
        let user = UserGeneral {
            user_record_format_type: "002".to_string(),
            user_data: b"note".to_vec(),
            ..Default::default()
        };
        let mut records = minimal();
        // after the check, then after the bundle header, then after the cash letter header
        records.insert(4, user.format());
        records.insert(3, user.format());
        records.insert(2, user.format());
        let mut fc = built().file_control;
        fc.total_record_count = 10;
        records[9] = fc.format();
        let file = read(lines(&records).as_slice(), &Options::default()).unwrap();
        let cl = &file.cash_letters[0];
        assert_eq!(cl.user_records.len(), 1);
        assert_eq!(cl.bundles[0].user_records.len(), 1);
        assert_eq!(cl.bundles[0].checks[0].user_records.len(), 1);
    }

    fn user() -> UserGeneral {
        UserGeneral {
            user_record_format_type: "002".to_string(),
            user_data: b"note".to_vec(),
            ..Default::default()
        }
    }

    fn credit() -> Credit {
        Credit {
            payor_bank_routing_number: "031300012".to_string(),
            credit_account_number_on_us: "5558881".to_string(),
            item_amount: 100,
            ece_institution_item_sequence_number: "1".to_string(),
            ..Default::default()
        }
    }

    fn credit_item() -> CreditItem {
        CreditItem {
            posting_bank_routing_number: "031300012".to_string(),
            credit_item_sequence_number: "1".to_string(),
            ..Default::default()
        }
    }

    fn routing_summary() -> RoutingNumberSummary {
        RoutingNumberSummary {
            cash_letter_routing_number: "231380104".to_string(),
            routing_number_total_amount: 100000,
            routing_number_item_count: 1,
            ..Default::default()
        }
    }

    fn addendum_b() -> CheckDetailAddendumB {
        CheckDetailAddendumB {
            image_reference_key_indicator: "1".to_string(),
            microfilm_archive_sequence_number: "1A".to_string(),
            length_image_reference_key: 4,
            image_reference_key: "0".to_string(),
            ..Default::default()
        }
    }

    fn image_data() -> ImageViewData {
        ImageViewData {
            ece_institution_routing_number: "121042882".to_string(),
            bundle_business_date: NaiveDate::from_ymd_opt(2018, 10, 30).into(),
            cycle_number: "1".to_string(),
            ece_institution_item_sequence_number: "1".to_string(),
            clipping_origin: "0".to_string(),
            image_data: vec![0x49, 0x49, 0x2A, 0x00],
            ..Default::default()
        }
    }

    /// Reads `records` and returns the error the first out-of-place one raises.
    fn order_error(records: &[String]) -> FileError {
        let err = read(lines(records).as_slice(), &Options::default()).unwrap_err();
        match err {
            IclError::File(fe) => fe,
            other => panic!("expected a structural error, got {other}"),
        }
    }

    #[test]
    fn test_routing_summary_before_bundle() {
        let mut records = minimal();
        records.insert(2, routing_summary().format());
        let fe = order_error(&records);
        assert_eq!((fe.field_name.as_str(), fe.msg.as_str()), ("BundleHeader", MSG_FILE_ORDER));
    }

    #[test]
    fn test_credit_after_bundle() {
        for late in [credit().format(), credit_item().format()] {
            let mut records = minimal();
            // after the 70
            records.insert(5, late);
            assert_eq!(order_error(&records).msg, MSG_FILE_ORDER);
        }
    }

    #[test]
    fn test_credit_inside_bundle() {
        let mut records = minimal();
        records.insert(3, credit().format());
        let fe = order_error(&records);
        assert_eq!((fe.field_name.as_str(), fe.msg.as_str()), ("Credit", MSG_FILE_BUNDLE_INSIDE));
    }

    #[test]
    fn test_credit_item_before_credit() {
        let mut records = minimal();
        records.insert(2, credit().format());
        records.insert(2, credit_item().format());
        let fe = order_error(&records);
        assert_eq!((fe.field_name.as_str(), fe.msg.as_str()), ("Credit", MSG_FILE_ORDER));
    }

    #[test]
    fn test_cash_letter_user_record_after_bundle() {
        let mut records = minimal();
        records.insert(5, user().format());
        assert_eq!(order_error(&records).msg, MSG_FILE_ORDER);
    }

    #[test]
    fn test_cash_letter_user_record_after_credit() {
        let mut records = minimal();
        records.insert(2, user().format());
        records.insert(2, credit().format());
        assert_eq!(order_error(&records).msg, MSG_FILE_ORDER);
    }

    #[test]
    fn test_addendum_b_before_addendum_a() {
        let mut records = minimal();
        records.insert(4, addendum_a().format());
        records.insert(4, addendum_b().format());
        let fe = order_error(&records);
        assert_eq!(
            (fe.field_name.as_str(), fe.msg.as_str()),
            ("CheckDetailAddendumA", MSG_FILE_ORDER)
        );
    }

    #[test]
    fn test_addendum_after_image_view() {
        let mut records = minimal();
        records.insert(4, addendum_a().format());
        records.insert(4, image_detail().format());
        assert_eq!(order_error(&records).msg, MSG_FILE_ORDER);
    }

    #[test]
    fn test_image_data_before_detail() {
        let mut records = minimal();
        records.insert(4, image_detail().format());
        records.insert(4, image_data().format());
        let fe = order_error(&records);
        assert_eq!((fe.field_name.as_str(), fe.msg.as_str()), ("ImageViewDetail", MSG_FILE_ORDER));
    }

    #[test]
    fn test_image_views_grouped_by_kind() {
        let mut records = minimal();
        // 50 50 52: the second detail would be written after the first data
        records.insert(4, image_data().format());
        records.insert(4, image_detail().format());
        records.insert(4, image_detail().format());
        let fe = order_error(&records);
        assert_eq!((fe.field_name.as_str(), fe.msg.as_str()), ("ImageViewData", MSG_FILE_ORDER));
    }

    #[test]
    fn test_item_user_record_before_image_view() {
        let mut records = minimal();
        records.insert(4, image_detail().format());
        records.insert(4, user().format());
        assert_eq!(order_error(&records).msg, MSG_FILE_ORDER);
    }

    #[test]
    fn test_padded_amount_is_not_canonical() {
        let mut records = minimal();
        let line = records[3].clone();
        assert_eq!(&line[47..57], "0000100000");
        records[3] = format!("{}    100000{}", &line[..47], &line[57..]);
        let fe = order_error(&records);
        assert_eq!((fe.field_name.as_str(), fe.msg.as_str()), ("CheckDetail", MSG_NOT_CANONICAL));
    }

    #[test]
    fn test_trailing_bytes_are_not_canonical() {
        let mut records = minimal();
        records[3].push_str("XX");
        assert_eq!(order_error(&records).msg, MSG_NOT_CANONICAL);
    }

    #[test]
    fn test_every_section_writes_back_identically() {
        let mut bundle = Bundle::new(header());
        let mut cd = check();
        cd.check_detail_addendum_a.push(addendum_a());
        cd.check_detail_addendum_b.push(addendum_b());
        for _ in 0..2 {
            cd.image_view_detail.push(image_detail());
            cd.image_view_data.push(image_data());
        }
        cd.user_records.push(user().into());
        cd.recount_addenda();
        bundle.add_check_detail(cd);
        bundle.user_records.push(user().into());

        let mut cl = CashLetter::new(cash_letter_header());
        cl.add_user_record(user());
        cl.add_credit(credit());
        cl.add_credit_item(credit_item());
        cl.add_bundle(bundle);
        cl.add_routing_number_summary(routing_summary());
        let mut file = File::new(file_header());
        file.add_cash_letter(cl);
        file.create(&Options::default()).unwrap();

        let bytes = crate::writer::write(Vec::new(), &file, &Options::default()).unwrap();
        let read_back = read(bytes.as_slice(), &Options::default()).unwrap();
        assert_eq!(read_back, file);
        let again = crate::writer::write(Vec::new(), &read_back, &Options::default()).unwrap();
        assert_eq!(again, bytes);
    }
}
