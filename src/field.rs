//! Fixed-width field primitives and the record line views.
//!
//! Column positions are 0-based offsets with explicit lengths, the same
//! `(pos, len)` convention used for punch-card style records:
//!
//! ```
//! use icl_rs::field::Line;
//!
//! let line = Line::ascii(b"25      123456789 031300012");
//! assert_eq!(line.text(0, 2), "25");
//! assert_eq!(line.nbsm(2, 15), "123456789");
//! assert_eq!(line.alpha(18, 8), "03130001");
//! ```

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::ebcdic::Translator;
use crate::error::{FileError, MSG_RECORD_LENGTH};

/// Right-aligned, zero-padded decimal. Keeps the rightmost `width` digits
/// when the value is too wide.
pub fn numeric_field(value: u64, width: usize) -> String {
    let s = value.to_string();
    if s.len() > width {
        s[s.len() - width..].to_string()
    } else {
        format!("{s:0>width$}")
    }
}

fn truncate(value: &str, width: usize) -> String {
    value.chars().take(width).collect()
}

/// Left-aligned, blank-padded, truncated to `width`.
pub fn alpha_field(value: &str, width: usize) -> String {
    let value = truncate(value, width);
    format!("{value:<width$}")
}

/// Left zero-padded, truncated to `width`. Empty values stay blank.
pub fn string_field(value: &str, width: usize) -> String {
    if value.is_empty() {
        return " ".repeat(width);
    }
    let value = truncate(value, width);
    format!("{value:0>width$}")
}

/// Right-aligned, blank-padded MICR (nibble/sign/magnitude) field.
pub fn nbsm_field(value: &str, width: usize) -> String {
    let value = truncate(value, width);
    format!("{value:>width$}")
}

/// Parse a numeric field; blanks and garbage read as zero.
pub fn parse_num_field(s: &str) -> u64 {
    let trimmed = s.trim_matches(' ');
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    trimmed.parse().unwrap_or(0)
}

/// Parse a left-aligned field (trailing blanks removed).
pub fn parse_alpha_field(s: &str) -> String {
    s.trim_end_matches(' ').to_string()
}

/// Parse a right-aligned field (leading blanks removed).
pub fn parse_nbsm_field(s: &str) -> String {
    s.trim_start_matches(' ').to_string()
}

/// Parse a zero-padded field. Blank reads as empty; anything else is kept
/// verbatim so [`string_field`] writes it back unchanged.
pub fn parse_string_field(s: &str) -> String {
    if s.trim_matches(' ').is_empty() {
        return String::new();
    }
    s.to_string()
}

/// Strict `YYYYMMDD`. All zeros and invalid dates read as `None`.
pub fn parse_yyyymmdd_date(s: &str) -> Option<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) || s == "00000000" {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y%m%d").ok()
}

/// Strict `HHMM`.
pub fn parse_simple_time(s: &str) -> Option<NaiveTime> {
    if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour: u32 = s[..2].parse().ok()?;
    let minute: u32 = s[2..].parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// A date or time column as it appears on the wire.
///
/// Text that is neither blank nor a valid value stays in `Raw` and writes
/// back unchanged. Validators decide whether a raw column is acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Stamp<T> {
    #[default]
    Blank,
    Value(T),
    Raw(String),
}

/// `YYYYMMDD` column.
pub type IclDate = Stamp<NaiveDate>;
/// `HHMM` column.
pub type IclTime = Stamp<NaiveTime>;

impl<T: Copy> Stamp<T> {
    pub fn value(&self) -> Option<T> {
        match self {
            Stamp::Value(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Stamp::Blank)
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Stamp::Raw(_))
    }
}

impl<T> From<Option<T>> for Stamp<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Stamp::Blank, Stamp::Value)
    }
}

impl Stamp<NaiveDate> {
    pub const WIDTH: usize = 8;

    pub fn parse(s: &str) -> Self {
        if s.trim_matches(' ').is_empty() {
            return Stamp::Blank;
        }
        match parse_yyyymmdd_date(s) {
            Some(date) => Stamp::Value(date),
            None => Stamp::Raw(s.to_string()),
        }
    }

    pub fn format(&self) -> String {
        match self {
            Stamp::Blank => " ".repeat(Self::WIDTH),
            Stamp::Value(d) => d.format("%Y%m%d").to_string(),
            Stamp::Raw(s) => alpha_field(s, Self::WIDTH),
        }
    }

    /// `00000000`, the uninitialised date some FRB producers write.
    pub fn is_zeros(&self) -> bool {
        matches!(self, Stamp::Raw(s) if s == "00000000")
    }
}

impl Stamp<NaiveTime> {
    pub const WIDTH: usize = 4;

    pub fn parse(s: &str) -> Self {
        if s.trim_matches(' ').is_empty() {
            return Stamp::Blank;
        }
        match parse_simple_time(s) {
            Some(time) => Stamp::Value(time),
            None => Stamp::Raw(s.to_string()),
        }
    }

    pub fn format(&self) -> String {
        match self {
            Stamp::Blank => " ".repeat(Self::WIDTH),
            Stamp::Value(t) => format!("{:02}{:02}", t.hour(), t.minute()),
            Stamp::Raw(s) => alpha_field(s, Self::WIDTH),
        }
    }
}

/// Read view over one record's bytes.
///
/// Text accessors translate through the line's [`Translator`]; [`Line::bytes`]
/// returns the untranslated payload.
#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    bytes: &'a [u8],
    translator: Translator,
}

impl<'a> Line<'a> {
    pub fn new(bytes: &'a [u8], translator: Translator) -> Self {
        Self { bytes, translator }
    }

    pub fn ascii(bytes: &'a [u8]) -> Self {
        Self::new(bytes, Translator::ascii())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn translator(&self) -> Translator {
        self.translator
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Fail unless the line holds at least `min` bytes.
    pub fn require(&self, record_name: &str, min: usize) -> Result<(), FileError> {
        if self.bytes.len() < min {
            return Err(FileError::new(
                record_name,
                format!("{MSG_RECORD_LENGTH} ({} < {min})", self.bytes.len()),
            ));
        }
        Ok(())
    }

    /// Raw bytes in `pos..pos + len`, clipped to the line.
    pub fn bytes(&self, pos: usize, len: usize) -> &'a [u8] {
        let start = pos.min(self.bytes.len());
        let end = pos.saturating_add(len).min(self.bytes.len());
        &self.bytes[start..end]
    }

    /// Translated text, untrimmed.
    pub fn text(&self, pos: usize, len: usize) -> String {
        self.translator.decode(self.bytes(pos, len))
    }

    pub fn alpha(&self, pos: usize, len: usize) -> String {
        parse_alpha_field(&self.text(pos, len))
    }

    pub fn nbsm(&self, pos: usize, len: usize) -> String {
        parse_nbsm_field(&self.text(pos, len))
    }

    /// Counterpart of [`LineBuilder::string`].
    pub fn string(&self, pos: usize, len: usize) -> String {
        parse_string_field(&self.text(pos, len))
    }

    pub fn num(&self, pos: usize, len: usize) -> u64 {
        parse_num_field(&self.text(pos, len))
    }

    pub fn date(&self, pos: usize) -> IclDate {
        IclDate::parse(&self.text(pos, IclDate::WIDTH))
    }

    pub fn time(&self, pos: usize) -> IclTime {
        IclTime::parse(&self.text(pos, IclTime::WIDTH))
    }

    /// The two-character record type prefix.
    pub fn record_type(&self) -> String {
        self.text(0, 2)
    }
}

/// Write-side counterpart of [`Line`].
#[derive(Debug, Clone)]
pub struct LineBuilder {
    buf: Vec<u8>,
    translator: Translator,
}

impl LineBuilder {
    pub fn new(translator: Translator) -> Self {
        Self {
            buf: Vec::with_capacity(80),
            translator,
        }
    }

    pub fn translator(&self) -> Translator {
        self.translator
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Text written as-is (no padding).
    pub fn text(&mut self, s: &str) -> &mut Self {
        self.translator.encode_into(s, &mut self.buf);
        self
    }

    pub fn alpha(&mut self, s: &str, width: usize) -> &mut Self {
        self.text(&alpha_field(s, width))
    }

    pub fn string(&mut self, s: &str, width: usize) -> &mut Self {
        self.text(&string_field(s, width))
    }

    pub fn nbsm(&mut self, s: &str, width: usize) -> &mut Self {
        self.text(&nbsm_field(s, width))
    }

    pub fn numeric(&mut self, value: u64, width: usize) -> &mut Self {
        self.text(&numeric_field(value, width))
    }

    pub fn date(&mut self, date: &IclDate) -> &mut Self {
        self.text(&date.format())
    }

    pub fn time(&mut self, time: &IclTime) -> &mut Self {
        self.text(&time.format())
    }

    /// Reserved columns.
    pub fn blank(&mut self, width: usize) -> &mut Self {
        self.text(&" ".repeat(width))
    }

    /// Opaque payload, never translated.
    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_field() {
        assert_eq!(numeric_field(100000, 10), "0000100000");
        assert_eq!(numeric_field(0, 4), "0000");
        assert_eq!(numeric_field(123456, 4), "3456");
    }

    #[test]
    fn test_alpha_field() {
        assert_eq!(alpha_field("A1", 8), "A1      ");
        assert_eq!(alpha_field("TOO LONG VALUE", 3), "TOO");
        assert_eq!(alpha_field("", 2), "  ");
    }

    #[test]
    fn test_string_field() {
        assert_eq!(string_field("31300012", 9), "031300012");
        assert_eq!(string_field("", 9), "         ");
    }

    #[test]
    fn test_nbsm_field() {
        assert_eq!(nbsm_field("123456789", 15), "      123456789");
        assert_eq!(nbsm_field("5558881", 20), "             5558881");
    }

    #[test]
    fn test_parse_num_field() {
        assert_eq!(parse_num_field("0000100000"), 100000);
        assert_eq!(parse_num_field("    "), 0);
        assert_eq!(parse_num_field(" 12 "), 12);
        assert_eq!(parse_num_field("12a4"), 0);
    }

    #[test]
    fn test_parse_string_fields_keep_the_aligned_side() {
        assert_eq!(parse_alpha_field("  AB  "), "  AB");
        assert_eq!(parse_nbsm_field("   12/3 "), "12/3 ");
        assert_eq!(alpha_field(&parse_alpha_field("  AB  "), 6), "  AB  ");
    }

    #[test]
    fn test_dates() {
        let d = parse_yyyymmdd_date("20181030").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2018, 10, 30).unwrap());
        assert_eq!(IclDate::Value(d).format(), "20181030");
        assert_eq!(parse_yyyymmdd_date("00000000"), None);
        assert_eq!(parse_yyyymmdd_date("20181340"), None);
        assert_eq!(parse_yyyymmdd_date("2018103"), None);
        assert_eq!(IclDate::Blank.format(), "        ");
    }

    #[test]
    fn test_date_column_keeps_zeros_apart_from_blanks() {
        let zeros = IclDate::parse("00000000");
        assert!(zeros.is_zeros());
        assert_eq!(zeros.value(), None);
        assert_eq!(zeros.format(), "00000000");

        let blank = IclDate::parse("        ");
        assert!(blank.is_blank());
        assert_eq!(blank.format(), "        ");

        let garbage = IclDate::parse("2018133X");
        assert!(garbage.is_raw());
        assert_eq!(garbage.format(), "2018133X");
        assert_eq!(IclDate::parse("20181030").format(), "20181030");
    }

    #[test]
    fn test_times() {
        let t = parse_simple_time("1523").unwrap();
        assert_eq!(IclTime::Value(t).format(), "1523");
        assert_eq!(parse_simple_time("2460"), None);
        assert_eq!(parse_simple_time("    "), None);
        assert_eq!(IclTime::parse("0000").format(), "0000");
        assert_eq!(IclTime::parse("2460"), IclTime::Raw("2460".to_string()));
        assert_eq!(IclTime::parse("2460").format(), "2460");
        assert_eq!(IclTime::Blank.format(), "    ");
    }

    #[test]
    fn test_string_field_parse_matches_writer() {
        for wire in ["0012", "12  ", "  12", "    ", "031300012"] {
            let width = wire.len();
            assert_eq!(string_field(&parse_string_field(wire), width), wire);
        }
        assert_eq!(parse_string_field("    "), "");
        assert_eq!(Line::ascii(b"5012  ").string(2, 4), "12  ");
    }

    #[test]
    fn test_line_require() {
        let line = Line::ascii(b"25  ");
        assert!(line.require("CheckDetail", 4).is_ok());
        let err = line.require("CheckDetail", 80).unwrap_err();
        assert_eq!(err.field_name, "CheckDetail");
        assert!(err.msg.contains("4 < 80"));
    }

    #[test]
    fn test_line_clips_out_of_range() {
        let line = Line::ascii(b"0123");
        assert_eq!(line.text(2, 10), "23");
        assert_eq!(line.text(10, 2), "");
        assert!(line.bytes(4, 1).is_empty());
    }

    #[test]
    fn test_line_builder_ebcdic_leaves_payload_alone() {
        let mut out = LineBuilder::new(Translator::ebcdic());
        out.text("52").numeric(3, 7).raw(&[0x00, 0x0A, 0xFF]);
        let bytes = out.finish();
        assert_eq!(&bytes[..2], &[0xF5, 0xF2]);
        assert_eq!(&bytes[9..], &[0x00, 0x0A, 0xFF]);
    }
}
