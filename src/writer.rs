//! Tree to stream.

use std::io::Write;

use tracing::{info, trace};

use crate::error::Result;
use crate::field::LineBuilder;
use crate::file::File;
use crate::framing::RecordWriter;
use crate::options::Options;

/// Writes a built [`File`] in canonical record order.
pub struct Writer<W: Write> {
    records: RecordWriter<W>,
    opts: Options,
}

impl<W: Write> Writer<W> {
    pub fn new(inner: W, opts: Options) -> Self {
        Self {
            records: RecordWriter::new(inner, &opts),
            opts,
        }
    }

    /// Validate the tree, then emit every record. Nothing is written when
    /// validation fails.
    pub fn write(&mut self, file: &File) -> Result<()> {
        file.validate(&self.opts)?;
        let translator = self.opts.translator();
        for record in file.records() {
            let mut out = LineBuilder::new(translator);
            record.write_to(&mut out);
            let bytes = out.finish();
            trace!(record_type = record.record_type(), len = bytes.len(), "record");
            self.records.write_record(&bytes)?;
        }
        self.records.flush()?;
        info!(records = self.records.records_written(), "file written");
        Ok(())
    }

    pub fn records_written(&self) -> usize {
        self.records.records_written()
    }

    pub fn into_inner(self) -> W {
        self.records.into_inner()
    }
}

/// Write a whole file with the given options.
pub fn write<W: Write>(inner: W, file: &File, opts: &Options) -> Result<W> {
    let mut writer = Writer::new(inner, opts.clone());
    writer.write(file)?;
    Ok(writer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::Bundle;
    use crate::bundle::tests::{check, header};
    use crate::cash_letter::CashLetter;
    use crate::cash_letter::tests::cash_letter_header;
    use crate::file::tests::file_header;
    use crate::options::Framing;
    use crate::reader::read;

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

    #[test]
    fn test_writes_one_line_per_record() {
        let out = write(Vec::new(), &built(), &Options::default()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines.iter().all(|l| l.len() == 80));
        assert!(lines[0].starts_with("0135T231380104"));
        assert!(lines[6].starts_with("99"));
    }

    #[test]
    fn test_invalid_tree_writes_nothing() {
        let mut file = built();
        file.file_control.total_item_count = 9;
        let mut writer = Writer::new(Vec::new(), Options::default());
        assert!(writer.write(&file).is_err());
        assert_eq!(writer.records_written(), 0);
        assert!(writer.into_inner().is_empty());
    }

    #[test]
    fn test_round_trip_under_each_mode() {
        let file = built();
        for opts in [
            Options::default(),
            Options::default().ebcdic(),
            Options::default().with_framing(Framing::VariableLength),
            Options::default().ebcdic().variable_line_length(),
        ] {
            let out = write(Vec::new(), &file, &opts).unwrap();
            assert_eq!(read(out.as_slice(), &opts).unwrap(), file);
        }
    }
}
