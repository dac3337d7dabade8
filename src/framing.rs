//! Record boundaries.
//!
//! Under fixed framing the two-byte type code decides how many bytes a
//! record takes: 80 for most types, 100 for 62, and for 52 and 68 the
//! length fields inside the record are read as they arrive. Under
//! variable framing each record is preceded by a big-endian `u32` byte
//! count. Either way a record longer than `Options::buffer_size` is
//! refused before it is read, and a stream that ends inside a record is
//! an error rather than a short record.

use std::io::{self, BufRead, BufReader, Read, Write};

use crate::ebcdic::Translator;
use crate::error::{
    FileError, IclError, MSG_LINE_TOO_LONG, MSG_PAYLOAD_TOO_LARGE, MSG_UNEXPECTED_EOF, Result,
};
use crate::field::Line;
use crate::options::{Framing, Options};
use crate::records::RECORD_LENGTH;
use crate::records::credit_item::CREDIT_ITEM_LENGTH;
use crate::records::image_view::{
    IMAGE_LENGTH_WIDTH, IMAGE_VIEW_DATA_PREFIX, SIGNATURE_LENGTH_WIDTH,
};
use crate::records::user::{USER_DATA_LENGTH_WIDTH, USER_PREFIX_LENGTH};

/// Size of the variable framing length prefix.
pub const LENGTH_PREFIX: usize = 4;

fn unexpected_eof(have: usize, want: usize) -> IclError {
    FileError::new("Record", format!("{MSG_UNEXPECTED_EOF} ({have} of {want} bytes)")).into()
}

fn line_too_long(len: usize, max: usize) -> IclError {
    FileError::new("RecordLength", format!("{MSG_LINE_TOO_LONG}: {len} > {max}")).into()
}

/// Splits a byte stream into raw records.
pub struct RecordReader<R: Read> {
    inner: BufReader<R>,
    framing: Framing,
    translator: Translator,
    buffer_size: usize,
    max_payload_length: usize,
    records_read: usize,
}

impl<R: Read> RecordReader<R> {
    pub fn new(inner: R, opts: &Options) -> Self {
        Self {
            inner: BufReader::new(inner),
            framing: opts.framing,
            translator: opts.translator(),
            buffer_size: opts.buffer_size,
            max_payload_length: opts.max_payload_length,
            records_read: 0,
        }
    }

    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// The next record's bytes, or `None` at a clean end of input.
    pub fn next_record(&mut self) -> Result<Option<Vec<u8>>> {
        let record = match self.framing {
            Framing::Fixed => self.next_fixed()?,
            Framing::VariableLength => self.next_variable()?,
        };
        if record.is_some() {
            self.records_read += 1;
        }
        Ok(record)
    }

    fn next_variable(&mut self) -> Result<Option<Vec<u8>>> {
        let mut prefix = [0u8; LENGTH_PREFIX];
        let got = self.read_some(&mut prefix)?;
        if got == 0 {
            return Ok(None);
        }
        if got < LENGTH_PREFIX {
            return Err(unexpected_eof(got, LENGTH_PREFIX));
        }
        let len = u32::from_be_bytes(prefix) as usize;
        let mut buf = Vec::new();
        self.fill(&mut buf, len)?;
        Ok(Some(buf))
    }

    fn next_fixed(&mut self) -> Result<Option<Vec<u8>>> {
        self.skip_line_breaks()?;
        let mut buf = Vec::with_capacity(RECORD_LENGTH);
        if self.inner.fill_buf()?.is_empty() {
            return Ok(None);
        }
        self.fill(&mut buf, 2)?;
        let record_type = self.translator.decode(&buf);
        match record_type.as_str() {
            "52" => self.fill_image_view_data(&mut buf)?,
            "62" => self.fill(&mut buf, CREDIT_ITEM_LENGTH)?,
            "68" => {
                self.fill(&mut buf, USER_PREFIX_LENGTH)?;
                let len = self.declared(
                    &buf,
                    USER_PREFIX_LENGTH - USER_DATA_LENGTH_WIDTH,
                    USER_DATA_LENGTH_WIDTH,
                );
                self.check_payload("UserGeneral", len)?;
                self.fill(&mut buf, USER_PREFIX_LENGTH + len)?;
            }
            _ => self.fill(&mut buf, RECORD_LENGTH)?,
        }
        Ok(Some(buf))
    }

    /// Reads a 52 record segment by segment, checking each declared length.
    fn fill_image_view_data(&mut self, buf: &mut Vec<u8>) -> Result<()> {
        self.fill(buf, IMAGE_VIEW_DATA_PREFIX + SIGNATURE_LENGTH_WIDTH)?;
        let key_len = self.declared(buf, IMAGE_VIEW_DATA_PREFIX - 4, 4);
        let mut end = IMAGE_VIEW_DATA_PREFIX + key_len;
        self.fill(buf, end + SIGNATURE_LENGTH_WIDTH)?;

        let signature_len = self.declared(buf, end, SIGNATURE_LENGTH_WIDTH);
        self.check_payload("ImageViewData", signature_len)?;
        end += SIGNATURE_LENGTH_WIDTH + signature_len;
        self.fill(buf, end + IMAGE_LENGTH_WIDTH)?;

        let image_len = self.declared(buf, end, IMAGE_LENGTH_WIDTH);
        self.check_payload("ImageViewData", image_len)?;
        end += IMAGE_LENGTH_WIDTH + image_len;
        self.fill(buf, end)
    }

    fn declared(&self, buf: &[u8], pos: usize, width: usize) -> usize {
        Line::new(buf, self.translator).num(pos, width) as usize
    }

    fn check_payload(&self, record_name: &str, len: usize) -> Result<()> {
        if len > self.max_payload_length {
            return Err(FileError::new(
                record_name,
                format!("{MSG_PAYLOAD_TOO_LARGE} ({len} > {})", self.max_payload_length),
            )
            .into());
        }
        Ok(())
    }

    /// Grow `buf` to exactly `target` bytes from the stream.
    fn fill(&mut self, buf: &mut Vec<u8>, target: usize) -> Result<()> {
        if target > self.buffer_size {
            return Err(line_too_long(target, self.buffer_size));
        }
        let start = buf.len();
        if target <= start {
            return Ok(());
        }
        buf.resize(target, 0);
        let got = self.read_some(&mut buf[start..])?;
        if start + got < target {
            return Err(unexpected_eof(start + got, target));
        }
        Ok(())
    }

    /// `read_exact` that reports how far it got instead of failing.
    fn read_some(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut got = 0;
        while got < buf.len() {
            match self.inner.read(&mut buf[got..]) {
                Ok(0) => break,
                Ok(n) => got += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(got)
    }

    fn skip_line_breaks(&mut self) -> Result<()> {
        let translator = self.translator;
        loop {
            let buf = self.inner.fill_buf()?;
            if buf.is_empty() {
                return Ok(());
            }
            let breaks = buf
                .iter()
                .take_while(|&&b| translator.is_line_break(b))
                .count();
            let whole = breaks == buf.len();
            self.inner.consume(breaks);
            if !whole {
                return Ok(());
            }
        }
    }
}

/// Writes raw records with the configured framing.
pub struct RecordWriter<W: Write> {
    inner: W,
    framing: Framing,
    newline: Option<u8>,
    records_written: usize,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W, opts: &Options) -> Self {
        let newline = opts.line_terminator.then(|| opts.translator().newline());
        Self {
            inner,
            framing: opts.framing,
            newline,
            records_written: 0,
        }
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    pub fn write_record(&mut self, record: &[u8]) -> Result<()> {
        match self.framing {
            Framing::VariableLength => {
                let len = u32::try_from(record.len())
                    .map_err(|_| line_too_long(record.len(), u32::MAX as usize))?;
                self.inner.write_all(&len.to_be_bytes())?;
                self.inner.write_all(record)?;
            }
            Framing::Fixed => {
                self.inner.write_all(record)?;
                if let Some(newline) = self.newline {
                    self.inner.write_all(&[newline])?;
                }
            }
        }
        self.records_written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{FileControl, ImageViewData, RecordCodec, UserGeneral};

    fn read_all(bytes: &[u8], opts: &Options) -> Result<Vec<Vec<u8>>> {
        let mut reader = RecordReader::new(bytes, opts);
        let mut out = Vec::new();
        while let Some(record) = reader.next_record()? {
            out.push(record);
        }
        Ok(out)
    }

    fn write_all(records: &[Vec<u8>], opts: &Options) -> Vec<u8> {
        let mut writer = RecordWriter::new(Vec::new(), opts);
        for record in records {
            writer.write_record(record).unwrap();
        }
        writer.into_inner()
    }

    fn sample_records(translator: Translator) -> Vec<Vec<u8>> {
        let image = ImageViewData {
            image_reference_key: "KEY".to_string(),
            digital_signature: vec![b'\n', 0x25, 0x15],
            image_data: (0..=255u8).rev().collect(),
            ..Default::default()
        };
        let user = UserGeneral {
            user_record_format_type: "002".to_string(),
            user_data: b"\r\n opaque".to_vec(),
            ..Default::default()
        };
        vec![
            FileControl::default().encode(translator),
            image.encode(translator),
            user.encode(translator),
            FileControl::default().encode(translator),
        ]
    }

    #[test]
    fn test_fixed_with_newlines() {
        let opts = Options::default();
        let records = sample_records(opts.translator());
        let bytes = write_all(&records, &opts);
        assert_eq!(bytes[80], b'\n');
        assert_eq!(read_all(&bytes, &opts).unwrap(), records);
    }

    #[test]
    fn test_fixed_without_newlines_ebcdic() {
        let opts = Options::default().ebcdic().with_line_terminator(false);
        let records = sample_records(opts.translator());
        let bytes = write_all(&records, &opts);
        let total: usize = records.iter().map(Vec::len).sum();
        assert_eq!(bytes.len(), total);
        assert_eq!(read_all(&bytes, &opts).unwrap(), records);
    }

    #[test]
    fn test_crlf_between_records() {
        let opts = Options::default();
        let record = FileControl::default().encode(opts.translator());
        let mut bytes = record.clone();
        bytes.extend_from_slice(b"\r\n\r\n");
        bytes.extend_from_slice(&record);
        bytes.extend_from_slice(b"\r\n");
        assert_eq!(read_all(&bytes, &opts).unwrap(), vec![record.clone(), record]);
    }

    #[test]
    fn test_variable_prefix() {
        let opts = Options::default().variable_line_length();
        let records = sample_records(opts.translator());
        let bytes = write_all(&records, &opts);
        assert_eq!(&bytes[..4], &[0, 0, 0, 80]);
        assert_eq!(read_all(&bytes, &opts).unwrap(), records);
    }

    #[test]
    fn test_variable_line_too_long() {
        let opts = Options::default().variable_line_length().with_buffer_size(100);
        let mut bytes = 200u32.to_be_bytes().to_vec();
        bytes.extend(std::iter::repeat_n(b' ', 200));
        let err = read_all(&bytes, &opts).unwrap_err();
        assert!(err.as_file().unwrap().msg.contains("line too long"));
    }

    #[test]
    fn test_short_read_is_structural() {
        let opts = Options::default();
        let record = FileControl::default().encode(opts.translator());
        let err = read_all(&record[..50], &opts).unwrap_err();
        assert!(err.as_file().unwrap().msg.contains("unexpected end of file"));

        let opts = opts.variable_line_length();
        let err = read_all(&[0, 0], &opts).unwrap_err();
        assert!(err.as_file().is_some());
    }

    #[test]
    fn test_declared_payload_cap() {
        let opts = Options::default().with_max_payload_length(16);
        let image = ImageViewData {
            image_data: vec![0; 32],
            ..Default::default()
        };
        let bytes = image.encode(opts.translator());
        let err = read_all(&bytes, &opts).unwrap_err();
        let file = err.as_file().unwrap();
        assert_eq!(file.field_name, "ImageViewData");
        assert!(file.msg.contains("exceeds the configured maximum"));
    }
}
