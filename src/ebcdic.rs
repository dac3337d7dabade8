//! ASCII / EBCDIC (IBM-1047) translation for record text.
//!
//! Text fields are translated one byte at a time. Opaque payloads (image
//! data, digital signatures, user data) never pass through here; the
//! record codecs read and write them with `Line::bytes` and
//! `LineBuilder::raw`.

use std::sync::OnceLock;

use crate::options::Encoding;

/// EBCDIC substitute character, written for characters with no mapping.
pub const EBCDIC_SUB: u8 = 0x3F;

/// EBCDIC space.
pub const EBCDIC_SPACE: u8 = 0x40;

/// Byte written in ASCII mode for characters outside U+0000..U+00FF.
pub const ASCII_SUB: u8 = b'?';

/// IBM-1047 to Unicode.
#[rustfmt::skip]
pub const EBCDIC_TO_UNICODE_1047: [char; 256] = [
    // 0x00-0x0F
    '\u{0000}', '\u{0001}', '\u{0002}', '\u{0003}', '\u{009C}', '\u{0009}', '\u{0086}', '\u{007F}',
    '\u{0097}', '\u{008D}', '\u{008E}', '\u{000B}', '\u{000C}', '\u{000D}', '\u{000E}', '\u{000F}',
    // 0x10-0x1F: 0x15 = LF
    '\u{0010}', '\u{0011}', '\u{0012}', '\u{0013}', '\u{009D}', '\u{000A}', '\u{0008}', '\u{0087}',
    '\u{0018}', '\u{0019}', '\u{0092}', '\u{008F}', '\u{001C}', '\u{001D}', '\u{001E}', '\u{001F}',
    // 0x20-0x2F: 0x25 = NEL
    '\u{0080}', '\u{0081}', '\u{0082}', '\u{0083}', '\u{0084}', '\u{0085}', '\u{0017}', '\u{001B}',
    '\u{0088}', '\u{0089}', '\u{008A}', '\u{008B}', '\u{008C}', '\u{0005}', '\u{0006}', '\u{0007}',
    // 0x30-0x3F
    '\u{0090}', '\u{0091}', '\u{0016}', '\u{0093}', '\u{0094}', '\u{0095}', '\u{0096}', '\u{0004}',
    '\u{0098}', '\u{0099}', '\u{009A}', '\u{009B}', '\u{0014}', '\u{0015}', '\u{009E}', '\u{001A}',
    // 0x40-0x4F
    '\u{0020}', '\u{00A0}', '\u{00E2}', '\u{00E4}', '\u{00E0}', '\u{00E1}', '\u{00E3}', '\u{00E5}',
    '\u{00E7}', '\u{00F1}', '\u{00A2}', '\u{002E}', '\u{003C}', '\u{0028}', '\u{002B}', '\u{007C}',
    // 0x50-0x5F
    '\u{0026}', '\u{00E9}', '\u{00EA}', '\u{00EB}', '\u{00E8}', '\u{00ED}', '\u{00EE}', '\u{00EF}',
    '\u{00EC}', '\u{00DF}', '\u{0021}', '\u{0024}', '\u{002A}', '\u{0029}', '\u{003B}', '\u{005E}',
    // 0x60-0x6F
    '\u{002D}', '\u{002F}', '\u{00C2}', '\u{00C4}', '\u{00C0}', '\u{00C1}', '\u{00C3}', '\u{00C5}',
    '\u{00C7}', '\u{00D1}', '\u{00A6}', '\u{002C}', '\u{0025}', '\u{005F}', '\u{003E}', '\u{003F}',
    // 0x70-0x7F
    '\u{00F8}', '\u{00C9}', '\u{00CA}', '\u{00CB}', '\u{00C8}', '\u{00CD}', '\u{00CE}', '\u{00CF}',
    '\u{00CC}', '\u{0060}', '\u{003A}', '\u{0023}', '\u{0040}', '\u{0027}', '\u{003D}', '\u{0022}',
    // 0x80-0x8F
    '\u{00D8}', '\u{0061}', '\u{0062}', '\u{0063}', '\u{0064}', '\u{0065}', '\u{0066}', '\u{0067}',
    '\u{0068}', '\u{0069}', '\u{00AB}', '\u{00BB}', '\u{00F0}', '\u{00FD}', '\u{00FE}', '\u{00B1}',
    // 0x90-0x9F
    '\u{00B0}', '\u{006A}', '\u{006B}', '\u{006C}', '\u{006D}', '\u{006E}', '\u{006F}', '\u{0070}',
    '\u{0071}', '\u{0072}', '\u{00AA}', '\u{00BA}', '\u{00E6}', '\u{00B8}', '\u{00C6}', '\u{00A4}',
    // 0xA0-0xAF: 0xAD = [
    '\u{00B5}', '\u{007E}', '\u{0073}', '\u{0074}', '\u{0075}', '\u{0076}', '\u{0077}', '\u{0078}',
    '\u{0079}', '\u{007A}', '\u{00A1}', '\u{00BF}', '\u{00D0}', '\u{005B}', '\u{00DE}', '\u{00AE}',
    // 0xB0-0xBF: 0xBD = ]
    '\u{00AC}', '\u{00A3}', '\u{00A5}', '\u{00B7}', '\u{00A9}', '\u{00A7}', '\u{00B6}', '\u{00BC}',
    '\u{00BD}', '\u{00BE}', '\u{00DD}', '\u{00A8}', '\u{00AF}', '\u{005D}', '\u{00B4}', '\u{00D7}',
    // 0xC0-0xCF
    '\u{007B}', '\u{0041}', '\u{0042}', '\u{0043}', '\u{0044}', '\u{0045}', '\u{0046}', '\u{0047}',
    '\u{0048}', '\u{0049}', '\u{00AD}', '\u{00F4}', '\u{00F6}', '\u{00F2}', '\u{00F3}', '\u{00F5}',
    // 0xD0-0xDF
    '\u{007D}', '\u{004A}', '\u{004B}', '\u{004C}', '\u{004D}', '\u{004E}', '\u{004F}', '\u{0050}',
    '\u{0051}', '\u{0052}', '\u{00B9}', '\u{00FB}', '\u{00FC}', '\u{00F9}', '\u{00FA}', '\u{00FF}',
    // 0xE0-0xEF
    '\u{005C}', '\u{00F7}', '\u{0053}', '\u{0054}', '\u{0055}', '\u{0056}', '\u{0057}', '\u{0058}',
    '\u{0059}', '\u{005A}', '\u{00B2}', '\u{00D4}', '\u{00D6}', '\u{00D2}', '\u{00D3}', '\u{00D5}',
    // 0xF0-0xFF
    '\u{0030}', '\u{0031}', '\u{0032}', '\u{0033}', '\u{0034}', '\u{0035}', '\u{0036}', '\u{0037}',
    '\u{0038}', '\u{0039}', '\u{00B3}', '\u{00DB}', '\u{00DC}', '\u{00D9}', '\u{00DA}', '\u{009F}',
];

/// Unicode (U+0000..U+00FF) to IBM-1047, built on first use.
fn unicode_to_1047() -> &'static [u8; 256] {
    static TABLE: OnceLock<[u8; 256]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut reverse = [EBCDIC_SUB; 256];
        for (byte, &ch) in EBCDIC_TO_UNICODE_1047.iter().enumerate() {
            reverse[ch as usize] = byte as u8;
        }
        reverse
    })
}

fn is_control(ch: char) -> bool {
    (ch as u32) < 0x20 || (0x7F..=0x9F).contains(&(ch as u32))
}

/// Decode one IBM-1047 byte.
///
/// Bytes that map to control characters have no text meaning in an ICL
/// record and decode to U+FFFD. With `frb` set, the NUL and EO fill bytes
/// some Federal Reserve files use for blank fields decode as spaces.
pub fn ebcdic_to_unicode(byte: u8, frb: bool) -> char {
    if frb && (byte == 0x00 || byte == 0xFF) {
        return ' ';
    }
    let ch = EBCDIC_TO_UNICODE_1047[byte as usize];
    if is_control(ch) {
        char::REPLACEMENT_CHARACTER
    } else {
        ch
    }
}

/// Encode one character as IBM-1047, substituting 0x3F when unmapped.
pub fn unicode_to_ebcdic(ch: char) -> u8 {
    let code = ch as u32;
    if code > 0xFF {
        return EBCDIC_SUB;
    }
    unicode_to_1047()[code as usize]
}

/// Byte-level text translator bound to one encoding.
///
/// In ASCII mode every byte maps to the `char` with the same code point,
/// so any byte sequence survives a decode/encode round trip. Validators
/// reject non-ASCII characters separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translator {
    encoding: Encoding,
    frb: bool,
}

impl Translator {
    pub fn new(encoding: Encoding, frb: bool) -> Self {
        Self { encoding, frb }
    }

    pub fn ascii() -> Self {
        Self::new(Encoding::Ascii, false)
    }

    pub fn ebcdic() -> Self {
        Self::new(Encoding::Ebcdic, false)
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn decode(&self, bytes: &[u8]) -> String {
        match self.encoding {
            Encoding::Ascii => bytes.iter().map(|&b| b as char).collect(),
            Encoding::Ebcdic => bytes
                .iter()
                .map(|&b| ebcdic_to_unicode(b, self.frb))
                .collect(),
        }
    }

    pub fn encode_char(&self, ch: char) -> u8 {
        match self.encoding {
            Encoding::Ascii => {
                if (ch as u32) <= 0xFF {
                    ch as u8
                } else {
                    ASCII_SUB
                }
            }
            Encoding::Ebcdic => unicode_to_ebcdic(ch),
        }
    }

    pub fn encode_into(&self, text: &str, out: &mut Vec<u8>) {
        out.extend(text.chars().map(|ch| self.encode_char(ch)));
    }

    pub fn encode(&self, text: &str) -> Vec<u8> {
        let mut out = Vec::with_capacity(text.len());
        self.encode_into(text, &mut out);
        out
    }

    /// Record terminator written under fixed framing.
    pub fn newline(&self) -> u8 {
        self.encode_char('\n')
    }

    /// Bytes tolerated between records under fixed framing.
    pub fn is_line_break(&self, byte: u8) -> bool {
        match self.encoding {
            Encoding::Ascii => byte == b'\n' || byte == b'\r',
            Encoding::Ebcdic => byte == 0x15 || byte == 0x25 || byte == 0x0D,
        }
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::ascii()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_and_letters() {
        for (i, expected) in ('0'..='9').enumerate() {
            assert_eq!(ebcdic_to_unicode(0xF0 + i as u8, false), expected);
        }
        for (i, expected) in ('A'..='I').enumerate() {
            assert_eq!(ebcdic_to_unicode(0xC1 + i as u8, false), expected);
        }
        for (i, expected) in ('s'..='z').enumerate() {
            assert_eq!(ebcdic_to_unicode(0xA2 + i as u8, false), expected);
        }
        assert_eq!(ebcdic_to_unicode(EBCDIC_SPACE, false), ' ');
    }

    #[test]
    fn test_1047_brackets() {
        assert_eq!(ebcdic_to_unicode(0xAD, false), '[');
        assert_eq!(ebcdic_to_unicode(0xBD, false), ']');
        assert_eq!(ebcdic_to_unicode(0x5F, false), '^');
        assert_eq!(unicode_to_ebcdic('['), 0xAD);
        assert_eq!(unicode_to_ebcdic(']'), 0xBD);
    }

    #[test]
    fn test_table_is_bijective() {
        for byte in 0..=255u8 {
            let ch = EBCDIC_TO_UNICODE_1047[byte as usize];
            assert_eq!(unicode_to_ebcdic(ch), byte, "byte 0x{byte:02X}");
        }
    }

    #[test]
    fn test_control_bytes_decode_to_replacement() {
        assert_eq!(ebcdic_to_unicode(0x00, false), char::REPLACEMENT_CHARACTER);
        assert_eq!(ebcdic_to_unicode(0x25, false), char::REPLACEMENT_CHARACTER);
        assert_eq!(unicode_to_ebcdic(char::REPLACEMENT_CHARACTER), EBCDIC_SUB);
    }

    #[test]
    fn test_frb_fill_bytes_decode_as_space() {
        assert_eq!(ebcdic_to_unicode(0x00, true), ' ');
        assert_eq!(ebcdic_to_unicode(0xFF, true), ' ');
        assert_eq!(ebcdic_to_unicode(0x37, true), char::REPLACEMENT_CHARACTER);
    }

    #[test]
    fn test_translator_round_trip() {
        let t = Translator::ebcdic();
        let text = "25      123456789 031300012 ABC/xyz-*";
        let encoded = t.encode(text);
        assert_eq!(encoded[0], 0xF2);
        assert_eq!(encoded[1], 0xF5);
        assert_eq!(t.decode(&encoded), text);
    }

    #[test]
    fn test_ascii_translator_is_lossless() {
        let t = Translator::ascii();
        let bytes: Vec<u8> = (0..=255u8).collect();
        let text = t.decode(&bytes);
        assert_eq!(t.encode(&text), bytes);
        assert_eq!(t.encode_char('\u{2603}'), ASCII_SUB);
    }

    #[test]
    fn test_newline_bytes() {
        assert_eq!(Translator::ascii().newline(), b'\n');
        assert_eq!(Translator::ebcdic().newline(), 0x15);
        assert!(Translator::ebcdic().is_line_break(0x25));
        assert!(!Translator::ebcdic().is_line_break(b'\n'));
    }
}
