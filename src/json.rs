//! JSON boundary for the in-memory tree.
//!
//! Field names are camelCase. Dates are written as RFC-3339 midnight UTC
//! (`""` when blank) and read from RFC-3339, `YYYYMMDD` or `YYYY-MM-DD`.
//! Times are `HHMM`. A date or time column holding anything else, such as
//! `00000000`, is carried as its wire text. Image, signature and user-data
//! bytes are base64.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::Result;
use crate::field::{IclDate, IclTime, Stamp, parse_simple_time};
use crate::file::File;

/// Serialize a file tree to pretty JSON.
pub fn to_json(file: &File) -> Result<String> {
    Ok(serde_json::to_string_pretty(file)?)
}

/// Deserialize a file tree. Control records are taken as given; call
/// [`File::create`] to recompute them.
pub fn from_json(json: &str) -> Result<File> {
    Ok(serde_json::from_str(json)?)
}

fn parse_json_date(raw: &str) -> std::result::Result<IclDate, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(IclDate::Blank);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(IclDate::Value(dt.date_naive()));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(IclDate::Value(date));
    }
    // Eight columns of wire text, valid or not, e.g. FRB's `00000000`.
    if raw.chars().count() == IclDate::WIDTH {
        return Ok(IclDate::parse(raw));
    }
    Err(format!("invalid date {raw:?}"))
}

fn parse_json_time(raw: &str) -> std::result::Result<IclTime, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(IclTime::Blank);
    }
    if raw.chars().count() == IclTime::WIDTH {
        return Ok(IclTime::parse(raw));
    }
    let compact = raw.replace(':', "");
    if compact.len() == IclTime::WIDTH
        && let Some(time) = parse_simple_time(&compact)
    {
        return Ok(IclTime::Value(time));
    }
    Err(format!("invalid time {raw:?}"))
}

/// RFC-3339 midnight UTC; blank as `""`; raw columns verbatim.
impl Serialize for IclDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Stamp::Blank => serializer.serialize_str(""),
            Stamp::Value(d) => {
                serializer.serialize_str(&format!("{}T00:00:00Z", d.format("%Y-%m-%d")))
            }
            Stamp::Raw(raw) => serializer.serialize_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for IclDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        parse_json_date(&raw).map_err(de::Error::custom)
    }
}

impl Serialize for IclTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Stamp::Blank => serializer.serialize_str(""),
            _ => serializer.serialize_str(&self.format()),
        }
    }
}

impl<'de> Deserialize<'de> for IclTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        parse_json_time(&raw).map_err(de::Error::custom)
    }
}

/// `#[serde(with = "crate::json::bytes")]`: `Vec<u8>` as a base64 string.
pub mod bytes {
    use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64_STANDARD.encode(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        BASE64_STANDARD
            .decode(raw.trim())
            .map_err(|e| de::Error::custom(format!("invalid base64: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_date_shapes() {
        let expected = IclDate::from(NaiveDate::from_ymd_opt(2018, 10, 30));
        assert_eq!(parse_json_date("2018-10-30T00:00:00Z").unwrap(), expected);
        assert_eq!(parse_json_date("2018-10-30T09:15:00-05:00").unwrap(), expected);
        assert_eq!(parse_json_date("20181030").unwrap(), expected);
        assert_eq!(parse_json_date("2018-10-30").unwrap(), expected);
        assert_eq!(parse_json_date("").unwrap(), IclDate::Blank);
        assert!(parse_json_date("00000000").unwrap().is_zeros());
        assert!(parse_json_date("yesterday").is_err());
    }

    #[test]
    fn test_parse_json_time_shapes() {
        let expected = IclTime::from(chrono::NaiveTime::from_hms_opt(15, 23, 0));
        assert_eq!(parse_json_time("1523").unwrap(), expected);
        assert_eq!(parse_json_time("15:23").unwrap(), expected);
        assert_eq!(parse_json_time("").unwrap(), IclTime::Blank);
        assert!(parse_json_time("25:00").is_err());
    }

    #[test]
    fn test_zero_date_survives_json() {
        let zeros = IclDate::parse("00000000");
        let json = serde_json::to_string(&zeros).unwrap();
        assert_eq!(json, "\"00000000\"");
        assert_eq!(serde_json::from_str::<IclDate>(&json).unwrap(), zeros);
        assert_eq!(serde_json::to_string(&IclDate::Blank).unwrap(), "\"\"");
    }
}
