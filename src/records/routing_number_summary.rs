//! Routing Number Summary Record (type 85).

use serde::{Deserialize, Serialize};

use super::{RECORD_LENGTH, RecordCodec, expect_type};
use crate::error::{FieldError, FileError};
use crate::field::{Line, LineBuilder};
use crate::options::Options;
use crate::validators::*;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoutingNumberSummary {
    pub cash_letter_routing_number: String,
    pub routing_number_total_amount: u64,
    pub routing_number_item_count: u32,
    pub user_field: String,
}

impl RoutingNumberSummary {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordCodec for RoutingNumberSummary {
    const RECORD_TYPE: &'static str = "85";
    const NAME: &'static str = "RoutingNumberSummary";
    const MIN_LENGTH: usize = RECORD_LENGTH;

    fn parse(line: &Line) -> Result<Self, FileError> {
        line.require(Self::NAME, Self::MIN_LENGTH)?;
        expect_type(line, Self::RECORD_TYPE, Self::NAME)?;
        Ok(Self {
            cash_letter_routing_number: line.string(2, 9),
            routing_number_total_amount: line.num(11, 14),
            routing_number_item_count: line.num(25, 6) as u32,
            user_field: line.alpha(31, 24),
        })
    }

    fn write(&self, out: &mut LineBuilder) {
        out.text(Self::RECORD_TYPE)
            .string(&self.cash_letter_routing_number, 9)
            .numeric(self.routing_number_total_amount, 14)
            .numeric(u64::from(self.routing_number_item_count), 6)
            .alpha(&self.user_field, 24)
            .blank(25);
    }

    fn validate(&self, _opts: &Options) -> Result<(), FieldError> {
        mandatory_routing("CashLetterRoutingNumber", &self.cash_letter_routing_number, false)?;
        check(
            "CashLetterRoutingNumber",
            &self.cash_letter_routing_number,
            is_numeric(&self.cash_letter_routing_number),
        )?;
        fits("RoutingNumberTotalAmount", self.routing_number_total_amount, 14)?;
        fits("RoutingNumberItemCount", u64::from(self.routing_number_item_count), 6)?;
        check("UserField", &self.user_field, is_alphanumeric_special(&self.user_field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MSG_FIELD_INCLUSION;

    #[test]
    fn test_parse_format_round_trip() {
        let summary = RoutingNumberSummary {
            cash_letter_routing_number: "231380104".to_string(),
            routing_number_total_amount: 100000,
            routing_number_item_count: 1,
            user_field: String::new(),
        };
        let line = summary.format();
        assert_eq!(line.len(), 80);
        assert_eq!(&line[..31], "8523138010400000000100000000001");
        assert_eq!(RoutingNumberSummary::parse_str(&line).unwrap(), summary);
        assert!(summary.validate(&Options::default()).is_ok());
    }

    #[test]
    fn test_routing_number_required() {
        let err = RoutingNumberSummary::new()
            .validate(&Options::default())
            .unwrap_err();
        assert_eq!(err.field_name, "CashLetterRoutingNumber");
        assert_eq!(err.msg, MSG_FIELD_INCLUSION);
    }
}
