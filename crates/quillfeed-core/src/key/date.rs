//! Module: key::date
//! Responsibility: the canonical fixed-width date-stamp codec for index keys.
//! Does not own: key assembly or cursor-token scanning.
//! Boundary: composite-key and cursor code treat stamps as opaque ordered text.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use time::{
    PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

/// Width of the canonical encoding: `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub const ENCODED_LEN: usize = 24;

const FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
);

///
/// DateStampError
///

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum DateStampError {
    #[error("date stamp has wrong width: {len} chars (expected {ENCODED_LEN})")]
    WrongWidth { len: usize },

    #[error("date stamp failed to parse: {text:?}")]
    Unparseable { text: String },
}

///
/// DateStamp
///
/// A UTC instant at millisecond precision, the sort-key component of every
/// index key. The canonical encoding is fixed-width, zero-padded text whose
/// lexicographic byte order equals chronological order for years 0000-9999.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DateStamp(PrimitiveDateTime);

impl DateStamp {
    /// Parse the canonical encoding. Width is checked before field parsing
    /// so near-miss shapes fail with a stable error.
    pub fn parse(text: &str) -> Result<Self, DateStampError> {
        if text.len() != ENCODED_LEN {
            return Err(DateStampError::WrongWidth { len: text.len() });
        }

        let parsed = PrimitiveDateTime::parse(text, FORMAT)
            .map_err(|_| DateStampError::Unparseable {
                text: text.to_owned(),
            })?;

        Ok(Self(parsed))
    }

    /// Render the canonical fixed-width encoding.
    #[must_use]
    pub fn encode(&self) -> String {
        self.0
            .format(FORMAT)
            .expect("canonical date format is total for in-range dates")
    }
}

impl Serialize for DateStamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for DateStamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(D::Error::custom)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::{DateStamp, DateStampError, ENCODED_LEN};

    #[test]
    fn canonical_form_round_trips() {
        let text = "2020-01-01T00:00:00.000Z";
        let stamp = DateStamp::parse(text).expect("canonical stamp should parse");
        assert_eq!(stamp.encode(), text);
    }

    #[test]
    fn byte_order_matches_chronological_order() {
        let ordered = [
            "1999-12-31T23:59:59.999Z",
            "2020-01-01T00:00:00.000Z",
            "2020-01-01T00:00:00.001Z",
            "2020-01-02T00:00:00.000Z",
            "2020-11-02T00:00:00.000Z",
            "2120-01-01T00:00:00.000Z",
        ];

        for pair in ordered.windows(2) {
            let a = DateStamp::parse(pair[0]).expect("parse");
            let b = DateStamp::parse(pair[1]).expect("parse");
            assert!(a < b);
            assert!(pair[0] < pair[1], "text order must agree with stamp order");
        }
    }

    #[test]
    fn rejects_wrong_width() {
        let err = DateStamp::parse("2020-01-01T00:00:00Z").expect_err("seconds precision");
        assert_eq!(err, DateStampError::WrongWidth { len: 20 });

        let err = DateStamp::parse("").expect_err("empty");
        assert_eq!(err, DateStampError::WrongWidth { len: 0 });
    }

    #[test]
    fn rejects_invalid_fields_at_correct_width() {
        for text in [
            "2020-13-01T00:00:00.000Z", // month out of range
            "2020-01-32T00:00:00.000Z", // day out of range
            "2020-01-01T25:00:00.000Z", // hour out of range
            "2020-01-01 00:00:00.000Z", // missing separator
            "2020-01-01T00:00:00.000X", // wrong terminator
        ] {
            assert_eq!(text.len(), ENCODED_LEN);
            let err = DateStamp::parse(text).expect_err("invalid field should fail");
            assert!(matches!(err, DateStampError::Unparseable { .. }), "{text}");
        }
    }

    #[test]
    fn serde_uses_canonical_text() {
        let stamp = DateStamp::parse("2021-06-15T08:30:00.250Z").expect("parse");
        let json = serde_json::to_string(&stamp).expect("serialize");
        assert_eq!(json, "\"2021-06-15T08:30:00.250Z\"");

        let back: DateStamp = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, stamp);
    }
}
