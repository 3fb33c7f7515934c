//! Module: key
//! Responsibility: composite index-key assembly and the quoting scheme that
//! keeps relationship values safely delimited inside ordered text keys.
//! Does not own: range semantics or delta emission.
//! Boundary: maintainer and encoder build every key through this module.

mod cursor;
mod date;

pub use cursor::{CursorError, CursorToken, END_SENTINEL};
pub use date::{DateStamp, DateStampError, ENCODED_LEN as DATE_ENCODED_LEN};

use derive_more::{Deref, Display};
use std::fmt::Write as _;

/// Append `text` as a quoted, escaped segment.
///
/// This is the documented serialization for relationship values and date
/// stamps inside composite keys: double-quote delimited, with `"`, `\` and
/// control characters escaped. Escaping guarantees that the unescaped
/// delimiter sequences (`:"` and `"_`) never occur inside a quoted segment,
/// which is what makes cursor-date recovery unambiguous.
fn push_quoted(out: &mut String, text: &str) {
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if (ch as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", ch as u32);
            }
            ch => out.push(ch),
        }
    }
    out.push('"');
}

///
/// GroupKey
///
/// The serialized relationship-value prefix that scopes one index group:
/// a quoted category/tag/list/author reference, or the empty unit group
/// for the unfiltered all-posts index.
///

#[derive(Clone, Debug, Deref, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GroupKey(String);

impl GroupKey {
    /// Quote a relationship value into its group prefix.
    #[must_use]
    pub fn quote(value: &str) -> Self {
        let mut out = String::with_capacity(value.len() + 2);
        push_quoted(&mut out, value);
        Self(out)
    }

    /// The empty unit group. Distinct from `quote("")`, which is `""`
    /// (two quote characters): unit-group keys carry no prefix at all.
    #[must_use]
    pub const fn unit() -> Self {
        Self(String::new())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

///
/// CompositeKey
///
/// `group ++ ":" ++ quoted-date` — the ordered grouping prefix of one index
/// entry. Keys sort first by group, then chronologically within the group
/// because the date encoding is fixed-width.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CompositeKey(String);

impl CompositeKey {
    #[must_use]
    pub fn new(group: &GroupKey, stamp: &DateStamp) -> Self {
        let encoded = stamp.encode();
        let mut out = String::with_capacity(group.as_str().len() + encoded.len() + 3);
        out.push_str(group.as_str());
        out.push(':');
        push_quoted(&mut out, &encoded);
        Self(out)
    }

    /// The id of the index entry pointing `self` at `entity_id`.
    #[must_use]
    pub fn pointer_id(&self, entity_id: &str) -> String {
        let mut out = String::with_capacity(self.0.len() + entity_id.len() + 1);
        out.push_str(&self.0);
        out.push('_');
        out.push_str(entity_id);
        out
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

///
/// IndexPrefix
///
/// The scan scope of one index: a single group, or the whole index for the
/// unit-group case. The two differ in their low boundary, so the encoder
/// never constructs boundaries by hand.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum IndexPrefix {
    /// The unfiltered index over unit-group keys (`:"date"_id`).
    All,
    /// One relationship-value group.
    Group(GroupKey),
}

impl IndexPrefix {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "",
            Self::Group(group) => group.as_str(),
        }
    }

    /// Boundary below every key in scope. Grouped indexes pin the scan to
    /// the group with a NUL sentinel; the unfiltered index starts at the
    /// bare separator, which sorts below every quoted date.
    #[must_use]
    pub(crate) fn low_boundary(&self) -> String {
        match self {
            Self::All => ":".to_owned(),
            Self::Group(group) => format!("{group}:\u{0}"),
        }
    }

    /// Boundary above every key in scope.
    #[must_use]
    pub(crate) fn high_boundary(&self) -> String {
        format!("{}:{END_SENTINEL}", self.as_str())
    }

    /// Boundary prefix covering every entry id with exactly `stamp` in
    /// this scope: `prefix ++ ":" ++ quoted-date ++ "_"`.
    #[must_use]
    pub(crate) fn date_boundary(&self, stamp: &DateStamp) -> String {
        let encoded = stamp.encode();
        let mut out = String::with_capacity(self.as_str().len() + encoded.len() + 4);
        out.push_str(self.as_str());
        out.push(':');
        push_quoted(&mut out, &encoded);
        out.push('_');
        out
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::{CompositeKey, DateStamp, GroupKey, IndexPrefix};

    fn stamp() -> DateStamp {
        DateStamp::parse("2020-01-01T00:00:00.000Z").expect("canonical stamp")
    }

    #[test]
    fn quoting_escapes_delimiters_and_controls() {
        assert_eq!(GroupKey::quote("tech").as_str(), "\"tech\"");
        assert_eq!(GroupKey::quote("a\"b").as_str(), "\"a\\\"b\"");
        assert_eq!(GroupKey::quote("a\\b").as_str(), "\"a\\\\b\"");
        assert_eq!(GroupKey::quote("a\nb").as_str(), "\"a\\nb\"");
        assert_eq!(GroupKey::quote("a\u{1}b").as_str(), "\"a\\u0001b\"");
    }

    #[test]
    fn unit_group_is_not_the_quoted_empty_string() {
        assert_eq!(GroupKey::unit().as_str(), "");
        assert_eq!(GroupKey::quote("").as_str(), "\"\"");
    }

    #[test]
    fn composite_key_and_pointer_id_shape() {
        let key = CompositeKey::new(&GroupKey::quote("tech"), &stamp());
        assert_eq!(key.as_str(), "\"tech\":\"2020-01-01T00:00:00.000Z\"");
        assert_eq!(
            key.pointer_id("P1"),
            "\"tech\":\"2020-01-01T00:00:00.000Z\"_P1"
        );
    }

    #[test]
    fn unit_group_composite_key_shape() {
        let key = CompositeKey::new(&GroupKey::unit(), &stamp());
        assert_eq!(key.as_str(), ":\"2020-01-01T00:00:00.000Z\"");
        assert_eq!(key.pointer_id("P1"), ":\"2020-01-01T00:00:00.000Z\"_P1");
    }

    #[test]
    fn composite_keys_group_then_sort_by_date() {
        let early = DateStamp::parse("2020-01-01T00:00:00.000Z").expect("parse");
        let late = DateStamp::parse("2021-01-01T00:00:00.000Z").expect("parse");

        let news_late = CompositeKey::new(&GroupKey::quote("news"), &late);
        let tech_early = CompositeKey::new(&GroupKey::quote("tech"), &early);
        let tech_late = CompositeKey::new(&GroupKey::quote("tech"), &late);

        assert!(news_late < tech_early, "group prefix dominates ordering");
        assert!(tech_early < tech_late, "date orders within a group");
    }

    #[test]
    fn prefix_boundaries_bracket_the_group() {
        let prefix = IndexPrefix::Group(GroupKey::quote("tech"));
        let key = CompositeKey::new(&GroupKey::quote("tech"), &stamp());
        let entry = key.pointer_id("P1");

        assert!(prefix.low_boundary() < entry);
        assert!(entry < prefix.high_boundary());

        let date_prefix = prefix.date_boundary(&stamp());
        assert!(entry.starts_with(&date_prefix));
    }

    #[test]
    fn all_prefix_boundaries_bracket_unit_keys() {
        let prefix = IndexPrefix::All;
        let entry = CompositeKey::new(&GroupKey::unit(), &stamp()).pointer_id("P1");

        assert!(prefix.low_boundary() <= entry);
        assert!(entry < prefix.high_boundary());
    }
}
