//! Module: range
//! Responsibility: lower a logical cursor request into one byte-ordered key
//! range the external store can scan directly.
//! Does not own: the scan itself, or cursor-token storage (tokens are
//! re-derived from entry ids, never persisted).
//! Boundary: views call this once per read request; pure and stateless.

use crate::key::{CursorError, CursorToken, END_SENTINEL, IndexPrefix};
use serde::{Deserialize, Serialize};

/// Applied when the caller's limit is absent, negative, or beyond `u32`.
pub const DEFAULT_LIMIT: u64 = 100;

///
/// RangeRequest
///
/// The caller-facing page request. Each bound is an opaque cursor token;
/// in practice one bound per side is set, but when both arrive the encoder
/// resolves each independently, exactly as the bounds below describe.
///

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RangeRequest {
    pub gt: Option<String>,
    pub gte: Option<String>,
    pub lt: Option<String>,
    pub lte: Option<String>,
    pub limit: Option<i64>,
    #[serde(default)]
    pub reverse: bool,
}

///
/// KeyRange
///
/// The resolved scan envelope handed to the ordered store. Bounds are plain
/// keys in the index's byte order; `reverse` flips scan direction only.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct KeyRange {
    pub gt: Option<String>,
    pub gte: Option<String>,
    pub lt: Option<String>,
    pub lte: Option<String>,
    pub limit: u64,
    pub reverse: bool,
}

/// Lower a cursor request into a key range scoped to `prefix`.
///
/// Bound construction:
/// - `gt`: strict-greater-than is "at or past everything with that date" —
///   the date boundary plus the maximal suffix, which sorts above any real
///   entry id sharing the date.
/// - `gte`: the bare date boundary, below every entry id with that date.
///   Defaults to the bare prefix when neither lower token is present.
/// - `lt`: the bare date boundary; an exclusive scan stops before any key
///   extending it.
/// - `lte`: the date boundary plus the maximal suffix, inclusive of every
///   id with that date. Defaults to the prefix high boundary when neither
///   upper token is present.
///
/// A group with no entries yields an empty scan, not an error; a zero limit
/// yields an empty page.
pub fn encode_range(prefix: &IndexPrefix, request: &RangeRequest) -> Result<KeyRange, CursorError> {
    let gt = match &request.gt {
        Some(token) => Some(format!("{}{END_SENTINEL}", token_boundary(prefix, token)?)),
        None => None,
    };

    let lt = match &request.lt {
        Some(token) => Some(token_boundary(prefix, token)?),
        None => None,
    };

    let gte = match &request.gte {
        Some(token) => Some(token_boundary(prefix, token)?),
        None if request.gt.is_none() => Some(prefix.as_str().to_owned()),
        None => None,
    };

    let lte = match &request.lte {
        Some(token) => Some(format!("{}{END_SENTINEL}", token_boundary(prefix, token)?)),
        None if request.lt.is_none() => Some(prefix.high_boundary()),
        None => None,
    };

    // Only limits representable as u32 count as sane page sizes; anything
    // negative or larger falls back to the default.
    let limit = request
        .limit
        .and_then(|raw| u32::try_from(raw).ok())
        .map_or(DEFAULT_LIMIT, u64::from);

    Ok(KeyRange {
        gt,
        gte,
        lt,
        lte,
        limit,
        reverse: request.reverse,
    })
}

fn token_boundary(prefix: &IndexPrefix, raw: &str) -> Result<String, CursorError> {
    Ok(match CursorToken::parse(raw)? {
        CursorToken::Start => prefix.low_boundary(),
        CursorToken::End => prefix.high_boundary(),
        CursorToken::Entry(stamp) => prefix.date_boundary(&stamp),
    })
}

///
/// TESTS
///
