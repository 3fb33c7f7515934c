//! Module: key::cursor
//! Responsibility: the opaque pagination-token format and date recovery.
//! Does not own: boundary construction or range semantics.
//! Boundary: the range encoder is the only consumer of parsed tokens.

use crate::key::date::{self, DateStamp};

/// Reserved maximal token. The same 0xFF run doubles as the past-everything
/// key suffix: any real entry id appended after a date prefix sorts below it.
pub const END_SENTINEL: &str = "\u{ff}\u{ff}\u{ff}\u{ff}";

// Defensive bound on untrusted caller input.
const MAX_TOKEN_LEN: usize = 4 * 1024;

///
/// CursorError
///

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum CursorError {
    #[error("cursor token exceeds max length: {len} chars (max {max})")]
    TooLong { len: usize, max: usize },

    #[error("cursor token has no recoverable date component: {token:?}")]
    MissingDate { token: String },
}

///
/// CursorToken
///
/// A parsed pagination token: the start/end sentinels, or an index-entry id
/// from a previous page with its embedded date recovered.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CursorToken {
    Start,
    End,
    Entry(DateStamp),
}

impl CursorToken {
    /// Parse an untrusted caller token.
    ///
    /// A wrong-but-plausible boundary would silently corrupt pagination, so
    /// anything that is neither a sentinel nor carries a recoverable date
    /// fails here rather than defaulting.
    pub fn parse(raw: &str) -> Result<Self, CursorError> {
        if raw.is_empty() {
            return Ok(Self::Start);
        }
        if raw == END_SENTINEL {
            return Ok(Self::End);
        }
        if raw.len() > MAX_TOKEN_LEN {
            return Err(CursorError::TooLong {
                len: raw.len(),
                max: MAX_TOKEN_LEN,
            });
        }

        extract_date(raw)
            .map(Self::Entry)
            .ok_or_else(|| CursorError::MissingDate {
                token: raw.to_owned(),
            })
    }
}

/// Recover the date embedded in an index-entry id.
///
/// Scans for the leftmost `:"<date>"_` window whose fixed-width payload
/// parses as a canonical stamp. Quoted segments escape `"` and `\`, so the
/// unescaped window shape cannot occur inside a group value produced by
/// this codec; leftmost-match is therefore exact for generated keys.
fn extract_date(token: &str) -> Option<DateStamp> {
    const OPEN: &[u8] = b":\"";
    const CLOSE: &[u8] = b"\"_";

    let bytes = token.as_bytes();
    let window = OPEN.len() + date::ENCODED_LEN + CLOSE.len();
    if bytes.len() < window {
        return None;
    }

    for start in 0..=bytes.len() - window {
        if &bytes[start..start + OPEN.len()] != OPEN {
            continue;
        }

        let date_start = start + OPEN.len();
        let date_end = date_start + date::ENCODED_LEN;
        if &bytes[date_end..date_end + CLOSE.len()] != CLOSE {
            continue;
        }

        // Window boundaries may split a multi-byte character; that window
        // simply cannot hold a canonical stamp.
        let Ok(text) = std::str::from_utf8(&bytes[date_start..date_end]) else {
            continue;
        };

        if let Ok(stamp) = DateStamp::parse(text) {
            return Some(stamp);
        }
    }

    None
}

///
/// TESTS
///
