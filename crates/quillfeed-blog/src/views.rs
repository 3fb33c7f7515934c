//! Module: views
//! Responsibility: the read path — lower caller page requests into ranged
//! index scans for the external store.
//! Does not own: scanning, pointer resolution, or response serialization.

use crate::{
    model::{CategoryRef, ListLabel, TagRef, UserRef},
    registry::{
        CATEGORY_POSTS_WITH_DATE, LIST_POSTS_WITH_DATE, POSTS_BY_DATE, TAG_POSTS_WITH_DATE,
        USER_POSTS_WITH_DATE,
    },
};
use log::debug;
use quillfeed_core::{
    key::{CursorError, GroupKey, IndexPrefix},
    range::{KeyRange, RangeRequest, encode_range},
};

///
/// IndexRangeQuery
///
/// A fully resolved scan: which index, and the key envelope over it. The
/// store walks the envelope and returns pointers in order; the caller then
/// resolves pointers to posts.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IndexRangeQuery {
    pub index: &'static str,
    pub range: KeyRange,
}

/// All posts in date order.
pub fn posts(request: &RangeRequest) -> Result<IndexRangeQuery, CursorError> {
    range_query(POSTS_BY_DATE, &IndexPrefix::All, request)
}

/// Posts in one category, in date order within the category.
pub fn posts_by_category(
    category: &CategoryRef,
    request: &RangeRequest,
) -> Result<IndexRangeQuery, CursorError> {
    range_query(
        CATEGORY_POSTS_WITH_DATE,
        &IndexPrefix::Group(GroupKey::quote(category)),
        request,
    )
}

/// Posts carrying one tag, in date order within the tag.
pub fn posts_by_tag(
    tag: &TagRef,
    request: &RangeRequest,
) -> Result<IndexRangeQuery, CursorError> {
    range_query(
        TAG_POSTS_WITH_DATE,
        &IndexPrefix::Group(GroupKey::quote(tag)),
        request,
    )
}

/// Posts on one curated list, in date order within the list.
pub fn posts_by_list(
    list: &ListLabel,
    request: &RangeRequest,
) -> Result<IndexRangeQuery, CursorError> {
    range_query(
        LIST_POSTS_WITH_DATE,
        &IndexPrefix::Group(GroupKey::quote(list)),
        request,
    )
}

/// Posts by one author, in date order within the author.
pub fn posts_by_user(
    user: &UserRef,
    request: &RangeRequest,
) -> Result<IndexRangeQuery, CursorError> {
    range_query(
        USER_POSTS_WITH_DATE,
        &IndexPrefix::Group(GroupKey::quote(user)),
        request,
    )
}

fn range_query(
    index: &'static str,
    prefix: &IndexPrefix,
    request: &RangeRequest,
) -> Result<IndexRangeQuery, CursorError> {
    let range = encode_range(prefix, request)?;
    debug!("{index}: request {request:?} -> range {range:?}");

    Ok(IndexRangeQuery { index, range })
}

///
/// TESTS
///
