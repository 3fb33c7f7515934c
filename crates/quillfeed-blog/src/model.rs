//! Module: model
//! Responsibility: the Post entity schema and its foreign-reference types.
//! Does not own: validation-rule evaluation (upstream framework concern).

use derive_more::{Deref, Display};
use quillfeed_core::{index::IndexedEntity, key::DateStamp};
use serde::{Deserialize, Serialize};

///
/// Foreign references
///
/// Opaque identifiers into sibling services. `ListLabel` is a plain label,
/// not a foreign key; known values include `top`, `news` and `big-news`,
/// but the set is open.
///

macro_rules! reference {
    ($(#[$docs:meta])* $name:ident) => {
        $(#[$docs])*
        #[derive(
            Clone, Debug, Deref, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd,
            Serialize,
        )]
        pub struct $name(pub String);

        impl $name {
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }
        }
    };
}

reference!(UserRef);
reference!(CategoryRef);
reference!(TagRef);
reference!(PictureRef);
reference!(ListLabel);

///
/// Post
///
/// The content entity. `date` is the sort key of every index; a post with
/// no date is rejected by schema validation before it can be committed, so
/// index maintenance never sees one.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Post {
    pub id: String,
    pub slug: Option<String>,
    pub author: UserRef,
    pub date: DateStamp,
    pub title: String,
    pub content: String,
    pub picture: PictureRef,
    #[serde(default)]
    pub category: Vec<CategoryRef>,
    #[serde(default)]
    pub lists: Vec<ListLabel>,
    #[serde(default)]
    pub tags: Vec<TagRef>,
    pub lang: String,
}

impl IndexedEntity for Post {
    fn id(&self) -> &str {
        &self.id
    }

    fn stamp(&self) -> &DateStamp {
        &self.date
    }
}

///
/// PostDraft
///
/// Caller-supplied post fields. Identity, author and slug are assigned by
/// the actions, never by the caller.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PostDraft {
    pub date: DateStamp,
    pub title: String,
    pub content: String,
    pub picture: PictureRef,
    #[serde(default)]
    pub category: Vec<CategoryRef>,
    #[serde(default)]
    pub lists: Vec<ListLabel>,
    #[serde(default)]
    pub tags: Vec<TagRef>,
    pub lang: String,
}

impl PostDraft {
    /// Materialize a full entity from this draft.
    #[must_use]
    pub fn into_post(self, id: String, slug: Option<String>, author: UserRef) -> Post {
        Post {
            id,
            slug,
            author,
            date: self.date,
            title: self.title,
            content: self.content,
            picture: self.picture,
            category: self.category,
            lists: self.lists,
            tags: self.tags,
            lang: self.lang,
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::{CategoryRef, PictureRef, Post, UserRef};

    #[test]
    fn post_round_trips_through_serde_with_defaulted_lists() {
        let json = serde_json::json!({
            "id": "P1",
            "slug": "first-post",
            "author": "U1",
            "date": "2020-01-01T00:00:00.000Z",
            "title": "First",
            "content": "Hello",
            "picture": "PIC1",
            "category": ["tech"],
            "lang": "en",
        });

        let post: Post = serde_json::from_value(json).expect("post should deserialize");
        assert_eq!(post.author, UserRef::new("U1"));
        assert_eq!(post.picture, PictureRef::new("PIC1"));
        assert_eq!(post.category, vec![CategoryRef::new("tech")]);
        assert!(post.tags.is_empty());
        assert!(post.lists.is_empty());

        let back = serde_json::to_value(&post).expect("post should serialize");
        assert_eq!(back["date"], "2020-01-01T00:00:00.000Z");
    }
}
