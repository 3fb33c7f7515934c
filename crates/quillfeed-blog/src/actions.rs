//! Module: actions
//! Responsibility: the write path — create/update/delete posts behind the
//! access-policy, slug-service, and event-sink ports.
//! Does not own: persistence or index maintenance; committed events reach
//! the indexes through the change feed, not through this module.

use crate::model::{Post, PostDraft, UserRef};
use ulid::Ulid;

/// Slug allocation group for posts.
pub const SLUG_GROUP: &str = "blog_post";

/// Role required for every write.
pub const ADMIN_ROLE: &str = "admin";

///
/// Client
///
/// The authenticated caller as presented by the hosting framework.
///

#[derive(Clone, Debug)]
pub struct Client {
    pub user: UserRef,
    pub roles: Vec<String>,
}

///
/// Ports
///

pub trait AccessPolicy {
    fn can_write(&self, client: &Client) -> bool;
}

/// The service's own policy: writes are admin-only.
#[derive(Clone, Copy, Debug, Default)]
pub struct AdminOnly;

impl AccessPolicy for AdminOnly {
    fn can_write(&self, client: &Client) -> bool {
        client.roles.iter().any(|role| role == ADMIN_ROLE)
    }
}

///
/// SlugError
///

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
#[error("slug service rejected request: {reason}")]
pub struct SlugError {
    pub reason: String,
}

/// External slug allocation service.
pub trait SlugService {
    fn create_slug(&self, group: &str, title: &str, to: &str) -> Result<String, SlugError>;
}

///
/// PostEvent
///
/// Committed mutation events. The framework applies them to the table,
/// which in turn drives the change feed and the index registry.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PostEvent {
    PostCreated { post: String, data: Post },
    PostUpdated { post: String, data: Post },
    PostDeleted { post: String },
}

pub trait EventSink {
    fn emit(&mut self, event: PostEvent);
}

impl EventSink for Vec<PostEvent> {
    fn emit(&mut self, event: PostEvent) {
        self.push(event);
    }
}

///
/// ActionError
///

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum ActionError {
    #[error("write access denied")]
    AccessDenied,

    #[error(transparent)]
    Slug(#[from] SlugError),
}

///
/// CreatedPost
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreatedPost {
    pub post: String,
    pub slug: String,
}

/// Create a post: allocate an id and a slug, stamp the caller as author,
/// emit `PostCreated`.
pub fn create_post(
    access: &dyn AccessPolicy,
    slugs: &dyn SlugService,
    events: &mut dyn EventSink,
    client: &Client,
    draft: PostDraft,
) -> Result<CreatedPost, ActionError> {
    if !access.can_write(client) {
        return Err(ActionError::AccessDenied);
    }

    let post = Ulid::new().to_string();
    let slug = slugs.create_slug(SLUG_GROUP, &draft.title, &post)?;
    let data = draft.into_post(post.clone(), Some(slug.clone()), client.user.clone());

    events.emit(PostEvent::PostCreated {
        post: post.clone(),
        data,
    });

    Ok(CreatedPost { post, slug })
}

/// Replace a post's fields in place. Identity, slug and author survive the
/// update; only draft fields change.
pub fn update_post(
    access: &dyn AccessPolicy,
    events: &mut dyn EventSink,
    client: &Client,
    existing: &Post,
    draft: PostDraft,
) -> Result<Post, ActionError> {
    if !access.can_write(client) {
        return Err(ActionError::AccessDenied);
    }

    let data = draft.into_post(
        existing.id.clone(),
        existing.slug.clone(),
        existing.author.clone(),
    );

    events.emit(PostEvent::PostUpdated {
        post: existing.id.clone(),
        data: data.clone(),
    });

    Ok(data)
}

/// Delete a post.
pub fn delete_post(
    access: &dyn AccessPolicy,
    events: &mut dyn EventSink,
    client: &Client,
    existing: &Post,
) -> Result<(), ActionError> {
    if !access.can_write(client) {
        return Err(ActionError::AccessDenied);
    }

    events.emit(PostEvent::PostDeleted {
        post: existing.id.clone(),
    });

    Ok(())
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::{
        ActionError, AdminOnly, Client, PostEvent, SLUG_GROUP, SlugError, SlugService,
        create_post, delete_post, update_post,
    };
    use crate::model::{PictureRef, PostDraft, TagRef, UserRef};
    use quillfeed_core::key::DateStamp;

    struct FixedSlugs;

    impl SlugService for FixedSlugs {
        fn create_slug(&self, group: &str, _title: &str, _to: &str) -> Result<String, SlugError> {
            assert_eq!(group, SLUG_GROUP);
            Ok("first-post".to_owned())
        }
    }

    struct RefusingSlugs;

    impl SlugService for RefusingSlugs {
        fn create_slug(&self, _group: &str, _title: &str, _to: &str) -> Result<String, SlugError> {
            Err(SlugError {
                reason: "slug taken".to_owned(),
            })
        }
    }

    fn admin() -> Client {
        Client {
            user: UserRef::new("U1"),
            roles: vec!["admin".to_owned()],
        }
    }

    fn reader() -> Client {
        Client {
            user: UserRef::new("U2"),
            roles: vec!["reader".to_owned()],
        }
    }

    fn draft() -> PostDraft {
        PostDraft {
            date: DateStamp::parse("2020-01-01T00:00:00.000Z").expect("canonical stamp"),
            title: "First".to_owned(),
            content: "Hello".to_owned(),
            picture: PictureRef::new("PIC1"),
            category: Vec::new(),
            lists: Vec::new(),
            tags: vec![TagRef::new("rust")],
            lang: "en".to_owned(),
        }
    }

    #[test]
    fn create_assigns_id_slug_and_author() {
        let mut events: Vec<PostEvent> = Vec::new();
        let created = create_post(&AdminOnly, &FixedSlugs, &mut events, &admin(), draft())
            .expect("admin create should succeed");

        assert_eq!(created.slug, "first-post");
        assert!(!created.post.is_empty());

        let [PostEvent::PostCreated { post, data }] = events.as_slice() else {
            panic!("expected a single PostCreated event");
        };
        assert_eq!(post, &created.post);
        assert_eq!(data.id, created.post);
        assert_eq!(data.slug.as_deref(), Some("first-post"));
        assert_eq!(data.author, UserRef::new("U1"));
    }

    #[test]
    fn create_requires_admin() {
        let mut events: Vec<PostEvent> = Vec::new();
        let err = create_post(&AdminOnly, &FixedSlugs, &mut events, &reader(), draft())
            .expect_err("reader create should fail");

        assert_eq!(err, ActionError::AccessDenied);
        assert!(events.is_empty());
    }

    #[test]
    fn create_surfaces_slug_rejection() {
        let mut events: Vec<PostEvent> = Vec::new();
        let err = create_post(&AdminOnly, &RefusingSlugs, &mut events, &admin(), draft())
            .expect_err("slug rejection should surface");

        assert!(matches!(err, ActionError::Slug(_)));
        assert!(events.is_empty());
    }

    #[test]
    fn update_preserves_identity_and_author() {
        let mut events: Vec<PostEvent> = Vec::new();
        let created = create_post(&AdminOnly, &FixedSlugs, &mut events, &admin(), draft())
            .expect("create");
        let [PostEvent::PostCreated { data: existing, .. }] = events.as_slice() else {
            panic!("expected PostCreated");
        };
        let existing = existing.clone();

        let mut changed = draft();
        changed.title = "Second".to_owned();

        let mut events: Vec<PostEvent> = Vec::new();
        let updated = update_post(&AdminOnly, &mut events, &admin(), &existing, changed)
            .expect("admin update should succeed");

        assert_eq!(updated.id, created.post);
        assert_eq!(updated.slug.as_deref(), Some("first-post"));
        assert_eq!(updated.author, UserRef::new("U1"));
        assert_eq!(updated.title, "Second");
    }

    #[test]
    fn delete_emits_the_deletion_event() {
        let mut events: Vec<PostEvent> = Vec::new();
        create_post(&AdminOnly, &FixedSlugs, &mut events, &admin(), draft()).expect("create");
        let [PostEvent::PostCreated { data: existing, .. }] = events.as_slice() else {
            panic!("expected PostCreated");
        };
        let existing = existing.clone();

        let mut events: Vec<PostEvent> = Vec::new();
        delete_post(&AdminOnly, &mut events, &admin(), &existing).expect("admin delete");

        assert_eq!(
            events,
            vec![PostEvent::PostDeleted {
                post: existing.id.clone()
            }]
        );
    }
}
