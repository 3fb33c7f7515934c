//! Module: registry
//! Responsibility: the explicit composition-root registry wiring the five
//! post indexes to the change feed.
//! Does not own: diff logic (core maintainer) or delta persistence.
//! Boundary: the hosting framework registers `dispatch` as the change-feed
//! handler for the Post table and persists whatever the sink receives.

use crate::{
    model::Post,
    obs::{MetricsEvent, MetricsSink, NullSink},
};
use quillfeed_core::{
    index::{ChangeObserver, IndexMaintainer, PointerDelta},
    key::GroupKey,
};
use std::sync::Arc;

/// Index names as the external store knows them.
pub const POSTS_BY_DATE: &str = "postsByDate";
pub const CATEGORY_POSTS_WITH_DATE: &str = "categoryPostsWithDate";
pub const TAG_POSTS_WITH_DATE: &str = "tagPostsWithDate";
pub const USER_POSTS_WITH_DATE: &str = "userPostsWithDate";
pub const LIST_POSTS_WITH_DATE: &str = "listPostsWithDate";

///
/// IndexDeltaSink
///
/// Store-facing sink receiving each delta tagged with its index name.
///

pub trait IndexDeltaSink {
    fn apply(&mut self, index: &'static str, delta: PointerDelta);
}

impl IndexDeltaSink for Vec<(&'static str, PointerDelta)> {
    fn apply(&mut self, index: &'static str, delta: PointerDelta) {
        self.push((index, delta));
    }
}

///
/// PostIndexRegistry
///
/// Holds one maintainer per index. Maintainers share no state, so their
/// registration order only affects delta emission order, never content.
///

pub struct PostIndexRegistry {
    observers: Vec<Box<dyn ChangeObserver<Post> + Send + Sync>>,
    metrics: Arc<dyn MetricsSink>,
}

impl PostIndexRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::with_metrics(Arc::new(NullSink))
    }

    #[must_use]
    pub fn with_metrics(metrics: Arc<dyn MetricsSink>) -> Self {
        let observers: Vec<Box<dyn ChangeObserver<Post> + Send + Sync>> = vec![
            // The unfiltered date index lives in the unit group.
            Box::new(IndexMaintainer::new(POSTS_BY_DATE, |_post: &Post| {
                vec![GroupKey::unit()]
            })),
            Box::new(IndexMaintainer::new(
                CATEGORY_POSTS_WITH_DATE,
                |post: &Post| post.category.iter().map(|c| GroupKey::quote(c)).collect(),
            )),
            Box::new(IndexMaintainer::new(TAG_POSTS_WITH_DATE, |post: &Post| {
                post.tags.iter().map(|t| GroupKey::quote(t)).collect()
            })),
            Box::new(IndexMaintainer::new(
                USER_POSTS_WITH_DATE,
                |post: &Post| vec![GroupKey::quote(&post.author)],
            )),
            Box::new(IndexMaintainer::new(LIST_POSTS_WITH_DATE, |post: &Post| {
                post.lists.iter().map(|l| GroupKey::quote(l)).collect()
            })),
        ];

        Self { observers, metrics }
    }

    /// Fan one committed change event out to every index.
    ///
    /// The caller guarantees per-entity ordering of events; this method is
    /// otherwise safe to invoke concurrently for different entities.
    pub fn dispatch(
        &self,
        current: Option<&Post>,
        previous: Option<&Post>,
        sink: &mut dyn IndexDeltaSink,
    ) {
        for observer in &self.observers {
            let mut deltas: Vec<PointerDelta> = Vec::new();
            observer.observe(current, previous, &mut deltas);

            let adds = deltas.iter().filter(|d| d.is_add()).count() as u64;
            self.metrics.record(MetricsEvent::IndexDelta {
                index: observer.name(),
                adds,
                removes: deltas.len() as u64 - adds,
            });

            for delta in deltas {
                sink.apply(observer.name(), delta);
            }
        }
    }
}

impl Default for PostIndexRegistry {
    fn default() -> Self {
        Self::new()
    }
}

///
/// TESTS
///
