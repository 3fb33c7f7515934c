//! Module: index::maintainer
//! Responsibility: the diff/emit core — converge one index to an entity's
//! current multi-valued field state without rebuilding it.
//! Does not own: delta persistence or delivery ordering (the caller must
//! deliver one entity's versions in order).
//! Boundary: registered against the change feed once per index name.

use crate::{
    index::delta::{DeltaSink, Pointer, PointerDelta},
    key::{CompositeKey, DateStamp, GroupKey},
};
use log::debug;
use std::{collections::BTreeSet, marker::PhantomData};

///
/// IndexedEntity
///
/// What the maintainer needs from an entity: a stable id and the sort-key
/// date. A missing date never reaches this layer; the upstream schema
/// rejects such entities before they are committed.
///

pub trait IndexedEntity {
    fn id(&self) -> &str;
    fn stamp(&self) -> &DateStamp;
}

///
/// ChangeObserver
///
/// One subscriber on an entity change feed. `observe` is invoked with the
/// two temporally adjacent committed versions of one entity; at least one
/// side is present.
///

pub trait ChangeObserver<E> {
    fn name(&self) -> &'static str;
    fn observe(&self, current: Option<&E>, previous: Option<&E>, sink: &mut dyn DeltaSink);
}

///
/// IndexMaintainer
///
/// The single generic maintainer behind every index: parameterized by the
/// accessor that maps an entity to its group keys, so category/tag/list/
/// author/all-posts indexes share one diff implementation. Holds no state
/// between invocations; observing the same version pair twice emits the
/// identical delta sequence.
///

pub struct IndexMaintainer<E, F> {
    name: &'static str,
    groups: F,
    _entity: PhantomData<fn(&E)>,
}

impl<E, F> IndexMaintainer<E, F>
where
    E: IndexedEntity,
    F: Fn(&E) -> Vec<GroupKey>,
{
    pub const fn new(name: &'static str, groups: F) -> Self {
        Self {
            name,
            groups,
            _entity: PhantomData,
        }
    }

    /// Composite keys implied by one entity version. A group value repeated
    /// in the field contributes one key; an empty field contributes none.
    fn composite_keys(&self, entity: &E) -> BTreeSet<CompositeKey> {
        (self.groups)(entity)
            .iter()
            .map(|group| CompositeKey::new(group, entity.stamp()))
            .collect()
    }
}

impl<E, F> ChangeObserver<E> for IndexMaintainer<E, F>
where
    E: IndexedEntity,
    F: Fn(&E) -> Vec<GroupKey>,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn observe(&self, current: Option<&E>, previous: Option<&E>, sink: &mut dyn DeltaSink) {
        match (current, previous) {
            (Some(current), Some(previous)) => {
                let new_keys = self.composite_keys(current);
                let old_keys = self.composite_keys(previous);

                debug!(
                    "{}: pointers {:?} -> {:?} for {}",
                    self.name,
                    old_keys,
                    new_keys,
                    current.id()
                );

                for key in new_keys.difference(&old_keys) {
                    sink.apply(PointerDelta::Add(Pointer {
                        id: key.pointer_id(current.id()),
                        to: current.id().to_owned(),
                    }));
                }

                // Removal is keyed by the old composite and the current
                // entity id. If the date changed, the set difference already
                // removed every old-date key and added every new-date key.
                for key in old_keys.difference(&new_keys) {
                    sink.apply(PointerDelta::Remove(Pointer {
                        id: key.pointer_id(current.id()),
                        to: current.id().to_owned(),
                    }));
                }
            }
            (Some(current), None) => {
                for key in self.composite_keys(current) {
                    sink.apply(PointerDelta::Add(Pointer {
                        id: key.pointer_id(current.id()),
                        to: current.id().to_owned(),
                    }));
                }
            }
            (None, Some(previous)) => {
                for key in self.composite_keys(previous) {
                    sink.apply(PointerDelta::Remove(Pointer {
                        id: key.pointer_id(previous.id()),
                        to: previous.id().to_owned(),
                    }));
                }
            }
            (None, None) => {
                // Precondition violation owned by the dispatcher. Drop the
                // event; the subscription stays alive.
                debug_assert!(false, "change event carried no entity version");
            }
        }
    }
}

///
/// TESTS
///
