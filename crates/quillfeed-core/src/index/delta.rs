//! Module: index::delta
//! Responsibility: the add/remove vocabulary emitted by maintainers and the
//! sink port the external store implements.
//! Does not own: diff computation.

use serde::{Deserialize, Serialize};

///
/// Pointer
///
/// One index entry: `id` is the composite key plus entity-id suffix, `to`
/// the entity it resolves to. Applying the same add or remove twice is a
/// no-op at the store, which is what makes redelivery safe.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Pointer {
    pub id: String,
    pub to: String,
}

///
/// PointerDelta
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PointerDelta {
    Add(Pointer),
    Remove(Pointer),
}

impl PointerDelta {
    #[must_use]
    pub const fn pointer(&self) -> &Pointer {
        match self {
            Self::Add(pointer) | Self::Remove(pointer) => pointer,
        }
    }

    #[must_use]
    pub const fn is_add(&self) -> bool {
        matches!(self, Self::Add(_))
    }
}

///
/// DeltaSink
///
/// Where maintainers emit. The store-side implementation persists each
/// delta; the `Vec` implementation below is the in-memory collector used
/// by dispatch and tests.
///

pub trait DeltaSink {
    fn apply(&mut self, delta: PointerDelta);
}

impl DeltaSink for Vec<PointerDelta> {
    fn apply(&mut self, delta: PointerDelta) {
        self.push(delta);
    }
}
