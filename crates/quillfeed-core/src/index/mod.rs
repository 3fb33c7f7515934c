//! Module: index
//! Responsibility: incremental pointer-index maintenance over entity
//! change events.
//! Does not own: key encoding details or range scanning.
//! Boundary: the change-feed dispatcher drives observers; an external
//! store applies the emitted deltas.

mod delta;
mod maintainer;

pub use delta::{DeltaSink, Pointer, PointerDelta};
pub use maintainer::{ChangeObserver, IndexMaintainer, IndexedEntity};
