//! Core runtime for Quillfeed: composite-key codec, incremental
//! secondary-index maintenance, and range-query encoding over an external
//! ordered key/value layer.
//!
//! Nothing in this crate performs I/O. The maintainer consumes entity
//! change events and emits pointer deltas through a sink port; the range
//! encoder lowers cursor requests into byte-ordered key ranges for the
//! store to scan.
#![warn(unreachable_pub)]

pub mod index;
pub mod key;
pub mod range;

///
/// Prelude
///
/// Domain vocabulary only. Errors and codec internals stay one level down.
///

pub mod prelude {
    pub use crate::{
        index::{ChangeObserver, DeltaSink, IndexMaintainer, IndexedEntity, Pointer, PointerDelta},
        key::{CompositeKey, DateStamp, GroupKey, IndexPrefix},
        range::{KeyRange, RangeRequest, encode_range},
    };
}
