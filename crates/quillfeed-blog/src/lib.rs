//! Blog service definition for Quillfeed.
//!
//! Wires the generic core against the `Post` entity: the five secondary
//! indexes, the write actions behind their access/slug ports, and the
//! paginated query views. The reactive framework hosting this service owns
//! storage, the change feed, and request dispatch; everything here is the
//! service's own schema and logic.
#![warn(unreachable_pub)]

pub mod actions;
pub mod model;
pub mod obs;
pub mod registry;
pub mod views;
