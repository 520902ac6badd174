//! Value Types
//!
//! Small immutable types that cross the DataService boundary: pending-write
//! descriptions and the envelope wrapped around every fetched document.

mod record;
mod update;

pub use record::{DocumentRef, Record};
pub use update::{Update, UpdateError, UpdateKind};
