//! Field descriptors and per-type metadata.

// -----------------------------------------------------------------------------
// Modules

mod field;
mod object_info;

// -----------------------------------------------------------------------------
// Exports

pub use field::{Field, ObjectRef, OpaqueRef, ScalarKind, TypeTag};
pub use object_info::{ErasedConstructor, ObjectInfo};
