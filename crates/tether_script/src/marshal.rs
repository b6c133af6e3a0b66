//! Value marshalling across the boundary
//!
//! The two sides never share ownership, so every crossing either copies or
//! is a scalar:
//!
//! - Scalars (`f32`, `bool`, `BodyType`) travel by value both ways.
//! - Vectors are read through a caller-owned `&mut` slot that the engine
//!   fills, and written through `&`. Nothing is heap-allocated for them.
//! - Strings come back as an owned `String` and go in as `&str`; the engine
//!   copies what it needs and keeps no reference into script memory.

use crate::ffi::NativeCalls;
use crate::glue;

/// Read a value through an out-parameter entry.
///
/// The slot starts at `V::default()` and holds whatever the engine wrote
/// once the entry returns.
pub(crate) fn fetch<V: Default>(read: impl FnOnce(&dyn NativeCalls, &mut V)) -> V {
    let mut slot = V::default();
    glue::with_calls(|calls| read(calls, &mut slot));
    slot
}

/// Call an entry that takes or returns plain values.
pub(crate) fn call<R>(f: impl FnOnce(&dyn NativeCalls) -> R) -> R {
    glue::with_calls(f)
}
