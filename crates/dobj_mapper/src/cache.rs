//! Process-wide cache of data-object metadata.
//!
//! Each data-object type is described once, on first use, and the result is
//! kept for the lifetime of the process. The number of entries is bounded
//! by the number of data-object types compiled into the program.
//!
//! Lookups of cached types only take the read lock. If two threads
//! describe the same type at the same time, the first insert wins and the
//! other result is dropped; describing a type is deterministic, so both
//! results are equal.

use alloc::boxed::Box;
use core::any::TypeId;
use std::sync::{PoisonError, RwLock};

use dobj_utils::TypeIdMap;

use crate::DataObject;
use crate::info::ObjectInfo;

static CACHE: FieldCache = FieldCache::new();

struct FieldCache(RwLock<TypeIdMap<&'static ObjectInfo>>);

impl FieldCache {
    const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    #[inline]
    fn get(&self, type_id: TypeId) -> Option<&'static ObjectInfo> {
        let map = self.0.read().unwrap_or_else(PoisonError::into_inner);
        map.get(&type_id).copied()
    }

    // Separate to reduce code compilation times
    #[inline(never)]
    fn insert(&self, type_id: TypeId, info: ObjectInfo) -> &'static ObjectInfo {
        let mut map = self.0.write().unwrap_or_else(PoisonError::into_inner);
        let mut inserted = false;
        let cached = *map.get_or_insert(type_id, || {
            inserted = true;
            Box::leak(Box::new(info))
        });
        drop(map);

        if inserted {
            log::debug!("cached {} fields of `{}`", cached.field_len(), cached.type_path());
        } else {
            log::debug!("`{}` was described concurrently, keeping the first result", cached.type_path());
        }
        cached
    }

    fn len(&self) -> usize {
        self.0.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Returns the declared fields of `T`, describing the type on first use.
///
/// # Examples
///
/// ```
/// use dobj_mapper::{DataObject, cache};
///
/// #[derive(DataObject)]
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// let a = cache::fields::<Point>();
/// let b = cache::fields::<Point>();
/// assert!(core::ptr::eq(a, b));
/// assert!(cache::contains::<Point>());
/// ```
pub fn fields<T: DataObject>() -> &'static ObjectInfo {
    let type_id = TypeId::of::<T>();
    match CACHE.get(type_id) {
        Some(info) => info,
        // `describe` runs without holding the lock.
        None => CACHE.insert(type_id, T::describe()),
    }
}

/// Returns `true` if `T` has already been described.
pub fn contains<T: DataObject>() -> bool {
    CACHE.get(TypeId::of::<T>()).is_some()
}

/// Number of cached data-object types.
pub fn len() -> usize {
    CACHE.len()
}
