// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    execution::{DeclarativeEnvironmentRecord, Realm},
    types::{ObjectHeapData, SymbolHeapData},
};
use core::fmt::Debug;
use std::hash::{Hash, Hasher};
use std::{marker::PhantomData, num::NonZeroU32};

/// A partial view to the Agent's Heap that allows accessing a specific
/// kind of record by index.
///
/// The index is stored off by one so that `Option<BaseIndex<T>>` stays the
/// same size as the index itself.
pub struct BaseIndex<T: ?Sized>(NonZeroU32, PhantomData<T>);

impl<T: ?Sized> Debug for BaseIndex<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        assert!(self.0.get() != 0);
        (&self.0.get() - 1).fmt(f)
    }
}

impl<T: ?Sized> Clone for BaseIndex<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for BaseIndex<T> {}

impl<T: ?Sized> PartialEq for BaseIndex<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl<T: ?Sized> Eq for BaseIndex<T> {}

impl<T: ?Sized> PartialOrd for BaseIndex<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: ?Sized> Ord for BaseIndex<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T: ?Sized> Hash for BaseIndex<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T: ?Sized> BaseIndex<T> {
    pub const fn into_index(self) -> usize {
        self.0.get() as usize - 1
    }

    pub const fn into_u32(self) -> u32 {
        self.0.get() - 1
    }

    pub const fn from_index(value: usize) -> Self {
        assert!(value < u32::MAX as usize);
        Self(NonZeroU32::MIN.saturating_add(value as u32), PhantomData)
    }

    pub const fn from_u32(value: u32) -> Self {
        assert!(value != u32::MAX);
        Self(NonZeroU32::MIN.saturating_add(value), PhantomData)
    }

    /// Index of the most recently pushed record in `vec`.
    pub fn last<U>(vec: &[U]) -> Self {
        assert!(!vec.is_empty());
        Self::from_index(vec.len() - 1)
    }
}

pub type DeclarativeEnvironmentIndex = BaseIndex<DeclarativeEnvironmentRecord>;
pub type ObjectIndex = BaseIndex<ObjectHeapData<'static>>;
pub type RealmIndex = BaseIndex<Realm<'static>>;
pub type SymbolIndex = BaseIndex<SymbolHeapData>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn index_is_stored_off_by_one() {
        let index = ObjectIndex::from_index(0);
        assert_eq!(index.into_index(), 0);
        assert_eq!(index.into_u32(), 0);
        assert_eq!(ObjectIndex::from_u32(41).into_index(), 41);
        assert_eq!(
            core::mem::size_of::<Option<ObjectIndex>>(),
            core::mem::size_of::<ObjectIndex>()
        );
    }

    #[test]
    fn last_points_at_the_final_record() {
        let records = [1u8, 2, 3];
        assert_eq!(SymbolIndex::last(&records).into_index(), 2);
    }

    #[test]
    #[should_panic]
    fn last_of_empty_heap_vector_panics() {
        let records: [u8; 0] = [];
        let _ = SymbolIndex::last(&records);
    }
}
