//! Small-buffer-optimized, copy-on-write storage for a sequence of base-2³²
//! limbs.
//!
//! Short magnitudes (up to [`INLINE_CAP`] limbs) live inline with no heap
//! allocation; longer ones share a reference-counted heap buffer between
//! copies. A write through any handle to a shared buffer first detaches
//! (clones) it if the refcount shows other owners, so callers see plain
//! value semantics despite the sharing underneath.

use std::rc::Rc;

/// Number of limbs stored inline before a [`LimbStore`] promotes to a heap
/// buffer. Sized to comfortably hold every literal-constructed `BigInt` and
/// the first few additions/multiplications of such values without
/// allocating.
pub const INLINE_CAP: usize = 4;

#[derive(Clone)]
enum Repr {
    Inline([u32; INLINE_CAP]),
    Shared(Rc<Vec<u32>>),
}

/// A value-semantics vector of `u32` limbs, little-endian (index 0 is least
/// significant).
#[derive(Clone)]
pub struct LimbStore {
    size: usize,
    repr: Repr,
}

impl LimbStore {
    /// Empty store, no allocation.
    pub fn new() -> Self {
        LimbStore {
            size: 0,
            repr: Repr::Inline([0; INLINE_CAP]),
        }
    }

    /// `n` limbs, each set to `v`.
    pub fn new_filled(n: usize, v: u32) -> Self {
        let mut store = LimbStore::new();
        for _ in 0..n {
            store.push_back(v);
        }
        store
    }

    /// `n` limbs of zero.
    pub fn new_zeroed(n: usize) -> Self {
        LimbStore::new_filled(n, 0)
    }

    /// Builds a store holding exactly the given limbs, in order.
    pub fn from_list(values: &[u32]) -> Self {
        let mut store = LimbStore::new();
        for &v in values {
            store.push_back(v);
        }
        store
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    fn as_slice(&self) -> &[u32] {
        match &self.repr {
            Repr::Inline(buf) => &buf[..self.size],
            Repr::Shared(rc) => &rc[..self.size],
        }
    }

    #[inline]
    pub fn get(&self, i: usize) -> u32 {
        self.as_slice()[i]
    }

    /// Last limb. Panics on an empty store.
    pub fn back(&self) -> u32 {
        assert!(self.size > 0, "back() on empty LimbStore");
        self.get(self.size - 1)
    }

    /// Ensures the active buffer is uniquely owned, cloning it first if it
    /// isn't. No-op for an already-unique shared buffer or an inline buffer
    /// (which is always logically unique, since `Clone` duplicates it).
    fn detach(&mut self) {
        if let Repr::Shared(rc) = &self.repr {
            if Rc::strong_count(rc) > 1 {
                tracing::trace!(size = self.size, "LimbStore::detach copying shared buffer");
                let mut buf = Vec::with_capacity(self.size + 2);
                buf.extend_from_slice(&rc[..self.size]);
                self.repr = Repr::Shared(Rc::new(buf));
            }
        }
    }

    /// Promotes an inline buffer to a heap-backed one, reserving room to
    /// grow without an immediate second reallocation.
    fn promote(&mut self) {
        if let Repr::Inline(buf) = &self.repr {
            let mut v = Vec::with_capacity(INLINE_CAP + 2);
            v.extend_from_slice(&buf[..self.size]);
            self.repr = Repr::Shared(Rc::new(v));
        }
    }

    pub fn push_back(&mut self, v: u32) {
        if matches!(self.repr, Repr::Inline(_)) && self.size == INLINE_CAP {
            self.promote();
        } else {
            self.detach();
        }
        match &mut self.repr {
            Repr::Inline(buf) => buf[self.size] = v,
            Repr::Shared(rc) => Rc::get_mut(rc)
                .expect("LimbStore::push_back on non-unique buffer")
                .push(v),
        }
        self.size += 1;
    }

    /// Removes and returns the last limb. Panics on an empty store.
    pub fn pop_back(&mut self) -> u32 {
        assert!(self.size > 0, "pop_back() on empty LimbStore");
        let v = self.back();
        self.detach();
        if let Repr::Shared(rc) = &mut self.repr {
            Rc::get_mut(rc)
                .expect("LimbStore::pop_back on non-unique buffer")
                .truncate(self.size - 1);
        }
        self.size -= 1;
        v
    }

    pub fn set(&mut self, i: usize, v: u32) {
        assert!(i < self.size, "LimbStore index {i} out of bounds ({})", self.size);
        self.detach();
        match &mut self.repr {
            Repr::Inline(buf) => buf[i] = v,
            Repr::Shared(rc) => {
                Rc::get_mut(rc).expect("LimbStore::set on non-unique buffer")[i] = v
            }
        }
    }

    pub fn swap(&mut self, other: &mut LimbStore) {
        std::mem::swap(self, other);
    }
}

impl Default for LimbStore {
    fn default() -> Self {
        LimbStore::new()
    }
}

impl std::fmt::Debug for LimbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice().iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_inline_and_sized_zero() {
        let s = LimbStore::new();
        assert_eq!(s.size(), 0);
        assert!(s.is_empty());
    }

    #[test]
    fn push_pop_roundtrip() {
        let mut s = LimbStore::new();
        for i in 0..10u32 {
            s.push_back(i);
        }
        assert_eq!(s.size(), 10);
        for i in (0..10u32).rev() {
            assert_eq!(s.pop_back(), i);
        }
        assert!(s.is_empty());
    }

    #[test]
    #[should_panic(expected = "empty LimbStore")]
    fn pop_empty_panics() {
        LimbStore::new().pop_back();
    }

    #[test]
    fn clone_then_mutate_detaches() {
        let mut a = LimbStore::new_filled(20, 7);
        let b = a.clone();
        a.set(0, 99);
        assert_eq!(a.get(0), 99);
        assert_eq!(b.get(0), 7);
    }

    #[test]
    fn inline_to_shared_promotion_preserves_values() {
        let mut s = LimbStore::new();
        for i in 0..(INLINE_CAP as u32 + 5) {
            s.push_back(i);
        }
        for i in 0..(INLINE_CAP as u32 + 5) {
            assert_eq!(s.get(i as usize), i);
        }
    }

    #[test]
    fn from_list_matches_indices() {
        let s = LimbStore::from_list(&[1, 2, 3]);
        assert_eq!(s.size(), 3);
        assert_eq!(s.get(0), 1);
        assert_eq!(s.get(1), 2);
        assert_eq!(s.get(2), 3);
    }

    #[test]
    fn clone_of_shared_buffer_is_independent_after_mutation() {
        let mut a = LimbStore::new_filled(INLINE_CAP + 1, 1);
        let b = a.clone();
        for i in 0..a.size() {
            a.set(i, 42);
        }
        for i in 0..b.size() {
            assert_eq!(b.get(i), 1);
        }
    }

    #[test]
    fn pop_back_on_shared_buffer_detaches() {
        let mut a = LimbStore::new_filled(INLINE_CAP + 2, 5);
        let b = a.clone();
        a.pop_back();
        assert_eq!(a.size(), INLINE_CAP + 1);
        assert_eq!(b.size(), INLINE_CAP + 2);
    }
}
