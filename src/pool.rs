/***************************************************************************************************
 * Copyright (c) 2020-2023 Qualcomm Innovation Center, Inc. All rights reserved.
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy of this software
 * and associated documentation files (the “Software”), to deal in the Software without
 * restriction, including without limitation the rights to use, copy, modify, merge, publish,
 * distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all copies or
 * substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING
 * BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
 * NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
 * DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
 **************************************************************************************************/
//! Scratch buffer pools.
//!
//! The composite collator's two-phase map write (scan key/value pairs into scratch, sort, then
//! copy into the output buffer - see `collate::composite`) is the reason these pools exist.
//! Acquisition never allocates once the pool has warmed up; release happens on every exit path,
//! including error paths, because it is driven by `Drop` rather than an explicit call.
use std::sync::Mutex;

/// An item a pool can hand out and reclaim. Reclaiming only resets the logical length, it does
/// not shrink the backing allocation - this is what makes re-use cheap.
pub(crate) trait PoolItem: Default {
    fn clear_logical(&mut self);
    fn reserve_hint(&mut self, hint: usize);
}

impl<X> PoolItem for Vec<X> {
    #[inline]
    fn clear_logical(&mut self) {
        self.clear();
    }
    #[inline]
    fn reserve_hint(&mut self, hint: usize) {
        if self.capacity() < hint {
            self.reserve(hint - self.capacity());
        }
    }
}

struct Pool<T: PoolItem> {
    hint: usize,
    free: Mutex<Vec<T>>,
}

impl<T: PoolItem> Pool<T> {
    fn new(hint: usize) -> Self {
        Pool {
            hint,
            free: Mutex::new(Vec::new()),
        }
    }

    fn acquire(&self) -> T {
        let mut item = self
            .free
            .lock()
            .expect("pool mutex poisoned")
            .pop()
            .unwrap_or_default();
        item.reserve_hint(self.hint);
        item
    }

    fn release(&self, mut item: T) {
        item.clear_logical();
        self.free.lock().expect("pool mutex poisoned").push(item);
    }
}

/// RAII guard returned by every `acquire_*` method. The wrapped buffer is always returned to its
/// pool when the guard drops, whether that happens because the caller succeeded or because an
/// error propagated out via `?`.
pub(crate) struct PoolGuard<'a, T: PoolItem> {
    pool: &'a Pool<T>,
    item: Option<T>,
}

impl<'a, T: PoolItem> std::ops::Deref for PoolGuard<'a, T> {
    type Target = T;
    fn deref(&self) -> &T {
        self.item.as_ref().expect("pool guard used after drop")
    }
}

impl<'a, T: PoolItem> std::ops::DerefMut for PoolGuard<'a, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.item.as_mut().expect("pool guard used after drop")
    }
}

impl<'a, T: PoolItem> Drop for PoolGuard<'a, T> {
    fn drop(&mut self) {
        if let Some(item) = self.item.take() {
            self.pool.release(item);
        }
    }
}

/// The full set of scratch pools bound to a `Config`. Built lazily the first time a `Config`
/// needs one (see `Config::pools`), and rebuilt whenever the memory-pool knobs change.
pub(crate) struct Pools {
    pub(crate) strlen: usize,
    pub(crate) numkeys: usize,
    pub(crate) itemlen: usize,
    pub(crate) ptrlen: usize,
    string_pool: Pool<Vec<u8>>,
    item_pool: Pool<Vec<u8>>,
    kv_pool: Pool<Vec<(usize, Vec<u8>, usize, usize)>>,
    ptr_pool: Pool<Vec<String>>,
}

impl Pools {
    pub(crate) fn new(strlen: usize, numkeys: usize, itemlen: usize, ptrlen: usize) -> Self {
        Pools {
            strlen,
            numkeys,
            itemlen,
            ptrlen,
            string_pool: Pool::new(strlen),
            item_pool: Pool::new(itemlen),
            kv_pool: Pool::new(numkeys),
            ptr_pool: Pool::new(ptrlen / 8 + 1),
        }
    }

    /// Scratch a JSON string literal is unescaped into while it is scanned, bounded by `strlen`.
    pub(crate) fn acquire_string(&self) -> PoolGuard<'_, Vec<u8>> {
        PoolGuard {
            pool: &self.string_pool,
            item: Some(self.string_pool.acquire()),
        }
    }

    /// Scratch the two-phase map writer encodes every property's value bytes into, in
    /// insertion order, before the sorted copy - bounded in total length by `itemlen`.
    pub(crate) fn acquire_item(&self) -> PoolGuard<'_, Vec<u8>> {
        PoolGuard {
            pool: &self.item_pool,
            item: Some(self.item_pool.acquire()),
        }
    }

    /// Scratch for the `(original-index, collated-key-bytes, value-start, value-end)`
    /// references sorted before a map is finalized. Bounded in length by `numkeys`; the
    /// `value-start`/`value-end` pair indexes into the buffer returned by [`Pools::acquire_item`].
    pub(crate) fn acquire_kv(&self) -> PoolGuard<'_, Vec<(usize, Vec<u8>, usize, usize)>> {
        PoolGuard {
            pool: &self.kv_pool,
            item: Some(self.kv_pool.acquire()),
        }
    }

    /// Scratch for the unescaped reference-token segments of a JSON Pointer, parsed from a raw
    /// pointer string bounded in length by `ptrlen`.
    pub(crate) fn acquire_ptr(&self) -> PoolGuard<'_, Vec<String>> {
        PoolGuard {
            pool: &self.ptr_pool,
            item: Some(self.ptr_pool.acquire()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_returns_buffer_on_drop() {
        let pools = Pools::new(64, 16, 256, 128);
        {
            let mut g = pools.acquire_string();
            g.extend_from_slice(b"hello");
            assert_eq!(&g[..], b"hello");
        }
        let g2 = pools.acquire_string();
        assert!(g2.is_empty(), "buffer must be logically cleared on release");
    }

    #[test]
    fn guard_returns_buffer_on_early_return() {
        let pools = Pools::new(64, 16, 256, 128);
        fn fallible(pools: &Pools) -> Result<(), ()> {
            let mut g = pools.acquire_item();
            g.push(1);
            Err(())
        }
        let _ = fallible(&pools);
        let g = pools.acquire_item();
        assert!(g.is_empty());
    }
}
