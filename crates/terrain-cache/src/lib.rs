// This file is licensed under the Apache-2.0 License, see license file

#![cfg_attr(not(debug_assertions), deny(warnings))]

//! A bounded set of fully materialised grid cells, evicting the least
//! recently used cell on overflow.
//!
//! The cache key is the cell, not the point, because per-point caching
//! would not serve range queries: a range query needs every resident
//! point of a cell, not just the one the caller originally asked for.

mod item;

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;
use terrain_core::CellId;

pub use item::GridCacheItem;

/// Falls back to this capacity when the configured one is zero or negative.
const DEFAULT_CAPACITY: usize = 256;

/// Bounded mapping from cell id to grid cache item, with usage-order
/// tracking. All operations are serialised under a single mutex; the
/// `Arc<GridCacheItem>` handles returned to callers outlive the mutex and
/// remain valid to read after it is released, because entries are
/// reference-counted.
pub struct GridCache {
	inner: Mutex<LruCache<CellId, Arc<GridCacheItem>>>,
}

impl GridCache {
	/// `capacity` non-positive falls back to an implementation-defined
	/// default of at least 1.
	pub fn new(capacity: i64) -> Self {
		let capacity = if capacity > 0 { capacity as usize } else { DEFAULT_CAPACITY };
		let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1).unwrap());
		Self { inner: Mutex::new(LruCache::new(capacity)) }
	}

	/// Promotes `id` to most-recently-used and returns its item, or
	/// `None` if the cell is not resident.
	pub fn get(&self, id: CellId) -> Option<Arc<GridCacheItem>> {
		self.inner.lock().get(&id).cloned()
	}

	/// Inserts or replaces the cached item for `id`, promoting it to
	/// most-recently-used. May evict the previously least-recently-used
	/// cell if the cache was already at capacity.
	pub fn put(&self, id: CellId, item: Arc<GridCacheItem>) {
		self.inner.lock().put(id, item);
	}

	pub fn remove(&self, id: CellId) {
		self.inner.lock().pop(&id);
	}

	pub fn clear(&self) {
		self.inner.lock().clear();
	}

	pub fn size(&self) -> usize {
		self.inner.lock().len()
	}
}
