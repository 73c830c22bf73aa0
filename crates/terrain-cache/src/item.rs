// This file is licensed under the Apache-2.0 License, see license file

use std::collections::HashMap;

use parking_lot::RwLock;
use terrain_core::{CellId, Value};

/// The complete contents of one cell, as of the moment it was loaded.
///
/// The inner mapping is behind its own lock, separate from the cache's
/// map-level lock, so that a write targeting an already-resident cell
/// only needs the cache-level lock long enough to look the item up —
/// the mutation itself does not hold it. This keeps a reader that is
/// mid-lookup from ever observing a torn update.
pub struct GridCacheItem {
	pub cell: CellId,
	entries: RwLock<HashMap<String, Value>>,
}

impl GridCacheItem {
	pub fn new(cell: CellId) -> Self {
		Self { cell, entries: RwLock::new(HashMap::new()) }
	}

	pub fn from_entries(cell: CellId, entries: HashMap<String, Value>) -> Self {
		Self { cell, entries: RwLock::new(entries) }
	}

	pub fn get(&self, key: &str) -> Option<Value> {
		self.entries.read().get(key).cloned()
	}

	pub fn insert(&self, key: String, value: Value) {
		self.entries.write().insert(key, value);
	}

	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}

	/// Iterates a snapshot of the cell's entries. Order is unspecified,
	/// matching the engine's contract for cache-served range queries.
	pub fn snapshot(&self) -> Vec<(String, Value)> {
		self.entries.read().iter().map(|(k, v)| (k.clone(), v.clone())).collect()
	}
}
