// This file is licensed under the Apache-2.0 License, see license file

use rocksdb::{WriteBatch, WriteOptions};
use terrain_core::StoreError;
use tracing::error;

use crate::Store;

/// Stages a set of `put`/`delete` operations for atomic application.
///
/// `commit` applies all staged ops atomically from the perspective of
/// readers: either all of them become visible or none do.
pub struct Batch<'a> {
	store: &'a Store,
	inner: WriteBatch,
}

impl<'a> Batch<'a> {
	pub(crate) fn new(store: &'a Store) -> Self {
		Self { store, inner: WriteBatch::default() }
	}

	pub fn put(&mut self, key: &[u8], value: &[u8]) -> &mut Self {
		self.inner.put(key, value);
		self
	}

	pub fn delete(&mut self, key: &[u8]) -> &mut Self {
		self.inner.delete(key);
		self
	}

	pub fn len(&self) -> usize {
		self.inner.len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	pub fn commit(self, sync: bool) -> Result<(), StoreError> {
		let mut opts = WriteOptions::default();
		opts.set_sync(sync);
		self.store.db.write_opt(self.inner, &opts).map_err(|e| {
			error!(error = %e, "batch commit failed");
			StoreError::Io(e.to_string())
		})
	}
}
