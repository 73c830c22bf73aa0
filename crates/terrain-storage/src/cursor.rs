// This file is licensed under the Apache-2.0 License, see license file

use rocksdb::{DBRawIterator, DB};

/// A forward/seekable cursor holding a snapshot-like view of the store at
/// the time it was created.
pub struct Cursor<'a> {
	inner: DBRawIterator<'a>,
}

impl<'a> Cursor<'a> {
	pub(crate) fn new(db: &'a DB) -> Self {
		Self { inner: db.raw_iterator() }
	}

	pub fn valid(&self) -> bool {
		self.inner.valid()
	}

	pub fn next(&mut self) {
		self.inner.next();
	}

	pub fn key(&self) -> Option<&[u8]> {
		self.inner.key()
	}

	pub fn value(&self) -> Option<&[u8]> {
		self.inner.value()
	}

	pub fn seek(&mut self, key: &[u8]) {
		self.inner.seek(key);
	}

	pub fn seek_to_first(&mut self) {
		self.inner.seek_to_first();
	}

	pub fn seek_to_last(&mut self) {
		self.inner.seek_to_last();
	}
}
