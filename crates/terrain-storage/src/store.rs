// This file is licensed under the Apache-2.0 License, see license file

use std::path::Path;

use rocksdb::{BlockBasedOptions, Cache, Options, WriteOptions, DB};
use terrain_core::StoreError;
use tracing::{error, trace};

use crate::{options::StoreOptions, Batch, Cursor};

/// A typed handle onto one opened instance of the embedded store.
pub struct Store {
	pub(crate) db: DB,
}

impl Store {
	/// Opens a store directly, bypassing the process-wide singleton.
	///
	/// Production call sites should go through [`crate::initialize`] and
	/// [`crate::handle`] instead; this constructor exists for tests and
	/// for embedders that thread a `Store` reference through explicitly
	/// rather than relying on the global slot (see the design note on
	/// singleton lifecycle).
	pub fn open(path: &Path, options: &StoreOptions) -> Result<Self, StoreError> {
		let mut db_opts = Options::default();
		db_opts.create_if_missing(options.create_if_missing);

		let cache = Cache::new_lru_cache(options.block_cache_mb * 1024 * 1024);
		let mut block_opts = BlockBasedOptions::default();
		block_opts.set_block_cache(&cache);
		block_opts.set_bloom_filter(options.bloom_bits_per_key as f64, false);
		db_opts.set_block_based_table_factory(&block_opts);
		db_opts.set_write_buffer_size(options.write_buffer_mb * 1024 * 1024);

		let db = DB::open(&db_opts, path).map_err(|e| StoreError::Io(e.to_string()))?;
		Ok(Self { db })
	}

	fn write_options(sync: bool) -> WriteOptions {
		let mut opts = WriteOptions::default();
		opts.set_sync(sync);
		opts
	}

	pub fn put(&self, key: &[u8], value: &[u8], sync: bool) -> Result<(), StoreError> {
		trace!(key = %String::from_utf8_lossy(key), "store put");
		self.db.put_opt(key, value, &Self::write_options(sync)).map_err(|e| {
			error!(error = %e, "store put failed");
			StoreError::Io(e.to_string())
		})
	}

	/// `None` is a normal negative result, never an error.
	pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
		self.db.get(key).map_err(|e| {
			error!(error = %e, "store get failed");
			StoreError::Io(e.to_string())
		})
	}

	/// Idempotent: deleting an absent key is success, not an error.
	pub fn delete(&self, key: &[u8], sync: bool) -> Result<(), StoreError> {
		trace!(key = %String::from_utf8_lossy(key), "store delete");
		self.db.delete_opt(key, &Self::write_options(sync)).map_err(|e| {
			error!(error = %e, "store delete failed");
			StoreError::Io(e.to_string())
		})
	}

	pub fn exists(&self, key: &[u8]) -> Result<bool, StoreError> {
		Ok(self.get(key)?.is_some())
	}

	pub fn batch(&self) -> Batch<'_> {
		Batch::new(self)
	}

	pub fn iterator(&self) -> Cursor<'_> {
		Cursor::new(&self.db)
	}

	/// Invokes `cb(k, v)` for every key in byte-lex `[start, end)`.
	/// `end` empty means open-ended.
	pub fn range_query(&self, start: &[u8], end: &[u8], mut cb: impl FnMut(&[u8], &[u8])) {
		let mut cursor = self.iterator();
		cursor.seek(start);
		while cursor.valid() {
			let key = cursor.key().expect("valid cursor must have a key");
			if !end.is_empty() && key >= end {
				break;
			}
			cb(key, cursor.value().expect("valid cursor must have a value"));
			cursor.next();
		}
	}

	/// Equivalent to `range_query(prefix, succ(prefix), cb)`.
	pub fn prefix_query(&self, prefix: &[u8], cb: impl FnMut(&[u8], &[u8])) {
		match crate::succ(prefix) {
			Some(end) => self.range_query(prefix, &end, cb),
			None => self.range_query(prefix, &[], cb),
		}
	}

	pub fn compact_range(&self, start: Option<&[u8]>, end: Option<&[u8]>) {
		self.db.compact_range(start, end);
	}

	pub fn get_stats(&self) -> String {
		self.db
			.property_value("rocksdb.stats")
			.ok()
			.flatten()
			.unwrap_or_else(|| "rocksdb.stats unavailable".to_string())
	}

	/// A typed wrapper around [`Store::get_stats`], additionally carrying
	/// the store's estimate of its own key count when the underlying
	/// engine exposes it via a property query. Absent rather than zero
	/// when the property is unavailable, since zero would read as "known
	/// to be empty".
	pub fn stats(&self) -> crate::StorageStats {
		let estimated_keys = self.db.property_int_value("rocksdb.estimate-num-keys").ok().flatten();
		crate::StorageStats { raw: self.get_stats(), estimated_keys }
	}
}
