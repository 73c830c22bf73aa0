// This file is licensed under the Apache-2.0 License, see license file

#![cfg_attr(not(debug_assertions), deny(warnings))]

//! Thin, typed access to the embedded LSM store, with a process-wide
//! single-init lifecycle.
//!
//! The underlying engine is treated as an ordered byte-key/byte-value
//! store supporting point get/put/delete, atomic multi-op batches, forward
//! iteration, and range-bounded compaction — this module assumes nothing
//! more of it than that, and all of those operations are implemented here
//! on top of [`rocksdb`].

mod batch;
mod cursor;
mod options;
mod singleton;
mod store;

pub use batch::Batch;
pub use cursor::Cursor;
pub use options::StoreOptions;
pub use singleton::{handle, initialize, shutdown};
pub use store::Store;
pub use terrain_core::StoreError;

/// A typed view of the store's diagnostic dump, for operators and
/// dashboards that want more than an opaque string to render.
#[derive(Clone, Debug, PartialEq)]
pub struct StorageStats {
	pub raw: String,
	pub estimated_keys: Option<u64>,
}

/// Increments the final byte of `prefix` to compute the exclusive upper
/// bound of a prefix scan. Returns `None` when `prefix` is empty (scan
/// everything) or consists entirely of `0xFF` bytes (no finite successor,
/// so the scan is open-ended).
pub fn succ(prefix: &[u8]) -> Option<Vec<u8>> {
	if prefix.is_empty() {
		return None;
	}
	let mut out = prefix.to_vec();
	for i in (0..out.len()).rev() {
		if out[i] != 0xFF {
			out[i] += 1;
			out.truncate(i + 1);
			return Some(out);
		}
	}
	None
}
