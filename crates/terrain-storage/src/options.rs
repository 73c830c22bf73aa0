// This file is licensed under the Apache-2.0 License, see license file

/// Tuning knobs for the embedded store, exposed at initialisation time only.
#[derive(Clone, Copy, Debug)]
pub struct StoreOptions {
	pub create_if_missing: bool,
	pub block_cache_mb: usize,
	pub bloom_bits_per_key: i32,
	pub write_buffer_mb: usize,
}

impl Default for StoreOptions {
	fn default() -> Self {
		Self {
			create_if_missing: true,
			block_cache_mb: 100,
			bloom_bits_per_key: 10,
			write_buffer_mb: 64,
		}
	}
}
