// This file is licensed under the Apache-2.0 License, see license file

use serde::Serialize;

use crate::config::PoolMode;

/// A point-in-time snapshot of the pool's internal state, useful for
/// diagnostics and for tests that assert on elastic sizing behaviour.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct PoolStats {
	pub queue_len: usize,
	pub worker_count: usize,
	pub mode: PoolMode,
}
