// This file is licensed under the Apache-2.0 License, see license file

use std::time::Duration;

use serde::Serialize;

/// Governs whether the pool grows and shrinks on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PoolMode {
	/// Exactly `min_threads` workers for the lifetime of the pool.
	Fixed,
	/// Starts at `min_threads`, grows toward `max_threads` under sustained
	/// backlog, and lets idle elastic workers expire back down to
	/// `min_threads`.
	Cached,
}

#[derive(Clone, Copy, Debug)]
pub struct WorkerPoolConfig {
	pub min_threads: usize,
	pub max_threads: usize,
	pub max_tasks: usize,
	pub idle_timeout: Duration,
	pub mode: PoolMode,
}

impl Default for WorkerPoolConfig {
	fn default() -> Self {
		Self {
			min_threads: num_cpus::get(),
			max_threads: 1024,
			max_tasks: 1024,
			idle_timeout: Duration::from_secs(60),
			mode: PoolMode::Cached,
		}
	}
}
