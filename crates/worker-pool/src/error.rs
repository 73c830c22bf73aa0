// This file is licensed under the Apache-2.0 License, see license file

use thiserror::Error;

/// Errors surfaced by the worker pool's public operations.
#[derive(Debug, Error)]
pub enum PoolError {
	#[error("task queue is full (max {max_tasks} tasks) and stayed full past the admission wait")]
	QueueFull { max_tasks: usize },

	#[error("pool is shutting down and no longer accepts tasks")]
	ShuttingDown,

	/// The task's result channel was dropped before the result arrived,
	/// which only happens when the pool is shut down with the task still
	/// queued or mid-execution.
	#[error("task was cancelled before it produced a result")]
	Cancelled,

	/// The task's closure unwound. The worker that ran it logged the
	/// panic and kept running; this is the only trace of it visible to
	/// the submitter.
	#[error("task panicked: {0}")]
	TaskPanicked(String),
}
