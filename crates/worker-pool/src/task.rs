// This file is licensed under the Apache-2.0 License, see license file

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use crate::error::PoolError;
use crate::priority::Priority;

/// A named unit of work queued for a worker to run. The body is erased to
/// `FnOnce() + Send` at construction; its result, if any, is delivered
/// through the paired [`TaskHandle`].
pub struct QueuedTask {
	pub(crate) name: String,
	pub(crate) priority: Priority,
	pub(crate) sequence: u64,
	pub(crate) body: Box<dyn FnOnce() + Send>,
}

impl QueuedTask {
	pub(crate) fn new(name: String, priority: Priority, sequence: u64, body: Box<dyn FnOnce() + Send>) -> Self {
		Self { name, priority, sequence, body }
	}

	pub fn run(self) {
		(self.body)()
	}
}

impl PartialEq for QueuedTask {
	fn eq(&self, other: &Self) -> bool {
		self.priority == other.priority && self.sequence == other.sequence
	}
}
impl Eq for QueuedTask {}

impl PartialOrd for QueuedTask {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for QueuedTask {
	/// Higher priority sorts greater (so a max-heap pops it first); within
	/// the same priority, the lower sequence number sorts greater, so
	/// earlier-submitted tasks are preferred — first in, first out among
	/// peers.
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		self.priority.cmp(&other.priority).then_with(|| other.sequence.cmp(&self.sequence))
	}
}

/// A future-like handle onto a single submitted task's eventual result.
///
/// There is no async runtime backing this pool: waiting for a result means
/// blocking the calling thread on the underlying channel, optionally with a
/// deadline.
pub struct TaskHandle<T> {
	name: String,
	receiver: Receiver<Result<T, PoolError>>,
}

impl<T> TaskHandle<T> {
	pub(crate) fn new(name: String, receiver: Receiver<Result<T, PoolError>>) -> Self {
		Self { name, receiver }
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Blocks until the task completes. Returns [`PoolError::TaskPanicked`]
	/// if the task's closure unwound, or [`PoolError::Cancelled`] if the
	/// pool was shut down with this task still queued or running.
	pub fn wait(self) -> Result<T, PoolError> {
		self.receiver.recv().map_err(|_| PoolError::Cancelled)?
	}

	/// Blocks up to `timeout` for the result. `Ok(None)` means the
	/// deadline passed with the task still outstanding.
	pub fn wait_timeout(&self, timeout: Duration) -> Result<Option<T>, PoolError> {
		match self.receiver.recv_timeout(timeout) {
			Ok(result) => result.map(Some),
			Err(RecvTimeoutError::Timeout) => Ok(None),
			Err(RecvTimeoutError::Disconnected) => Err(PoolError::Cancelled),
		}
	}
}
