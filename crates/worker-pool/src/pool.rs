// This file is licensed under the Apache-2.0 License, see license file

use std::collections::BinaryHeap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, error, trace};

use crate::config::{PoolMode, WorkerPoolConfig};
use crate::error::PoolError;
use crate::priority::Priority;
use crate::stats::PoolStats;
use crate::task::{QueuedTask, TaskHandle};

/// How long `submit` waits for room in a full queue before giving up.
const QUEUE_ADMISSION_TIMEOUT: Duration = Duration::from_secs(1);
/// How often the supervisor wakes to reap expired workers and consider
/// growing the pool.
const SUPERVISOR_INTERVAL: Duration = Duration::from_secs(2);
/// Granularity of the supervisor's sleep, so shutdown is noticed promptly
/// rather than after a full interval.
const SUPERVISOR_POLL: Duration = Duration::from_millis(100);

struct Inner {
	queue: Mutex<BinaryHeap<QueuedTask>>,
	not_empty: Condvar,
	not_full: Condvar,
	shutdown: AtomicBool,
	worker_count: AtomicUsize,
	sequence: AtomicU64,
	config: WorkerPoolConfig,
	workers: Mutex<Vec<JoinHandle<()>>>,
}

/// A priority queue backed by a bounded, elastically-sized pool of worker
/// threads.
///
/// In [`PoolMode::Fixed`], exactly `min_threads` workers run for the
/// lifetime of the pool. In [`PoolMode::Cached`], the pool starts at
/// `min_threads` and a supervisor thread grows it toward `max_threads`
/// under sustained backlog; workers beyond `min_threads` self-expire after
/// `idle_timeout` with nothing to do.
pub struct WorkerPool {
	inner: Arc<Inner>,
	supervisor: Mutex<Option<JoinHandle<()>>>,
}

impl WorkerPool {
	pub fn new(config: WorkerPoolConfig) -> Self {
		let inner = Arc::new(Inner {
			queue: Mutex::new(BinaryHeap::new()),
			not_empty: Condvar::new(),
			not_full: Condvar::new(),
			shutdown: AtomicBool::new(false),
			worker_count: AtomicUsize::new(0),
			sequence: AtomicU64::new(0),
			config,
			workers: Mutex::new(Vec::new()),
		});

		for _ in 0..config.min_threads.max(1) {
			spawn_worker(&inner, true);
		}

		let supervisor = match config.mode {
			PoolMode::Cached => {
				let sup_inner = Arc::clone(&inner);
				Some(
					thread::Builder::new()
						.name("worker-pool-supervisor".to_string())
						.spawn(move || supervisor_loop(sup_inner))
						.expect("failed to spawn supervisor thread"),
				)
			}
			PoolMode::Fixed => None,
		};

		Self { inner, supervisor: Mutex::new(supervisor) }
	}

	/// Queues `f` to run on a worker thread with the given `priority`.
	/// The result is delivered through the returned [`TaskHandle`].
	///
	/// Blocks up to one second if the queue is at `max_tasks` capacity,
	/// giving workers a chance to drain it before failing with
	/// [`PoolError::QueueFull`].
	pub fn submit<F, T>(&self, name: impl Into<String>, priority: Priority, f: F) -> Result<TaskHandle<T>, PoolError>
	where
		F: FnOnce() -> T + Send + 'static,
		T: Send + 'static,
	{
		if self.inner.shutdown.load(Ordering::Acquire) {
			return Err(PoolError::ShuttingDown);
		}

		let name = name.into();
		let (tx, rx) = mpsc::channel::<Result<T, PoolError>>();
		let task_name = name.clone();
		let body: Box<dyn FnOnce() + Send> = Box::new(move || {
			let result = match panic::catch_unwind(AssertUnwindSafe(f)) {
				Ok(value) => Ok(value),
				Err(payload) => {
					let message = panic_message(&payload);
					error!(task = %task_name, message = %message, "task panicked");
					Err(PoolError::TaskPanicked(message))
				}
			};
			let _ = tx.send(result);
		});

		let sequence = self.inner.sequence.fetch_add(1, Ordering::Relaxed);
		let task = QueuedTask::new(name.clone(), priority, sequence, body);

		{
			let mut queue = self.inner.queue.lock().unwrap();
			let deadline = Instant::now() + QUEUE_ADMISSION_TIMEOUT;
			while queue.len() >= self.inner.config.max_tasks {
				if self.inner.shutdown.load(Ordering::Acquire) {
					return Err(PoolError::ShuttingDown);
				}
				let remaining = deadline.saturating_duration_since(Instant::now());
				if remaining.is_zero() {
					return Err(PoolError::QueueFull { max_tasks: self.inner.config.max_tasks });
				}
				let (guard, _) = self.inner.not_full.wait_timeout(queue, remaining).unwrap();
				queue = guard;
			}
			queue.push(task);
		}
		self.inner.not_empty.notify_one();

		if self.inner.config.mode == PoolMode::Cached {
			maybe_expand(&self.inner);
		}
		Ok(TaskHandle::new(name, rx))
	}

	pub fn stats(&self) -> PoolStats {
		PoolStats {
			queue_len: self.inner.queue.lock().unwrap().len(),
			worker_count: self.inner.worker_count.load(Ordering::Relaxed),
			mode: self.inner.config.mode,
		}
	}

	/// Stops accepting new work, wakes every worker and the supervisor,
	/// and waits for all threads to exit. Tasks still queued when this is
	/// called are dropped without running; their [`TaskHandle`] observes
	/// [`PoolError::Cancelled`]. Idempotent — calling it twice is safe.
	pub fn shutdown(&self) {
		self.inner.shutdown.store(true, Ordering::Release);
		self.inner.not_empty.notify_all();
		self.inner.not_full.notify_all();

		if let Some(handle) = self.supervisor.lock().unwrap().take() {
			let _ = handle.join();
		}

		let handles: Vec<_> = self.inner.workers.lock().unwrap().drain(..).collect();
		for handle in handles {
			let _ = handle.join();
		}

		self.inner.queue.lock().unwrap().clear();
		debug!("worker pool shut down");
	}
}

impl Drop for WorkerPool {
	fn drop(&mut self) {
		self.shutdown();
	}
}

fn spawn_worker(inner: &Arc<Inner>, core: bool) {
	inner.worker_count.fetch_add(1, Ordering::Relaxed);
	let worker_inner = Arc::clone(inner);
	let handle = thread::Builder::new()
		.name(format!("worker-pool-{}", if core { "core" } else { "elastic" }))
		.spawn(move || worker_loop(worker_inner, core))
		.expect("failed to spawn worker thread");
	inner.workers.lock().unwrap().push(handle);
}

fn worker_loop(inner: Arc<Inner>, core: bool) {
	while let Some(task) = next_task(&inner, core) {
		trace!(task = %task.name, "running task");
		task.run();
	}
	inner.worker_count.fetch_sub(1, Ordering::Relaxed);
}

/// Pops the highest-priority task, blocking until one is available. A
/// non-core (elastic) worker with nothing to do for `idle_timeout`
/// self-expires by returning `None`, unless doing so would drop the pool
/// below `min_threads`.
fn next_task(inner: &Inner, core: bool) -> Option<QueuedTask> {
	let mut queue = inner.queue.lock().unwrap();
	loop {
		if let Some(task) = queue.pop() {
			inner.not_full.notify_one();
			return Some(task);
		}
		if inner.shutdown.load(Ordering::Acquire) {
			return None;
		}

		if core {
			queue = inner.not_empty.wait(queue).unwrap();
		} else {
			let (guard, timeout) = inner.not_empty.wait_timeout(queue, inner.config.idle_timeout).unwrap();
			queue = guard;
			if timeout.timed_out()
				&& queue.is_empty()
				&& inner.worker_count.load(Ordering::Relaxed) > inner.config.min_threads
			{
				return None;
			}
		}
	}
}

fn supervisor_loop(inner: Arc<Inner>) {
	while !inner.shutdown.load(Ordering::Acquire) {
		let mut slept = Duration::ZERO;
		while slept < SUPERVISOR_INTERVAL {
			if inner.shutdown.load(Ordering::Acquire) {
				return;
			}
			thread::sleep(SUPERVISOR_POLL);
			slept += SUPERVISOR_POLL;
		}

		inner.workers.lock().unwrap().retain(|h| !h.is_finished());
		maybe_expand(&inner);
	}
}

/// Evaluated opportunistically on submission and periodically by the
/// supervisor: if there is a backlog and headroom under `max_threads`,
/// grows the pool by `min(pending_tasks, max_threads - workers)` in one
/// step rather than one worker at a time, so a sudden burst is answered
/// with a correspondingly sized jump instead of trickling up over several
/// supervisor ticks.
fn maybe_expand(inner: &Arc<Inner>) {
	let queue_len = inner.queue.lock().unwrap().len();
	let worker_count = inner.worker_count.load(Ordering::Relaxed);
	let to_add = expansion_size(queue_len, worker_count, inner.config.max_threads);
	if to_add > 0 {
		debug!(queue_len, worker_count, to_add, "expanding worker pool");
		for _ in 0..to_add {
			spawn_worker(inner, false);
		}
	}
}

/// How many workers to add given a backlog of `queue_len` tasks,
/// `worker_count` currently running, and a `max_threads` ceiling. Kept as a
/// standalone function so the growth policy is easy to reason about and to
/// exercise directly in tests.
fn expansion_size(queue_len: usize, worker_count: usize, max_threads: usize) -> usize {
	queue_len.min(max_threads.saturating_sub(worker_count))
}

/// Extracts a human-readable message from a caught panic payload, covering
/// the two payload shapes `std::panic!` actually produces.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
	if let Some(s) = payload.downcast_ref::<&str>() {
		s.to_string()
	} else if let Some(s) = payload.downcast_ref::<String>() {
		s.clone()
	} else {
		"non-string panic payload".to_string()
	}
}
