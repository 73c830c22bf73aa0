// This file is licensed under the Apache-2.0 License, see license file

#![cfg_attr(not(debug_assertions), deny(warnings))]

//! Shared `tracing-subscriber` wiring used by binaries and integration
//! tests across the workspace, so every crate logs through the same
//! format and filtering instead of each rolling its own.
//!
//! Two entry points are exposed: [`init_stdout`] for interactive use
//! (examples, tests) and [`init_with_file`] for long-running processes
//! that also want a rolling file appender. Both honor `RUST_LOG` via
//! [`tracing_subscriber::EnvFilter`], falling back to `info` when unset.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Holds the non-blocking writer's background flush thread alive for as
/// long as logging is needed. Dropping it stops the writer; callers
/// should keep it bound in `main` (e.g. `let _guard = init_stdout();`)
/// rather than discarding it immediately.
#[must_use = "dropping the guard stops the tracing writer"]
pub struct TracingGuard(#[allow(dead_code)] Option<WorkerGuard>);

fn env_filter() -> EnvFilter {
	EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initializes a `tracing-subscriber` that writes formatted events to
/// stdout. Safe to call more than once per process; later calls are a
/// no-op (subsequent global subscriber installation failures are
/// swallowed, matching the common example/test pattern of not caring who
/// won the race).
pub fn init_stdout() -> TracingGuard {
	let _ = tracing_subscriber::fmt().with_env_filter(env_filter()).with_target(true).try_init();
	TracingGuard(None)
}

/// Initializes a `tracing-subscriber` that writes formatted events to a
/// daily-rolling file under `dir` with the given file name `prefix`, in
/// addition to stdout. Returns the guard that must be kept alive for the
/// background writer thread to keep flushing.
pub fn init_with_file(dir: impl AsRef<Path>, prefix: &str) -> TracingGuard {
	let file_appender = tracing_appender::rolling::daily(dir.as_ref(), prefix);
	let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

	let _ = tracing_subscriber::fmt()
		.with_env_filter(env_filter())
		.with_writer(non_blocking)
		.with_ansi(false)
		.try_init();

	TracingGuard(Some(guard))
}
