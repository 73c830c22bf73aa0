// This file is licensed under the Apache-2.0 License, see license file

//! # Terrain Engine + Worker Pool Demo
//!
//! Demonstrates the two reusable cores in this workspace wired together:
//! - opening the process-wide singleton terrain store and writing/reading
//!   elevation samples through it
//! - a range query over a rectangle of cells
//! - dispatching that work across a priority-driven worker pool
//!
//! Run with: `cargo run --bin terrain-demo`

use std::sync::Arc;
use std::time::Duration;

use terrain_engine::{EngineConfig, Point, TerrainEngine};
use tracing::info;
use worker_pool::{PoolMode, Priority, WorkerPool, WorkerPoolConfig};

fn main() {
	let _tracing = terrain_tracing::init_stdout();

	let dir = tempfile::tempdir().expect("failed to create scratch directory");
	terrain_storage::initialize(dir.path(), None).expect("failed to initialize terrain store");
	let store = terrain_storage::handle().expect("store handle should be available after initialize");

	// Beijing-area bounds, matching the reference scenarios in the spec.
	let config = EngineConfig::new(116.0, 39.0, 117.5, 41.0, 0.01, 500).expect("invalid engine configuration");
	let engine = Arc::new(TerrainEngine::new(store, config));

	let pool = WorkerPool::new(WorkerPoolConfig {
		min_threads: 2,
		max_threads: 4,
		max_tasks: 256,
		idle_timeout: Duration::from_secs(5),
		mode: PoolMode::Cached,
	});

	info!("submitting elevation writes across the worker pool");
	let samples = [
		(Point::new(116.405285, 39.904989), "43.5"),
		(Point::new(116.402000, 39.901000), "41.2"),
		(Point::new(116.500000, 40.000000), "58.9"),
	];

	let mut handles = Vec::new();
	for (point, elevation) in samples {
		let engine = Arc::clone(&engine);
		let value = elevation.as_bytes().to_vec();
		handles.push(
			pool.submit(format!("put({},{})", point.lon, point.lat), Priority::Normal, move || {
				engine.put(point, value, false)
			})
			.expect("submission should succeed while the pool is running"),
		);
	}
	for handle in handles {
		handle.wait().expect("task panicked").expect("write rejected as out of bounds");
	}

	let point = Point::new(116.405285, 39.904989);
	let engine_for_read = Arc::clone(&engine);
	let read = pool
		.submit("get(116.405285,39.904989)", Priority::High, move || engine_for_read.get(point))
		.expect("submission should succeed")
		.wait()
		.expect("task panicked")
		.expect("read should not fail for in-bounds coordinates");
	info!(?read, "point lookup result");

	info!("running a range query over the cell neighbourhood");
	let mut found = Vec::new();
	engine.range_query(116.40, 39.90, 116.50, 40.00, |lon, lat, value| {
		found.push((lon, lat, String::from_utf8_lossy(value).into_owned()));
	});
	for (lon, lat, value) in &found {
		info!(lon = %lon, lat = %lat, value = %value, "in range");
	}

	info!(cache_size = engine.get_cache_size(), "cells resident in cache after the demo run");

	pool.shutdown();
	drop(engine);
	terrain_storage::shutdown().expect("store should still be initialized");
}
