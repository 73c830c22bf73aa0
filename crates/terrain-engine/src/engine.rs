// This file is licensed under the Apache-2.0 License, see license file

use std::collections::HashMap;
use std::sync::Arc;

use terrain_cache::{GridCache, GridCacheItem};
use terrain_core::{CellId, EngineError, Point, Value};
use terrain_grid::{cell_end, cell_prefix, compute_grid_id, key_of, parse_key};
use terrain_storage::Store;
use tracing::warn;

use crate::config::EngineConfig;

/// A grid-partitioned, cache-fronted view over the embedded store.
///
/// Writes are write-through: a write is durable in the store before it is
/// ever reflected in the cache, so a crash between the two never leaves the
/// cache holding a value the store does not have. Reads warm the whole cell
/// on a cache miss, on the assumption that a point lookup is usually the
/// first of many against its neighbourhood.
pub struct TerrainEngine {
	bounds: terrain_core::Bounds,
	cache: GridCache,
	store: Arc<Store>,
}

impl TerrainEngine {
	pub fn new(store: Arc<Store>, config: EngineConfig) -> Self {
		Self { bounds: config.bounds, cache: GridCache::new(config.cache_capacity), store }
	}

	pub fn compute_grid_id(&self, point: Point) -> CellId {
		compute_grid_id(&self.bounds, point)
	}

	pub fn put(&self, point: Point, value: Value, sync: bool) -> Result<(), EngineError> {
		if !point.within(&self.bounds) {
			return Err(EngineError::OutOfBounds { lon: point.lon, lat: point.lat });
		}

		let cell = self.compute_grid_id(point);
		let key = key_of(cell, point);
		self.store.put(key.as_bytes(), &value, sync)?;

		if let Some(item) = self.cache.get(cell) {
			item.insert(key, value);
		}
		Ok(())
	}

	/// On a cache hit for the point's cell, serves the value straight from
	/// the resident mapping. On a miss, reads the store directly and then
	/// materialises the whole cell into cache, regardless of whether the
	/// store read found anything — the next lookup against a neighbouring
	/// point in the same cell should not also miss.
	pub fn get(&self, point: Point) -> Result<Option<Value>, EngineError> {
		if !point.within(&self.bounds) {
			return Err(EngineError::OutOfBounds { lon: point.lon, lat: point.lat });
		}

		let cell = self.compute_grid_id(point);
		let key = key_of(cell, point);

		if let Some(item) = self.cache.get(cell) {
			return Ok(item.get(&key));
		}

		let value = self.store.get(key.as_bytes())?;
		self.load_cell_into_cache(cell);
		Ok(value)
	}

	/// Validates every point before writing any of them: either all writes
	/// land in one atomic batch commit, or none do.
	pub fn batch_put(&self, points: &[(Point, Value)], sync: bool) -> Result<(), EngineError> {
		for (point, _) in points {
			if !point.within(&self.bounds) {
				return Err(EngineError::OutOfBounds { lon: point.lon, lat: point.lat });
			}
		}

		let keyed: Vec<(CellId, String, &Value)> = points
			.iter()
			.map(|(point, value)| {
				let cell = self.compute_grid_id(*point);
				(cell, key_of(cell, *point), value)
			})
			.collect();

		let mut batch = self.store.batch();
		for (_, key, value) in &keyed {
			batch.put(key.as_bytes(), value);
		}
		batch.commit(sync)?;

		for (cell, key, value) in keyed {
			if let Some(item) = self.cache.get(cell) {
				item.insert(key, value.clone());
			}
		}
		Ok(())
	}

	/// Visits every resident point inside the closed rectangle
	/// `[min_lon, max_lon] x [min_lat, max_lat]`, cell by cell in
	/// row-major order. Per cell, serves from cache when resident and
	/// falls back to a store range scan otherwise; the result set is the
	/// same either way.
	pub fn range_query(
		&self,
		min_lon: f64,
		min_lat: f64,
		max_lon: f64,
		max_lat: f64,
		mut visit: impl FnMut(f64, f64, &[u8]),
	) {
		let (row_lo, col_lo) = self.bounds.cell_of(min_lon, min_lat);
		let (row_hi, col_hi) = self.bounds.cell_of(max_lon, max_lat);
		let within =
			|lon: f64, lat: f64| lon >= min_lon && lon <= max_lon && lat >= min_lat && lat <= max_lat;

		for row in row_lo..=row_hi {
			for col in col_lo..=col_hi {
				let cell = CellId::new(row, col);

				if let Some(item) = self.cache.get(cell) {
					for (key, value) in item.snapshot() {
						match parse_key(&key) {
							Some(point) if within(point.lon, point.lat) => {
								visit(point.lon, point.lat, &value)
							}
							Some(_) => {}
							None => warn!(key = %key, "skipping malformed cached key"),
						}
					}
					continue;
				}

				let prefix = cell_prefix(cell);
				let end = cell_end(cell);
				self.store.range_query(prefix.as_bytes(), end.as_bytes(), |k, v| {
					let key = String::from_utf8_lossy(k);
					match parse_key(&key) {
						Some(point) if within(point.lon, point.lat) => visit(point.lon, point.lat, v),
						Some(_) => {}
						None => warn!(key = %key, "skipping malformed stored key"),
					}
				});
			}
		}
	}

	/// Loads `cell`'s full contents into cache ahead of time.
	pub fn preload_grid(&self, cell: CellId) {
		self.load_cell_into_cache(cell);
	}

	pub fn evict_grid_from_cache(&self, cell: CellId) {
		self.cache.remove(cell);
	}

	pub fn clear_cache(&self) {
		self.cache.clear();
	}

	pub fn get_cache_size(&self) -> usize {
		self.cache.size()
	}

	pub fn get_stats(&self) -> String {
		self.store.get_stats()
	}

	pub fn stats(&self) -> terrain_storage::StorageStats {
		self.store.stats()
	}

	fn load_cell_into_cache(&self, cell: CellId) {
		let prefix = cell_prefix(cell);
		let end = cell_end(cell);
		let mut entries = HashMap::new();
		self.store.range_query(prefix.as_bytes(), end.as_bytes(), |k, v| {
			entries.insert(String::from_utf8_lossy(k).into_owned(), v.to_vec());
		});
		self.cache.put(cell, Arc::new(GridCacheItem::from_entries(cell, entries)));
	}
}

impl Drop for TerrainEngine {
	fn drop(&mut self) {
		self.cache.clear();
	}
}
