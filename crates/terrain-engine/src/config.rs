// This file is licensed under the Apache-2.0 License, see license file

use terrain_core::{Bounds, ConfigError};

/// Construction parameters for a [`crate::TerrainEngine`].
///
/// Validation (bounds ordering, cell size positivity, the 1000x1000 cell
/// cap) happens once, here, at construction time rather than being
/// re-checked on every lookup.
#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
	pub bounds: Bounds,
	pub cache_capacity: i64,
}

impl EngineConfig {
	pub fn new(
		min_lon: f64,
		min_lat: f64,
		max_lon: f64,
		max_lat: f64,
		cell_size_deg: f64,
		cache_capacity: i64,
	) -> Result<Self, ConfigError> {
		let bounds = Bounds::new(min_lon, min_lat, max_lon, max_lat, cell_size_deg)?;
		Ok(Self { bounds, cache_capacity })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rejects_invalid_bounds_before_the_engine_is_built() {
		assert!(EngineConfig::new(10.0, 0.0, 5.0, 1.0, 0.1, 256).is_err());
	}

	#[test]
	fn accepts_a_well_formed_configuration() {
		let config = EngineConfig::new(116.0, 39.0, 117.5, 41.0, 0.01, 256).unwrap();
		assert_eq!(config.bounds.rows(), 200);
		assert_eq!(config.bounds.cols(), 150);
	}
}
