// This file is licensed under the Apache-2.0 License, see license file

use crate::ConfigError;

/// Engine bounds and cell size. Immutable once constructed.
///
/// `rows` and `cols` are derived and capped at 1000 each, because the
/// on-disk cell id tag `G_RRR_CCC` zero-pads each numeric field to exactly
/// three digits. Widening that tag is a breaking change to the storage key
/// format, so configurations that would exceed it are rejected up front.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub min_lon: f64,
	pub min_lat: f64,
	pub max_lon: f64,
	pub max_lat: f64,
	pub cell_size_deg: f64,
	pub(crate) rows: u32,
	pub(crate) cols: u32,
}

const MAX_CELL_DIMENSION: u32 = 1000;

impl Bounds {
	pub fn new(
		min_lon: f64,
		min_lat: f64,
		max_lon: f64,
		max_lat: f64,
		cell_size_deg: f64,
	) -> Result<Self, ConfigError> {
		if !(min_lon < max_lon) {
			return Err(ConfigError::InvalidBounds { min_lon, min_lat, max_lon, max_lat });
		}
		if !(min_lat < max_lat) {
			return Err(ConfigError::InvalidBounds { min_lon, min_lat, max_lon, max_lat });
		}
		if !(cell_size_deg > 0.0) {
			return Err(ConfigError::InvalidCellSize { cell_size_deg });
		}

		let cols = (((max_lon - min_lon) / cell_size_deg).ceil() as u32).max(1);
		let rows = (((max_lat - min_lat) / cell_size_deg).ceil() as u32).max(1);
		if rows > MAX_CELL_DIMENSION || cols > MAX_CELL_DIMENSION {
			return Err(ConfigError::TooManyCells { rows, cols });
		}

		Ok(Self { min_lon, min_lat, max_lon, max_lat, cell_size_deg, rows, cols })
	}

	pub fn rows(&self) -> u32 {
		self.rows
	}

	pub fn cols(&self) -> u32 {
		self.cols
	}

	/// Clamps `(lon, lat)` into bounds before flooring into a `(row, col)` pair.
	/// Out-of-bounds inputs therefore produce a defined, but possibly
	/// wrong-side, cell; callers that care about rejecting out-of-bounds
	/// points must check `contains` separately before calling this.
	pub fn cell_of(&self, lon: f64, lat: f64) -> (u32, u32) {
		let clamped_lon = lon.clamp(self.min_lon, self.max_lon);
		let clamped_lat = lat.clamp(self.min_lat, self.max_lat);

		let col = (((clamped_lon - self.min_lon) / self.cell_size_deg).floor() as i64)
			.clamp(0, self.cols as i64 - 1) as u32;
		let row = (((clamped_lat - self.min_lat) / self.cell_size_deg).floor() as i64)
			.clamp(0, self.rows as i64 - 1) as u32;
		(row, col)
	}

	pub fn contains(&self, lon: f64, lat: f64) -> bool {
		lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
	}
}
