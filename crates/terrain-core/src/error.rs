// This file is licensed under the Apache-2.0 License, see license file

use thiserror::Error;

/// Errors raised while validating engine or worker pool construction parameters.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
	#[error("min_lon/min_lat must be strictly less than max_lon/max_lat (got [{min_lon}, {min_lat}] .. [{max_lon}, {max_lat}])")]
	InvalidBounds { min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64 },

	#[error("cell_size_deg must be greater than zero, got {cell_size_deg}")]
	InvalidCellSize { cell_size_deg: f64 },

	#[error("grid of {rows} rows by {cols} cols exceeds the 1000x1000 limit imposed by the 3-digit cell id tag")]
	TooManyCells { rows: u32, cols: u32 },
}

/// Errors surfaced by the embedded key-value store façade.
///
/// "not found" is deliberately absent here: it is a normal negative result
/// from `get`/`exists`, and idempotent success from `delete`, never an error.
#[derive(Debug, Error)]
pub enum StoreError {
	#[error("store has not been initialized")]
	NotInitialized,

	#[error("store is already initialized")]
	AlreadyInitialized,

	#[error("store I/O failure: {0}")]
	Io(String),
}

/// Errors surfaced by the terrain engine's public operations.
#[derive(Debug, Error)]
pub enum EngineError {
	#[error("coordinate ({lon}, {lat}) lies outside the engine's configured bounds")]
	OutOfBounds { lon: f64, lat: f64 },

	#[error(transparent)]
	Config(#[from] ConfigError),

	#[error(transparent)]
	Store(#[from] StoreError),
}
