// This file is licensed under the Apache-2.0 License, see license file

#![cfg_attr(not(debug_assertions), deny(warnings))]

//! Composes the grid index, the embedded store, and the grid cache into a
//! single geolocated key-value surface: put/get by [`Point`], range queries
//! over a rectangle, and explicit cache management for callers that want
//! to pin or evict specific cells.

mod config;
mod engine;

pub use config::EngineConfig;
pub use engine::TerrainEngine;
pub use terrain_core::{EngineError, Point};
