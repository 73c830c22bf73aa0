// This file is licensed under the Apache-2.0 License, see license file

#![cfg_attr(not(debug_assertions), deny(warnings))]

//! Pure, side-effect-free mapping between geolocated coordinates and the
//! storage keys that group them by grid cell.
//!
//! Storage key format (bit-stable): `G_RRR_CCC|<lon>|<lat>`, where `<lon>`
//! and `<lat>` are fixed-notation decimals with exactly 7 fractional
//! digits. Byte-lex order of keys therefore groups all points of one cell
//! contiguously, in the range `[cellPrefix(id), cellEnd(id))`.

use terrain_core::{Bounds, CellId, Point};

/// The sentinel character (ASCII `~`, 0x7E) that closes a cell's key range.
/// It sorts strictly greater than any digit or `.`, so `cellEnd` is an
/// exclusive upper bound on every key the cell could ever contain.
pub const SENTINEL: char = '~';

const SEPARATOR: char = '|';

/// Deterministic function of `point` and `bounds`. Coordinates are clamped
/// into bounds before flooring, so out-of-bounds inputs produce a defined
/// but possibly wrong-side cell; callers must check bounds separately
/// before relying on the result for validation.
pub fn compute_grid_id(bounds: &Bounds, point: Point) -> CellId {
	let (row, col) = bounds.cell_of(point.lon, point.lat);
	CellId::new(row, col)
}

/// Formats a coordinate with exactly 7 fractional digits, fixed notation,
/// no exponent.
pub fn fmt7(value: f64) -> String {
	format!("{value:.7}")
}

/// Full storage key for `point`, already known to belong to `cell`.
pub fn key_of(cell: CellId, point: Point) -> String {
	format!("{cell}{SEPARATOR}{}{SEPARATOR}{}", fmt7(point.lon), fmt7(point.lat))
}

/// Inclusive lower bound of `cell`'s key range.
pub fn cell_prefix(cell: CellId) -> String {
	format!("{cell}{SEPARATOR}")
}

/// Exclusive upper bound of `cell`'s key range.
pub fn cell_end(cell: CellId) -> String {
	format!("{cell}{SEPARATOR}{SENTINEL}")
}

/// Splits a storage key on its first two `|` separators and parses the two
/// fractional numbers back into a [`Point`]. Malformed keys (should not
/// occur under this module's own writer) yield `None`; callers must treat
/// that as "skip".
pub fn parse_key(key: &str) -> Option<Point> {
	let mut parts = key.splitn(3, SEPARATOR);
	let _cell_tag = parts.next()?;
	let lon_str = parts.next()?;
	let lat_str = parts.next()?;

	let lon = lon_str.parse::<f64>().ok()?;
	let lat = lat_str.parse::<f64>().ok()?;
	Some(Point::new(lon, lat))
}
