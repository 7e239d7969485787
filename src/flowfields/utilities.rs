//! Useful structures and tools used by the fields
//!

use bevy::prelude::*;

/// Cheapest cost a [crate::prelude::CostField] cell can hold, open terrain
pub const COST_MIN: u8 = 0;
/// Reserved [crate::prelude::CostField] value marking an impassable wall
pub const COST_MAX: u8 = 20;
/// Integration value of the target cell
pub const INTEGR_MIN: u8 = 0;
/// Integration value of a cell which has not been reached (or cannot be),
/// every integration cost saturates at this value
pub const INTEGR_MAX: u8 = u8::MAX;

/// The 8 directions of the Moore neighbourhood of a field cell. Rows grow
/// towards the South and columns grow towards the East
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Reflect)]
pub enum Ordinal {
	North,
	East,
	South,
	West,
	NorthEast,
	SouthEast,
	SouthWest,
	NorthWest,
}

impl Ordinal {
	/// Every [Ordinal] in the order neighbours are enumerated, orthogonals
	/// first followed by diagonals
	pub const ALL: [Ordinal; 8] = [
		Ordinal::North,
		Ordinal::East,
		Ordinal::South,
		Ordinal::West,
		Ordinal::NorthEast,
		Ordinal::SouthEast,
		Ordinal::SouthWest,
		Ordinal::NorthWest,
	];
	/// The `(column, row)` step taken when moving one cell in this direction
	pub fn offset(&self) -> (isize, isize) {
		match self {
			Ordinal::North => (0, -1),
			Ordinal::East => (1, 0),
			Ordinal::South => (0, 1),
			Ordinal::West => (-1, 0),
			Ordinal::NorthEast => (1, -1),
			Ordinal::SouthEast => (1, 1),
			Ordinal::SouthWest => (-1, 1),
			Ordinal::NorthWest => (-1, -1),
		}
	}
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn sentinels_are_distinct_from_ranges() {
		assert!(COST_MIN < COST_MAX);
		assert_eq!(INTEGR_MAX, u8::MAX);
		assert_eq!(INTEGR_MIN, 0);
	}
	#[test]
	fn offsets_are_distinct_unit_steps() {
		let offsets: Vec<(isize, isize)> = Ordinal::ALL.iter().map(|o| o.offset()).collect();
		for (i, offset) in offsets.iter().enumerate() {
			assert!((-1..=1).contains(&offset.0) && (-1..=1).contains(&offset.1));
			assert_ne!((0, 0), *offset);
			assert!(!offsets[i + 1..].contains(offset), "{:?} repeats", offset);
		}
	}
}
