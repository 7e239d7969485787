//! Errors reported when a caller breaks the contract of the grid
//!

use std::fmt;

/// Failures of [crate::prelude::Grid] construction, mutation and access.
///
/// An unreachable cell is never an error, it is described in-band by
/// [crate::prelude::INTEGR_MAX] and a zero flow vector. Likewise an absent or
/// out of range target simply skips a recompute
#[derive(Debug, Clone, PartialEq)]
pub enum FlowFieldError {
	/// A grid needs at least one row and one column
	InvalidDimensions {
		/// Requested number of rows
		rows: usize,
		/// Requested number of columns
		columns: usize,
	},
	/// The world size of a cell edge must be finite and positive
	InvalidCellSize(f32),
	/// A linear cell index beyond the end of the fields
	IndexOutOfRange {
		/// The offending index
		index: usize,
		/// Number of cells in the grid
		size: usize,
	},
	/// A cost above [crate::prelude::COST_MAX]
	CostOutOfRange {
		/// The offending cost
		cost: u8,
	},
	/// Supplied field data does not have one value per cell
	FieldLengthMismatch {
		/// Number of cells in the grid
		expected: usize,
		/// Number of values supplied
		found: usize,
	},
	/// A field or settings file could not be read or parsed
	Load {
		/// Location of the file
		path: String,
		/// What went wrong
		reason: String,
	},
}

impl fmt::Display for FlowFieldError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::InvalidDimensions { rows, columns } => {
				write!(
					f,
					"grid dimensions `({rows}, {columns})` are invalid, rows and columns must be positive"
				)
			}
			Self::InvalidCellSize(size) => {
				write!(f, "cell size {size} is invalid, it must be finite and positive")
			}
			Self::IndexOutOfRange { index, size } => {
				write!(f, "cell index {index} out of bounds, grid has {size} cells")
			}
			Self::CostOutOfRange { cost } => {
				write!(
					f,
					"cost {cost} out of range, expected {}..={}",
					crate::prelude::COST_MIN,
					crate::prelude::COST_MAX
				)
			}
			Self::FieldLengthMismatch { expected, found } => {
				write!(f, "field has {found} values, expected {expected}")
			}
			Self::Load { path, reason } => write!(f, "failed loading `{path}`: {reason}"),
		}
	}
}

impl std::error::Error for FlowFieldError {}
