//! The kinds of fields used by the algorithm
//!

pub mod cost_field;
pub mod flow_field;
pub mod integration_field;

use crate::prelude::*;
use bevy::prelude::*;

/// Defines required access to field arrays. Every field stores one value
/// per cell in linear index order
pub trait Field<T> {
	/// Get a reference to the field array
	fn get(&self) -> &[T];
	/// Retrieve a field cell value
	fn get_field_cell_value(&self, index: usize) -> Result<T, FlowFieldError>;
	/// Set a field cell to a value
	fn set_field_cell_value(&mut self, value: T, index: usize) -> Result<(), FlowFieldError>;
}

/// Report an `index` which does not fit a field of `size` cells
fn index_out_of_range(index: usize, size: usize) -> FlowFieldError {
	FlowFieldError::IndexOutOfRange { index, size }
}

/// `(column, row)` position of a cell within the grid
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect)]
pub struct FieldCell((usize, usize));

impl FieldCell {
	/// Create a new instance of [FieldCell]
	pub fn new(column: usize, row: usize) -> Self {
		FieldCell((column, row))
	}
	/// Get the `(column, row)` tuple
	pub fn get_column_row(&self) -> (usize, usize) {
		self.0
	}
	/// Get the column
	pub fn get_column(&self) -> usize {
		self.0 .0
	}
	/// Get the row
	pub fn get_row(&self) -> usize {
		self.0 .1
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn field_cell_parts() {
		let cell = FieldCell::new(3, 7);
		assert_eq!(3, cell.get_column());
		assert_eq!(7, cell.get_row());
		assert_eq!((3, 7), cell.get_column_row());
	}
	#[test]
	fn out_of_range_error() {
		let result = index_out_of_range(10, 9);
		let actual = FlowFieldError::IndexOutOfRange { index: 10, size: 9 };
		assert_eq!(actual, result);
	}
}
