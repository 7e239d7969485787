//! The shape of a grid and everything that can be answered from the shape
//! alone: converting between linear indices and `(column, row)` pairs, the
//! Moore neighbourhood of a cell, cell-to-cell distance and mapping world
//! positions onto cells.
//!
//! Cells are stored row-major from the top-left corner of the grid, so a
//! cell index decomposes as `row = index / columns` and
//! `column = index % columns`. A world position maps onto the grid with `x`
//! selecting the row and `y` selecting the column, so a position lands in
//! cell `columns * floor(x / cell_size) + floor(y / cell_size)`. The corner
//! of cell `0` sits at the world origin:
//!
//! ```text
//!   y ->
//! x  _______________________
//! | |       |       |       |
//! v |   0   |   1   |   2   |
//!   |_______|_______|_______|
//!   |       |       |       |
//!   |   3   |   4   |   5   |
//!   |_______|_______|_______|
//! ```
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Number of `rows` and `columns` of a grid and the world length of each cell edge
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct GridDimensions {
	/// Number of cells along the `x` axis
	rows: usize,
	/// Number of cells along the `y` axis
	columns: usize,
	/// World units spanned by the edge of a cell
	cell_size: f32,
}

impl GridDimensions {
	/// Create a new instance of [GridDimensions], fails if either axis is
	/// empty or `cell_size` is not a finite positive number
	pub fn new(rows: usize, columns: usize, cell_size: f32) -> Result<Self, FlowFieldError> {
		if rows == 0 || columns == 0 {
			return Err(FlowFieldError::InvalidDimensions { rows, columns });
		}
		if !cell_size.is_finite() || cell_size <= 0.0 {
			return Err(FlowFieldError::InvalidCellSize(cell_size));
		}
		if rows.checked_mul(columns).is_none() {
			return Err(FlowFieldError::InvalidDimensions { rows, columns });
		}
		Ok(GridDimensions {
			rows,
			columns,
			cell_size,
		})
	}
	/// Get the number of rows
	pub fn get_rows(&self) -> usize {
		self.rows
	}
	/// Get the number of columns
	pub fn get_columns(&self) -> usize {
		self.columns
	}
	/// Get the world length of a cell edge
	pub fn get_cell_size(&self) -> f32 {
		self.cell_size
	}
	/// Total number of cells
	pub fn size(&self) -> usize {
		self.rows * self.columns
	}
	/// Whether `index` refers to a cell of the grid
	pub fn is_in_bounds(&self, index: usize) -> bool {
		index < self.size()
	}
	/// Pass through an in-bounds `index`, otherwise report it
	pub fn check_index(&self, index: usize) -> Result<usize, FlowFieldError> {
		if self.is_in_bounds(index) {
			Ok(index)
		} else {
			Err(FlowFieldError::IndexOutOfRange {
				index,
				size: self.size(),
			})
		}
	}
	/// Decompose a linear `index` into its `(column, row)` position
	pub fn get_field_cell(&self, index: usize) -> FieldCell {
		FieldCell::new(index % self.columns, index / self.columns)
	}
	/// Combine a [FieldCell] into a linear index, [None] if the cell lies outside the grid
	pub fn get_index(&self, field_cell: FieldCell) -> Option<usize> {
		if field_cell.get_column() < self.columns && field_cell.get_row() < self.rows {
			Some(field_cell.get_row() * self.columns + field_cell.get_column())
		} else {
			None
		}
	}
	/// Iterate over the in-bounds Moore neighbours of the cell at `index` in
	/// [Ordinal::ALL] order. Cells along an edge or in a corner yield fewer
	/// than 8 neighbours, the cell itself is never included and an
	/// out-of-bounds `index` yields nothing
	pub fn neighbours(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
		let cell = self
			.is_in_bounds(index)
			.then(|| self.get_field_cell(index));
		Ordinal::ALL.into_iter().filter_map(move |ordinal| {
			let cell = cell?;
			let (column_step, row_step) = ordinal.offset();
			let column = cell.get_column().checked_add_signed(column_step)?;
			let row = cell.get_row().checked_add_signed(row_step)?;
			self.get_index(FieldCell::new(column, row))
		})
	}
	/// Collect the neighbours of the cell at `index`, see [GridDimensions::neighbours]
	pub fn get_neighbours(&self, index: usize) -> Vec<usize> {
		self.neighbours(index).collect()
	}
	/// Manhattan distance between the cells at `a` and `b`. For neighbours
	/// this charges an orthogonal step `1` and a diagonal step `2`
	pub fn distance(&self, a: usize, b: usize) -> u32 {
		let a = self.get_field_cell(a);
		let b = self.get_field_cell(b);
		(a.get_column().abs_diff(b.get_column()) + a.get_row().abs_diff(b.get_row())) as u32
	}
	/// World position of the centre of the cell at `index`, the row of the
	/// cell is measured along `x` and the column along `y`
	pub fn get_cell_centre(&self, index: usize) -> Vec2 {
		let cell = self.get_field_cell(index);
		Vec2::new(
			(cell.get_row() as f32 + 0.5) * self.cell_size,
			(cell.get_column() as f32 + 0.5) * self.cell_size,
		)
	}
	/// Convert a world position into a linear cell index by truncating each
	/// axis to a whole number of cells, `columns * x + y`.
	///
	/// There is no bounds checking, positions outside of the grid produce
	/// indices which are negative, beyond the grid or which wrap onto
	/// another row. Use [GridDimensions::world_to_cell_index] when the
	/// position is not already known to be on the grid
	pub fn world_to_index(&self, position: Vec2) -> i64 {
		let row = (position.x / self.cell_size) as i64;
		let column = (position.y / self.cell_size) as i64;
		row.saturating_mul(self.columns as i64)
			.saturating_add(column)
	}
	/// Convert a world position into the index of the cell containing it,
	/// [None] if the position lies outside of the grid
	pub fn world_to_cell_index(&self, position: Vec2) -> Option<usize> {
		if !(position.x >= 0.0 && position.y >= 0.0) {
			return None;
		}
		let row = (position.x / self.cell_size) as usize;
		let column = (position.y / self.cell_size) as usize;
		self.get_index(FieldCell::new(column, row))
	}
}
