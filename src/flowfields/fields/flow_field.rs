//! A [FlowField] holds a 2D direction for every cell. A steering
//! pipeline/character controller should read the vector of the cell an actor
//! stands in and move along it to head towards the target.
//!
//! Each vector is either a unit vector or [Vec2::ZERO]. The zero vector is
//! used for cells the [IntegrationField] never reached (walls and anything
//! sealed off behind them) and for cells whose neighbours pull evenly in
//! every direction, such as the target in open terrain.
//!
//! The direction of a cell is found without an explicit gradient. For each
//! reached neighbour the vector from the neighbour's centre to the cell's
//! centre is scaled by the neighbour's integration value and the vectors are
//! summed. Neighbours that are further from the target push harder, so the
//! normalised sum points away from expensive neighbours and towards cheap
//! ones.
//!
//! Scaling by the raw neighbour value is [FlowWeighting::Absolute]. The
//! default [FlowWeighting::Relative] subtracts the cell's own value first,
//! which changes nothing for a cell with all 8 neighbours reached but stops
//! cells on the edge of the grid being pushed away from the edge.
//!

use crate::flowfields::fields::index_out_of_range;
use crate::prelude::*;
use bevy::prelude::*;

/// How neighbouring integration values weight their contribution to a cell's direction
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum FlowWeighting {
	/// Weight by `integration[neighbour] - integration[cell]`. Cheaper
	/// neighbours pull and dearer ones push, so cells along the edge of the
	/// grid are not biased away from the edge
	#[default]
	Relative,
	/// Weight by `integration[neighbour]`. Matches [FlowWeighting::Relative]
	/// for any cell with all 8 neighbours reached, but cells on the edge of
	/// the grid are pushed away from it
	Absolute,
}

/// Direction of travel of every cell, indexed the same as the [CostField]
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct FlowField(Vec<Vec2>);

impl Field<Vec2> for FlowField {
	/// Get a reference to the field array
	fn get(&self) -> &[Vec2] {
		&self.0
	}
	/// Retrieve a field cell value
	fn get_field_cell_value(&self, index: usize) -> Result<Vec2, FlowFieldError> {
		self.0
			.get(index)
			.copied()
			.ok_or_else(|| index_out_of_range(index, self.0.len()))
	}
	/// Set a field cell to a value
	fn set_field_cell_value(&mut self, value: Vec2, index: usize) -> Result<(), FlowFieldError> {
		let size = self.0.len();
		let cell = self
			.0
			.get_mut(index)
			.ok_or_else(|| index_out_of_range(index, size))?;
		*cell = value;
		Ok(())
	}
}

impl FlowField {
	/// Create a new [FlowField] of `size` cells with no direction
	pub fn new(size: usize) -> Self {
		FlowField(vec![Vec2::ZERO; size])
	}
	/// Calculate the direction of every cell from the `integration_field`.
	/// Neighbours which were never reached carry no information about the
	/// route to the target and are left out of the sum
	pub fn calculate(
		&mut self,
		integration_field: &IntegrationField,
		dimensions: &GridDimensions,
		weighting: FlowWeighting,
	) {
		let integration = integration_field.get();
		for (index, flow) in self.0.iter_mut().enumerate() {
			let current = integration[index];
			if current == INTEGR_MAX {
				*flow = Vec2::ZERO;
				continue;
			}
			let centre = dimensions.get_cell_centre(index);
			let mut accumulated = Vec2::ZERO;
			for n in dimensions.neighbours(index) {
				let neighbour = integration[n];
				if neighbour == INTEGR_MAX {
					continue;
				}
				let weight = match weighting {
					FlowWeighting::Relative => neighbour as f32 - current as f32,
					FlowWeighting::Absolute => neighbour as f32,
				};
				accumulated += (centre - dimensions.get_cell_centre(n)) * weight;
			}
			// a zero sum has no direction, normalising it would divide by zero
			*flow = accumulated.normalize_or_zero();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	/// Build both fields of a grid from its flat list of costs
	fn calculate(
		rows: usize,
		columns: usize,
		cell_size: f32,
		costs: Vec<u8>,
		target: usize,
		weighting: FlowWeighting,
	) -> (GridDimensions, IntegrationField, FlowField) {
		let dims = GridDimensions::new(rows, columns, cell_size).unwrap();
		let cost_field = CostField::from_values(&dims, costs).unwrap();
		let mut integration_field = IntegrationField::new(dims.size());
		integration_field
			.calculate_field(target, &cost_field, &dims, RelaxationMode::Fifo, None)
			.unwrap();
		let mut flow_field = FlowField::new(dims.size());
		flow_field.calculate(&integration_field, &dims, weighting);
		(dims, integration_field, flow_field)
	}
	#[test]
	fn rim_points_at_centre_target() {
		let (dims, _, flow_field) = calculate(3, 3, 16.0, vec![0; 9], 4, FlowWeighting::Relative);
		let target_centre = dims.get_cell_centre(4);
		for index in [0, 1, 2, 3, 5, 6, 7, 8] {
			let expected = (target_centre - dims.get_cell_centre(index)).normalize();
			let result = flow_field.get_field_cell_value(index).unwrap();
			assert!(
				expected.abs_diff_eq(result, 1e-5),
				"cell {} expected {:?}, found {:?}",
				index,
				expected,
				result
			);
		}
	}
	#[test]
	fn target_with_even_pull_has_no_direction() {
		let (_, _, flow_field) = calculate(3, 3, 1.0, vec![0; 9], 4, FlowWeighting::Relative);
		assert_eq!(Vec2::ZERO, flow_field.get_field_cell_value(4).unwrap());
	}
	#[test]
	fn target_with_zero_neighbours_is_defined() {
		// every neighbour of the target costs nothing to reach when the target is alone
		let (_, _, flow_field) = calculate(1, 1, 1.0, vec![0], 0, FlowWeighting::Absolute);
		assert_eq!(Vec2::ZERO, flow_field.get_field_cell_value(0).unwrap());
	}
	#[test]
	fn wall_has_no_direction_and_no_pull() {
		let mut costs = vec![0; 9];
		costs[1] = COST_MAX;
		let (_, _, flow_field) = calculate(3, 3, 1.0, costs, 4, FlowWeighting::Relative);
		assert_eq!(Vec2::ZERO, flow_field.get_field_cell_value(1).unwrap());
		// only the cells below and diagonal to the corner contribute, a row
		// step is along `x`
		let expected = Vec2::new(3.0, 2.0).normalize();
		let result = flow_field.get_field_cell_value(0).unwrap();
		assert!(expected.abs_diff_eq(result, 1e-5), "found {:?}", result);
	}
	#[test]
	fn unreachable_cells_have_no_direction() {
		let costs = vec![0, 20, 0, 0, 20, 0, 0, 20, 0];
		let (_, _, flow_field) = calculate(3, 3, 1.0, costs, 0, FlowWeighting::Relative);
		for index in [1, 2, 4, 5, 7, 8] {
			assert_eq!(Vec2::ZERO, flow_field.get_field_cell_value(index).unwrap());
		}
		// back up the first column towards the target
		let up = Vec2::new(-1.0, 0.0);
		assert!(up.abs_diff_eq(flow_field.get_field_cell_value(6).unwrap(), 1e-5));
	}
	#[test]
	fn vectors_are_unit_or_zero() {
		let costs = vec![
			0, 3, 0, 0, 20, 0, //
			5, 20, 20, 0, 20, 0, //
			0, 0, 7, 0, 0, 0, //
			20, 20, 0, 12, 20, 0, //
			0, 0, 0, 0, 20, 19, //
		];
		let (_, _, flow_field) = calculate(5, 6, 10.0, costs, 17, FlowWeighting::Relative);
		for flow in flow_field.get() {
			let length = flow.length();
			assert!(
				*flow == Vec2::ZERO || (length - 1.0).abs() < 1e-5,
				"{:?} has length {}",
				flow,
				length
			);
		}
	}
	#[test]
	fn absolute_matches_relative_for_interior_cells() {
		let costs = vec![
			0, 0, 1, 0, 0, //
			0, 4, 0, 0, 2, //
			0, 0, 0, 6, 0, //
			3, 0, 0, 0, 0, //
			0, 0, 2, 0, 0, //
		];
		let (dims, _, relative) = calculate(5, 5, 1.0, costs.clone(), 0, FlowWeighting::Relative);
		let (_, _, absolute) = calculate(5, 5, 1.0, costs, 0, FlowWeighting::Absolute);
		for index in 0..dims.size() {
			let cell = dims.get_field_cell(index);
			let interior = (1..4).contains(&cell.get_column()) && (1..4).contains(&cell.get_row());
			if interior {
				let r = relative.get_field_cell_value(index).unwrap();
				let a = absolute.get_field_cell_value(index).unwrap();
				assert!(r.abs_diff_eq(a, 1e-5), "cell {} {:?} {:?}", index, r, a);
			}
		}
	}
	#[test]
	fn absolute_pushes_corner_off_the_grid() {
		let (_, _, flow_field) = calculate(3, 3, 1.0, vec![0; 9], 4, FlowWeighting::Absolute);
		let expected = Vec2::new(-1.0, -1.0).normalize();
		let result = flow_field.get_field_cell_value(0).unwrap();
		assert!(expected.abs_diff_eq(result, 1e-5), "found {:?}", result);
	}
	#[test]
	fn recalculating_is_bit_identical() {
		let costs = vec![0, 3, 0, 9, 0, 20, 0, 1, 0];
		let (dims, integration_field, flow_field) =
			calculate(3, 3, 7.5, costs, 8, FlowWeighting::Relative);
		let mut again = flow_field.clone();
		again.calculate(&integration_field, &dims, FlowWeighting::Relative);
		assert_eq!(flow_field, again);
	}
}
